use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use motion_panel::{read_font_file, CurveTextGauge, GaugeConfig, Panel, PanelConfig};

#[derive(Parser)]
#[command(name = "motion-panel")]
#[command(about = "Curved-text gauge and drag joystick in a native window")]
struct Cli {
    /// TrueType/OpenType font for the gauge label
    #[arg(short, long, env = "MOTION_PANEL_FONT")]
    font: Option<PathBuf>,

    /// Print the gauge as an SVG document and exit
    #[arg(long)]
    svg: bool,

    /// Window title
    #[arg(long, default_value = "Robot Motion")]
    title: String,

    /// Maximum redraw rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Frame buffer pixels per logical unit
    #[arg(long, default_value_t = 2.0)]
    scale: f64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.svg {
        let gauge = CurveTextGauge::new(GaugeConfig::default());
        let size = gauge.config().size;
        print!("{}", gauge.scene().to_svg(size, size));
        return Ok(());
    }

    let font_data = match &cli.font {
        Some(path) => {
            info!("Loading font from {:?}", path);
            Some(read_font_file(path)?)
        }
        None => None,
    };

    let config = PanelConfig::builder()
        .title(cli.title)
        .max_framerate(cli.fps)
        .render_scale(cli.scale)
        .maybe_font_data(font_data)
        .build();

    Panel::new(config).show()?;
    Ok(())
}
