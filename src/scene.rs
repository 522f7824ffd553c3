// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use rusttype::Font;
use tracing::trace;

use crate::config::Color;
use crate::geometry::Point;
use crate::raster::{self, Canvas};

/// Outline of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub thickness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Invisible full-circle path that starts at the leftmost point and runs
    /// clockwise over the top. Only referenced by `TextOnPath`.
    GuidePath {
        id: String,
        center: Point,
        radius: f64,
    },
    TextOnPath {
        path_id: String,
        text: String,
        start_offset: f64,
        font_size: f32,
        color: Color,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn guide_path(&self, id: &str) -> Option<(Point, f64)> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::GuidePath {
                id: path_id,
                center,
                radius,
            } if path_id == id => Some((*center, *radius)),
            _ => None,
        })
    }

    /// Rasterises every command in order. Text is skipped without a font.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font<'static>>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => raster::draw_line(canvas, *from, *to, *thickness, *color),
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    if let Some(color) = fill {
                        raster::fill_circle(canvas, *center, *radius, *color);
                    }
                    if let Some(stroke) = stroke {
                        raster::stroke_circle(
                            canvas,
                            *center,
                            *radius,
                            stroke.thickness,
                            stroke.color,
                        );
                    }
                }
                DrawCommand::GuidePath { .. } => {}
                DrawCommand::TextOnPath {
                    path_id,
                    text,
                    start_offset,
                    font_size,
                    color,
                } => {
                    let Some(font) = font else {
                        continue;
                    };
                    let Some((center, radius)) = self.guide_path(path_id) else {
                        trace!(path_id = %path_id, "text references unknown path");
                        continue;
                    };
                    raster::draw_text_on_circle(
                        canvas,
                        font,
                        *font_size,
                        center,
                        radius,
                        std::f64::consts::PI,
                        *start_offset,
                        text,
                        *color,
                    );
                }
            }
        }
    }

    /// Serialises the scene as a standalone SVG document.
    pub fn to_svg(&self, width: f64, height: f64) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}px\" height=\"{height}px\">\n<g>\n"
        );
        for command in &self.commands {
            svg.push_str(&svg_element(command, width, height));
            svg.push('\n');
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

fn svg_element(command: &DrawCommand, width: f64, height: f64) -> String {
    match command {
        DrawCommand::Clear(color) => format!(
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\" />",
            color.to_hex()
        ),
        DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{thickness}\" />",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex()
        ),
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let fill = fill.map_or_else(|| "none".to_string(), Color::to_hex);
            let stroke = stroke.map_or_else(String::new, |s| {
                format!(
                    " stroke=\"{}\" stroke-width=\"{}\"",
                    s.color.to_hex(),
                    s.thickness
                )
            });
            format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{fill}\"{stroke} />",
                center.x, center.y
            )
        }
        DrawCommand::GuidePath { id, center, radius } => {
            let diameter = radius * 2.0;
            format!(
                "<path id=\"{}\" fill=\"none\" d=\"M {} {} a {radius} {radius} 0 0 1 {diameter} 0 a {radius} {radius} 0 0 1 -{diameter} 0\" />",
                escape_xml(id),
                center.x - radius,
                center.y
            )
        }
        DrawCommand::TextOnPath {
            path_id,
            text,
            start_offset,
            font_size,
            color,
        } => format!(
            "<text fill=\"{}\" font-size=\"{font_size}\" font-weight=\"bold\"><textPath href=\"#{}\" startOffset=\"{start_offset}\">{}</textPath></text>",
            color.to_hex(),
            escape_xml(path_id),
            escape_xml(text)
        ),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
