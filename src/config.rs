use bon::Builder;

use crate::geometry::Point;

/// Color representation for widget elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const ORANGE: Color = Color::new(0xff, 0xa5, 0x00);
    pub const LIGHT_GRAY: Color = Color::new(0xd1, 0xd5, 0xdb);
    pub const GRAY_200: Color = Color::new(0xe5, 0xe7, 0xeb);
    pub const BLUE_500: Color = Color::new(0x3b, 0x82, 0xf6);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `#rrggbb`, as used in SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ============================================================================
// GAUGE
// ============================================================================

/// Dial face geometry and styling.
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(default = 160.0)]
    pub size: f64,
    #[builder(default = Point::new(80.0, 80.0))]
    pub center: Point,
    #[builder(default = 65.0)]
    pub radius: f64,

    // Ticks
    #[builder(default = 10)]
    pub tick_step_deg: u32,
    #[builder(default = 30)]
    pub major_every_deg: u32,
    #[builder(default = 15.0)]
    pub major_tick_length: f64,
    #[builder(default = 7.0)]
    pub minor_tick_length: f64,
    #[builder(default = 2.0)]
    pub major_tick_thickness: f32,
    #[builder(default = 1.0)]
    pub minor_tick_thickness: f32,
    #[builder(default = Color::RED)]
    pub tick_color: Color,

    // Framing circle
    #[builder(default = 40.0)]
    pub frame_radius: f64,
    #[builder(default = Color::LIGHT_GRAY)]
    pub frame_color: Color,
    #[builder(default = 1.0)]
    pub frame_thickness: f32,

    // Curved label
    #[builder(default = "ROBOT MOTION".to_string())]
    pub label: String,
    /// Nominal rendered label length, used to center it on the arc.
    #[builder(default = 140.0)]
    pub label_length: f64,
    #[builder(default = 18.0)]
    pub label_font_size: f32,
    #[builder(default = Color::ORANGE)]
    pub label_color: Color,
    #[builder(default = "titlepath".to_string())]
    pub label_path_id: String,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// JOYSTICK
// ============================================================================

/// Joystick container, knob and return motion.
#[derive(Debug, Clone, Builder)]
pub struct JoystickConfig {
    /// Side of the square container; the boundary circle is inscribed in it.
    #[builder(default = 160.0)]
    pub size: f64,
    #[builder(default = 20.0)]
    pub stick_radius: f64,
    /// Units travelled per frame while returning to center.
    #[builder(default = 2.0)]
    pub return_speed: f64,
    /// Below this distance the stick snaps to center.
    #[builder(default = 1.0)]
    pub snap_distance: f64,
    #[builder(default = Color::GRAY_200)]
    pub base_color: Color,
    #[builder(default = Color::BLUE_500)]
    pub stick_color: Color,
}

impl JoystickConfig {
    /// Rest position in container-local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// PANEL (WINDOW)
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct PanelConfig {
    #[builder(default = "Robot Motion".to_string())]
    pub title: String,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    /// Frame buffer pixels per logical unit.
    #[builder(default = 2.0)]
    pub render_scale: f64,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    /// TrueType/OpenType font for the gauge label. Without it the label is skipped.
    pub font_data: Option<Vec<u8>>,
    #[builder(default)]
    pub gauge: GaugeConfig,
    #[builder(default)]
    pub joystick: JoystickConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
