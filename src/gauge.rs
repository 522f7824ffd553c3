//! Decorative dial face: a ring of tick marks, a framing circle and a label
//! that follows an arc.

use std::f64::consts::PI;

use crate::config::GaugeConfig;
use crate::geometry::Point;
use crate::scene::{DrawCommand, Scene, Stroke};

/// One dial mark. Derived on every render, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub angle_deg: u32,
    pub is_major: bool,
    /// On the dial circle.
    pub outer: Point,
    /// `tick length` closer to the center than `outer`.
    pub inner: Point,
}

impl Tick {
    pub fn length(&self, config: &GaugeConfig) -> f64 {
        if self.is_major {
            config.major_tick_length
        } else {
            config.minor_tick_length
        }
    }
}

pub fn is_major_angle(angle_deg: u32, major_every_deg: u32) -> bool {
    major_every_deg != 0 && angle_deg % major_every_deg == 0
}

/// Every tick around the full circle, starting at 0° (pointing right) and
/// advancing clockwise on screen.
pub fn ticks(config: &GaugeConfig) -> Vec<Tick> {
    let step = config.tick_step_deg.max(1) as usize;
    (0..360)
        .step_by(step)
        .map(|angle_deg| {
            let is_major = is_major_angle(angle_deg, config.major_every_deg);
            let length = if is_major {
                config.major_tick_length
            } else {
                config.minor_tick_length
            };
            let radians = (angle_deg as f64).to_radians();
            Tick {
                angle_deg,
                is_major,
                outer: Point::on_circle(config.center, config.radius, radians),
                inner: Point::on_circle(config.center, config.radius - length, radians),
            }
        })
        .collect()
}

/// Distance along the guide path at which the label starts, chosen so a
/// label of nominal length `label_length` is centered on the upper half arc.
pub fn label_start_offset(radius: f64, label_length: f64) -> f64 {
    (PI * radius - label_length) / 2.0
}

#[derive(Debug, Clone)]
pub struct CurveTextGauge {
    config: GaugeConfig,
}

impl CurveTextGauge {
    pub fn new(config: GaugeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// The dial face on its own, in gauge-local coordinates.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new();
        self.add_to_scene(&mut scene, Point::default());
        scene
    }

    /// Appends the dial face with its top-left corner at `origin`.
    pub fn add_to_scene(&self, scene: &mut Scene, origin: Point) {
        let config = &self.config;
        let center = origin + config.center;

        scene.add_command(DrawCommand::GuidePath {
            id: config.label_path_id.clone(),
            center,
            radius: config.radius,
        });

        scene.add_command(DrawCommand::Circle {
            center,
            radius: config.frame_radius,
            fill: None,
            stroke: Some(Stroke {
                color: config.frame_color,
                thickness: config.frame_thickness,
            }),
        });

        for tick in ticks(config) {
            scene.add_command(DrawCommand::Line {
                from: origin + tick.outer,
                to: origin + tick.inner,
                thickness: if tick.is_major {
                    config.major_tick_thickness
                } else {
                    config.minor_tick_thickness
                },
                color: config.tick_color,
            });
        }

        scene.add_command(DrawCommand::TextOnPath {
            path_id: config.label_path_id.clone(),
            text: config.label.clone(),
            start_offset: label_start_offset(config.radius, config.label_length),
            font_size: config.label_font_size,
            color: config.label_color,
        });
    }
}

impl Default for CurveTextGauge {
    fn default() -> Self {
        Self::new(GaugeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn thirty_six_ticks_twelve_major() {
        let config = GaugeConfig::default();
        let ticks = ticks(&config);
        assert_eq!(ticks.len(), 36);
        assert_eq!(ticks.iter().filter(|t| t.is_major).count(), 12);
        assert_eq!(ticks.iter().filter(|t| !t.is_major).count(), 24);
        assert_eq!(ticks.first().map(|t| t.angle_deg), Some(0));
        assert_eq!(ticks.last().map(|t| t.angle_deg), Some(350));
    }

    #[test]
    fn major_iff_multiple_of_thirty() {
        for tick in ticks(&GaugeConfig::default()) {
            assert_eq!(tick.is_major, tick.angle_deg % 30 == 0, "{}°", tick.angle_deg);
        }
    }

    #[test]
    fn every_third_tick_is_major() {
        let pattern: Vec<bool> = ticks(&GaugeConfig::default())
            .iter()
            .map(|t| t.is_major)
            .collect();
        for (i, is_major) in pattern.iter().enumerate() {
            assert_eq!(*is_major, i % 3 == 0);
        }
    }

    #[test]
    fn tick_endpoints_sit_at_expected_radii() {
        let config = GaugeConfig::default();
        for tick in ticks(&config) {
            let expected_inner = if tick.is_major { 65.0 - 15.0 } else { 65.0 - 7.0 };
            assert!((tick.outer.distance_to(config.center) - 65.0).abs() < EPS);
            assert!((tick.inner.distance_to(config.center) - expected_inner).abs() < EPS);
            assert!((tick.outer.distance_to(tick.inner) - tick.length(&config)).abs() < EPS);
        }
    }

    #[test]
    fn zero_degree_tick_points_right() {
        let config = GaugeConfig::default();
        let first = ticks(&config)[0];
        assert!((first.outer.x - 145.0).abs() < EPS);
        assert!((first.outer.y - 80.0).abs() < EPS);
        assert!((first.inner.x - 130.0).abs() < EPS);
    }

    #[test]
    fn label_offset_centers_on_upper_arc() {
        let offset = label_start_offset(65.0, 140.0);
        assert!((offset - (PI * 65.0 - 140.0) / 2.0).abs() < EPS);
        // Label midpoint lands at the top of the circle, a quarter turn in.
        assert!((offset + 70.0 - PI * 65.0 / 2.0).abs() < EPS);
    }

    #[test]
    fn scene_has_path_frame_ticks_and_label() {
        let scene = CurveTextGauge::default().scene();
        let commands = scene.commands();
        assert_eq!(commands.len(), 1 + 1 + 36 + 1);
        assert!(matches!(commands[0], DrawCommand::GuidePath { .. }));
        assert!(matches!(
            commands[1],
            DrawCommand::Circle { radius, fill: None, .. } if radius == 40.0
        ));

        let widths: Vec<f32> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { thickness, .. } => Some(*thickness),
                _ => None,
            })
            .collect();
        assert_eq!(widths.iter().filter(|w| **w == 2.0).count(), 12);
        assert_eq!(widths.iter().filter(|w| **w == 1.0).count(), 24);

        match commands.last() {
            Some(DrawCommand::TextOnPath {
                path_id,
                text,
                start_offset,
                ..
            }) => {
                assert_eq!(path_id, "titlepath");
                assert_eq!(text, "ROBOT MOTION");
                assert!((start_offset - label_start_offset(65.0, 140.0)).abs() < EPS);
            }
            other => panic!("expected label, got {other:?}"),
        }
    }

    #[test]
    fn origin_shifts_every_point() {
        let gauge = CurveTextGauge::default();
        let mut scene = Scene::new();
        gauge.add_to_scene(&mut scene, Point::new(100.0, 10.0));
        let Some(DrawCommand::GuidePath { center, .. }) = scene.commands().first() else {
            panic!("guide path first");
        };
        assert_eq!(*center, Point::new(180.0, 90.0));
    }

    #[test]
    fn svg_export_has_thirty_six_lines() {
        let svg = CurveTextGauge::default().scene().to_svg(160.0, 160.0);
        assert_eq!(svg.matches("<line ").count(), 36);
        assert_eq!(svg.matches("stroke=\"#ff0000\" stroke-width=\"2\"").count(), 12);
        assert!(svg.contains(&format!(
            "startOffset=\"{}\"",
            label_start_offset(65.0, 140.0)
        )));
        assert!(svg.contains(">ROBOT MOTION</textPath>"));
    }
}
