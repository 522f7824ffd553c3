// ============================================================================
// RASTER BACK END
// ============================================================================
//
// Immediate-mode primitives over an RGBA8 frame buffer. Every primitive takes
// logical coordinates; the canvas scale maps them to buffer pixels.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::geometry::Point;

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    scale: f64,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize, scale: f64) -> Self {
        Self {
            frame,
            width,
            height,
            scale,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA at buffer pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    fn to_px(&self, p: Point) -> (f64, f64) {
        (p.x * self.scale, p.y * self.scale)
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        dst[0] = mix(color.r, dst[0]);
        dst[1] = mix(color.g, dst[1]);
        dst[2] = mix(color.b, dst[2]);
        dst[3] = 0xff;
    }

    /// Bilinear splat of one sample across its four neighbouring pixels.
    fn blend_subpixel(&mut self, x: f64, y: f64, color: Color, alpha: f32) {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let x_frac = x - x_floor;
        let y_frac = y - y_floor;
        let (xi, yi) = (x_floor as i32, y_floor as i32);

        let samples = [
            (xi, yi, (1.0 - x_frac) * (1.0 - y_frac)),
            (xi + 1, yi, x_frac * (1.0 - y_frac)),
            (xi, yi + 1, (1.0 - x_frac) * y_frac),
            (xi + 1, yi + 1, x_frac * y_frac),
        ];
        for (px, py, weight) in samples {
            let final_alpha = alpha * weight as f32;
            if final_alpha > 0.001 {
                self.blend(px, py, color, final_alpha);
            }
        }
    }
}

// ============================================================================
// SHAPES
// ============================================================================

/// Anti-aliased straight segment with round caps.
pub fn draw_line(canvas: &mut Canvas, from: Point, to: Point, thickness: f32, color: Color) {
    let (x0, y0) = canvas.to_px(from);
    let (x1, y1) = canvas.to_px(to);
    let half = thickness as f64 * canvas.scale / 2.0;
    let pad = half.ceil() + 1.0;

    let min_x = (x0.min(x1) - pad).floor() as i32;
    let max_x = (x0.max(x1) + pad).ceil() as i32;
    let min_y = (y0.min(y1) - pad).floor() as i32;
    let max_y = (y0.max(y1) + pad).ceil() as i32;

    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let t = if len_sq > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = (x0 + t * dx - px).hypot(y0 + t * dy - py);
            let aa = (half + 0.5 - dist).clamp(0.0, 1.0);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa as f32);
            }
        }
    }
}

pub fn fill_circle(canvas: &mut Canvas, center: Point, radius: f64, color: Color) {
    let (cx, cy) = canvas.to_px(center);
    let r = radius * canvas.scale;
    for_each_in_box(cx, cy, r + 1.0, |x, y, dist| {
        let aa = (r + 0.5 - dist).clamp(0.0, 1.0);
        if aa > 0.0 {
            canvas.blend(x, y, color, aa as f32);
        }
    });
}

pub fn stroke_circle(canvas: &mut Canvas, center: Point, radius: f64, thickness: f32, color: Color) {
    let (cx, cy) = canvas.to_px(center);
    let r = radius * canvas.scale;
    let half = thickness as f64 * canvas.scale / 2.0;
    for_each_in_box(cx, cy, r + half + 1.0, |x, y, dist| {
        let aa = (half + 0.5 - (dist - r).abs()).clamp(0.0, 1.0);
        if aa > 0.0 {
            canvas.blend(x, y, color, aa as f32);
        }
    });
}

/// Visits every pixel in the square of half-size `extent` around `(cx, cy)`
/// with the distance from its center to `(cx, cy)`.
fn for_each_in_box(cx: f64, cy: f64, extent: f64, mut f: impl FnMut(i32, i32, f64)) {
    let min_x = (cx - extent).floor() as i32;
    let max_x = (cx + extent).ceil() as i32;
    let min_y = (cy - extent).floor() as i32;
    let max_y = (cy + extent).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dist = (x as f64 + 0.5 - cx).hypot(y as f64 + 0.5 - cy);
            f(x, y, dist);
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Lays `text` along a circle, the way an SVG `<textPath>` follows a circular
/// path that begins at `start_angle` and runs clockwise (y down).
///
/// `start_offset` is the distance along the path, in logical units, at which
/// the first glyph's pen position sits. Glyph baselines lie on the circle with
/// ascenders pointing outward.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_on_circle(
    canvas: &mut Canvas,
    font: &Font<'static>,
    font_size: f32,
    center: Point,
    radius: f64,
    start_angle: f64,
    start_offset: f64,
    text: &str,
    color: Color,
) {
    let scale = canvas.scale;
    let (cx, cy) = canvas.to_px(center);
    let radius_px = radius * scale;
    if radius_px <= 0.0 {
        return;
    }
    let offset_px = start_offset * scale;

    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, Scale::uniform(font_size * scale as f32), point(0.0, 0.0))
        .collect();

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        let advance = glyph.unpositioned().h_metrics().advance_width as f64;
        let pen_x = glyph.position().x as f64;
        let mid = pen_x + advance / 2.0;

        let angle = start_angle + (offset_px + mid) / radius_px;
        let anchor_x = cx + angle.cos() * radius_px;
        let anchor_y = cy + angle.sin() * radius_px;

        // Tangent direction of a clockwise path.
        let rotation = angle + std::f64::consts::FRAC_PI_2;
        let (sin_r, cos_r) = rotation.sin_cos();

        glyph.draw(|gx, gy, v| {
            if v <= 0.001 {
                return;
            }
            let local_x = (bb.min.x + gx as i32) as f64 + 0.5 - mid;
            let local_y = (bb.min.y + gy as i32) as f64 + 0.5;
            let x = anchor_x + local_x * cos_r - local_y * sin_r;
            let y = anchor_y + local_x * sin_r + local_y * cos_r;
            canvas.blend_subpixel(x - 0.5, y - 0.5, color, v);
        });
    }
}
