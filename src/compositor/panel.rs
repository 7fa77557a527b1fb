//! Rounded-rectangle panel used when no slice set is available

use image::{Rgba, RgbaImage};

pub const PANEL_RADIUS: u32 = 8;
pub const OUTLINE_COLOR: Rgba<u8> = Rgba([90, 90, 90, 255]);
pub const OUTER_FILL: Rgba<u8> = Rgba([16, 16, 16, 230]);
pub const INNER_FILL: Rgba<u8> = Rgba([18, 18, 18, 230]);
/// Inset of the darker inner area from the outer edge.
pub const INNER_INSET: u32 = 4;

/// Draw a `width x height` rounded panel: outlined outer rectangle with a
/// slightly darker inner area. Pixels outside the rounded corners stay
/// transparent.
pub fn rounded_panel(width: u32, height: u32) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let outer = Bounds::new(0, 0, width as i32 - 1, height as i32 - 1, PANEL_RADIUS as i32);
    let outline_inner = outer.inset(1);
    let inner = outer.inset(INNER_INSET as i32);

    for y in 0..height {
        for x in 0..width {
            let (px, py) = (x as i32, y as i32);
            if !outer.contains(px, py) {
                continue;
            }
            let color = if !outline_inner.contains(px, py) {
                OUTLINE_COLOR
            } else if inner.contains(px, py) {
                INNER_FILL
            } else {
                OUTER_FILL
            };
            out.put_pixel(x, y, color);
        }
    }

    out
}

/// Inclusive pixel bounds with a corner radius.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
}

impl Bounds {
    fn new(x0: i32, y0: i32, x1: i32, y1: i32, radius: i32) -> Self {
        let half = ((x1 - x0).min(y1 - y0) / 2).max(0);
        Self { x0, y0, x1, y1, radius: radius.clamp(0, half) }
    }

    fn inset(&self, by: i32) -> Self {
        Self::new(self.x0 + by, self.y0 + by, self.x1 - by, self.y1 - by, self.radius - by / 2)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        if self.x1 < self.x0 || self.y1 < self.y0 {
            return false;
        }
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return false;
        }
        let r = self.radius;
        let cx = x.clamp(self.x0 + r, self.x1 - r);
        let cy = y.clamp(self.y0 + r, self.y1 - r);
        let (dx, dy) = ((x - cx) as f32, (y - cy) as f32);
        let limit = r as f32 + 0.5;
        dx * dx + dy * dy <= limit * limit
    }
}
