//! Text faces: measuring and drawing single lines of text onto a canvas.
//!
//! Two implementations are provided: [`TrueTypeFace`] for font files loaded
//! through `ab_glyph`, and [`BitmapFace`], a built-in pixel face that needs no
//! assets and is the last entry of every font fallback chain.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::bitmap_font::{self, GLYPH_COLUMNS, GLYPH_ROWS};
use super::layout::TextMetrics;
use crate::{Error, Result};

/// Pixel size of title text.
pub const TITLE_PX: f32 = 22.0;
/// Pixel size of subtitle text.
pub const SUBTITLE_PX: f32 = 18.0;

/// A font at a fixed size.
pub trait GlyphFace {
    /// Bounding box of `text` when drawn with this face. Empty text is (0, 0).
    fn measure(&self, text: &str) -> TextMetrics;

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>);

    /// Short human-readable name, used in logs.
    fn name(&self) -> String;
}

/// Source-over blend of `color` scaled by `coverage` into one pixel.
/// Out-of-bounds coordinates are ignored.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let a = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    for c in 0..3 {
        let src = color[c] as f32 * a;
        let below = dst[c] as f32 * dst_a * (1.0 - a);
        dst[c] = ((src + below) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// A TrueType/OpenType font rendered with `ab_glyph`.
pub struct TrueTypeFace {
    font: FontVec,
    scale: PxScale,
    label: String,
}

impl TrueTypeFace {
    pub fn from_bytes(data: Vec<u8>, px: f32, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let font = FontVec::try_from_vec(data)
            .map_err(|e| Error::FontError(format!("{}: {}", label, e)))?;
        Ok(Self { font, scale: PxScale::from(px), label })
    }

    /// Horizontal pen positions of each glyph relative to the line start.
    fn positions(&self, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        let mut out = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            out.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        (out, caret)
    }
}

impl GlyphFace for TrueTypeFace {
    fn measure(&self, text: &str) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        let scaled = self.font.as_scaled(self.scale);
        let (_, advance) = self.positions(text);
        TextMetrics::new(
            advance.max(0.0).ceil() as u32,
            (scaled.ascent() - scaled.descent()).max(0.0).ceil() as u32,
        )
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let baseline = y as f32 + self.font.as_scaled(self.scale).ascent();
        let (glyphs, _) = self.positions(text);
        for (id, offset) in glyphs {
            let glyph = id.with_scale_and_position(self.scale, point(x as f32 + offset, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    blend_pixel(canvas, ox + gx as i32, oy + gy as i32, color, coverage);
                });
            }
        }
    }

    fn name(&self) -> String {
        format!("{} @ {}px", self.label, self.scale.y)
    }
}

/// The built-in pixel face, scaled by an integer factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFace {
    scale: u32,
}

impl BitmapFace {
    pub fn new(scale: u32) -> Self {
        Self { scale: scale.max(1) }
    }

    /// Face whose cell grid comes closest to a `px` pixel line height.
    pub fn for_px(px: f32) -> Self {
        Self::new((px / GLYPH_ROWS as f32).round() as u32)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn advance(&self) -> u32 {
        (GLYPH_COLUMNS + 1) * self.scale
    }
}

impl GlyphFace for BitmapFace {
    fn measure(&self, text: &str) -> TextMetrics {
        let n = text.chars().count() as u32;
        if n == 0 {
            return TextMetrics::default();
        }
        // No trailing spacing column after the last glyph.
        TextMetrics::new(n * self.advance() - self.scale, GLYPH_ROWS * self.scale)
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let s = self.scale as i32;
        for (i, c) in text.chars().enumerate() {
            let gx = x + i as i32 * self.advance() as i32;
            for col in 0..GLYPH_COLUMNS {
                for row in 0..GLYPH_ROWS {
                    if !bitmap_font::is_set(c, col, row) {
                        continue;
                    }
                    for dy in 0..s {
                        for dx in 0..s {
                            blend_pixel(canvas, gx + col as i32 * s + dx, y + row as i32 * s + dy, color, 1.0);
                        }
                    }
                }
            }
        }
    }

    fn name(&self) -> String {
        format!("built-in bitmap x{}", self.scale)
    }
}
