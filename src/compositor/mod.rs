//! Badge compositor
//!
//! Pure composition of one achievement badge: panel background (nine-slice
//! or rounded fallback), icon, title and subtitle. Nothing in this module
//! touches the filesystem or the network.

pub mod bitmap_font;
pub mod layout;
pub mod nine_slice;
pub mod panel;
pub mod raster;
pub mod text;

use image::{imageops, Rgba, RgbaImage};

pub use layout::{layout_panel, PanelLayout, Rect, TextMetrics};
pub use nine_slice::{SliceName, SliceSet};
pub use text::{BitmapFace, GlyphFace, TrueTypeFace};

use crate::Result;

pub const TITLE_COLOR: Rgba<u8> = Rgba([255, 255, 85, 255]);
pub const SUBTITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub const PLACEHOLDER_ICON_SIZE: u32 = 40;
pub const PLACEHOLDER_ICON_COLOR: Rgba<u8> = Rgba([180, 180, 180, 255]);

/// Neutral gray square used when an icon is missing or unreadable.
pub fn placeholder_icon() -> RgbaImage {
    RgbaImage::from_pixel(PLACEHOLDER_ICON_SIZE, PLACEHOLDER_ICON_SIZE, PLACEHOLDER_ICON_COLOR)
}

/// Which background was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    NineSlice,
    Rounded,
}

/// A composed badge together with the layout it was drawn from.
#[derive(Debug, Clone)]
pub struct Badge {
    pub image: RgbaImage,
    pub layout: PanelLayout,
    pub panel: PanelKind,
}

impl Badge {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Compose a badge.
///
/// With `slices` the background is a nine-slice panel; without, the rounded
/// fallback of the same size. An empty icon is replaced by
/// [`placeholder_icon`]. Output is fully determined by the inputs.
pub fn compose(
    title: &str,
    subtitle: &str,
    icon: &RgbaImage,
    slices: Option<&SliceSet>,
    title_face: &dyn GlyphFace,
    subtitle_face: &dyn GlyphFace,
) -> Result<Badge> {
    let placeholder;
    let icon = if icon.width() == 0 || icon.height() == 0 {
        placeholder = placeholder_icon();
        &placeholder
    } else {
        icon
    };

    let mut layout = layout_panel(
        title_face.measure(title),
        subtitle_face.measure(subtitle),
        icon.dimensions(),
    );

    let (mut image, panel) = match slices {
        Some(set) => {
            let (min_w, min_h) = set.min_size();
            layout = layout.with_min_size(min_w, min_h);
            (set.assemble(layout.width, layout.height)?, PanelKind::NineSlice)
        }
        None => (panel::rounded_panel(layout.width, layout.height), PanelKind::Rounded),
    };

    imageops::overlay(&mut image, icon, layout.icon.x as i64, layout.icon.y as i64);

    let (tx, ty) = layout.title_origin;
    title_face.draw(&mut image, tx, ty, title, TITLE_COLOR);
    if let Some((sx, sy)) = layout.subtitle_origin {
        subtitle_face.draw(&mut image, sx, sy, subtitle, SUBTITLE_COLOR);
    }

    Ok(Badge { image, layout, panel })
}
