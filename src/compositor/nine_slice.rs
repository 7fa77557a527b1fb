//! Nine-slice panel assembly.
//!
//! A slice set is nine tiles laid out on a 3x3 grid. Corners are copied
//! unscaled, the four edges stretch along one axis and the center stretches
//! along both, so the panel can take any size at or above the sum of its
//! corner extents without distorting the corner artwork.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::layout::Rect;
use crate::{Error, Result};

/// Names of the nine tiles, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceName {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleMiddle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl SliceName {
    pub const ALL: [SliceName; 9] = [
        SliceName::TopLeft,
        SliceName::TopMiddle,
        SliceName::TopRight,
        SliceName::MiddleLeft,
        SliceName::MiddleMiddle,
        SliceName::MiddleRight,
        SliceName::BottomLeft,
        SliceName::BottomMiddle,
        SliceName::BottomRight,
    ];

    /// File name of the tile inside a slice directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SliceName::TopLeft => "topleft.png",
            SliceName::TopMiddle => "topmiddle.png",
            SliceName::TopRight => "topright.png",
            SliceName::MiddleLeft => "middleleft.png",
            SliceName::MiddleMiddle => "middlemiddle.png",
            SliceName::MiddleRight => "middleright.png",
            SliceName::BottomLeft => "bottomleft.png",
            SliceName::BottomMiddle => "bottommiddle.png",
            SliceName::BottomRight => "bottomright.png",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Border thickness of a slice set, taken from its corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Nine validated tiles.
///
/// Construction guarantees every tile is non-empty and that tiles sharing a
/// grid column agree on width (left and right columns) and tiles sharing a
/// grid row agree on height (top and bottom rows).
#[derive(Debug, Clone)]
pub struct SliceSet {
    tiles: [RgbaImage; 9],
}

impl SliceSet {
    /// Build a slice set from tiles ordered as [`SliceName::ALL`].
    pub fn new(tiles: [RgbaImage; 9]) -> Result<Self> {
        for name in SliceName::ALL {
            let t = &tiles[name.index()];
            if t.width() == 0 || t.height() == 0 {
                return Err(Error::InvalidSlices(format!("{} is empty", name.file_name())));
            }
        }

        let set = Self { tiles };
        set.check_column(&[SliceName::TopLeft, SliceName::MiddleLeft, SliceName::BottomLeft])?;
        set.check_column(&[SliceName::TopRight, SliceName::MiddleRight, SliceName::BottomRight])?;
        set.check_row(&[SliceName::TopLeft, SliceName::TopMiddle, SliceName::TopRight])?;
        set.check_row(&[SliceName::BottomLeft, SliceName::BottomMiddle, SliceName::BottomRight])?;
        Ok(set)
    }

    /// Build a slice set by loading each tile in turn. Stops at the first failure.
    pub fn try_from_fn<F>(mut load: F) -> Result<Self>
    where
        F: FnMut(SliceName) -> Result<RgbaImage>,
    {
        let mut tiles = Vec::with_capacity(9);
        for name in SliceName::ALL {
            tiles.push(load(name)?);
        }
        let tiles: [RgbaImage; 9] = tiles
            .try_into()
            .map_err(|_| Error::InvalidSlices("expected nine tiles".into()))?;
        Self::new(tiles)
    }

    fn check_column(&self, names: &[SliceName]) -> Result<()> {
        let w = self.tile(names[0]).width();
        if let Some(bad) = names.iter().find(|n| self.tile(**n).width() != w) {
            return Err(Error::InvalidSlices(format!(
                "{} is {}px wide, expected {}px to match {}",
                bad.file_name(),
                self.tile(*bad).width(),
                w,
                names[0].file_name()
            )));
        }
        Ok(())
    }

    fn check_row(&self, names: &[SliceName]) -> Result<()> {
        let h = self.tile(names[0]).height();
        if let Some(bad) = names.iter().find(|n| self.tile(**n).height() != h) {
            return Err(Error::InvalidSlices(format!(
                "{} is {}px tall, expected {}px to match {}",
                bad.file_name(),
                self.tile(*bad).height(),
                h,
                names[0].file_name()
            )));
        }
        Ok(())
    }

    pub fn tile(&self, name: SliceName) -> &RgbaImage {
        &self.tiles[name.index()]
    }

    pub fn border(&self) -> Border {
        Border {
            left: self.tile(SliceName::TopLeft).width(),
            right: self.tile(SliceName::TopRight).width(),
            top: self.tile(SliceName::TopLeft).height(),
            bottom: self.tile(SliceName::BottomLeft).height(),
        }
    }

    /// Smallest panel this set can fill: the corners placed edge to edge.
    pub fn min_size(&self) -> (u32, u32) {
        let b = self.border();
        (b.left + b.right, b.top + b.bottom)
    }

    /// Destination rectangles of each tile in a `width x height` panel.
    pub fn geometry(&self, width: u32, height: u32) -> Result<SliceGeometry> {
        let (min_w, min_h) = self.min_size();
        if width < min_w || height < min_h {
            return Err(Error::RenderError(format!(
                "panel {}x{} is smaller than slice corners {}x{}",
                width, height, min_w, min_h
            )));
        }

        let b = self.border();
        let mid_w = width - b.left - b.right;
        let mid_h = height - b.top - b.bottom;
        let right_x = (width - b.right) as i32;
        let bottom_y = (height - b.bottom) as i32;
        let (l, t) = (b.left as i32, b.top as i32);

        Ok(SliceGeometry {
            width,
            height,
            rects: [
                Rect::new(0, 0, b.left, b.top),
                Rect::new(l, 0, mid_w, b.top),
                Rect::new(right_x, 0, b.right, b.top),
                Rect::new(0, t, b.left, mid_h),
                Rect::new(l, t, mid_w, mid_h),
                Rect::new(right_x, t, b.right, mid_h),
                Rect::new(0, bottom_y, b.left, b.bottom),
                Rect::new(l, bottom_y, mid_w, b.bottom),
                Rect::new(right_x, bottom_y, b.right, b.bottom),
            ],
        })
    }

    /// Assemble a `width x height` panel.
    ///
    /// Tiles replace the destination pixels; stretched regions use
    /// nearest-neighbor sampling.
    pub fn assemble(&self, width: u32, height: u32) -> Result<RgbaImage> {
        let geometry = self.geometry(width, height)?;
        let mut out = RgbaImage::new(width, height);

        for name in SliceName::ALL {
            let rect = geometry.rect(name);
            if rect.is_empty() {
                continue;
            }
            let tile = self.tile(name);
            if tile.dimensions() == (rect.width, rect.height) {
                imageops::replace(&mut out, tile, rect.x as i64, rect.y as i64);
            } else {
                let stretched = imageops::resize(tile, rect.width, rect.height, FilterType::Nearest);
                imageops::replace(&mut out, &stretched, rect.x as i64, rect.y as i64);
            }
        }

        Ok(out)
    }
}

/// Placement of the nine tiles inside one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceGeometry {
    pub width: u32,
    pub height: u32,
    rects: [Rect; 9],
}

impl SliceGeometry {
    pub fn rect(&self, name: SliceName) -> Rect {
        self.rects[name.index()]
    }

    pub fn rects(&self) -> impl Iterator<Item = (SliceName, Rect)> + '_ {
        SliceName::ALL.into_iter().map(move |n| (n, self.rect(n)))
    }
}
