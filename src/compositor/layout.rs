//! Panel sizing for the badge compositor
//!
//! All values are in pixels. The panel is sized from the measured text and
//! icon, floored to a minimum content width, then padded on every side.

/// Horizontal space reserved around the icon and between icon and text.
pub const TEXT_PADDING: u32 = 22;
/// Vertical gap between the title and subtitle rows.
pub const LINE_GAP: u32 = 6;
/// Vertical padding added to the content box.
pub const VERTICAL_PADDING: u32 = 12;
/// Content boxes never get narrower than this.
pub const MIN_CONTENT_WIDTH: u32 = 150;
/// Added once to each axis (10px margin on each side).
pub const PANEL_PADDING: u32 = 20;
/// Left margin of the icon.
pub const ICON_MARGIN: u32 = 12;
/// Gap between the icon's right edge and the text block.
pub const TEXT_GAP: u32 = TEXT_PADDING - ICON_MARGIN;
/// Top margin of the title row.
pub const TEXT_TOP: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Measured size of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    pub width: u32,
    pub height: u32,
}

impl TextMetrics {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for TextMetrics {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Result of sizing a badge: panel extent plus where each piece goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub content_width: u32,
    pub content_height: u32,
    pub width: u32,
    pub height: u32,
    pub icon: Rect,
    pub title_origin: (i32, i32),
    /// `None` when the subtitle measured zero height.
    pub subtitle_origin: Option<(i32, i32)>,
}

impl PanelLayout {
    /// Grow the panel so each axis is at least the given size. Never shrinks.
    ///
    /// The icon stays vertically centered in the grown panel.
    pub fn with_min_size(mut self, min_width: u32, min_height: u32) -> Self {
        self.width = self.width.max(min_width);
        self.height = self.height.max(min_height);
        self.icon.y = centered(self.height, self.icon.height);
        self
    }
}

fn centered(outer: u32, inner: u32) -> i32 {
    (outer.saturating_sub(inner) / 2) as i32
}

/// Compute the panel layout for the given title, subtitle and icon sizes.
///
/// Titles and subtitles stack vertically; the content height is whichever is
/// taller of the icon and the text stack. An empty title or subtitle (zero
/// height) drops out of the stack together with the line gap.
pub fn layout_panel(title: TextMetrics, subtitle: TextMetrics, icon: (u32, u32)) -> PanelLayout {
    let (icon_w, icon_h) = icon;

    let content_width = (title.width.max(subtitle.width) + icon_w + TEXT_PADDING).max(MIN_CONTENT_WIDTH);

    // The gap only separates two non-empty rows.
    let gap = if title.height > 0 && subtitle.height > 0 { LINE_GAP } else { 0 };
    let text_stack = title.height + gap + subtitle.height;
    let content_height = icon_h.max(text_stack) + VERTICAL_PADDING;

    let width = content_width + PANEL_PADDING;
    let height = content_height + PANEL_PADDING;

    let text_x = (ICON_MARGIN + icon_w + TEXT_GAP) as i32;
    let title_origin = (text_x, TEXT_TOP as i32);
    let subtitle_origin = if subtitle.height > 0 {
        Some((text_x, (TEXT_TOP + title.height + gap) as i32))
    } else {
        None
    };

    PanelLayout {
        content_width,
        content_height,
        width,
        height,
        icon: Rect::new(ICON_MARGIN as i32, centered(height, icon_h), icon_w, icon_h),
        title_origin,
        subtitle_origin,
    }
}
