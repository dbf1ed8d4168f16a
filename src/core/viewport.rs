//! Terminal viewport facts used by presentation: size class and motion.

/// Below this many columns the layout is compact (sidebar hidden by default).
pub const COMPACT_MAX_WIDTH: u16 = 80;
/// Below this many columns the layout is medium; at or above it, wide.
pub const MEDIUM_MAX_WIDTH: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    Compact,
    Medium,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub reduced_motion: bool,
}

impl Viewport {
    pub fn new(width: u16, height: u16, reduced_motion: bool) -> Self {
        Self {
            width,
            height,
            reduced_motion,
        }
    }

    pub fn layout_class(&self) -> LayoutClass {
        if self.width < COMPACT_MAX_WIDTH {
            LayoutClass::Compact
        } else if self.width < MEDIUM_MAX_WIDTH {
            LayoutClass::Medium
        } else {
            LayoutClass::Wide
        }
    }

    pub fn is_compact(&self) -> bool {
        self.layout_class() == LayoutClass::Compact
    }
}
