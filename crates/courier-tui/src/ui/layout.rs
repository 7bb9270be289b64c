//! Centralized layout constants.

/// Title plus subtitle line.
pub const HEADER_HEIGHT: u16 = 3;

/// Hotkey hints.
pub const FOOTER_HEIGHT: u16 = 1;

/// Global status bar.
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Left padding applied to header, footer, and content.
pub const CONTENT_PADDING_H: u16 = 2;

/// Placeholder rows shown while a table's first fetch is outstanding.
pub const SKELETON_ROWS: usize = 5;
