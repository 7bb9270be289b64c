// Centralized theme system for consistent UI styling
// All colors are defined here - edit this file to change the look

use ratatui::style::Color;

use courier_core::models::notification::{KIND_LIKE, KIND_MENTION};

/// App background - pure black for contrast
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected row background - subtle highlight
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Status bar background - very dark, almost black
pub const BG_STATUSBAR: Color = Color::Rgb(12, 12, 12);

/// Skeleton placeholder fill
pub const BG_SKELETON: Color = Color::Rgb(38, 38, 38);

/// Primary text - off-white for readability
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for hints, placeholders, disabled commands
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Primary accent - muted blue (interactive elements, unread indicator)
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

/// Success/positive - muted green
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Warning - muted amber/orange
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

/// Error/destructive - muted red
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Special - muted purple
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

/// Badge color for a notification category. Unrecognized categories get
/// the muted default.
pub fn kind_color(kind: &str) -> Color {
    match kind {
        KIND_MENTION => ACCENT_PRIMARY,
        KIND_LIKE => ACCENT_SPECIAL,
        _ => TEXT_MUTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_fall_back_to_muted() {
        assert_eq!(kind_color("mention"), ACCENT_PRIMARY);
        assert_eq!(kind_color("like"), ACCENT_SPECIAL);
        assert_eq!(kind_color("follow"), TEXT_MUTED);
    }
}
