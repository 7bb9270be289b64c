// Global status bar at the very bottom of the app
// Transient status message on the left, bell badge on the right

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::format::{truncate_with_ellipsis, unread_badge};
use crate::ui::status::{StatusLevel, StatusMessage};
use crate::ui::theme;

/// Width reserved for the bell column ("🔔 99+" plus padding).
const BELL_COLUMN_WIDTH: u16 = 10;

/// Render the status bar: transient message left, unread bell right.
///
/// The bell renders nothing beside the icon at zero unread; otherwise the
/// capped badge text. Pressing `n` jumps to the notifications table (the
/// hint lives in the footer).
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    status: Option<&StatusMessage>,
    unread_count: i64,
) {
    let chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(BELL_COLUMN_WIDTH),
    ])
    .split(area);

    let message_paragraph = if let Some(status) = status {
        let (icon, color) = match status.level {
            StatusLevel::Info => ("\u{2139}", theme::ACCENT_PRIMARY), // ℹ
            StatusLevel::Success => ("\u{2713}", theme::ACCENT_SUCCESS), // ✓
            StatusLevel::Warning => ("\u{26A0}", theme::ACCENT_WARNING), // ⚠
        };
        let available = (chunks[0].width as usize).saturating_sub(4);
        let text = truncate_with_ellipsis(&status.text, available);
        let spans = vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(text, Style::default().fg(color)),
        ];
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_STATUSBAR))
    } else {
        Paragraph::new("").style(Style::default().bg(theme::BG_STATUSBAR))
    };
    f.render_widget(message_paragraph, chunks[0]);

    let bell = match unread_badge(unread_count) {
        Some(badge) => Line::from(vec![
            Span::styled("\u{1F514} ", Style::default().fg(theme::TEXT_MUTED)), // 🔔
            Span::styled(badge, Style::default().fg(theme::ACCENT_ERROR)),
            Span::raw(" "),
        ]),
        None => Line::from(Span::styled(
            "\u{1F514} ",
            Style::default().fg(theme::TEXT_DIM),
        )),
    };
    let bell_paragraph = Paragraph::new(bell)
        .right_aligned()
        .style(Style::default().bg(theme::BG_STATUSBAR));
    f.render_widget(bell_paragraph, chunks[1]);
}
