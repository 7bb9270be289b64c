pub mod items;
pub mod login;
pub mod notifications;
pub mod row_menu;
pub mod skeleton;

pub use items::render_items;
pub use login::render_login;
pub use notifications::render_notifications;
pub use row_menu::render_row_menu;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use courier_core::api::ApiError;

use crate::ui::theme;

/// Centered empty-state block: never a header-only table shell.
pub(crate) fn render_empty_state(f: &mut Frame, area: Rect, heading: &str, subline: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .split(area);

    let heading_line = Paragraph::new(Line::styled(
        heading.to_string(),
        Style::default()
            .fg(theme::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading_line, chunks[1]);

    let subline_area = Rect::new(chunks[1].x, chunks[1].y + 1, chunks[1].width, 1);
    let subline_paragraph = Paragraph::new(Line::styled(
        subline.to_string(),
        Style::default().fg(theme::TEXT_MUTED),
    ))
    .alignment(Alignment::Center);
    f.render_widget(subline_paragraph, subline_area);
}

/// Centered inline error block for non-auth query failures.
///
/// Auth failures never reach here; the event loop tears the session down
/// before the error would render.
pub(crate) fn render_query_error(f: &mut Frame, area: Rect, heading: &str, error: &ApiError) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .split(area);

    let heading_line = Paragraph::new(Line::styled(
        heading.to_string(),
        Style::default()
            .fg(theme::ACCENT_ERROR)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading_line, chunks[1]);

    let detail_area = Rect::new(chunks[1].x, chunks[1].y + 1, chunks[1].width, 1);
    let detail = Paragraph::new(Line::styled(
        error.to_string(),
        Style::default().fg(theme::TEXT_MUTED),
    ))
    .alignment(Alignment::Center);
    f.render_widget(detail, detail_area);
}
