//! Login boundary: the app lands here with no stored credential and
//! whenever the service answers a request with 401/403.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::App;

pub fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let title = Paragraph::new(Line::styled(
        "Courier - Sign in",
        Style::default()
            .fg(theme::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let prompt = Paragraph::new(Line::styled(
        "Paste your API access token and press Enter",
        Style::default().fg(theme::TEXT_MUTED),
    ))
    .alignment(Alignment::Center);
    f.render_widget(prompt, chunks[2]);

    // Token is a secret: render mask characters only.
    let masked = if app.input.is_empty() {
        Line::styled("(empty)", Style::default().fg(theme::TEXT_DIM))
    } else {
        Line::styled(
            "*".repeat(app.input.len()),
            Style::default().fg(theme::ACCENT_PRIMARY),
        )
    };
    let input = Paragraph::new(masked).alignment(Alignment::Center);
    f.render_widget(input, chunks[4]);
}
