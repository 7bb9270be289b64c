use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::{App, View};

pub(crate) fn render(f: &mut Frame, app: &mut App) {
    // Fill entire frame with app background
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);

    let (title, subtitle) = match app.view {
        View::Login => ("Courier", "Sign in to continue"),
        View::Notifications => ("Notifications", "View and manage your notifications"),
        View::Items => ("Items", "Create and manage your items"),
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{padding}{title}"),
            Style::default()
                .fg(ui::theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{padding}{subtitle}"),
            Style::default().fg(ui::theme::TEXT_MUTED),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    // Content area gets the same horizontal padding as the chrome
    let content = chunks[1].inner(ratatui::layout::Margin {
        horizontal: layout::CONTENT_PADDING_H,
        vertical: 0,
    });
    match app.view {
        View::Login => ui::views::render_login(f, app, content),
        View::Notifications => ui::views::render_notifications(f, app, content),
        View::Items => ui::views::render_items(f, app, content),
    }

    // Footer - quit warning takes priority over the per-view hints
    let (footer_text, footer_style) = if app.pending_quit {
        (
            "\u{26A0} Press Ctrl+C again to quit".to_string(),
            Style::default().fg(ui::theme::ACCENT_ERROR),
        )
    } else {
        let text = match app.view {
            View::Login => "Enter submit \u{b7} Ctrl+C quit".to_string(),
            View::Notifications => {
                "\u{2191}\u{2193} nav \u{b7} Enter actions \u{b7} R mark all read \u{b7} r refresh \u{b7} i items \u{b7} q quit"
                    .to_string()
            }
            View::Items => {
                "\u{2191}\u{2193} nav \u{b7} Enter actions \u{b7} r refresh \u{b7} n notifications \u{b7} q quit"
                    .to_string()
            }
        };
        (text, Style::default().fg(ui::theme::TEXT_MUTED))
    };
    let footer = Paragraph::new(format!("{padding}{footer_text}")).style(footer_style);
    f.render_widget(footer, chunks[2]);

    render_statusbar(f, chunks[3], app.current_status(), app.unread_count());

    // Row action menu overlays the table it belongs to
    if let Some(menu) = app.row_menu.clone() {
        ui::views::render_row_menu(f, app, content, &menu);
    }
}
