//! Per-row action menu overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme;
use crate::ui::{App, RowAction, RowMenuState};

fn action_label(action: RowAction) -> &'static str {
    match action {
        RowAction::MarkAsRead => "\u{2713} Mark as read", // ✓
        RowAction::Delete => "\u{2717} Delete",           // ✗
    }
}

/// Render the open menu near the middle of the table area.
///
/// Entries for a row with an in-flight mutation render dimmed; the input
/// layer refuses to dispatch them.
pub fn render_row_menu(f: &mut Frame, app: &App, area: Rect, menu: &RowMenuState) {
    let width = 24u16.min(area.width);
    let height = (menu.actions.len() as u16 + 2).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .title(" Actions ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let disabled = app.is_mutation_pending(menu.target.id());
    let lines: Vec<Line> = menu
        .actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let selected = i == menu.selected;
            let color = if disabled {
                theme::TEXT_DIM
            } else if action.is_destructive() {
                theme::ACCENT_ERROR
            } else {
                theme::TEXT_PRIMARY
            };
            let mut style = Style::default().fg(color);
            if selected {
                style = style.bg(theme::BG_SELECTED).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(format!(" {} ", action_label(*action)), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
