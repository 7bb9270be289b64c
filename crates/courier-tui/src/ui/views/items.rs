//! Items table, same three-state contract as the notifications table.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use courier_core::cache::{QueryKey, QueryState};
use courier_core::models::ItemsPage;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::theme;
use crate::ui::App;

use super::{render_empty_state, render_query_error, skeleton};

const TITLE_COLUMN_MAX: usize = 26;
const DESCRIPTION_COLUMN_MAX: usize = 60;

pub fn render_items(f: &mut Frame, app: &App, area: Rect) {
    match app.query_state(QueryKey::Items) {
        QueryState::Loading => skeleton::render_items_skeleton(f, area),
        QueryState::Error(err) => render_query_error(f, area, "Failed to load items", &err),
        QueryState::Success(data) => match data.as_items() {
            Some(page) if page.data.is_empty() => render_empty_state(
                f,
                area,
                "You don't have any items yet",
                "Add a new item to get started",
            ),
            Some(page) => render_table(f, app, area, page),
            None => {}
        },
    }
}

fn render_table(f: &mut Frame, app: &App, area: Rect, page: &ItemsPage) {
    let cursor = app.cursor();
    let rows: Vec<Row> = page
        .data
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let description = item.description.as_deref().unwrap_or("-");
            let actions_color = if app.is_mutation_pending(item.id) {
                theme::TEXT_DIM
            } else {
                theme::TEXT_MUTED
            };
            let row = Row::new(vec![
                Cell::from(Span::styled(
                    truncate_with_ellipsis(&item.title, TITLE_COLUMN_MAX),
                    Style::default().fg(theme::TEXT_PRIMARY),
                )),
                Cell::from(Span::styled(
                    truncate_with_ellipsis(description, DESCRIPTION_COLUMN_MAX),
                    Style::default().fg(theme::TEXT_MUTED),
                )),
                Cell::from(Span::styled(
                    "\u{22EF}", // ⋯
                    Style::default().fg(actions_color),
                )),
            ]);
            if i == cursor {
                row.style(Style::default().bg(theme::BG_SELECTED))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(
        ["Title", "Description", ""]
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(theme::TEXT_MUTED)))
            .collect::<Vec<_>>(),
    )
    .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Min(24),
            Constraint::Length(4),
        ],
    )
    .header(header);
    f.render_widget(table, area);
}
