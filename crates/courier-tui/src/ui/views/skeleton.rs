//! Fixed-shape placeholder tables shown while a view's first fetch is
//! outstanding. The skeleton mirrors the target table's columns so the
//! layout doesn't jump when data lands.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::ui::layout::SKELETON_ROWS;
use crate::ui::theme;

fn skeleton_cell(width: usize) -> Cell<'static> {
    Cell::from(" ".repeat(width)).style(Style::default().bg(theme::BG_SKELETON))
}

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(theme::TEXT_MUTED)))
            .collect::<Vec<_>>(),
    )
    .bottom_margin(1)
}

pub fn render_notifications_skeleton(f: &mut Frame, area: Rect) {
    let rows: Vec<Row> = (0..SKELETON_ROWS)
        .map(|_| {
            Row::new(vec![
                skeleton_cell(32),
                skeleton_cell(8),
                skeleton_cell(7),
                skeleton_cell(10),
                skeleton_cell(2),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(4),
        ],
    )
    .header(header(&["Message", "Type", "Status", "Date", ""]));
    f.render_widget(table, area);
}

pub fn render_items_skeleton(f: &mut Frame, area: Rect) {
    let rows: Vec<Row> = (0..SKELETON_ROWS)
        .map(|_| {
            Row::new(vec![
                skeleton_cell(20),
                skeleton_cell(36),
                skeleton_cell(2),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Min(24),
            Constraint::Length(4),
        ],
    )
    .header(header(&["Title", "Description", ""]));
    f.render_widget(table, area);
}
