//! Notifications table: loading, error, and populated/empty renderings
//! are mutually exclusive per frame.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Row, Table},
    Frame,
};

use courier_core::cache::{QueryKey, QueryState};
use courier_core::models::{Notification, NotificationsPage};

use crate::ui::format::{format_date, truncate_with_ellipsis};
use crate::ui::theme;
use crate::ui::App;

use super::{render_empty_state, render_query_error, skeleton};

const MESSAGE_COLUMN_MAX: usize = 60;

pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    match app.query_state(QueryKey::Notifications) {
        QueryState::Loading => skeleton::render_notifications_skeleton(f, area),
        QueryState::Error(err) => {
            render_query_error(f, area, "Failed to load notifications", &err)
        }
        QueryState::Success(data) => match data.as_notifications() {
            Some(page) if page.data.is_empty() => render_empty_state(
                f,
                area,
                "No notifications yet",
                "You'll see notifications here when you receive them",
            ),
            Some(page) => render_table(f, app, area, page),
            // The key/payload pairing is fixed in the fetcher.
            None => {}
        },
    }
}

fn render_table(f: &mut Frame, app: &App, area: Rect, page: &NotificationsPage) {
    let cursor = app.cursor();
    let rows: Vec<Row> = page
        .data
        .iter()
        .enumerate()
        .map(|(i, notification)| {
            let row = notification_row(notification, app.is_mutation_pending(notification.id));
            if i == cursor {
                row.style(Style::default().bg(theme::BG_SELECTED))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(
        ["Message", "Type", "Status", "Date", ""]
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(theme::TEXT_MUTED)))
            .collect::<Vec<_>>(),
    )
    .bottom_margin(1);

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
    .header(header);
    f.render_widget(table, area);
}

fn notification_row(notification: &Notification, mutation_pending: bool) -> Row<'static> {
    let message_style = if notification.is_read {
        Style::default().fg(theme::TEXT_PRIMARY)
    } else {
        Style::default()
            .fg(theme::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    };
    let mut message_spans = vec![Span::styled(
        truncate_with_ellipsis(&notification.message, MESSAGE_COLUMN_MAX),
        message_style,
    )];
    if !notification.is_read {
        message_spans.push(Span::styled(
            " \u{25CF}", // ● unread indicator
            Style::default().fg(theme::ACCENT_PRIMARY),
        ));
    }

    let (status_dot, status_text, status_style) = if notification.is_read {
        ("\u{25CF} ", "Read", Style::default().fg(theme::TEXT_MUTED))
    } else {
        (
            "\u{25CF} ",
            "Unread",
            Style::default().fg(theme::TEXT_PRIMARY),
        )
    };
    let dot_color = if notification.is_read {
        theme::TEXT_DIM
    } else {
        theme::ACCENT_PRIMARY
    };

    let actions_marker = if mutation_pending {
        Span::styled("\u{22EF}", Style::default().fg(theme::TEXT_DIM)) // ⋯ disabled
    } else {
        Span::styled("\u{22EF}", Style::default().fg(theme::TEXT_MUTED))
    };

    Row::new(vec![
        Cell::from(Line::from(message_spans)),
        Cell::from(Span::styled(
            notification.kind.clone(),
            Style::default().fg(theme::kind_color(&notification.kind)),
        )),
        Cell::from(Line::from(vec![
            Span::styled(status_dot, Style::default().fg(dot_color)),
            Span::styled(status_text, status_style),
        ])),
        Cell::from(Span::styled(
            format_date(notification.created_at.as_ref()),
            Style::default().fg(theme::TEXT_MUTED),
        )),
        Cell::from(Line::from(actions_marker)),
    ])
}
