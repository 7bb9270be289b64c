use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use courier_core::secure_storage::{SecureKey, SecureStorage};

use crate::ui::{App, RowMenuState, View};

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.view {
        View::Login => handle_login_key(app, key),
        View::Notifications | View::Items => {
            if app.row_menu.is_some() {
                handle_menu_key(app, key);
            } else {
                handle_table_key(app, key);
            }
        }
    }
    Ok(())
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Plain and shifted characters only; chorded keys are not token
        // input.
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            app.input.push(c)
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.input.clear(),
        KeyCode::Enter => {
            let token = app.input.trim().to_string();
            if token.is_empty() {
                return;
            }
            if let Err(err) = SecureStorage::set(SecureKey::AccessToken, &token) {
                tracing::warn!(error = %err, "failed to store access token");
                app.set_warning_status("Could not store token in the system keyring");
            }
            app.connect(&token);
        }
        _ => {}
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Tab => {
            let next = match app.view {
                View::Notifications => View::Items,
                _ => View::Notifications,
            };
            app.open_view(next);
        }
        KeyCode::Char('n') | KeyCode::Char('1') => app.open_view(View::Notifications),
        KeyCode::Char('i') | KeyCode::Char('2') => app.open_view(View::Items),
        KeyCode::Enter | KeyCode::Char('m') => {
            if let Some(target) = app.selected_target() {
                app.row_menu = Some(RowMenuState::new(target));
            }
        }
        KeyCode::Char('r') => {
            if let Some(query_key) = app.view.query_key() {
                app.invalidate(query_key);
            }
        }
        KeyCode::Char('R') => {
            if app.view == View::Notifications && app.begin_mark_all_read() {
                app.set_status("Marking all notifications as read...");
            }
        }
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.row_menu = None,
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(menu) = app.row_menu.as_mut() {
                menu.select_next();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(menu) = app.row_menu.as_mut() {
                menu.select_prev();
            }
        }
        KeyCode::Enter => {
            let Some(menu) = app.row_menu.take() else {
                return;
            };
            if let Some(action) = menu.selected_action() {
                // Refused silently when this row already has a mutation in
                // flight; the menu marker renders dimmed in that case.
                app.begin_row_mutation(&menu.target, action);
            }
        }
        _ => {}
    }
}
