use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedReceiver;

use courier_core::cache::FetchOutcome;
use courier_core::secure_storage::{SecureKey, SecureStorage};

use crate::input::handle_key;
use crate::mutations::{invalidation_targets, MutationKind, MutationOutcome};
use crate::render::render;
use crate::ui::{App, Tui};

/// Drives cache interval refetches and transient status expiry.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    fetch_rx: &mut UnboundedReceiver<FetchOutcome>,
    mutation_rx: &mut UnboundedReceiver<MutationOutcome>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            // Terminal UI events
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        if app.pending_quit {
                            // Second Ctrl+C - quit immediately
                            app.quit();
                        } else {
                            // First Ctrl+C - set pending (footer shows warning)
                            app.pending_quit = true;
                        }
                    } else {
                        // Any other key clears pending quit state
                        app.pending_quit = false;
                        handle_key(app, key)?;
                    }
                }
            }

            // Completed read queries
            Some(outcome) = fetch_rx.recv() => {
                handle_fetch_outcome(app, outcome);
            }

            // Completed mutations
            Some(outcome) = mutation_rx.recv() => {
                handle_mutation_outcome(app, outcome);
            }

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }
    }
    Ok(())
}

/// Fold a completed read query into the cache, except for auth failures:
/// those never render inline. The stored credential is deleted and the
/// app returns to the login boundary.
fn handle_fetch_outcome(app: &mut App, outcome: FetchOutcome) {
    if matches!(outcome.result, Err(ref err) if err.is_auth()) {
        clear_session(app);
        return;
    }
    app.apply_fetch(outcome);
}

fn handle_mutation_outcome(app: &mut App, outcome: MutationOutcome) {
    app.finish_mutation(&outcome);
    match outcome.result {
        Ok(()) => {
            // The affected caches go stale exactly once per mutation; the
            // rows change only after the refetch confirms.
            for key in invalidation_targets(outcome.kind) {
                app.invalidate(*key);
            }
            if outcome.kind == MutationKind::MarkAllRead {
                app.set_success_status("All notifications marked as read");
            }
        }
        Err(err) if err.is_auth() => clear_session(app),
        Err(err) => {
            tracing::warn!(
                kind = outcome.kind.describe(),
                error = %err,
                "mutation failed"
            );
            app.set_warning_status(&format!("Failed to {}: {}", outcome.kind.describe(), err));
        }
    }
}

fn clear_session(app: &mut App) {
    if let Err(err) = SecureStorage::delete(SecureKey::AccessToken) {
        tracing::warn!(error = %err, "failed to delete stored access token");
    }
    app.force_login("Session expired - please log in again");
}
