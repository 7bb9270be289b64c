//! State-changing remote operations and their cache fallout.
//!
//! Mutations run as spawned tasks and report completion over an mpsc
//! channel drained by the event loop. No optimistic update happens: rows
//! reflect confirmed cache state only, and a successful mutation
//! invalidates the affected query keys exactly once each.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use courier_core::api::{ApiClient, ApiError};
use courier_core::cache::QueryKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    MarkAsRead,
    MarkAllRead,
    DeleteNotification,
    DeleteItem,
}

impl MutationKind {
    pub fn describe(&self) -> &'static str {
        match self {
            MutationKind::MarkAsRead => "mark notification as read",
            MutationKind::MarkAllRead => "mark all notifications as read",
            MutationKind::DeleteNotification => "delete notification",
            MutationKind::DeleteItem => "delete item",
        }
    }
}

/// A completed mutation, delivered back to the UI thread.
#[derive(Debug)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub id: Option<Uuid>,
    pub result: Result<(), ApiError>,
}

/// Cache keys a successful mutation of this kind invalidates.
///
/// Anything touching a notification's read-state or existence affects both
/// the list and the unread-count badge.
pub fn invalidation_targets(kind: MutationKind) -> &'static [QueryKey] {
    match kind {
        MutationKind::MarkAsRead | MutationKind::MarkAllRead | MutationKind::DeleteNotification => {
            &[QueryKey::Notifications, QueryKey::NotificationsUnreadCount]
        }
        MutationKind::DeleteItem => &[QueryKey::Items],
    }
}

/// Run the mutation on the runtime; the outcome lands on `tx`.
pub fn spawn_mutation(
    client: Arc<ApiClient>,
    kind: MutationKind,
    id: Option<Uuid>,
    tx: UnboundedSender<MutationOutcome>,
) {
    tokio::spawn(async move {
        let result = match (kind, id) {
            (MutationKind::MarkAsRead, Some(id)) => client.mark_read(id).await.map(|_| ()),
            (MutationKind::MarkAllRead, _) => client.mark_all_read().await.map(|_| ()),
            (MutationKind::DeleteNotification, Some(id)) => {
                client.delete_notification(id).await.map(|_| ())
            }
            (MutationKind::DeleteItem, Some(id)) => client.delete_item(id).await.map(|_| ()),
            // Row mutations always carry an id; this arm only exists to
            // keep the match total.
            (_, None) => Err(ApiError::Transport("mutation missing target id".into())),
        };
        // The receiver may be gone during shutdown.
        let _ = tx.send(MutationOutcome { kind, id, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_mutations_invalidate_list_and_badge() {
        for kind in [
            MutationKind::MarkAsRead,
            MutationKind::MarkAllRead,
            MutationKind::DeleteNotification,
        ] {
            assert_eq!(
                invalidation_targets(kind),
                &[QueryKey::Notifications, QueryKey::NotificationsUnreadCount]
            );
        }
    }

    #[test]
    fn item_deletion_invalidates_items_only() {
        assert_eq!(
            invalidation_targets(MutationKind::DeleteItem),
            &[QueryKey::Items]
        );
    }
}
