pub mod item;
pub mod notification;

pub use item::{Item, ItemsPage};
pub use notification::{Notification, NotificationsPage, UnreadCount};

use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}
