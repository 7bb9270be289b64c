use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Known notification categories. The service treats the category as an
/// open-ended string; unrecognized values render with default styling.
pub const KIND_MENTION: &str = "mention";
pub const KIND_LIKE: &str = "like";

/// Read-only snapshot of a notification owned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of notifications plus the totals the list endpoint reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsPage {
    pub data: Vec<Notification>,
    pub count: i64,
    pub unread_count: i64,
}

/// Scalar unread total consumed by the bell badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_shape() {
        let json = r#"{
            "data": [
                {
                    "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
                    "message": "alice@example.com mentioned you",
                    "type": "mention",
                    "is_read": false,
                    "created_at": "2025-06-01T12:30:00Z"
                }
            ],
            "count": 1,
            "unread_count": 1
        }"#;
        let page: NotificationsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.unread_count, 1);
        let notification = &page.data[0];
        assert_eq!(notification.kind, KIND_MENTION);
        assert!(!notification.is_read);
        assert!(notification.created_at.is_some());
    }

    #[test]
    fn created_at_may_be_absent() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "message": "bob liked your item",
            "type": "like",
            "is_read": true
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, KIND_LIKE);
        assert!(notification.created_at.is_none());
    }

    #[test]
    fn deserializes_unread_count() {
        let count: UnreadCount = serde_json::from_str(r#"{"unread_count": 7}"#).unwrap();
        assert_eq!(count.unread_count, 7);
    }
}
