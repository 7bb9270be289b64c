use std::fmt;

/// Stable identifier for a cached, fetchable resource.
///
/// Two requests with equal keys address the same cached entry; the token
/// is the key's canonical string form (used in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Notifications,
    NotificationsUnreadCount,
    Items,
}

impl QueryKey {
    pub fn token(&self) -> &'static str {
        match self {
            QueryKey::Notifications => "notifications",
            QueryKey::NotificationsUnreadCount => "notifications-unread-count",
            QueryKey::Items => "items",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_distinct() {
        assert_eq!(QueryKey::Notifications.token(), "notifications");
        assert_eq!(
            QueryKey::NotificationsUnreadCount.token(),
            "notifications-unread-count"
        );
        assert_eq!(QueryKey::Items.token(), "items");
    }
}
