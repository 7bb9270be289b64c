//! Transient status-bar messages.

use std::time::{Duration, Instant};

/// How long a status line stays visible.
const STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    expires_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: Instant::now() + STATUS_TTL,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_the_ttl() {
        let message = StatusMessage::new("saved", StatusLevel::Success);
        let now = Instant::now();
        assert!(!message.expired(now));
        assert!(message.expired(now + STATUS_TTL + Duration::from_secs(1)));
    }
}
