use chrono::{DateTime, Local, Utc};

/// Bell badge text: nothing at zero, the literal digits through 99,
/// capped at "99+" beyond that.
pub fn unread_badge(count: i64) -> Option<String> {
    if count <= 0 {
        None
    } else if count > 99 {
        Some("99+".to_string())
    } else {
        Some(count.to_string())
    }
}

/// Local date for the Date column; the service may omit the timestamp.
pub fn format_date(created_at: Option<&DateTime<Utc>>) -> String {
    match created_at {
        Some(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Truncate string to a max length, adding an ellipsis when truncated.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    if max_len <= 3 {
        return ".".repeat(max_len);
    }

    let take = max_len - 3;
    let mut truncated: String = s.chars().take(take).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_hidden_at_zero() {
        assert_eq!(unread_badge(0), None);
        assert_eq!(unread_badge(-3), None);
    }

    #[test]
    fn badge_shows_literal_digits_up_to_99() {
        assert_eq!(unread_badge(1), Some("1".to_string()));
        assert_eq!(unread_badge(42), Some("42".to_string()));
        assert_eq!(unread_badge(99), Some("99".to_string()));
    }

    #[test]
    fn badge_caps_at_99_plus() {
        assert_eq!(unread_badge(100), Some("99+".to_string()));
        assert_eq!(unread_badge(12345), Some("99+".to_string()));
    }

    #[test]
    fn missing_date_renders_a_dash() {
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn present_date_renders_year_month_day() {
        let timestamp = "2025-06-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let rendered = format_date(Some(&timestamp));
        // Local offset shifts the day by at most one.
        assert_eq!(rendered.len(), 10);
        assert!(rendered.starts_with("2025-"));
    }

    #[test]
    fn truncation_keeps_short_strings_intact() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("a longer message", 10), "a longe...");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
    }
}
