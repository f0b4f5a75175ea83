//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client core.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Validate phone number format (digits plus common separators)
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 10
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
}

/// Validate URL format
pub fn is_valid_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => parsed.scheme() == "http" || parsed.scheme() == "https",
        Err(_) => false,
    }
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a calendar date for display
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
