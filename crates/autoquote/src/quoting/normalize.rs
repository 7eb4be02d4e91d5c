//! Field normalizers applied before any identity comparison. All four are
//! total and idempotent; absent input normalizes to the empty string, which
//! never matches anything.

pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Digits only; formatting, country-code punctuation, and whitespace are all
/// stripped.
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Trimmed and truncated to the 5-digit prefix (ZIP+4 input compares by its
/// leading ZIP5).
pub fn normalize_zip(value: &str) -> String {
    value.trim().chars().take(5).collect()
}

pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}
