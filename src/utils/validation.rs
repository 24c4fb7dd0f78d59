//! Centralized validation and helper functions.

/// Maximum number of prediction rows allowed in a single profile block
pub const MAX_PREDICTIONS: usize = 10_000_000;

/// Maximum number of signatures enumerated from a single container
pub const MAX_SIGNATURES: usize = 1_000_000;

/// Check if adding another prediction would exceed `max`.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_prediction_limit(count: usize, max: usize) -> Option<String> {
    if count >= max {
        Some(format!(
            "Too many predictions: adding another would exceed maximum of {max}"
        ))
    } else {
        None
    }
}

/// Check if adding another signature would exceed the maximum allowed.
#[must_use]
pub fn check_signature_limit(count: usize) -> Option<String> {
    if count >= MAX_SIGNATURES {
        Some(format!(
            "Too many signatures: adding another would exceed maximum of {MAX_SIGNATURES}"
        ))
    } else {
        None
    }
}

/// Whether a relative abundance lies in the expected `[0, 100]` range.
///
/// # Examples
///
/// ```
/// use taxprofile::utils::validation::is_valid_percentage;
///
/// assert!(is_valid_percentage(0.029528));
/// assert!(is_valid_percentage(100.0));
/// assert!(!is_valid_percentage(-1.0));
/// assert!(!is_valid_percentage(100.5));
/// ```
#[must_use]
pub fn is_valid_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Validate that a string is a valid MD5 checksum (32 hex characters).
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}
