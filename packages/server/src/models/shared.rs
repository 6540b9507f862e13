use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate an email address and return it trimmed.
///
/// Syntax only: one `@`, a non-empty local part, and a dotted domain with no
/// empty labels. Deliverability is not checked.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    let invalid = || AppError::Validation(format!("'{email}' is not a valid email address"));

    if email.is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if email.chars().count() > 255 {
        return Err(AppError::Validation(
            "Email must be at most 255 characters".into(),
        ));
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    if labels
        .iter()
        .any(|l| l.starts_with('-') || l.ends_with('-'))
    {
        return Err(invalid());
    }

    Ok(email.to_string())
}

/// Longest URL accepted, in bytes. Keeps `unique_user_url` under the btree
/// row limit.
pub const MAX_URL_LEN: usize = 2048;

/// Validate an absolute http(s) URL and return it trimmed, otherwise unchanged.
pub fn validate_url(url: &str) -> Result<String, AppError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("URL is required".into()));
    }
    if url.len() > MAX_URL_LEN {
        return Err(AppError::Validation(format!(
            "URL must be at most {MAX_URL_LEN} bytes"
        )));
    }
    if url.chars().any(char::is_control) {
        return Err(AppError::Validation(
            "URL must not contain control characters".into(),
        ));
    }

    let parsed =
        Url::parse(url).map_err(|e| AppError::Validation(format!("Invalid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(
            "URL must use the http or https scheme".into(),
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::Validation("URL must include a host".into()));
    }

    Ok(url.to_string())
}

/// Reject text PostgreSQL cannot store. `field` names the offending input.
pub fn validate_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) if v.contains('\0') => Err(AppError::Validation(format!(
            "{field} must not contain NUL characters"
        ))),
        _ => Ok(()),
    }
}
