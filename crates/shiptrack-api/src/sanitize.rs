//! Tracking number sanitization and log masking.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::ApiError;

pub const MIN_LEN: usize = 5;
pub const MAX_LEN: usize = 20;

pub const MSG_INVALID_FORMAT: &str = "Invalid tracking number format";
pub const MSG_INVALID_LENGTH: &str = "Tracking number must be between 5-20 characters";

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-zA-Z0-9]").unwrap();
}

/// Strip everything but ASCII letters and digits, then enforce 5–20 chars.
pub fn sanitize_tracking_number(raw: &str) -> Result<String, ApiError> {
    let cleaned = NON_ALNUM.replace_all(raw.trim(), "").into_owned();
    if cleaned.len() < MIN_LEN || cleaned.len() > MAX_LEN {
        return Err(ApiError::InvalidTrackingNumber(MSG_INVALID_LENGTH.to_string()));
    }
    Ok(cleaned)
}

/// Pull `trackingNumber` out of a request body and sanitize it.
pub fn tracking_number_from_body(body: &Value) -> Result<String, ApiError> {
    match body.get("trackingNumber") {
        Some(Value::String(raw)) if !raw.is_empty() => sanitize_tracking_number(raw),
        _ => Err(ApiError::InvalidTrackingNumber(MSG_INVALID_FORMAT.to_string())),
    }
}

/// First three characters and `***`, for logs.
pub fn mask(tracking_number: &str) -> String {
    let prefix: String = tracking_number.chars().take(3).collect();
    format!("{}***", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_non_alphanumeric() {
        assert_eq!(sanitize_tracking_number("  D7001-2345 ").unwrap(), "D70012345");
        assert_eq!(sanitize_tracking_number("#GG1042").unwrap(), "GG1042");
        assert_eq!(sanitize_tracking_number("ab<c>de'; --").unwrap(), "abcde");
    }

    #[test]
    fn test_length_bounds() {
        assert!(sanitize_tracking_number("abcde").is_ok());
        assert!(sanitize_tracking_number(&"9".repeat(20)).is_ok());
        let too_long = "9".repeat(21);
        for bad in ["abcd", "a-b-c-d", too_long.as_str(), "", "ééééééé"] {
            let err = sanitize_tracking_number(bad).unwrap_err();
            assert_eq!(err.public_message(), MSG_INVALID_LENGTH, "for {:?}", bad);
        }
    }

    #[test]
    fn test_body_shapes() {
        assert_eq!(
            tracking_number_from_body(&json!({ "trackingNumber": "D70012345" })).unwrap(),
            "D70012345"
        );
        for body in [
            json!({}),
            json!({ "trackingNumber": 70012345 }),
            json!({ "trackingNumber": null }),
            json!({ "trackingNumber": "" }),
            json!("D70012345"),
        ] {
            let err = tracking_number_from_body(&body).unwrap_err();
            assert_eq!(err.public_message(), MSG_INVALID_FORMAT, "for {}", body);
        }
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("D70012345"), "D70***");
        assert_eq!(mask("ab"), "ab***");
    }
}
