//! Display formatting for carrier date/time strings.
//!
//! Anything that does not look like the expected digit layout is shown
//! as-is rather than guessed at.

/// `DDMMYYYY` → `DD/MM/YYYY`
pub fn format_date(raw: &str) -> String {
    if raw.len() != 8 || !raw.is_ascii() {
        return raw.to_string();
    }
    format!("{}/{}/{}", &raw[0..2], &raw[2..4], &raw[4..8])
}

/// `HHMM` → `HH:MM`; a three-digit `HMM` is zero-padded first.
///
/// The old tracking page sliced `"930"` into `"93:0"`; this shows `"09:30"`.
pub fn format_time(raw: &str) -> String {
    if raw.len() < 3 || !raw.is_ascii() {
        return raw.to_string();
    }
    let padded = format!("{:0>4}", raw);
    format!("{}:{}", &padded[0..2], &padded[2..4])
}

/// Carrier remarks worth showing. Blank and the `0.00` placeholder are hidden.
pub fn visible_remarks(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || raw == "0.00" {
        None
    } else {
        Some(raw)
    }
}

/// Non-empty or nothing.
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}
