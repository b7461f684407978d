//! Field Validators
//!
//! Pure normalize-or-reject functions, one per field kind. Each returns the
//! normalized value or a human-readable reason; the store surfaces the reason
//! verbatim inside a validation error.

use std::sync::OnceLock;

use chrono::{NaiveDateTime, Timelike};
use regex_lite::Regex;

/// Format accepted for flight dates
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Outcome of a single validator
pub type FieldResult = std::result::Result<String, String>;

/// Tunable validator behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Accept a single leading `+` in phone numbers
    pub allow_plus_phone: bool,

    /// Flight minutes must be a multiple of this (1 = any minute)
    pub minute_step: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            allow_plus_phone: false,
            minute_step: 1,
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn collapse_spaces(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn full_match(cell: &'static OnceLock<Regex>, pattern: &str, s: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).expect("validator pattern compiles"))
        .is_match(s)
}

fn ensure_len(s: &str, min: usize, max: usize, field: &str) -> std::result::Result<(), String> {
    let n = s.chars().count();
    if n < min || n > max {
        return Err(format!("{field} length must be {min}–{max} chars"));
    }
    Ok(())
}

// =============================================================================
// Client Fields
// =============================================================================

pub fn validate_name(raw: &str) -> FieldResult {
    static RE: OnceLock<Regex> = OnceLock::new();
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("Name is required".to_string());
    }
    if !full_match(&RE, r"^[A-Za-zÀ-ÖØ-öø-ÿ .'\-]+$", &s) {
        return Err("Name contains invalid characters".to_string());
    }
    ensure_len(&s, 1, 100, "Name")?;
    Ok(s)
}

pub fn validate_company_name(raw: &str) -> FieldResult {
    static RE: OnceLock<Regex> = OnceLock::new();
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("CompanyName is required".to_string());
    }
    if !full_match(&RE, r"^[A-Za-z0-9 &.,'\-]+$", &s) {
        return Err("CompanyName contains invalid characters".to_string());
    }
    ensure_len(&s, 2, 120, "CompanyName")?;
    Ok(s)
}

/// Strips visual separators (spaces, parentheses, dots, dashes, slashes)
/// before checking; 7–20 digits
pub fn validate_phone(raw: &str, allow_plus: bool) -> FieldResult {
    let s: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '(' | ')' | '.' | '-' | '/')))
        .collect();

    let digits = match s.strip_prefix('+') {
        Some(rest) if allow_plus => rest,
        _ => s.as_str(),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(if allow_plus {
            "Phone must be digits with optional leading '+', length 7–20".to_string()
        } else {
            "Phone must contain digits only".to_string()
        });
    }
    if !(7..=20).contains(&digits.len()) {
        return Err("Phone length must be 7–20 digits".to_string());
    }
    Ok(s)
}

pub fn validate_zip(raw: &str) -> FieldResult {
    static RE: OnceLock<Regex> = OnceLock::new();
    let s = raw.trim().to_uppercase();
    if s.is_empty() {
        return Err("Zip is required".to_string());
    }
    if !full_match(&RE, r"^[A-Z0-9 \-]{3,12}$", &s) {
        return Err("Zip must be 3–12 chars of A-Z, 0-9, space or '-'".to_string());
    }
    Ok(s)
}

pub fn validate_state(raw: &str) -> FieldResult {
    static RE: OnceLock<Regex> = OnceLock::new();
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("State is required".to_string());
    }
    if !full_match(&RE, r"^[A-Za-z0-9 .'\-]+$", &s) {
        return Err("State contains invalid characters".to_string());
    }
    ensure_len(&s, 1, 64, "State")?;
    Ok(s)
}

pub fn validate_address(raw: &str) -> FieldResult {
    static RE: OnceLock<Regex> = OnceLock::new();
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("Address is required".to_string());
    }
    if !full_match(&RE, r"^[A-Za-z0-9 ,./#'\-]+$", &s) {
        return Err("Address contains invalid characters".to_string());
    }
    ensure_len(&s, 1, 120, "Address")?;
    Ok(s)
}

pub fn validate_country(raw: &str) -> FieldResult {
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("Country is required".to_string());
    }
    ensure_len(&s, 1, 64, "Country")?;
    Ok(s)
}

/// Letters from any script are accepted so catalog names such as
/// "São Paulo" or "Košice" validate
pub fn validate_city(raw: &str) -> FieldResult {
    let s = collapse_spaces(raw);
    if s.is_empty() {
        return Err("City is required".to_string());
    }
    if !s
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '\'' | '-'))
    {
        return Err("City contains invalid characters".to_string());
    }
    ensure_len(&s, 1, 64, "City")?;
    Ok(s)
}

// =============================================================================
// Flight Fields
// =============================================================================

pub fn validate_datetime(raw: &str, minute_step: u32) -> FieldResult {
    let s = raw.trim();
    let dt = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|_| "Date must be 'YYYY-MM-DD HH:MM'".to_string())?;
    if minute_step > 1 && dt.minute() % minute_step != 0 {
        return Err(format!("Minutes must be in {minute_step}-minute steps"));
    }
    Ok(s.to_string())
}
