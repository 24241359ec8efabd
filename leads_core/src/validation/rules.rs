//! Field-level validation rules

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;
use validator::{ValidateEmail, ValidationError};

lazy_static! {
    // The validator crate accepts dotless domains; a lead needs a routable address.
    static ref EMAIL_DOMAIN_REGEX: Regex = Regex::new(
        r"@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$"
    ).unwrap();

    static ref DATE_REGEX: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn validate_min_length(text: &str, min: usize) -> Result<(), ValidationError> {
    if char_len(text) < min {
        return Err(ValidationError::new("too_short"));
    }
    Ok(())
}

pub fn validate_max_length(text: &str, max: usize) -> Result<(), ValidationError> {
    if char_len(text) > max {
        return Err(ValidationError::new("too_long"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email"));
    }

    if !email.validate_email() || !EMAIL_DOMAIN_REGEX.is_match(email) {
        return Err(ValidationError::new("email"));
    }

    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(url).map_err(|_| ValidationError::new("url"))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(ValidationError::new("url")),
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::new("url"));
    }

    Ok(())
}

/// Accepts calendar dates in the `YYYY-MM-DD` form produced by date inputs.
pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    if !DATE_REGEX.is_match(date) {
        return Err(ValidationError::new("date"));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date"))
}

pub fn validate_in_list(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(ValidationError::new("in_list"));
    }
    Ok(())
}
