use std::{ops::RangeInclusive, sync::LazyLock};

use regex::Regex;
use taz_models::contact::{ContactForm, ContactFormField, FieldError, ValidationErrors};

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const NAME_LENGTH: RangeInclusive<usize> = 3..=100;
pub const MESSAGE_LENGTH: RangeInclusive<usize> = 10..=5000;
pub const PHONE_DIGITS: RangeInclusive<usize> = 10..=11;

/// Validate every field of the contact form.
///
/// Lengths are measured in characters after trimming.
pub fn validate(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(error) = check_text(&form.name, NAME_LENGTH) {
        errors.insert(ContactFormField::Name, error);
    }

    if form.email.trim().is_empty() {
        errors.insert(ContactFormField::Email, FieldError::Required);
    } else if !is_valid_email(&form.email) {
        errors.insert(ContactFormField::Email, FieldError::InvalidEmail);
    }

    if form.has_phone() && !is_valid_phone(&form.phone) {
        errors.insert(ContactFormField::Phone, FieldError::InvalidPhone);
    }

    if let Some(error) = check_text(&form.message, MESSAGE_LENGTH) {
        errors.insert(ContactFormField::Message, error);
    }

    errors
}

fn check_text(value: &str, length: RangeInclusive<usize>) -> Option<FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Some(FieldError::Required);
    }

    let len = value.chars().count();
    if len < *length.start() {
        Some(FieldError::TooShort {
            min: *length.start(),
        })
    } else if len > *length.end() {
        Some(FieldError::TooLong { max: *length.end() })
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whether `phone` contains 10 or 11 digits, ignoring any other characters.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_DIGITS.contains(&digits(phone).len())
}

/// Format a brazilian phone number as `(DD) DDDDD-DDDD` or `(DD) DDDD-DDDD`.
///
/// Returns the input unchanged if it does not contain 10 or 11 digits.
pub fn format_phone(phone: &str) -> String {
    let digits = digits(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.into(),
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
