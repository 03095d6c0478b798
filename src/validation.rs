//! Field rules run against submitted forms before anything is written.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::util::non_empty;

/// Why a single submitted field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Field cannot be longer than {max} characters.")]
    TooLong { max: usize },
    #[error("Invalid URL.")]
    InvalidUrl,
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Not a valid choice")]
    InvalidChoice,
    #[error("Not a valid integer value.")]
    InvalidInteger,
    #[error("Please enter a valid date and time")]
    InvalidDateTime,
    #[error("This {0} does not exist")]
    DoesNotExist(&'static str),
}

/// Per-field messages for a rejected submission, keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.0.entry(field).or_default().push(error.to_string());
    }

    /// Records the outcome of a rule, keeping the value if it passed.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.for_field(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A required text field, trimmed and bounded.
pub fn required(value: &str, max: usize) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    max_length(value, max).map(ToOwned::to_owned)
}

pub fn max_length(value: &str, max: usize) -> Result<&str, FieldError> {
    if value.chars().count() > max {
        Err(FieldError::TooLong { max })
    } else {
        Ok(value)
    }
}

/// A phone number made only of decimal digits.
pub fn phone(value: &str) -> Result<String, FieldError> {
    let value = required(value, 120)?;
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(FieldError::InvalidPhone)
    }
}

/// An optional link; blank input is accepted as no link.
pub fn optional_url(value: &str, max: usize) -> Result<Option<String>, FieldError> {
    let value = match non_empty(value) {
        Some(value) => value,
        None => return Ok(None),
    };

    max_length(&value, max)?;
    if is_url(&value) {
        Ok(Some(value))
    } else {
        Err(FieldError::InvalidUrl)
    }
}

pub fn optional_text(value: &str, max: usize) -> Result<Option<String>, FieldError> {
    match non_empty(value) {
        Some(value) => {
            max_length(&value, max)?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// A single selection that must be one of `choices`.
pub fn choice(value: &str, choices: &[&'static str]) -> Result<&'static str, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }

    choices
        .iter()
        .find(|choice| **choice == value)
        .copied()
        .ok_or(FieldError::InvalidChoice)
}

/// A non-empty multiple selection where every entry is one of `choices`.
pub fn choices(values: &[String], choices: &[&'static str]) -> Result<Vec<String>, FieldError> {
    if values.is_empty() {
        return Err(FieldError::Required);
    }

    values
        .iter()
        .map(|value| choice(value, choices).map(ToOwned::to_owned))
        .collect()
}

pub fn integer(value: &str) -> Result<i64, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    value.parse().map_err(|_| FieldError::InvalidInteger)
}

fn is_url(value: &str) -> bool {
    static URL: OnceLock<Regex> = OnceLock::new();
    static DOMAIN: OnceLock<Regex> = OnceLock::new();

    let url = URL.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?P<host>[^/?:#\s]+)(?::[0-9]+)?(?:[/?#][^\s]*)?$")
            .expect("URL pattern is valid")
    });
    let domain = DOMAIN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
            .expect("domain pattern is valid")
    });

    let Some(captures) = url.captures(value) else {
        return false;
    };
    let host = &captures["host"];

    host == "localhost" || host.parse::<std::net::Ipv4Addr>().is_ok() || domain.is_match(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_must_be_all_digits() {
        assert_eq!(phone("3235551234"), Ok("3235551234".to_owned()));
        assert_eq!(phone("323-555-1234"), Err(FieldError::InvalidPhone));
        assert_eq!(phone("32355512a4"), Err(FieldError::InvalidPhone));
        assert_eq!(phone("+13235551234"), Err(FieldError::InvalidPhone));
        assert_eq!(phone("٣٢٣"), Err(FieldError::InvalidPhone));
        assert_eq!(phone(""), Err(FieldError::Required));
    }

    #[test]
    fn required_fields_are_trimmed_and_bounded() {
        assert_eq!(required("  The Musical Hop ", 120), Ok("The Musical Hop".to_owned()));
        assert_eq!(required(" \t ", 120), Err(FieldError::Required));
        assert_eq!(
            required(&"a".repeat(121), 120),
            Err(FieldError::TooLong { max: 120 })
        );
        assert!(required(&"a".repeat(120), 120).is_ok());
    }

    #[test]
    fn urls_need_a_scheme_and_a_host() {
        assert!(is_url("https://www.themusicalhop.com"));
        assert!(is_url("https://www.facebook.com/TheMusicalHop"));
        assert!(is_url("http://localhost:5000/venues?x=1"));
        assert!(is_url("http://127.0.0.1/image.png"));
        assert!(!is_url("www.themusicalhop.com"));
        assert!(!is_url("https://"));
        assert!(!is_url("https://nodot"));
        assert!(!is_url("https://exa mple.com"));
    }

    #[test]
    fn blank_links_are_optional() {
        assert_eq!(optional_url("  ", 120), Ok(None));
        assert_eq!(optional_url("not a url", 120), Err(FieldError::InvalidUrl));
        assert_eq!(
            optional_url(&format!("https://example.com/{}", "a".repeat(120)), 120),
            Err(FieldError::TooLong { max: 120 })
        );
    }

    #[test]
    fn selections_come_from_the_choice_set() {
        let set = ["Jazz", "Blues"];
        assert_eq!(choice("Jazz", &set), Ok("Jazz"));
        assert_eq!(choice("jazz", &set), Err(FieldError::InvalidChoice));
        assert_eq!(choice("", &set), Err(FieldError::Required));
        assert_eq!(choices(&[], &set), Err(FieldError::Required));
        assert_eq!(
            choices(&["Jazz".to_owned(), "Polka".to_owned()], &set),
            Err(FieldError::InvalidChoice)
        );
    }

    #[test]
    fn integers_parse_or_explain() {
        assert_eq!(integer(" 4 "), Ok(4));
        assert_eq!(integer(""), Err(FieldError::Required));
        assert_eq!(integer("four"), Err(FieldError::InvalidInteger));
    }

    #[test]
    fn errors_collect_per_field() {
        let mut errors = FormErrors::default();
        assert_eq!(errors.check("name", Ok::<_, FieldError>(1)), Some(1));
        assert!(errors.is_empty());

        errors.check::<()>("phone", Err(FieldError::InvalidPhone));
        errors.add("artist_id", FieldError::DoesNotExist("artist"));

        assert_eq!(errors.for_field("phone"), ["Invalid phone number"]);
        assert_eq!(errors.for_field("artist_id"), ["This artist does not exist"]);
        assert!(errors.for_field("name").is_empty());
        assert!(errors.has("phone"));
    }
}
