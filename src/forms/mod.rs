//! Form definitions backing the staffing routes.
//!
//! Each form derives [`validator::Validate`] for the shape checks and converts
//! into a payload of domain types through `TryFrom`, which is where the domain
//! invariants are enforced.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidationErrors;

pub mod allocation;
pub mod client;
pub mod project;
pub mod resource;

/// Field name to messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl FormError {
    pub fn field(field: &'static str, err: impl Display) -> Self {
        FormError::InvalidField {
            field,
            message: err.to_string(),
        }
    }

    /// Messages grouped by the form field they belong to.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .map(|(field, errors)| {
                    let messages = errors
                        .iter()
                        .map(|err| {
                            err.message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| err.code.to_string())
                        })
                        .collect();
                    (field.to_string(), messages)
                })
                .collect(),
            FormError::InvalidField { field, message } => {
                BTreeMap::from([(field.to_string(), vec![message.clone()])])
            }
        }
    }
}

/// Parses an `<input type="date">` value.
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|err| FormError::field(field, err))
}

/// Like [`parse_date`] but an empty value means "no date".
pub(crate) fn parse_optional_date(
    field: &'static str,
    value: &str,
) -> Result<Option<NaiveDate>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(field, value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_from_html_inputs() {
        assert_eq!(
            parse_date("start_date", " 2025-03-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("start_date", "01.03.2025").is_err());
        assert_eq!(parse_optional_date("end_date", "").unwrap(), None);
    }

    #[test]
    fn invalid_field_is_reported_under_its_name() {
        let err = FormError::field("email", "invalid email address");
        assert_eq!(
            err.field_errors(),
            BTreeMap::from([("email".to_string(), vec!["invalid email address".to_string()])])
        );
    }
}
