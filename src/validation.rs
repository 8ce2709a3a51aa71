//! Field validation
//!
//! Rules are small pure functions that return a [`RuleResult`]. A failing rule
//! carries a message template where `:field` stands for the field's display
//! name. Callers group rules per [`Field`] and hand every field to
//! [`validate_fields`], which reports all failures at once as a single
//! [`LedgerError::Validation`]:
//!
//! ```
//! use beans::validation::{max_length, required, validate_fields, Field};
//!
//! let name = "";
//! let err = validate_fields(&[Field::new("Name", [required(name), max_length(name, 255)])])
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "Name is required.");
//! ```

use crate::error::{LedgerError, LedgerResult};
use crate::models::Amount;

/// Outcome of a single rule; the error is a `:field` message template
pub type RuleResult = Result<(), String>;

/// Placeholder replaced by the field name
const FIELD_PLACEHOLDER: &str = ":field";

/// Values that can be missing
pub trait Emptiable {
    fn is_blank(&self) -> bool;
}

impl Emptiable for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Emptiable for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl Emptiable for Amount {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl<T: Emptiable + ?Sized> Emptiable for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

pub fn required<T: Emptiable + ?Sized>(value: &T) -> RuleResult {
    if value.is_blank() {
        Err(":field is required".to_string())
    } else {
        Ok(())
    }
}

/// Fails on a set zero; an empty amount passes
pub fn non_zero(amount: &Amount) -> RuleResult {
    if amount.is_zero() {
        Err(":field must not be zero".to_string())
    } else {
        Ok(())
    }
}

/// Fails on negative amounts. Zero passes, pair with [`non_zero`] to reject it.
pub fn positive(amount: &Amount) -> RuleResult {
    if amount.is_negative() {
        Err(":field must be positive".to_string())
    } else {
        Ok(())
    }
}

pub fn max_decimal_places(amount: &Amount, places: u32) -> RuleResult {
    if amount.decimal_places() > places {
        Err(format!(":field must have at most {} decimal places", places))
    } else {
        Ok(())
    }
}

/// Bounds the magnitude: at most `digits` digits before the decimal point
pub fn max_integer_digits(amount: &Amount, digits: u64) -> RuleResult {
    if amount.integer_digits() > digits {
        Err(format!(
            ":field must have at most {} digits before the decimal point",
            digits
        ))
    } else {
        Ok(())
    }
}

/// Length limit in characters, measured after trimming
pub fn max_length(value: &str, max: usize) -> RuleResult {
    if value.trim().chars().count() > max {
        Err(format!(":field must be at most {} characters", max))
    } else {
        Ok(())
    }
}

/// A named field and the results of its rules
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    errors: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, rules: impl IntoIterator<Item = RuleResult>) -> Self {
        let name = name.into();
        let errors = rules
            .into_iter()
            .filter_map(Result::err)
            .map(|template| template.replace(FIELD_PLACEHOLDER, &name))
            .collect();
        Self { name, errors }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failure messages with the field name substituted
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Combine field results into one error
///
/// Messages within a field are joined with `", "`, fields are separated by
/// `". "`, and the whole message ends with a period, for example
/// `"Amount is required, Amount must be positive. Date is required."`.
pub fn validate_fields(fields: &[Field]) -> LedgerResult<()> {
    let failed: Vec<String> = fields
        .iter()
        .filter(|field| !field.is_valid())
        .map(|field| field.errors.join(", "))
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!("{}.", failed.join(". "))))
    }
}

/// Validate an entity name: required and at most 255 characters
pub fn validate_name(field: &str, name: &str) -> LedgerResult<()> {
    validate_fields(&[Field::new(field, [required(name), max_length(name, 255)])])
}
