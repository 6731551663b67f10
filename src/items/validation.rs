//! Field-level validation for item inputs.
//!
//! Every check collects all violations for an input instead of stopping at
//! the first, so a client can fix a request in one round trip.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::model::{ItemCreate, ItemUpdate, Patch};

/// Minimum name length, in characters.
pub const NAME_MIN_LEN: usize = 1;
/// Maximum name length, in characters.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Offending field.
    #[schema(example = "price")]
    pub field: String,
    /// What is wrong with it.
    #[schema(example = "must be greater than 0")]
    pub message: String,
}

impl FieldViolation {
    /// Create a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All violations found in one input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Empty set of violations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded violations, in check order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldViolation>> for ValidationErrors {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a name: 1 to 100 characters.
pub fn validate_name(name: &str) -> Option<FieldViolation> {
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        Some(FieldViolation::new(
            "name",
            format!("must be at least {NAME_MIN_LEN} character"),
        ))
    } else if len > NAME_MAX_LEN {
        Some(FieldViolation::new(
            "name",
            format!("must be at most {NAME_MAX_LEN} characters"),
        ))
    } else {
        None
    }
}

/// Check a description: at most 500 characters.
pub fn validate_description(description: &str) -> Option<FieldViolation> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        Some(FieldViolation::new(
            "description",
            format!("must be at most {DESCRIPTION_MAX_LEN} characters"),
        ))
    } else {
        None
    }
}

/// Check a price: finite and strictly positive.
pub fn validate_price(price: f64) -> Option<FieldViolation> {
    if !price.is_finite() {
        Some(FieldViolation::new("price", "must be a finite number"))
    } else if price <= 0.0 {
        Some(FieldViolation::new("price", "must be greater than 0"))
    } else {
        None
    }
}

fn not_null(field: &str) -> FieldViolation {
    FieldViolation::new(field, "may not be null")
}

impl ItemCreate {
    /// Check every field of a create request.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.extend(validate_name(&self.name));
        if let Some(description) = &self.description {
            errors.extend(validate_description(description));
        }
        errors.extend(validate_price(self.price));
        errors.into_result()
    }
}

impl ItemUpdate {
    /// Check the fields present in an update request.
    ///
    /// `name` and `price` are required on the item, so an explicit `null`
    /// for either is a violation. A `null` description clears it.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match &self.name {
            Patch::Value(name) => errors.extend(validate_name(name)),
            Patch::Cleared => errors.push(not_null("name")),
            Patch::Unset => {}
        }
        if let Patch::Value(description) = &self.description {
            errors.extend(validate_description(description));
        }
        match self.price {
            Patch::Value(price) => errors.extend(validate_price(price)),
            Patch::Cleared => errors.push(not_null("price")),
            Patch::Unset => {}
        }
        errors.into_result()
    }
}

impl Extend<FieldViolation> for ValidationErrors {
    fn extend<I: IntoIterator<Item = FieldViolation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
