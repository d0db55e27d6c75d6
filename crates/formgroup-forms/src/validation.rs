//! Validation state inspection
//!
//! Pure queries against the bound record. An absent record, or one that
//! exposes no error information, answers `false` to everything.

use crate::record::{FormRecord, ValidatorKind};

/// Validation facts about one field, recomputed on every render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationState {
	/// The record has at least one error on any field
	pub has_any_error: bool,
	/// The record has at least one error on this field
	pub has_field_error: bool,
	/// The record type declares a presence constraint on this field
	pub is_required: bool,
}

impl ValidationState {
	/// Inspect `record` for `field`
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::record::{Record, ValidatorKind};
	/// use formgroup_forms::validation::ValidationState;
	///
	/// let record = Record::new("user")
	///     .with_validator("name", ValidatorKind::Presence)
	///     .with_error("email", "is invalid");
	///
	/// let state = ValidationState::inspect(Some(&record), "name");
	/// assert!(state.has_any_error);
	/// assert!(!state.has_field_error);
	/// assert!(state.is_required);
	///
	/// assert_eq!(ValidationState::inspect(None, "name"), ValidationState::default());
	/// ```
	pub fn inspect(record: Option<&dyn FormRecord>, field: &str) -> Self {
		Self {
			has_any_error: has_error(record, None),
			has_field_error: has_error(record, Some(field)),
			is_required: is_required(record, field),
		}
	}
}

/// Whether the record type declares a presence constraint on `field`
pub fn is_required(record: Option<&dyn FormRecord>, field: &str) -> bool {
	let Some(record) = record else {
		return false;
	};
	if field.is_empty() {
		return false;
	}

	record
		.validators_on(field)
		.iter()
		.any(|kind| *kind == ValidatorKind::Presence)
}

/// Whether the record has errors on `field`, or on any field when `None`
pub fn has_error(record: Option<&dyn FormRecord>, field: Option<&str>) -> bool {
	let Some(errors) = record.and_then(|r| r.errors()) else {
		return false;
	};

	match field {
		Some(name) => !errors.on(name).is_empty(),
		None => !errors.is_empty(),
	}
}

/// Error messages attached to `field`
pub fn field_errors(record: Option<&dyn FormRecord>, field: &str) -> Vec<String> {
	record
		.and_then(|r| r.errors())
		.map(|errors| errors.on(field).to_vec())
		.unwrap_or_default()
}
