//! The bound record a form renders
//!
//! Hosts expose their model objects through [`FormRecord`]. The engine only
//! reads from it: values, validation errors, declared validators, the label
//! text for a field and whether the record is new or persisted.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
	messages: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach a message to a field
	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.messages
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	/// Messages attached to `field`, in insertion order
	pub fn on(&self, field: &str) -> &[String] {
		self.messages.get(field).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn is_empty(&self) -> bool {
		self.messages.values().all(Vec::is_empty)
	}

	/// Total number of messages across all fields
	pub fn len(&self) -> usize {
		self.messages.values().map(Vec::len).sum()
	}

	pub fn clear(&mut self) {
		self.messages.clear();
	}
}

/// Kinds of validation constraints a record type can declare on a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
	Presence,
	Length,
	Format,
	Numericality,
	Inclusion,
	Other(String),
}

/// Lifecycle state of a record, used to derive form ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
	/// Not saved yet
	New,
	/// Saved, identified by its URL parameter
	Persisted(String),
}

/// Read-only view of the object a form is bound to
pub trait FormRecord: Send + Sync {
	/// Underscored model name, e.g. `blog_post`
	fn model_name(&self) -> &str;

	/// Validation errors, or `None` when the record exposes no error information
	fn errors(&self) -> Option<&ValidationErrors> {
		None
	}

	/// Label text for a field
	fn human_attribute_name(&self, field: &str) -> String {
		humanize(field)
	}

	/// Validation constraints declared on a field
	fn validators_on(&self, _field: &str) -> Vec<ValidatorKind> {
		Vec::new()
	}

	/// Current value of a field
	fn value(&self, _field: &str) -> Option<Value> {
		None
	}

	/// New or persisted state, or `None` when the record cannot tell
	fn persistence(&self) -> Option<Persistence> {
		None
	}
}

/// In-memory [`FormRecord`]
///
/// # Examples
///
/// ```
/// use formgroup_forms::record::{FormRecord, Record, ValidatorKind};
/// use serde_json::json;
///
/// let record = Record::new("user")
///     .with_value("email", json!("ada@example.com"))
///     .with_validator("email", ValidatorKind::Presence)
///     .with_error("name", "can't be blank");
///
/// assert_eq!(record.value("email"), Some(json!("ada@example.com")));
/// assert_eq!(record.errors().unwrap().on("name"), ["can't be blank"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
	model_name: String,
	values: HashMap<String, Value>,
	errors: ValidationErrors,
	validators: HashMap<String, Vec<ValidatorKind>>,
	labels: HashMap<String, String>,
	persistence: Option<Persistence>,
}

impl Record {
	/// Create a new, unsaved record
	pub fn new(model_name: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			persistence: Some(Persistence::New),
			..Self::default()
		}
	}

	pub fn with_value(mut self, field: impl Into<String>, value: Value) -> Self {
		self.values.insert(field.into(), value);
		self
	}

	pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
		self.errors.add(field, message);
		self
	}

	pub fn with_validator(mut self, field: impl Into<String>, kind: ValidatorKind) -> Self {
		self.validators.entry(field.into()).or_default().push(kind);
		self
	}

	/// Override the humanized label text for a field
	pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
		self.labels.insert(field.into(), label.into());
		self
	}

	/// Mark the record as saved under `param`
	pub fn persisted(mut self, param: impl Into<String>) -> Self {
		self.persistence = Some(Persistence::Persisted(param.into()));
		self
	}

	/// Forget the lifecycle state
	pub fn without_persistence(mut self) -> Self {
		self.persistence = None;
		self
	}

	pub fn errors_mut(&mut self) -> &mut ValidationErrors {
		&mut self.errors
	}
}

impl FormRecord for Record {
	fn model_name(&self) -> &str {
		&self.model_name
	}

	fn errors(&self) -> Option<&ValidationErrors> {
		Some(&self.errors)
	}

	fn human_attribute_name(&self, field: &str) -> String {
		self.labels
			.get(field)
			.cloned()
			.unwrap_or_else(|| humanize(field))
	}

	fn validators_on(&self, field: &str) -> Vec<ValidatorKind> {
		self.validators.get(field).cloned().unwrap_or_default()
	}

	fn value(&self, field: &str) -> Option<Value> {
		self.values.get(field).cloned()
	}

	fn persistence(&self) -> Option<Persistence> {
		self.persistence.clone()
	}
}

/// Turn a field name into label text
///
/// # Examples
///
/// ```
/// use formgroup_forms::record::humanize;
///
/// assert_eq!(humanize("first_name"), "First name");
/// assert_eq!(humanize("author_id"), "Author");
/// assert_eq!(humanize("active?"), "Active");
/// ```
pub fn humanize(field: &str) -> String {
	let base = field.strip_suffix('?').unwrap_or(field);
	let base = base.strip_suffix("_id").unwrap_or(base);
	let spaced = base.replace('_', " ");
	let trimmed = spaced.trim();

	let mut chars = trimmed.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Join messages into one sentence
///
/// # Examples
///
/// ```
/// use formgroup_forms::record::to_sentence;
///
/// assert_eq!(to_sentence(&["is too short".to_string()]), "is too short");
/// assert_eq!(
///     to_sentence(&["a".to_string(), "b".to_string(), "c".to_string()]),
///     "a, b, and c"
/// );
/// ```
pub fn to_sentence(messages: &[String]) -> String {
	match messages {
		[] => String::new(),
		[only] => only.clone(),
		[first, second] => format!("{first} and {second}"),
		[rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_validation_errors_counts() {
		// Arrange
		let mut errors = ValidationErrors::new();

		// Act
		errors.add("name", "can't be blank");
		errors.add("name", "is too short");
		errors.add("email", "is invalid");

		// Assert
		assert_eq!(errors.len(), 3);
		assert_eq!(errors.on("name").len(), 2);
		assert!(errors.on("missing").is_empty());
		assert!(!errors.is_empty());
	}

	#[rstest]
	fn test_validation_errors_clear() {
		let mut errors = ValidationErrors::new();
		errors.add("name", "can't be blank");
		errors.clear();
		assert!(errors.is_empty());
	}

	#[rstest]
	#[case(&[], "")]
	#[case(&["a"], "a")]
	#[case(&["a", "b"], "a and b")]
	#[case(&["a", "b", "c", "d"], "a, b, c, and d")]
	fn test_to_sentence(#[case] parts: &[&str], #[case] expected: &str) {
		let messages: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
		assert_eq!(to_sentence(&messages), expected);
	}

	#[rstest]
	#[case("name", "Name")]
	#[case("date_of_birth", "Date of birth")]
	#[case("_id", "")]
	fn test_humanize(#[case] field: &str, #[case] expected: &str) {
		assert_eq!(humanize(field), expected);
	}

	#[rstest]
	fn test_record_label_override() {
		let record = Record::new("user").with_label("dob", "Birthday");
		assert_eq!(record.human_attribute_name("dob"), "Birthday");
		assert_eq!(record.human_attribute_name("email"), "Email");
	}

	#[rstest]
	fn test_record_persistence_states() {
		assert_eq!(Record::new("user").persistence(), Some(Persistence::New));
		assert_eq!(
			Record::new("user").persisted("7").persistence(),
			Some(Persistence::Persisted("7".to_string()))
		);
		assert_eq!(Record::new("user").without_persistence().persistence(), None);
	}
}
