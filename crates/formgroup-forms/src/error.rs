//! Error types for form group rendering

/// Errors raised while resolving or rendering a form group.
///
/// Every variant is fatal to the render call that produced it: a field either
/// renders completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum FormGroupError {
	/// An option namespace held a value that is neither `false`, absent, `true`,
	/// text, nor a mapping.
	#[error("Invalid value for `{namespace}` options: expected false, true, text or a mapping, found {found}")]
	InvalidConfigShape {
		namespace: String,
		found: &'static str,
	},
	/// The form subject cannot produce a default id.
	#[error("Unexpected form subject `{0}`: expected a scope name or a new/persisted record")]
	UnresolvableSubject(String),
	/// No field kind is registered under the requested name.
	#[error("Unknown field kind: {0}")]
	UnknownFieldKind(String),
	/// Client-side widget options could not be encoded.
	#[error("Failed to encode widget options: {0}")]
	WidgetOptions(#[from] serde_json::Error),
	/// Form settings could not be parsed.
	#[error("Invalid form settings: {0}")]
	Settings(#[from] toml::de::Error),
	/// Form settings parsed but hold unusable values.
	#[error("Invalid form settings: {0}")]
	SettingsValidation(String),
}

pub type FormGroupResult<T> = Result<T, FormGroupError>;

impl FormGroupError {
	/// Build an `InvalidConfigShape` error describing the offending JSON value.
	pub(crate) fn invalid_shape(namespace: &str, value: &serde_json::Value) -> Self {
		Self::InvalidConfigShape {
			namespace: namespace.to_string(),
			found: json_kind(value),
		}
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "a boolean",
		serde_json::Value::Number(_) => "a number",
		serde_json::Value::String(_) => "text",
		serde_json::Value::Array(_) => "a list",
		serde_json::Value::Object(_) => "a mapping",
	}
}
