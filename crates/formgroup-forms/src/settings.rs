//! Form rendering settings
//!
//! The CSS vocabulary and fixed messages the engine emits. Defaults target a
//! Bootstrap 4 style stylesheet; any field can be overridden from TOML.
//!
//! ```toml
//! default_layout = "horizontal"
//! valid_feedback_message = "All good"
//! horizontal_content_class = "col-md-9"
//! ```

use crate::error::{FormGroupError, FormGroupResult};
use crate::layout::Layout;
use serde::{Deserialize, Serialize};

/// Settings shared by every render in a session
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Layout used when a form does not ask for one
	pub default_layout: Layout,

	/// Base class applied to text-like controls
	pub control_class: String,

	/// Replacement for `control_class` on readonly controls
	pub plaintext_control_class: String,

	/// Class of the group container
	pub group_class: String,

	/// Extra class of the group container in horizontal layout
	pub horizontal_row_class: String,

	/// Label class in horizontal layout
	pub horizontal_label_class: String,

	/// Class of the empty placeholder column when the label is suppressed
	pub horizontal_label_placeholder_class: String,

	/// Class of the column holding control, hint and feedback
	pub horizontal_content_class: String,

	/// Label class in inline layout
	pub inline_label_class: String,

	/// Element used for hints
	pub hint_tag: String,

	/// Class of hint elements
	pub hint_class: String,

	/// Class of the valid-state feedback element
	pub valid_feedback_class: String,

	/// Class of the invalid-state feedback element
	pub invalid_feedback_class: String,

	/// Fixed message shown by valid-state feedback
	pub valid_feedback_message: String,

	/// Class the host uses to wrap erroring controls when not suppressed
	pub error_wrapper_class: String,

	/// Class every rendered form carries
	pub form_class: String,

	/// Extra form class in inline layout
	pub inline_form_class: String,

	/// Optional `onsubmit` handler for client-side validation
	pub validate_onsubmit: Option<String>,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			default_layout: Layout::Vertical,
			control_class: "form-control".to_string(),
			plaintext_control_class: "form-control-plaintext".to_string(),
			group_class: "form-group".to_string(),
			horizontal_row_class: "row".to_string(),
			horizontal_label_class: "col-sm-2 col-form-label".to_string(),
			horizontal_label_placeholder_class: "col-sm-2".to_string(),
			horizontal_content_class: "col-sm-10".to_string(),
			inline_label_class: "sr-only".to_string(),
			hint_tag: "small".to_string(),
			hint_class: "form-text text-muted".to_string(),
			valid_feedback_class: "valid-feedback".to_string(),
			invalid_feedback_class: "invalid-feedback".to_string(),
			valid_feedback_message: "Looks good!".to_string(),
			error_wrapper_class: "field_with_errors".to_string(),
			form_class: "needs-validation".to_string(),
			inline_form_class: "form-inline".to_string(),
			validate_onsubmit: None,
		}
	}
}

impl FormSettings {
	/// Create settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from TOML, filling unspecified fields with defaults
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::{FormSettings, Layout};
	///
	/// let settings = FormSettings::from_toml_str("default_layout = \"inline\"").unwrap();
	/// assert_eq!(settings.default_layout, Layout::Inline);
	/// assert_eq!(settings.control_class, "form-control");
	/// ```
	pub fn from_toml_str(source: &str) -> FormGroupResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reject settings the engine cannot render with
	pub fn validate(&self) -> FormGroupResult<()> {
		if self.hint_tag.trim().is_empty() {
			return Err(FormGroupError::SettingsValidation(
				"hint_tag must not be empty".to_string(),
			));
		}

		if self.control_class.split_whitespace().count() != 1 {
			return Err(FormGroupError::SettingsValidation(
				"control_class must be a single class token".to_string(),
			));
		}

		Ok(())
	}
}
