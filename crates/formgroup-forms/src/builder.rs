use crate::error::{FormGroupError, FormGroupResult};
use crate::field_kind::FieldKind;
use crate::fields::SelectField;
use crate::form_input::FormInput;
use crate::html::Markup;
use crate::layout::Layout;
use crate::options::OptionMap;
use crate::record::FormRecord;
use crate::session::RenderSession;
use serde_json::Value;

/// Renders form groups for fields under one naming scope
///
/// # Examples
///
/// ```
/// use formgroup_forms::{Layout, RenderSession};
/// use serde_json::json;
///
/// let session = RenderSession::new();
/// let form = session.builder("user", None, Layout::Vertical);
/// let html = form.email_field("email", json!({"label": "Email address"})).unwrap();
/// assert!(html.as_str().contains("<label for=\"user_email\">Email address</label>"));
/// ```
pub struct FormBuilder<'a> {
	session: &'a RenderSession,
	scope: String,
	record: Option<&'a dyn FormRecord>,
	layout: Layout,
}

impl<'a> FormBuilder<'a> {
	pub fn new(
		session: &'a RenderSession,
		scope: impl Into<String>,
		record: Option<&'a dyn FormRecord>,
		layout: Layout,
	) -> Self {
		Self {
			session,
			scope: scope.into(),
			record,
			layout,
		}
	}

	pub fn scope(&self) -> &str {
		&self.scope
	}

	pub fn layout(&self) -> Layout {
		self.layout
	}

	pub fn record(&self) -> Option<&'a dyn FormRecord> {
		self.record
	}

	pub fn session(&self) -> &'a RenderSession {
		self.session
	}

	/// Render `name` as a form group of `kind`
	pub fn field(&self, kind: &dyn FieldKind, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.render(kind, name, options, None)
	}

	/// Like [`field`](Self::field), with control attributes taken from
	/// `html_options` instead of the top-level option keys
	pub fn field_with_html_options(
		&self,
		kind: &dyn FieldKind,
		name: &str,
		options: Value,
		html_options: Value,
	) -> FormGroupResult<Markup> {
		let html_options = options_map("html_options", html_options)?;
		self.render(kind, name, options, Some(&html_options))
	}

	/// Render `name` with the kind registered as `kind_name`
	pub fn input(&self, kind_name: &str, name: &str, options: Value) -> FormGroupResult<Markup> {
		let kind = self
			.session
			.registry()
			.get(kind_name)
			.ok_or_else(|| FormGroupError::UnknownFieldKind(kind_name.to_string()))?;
		self.render(kind.as_ref(), name, options, None)
	}

	pub fn text_field(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("text", name, options)
	}

	pub fn email_field(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("email", name, options)
	}

	pub fn password_field(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("password", name, options)
	}

	pub fn text_area(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("textarea", name, options)
	}

	pub fn check_box(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("check_box", name, options)
	}

	pub fn date_field(&self, name: &str, options: Value) -> FormGroupResult<Markup> {
		self.input("date", name, options)
	}

	/// Render a `<select>` over `choices`
	pub fn select(
		&self,
		name: &str,
		choices: &SelectField,
		options: Value,
		html_options: Value,
	) -> FormGroupResult<Markup> {
		self.field_with_html_options(choices, name, options, html_options)
	}

	fn render(
		&self,
		kind: &dyn FieldKind,
		name: &str,
		options: Value,
		html_options: Option<&OptionMap>,
	) -> FormGroupResult<Markup> {
		let options = options_map("options", options)?;
		FormInput::new(self.session, kind, name, &self.scope, self.layout, self.record)
			.render(&options, html_options)
	}
}

/// Accept a mapping or `null`
fn options_map(namespace: &str, value: Value) -> FormGroupResult<OptionMap> {
	match value {
		Value::Null => Ok(OptionMap::new()),
		Value::Object(map) => Ok(map),
		other => Err(FormGroupError::invalid_shape(namespace, &other)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error_display::ErrorDisplayMode;
	use crate::record::Record;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn session() -> RenderSession {
		RenderSession::new()
	}

	#[rstest]
	fn test_unknown_kind_is_an_error(session: RenderSession) {
		let form = session.builder("user", None, Layout::Vertical);

		let result = form.input("colour", "favourite", Value::Null);

		assert!(matches!(result, Err(FormGroupError::UnknownFieldKind(ref k)) if k == "colour"));
	}

	#[rstest]
	#[case(json!("text"), "text")]
	#[case(json!([1]), "a list")]
	fn test_options_must_be_a_mapping(
		session: RenderSession,
		#[case] options: Value,
		#[case] found: &str,
	) {
		let form = session.builder("user", None, Layout::Vertical);

		let result = form.text_field("name", options);

		match result {
			Err(FormGroupError::InvalidConfigShape { namespace, found: actual }) => {
				assert_eq!(namespace, "options");
				assert_eq!(actual, found);
			}
			other => panic!("expected InvalidConfigShape, got {other:?}"),
		}
	}

	#[rstest]
	fn test_builder_suppresses_host_error_wrapper(session: RenderSession) {
		// Arrange
		let record = Record::new("user").with_error("name", "is blank");
		let form = session.builder("user", Some(&record), Layout::Vertical);

		// Act
		let html = form.text_field("name", json!({"label": false})).unwrap();

		// Assert
		assert!(!html.as_str().contains("field_with_errors"));
		assert!(html.as_str().contains("is-invalid"));
		assert_eq!(session.error_display().mode(), ErrorDisplayMode::Wrap);
	}

	#[rstest]
	fn test_select_takes_attributes_from_html_options(session: RenderSession) {
		// Arrange
		let record = Record::new("user").with_value("role", json!("admin"));
		let form = session.builder("user", Some(&record), Layout::Inline);
		let roles = SelectField::new([("admin", "Admin"), ("staff", "Staff")]);

		// Act
		let html = form
			.select(
				"role",
				&roles,
				json!({"label": false, "include_hidden": true}),
				json!({"class": "custom-select"}),
			)
			.unwrap();

		// Assert
		assert_eq!(
			html.as_str(),
			"<select class=\"custom-select form-control\" id=\"user_role\" name=\"user[role]\">\
			 <option selected=\"selected\" value=\"admin\">Admin</option>\
			 <option value=\"staff\">Staff</option></select>"
		);
	}
}
