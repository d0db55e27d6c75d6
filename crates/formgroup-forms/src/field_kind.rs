//! Field kinds: the extension point for input types
//!
//! A [`FieldKind`] supplies the default option mappings for each namespace
//! and renders its own control. Every default-producing method has a base
//! implementation in [`base`], so a concrete kind only overrides what it
//! changes. Kinds are looked up by name through a [`FieldKindRegistry`].

use crate::fields::{CheckBox, DateField, InputType, TextArea, TextField};
use crate::html::{Markup, Templating};
use crate::identifier::derive_id;
use crate::layout::{LabelPosition, Layout};
use crate::options::OptionMap;
use crate::record::FormRecord;
use crate::settings::FormSettings;
use crate::validation::{ValidationState, field_errors};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only facts about the field being rendered
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
	/// Field name as passed by the caller
	pub name: &'a str,
	/// Naming scope of the builder, empty when unscoped
	pub scope: &'a str,
	/// Derived DOM id (see [`derive_id`])
	pub id: String,
	/// Layout of the enclosing form
	pub layout: Layout,
	/// Class vocabulary and messages of the session
	pub settings: &'a FormSettings,
	/// Current value from the bound record
	pub value: Option<Value>,
	/// Default label text
	pub label_text: String,
	/// Error messages attached to this field
	pub errors: Vec<String>,
	/// Required and error flags from the bound record
	pub state: ValidationState,
}

impl<'a> FieldContext<'a> {
	/// Build the context for `name`, inspecting `record` once
	pub fn new(
		name: &'a str,
		scope: &'a str,
		layout: Layout,
		settings: &'a FormSettings,
		record: Option<&dyn FormRecord>,
	) -> Self {
		Self {
			name,
			scope,
			id: derive_id(name, scope),
			layout,
			settings,
			value: record.and_then(|r| r.value(name)),
			label_text: record
				.map(|r| r.human_attribute_name(name))
				.unwrap_or_else(|| crate::record::humanize(name)),
			errors: field_errors(record, name),
			state: ValidationState::inspect(record, name),
		}
	}

	/// The current value as display text, empty for null or absent values
	pub fn value_text(&self) -> Option<String> {
		match self.value.as_ref()? {
			Value::Null => None,
			Value::String(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}
}

/// One input type: its option defaults and its control markup
pub trait FieldKind: Send + Sync {
	/// Registry name of this kind
	fn kind_name(&self) -> &str;

	/// Default attributes of the control
	fn default_input_options(&self, ctx: &FieldContext<'_>) -> OptionMap {
		base::input_options(ctx)
	}

	/// Default client-side widget configuration
	fn default_widget_options(&self, _ctx: &FieldContext<'_>) -> OptionMap {
		OptionMap::new()
	}

	fn default_label_options(&self, ctx: &FieldContext<'_>) -> Option<OptionMap> {
		Some(base::label_options(ctx))
	}

	fn default_hint_options(&self, ctx: &FieldContext<'_>) -> Option<OptionMap> {
		Some(base::hint_options(ctx))
	}

	/// `None` suppresses feedback unless the caller asks for it
	fn default_feedback_options(&self, ctx: &FieldContext<'_>) -> Option<OptionMap> {
		base::feedback_options(ctx)
	}

	fn default_wrapper_options(&self, ctx: &FieldContext<'_>) -> Option<OptionMap> {
		Some(base::wrapper_options(ctx))
	}

	fn label_position(&self) -> LabelPosition {
		LabelPosition::Before
	}

	/// Render the control from the fully resolved input attributes
	fn render_control(
		&self,
		ctx: &FieldContext<'_>,
		input: &OptionMap,
		template: &dyn Templating,
	) -> Markup;
}

/// Engine-wide defaults used by kinds that do not override a namespace
pub mod base {
	use super::FieldContext;
	use crate::identifier::hint_id;
	use crate::layout::Layout;
	use crate::options::{OptionMap, option_map};
	use serde_json::json;

	pub fn input_options(ctx: &FieldContext<'_>) -> OptionMap {
		option_map(json!({ "class": ctx.settings.control_class }))
	}

	pub fn label_options(ctx: &FieldContext<'_>) -> OptionMap {
		match ctx.layout {
			Layout::Horizontal => {
				option_map(json!({ "class": ctx.settings.horizontal_label_class }))
			}
			Layout::Inline => option_map(json!({ "class": ctx.settings.inline_label_class })),
			Layout::Vertical => OptionMap::new(),
		}
	}

	pub fn hint_options(ctx: &FieldContext<'_>) -> OptionMap {
		option_map(json!({
			"tag": ctx.settings.hint_tag,
			"class": ctx.settings.hint_class,
			"id": hint_id(&ctx.id),
		}))
	}

	pub fn feedback_options(ctx: &FieldContext<'_>) -> Option<OptionMap> {
		match ctx.layout {
			Layout::Inline => None,
			Layout::Vertical | Layout::Horizontal => Some(option_map(json!({
				"valid": { "class": ctx.settings.valid_feedback_class },
				"invalid": { "class": ctx.settings.invalid_feedback_class },
			}))),
		}
	}

	pub fn wrapper_options(ctx: &FieldContext<'_>) -> OptionMap {
		match ctx.layout {
			Layout::Horizontal => option_map(json!({
				"class": format!(
					"{} {}",
					ctx.settings.group_class, ctx.settings.horizontal_row_class
				),
			})),
			Layout::Vertical | Layout::Inline => {
				option_map(json!({ "class": ctx.settings.group_class }))
			}
		}
	}
}

/// Name → field kind lookup
///
/// # Examples
///
/// ```
/// use formgroup_forms::FieldKindRegistry;
///
/// let registry = FieldKindRegistry::with_builtin_kinds();
/// assert!(registry.get("date").is_some());
/// assert!(registry.get("signature").is_none());
/// ```
pub struct FieldKindRegistry {
	kinds: RwLock<HashMap<String, Arc<dyn FieldKind>>>,
}

impl FieldKindRegistry {
	/// An empty registry
	pub fn new() -> Self {
		Self {
			kinds: RwLock::new(HashMap::new()),
		}
	}

	/// A registry holding every kind this crate ships
	pub fn with_builtin_kinds() -> Self {
		let registry = Self::new();
		for input_type in InputType::ALL {
			registry.register(input_type.as_str(), TextField::new(input_type));
		}
		registry.register("textarea", TextArea::new());
		registry.register("check_box", CheckBox::new());
		registry.register("date", DateField::new());
		registry
	}

	/// Register `kind` under `name`, replacing any previous registration
	pub fn register(&self, name: impl Into<String>, kind: impl FieldKind + 'static) {
		self.register_arc(name, Arc::new(kind));
	}

	pub fn register_arc(&self, name: impl Into<String>, kind: Arc<dyn FieldKind>) {
		let name = name.into();
		tracing::debug!(kind = %name, "registering field kind");
		self.kinds.write().insert(name, kind);
	}

	pub fn get(&self, name: &str) -> Option<Arc<dyn FieldKind>> {
		self.kinds.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.kinds.read().contains_key(name)
	}

	/// Registered names, sorted
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.kinds.read().keys().cloned().collect();
		names.sort();
		names
	}
}

impl Default for FieldKindRegistry {
	fn default() -> Self {
		Self::with_builtin_kinds()
	}
}

impl std::fmt::Debug for FieldKindRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldKindRegistry")
			.field("kinds", &self.names())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::Record;
	use rstest::rstest;
	use serde_json::json;

	struct Signature;

	impl FieldKind for Signature {
		fn kind_name(&self) -> &str {
			"signature"
		}

		fn render_control(
			&self,
			_ctx: &FieldContext<'_>,
			input: &OptionMap,
			template: &dyn Templating,
		) -> Markup {
			template.void_tag("canvas", input)
		}
	}

	fn context<'a>(layout: Layout, settings: &'a FormSettings) -> FieldContext<'a> {
		FieldContext::new("email", "user", layout, settings, None)
	}

	#[rstest]
	#[case(Layout::Vertical, json!({}))]
	#[case(Layout::Horizontal, json!({"class": "col-sm-2 col-form-label"}))]
	#[case(Layout::Inline, json!({"class": "sr-only"}))]
	fn test_base_label_defaults(#[case] layout: Layout, #[case] expected: Value) {
		let settings = FormSettings::default();
		let ctx = context(layout, &settings);
		assert_eq!(Signature.default_label_options(&ctx), expected.as_object().cloned());
	}

	#[rstest]
	#[case(Layout::Vertical, "form-group")]
	#[case(Layout::Horizontal, "form-group row")]
	fn test_base_wrapper_defaults(#[case] layout: Layout, #[case] class: &str) {
		let settings = FormSettings::default();
		let ctx = context(layout, &settings);
		let wrapper = Signature.default_wrapper_options(&ctx).unwrap();
		assert_eq!(wrapper["class"], json!(class));
	}

	#[rstest]
	fn test_base_feedback_suppressed_inline() {
		let settings = FormSettings::default();
		assert!(
			Signature
				.default_feedback_options(&context(Layout::Inline, &settings))
				.is_none()
		);
		let vertical = Signature
			.default_feedback_options(&context(Layout::Vertical, &settings))
			.unwrap();
		assert_eq!(vertical["invalid"], json!({"class": "invalid-feedback"}));
	}

	#[rstest]
	fn test_base_hint_uses_derived_id() {
		let settings = FormSettings::default();
		let hint = Signature
			.default_hint_options(&context(Layout::Vertical, &settings))
			.unwrap();
		assert_eq!(hint["id"], json!("user_email_hint"));
		assert_eq!(hint["tag"], json!("small"));
	}

	#[rstest]
	fn test_context_reads_record() {
		// Arrange
		let settings = FormSettings::default();
		let record = Record::new("user")
			.with_value("email", json!("ada@example.com"))
			.with_error("email", "is taken");

		// Act
		let ctx = FieldContext::new("email", "user", Layout::Vertical, &settings, Some(&record));

		// Assert
		assert_eq!(ctx.value_text().as_deref(), Some("ada@example.com"));
		assert_eq!(ctx.label_text, "Email");
		assert_eq!(ctx.errors, vec!["is taken"]);
		assert!(ctx.state.has_field_error);
	}

	#[rstest]
	fn test_registry_register_and_replace() {
		// Arrange
		let registry = FieldKindRegistry::new();

		// Act
		registry.register("signature", Signature);
		registry.register("signature", Signature);

		// Assert
		assert_eq!(registry.names(), vec!["signature"]);
		assert_eq!(registry.get("signature").unwrap().kind_name(), "signature");
	}

	#[rstest]
	fn test_builtin_registry_names() {
		let registry = FieldKindRegistry::with_builtin_kinds();
		for name in ["text", "email", "password", "textarea", "check_box", "date"] {
			assert!(registry.contains(name), "missing builtin kind {name}");
		}
	}
}
