use crate::field_kind::{FieldContext, FieldKind};
use crate::html::{Markup, Templating};
use crate::layout::LabelPosition;
use crate::options::{OptionMap, option_map};
use serde_json::{Value, json};

/// Checkbox with a hidden fallback input so unchecked boxes still submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckBox {
	pub checked_value: String,
	pub unchecked_value: String,
}

impl CheckBox {
	pub fn new() -> Self {
		Self {
			checked_value: "1".to_string(),
			unchecked_value: "0".to_string(),
		}
	}

	pub fn with_values(checked: impl Into<String>, unchecked: impl Into<String>) -> Self {
		Self {
			checked_value: checked.into(),
			unchecked_value: unchecked.into(),
		}
	}

	fn is_checked(&self, ctx: &FieldContext<'_>) -> bool {
		match &ctx.value {
			Some(Value::Bool(checked)) => *checked,
			Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
			Some(Value::String(s)) => s == &self.checked_value || s == "true",
			_ => false,
		}
	}
}

impl Default for CheckBox {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldKind for CheckBox {
	fn kind_name(&self) -> &str {
		"check_box"
	}

	fn default_input_options(&self, _ctx: &FieldContext<'_>) -> OptionMap {
		option_map(json!({"class": "form-check-input"}))
	}

	fn default_label_options(&self, _ctx: &FieldContext<'_>) -> Option<OptionMap> {
		Some(option_map(json!({"class": "form-check-label"})))
	}

	fn default_wrapper_options(&self, _ctx: &FieldContext<'_>) -> Option<OptionMap> {
		Some(option_map(json!({"class": "form-check"})))
	}

	fn label_position(&self) -> LabelPosition {
		LabelPosition::After
	}

	fn render_control(
		&self,
		ctx: &FieldContext<'_>,
		input: &OptionMap,
		template: &dyn Templating,
	) -> Markup {
		let mut hidden = option_map(json!({
			"type": "hidden",
			"value": self.unchecked_value,
			"autocomplete": "off",
		}));
		if let Some(name) = input.get("name") {
			hidden.insert("name".to_string(), name.clone());
		}

		let mut attrs = input.clone();
		attrs.insert("type".to_string(), json!("checkbox"));
		attrs
			.entry("value")
			.or_insert_with(|| Value::String(self.checked_value.clone()));
		if !attrs.contains_key("checked") && self.is_checked(ctx) {
			attrs.insert("checked".to_string(), Value::Bool(true));
		}

		template.void_tag("input", &hidden) + template.void_tag("input", &attrs)
	}
}
