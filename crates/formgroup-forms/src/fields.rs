// Text-like inputs
pub mod text_area;
pub mod text_field;

// Choice inputs
pub mod check_box;
pub mod select_field;

// Picker inputs
pub mod date_field;

pub use check_box::CheckBox;
pub use date_field::DateField;
pub use select_field::SelectField;
pub use text_area::TextArea;
pub use text_field::{InputType, TextField};

use crate::field_kind::FieldContext;
use crate::html::{Markup, Templating};
use crate::options::{OptionMap, option_map};
use serde_json::{Value, json};

/// Render `<input type=...>` from resolved attributes, filling `value` from
/// the record unless the caller set one
pub(crate) fn render_input(
	ctx: &FieldContext<'_>,
	input: &OptionMap,
	input_type: &str,
	echo_value: bool,
	template: &dyn Templating,
) -> Markup {
	let mut attrs = input.clone();
	attrs
		.entry("type")
		.or_insert_with(|| Value::String(input_type.to_string()));
	if echo_value
		&& !attrs.contains_key("value")
		&& let Some(value) = ctx.value_text()
	{
		attrs.insert("value".to_string(), Value::String(value));
	}
	template.void_tag("input", &attrs)
}

/// Bootstrap input group around a control
#[derive(Debug, Clone, PartialEq)]
pub struct InputGroup {
	pub class: String,
	pub prepend: Option<Markup>,
	pub append: Option<Markup>,
}

impl InputGroup {
	pub fn new(class: impl Into<String>) -> Self {
		Self {
			class: class.into(),
			prepend: None,
			append: None,
		}
	}

	pub fn with_prepend(mut self, addon: Markup) -> Self {
		self.prepend = Some(addon);
		self
	}

	pub fn with_append(mut self, addon: Markup) -> Self {
		self.append = Some(addon);
		self
	}

	/// Wrap `control` in the group with its addons
	pub fn wrap(&self, control: Markup, template: &dyn Templating) -> Markup {
		let mut content = Markup::new();
		if let Some(prepend) = &self.prepend {
			content.push(&template.content_tag(
				"div",
				prepend,
				&option_map(json!({"class": "input-group-prepend"})),
			));
		}
		content.push(&control);
		if let Some(append) = &self.append {
			content.push(&template.content_tag(
				"div",
				append,
				&option_map(json!({"class": "input-group-append"})),
			));
		}
		template.content_tag("div", &content, &option_map(json!({"class": self.class})))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::html::HtmlTemplate;
	use rstest::rstest;

	#[rstest]
	fn test_input_group_wraps_with_addons() {
		// Arrange
		let group = InputGroup::new("input-group")
			.with_prepend(Markup::raw("<span>@</span>"))
			.with_append(Markup::raw("<span>.com</span>"));

		// Act
		let html = group.wrap(Markup::raw("<input />"), &HtmlTemplate::new());

		// Assert
		assert_eq!(
			html.as_str(),
			"<div class=\"input-group\"><div class=\"input-group-prepend\"><span>@</span></div>\
			 <input /><div class=\"input-group-append\"><span>.com</span></div></div>"
		);
	}
}
