use crate::field_kind::{FieldContext, FieldKind};
use crate::html::{Markup, Templating};
use crate::options::OptionMap;
use serde_json::Value;

/// Multi-line `<textarea>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextArea {
	pub rows: Option<u32>,
}

impl TextArea {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_rows(mut self, rows: u32) -> Self {
		self.rows = Some(rows);
		self
	}
}

impl FieldKind for TextArea {
	fn kind_name(&self) -> &str {
		"textarea"
	}

	fn default_input_options(&self, ctx: &FieldContext<'_>) -> OptionMap {
		let mut options = crate::field_kind::base::input_options(ctx);
		if let Some(rows) = self.rows {
			options.insert("rows".to_string(), Value::from(rows));
		}
		options
	}

	fn render_control(
		&self,
		ctx: &FieldContext<'_>,
		input: &OptionMap,
		template: &dyn Templating,
	) -> Markup {
		let mut attrs = input.clone();
		let body = match attrs.remove("value") {
			Some(Value::String(text)) => Some(text),
			Some(Value::Null) | None => ctx.value_text(),
			Some(other) => Some(other.to_string()),
		};
		let content = body.map(|text| Markup::text(&text)).unwrap_or_default();
		template.content_tag("textarea", &content, &attrs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::html::HtmlTemplate;
	use crate::layout::Layout;
	use crate::options::option_map;
	use crate::record::Record;
	use crate::settings::FormSettings;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_text_area_body_is_escaped_value() {
		// Arrange
		let settings = FormSettings::default();
		let record = Record::new("post").with_value("body", json!("<p>hi</p>"));
		let ctx = FieldContext::new("body", "post", Layout::Vertical, &settings, Some(&record));

		// Act
		let html = TextArea::new().render_control(
			&ctx,
			&option_map(json!({"name": "post[body]"})),
			&HtmlTemplate::new(),
		);

		// Assert
		assert_eq!(
			html.as_str(),
			"<textarea name=\"post[body]\">&lt;p&gt;hi&lt;/p&gt;</textarea>"
		);
	}

	#[rstest]
	fn test_text_area_rows_default() {
		let settings = FormSettings::default();
		let ctx = FieldContext::new("body", "post", Layout::Vertical, &settings, None);
		let options = TextArea::new().with_rows(5).default_input_options(&ctx);
		assert_eq!(options["rows"], json!(5));
		assert_eq!(options["class"], json!("form-control"));
	}
}
