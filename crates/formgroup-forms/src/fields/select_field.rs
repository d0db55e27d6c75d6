use crate::field_kind::{FieldContext, FieldKind};
use crate::html::{Markup, Templating};
use crate::options::{OptionMap, option_map};
use serde_json::{Value, json};

/// `<select>` over a fixed list of `(value, label)` choices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectField {
	pub choices: Vec<(String, String)>,
	/// Label of a leading empty option, if any
	pub blank: Option<String>,
}

impl SelectField {
	/// Create a select from `(value, label)` pairs
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::fields::SelectField;
	///
	/// let field = SelectField::new([("ca", "Canada"), ("fr", "France")]).with_blank("Pick one");
	/// assert_eq!(field.choices.len(), 2);
	/// ```
	pub fn new<V, L>(choices: impl IntoIterator<Item = (V, L)>) -> Self
	where
		V: Into<String>,
		L: Into<String>,
	{
		Self {
			choices: choices
				.into_iter()
				.map(|(value, label)| (value.into(), label.into()))
				.collect(),
			blank: None,
		}
	}

	pub fn with_blank(mut self, label: impl Into<String>) -> Self {
		self.blank = Some(label.into());
		self
	}

	fn render_option(
		&self,
		value: &str,
		label: &str,
		selected: bool,
		template: &dyn Templating,
	) -> Markup {
		let mut attrs = option_map(json!({ "value": value }));
		if selected {
			attrs.insert("selected".to_string(), Value::Bool(true));
		}
		template.content_tag("option", &Markup::text(label), &attrs)
	}
}

impl FieldKind for SelectField {
	fn kind_name(&self) -> &str {
		"select"
	}

	fn render_control(
		&self,
		ctx: &FieldContext<'_>,
		input: &OptionMap,
		template: &dyn Templating,
	) -> Markup {
		let mut attrs = input.clone();
		let current = match attrs.remove("value") {
			Some(Value::String(text)) => Some(text),
			Some(Value::Null) | None => ctx.value_text(),
			Some(other) => Some(other.to_string()),
		};

		let mut content = Markup::new();
		if let Some(blank) = &self.blank {
			content.push(&self.render_option("", blank, false, template));
		}
		for (value, label) in &self.choices {
			let selected = current.as_deref() == Some(value.as_str());
			content.push(&self.render_option(value, label, selected, template));
		}

		template.content_tag("select", &content, &attrs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::html::HtmlTemplate;
	use crate::layout::Layout;
	use crate::record::Record;
	use crate::settings::FormSettings;
	use rstest::rstest;

	#[rstest]
	fn test_select_marks_record_value() {
		// Arrange
		let settings = FormSettings::default();
		let record = Record::new("user").with_value("country", json!("fr"));
		let ctx = FieldContext::new("country", "user", Layout::Vertical, &settings, Some(&record));
		let field = SelectField::new([("ca", "Canada"), ("fr", "France")]).with_blank("");

		// Act
		let html = field.render_control(&ctx, &OptionMap::new(), &HtmlTemplate::new());

		// Assert
		assert_eq!(
			html.as_str(),
			"<select><option value=\"\"></option>\
			 <option value=\"ca\">Canada</option>\
			 <option selected=\"selected\" value=\"fr\">France</option></select>"
		);
	}

	#[rstest]
	fn test_select_escapes_labels() {
		let settings = FormSettings::default();
		let ctx = FieldContext::new("tag", "", Layout::Vertical, &settings, None);
		let field = SelectField::new([("x", "<b>X</b>")]);
		let html = field.render_control(&ctx, &OptionMap::new(), &HtmlTemplate::new());
		assert!(html.as_str().contains("&lt;b&gt;X&lt;/b&gt;"));
	}
}
