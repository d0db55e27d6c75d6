use crate::field_kind::{FieldContext, FieldKind, base};
use crate::fields::{InputGroup, render_input};
use crate::html::{Markup, Templating};
use crate::options::{OptionMap, option_map};
use chrono::{DateTime, NaiveDate};
use serde_json::{Value, json};

/// HTML pattern accepting `DD`, `DD/MM` or `DD/MM/YYYY`
pub const DATE_PATTERN: &str = r"\d{2}(\/\d{2})?(\/\d{4})?";

/// Date format understood by the client-side picker
pub const PICKER_FORMAT: &str = "DD/MM/YYYY";

const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Text input backed by a client-side date picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
	/// Whether the picker is linked to a sibling picker (range selection)
	pub date_linked: bool,
	pub disabled_dates: Vec<NaiveDate>,
	pub min_date: Option<NaiveDate>,
	pub max_date: Option<NaiveDate>,
	pub locale: Option<String>,
}

impl DateField {
	/// Create an unlinked date field with no bounds
	///
	/// # Examples
	///
	/// ```
	/// use chrono::NaiveDate;
	/// use formgroup_forms::fields::DateField;
	///
	/// let field = DateField::new()
	///     .with_min_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
	///     .with_locale("fr");
	/// assert!(!field.date_linked);
	/// assert_eq!(field.locale.as_deref(), Some("fr"));
	/// ```
	pub fn new() -> Self {
		Self {
			date_linked: false,
			disabled_dates: Vec::new(),
			min_date: None,
			max_date: None,
			locale: None,
		}
	}

	pub fn linked(mut self) -> Self {
		self.date_linked = true;
		self
	}

	pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
		self.disabled_dates = dates.into_iter().collect();
		self
	}

	pub fn with_min_date(mut self, date: NaiveDate) -> Self {
		self.min_date = Some(date);
		self
	}

	pub fn with_max_date(mut self, date: NaiveDate) -> Self {
		self.max_date = Some(date);
		self
	}

	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	fn input_group(&self, template: &dyn Templating) -> InputGroup {
		let icon = template.content_tag(
			"i",
			&Markup::new(),
			&option_map(json!({"class": "icon icon-calendar", "aria-hidden": "true"})),
		);
		let addon = template.content_tag(
			"span",
			&icon,
			&option_map(json!({"class": "input-group-text"})),
		);
		InputGroup::new("input-group date-time-picker-input-group").with_prepend(addon)
	}
}

impl Default for DateField {
	fn default() -> Self {
		Self::new()
	}
}

/// Record value as picker text: ISO dates and timestamps become `DD/MM/YYYY`,
/// anything else is shown as given
pub fn display_date(value: &Value) -> Option<String> {
	let text = match value {
		Value::Null => return None,
		Value::String(text) => text,
		other => return Some(other.to_string()),
	};
	if let Ok(date) = NaiveDate::parse_from_str(text, ISO_FORMAT) {
		return Some(date.format(DISPLAY_FORMAT).to_string());
	}
	if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
		return Some(moment.date_naive().format(DISPLAY_FORMAT).to_string());
	}
	Some(text.clone())
}

fn iso(date: &NaiveDate) -> Value {
	Value::String(date.format(ISO_FORMAT).to_string())
}

impl FieldKind for DateField {
	fn kind_name(&self) -> &str {
		"date"
	}

	fn default_input_options(&self, ctx: &FieldContext<'_>) -> OptionMap {
		let mut class = format!("{} date-time-picker date-input", ctx.settings.control_class);
		if !self.date_linked {
			class.push_str(" not-date-linked");
		}
		let mut options = base::input_options(ctx);
		options.insert("class".to_string(), Value::String(class));
		options.insert("pattern".to_string(), json!(DATE_PATTERN));
		options.insert("id".to_string(), Value::String(ctx.id.clone()));
		options
	}

	fn default_widget_options(&self, _ctx: &FieldContext<'_>) -> OptionMap {
		let mut options = option_map(json!({
			"format": PICKER_FORMAT,
			"showTodayButton": false,
			"showClear": false,
			"useCurrent": "hour",
		}));

		if !self.disabled_dates.is_empty() {
			options.insert(
				"disabledDates".to_string(),
				Value::Array(self.disabled_dates.iter().map(iso).collect()),
			);
		}
		if let Some(date) = &self.min_date {
			options.insert("minDate".to_string(), iso(date));
		}
		if let Some(date) = &self.max_date {
			options.insert("maxDate".to_string(), iso(date));
		}
		if let Some(locale) = self.locale.as_deref().filter(|l| !l.trim().is_empty()) {
			options.insert("locale".to_string(), json!(locale));
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
		if !attrs.contains_key("value")
			&& let Some(text) = ctx.value.as_ref().and_then(display_date)
		{
			attrs.insert("value".to_string(), Value::String(text));
		}
		let control = render_input(ctx, &attrs, "text", false, template);
		self.input_group(template).wrap(control, template)
	}
}
