//! Option resolution
//!
//! A caller passes one loosely structured mapping per field. [`resolve`]
//! splits it into the five namespaces a form group is built from and merges
//! each with the field kind's defaults:
//!
//! | key          | namespace                                        |
//! |--------------|--------------------------------------------------|
//! | `wrapper`    | group container attributes                       |
//! | `label`      | label text and attributes                        |
//! | `hint`       | hint tag, text and attributes                    |
//! | `feedback`   | `valid` / `invalid` feedback attributes          |
//! | `input_html` | control attributes, overriding top-level keys    |
//! | `input_js`   | client-side widget options                       |
//! | anything else| control attributes                               |
//!
//! `wrapper`, `label`, `hint` and `feedback` accept `false` (suppress), `true`
//! or nothing (use the default), text (override the default's `text`) or a
//! mapping (caller keys win, missing keys come from the default).

use crate::error::{FormGroupError, FormGroupResult};
use crate::field_kind::{FieldContext, FieldKind};
use crate::html::{is_valid_tag_name, merge_classes, replace_class_token};
use crate::identifier::field_name;
use serde_json::Value;

/// Attribute mapping used for every namespace
pub type OptionMap = serde_json::Map<String, Value>;

/// Top-level keys that name a namespace rather than a control attribute
pub const NAMESPACE_KEYS: [&str; 6] = [
	"wrapper",
	"feedback",
	"label",
	"hint",
	"input_html",
	"input_js",
];

/// Control attribute carrying the JSON-encoded widget options
pub const WIDGET_OPTIONS_ATTRIBUTE: &str = "data-input-js-options";

/// Unwrap a JSON object, treating anything else as empty
pub fn option_map(value: Value) -> OptionMap {
	match value {
		Value::Object(map) => map,
		_ => OptionMap::new(),
	}
}

/// What the caller asked for in one namespace
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	/// `false`: render nothing for this namespace
	Suppressed,
	/// absent or `true`: take the kind's default
	UseDefault,
	/// text: the default with its `text` replaced
	TextOverride(String),
	/// mapping: caller keys, missing keys filled from the default
	MapOverride(OptionMap),
}

impl OptionValue {
	/// Classify a raw namespace value
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::options::OptionValue;
	/// use serde_json::json;
	///
	/// assert_eq!(OptionValue::parse("label", Some(&json!(false))).unwrap(), OptionValue::Suppressed);
	/// assert_eq!(OptionValue::parse("label", None).unwrap(), OptionValue::UseDefault);
	/// assert!(OptionValue::parse("label", Some(&json!(3))).is_err());
	/// ```
	pub fn parse(namespace: &str, value: Option<&Value>) -> FormGroupResult<Self> {
		match value {
			None | Some(Value::Null) | Some(Value::Bool(true)) => Ok(Self::UseDefault),
			Some(Value::Bool(false)) => Ok(Self::Suppressed),
			Some(Value::String(text)) => Ok(Self::TextOverride(text.clone())),
			Some(Value::Object(map)) => Ok(Self::MapOverride(map.clone())),
			Some(other) => Err(FormGroupError::invalid_shape(namespace, other)),
		}
	}
}

/// Combine a caller value with a namespace default
///
/// A `None` default means the kind suppresses the namespace; the caller can
/// still enable it with text or a mapping.
///
/// # Examples
///
/// ```
/// use formgroup_forms::options::{OptionValue, merge_default, option_map};
/// use serde_json::json;
///
/// let default = option_map(json!({"class": "col-sm-2"}));
/// let merged = merge_default(OptionValue::TextOverride("Full name".into()), Some(default));
/// assert_eq!(merged, Some(option_map(json!({"class": "col-sm-2", "text": "Full name"}))));
/// ```
pub fn merge_default(value: OptionValue, default: Option<OptionMap>) -> Option<OptionMap> {
	match value {
		OptionValue::Suppressed => None,
		OptionValue::UseDefault => default,
		OptionValue::TextOverride(text) => {
			let mut merged = default.unwrap_or_default();
			merged.insert("text".to_string(), Value::String(text));
			Some(merged)
		}
		OptionValue::MapOverride(mut map) => {
			fill_missing(&mut map, default.unwrap_or_default());
			Some(map)
		}
	}
}

/// Insert every default key the target does not already have
fn fill_missing(target: &mut OptionMap, defaults: OptionMap) {
	for (key, value) in defaults {
		target.entry(key).or_insert(value);
	}
}

/// The five sub-configurations a form group renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
	/// Group container attributes, `None` for no container
	pub wrapper: Option<OptionMap>,
	/// Label text and attributes, `None` when suppressed
	pub label: Option<OptionMap>,
	/// Hint tag, text and attributes, `None` when suppressed
	pub hint: Option<OptionMap>,
	/// Control attributes
	pub input: OptionMap,
	/// `valid`/`invalid` feedback attributes, `None` when suppressed
	pub feedback: Option<OptionMap>,
}

impl ResolvedOptions {
	pub fn feedback_enabled(&self) -> bool {
		self.feedback.is_some()
	}

	/// Hint text, when a hint will actually render
	pub fn hint_text(&self) -> Option<&str> {
		self.hint.as_ref().and_then(|hint| non_blank_str(hint.get("text")))
	}
}

/// Caller options split by namespace
struct Partitioned {
	wrapper: Option<Value>,
	feedback: Option<Value>,
	label: Option<Value>,
	hint: Option<Value>,
	input_html: Option<Value>,
	input_js: Option<Value>,
	residual: OptionMap,
}

fn partition(raw: &OptionMap) -> Partitioned {
	let mut residual = raw.clone();
	let [wrapper, feedback, label, hint, input_html, input_js] =
		NAMESPACE_KEYS.map(|key| residual.remove(key));

	Partitioned {
		wrapper,
		feedback,
		label,
		hint,
		input_html,
		input_js,
		residual,
	}
}

/// Mapping-only namespaces: absent, `null` or `true` mean empty
fn mapping_namespace(namespace: &str, value: Option<Value>) -> FormGroupResult<OptionMap> {
	match value {
		None | Some(Value::Null) | Some(Value::Bool(true)) => Ok(OptionMap::new()),
		Some(Value::Object(map)) => Ok(map),
		Some(other) => Err(FormGroupError::invalid_shape(namespace, &other)),
	}
}

/// Resolve caller options for one field against `kind`'s defaults
///
/// `html_options`, when given, replaces the top-level residual keys as the
/// source of control attributes (used by helpers whose top-level options
/// mean something else, such as select choices configuration).
pub fn resolve(
	raw: &OptionMap,
	html_options: Option<&OptionMap>,
	kind: &dyn FieldKind,
	ctx: &FieldContext<'_>,
) -> FormGroupResult<ResolvedOptions> {
	let parts = partition(raw);

	let wrapper = merge_default(
		OptionValue::parse("wrapper", parts.wrapper.as_ref())?,
		kind.default_wrapper_options(ctx),
	);
	let feedback = merge_default(
		OptionValue::parse("feedback", parts.feedback.as_ref())?,
		kind.default_feedback_options(ctx),
	);
	let label = merge_default(
		OptionValue::parse("label", parts.label.as_ref())?,
		kind.default_label_options(ctx),
	);
	let hint = merge_default(
		OptionValue::parse("hint", parts.hint.as_ref())?,
		kind.default_hint_options(ctx),
	);
	check_hint_tag(hint.as_ref())?;

	let mut input = match html_options {
		Some(html) => html.clone(),
		None => parts.residual,
	};
	let input_html = mapping_namespace("input_html", parts.input_html)?;
	let input_js = mapping_namespace("input_js", parts.input_js)?;

	merge_input(&mut input, input_html, kind.default_input_options(ctx));
	merge_widget_options(&mut input, input_js, kind.default_widget_options(ctx))?;

	let mut resolved = ResolvedOptions {
		wrapper,
		label,
		hint,
		input,
		feedback,
	};
	apply_validation_state(&mut resolved, ctx);
	apply_hint_reference(&mut resolved);
	apply_identity(&mut resolved.input, ctx);

	tracing::trace!(
		field = %ctx.name,
		kind = kind.kind_name(),
		layout = %ctx.layout,
		"resolved form group options"
	);

	Ok(resolved)
}

/// The hint element name must be a plain tag name
fn check_hint_tag(hint: Option<&OptionMap>) -> FormGroupResult<()> {
	match hint.and_then(|hint| hint.get("tag")) {
		None | Some(Value::Null) => Ok(()),
		Some(Value::String(tag)) if tag.trim().is_empty() || is_valid_tag_name(tag) => Ok(()),
		Some(Value::String(_)) => Err(FormGroupError::InvalidConfigShape {
			namespace: "hint.tag".to_string(),
			found: "an unsafe tag name",
		}),
		Some(other) => Err(FormGroupError::invalid_shape("hint.tag", other)),
	}
}

/// Layer `input_html` over the residual attributes, fill in kind defaults and
/// concatenate the three class sources in that order
fn merge_input(input: &mut OptionMap, mut input_html: OptionMap, mut defaults: OptionMap) {
	let residual_class = input.remove("class");
	let override_class = input_html.remove("class");
	let default_class = defaults.remove("class");

	input.extend(input_html);
	fill_missing(input, defaults);

	let class = merge_classes([
		residual_class.as_ref(),
		override_class.as_ref(),
		default_class.as_ref(),
	]);
	if !class.is_empty() {
		input.insert("class".to_string(), Value::String(class));
	}
}

fn merge_widget_options(
	input: &mut OptionMap,
	mut widget: OptionMap,
	defaults: OptionMap,
) -> FormGroupResult<()> {
	fill_missing(&mut widget, defaults);
	if !widget.is_empty() {
		let encoded = serde_json::to_string(&widget)?;
		input.insert(WIDGET_OPTIONS_ATTRIBUTE.to_string(), Value::String(encoded));
	}
	Ok(())
}

/// State classes, the required marker and readonly normalization
fn apply_validation_state(resolved: &mut ResolvedOptions, ctx: &FieldContext<'_>) {
	let feedback_enabled = resolved.feedback_enabled();
	let input = &mut resolved.input;

	if ctx.state.has_any_error && feedback_enabled {
		let marker = Value::String(
			if ctx.state.has_field_error {
				"is-invalid"
			} else {
				"is-valid"
			}
			.to_string(),
		);
		push_class(input, &marker);
	}

	// An explicit `required` from the caller, including `false`, is kept.
	if ctx.state.is_required && !input.contains_key("required") {
		input.insert("required".to_string(), Value::String("required".to_string()));
	}

	if is_truthy(input.get("readonly")) {
		input.insert("readonly".to_string(), Value::String("readonly".to_string()));
		let plaintext = input.get("class").and_then(Value::as_str).map(|class| {
			replace_class_token(
				class,
				&ctx.settings.control_class,
				&ctx.settings.plaintext_control_class,
			)
		});
		if let Some(class) = plaintext {
			input.insert("class".to_string(), Value::String(class));
		}
	}
}

fn push_class(input: &mut OptionMap, extra: &Value) {
	let class = merge_classes([input.get("class"), Some(extra)]);
	input.insert("class".to_string(), Value::String(class));
}

fn apply_hint_reference(resolved: &mut ResolvedOptions) {
	let Some(hint) = resolved.hint.as_ref() else {
		return;
	};
	if non_blank_str(hint.get("text")).is_none() {
		return;
	}
	if let Some(id) = non_blank_str(hint.get("id")) {
		resolved
			.input
			.entry("aria-describedby")
			.or_insert_with(|| Value::String(id.to_string()));
	}
}

fn apply_identity(input: &mut OptionMap, ctx: &FieldContext<'_>) {
	input
		.entry("id")
		.or_insert_with(|| Value::String(ctx.id.clone()));
	input
		.entry("name")
		.or_insert_with(|| Value::String(field_name(ctx.name, ctx.scope)));
}

fn is_truthy(value: Option<&Value>) -> bool {
	!matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}

pub(crate) fn non_blank_str(value: Option<&Value>) -> Option<&str> {
	value
		.and_then(Value::as_str)
		.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::TextField;
	use crate::layout::Layout;
	use crate::record::{Record, ValidatorKind};
	use crate::settings::FormSettings;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn settings() -> FormSettings {
		FormSettings::default()
	}

	fn resolve_with(
		settings: &FormSettings,
		record: Option<&Record>,
		layout: Layout,
		raw: Value,
	) -> FormGroupResult<ResolvedOptions> {
		let record = record.map(|r| r as &dyn crate::record::FormRecord);
		let ctx = FieldContext::new("name", "user", layout, settings, record);
		resolve(&option_map(raw), None, &TextField::text(), &ctx)
	}

	#[rstest]
	fn test_label_text_shorthand_keeps_default_attributes(settings: FormSettings) {
		// Act
		let resolved =
			resolve_with(&settings, None, Layout::Horizontal, json!({"label": "Full name"}))
				.unwrap();

		// Assert
		assert_eq!(
			resolved.label,
			Some(option_map(
				json!({"class": "col-sm-2 col-form-label", "text": "Full name"})
			))
		);
	}

	#[rstest]
	fn test_label_mapping_caller_wins(settings: FormSettings) {
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Horizontal,
			json!({"label": {"class": "custom", "title": "t"}}),
		)
		.unwrap();
		assert_eq!(
			resolved.label,
			Some(option_map(json!({"class": "custom", "title": "t"})))
		);
	}

	#[rstest]
	#[case("wrapper")]
	#[case("label")]
	#[case("hint")]
	#[case("feedback")]
	fn test_false_suppresses_namespace(settings: FormSettings, #[case] namespace: &str) {
		// Arrange
		let mut raw = OptionMap::new();
		raw.insert(namespace.to_string(), json!(false));

		// Act
		let resolved = resolve_with(&settings, None, Layout::Vertical, Value::Object(raw)).unwrap();

		// Assert
		let slot = match namespace {
			"wrapper" => &resolved.wrapper,
			"label" => &resolved.label,
			"hint" => &resolved.hint,
			_ => &resolved.feedback,
		};
		assert!(slot.is_none());
	}

	#[rstest]
	#[case(json!({"label": 5}), "label")]
	#[case(json!({"hint": ["a"]}), "hint")]
	#[case(json!({"wrapper": 1.5}), "wrapper")]
	#[case(json!({"input_html": "x"}), "input_html")]
	#[case(json!({"input_js": false}), "input_js")]
	fn test_invalid_shapes_are_rejected(
		settings: FormSettings,
		#[case] raw: Value,
		#[case] expected: &str,
	) {
		let err = resolve_with(&settings, None, Layout::Vertical, raw).unwrap_err();
		assert!(
			matches!(err, FormGroupError::InvalidConfigShape { ref namespace, .. } if namespace == expected)
		);
	}

	#[rstest]
	fn test_residual_keys_fold_into_input(settings: FormSettings) {
		// Act
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"placeholder": "Ada", "maxlength": 20}),
		)
		.unwrap();

		// Assert
		assert_eq!(resolved.input["placeholder"], json!("Ada"));
		assert_eq!(resolved.input["maxlength"], json!(20));
		assert_eq!(resolved.input["class"], json!("form-control"));
	}

	#[rstest]
	fn test_input_html_overrides_residual_and_classes_concatenate(settings: FormSettings) {
		// Act
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({
				"class": "wide form-control",
				"placeholder": "outer",
				"input_html": {"class": "tall", "placeholder": "inner"},
			}),
		)
		.unwrap();

		// Assert
		assert_eq!(resolved.input["placeholder"], json!("inner"));
		assert_eq!(resolved.input["class"], json!("wide form-control tall"));
	}

	#[rstest]
	fn test_html_options_replace_residual(settings: FormSettings) {
		// Arrange
		let ctx = FieldContext::new("name", "user", Layout::Vertical, &settings, None);
		let raw = option_map(json!({"include_blank": true}));
		let html = option_map(json!({"autofocus": true}));

		// Act
		let resolved = resolve(&raw, Some(&html), &TextField::text(), &ctx).unwrap();

		// Assert
		assert!(!resolved.input.contains_key("include_blank"));
		assert_eq!(resolved.input["autofocus"], json!(true));
	}

	#[rstest]
	fn test_widget_options_encoded_compactly(settings: FormSettings) {
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"input_js": {"format": "YYYY", "inline": true}}),
		)
		.unwrap();
		assert_eq!(
			resolved.input[WIDGET_OPTIONS_ATTRIBUTE],
			json!(r#"{"format":"YYYY","inline":true}"#)
		);
	}

	#[rstest]
	fn test_no_widget_attribute_without_widget_options(settings: FormSettings) {
		let resolved = resolve_with(&settings, None, Layout::Vertical, json!({})).unwrap();
		assert!(!resolved.input.contains_key(WIDGET_OPTIONS_ATTRIBUTE));
	}

	#[rstest]
	#[case(true, "is-invalid")]
	#[case(false, "is-valid")]
	fn test_state_class_when_record_has_errors(
		settings: FormSettings,
		#[case] field_in_error: bool,
		#[case] marker: &str,
	) {
		// Arrange
		let field = if field_in_error { "name" } else { "email" };
		let record = Record::new("user").with_error(field, "is wrong");

		// Act
		let resolved = resolve_with(&settings, Some(&record), Layout::Vertical, json!({})).unwrap();

		// Assert
		assert_eq!(resolved.input["class"], json!(format!("form-control {marker}")));
	}

	#[rstest]
	fn test_no_state_class_when_feedback_disabled(settings: FormSettings) {
		let record = Record::new("user").with_error("name", "is wrong");
		let resolved = resolve_with(&settings, Some(&record), Layout::Inline, json!({})).unwrap();
		assert_eq!(resolved.input["class"], json!("form-control"));
	}

	#[rstest]
	fn test_presence_validator_marks_required(settings: FormSettings) {
		let record = Record::new("user").with_validator("name", ValidatorKind::Presence);
		let resolved = resolve_with(&settings, Some(&record), Layout::Vertical, json!({})).unwrap();
		assert_eq!(resolved.input["required"], json!("required"));
	}

	#[rstest]
	fn test_explicit_required_false_wins_over_presence(settings: FormSettings) {
		let record = Record::new("user").with_validator("name", ValidatorKind::Presence);
		let resolved = resolve_with(
			&settings,
			Some(&record),
			Layout::Vertical,
			json!({"required": false}),
		)
		.unwrap();
		assert_eq!(resolved.input["required"], json!(false));
	}

	#[rstest]
	fn test_readonly_switches_to_plaintext(settings: FormSettings) {
		// Act
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"readonly": true, "class": "form-control-lg"}),
		)
		.unwrap();

		// Assert
		assert_eq!(resolved.input["readonly"], json!("readonly"));
		assert_eq!(
			resolved.input["class"],
			json!("form-control-lg form-control-plaintext")
		);
	}

	#[rstest]
	fn test_readonly_false_is_left_alone(settings: FormSettings) {
		let resolved =
			resolve_with(&settings, None, Layout::Vertical, json!({"readonly": false})).unwrap();
		assert_eq!(resolved.input["readonly"], json!(false));
		assert_eq!(resolved.input["class"], json!("form-control"));
	}

	#[rstest]
	fn test_hint_text_sets_aria_reference(settings: FormSettings) {
		let resolved =
			resolve_with(&settings, None, Layout::Vertical, json!({"hint": "8+ chars"})).unwrap();
		assert_eq!(resolved.input["aria-describedby"], json!("user_name_hint"));
		assert_eq!(resolved.hint_text(), Some("8+ chars"));
	}

	#[rstest]
	#[case(json!("script><img src=x onerror=alert(1)"), "an unsafe tag name")]
	#[case(json!("<p>"), "an unsafe tag name")]
	#[case(json!(["p"]), "a list")]
	fn test_unsafe_hint_tag_is_rejected(
		settings: FormSettings,
		#[case] tag: Value,
		#[case] found: &str,
	) {
		// Act
		let result = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"hint": {"text": "x", "tag": tag}}),
		);

		// Assert
		assert!(matches!(
			result,
			Err(FormGroupError::InvalidConfigShape { ref namespace, found: f })
				if namespace == "hint.tag" && f == found
		));
	}

	#[rstest]
	fn test_custom_hint_tag_is_kept(settings: FormSettings) {
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"hint": {"text": "x", "tag": "p"}}),
		)
		.unwrap();
		assert_eq!(resolved.hint.unwrap()["tag"], json!("p"));
	}

	#[rstest]
	fn test_hint_without_text_sets_no_reference(settings: FormSettings) {
		let resolved = resolve_with(&settings, None, Layout::Vertical, json!({})).unwrap();
		assert!(!resolved.input.contains_key("aria-describedby"));
	}

	#[rstest]
	fn test_caller_aria_reference_is_kept(settings: FormSettings) {
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Vertical,
			json!({"hint": "x", "aria-describedby": "elsewhere"}),
		)
		.unwrap();
		assert_eq!(resolved.input["aria-describedby"], json!("elsewhere"));
	}

	#[rstest]
	fn test_identity_attributes_filled_unless_given(settings: FormSettings) {
		let defaulted = resolve_with(&settings, None, Layout::Vertical, json!({})).unwrap();
		assert_eq!(defaulted.input["id"], json!("user_name"));
		assert_eq!(defaulted.input["name"], json!("user[name]"));

		let explicit =
			resolve_with(&settings, None, Layout::Vertical, json!({"id": "custom"})).unwrap();
		assert_eq!(explicit.input["id"], json!("custom"));
	}

	#[rstest]
	fn test_mapping_enables_kind_suppressed_namespace(settings: FormSettings) {
		let resolved = resolve_with(
			&settings,
			None,
			Layout::Inline,
			json!({"feedback": {"invalid": {"class": "tooltip"}}}),
		)
		.unwrap();
		assert_eq!(
			resolved.feedback,
			Some(option_map(json!({"invalid": {"class": "tooltip"}})))
		);
	}
}
