//! HTML markup and the templating primitive
//!
//! Everything the engine emits passes through [`Templating`], which escapes
//! attribute values and text content. Fragments that are already rendered
//! (controls, labels, hints) travel as [`Markup`] and are never escaped twice.
//!
//! Escaped characters:
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`

use crate::options::OptionMap;
use serde_json::Value;
use std::fmt;
use std::ops::Add;

/// Escape HTML special characters in text content
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Escape HTML attribute values
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::escape_html_attr;
///
/// let escaped = escape_html_attr("a\" onclick=\"alert(1)");
/// assert!(!escaped.contains('"'));
/// ```
pub fn escape_html_attr(input: &str) -> String {
	escape_html(input).replace('\n', "&#10;").replace('\r', "&#13;")
}

/// An already-rendered, already-escaped HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
	/// An empty fragment
	pub fn new() -> Self {
		Self(String::new())
	}

	/// Wrap trusted HTML without escaping it
	pub fn raw(html: impl Into<String>) -> Self {
		Self(html.into())
	}

	/// Escape plain text into a fragment
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::Markup;
	///
	/// assert_eq!(Markup::text("a < b").as_str(), "a &lt; b");
	/// ```
	pub fn text(text: &str) -> Self {
		Self(escape_html(text))
	}

	pub fn push(&mut self, other: &Markup) {
		self.0.push_str(&other.0);
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl Add for Markup {
	type Output = Markup;

	fn add(mut self, rhs: Markup) -> Markup {
		self.0.push_str(&rhs.0);
		self
	}
}

impl fmt::Display for Markup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Tag-building primitive the engine renders through.
///
/// Implementations must escape attribute values; `content` is trusted markup.
pub trait Templating: Send + Sync {
	/// Render `<name attrs>content</name>`
	fn content_tag(&self, name: &str, content: &Markup, attrs: &OptionMap) -> Markup;

	/// Render a self-closing `<name attrs />`
	fn void_tag(&self, name: &str, attrs: &OptionMap) -> Markup;
}

/// Default [`Templating`] implementation producing plain HTML strings
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTemplate;

impl HtmlTemplate {
	pub fn new() -> Self {
		Self
	}
}

impl Templating for HtmlTemplate {
	fn content_tag(&self, name: &str, content: &Markup, attrs: &OptionMap) -> Markup {
		if !is_valid_tag_name(name) {
			tracing::trace!(tag = %name, "dropping element with unsafe tag name");
			return content.clone();
		}
		Markup(format!(
			"<{name}{}>{}</{name}>",
			render_attributes(attrs),
			content.as_str()
		))
	}

	fn void_tag(&self, name: &str, attrs: &OptionMap) -> Markup {
		if !is_valid_tag_name(name) {
			tracing::trace!(tag = %name, "dropping element with unsafe tag name");
			return Markup::new();
		}
		Markup(format!("<{name}{} />", render_attributes(attrs)))
	}
}

/// Render an attribute mapping as ` key="value"` pairs in key order.
///
/// `true` renders as `key="key"`, `false` and `null` drop the attribute,
/// arrays are space-joined and `data`/`aria` mappings expand to prefixed
/// attributes.
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::render_attributes;
/// use serde_json::json;
///
/// let attrs = json!({"class": "form-control", "required": true, "readonly": false});
/// let rendered = render_attributes(attrs.as_object().unwrap());
/// assert_eq!(rendered, r#" class="form-control" required="required""#);
/// ```
pub fn render_attributes(attrs: &OptionMap) -> String {
	let mut html = String::new();
	for (name, value) in attrs {
		push_attribute(&mut html, name, value, true);
	}
	html
}

fn push_attribute(html: &mut String, name: &str, value: &Value, expand: bool) {
	if !is_valid_attribute_name(name) {
		tracing::trace!(attribute = %name, "skipping attribute with unsafe name");
		return;
	}

	let text = match value {
		Value::Null | Value::Bool(false) => return,
		Value::Bool(true) if expand => name.to_string(),
		Value::Bool(true) => "true".to_string(),
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Array(items) if expand => items
			.iter()
			.filter_map(scalar_text)
			.collect::<Vec<_>>()
			.join(" "),
		Value::Object(map) if expand && (name == "data" || name == "aria") => {
			for (key, nested) in map {
				push_attribute(html, &format!("{name}-{key}"), nested, false);
			}
			return;
		}
		Value::Array(_) | Value::Object(_) => value.to_string(),
	};

	html.push_str(&format!(" {}=\"{}\"", name, escape_html_attr(&text)));
}

fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(true) => Some("true".to_string()),
		_ => None,
	}
}

/// Whether `name` is safe to emit as an element name
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::is_valid_tag_name;
///
/// assert!(is_valid_tag_name("small"));
/// assert!(is_valid_tag_name("turbo-frame"));
/// assert!(!is_valid_tag_name("script><img"));
/// ```
pub fn is_valid_tag_name(name: &str) -> bool {
	name.starts_with(|c: char| c.is_ascii_alphabetic())
		&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_attribute_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Join class sources in order, dropping blanks and repeated tokens.
///
/// Each source may be a space-separated string or a list of strings.
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::merge_classes;
/// use serde_json::json;
///
/// let a = json!("form-control  wide");
/// let b = json!(["wide", "", "form-control", "tall"]);
/// assert_eq!(merge_classes([Some(&a), None, Some(&b)]), "form-control wide tall");
/// ```
pub fn merge_classes<'a>(sources: impl IntoIterator<Item = Option<&'a Value>>) -> String {
	let mut tokens: Vec<String> = Vec::new();
	for source in sources.into_iter().flatten() {
		let parts: Vec<String> = match source {
			Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
			Value::Array(items) => items
				.iter()
				.filter_map(Value::as_str)
				.flat_map(str::split_whitespace)
				.map(str::to_string)
				.collect(),
			_ => Vec::new(),
		};
		for part in parts {
			if !tokens.contains(&part) {
				tokens.push(part);
			}
		}
	}
	tokens.join(" ")
}

/// Replace one whole class token, leaving partial matches untouched.
///
/// # Examples
///
/// ```
/// use formgroup_forms::html::replace_class_token;
///
/// assert_eq!(
///     replace_class_token("form-control form-control-lg", "form-control", "form-control-plaintext"),
///     "form-control-plaintext form-control-lg"
/// );
/// ```
pub fn replace_class_token(classes: &str, from: &str, to: &str) -> String {
	classes
		.split_whitespace()
		.map(|token| if token == from { to } else { token })
		.collect::<Vec<_>>()
		.join(" ")
}
