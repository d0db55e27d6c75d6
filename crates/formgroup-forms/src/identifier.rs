//! DOM identifier derivation
//!
//! Ids are derived from the builder's scope name and the field name, so the
//! label's `for`, the control's `id` and the hint's `id` always agree.

use regex::Regex;
use std::sync::OnceLock;

fn forbidden_run() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"(?:\]\[|[^-a-zA-Z0-9:.])+").expect("valid regex"))
}

/// Replace every run of characters outside `[-a-zA-Z0-9:.]` (including `][`)
/// with `_`, then strip one trailing `_`.
///
/// # Examples
///
/// ```
/// use formgroup_forms::identifier::sanitize_scope;
///
/// assert_eq!(sanitize_scope("user[address][city]"), "user_address_city");
/// assert_eq!(sanitize_scope("order"), "order");
/// ```
pub fn sanitize_scope(scope: &str) -> String {
	let replaced = forbidden_run().replace_all(scope, "_");
	match replaced.strip_suffix('_') {
		Some(stripped) => stripped.to_string(),
		None => replaced.into_owned(),
	}
}

/// Strip the trailing `?` of predicate-style field names
pub fn sanitize_field(field: &str) -> &str {
	field.strip_suffix('?').unwrap_or(field)
}

/// Derive the DOM id for `field` inside `scope`
///
/// # Examples
///
/// ```
/// use formgroup_forms::identifier::derive_id;
///
/// assert_eq!(derive_id("email", "user"), "user_email");
/// assert_eq!(derive_id("active?", ""), "active");
/// assert_eq!(derive_id("city", "user[address]"), "user_address_city");
/// ```
pub fn derive_id(field: &str, scope: &str) -> String {
	if scope.is_empty() {
		sanitize_field(field).to_string()
	} else {
		format!("{}_{}", sanitize_scope(scope), sanitize_field(field))
	}
}

/// The id of the hint element attached to a field
pub fn hint_id(field_id: &str) -> String {
	format!("{field_id}_hint")
}

/// The `name` attribute for `field` inside `scope`
///
/// # Examples
///
/// ```
/// use formgroup_forms::identifier::field_name;
///
/// assert_eq!(field_name("email", "user"), "user[email]");
/// assert_eq!(field_name("q", ""), "q");
/// ```
pub fn field_name(field: &str, scope: &str) -> String {
	if scope.is_empty() {
		sanitize_field(field).to_string()
	} else {
		format!("{}[{}]", scope, sanitize_field(field))
	}
}
