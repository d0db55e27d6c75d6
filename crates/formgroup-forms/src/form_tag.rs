//! The enclosing `<form>` tag
//!
//! [`form_with`] renders the form element around a block of form groups. It
//! adds the client-side validation hooks, derives a default id from the form
//! subject and numbers remote forms within the session.

use crate::builder::FormBuilder;
use crate::error::{FormGroupError, FormGroupResult};
use crate::html::{Markup, merge_classes};
use crate::layout::Layout;
use crate::options::{OptionMap, non_blank_str};
use crate::record::{FormRecord, Persistence};
use crate::session::RenderSession;
use serde_json::Value;

/// What a form is about: a bare naming scope or a record
#[derive(Clone, Copy)]
pub enum FormSubject<'a> {
	Scope(&'a str),
	Record(&'a dyn FormRecord),
}

impl<'a> FormSubject<'a> {
	/// Default form id: the scope itself, `new_<model>` or `edit_<model>_<param>`
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::form_tag::FormSubject;
	/// use formgroup_forms::record::Record;
	///
	/// let post = Record::new("post").persisted("42");
	/// assert_eq!(FormSubject::Record(&post).default_id().unwrap(), "edit_post_42");
	/// assert_eq!(FormSubject::Scope("search").default_id().unwrap(), "search");
	/// ```
	pub fn default_id(&self) -> FormGroupResult<String> {
		match self {
			FormSubject::Scope(scope) => Ok((*scope).to_string()),
			FormSubject::Record(record) => match record.persistence() {
				Some(Persistence::New) => Ok(format!("new_{}", record.model_name())),
				Some(Persistence::Persisted(param)) => {
					Ok(format!("edit_{}_{}", record.model_name(), param))
				}
				None => Err(FormGroupError::UnresolvableSubject(
					record.model_name().to_string(),
				)),
			},
		}
	}

	/// Naming scope handed to the form builder
	pub fn scope(&self) -> &'a str {
		match *self {
			FormSubject::Scope(scope) => scope,
			FormSubject::Record(record) => record.model_name(),
		}
	}

	pub fn record(&self) -> Option<&'a dyn FormRecord> {
		match *self {
			FormSubject::Scope(_) => None,
			FormSubject::Record(record) => Some(record),
		}
	}
}

impl std::fmt::Debug for FormSubject<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FormSubject::Scope(scope) => f.debug_tuple("Scope").field(scope).finish(),
			FormSubject::Record(record) => {
				f.debug_tuple("Record").field(&record.model_name()).finish()
			}
		}
	}
}

/// Options of the enclosing form tag
#[derive(Debug, Clone)]
pub struct FormTagOptions<'a> {
	pub subject: FormSubject<'a>,
	/// Falls back to the session's default layout
	pub layout: Option<Layout>,
	pub class: Option<String>,
	pub id: Option<String>,
	pub remote: bool,
	/// Extra form attributes; `html.id` is used when `id` is unset
	pub html: OptionMap,
	pub url: Option<String>,
	pub method: Option<String>,
}

impl<'a> FormTagOptions<'a> {
	pub fn new(subject: FormSubject<'a>) -> Self {
		Self {
			subject,
			layout: None,
			class: None,
			id: None,
			remote: false,
			html: OptionMap::new(),
			url: None,
			method: None,
		}
	}

	pub fn scope(scope: &'a str) -> Self {
		Self::new(FormSubject::Scope(scope))
	}

	pub fn model(record: &'a dyn FormRecord) -> Self {
		Self::new(FormSubject::Record(record))
	}

	pub fn with_layout(mut self, layout: Layout) -> Self {
		self.layout = Some(layout);
		self
	}

	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn remote(mut self) -> Self {
		self.remote = true;
		self
	}

	pub fn with_html(mut self, html: OptionMap) -> Self {
		self.html = html;
		self
	}

	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.method = Some(method.into());
		self
	}
}

/// Render a `<form>` around the groups produced by `block`
///
/// The host error wrapper stays suppressed for the whole block.
///
/// # Examples
///
/// ```
/// use formgroup_forms::form_tag::{FormTagOptions, form_with};
/// use formgroup_forms::record::Record;
/// use formgroup_forms::RenderSession;
/// use serde_json::json;
///
/// let session = RenderSession::new();
/// let user = Record::new("user");
/// let html = form_with(&session, FormTagOptions::model(&user).with_url("/users"), |form| {
///     form.text_field("name", json!({}))
/// })
/// .unwrap();
/// assert!(html.as_str().starts_with("<form action=\"/users\" class=\"needs-validation\" id=\"new_user\""));
/// ```
pub fn form_with<F>(
	session: &RenderSession,
	options: FormTagOptions<'_>,
	block: F,
) -> FormGroupResult<Markup>
where
	F: FnOnce(&FormBuilder<'_>) -> FormGroupResult<Markup>,
{
	let settings = session.settings();
	let layout = options.layout.unwrap_or(settings.default_layout);
	let mut html = options.html;

	let extra_class =
		(layout == Layout::Inline).then(|| Value::String(settings.inline_form_class.clone()));
	let caller_class = options.class.map(Value::String);
	let class = merge_classes([
		caller_class.as_ref(),
		Some(&Value::String(settings.form_class.clone())),
		extra_class.as_ref(),
	]);

	html.insert("novalidate".to_string(), Value::Bool(true));
	if let Some(hook) = &settings.validate_onsubmit {
		html.insert("onsubmit".to_string(), Value::String(hook.clone()));
	}

	let mut default_id = options.subject.default_id()?;

	if options.remote {
		let index = session.remote_forms().next_index();
		match html.get_mut("data") {
			Some(Value::Object(data)) => {
				data.insert("remote".to_string(), Value::Bool(true));
				data.insert("remote-index".to_string(), Value::from(index));
			}
			_ => {
				html.insert("data-remote".to_string(), Value::String("true".to_string()));
				html.insert("data-remote-index".to_string(), Value::from(index));
			}
		}
		default_id = format!("{default_id}_{index}");
	}

	let html_id = html
		.remove("id")
		.and_then(|id| non_blank_str(Some(&id)).map(str::to_string));
	let id = options.id.or(html_id).unwrap_or(default_id);

	html.insert("class".to_string(), Value::String(class));
	html.insert("id".to_string(), Value::String(id.clone()));
	if let Some(url) = options.url {
		html.insert("action".to_string(), Value::String(url));
	}
	let method = options.method.unwrap_or_else(|| "post".to_string());
	html.insert("method".to_string(), Value::String(method));

	let content = {
		let _guard = session.error_display().suppress();
		let builder = FormBuilder::new(
			session,
			options.subject.scope(),
			options.subject.record(),
			layout,
		);
		block(&builder)?
	};

	tracing::debug!(form = %id, layout = %layout, remote = options.remote, "rendered form tag");

	Ok(session.template().content_tag("form", &content, &html))
}
