//! Per-page rendering state

use crate::builder::FormBuilder;
use crate::error_display::ErrorDisplayHook;
use crate::field_kind::FieldKindRegistry;
use crate::html::{HtmlTemplate, Templating};
use crate::layout::Layout;
use crate::record::FormRecord;
use crate::settings::FormSettings;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Index source for remote forms rendered in one session
#[derive(Debug, Default)]
pub struct RemoteFormState {
	next_index: AtomicUsize,
}

impl RemoteFormState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Hand out the next index: `0`, `1`, `2`, ...
	pub fn next_index(&self) -> usize {
		self.next_index.fetch_add(1, Ordering::Relaxed)
	}
}

/// Everything one page render needs: settings, templating, field kinds, the
/// remote form counter and the error-display hook.
///
/// Sessions are not shared between page renders.
///
/// # Examples
///
/// ```
/// use formgroup_forms::RenderSession;
///
/// let session = RenderSession::new();
/// assert_eq!(session.remote_forms().next_index(), 0);
/// assert_eq!(session.remote_forms().next_index(), 1);
/// ```
pub struct RenderSession {
	settings: Arc<FormSettings>,
	template: Arc<dyn Templating>,
	registry: Arc<FieldKindRegistry>,
	remote_forms: RemoteFormState,
	error_display: ErrorDisplayHook,
}

impl RenderSession {
	/// A session with default settings, plain HTML output and the built-in kinds
	pub fn new() -> Self {
		Self::with_settings(FormSettings::default())
	}

	pub fn with_settings(settings: FormSettings) -> Self {
		let error_display = ErrorDisplayHook::new(settings.error_wrapper_class.clone());
		Self {
			settings: Arc::new(settings),
			template: Arc::new(HtmlTemplate::new()),
			registry: Arc::new(FieldKindRegistry::with_builtin_kinds()),
			remote_forms: RemoteFormState::new(),
			error_display,
		}
	}

	pub fn with_template(mut self, template: Arc<dyn Templating>) -> Self {
		self.template = template;
		self
	}

	/// Share a registry across sessions
	pub fn with_registry(mut self, registry: Arc<FieldKindRegistry>) -> Self {
		self.registry = registry;
		self
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn template(&self) -> &dyn Templating {
		self.template.as_ref()
	}

	pub fn registry(&self) -> &FieldKindRegistry {
		&self.registry
	}

	pub fn remote_forms(&self) -> &RemoteFormState {
		&self.remote_forms
	}

	pub fn error_display(&self) -> &ErrorDisplayHook {
		&self.error_display
	}

	/// A builder for fields named under `scope`, bound to `record` if any
	pub fn builder<'a>(
		&'a self,
		scope: impl Into<String>,
		record: Option<&'a dyn FormRecord>,
		layout: Layout,
	) -> FormBuilder<'a> {
		FormBuilder::new(self, scope, record, layout)
	}
}

impl Default for RenderSession {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for RenderSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenderSession")
			.field("settings", &self.settings)
			.field("registry", &self.registry)
			.field("remote_forms", &self.remote_forms)
			.field("error_display", &self.error_display)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error_display::ErrorDisplayMode;
	use rstest::rstest;

	#[rstest]
	fn test_sessions_count_independently() {
		let first = RenderSession::new();
		let second = RenderSession::new();

		assert_eq!(first.remote_forms().next_index(), 0);
		assert_eq!(first.remote_forms().next_index(), 1);
		assert_eq!(second.remote_forms().next_index(), 0);
	}

	#[rstest]
	fn test_hook_uses_configured_wrapper_class() {
		// Arrange
		let mut settings = FormSettings::default();
		settings.error_wrapper_class = "has-error".to_string();
		let session = RenderSession::with_settings(settings);

		// Act
		let html = session.error_display().decorate(
			crate::html::Markup::raw("<input />"),
			true,
			session.template(),
		);

		// Assert
		assert_eq!(session.error_display().mode(), ErrorDisplayMode::Wrap);
		assert_eq!(html.as_str(), "<div class=\"has-error\"><input /></div>");
	}
}
