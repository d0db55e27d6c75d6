//! Host error-display override
//!
//! Host templating layers usually wrap an erroring control in their own
//! error container. While this engine renders, that wrapping is switched off
//! so the form group's feedback is the only error presentation. The switch is
//! held by an [`ErrorDisplayGuard`] and undone when the guard drops.

use crate::html::{Markup, Templating};
use crate::options::option_map;
use parking_lot::Mutex;
use serde_json::json;

/// How the host presents a control that has errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDisplayMode {
	/// Wrap the control in the host error container
	#[default]
	Wrap,
	/// Emit the control unchanged
	Passthrough,
}

/// Per-session error-display toggle
#[derive(Debug)]
pub struct ErrorDisplayHook {
	mode: Mutex<ErrorDisplayMode>,
	wrapper_class: String,
}

impl ErrorDisplayHook {
	pub fn new(wrapper_class: impl Into<String>) -> Self {
		Self {
			mode: Mutex::new(ErrorDisplayMode::Wrap),
			wrapper_class: wrapper_class.into(),
		}
	}

	pub fn mode(&self) -> ErrorDisplayMode {
		*self.mode.lock()
	}

	/// Switch to [`ErrorDisplayMode::Passthrough`] until the guard drops
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::error_display::{ErrorDisplayHook, ErrorDisplayMode};
	///
	/// let hook = ErrorDisplayHook::new("field_with_errors");
	/// {
	///     let _guard = hook.suppress();
	///     assert_eq!(hook.mode(), ErrorDisplayMode::Passthrough);
	/// }
	/// assert_eq!(hook.mode(), ErrorDisplayMode::Wrap);
	/// ```
	pub fn suppress(&self) -> ErrorDisplayGuard<'_> {
		let previous = std::mem::replace(&mut *self.mode.lock(), ErrorDisplayMode::Passthrough);
		ErrorDisplayGuard {
			hook: self,
			previous,
		}
	}

	/// Apply the host's error presentation to a rendered control
	pub fn decorate(&self, control: Markup, has_error: bool, template: &dyn Templating) -> Markup {
		if !has_error || self.mode() == ErrorDisplayMode::Passthrough {
			return control;
		}
		template.content_tag(
			"div",
			&control,
			&option_map(json!({"class": self.wrapper_class})),
		)
	}
}

impl Default for ErrorDisplayHook {
	fn default() -> Self {
		Self::new("field_with_errors")
	}
}

/// Restores the previous [`ErrorDisplayMode`] on drop
#[must_use = "the override is released as soon as the guard is dropped"]
pub struct ErrorDisplayGuard<'a> {
	hook: &'a ErrorDisplayHook,
	previous: ErrorDisplayMode,
}

impl Drop for ErrorDisplayGuard<'_> {
	fn drop(&mut self) {
		*self.hook.mode.lock() = self.previous;
	}
}
