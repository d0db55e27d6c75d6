//! # Formgroup
//!
//! Framework-styled form group rendering.
//!
//! A form group is everything one field needs on a page: a label, the input
//! control, an optional hint and validation feedback, arranged for a vertical,
//! horizontal or inline layout. Formgroup builds that fragment from a single
//! loosely structured options mapping, filling in per-kind defaults, required
//! marking, validation state classes and ARIA wiring from a bound record.
//!
//! ## Quick Example
//!
//! ```rust
//! use formgroup::prelude::*;
//! use serde_json::json;
//!
//! let session = RenderSession::new();
//! let user = Record::new("user")
//!     .with_validator("email", ValidatorKind::Presence)
//!     .with_error("email", "is invalid");
//!
//! let html = form_with(&session, FormTagOptions::model(&user).with_url("/users"), |form| {
//!     form.email_field("email", json!({"hint": "We never share it"}))
//! })
//! .unwrap();
//!
//! assert!(html.as_str().contains("class=\"form-control is-invalid\""));
//! assert!(html.as_str().contains("<div class=\"invalid-feedback\">is invalid</div>"));
//! ```
//!
//! ## Crates
//!
//! - [`forms`]: option resolution, field kinds, composition and the form tag

pub use formgroup_forms as forms;

// Re-export the rendering entry points
pub use formgroup_forms::{
	FormBuilder, FormGroupError, FormGroupResult, FormInput, FormSettings, FormSubject,
	FormTagOptions, Layout, Markup, RenderSession, form_with,
};

// Re-export the extension points
pub use formgroup_forms::{
	FieldContext, FieldKind, FieldKindRegistry, FormRecord, HtmlTemplate, OptionMap, Templating,
};

pub mod prelude {
	// Rendering
	pub use crate::{
		FormBuilder, FormGroupError, FormGroupResult, FormSettings, FormTagOptions, Layout, Markup,
		RenderSession, form_with,
	};

	// Records
	pub use formgroup_forms::{FormRecord, Persistence, Record, ValidationErrors, ValidatorKind};

	// Field kinds
	pub use formgroup_forms::{
		CheckBox, DateField, FieldContext, FieldKind, InputType, SelectField, TextArea, TextField,
	};
}
