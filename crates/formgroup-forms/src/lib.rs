//! Form group rendering
//!
//! This crate renders one form field at a time as a complete, framework-styled
//! fragment: label, control, hint and validation feedback. It provides:
//! - Option resolution that splits a loose per-field options mapping into
//!   wrapper, label, hint, input and feedback configurations
//! - Field kinds that contribute their own defaults and control markup
//! - Vertical, horizontal and inline layout composition
//! - Validation state, required marking and ARIA wiring from a bound record
//! - The enclosing `<form>` tag with default ids and remote form numbering
//!
//! ```
//! use formgroup_forms::{Layout, RenderSession};
//! use formgroup_forms::record::Record;
//! use serde_json::json;
//!
//! let session = RenderSession::new();
//! let user = Record::new("user").with_value("name", json!("Ada"));
//! let form = session.builder("user", Some(&user), Layout::Vertical);
//!
//! let html = form.text_field("name", json!({"hint": "As on your passport"})).unwrap();
//! assert!(html.as_str().starts_with("<div class=\"form-group\"><label for=\"user_name\">Name</label>"));
//! assert!(html.as_str().contains("aria-describedby=\"user_name_hint\""));
//! ```

pub mod builder;
pub mod compose;
pub mod error;
pub mod error_display;
pub mod field_kind;
pub mod fields;
pub mod form_input;
pub mod form_tag;
pub mod html;
pub mod identifier;
pub mod layout;
pub mod options;
pub mod record;
pub mod session;
pub mod settings;
pub mod validation;

pub use builder::FormBuilder;
pub use compose::Composer;
pub use error::{FormGroupError, FormGroupResult};
pub use error_display::{ErrorDisplayGuard, ErrorDisplayHook, ErrorDisplayMode};
pub use field_kind::{FieldContext, FieldKind, FieldKindRegistry};
pub use fields::{CheckBox, DateField, InputType, SelectField, TextArea, TextField};
pub use form_input::FormInput;
pub use form_tag::{FormSubject, FormTagOptions, form_with};
pub use html::{HtmlTemplate, Markup, Templating};
pub use layout::{LabelPosition, Layout};
pub use options::{OptionMap, OptionValue, ResolvedOptions};
pub use record::{FormRecord, Persistence, Record, ValidationErrors, ValidatorKind};
pub use session::{RemoteFormState, RenderSession};
pub use settings::FormSettings;
pub use validation::ValidationState;
