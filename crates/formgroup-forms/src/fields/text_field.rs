use crate::field_kind::{FieldContext, FieldKind};
use crate::fields::render_input;
use crate::html::{Markup, Templating};
use crate::options::OptionMap;

/// HTML input types rendered by [`TextField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
	Text,
	Email,
	Password,
	Number,
	Url,
	Tel,
	Search,
}

impl InputType {
	pub const ALL: [InputType; 7] = [
		InputType::Text,
		InputType::Email,
		InputType::Password,
		InputType::Number,
		InputType::Url,
		InputType::Tel,
		InputType::Search,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			InputType::Text => "text",
			InputType::Email => "email",
			InputType::Password => "password",
			InputType::Number => "number",
			InputType::Url => "url",
			InputType::Tel => "tel",
			InputType::Search => "search",
		}
	}
}

/// Single-line `<input>` of a given type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
	pub input_type: InputType,
}

impl TextField {
	/// Create a text-like field of the given input type
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::fields::{InputType, TextField};
	/// use formgroup_forms::FieldKind;
	///
	/// let field = TextField::new(InputType::Email);
	/// assert_eq!(field.kind_name(), "email");
	/// ```
	pub fn new(input_type: InputType) -> Self {
		Self { input_type }
	}

	pub fn text() -> Self {
		Self::new(InputType::Text)
	}

	pub fn email() -> Self {
		Self::new(InputType::Email)
	}

	pub fn password() -> Self {
		Self::new(InputType::Password)
	}
}

impl Default for TextField {
	fn default() -> Self {
		Self::text()
	}
}

impl FieldKind for TextField {
	fn kind_name(&self) -> &str {
		self.input_type.as_str()
	}

	fn render_control(
		&self,
		ctx: &FieldContext<'_>,
		input: &OptionMap,
		template: &dyn Templating,
	) -> Markup {
		// Passwords are never echoed back into the page
		let echo_value = self.input_type != InputType::Password;
		render_input(ctx, input, self.input_type.as_str(), echo_value, template)
	}
}
