//! Form group composition
//!
//! Turns resolved options and a rendered control into the final fragment,
//! arranged for the active layout.

use crate::field_kind::FieldContext;
use crate::html::{Markup, Templating};
use crate::layout::{LabelPosition, Layout};
use crate::options::{OptionMap, ResolvedOptions, non_blank_str, option_map};
use crate::record::to_sentence;
use crate::settings::FormSettings;
use serde_json::{Value, json};

/// Assembles label, control, hint and feedback into one form group
pub struct Composer<'a> {
	template: &'a dyn Templating,
	settings: &'a FormSettings,
}

impl<'a> Composer<'a> {
	pub fn new(template: &'a dyn Templating, settings: &'a FormSettings) -> Self {
		Self { template, settings }
	}

	/// Compose the form group for `ctx.layout`
	///
	/// Inline groups have no container; vertical groups sit in the `wrapper`
	/// container unless it is suppressed; horizontal groups split into a label
	/// column and a content column inside the container.
	pub fn compose(
		&self,
		resolved: &ResolvedOptions,
		label_position: LabelPosition,
		control: Markup,
		ctx: &FieldContext<'_>,
	) -> Markup {
		match ctx.layout {
			Layout::Inline => self.build_content(resolved, label_position, control, ctx),
			Layout::Vertical => {
				let content = self.build_content(resolved, label_position, control, ctx);
				self.build_wrapper(resolved, content)
			}
			Layout::Horizontal => {
				let mut label = self.build_label(resolved, ctx);
				if label.is_empty() {
					label = self.template.content_tag(
						"div",
						&Markup::new(),
						&option_map(json!({
							"class": self.settings.horizontal_label_placeholder_class,
						})),
					);
				}
				let content = self.template.content_tag(
					"div",
					&self.build_content(resolved, label_position, control, ctx),
					&option_map(json!({"class": self.settings.horizontal_content_class})),
				);
				self.build_wrapper(resolved, label + content)
			}
		}
	}

	fn build_wrapper(&self, resolved: &ResolvedOptions, content: Markup) -> Markup {
		match &resolved.wrapper {
			Some(attrs) => self.template.content_tag("div", &content, attrs),
			None => content,
		}
	}

	fn build_content(
		&self,
		resolved: &ResolvedOptions,
		label_position: LabelPosition,
		control: Markup,
		ctx: &FieldContext<'_>,
	) -> Markup {
		let mut content = Markup::new();
		match (ctx.layout, label_position) {
			// The label already sits in its own column
			(Layout::Horizontal, _) => content.push(&control),
			(_, LabelPosition::Before) => {
				content.push(&self.build_label(resolved, ctx));
				content.push(&control);
			}
			(_, LabelPosition::After) => {
				content.push(&control);
				content.push(&self.build_label(resolved, ctx));
			}
		}
		content.push(&self.build_hint(resolved));
		content.push(&self.build_feedback(resolved, ctx));
		content
	}

	/// `<label>` pointing at the control, empty when suppressed
	pub fn build_label(&self, resolved: &ResolvedOptions, ctx: &FieldContext<'_>) -> Markup {
		let Some(label) = &resolved.label else {
			return Markup::new();
		};
		let mut attrs = label.clone();
		let text = match attrs.remove("text") {
			Some(Value::String(text)) => text,
			_ => ctx.label_text.clone(),
		};
		if text.trim().is_empty() {
			return Markup::new();
		}
		if let Some(id) = resolved.input.get("id").filter(|id| !id.is_null()) {
			attrs.insert("for".to_string(), id.clone());
		}
		self.template.content_tag("label", &Markup::text(&text), &attrs)
	}

	/// Hint element, empty without hint text
	pub fn build_hint(&self, resolved: &ResolvedOptions) -> Markup {
		let Some(hint) = &resolved.hint else {
			return Markup::new();
		};
		let Some(text) = non_blank_str(hint.get("text")) else {
			return Markup::new();
		};
		let tag = non_blank_str(hint.get("tag")).unwrap_or(&self.settings.hint_tag);

		let mut attrs = hint.clone();
		attrs.remove("tag");
		attrs.remove("text");
		self.template.content_tag(tag, &Markup::text(text), &attrs)
	}

	/// Validation feedback
	///
	/// Nothing renders while the record is error-free. Otherwise a field in
	/// error gets its messages in the `invalid` template, and a clean field
	/// gets the fixed success message in the `valid` template.
	pub fn build_feedback(&self, resolved: &ResolvedOptions, ctx: &FieldContext<'_>) -> Markup {
		let Some(feedback) = &resolved.feedback else {
			return Markup::new();
		};
		if !ctx.state.has_any_error {
			return Markup::new();
		}

		if ctx.state.has_field_error {
			match feedback_template(feedback, "invalid") {
				Some(attrs) => {
					self.template
						.content_tag("div", &Markup::text(&to_sentence(&ctx.errors)), &attrs)
				}
				None => Markup::new(),
			}
		} else {
			match feedback_template(feedback, "valid") {
				Some(attrs) => self.template.content_tag(
					"div",
					&Markup::text(&self.settings.valid_feedback_message),
					&attrs,
				),
				None => Markup::new(),
			}
		}
	}
}

fn feedback_template(feedback: &OptionMap, key: &str) -> Option<OptionMap> {
	match feedback.get(key)? {
		Value::Object(attrs) => Some(attrs.clone()),
		Value::Bool(true) => Some(OptionMap::new()),
		Value::String(class) if !class.trim().is_empty() => {
			Some(option_map(json!({ "class": class })))
		}
		_ => None,
	}
}
