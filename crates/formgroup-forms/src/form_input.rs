use crate::compose::Composer;
use crate::error::FormGroupResult;
use crate::field_kind::{FieldContext, FieldKind};
use crate::html::Markup;
use crate::layout::Layout;
use crate::options::{OptionMap, ResolvedOptions, resolve};
use crate::record::FormRecord;
use crate::session::RenderSession;

/// One field bound to a kind, a scope and an optional record
pub struct FormInput<'a> {
	session: &'a RenderSession,
	kind: &'a dyn FieldKind,
	ctx: FieldContext<'a>,
}

impl<'a> FormInput<'a> {
	/// Bind `name` for rendering
	///
	/// # Examples
	///
	/// ```
	/// use formgroup_forms::{FormInput, Layout, RenderSession};
	/// use formgroup_forms::fields::TextField;
	///
	/// let session = RenderSession::new();
	/// let kind = TextField::email();
	/// let input = FormInput::new(&session, &kind, "email", "user", Layout::Vertical, None);
	/// assert_eq!(input.id(), "user_email");
	/// ```
	pub fn new(
		session: &'a RenderSession,
		kind: &'a dyn FieldKind,
		name: &'a str,
		scope: &'a str,
		layout: Layout,
		record: Option<&'a dyn FormRecord>,
	) -> Self {
		let ctx = FieldContext::new(name, scope, layout, session.settings(), record);
		Self { session, kind, ctx }
	}

	pub fn name(&self) -> &str {
		self.ctx.name
	}

	/// Derived DOM id, used when the caller sets none
	pub fn id(&self) -> &str {
		&self.ctx.id
	}

	pub fn context(&self) -> &FieldContext<'a> {
		&self.ctx
	}

	/// Resolve caller options against the kind's defaults
	pub fn resolve(
		&self,
		options: &OptionMap,
		html_options: Option<&OptionMap>,
	) -> FormGroupResult<ResolvedOptions> {
		resolve(options, html_options, self.kind, &self.ctx)
	}

	/// Render the complete form group
	///
	/// The host error wrapper is suppressed for the duration of the call.
	pub fn render(
		&self,
		options: &OptionMap,
		html_options: Option<&OptionMap>,
	) -> FormGroupResult<Markup> {
		let _guard = self.session.error_display().suppress();
		let resolved = self.resolve(options, html_options)?;
		let template = self.session.template();

		let control = self.kind.render_control(&self.ctx, &resolved.input, template);
		let control = self.session.error_display().decorate(
			control,
			self.ctx.state.has_field_error,
			template,
		);

		let markup = Composer::new(template, self.session.settings()).compose(
			&resolved,
			self.kind.label_position(),
			control,
			&self.ctx,
		);

		tracing::debug!(
			field = %self.ctx.name,
			kind = self.kind.kind_name(),
			layout = %self.ctx.layout,
			has_error = self.ctx.state.has_field_error,
			"rendered form group"
		);

		Ok(markup)
	}
}
