use crate::controller::extract::{extract_action_and_args, ArgVec};
use crate::error::Error;
use crate::flash::Flash;
use crate::inflect;
use crate::response::Response;
use crate::templates::TemplateFactory;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// Redirect targets that are already absolute: server-relative paths and
/// anything with a scheme.
static ABSOLUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/|\w+://)").expect("invalid redirect regex"));

/// Outcome of a `before_filter` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Proceed with action dispatch.
    Continue,
    /// Silently short-circuit the request; not an error.
    Veto,
}

/// Outcome of an [`Controller::invoke`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The action matched a method and ran.
    Handled,
    /// No method corresponds to the action name.
    Unknown,
}

/// Per-request state the framework threads through a controller's action
/// life cycle: the owned [`Response`], the terminal-render guard, the
/// response format, the default layout and the explicit template
/// attribute map.
///
/// One `Context` serves exactly one [`perform`] invocation; nothing in it
/// is shared across requests.
pub struct Context<'a> {
    templates: &'a TemplateFactory,
    base_uri: String,
    controller_name: String,
    response: Response,
    performed: bool,
    layout: Option<String>,
    format: String,
    attributes: Map<String, Value>,
    flash: Flash,
}

impl<'a> Context<'a> {
    /// Create a fresh context over the shared template factory.
    pub fn new(templates: &'a TemplateFactory, base_uri: impl Into<String>) -> Self {
        Self {
            templates,
            base_uri: base_uri.into(),
            controller_name: String::new(),
            response: Response::new(),
            performed: false,
            layout: None,
            format: "html".to_string(),
            attributes: Map::new(),
            flash: Flash::new(),
        }
    }

    /// The response under construction.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Mutable access for status/header tweaks from action code.
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Consume the context, yielding the finished response.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Bind the controller name used for implicit template paths and the
    /// `controller` template attribute. [`perform`] does this itself;
    /// hosts rendering actions outside a dispatch call it directly.
    pub fn bind_controller(&mut self, name: &str) {
        self.controller_name = name.to_string();
    }

    /// Discard the response and the terminal-render guard, starting over
    /// with a fresh [`Response`].
    pub fn erase_response(&mut self) {
        self.performed = false;
        self.response = Response::new();
    }

    /// True once a terminal render or redirect happened.
    #[must_use]
    pub fn performed(&self) -> bool {
        self.performed
    }

    /// The response format extracted from the path, `"html"` by default.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// True if the request asked for the given format extension.
    #[must_use]
    pub fn respond_to(&self, ext: &str) -> bool {
        self.format == ext
    }

    /// Set the default layout used by implicit action renders.
    pub fn set_layout(&mut self, layout: &str) {
        self.layout = Some(layout.to_string());
    }

    /// Publish a template attribute.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// The attributes published so far.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// The flash store injected for this request.
    #[must_use]
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// Mutable flash access for action code.
    pub fn flash_mut(&mut self) -> &mut Flash {
        &mut self.flash
    }

    /// Inject the flash loaded from the host's session mechanism.
    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = flash;
    }

    /// Take the flash back out for persisting; the host sweeps it after
    /// the request.
    pub fn take_flash(&mut self) -> Flash {
        std::mem::take(&mut self.flash)
    }

    /// Build a URL for a route of this application: the configured base
    /// URI, the raw target, and percent-encoded extra args joined with
    /// slashes.
    #[must_use]
    pub fn url_for(&self, to: &str, args: &[&str]) -> String {
        let mut url = format!("{}/{}", self.base_uri, to);
        for arg in args {
            url.push('/');
            url.push_str(&urlencoding::encode(arg));
        }
        url
    }

    /// Set the response status; the reason phrase is derived from the
    /// RFC 2616 table.
    pub fn set_status(&mut self, status: u16) {
        self.response.set_status(status);
    }

    /// Set the response status with a custom reason phrase.
    pub fn set_status_with_reason(&mut self, status: u16, reason: &str) {
        self.response.set_status_with_reason(status, reason);
    }

    /// Set the `Content-Type` header of the response.
    pub fn set_content_type(&mut self, content_type: &str) {
        self.response.add_header("Content-Type", content_type);
    }

    /// Terminally redirect to a target. Server-relative (`/...`) and
    /// absolute (`scheme://...`) targets pass through untouched; anything
    /// else resolves through [`Context::url_for`].
    ///
    /// # Errors
    ///
    /// [`Error::DoubleRender`] when a render or redirect already happened.
    pub fn redirect(&mut self, to: &str) -> Result<(), Error> {
        if self.performed {
            return Err(Error::DoubleRender);
        }
        self.performed = true;

        let url = if ABSOLUTE_RE.is_match(to) {
            to.to_string()
        } else {
            self.url_for(to, &[])
        };

        debug!(location = %url, "Redirect");
        self.response.add_header("Location", url).set_status(302);
        Ok(())
    }

    /// Terminally render the given text as the response body.
    ///
    /// # Errors
    ///
    /// [`Error::DoubleRender`] when a render or redirect already happened.
    pub fn render_text(&mut self, text: impl Into<String>) -> Result<(), Error> {
        if self.performed {
            return Err(Error::DoubleRender);
        }
        self.performed = true;
        self.response.set_body(text);
        Ok(())
    }

    /// Terminally render the empty string.
    pub fn render_nothing(&mut self) -> Result<(), Error> {
        self.render_text("")
    }

    /// Terminally render a template, optionally wrapped in a layout.
    ///
    /// The template receives the published attributes plus a `controller`
    /// attribute carrying the controller name, the request format and the
    /// base URI. A script-strategy template forces the response content
    /// type to `text/javascript`.
    ///
    /// Note that the default layout does not apply here; only the
    /// implicit render of [`perform`] passes it in.
    ///
    /// # Errors
    ///
    /// [`Error::DoubleRender`] on a second terminal render;
    /// [`Error::TemplateNotFound`] when the name resolves to nothing.
    pub fn render_template(&mut self, name: &str, layout: Option<&str>) -> Result<(), Error> {
        if self.performed {
            return Err(Error::DoubleRender);
        }

        let mut template = self.templates.open(name)?;
        if let Some(content_type) = template.strategy().content_type() {
            self.set_content_type(content_type);
        }

        let mut attributes = self.attributes.clone();
        attributes.insert(
            "controller".to_string(),
            json!({
                "name": self.controller_name,
                "format": self.format,
                "base_uri": self.base_uri,
            }),
        );

        let body = template.render_with(&attributes, layout)?;
        self.render_text(body)
    }

    /// Terminally render the default template of an action:
    /// `<underscored controller name>/<action>`, decorated with the
    /// default layout when one is set.
    pub fn render_action(&mut self, action: &str) -> Result<(), Error> {
        let base = self
            .controller_name
            .strip_suffix("Controller")
            .unwrap_or(&self.controller_name);
        let template_name = format!("{}/{}", inflect::underscore(base), action);
        let layout = self.layout.clone();
        self.render_template(&template_name, layout.as_deref())
    }
}

/// A controller: application logic for one slice of the path namespace.
///
/// Implementations supply the action table via [`Controller::invoke`] and
/// may override the lifecycle hooks; everything else is driven by
/// [`perform`].
pub trait Controller {
    /// The camelized type name including the `Controller` suffix, e.g.
    /// `"Admin_UsersController"`. Implicit renders underscore this (minus
    /// the suffix) into the template directory name.
    fn name(&self) -> &'static str;

    /// Dispatch an action to its method. This is the controller's
    /// explicit dispatch table — a `match` over action names — and the
    /// only place action strings meet code. Return [`Dispatch::Unknown`]
    /// for names with no method.
    fn invoke(
        &mut self,
        ctx: &mut Context,
        action: &str,
        args: &[String],
    ) -> Result<Dispatch, Error>;

    /// Hook run before the action. May rewrite the action and args,
    /// veto the request, or render terminally as a side effect.
    fn before_filter(
        &mut self,
        _ctx: &mut Context,
        _action: &mut String,
        _args: &mut ArgVec,
    ) -> Result<Filter, Error> {
        Ok(Filter::Continue)
    }

    /// Hook run after rendering, whether implicit, explicit or a
    /// redirect. Not run when the before filter vetoed.
    fn after_filter(
        &mut self,
        _ctx: &mut Context,
        _action: &str,
        _args: &[String],
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Hook for unmapped action names. The default fails the request
    /// with [`Error::UnknownAction`].
    fn does_not_understand(
        &mut self,
        _ctx: &mut Context,
        action: &str,
        _args: &[String],
    ) -> Result<(), Error> {
        Err(Error::UnknownAction(action.to_string()))
    }

    /// Default layout applied to implicit action renders.
    fn default_layout(&self) -> Option<&str> {
        None
    }

    /// Translate a failure raised while performing into a response.
    /// Returning `None` delegates to the dispatcher's generic translator.
    fn rescue(&self, _error: &Error) -> Option<Response> {
        None
    }
}

/// Drive a controller through the action life cycle for one request.
///
/// Extracts action/args/format from the unconsumed path remainder, runs
/// the before filter, dispatches the action, performs the implicit render
/// when the action did not render, and runs the after filter. A vetoed
/// before filter short-circuits silently; a render inside the filter
/// counts as the request's terminal render either way.
pub fn perform(
    controller: &mut dyn Controller,
    ctx: &mut Context,
    unconsumed: &str,
) -> Result<(), Error> {
    let (action, args, format) = extract_action_and_args(unconsumed);
    let mut action = action;
    let mut args = args;

    ctx.controller_name = controller.name().to_string();
    if let Some(format) = format {
        ctx.format = format;
    }
    if ctx.layout.is_none() {
        ctx.layout = controller.default_layout().map(str::to_string);
    }

    debug!(
        controller = %ctx.controller_name,
        action = %action,
        args = ?args,
        format = %ctx.format,
        "Action extracted"
    );

    let vetoed = matches!(
        controller.before_filter(ctx, &mut action, &mut args)?,
        Filter::Veto
    );
    if vetoed || ctx.performed {
        return Ok(());
    }

    info!(
        controller = %ctx.controller_name,
        action = %action,
        "Action dispatched"
    );

    match controller.invoke(ctx, &action, &args)? {
        Dispatch::Handled => {}
        Dispatch::Unknown => controller.does_not_understand(ctx, &action, &args)?,
    }

    if !ctx.performed {
        ctx.render_action(&action)?;
    }

    controller.after_filter(ctx, &action, &args)
}
