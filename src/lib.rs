//! # switchback
//!
//! **switchback** is a minimal, convention-driven MVC framework core: it
//! maps an incoming request path to a controller and action, drives the
//! action through lifecycle filters, and renders a template (optionally
//! wrapped in a layout) into a buffered response.
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules along the request
//! pipeline:
//!
//! - **[`config`]** - dispatcher configuration (base URI, default
//!   controller, trusted peers)
//! - **[`namespace`]** - the read-only resource-lookup surfaces for
//!   controllers and templates
//! - **[`router`]** - segment-by-segment resolution of a path to a
//!   controller identifier
//! - **[`controller`]** - the action-dispatch state machine: filters,
//!   render operations, double-render guard
//! - **[`templates`]** - template resolution, rendering strategies and
//!   layout composition
//! - **[`dispatcher`]** - top-level orchestration and the single
//!   error-to-response translation point
//! - **[`response`]** - the buffered response and the transport sink seam
//! - **[`flash`]** - redirect-surviving key/value state
//! - **[`error`]** - the typed failure taxonomy (status + message +
//!   headers)
//! - **[`inflect`]** - controller identifier / type name inflections
//!
//! ## Request Flow
//!
//! ```text
//! raw path
//!   └─ Dispatcher::dispatch      strip query string and leading slashes
//!        └─ router::resolve      path segments → controller id + remainder
//!             └─ namespace       instantiate the controller
//!                  └─ perform    extract action/args/format, run filters,
//!                     │          dispatch the action
//!                     └─ render  template + layout → Response body
//!                          └─ Response::output → transport sink
//! ```
//!
//! Each request gets its own controller, [`Context`] and [`Response`];
//! the namespaces and the [`Dispatcher`] itself are shared read-only.
//! The body is fully buffered before any header reaches the transport.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use switchback::{
//!     Context, Controller, ControllerRegistry, Dispatch, Dispatcher,
//!     DispatcherConfig, Error, TemplateRegistry,
//! };
//!
//! struct WikiController;
//!
//! impl Controller for WikiController {
//!     fn name(&self) -> &'static str {
//!         "WikiController"
//!     }
//!
//!     fn invoke(
//!         &mut self,
//!         ctx: &mut Context,
//!         action: &str,
//!         args: &[String],
//!     ) -> Result<Dispatch, Error> {
//!         match action {
//!             "show" => {
//!                 ctx.set("page", args.first().cloned().unwrap_or_default());
//!                 Ok(Dispatch::Handled)
//!             }
//!             _ => Ok(Dispatch::Unknown),
//!         }
//!     }
//! }
//!
//! let mut controllers = ControllerRegistry::new();
//! controllers.mount("wiki", || Box::new(WikiController));
//!
//! let mut templates = TemplateRegistry::new();
//! templates.add("wiki/show.html", "<h1>{{ page }}</h1>");
//!
//! let dispatcher = Dispatcher::new(
//!     DispatcherConfig::new("http://example.com/app", "wiki"),
//!     Arc::new(controllers),
//!     Arc::new(templates),
//! );
//! let response = dispatcher.map_path_to_response("wiki/show/home");
//! assert_eq!(response.body, "<h1>home</h1>");
//! ```

pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod flash;
pub mod inflect;
pub mod namespace;
pub mod response;
pub mod router;
pub mod templates;

pub use config::DispatcherConfig;
pub use controller::{
    extract_action_and_args, perform, ArgVec, Context, Controller, Dispatch, Filter,
};
pub use dispatcher::Dispatcher;
pub use error::Error;
pub use flash::Flash;
pub use namespace::{
    ControllerNamespace, ControllerRegistry, DirectoryTemplates, TemplateNamespace,
    TemplateRegistry, CONTROLLER_EXT,
};
pub use response::{get_reason, Response, TransportSink};
pub use templates::{RenderStrategy, Template, TemplateFactory};
