//! # Controller Module
//!
//! The action-dispatch state machine.
//!
//! ## Overview
//!
//! A [`Controller`] owns the application logic for one slice of the path
//! namespace; the framework drives it through [`perform`]:
//!
//! 1. The unconsumed path remainder is split into action, positional
//!    args and an optional response format ([`extract_action_and_args`]).
//! 2. `before_filter` runs and may rewrite the action/args, veto the
//!    request, or terminally render as a side effect — a render inside
//!    the filter wins over veto semantics either way.
//! 3. The action is dispatched through [`Controller::invoke`], the
//!    controller's explicit action table. Unknown actions go through the
//!    overridable `does_not_understand` hook (404 by default).
//! 4. If the action did not render, the default template
//!    `<controller>/<action>` is rendered with the controller's default
//!    layout.
//! 5. `after_filter` runs — always, unless the before filter vetoed.
//!
//! ## The performed flag
//!
//! Each request admits at most one terminal render or redirect. Every
//! render operation on [`Context`] checks the performed flag first and
//! fails with [`Error::DoubleRender`](crate::Error::DoubleRender) on a
//! second attempt, in any combination of text/nothing/template/redirect.
//!
//! ## Attributes
//!
//! Action methods publish template data explicitly via [`Context::set`];
//! `render_template` snapshots that map and additionally binds a
//! `controller` attribute (name, format, base URI) so templates can build
//! URLs and branch on format.

mod core;
mod extract;

pub use core::{perform, Context, Controller, Dispatch, Filter};
pub use extract::{extract_action_and_args, ArgVec};
