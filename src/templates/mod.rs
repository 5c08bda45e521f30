//! # Templates Module
//!
//! Template resolution, rendering strategies and layout composition.
//!
//! ## Overview
//!
//! A logical template name such as `"foo/index"` is resolved against a
//! [`TemplateNamespace`](crate::namespace::TemplateNamespace) by
//! extension lookup: an explicit extension is used directly, otherwise
//! the first candidate the namespace enumerates wins. The extension
//! selects a [`RenderStrategy`]:
//!
//! - `.html` — markup interpolation: attributes are interpolated into the
//!   surrounding static content and the result is returned as-is.
//! - `.pjs` — script generation: attributes are interpolated into a
//!   sequence of page-mutation statements which are wrapped in
//!   error-handling boilerplate and served as `text/javascript`.
//!
//! ## Layouts
//!
//! Rendering a template with a layout renders the inner template first,
//! then renders the layout with all of the inner template's attributes
//! plus `content_for_layout` bound to the inner output; the layout's own
//! render produces the final string.
//!
//! ## Ownership
//!
//! A [`Template`] is owned by its [`TemplateFactory`] borrow for the
//! duration of one render call; nothing is cached across requests.

mod core;

pub use core::{RenderStrategy, Template, TemplateFactory};
