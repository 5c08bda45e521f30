//! # Router Module
//!
//! Path resolution against the controller namespace.
//!
//! ## Overview
//!
//! The router consumes a slash-delimited request path segment by segment,
//! deciding at each step between a leaf controller resource and a
//! namespace directory:
//!
//! 1. The head segment must be a bare word (`^\w+$`), otherwise the path
//!    cannot route at all.
//! 2. If `<prefix>/<head>` names a leaf controller, resolution stops and
//!    the rest of the path is returned unconsumed.
//! 3. If it names a directory, resolution descends and never backtracks:
//!    when no leaf exists beneath a chosen directory, the whole resolution
//!    fails rather than retrying a sibling.
//!
//! A leaf is always preferred over a directory of the same name, so the
//! most specific leaf reachable by consuming segments left-to-right wins.
//! Consecutive slashes after the matched controller are preserved
//! verbatim in the remainder; they are the action extractor's concern.
//!
//! ## Example
//!
//! ```rust,ignore
//! use switchback::router::resolve;
//!
//! let (id, remainder) = resolve(&*namespace, "admin/users/show/1")?;
//! assert_eq!(id, "admin/users");
//! assert_eq!(remainder, "show/1");
//! ```

mod core;

pub use core::{resolve, split_on_first_slash};
