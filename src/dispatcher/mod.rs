//! # Dispatcher Module
//!
//! Top-level request orchestration.
//!
//! ## Overview
//!
//! The dispatcher is the single entry point of the framework. For each
//! request it:
//!
//! 1. Cleans the raw path (drops the query string, trims leading
//!    slashes).
//! 2. Resolves a controller — the configured default controller when the
//!    clean path is empty, the [`router`](crate::router) otherwise.
//! 3. Instantiates the controller from the namespace and drives it
//!    through [`perform`](crate::controller::perform).
//! 4. Writes the finished response to the transport sink.
//!
//! ## Error Handling
//!
//! Every failure escaping the sequence above is caught exactly once, at
//! the top. If a controller was already instantiated its `rescue` hook
//! gets first refusal; otherwise (and when `rescue` declines) the
//! dispatcher renders a minimal HTML error page. The page escapes the
//! failure message and includes diagnostic detail only for trusted
//! (loopback) peers. The client always receives a well-formed response —
//! never a raw unhandled failure.
//!
//! ## Concurrency
//!
//! One `dispatch` call processes one path to completion. The dispatcher
//! itself is shared and read-only; every request gets its own controller,
//! context and response.

mod core;

pub use core::{clean_path, Dispatcher};
