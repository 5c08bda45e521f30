//! Dispatcher configuration.
//!
//! Three settings drive a [`Dispatcher`](crate::dispatcher::Dispatcher):
//!
//! - `base_uri` — the URI routes are appended to when building URLs and
//!   resolving relative redirect targets.
//! - `default_controller` — the controller identifier used when the
//!   request path is empty.
//! - `trusted_peers` — remote addresses allowed to see diagnostic detail
//!   on error pages (loopback by default).
//!
//! ## Environment Variables
//!
//! [`DispatcherConfig::from_env`] reads:
//!
//! - `SWITCHBACK_BASE_URI` (default: empty)
//! - `SWITCHBACK_DEFAULT_CONTROLLER` (default: `"index"`)

use std::env;

/// Configuration for a [`Dispatcher`](crate::dispatcher::Dispatcher).
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// URI that routes are appended to (e.g. `http://example.com/app`).
    pub base_uri: String,
    /// Controller identifier used for the empty path.
    pub default_controller: String,
    /// Remote addresses allowed to see error-page diagnostics.
    pub trusted_peers: Vec<String>,
}

impl DispatcherConfig {
    /// Create a configuration with the default trusted peers (loopback).
    pub fn new(base_uri: impl Into<String>, default_controller: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            default_controller: default_controller.into(),
            trusted_peers: vec!["127.0.0.1".to_string(), "::1".to_string()],
        }
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let base_uri = env::var("SWITCHBACK_BASE_URI").unwrap_or_default();
        let default_controller =
            env::var("SWITCHBACK_DEFAULT_CONTROLLER").unwrap_or_else(|_| "index".to_string());
        Self::new(base_uri, default_controller)
    }
}
