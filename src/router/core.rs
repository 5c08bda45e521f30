use crate::error::Error;
use crate::namespace::{ControllerNamespace, CONTROLLER_EXT};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// A routable path segment is a bare word.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("invalid segment regex"));

/// Resolve a request path to a controller identifier and the unconsumed
/// remainder.
///
/// Consumes segments left-to-right, preferring a leaf controller over a
/// namespace directory at every step and never backtracking out of a
/// chosen directory. Resolving the same path twice against an unchanged
/// namespace yields the same pair.
///
/// # Errors
///
/// [`Error::Routing`] when a segment is not a bare word or matches
/// neither a leaf nor a directory.
pub fn resolve(
    namespace: &dyn ControllerNamespace,
    path: &str,
) -> Result<(String, String), Error> {
    resolve_under(namespace, path, None)
}

fn resolve_under(
    namespace: &dyn ControllerNamespace,
    unconsumed: &str,
    prefix: Option<&str>,
) -> Result<(String, String), Error> {
    let (head, tail) = split_on_first_slash(unconsumed);

    if !WORD_RE.is_match(head) {
        warn!(segment = %head, "Route segment is not a bare word");
        return Err(Error::Routing(head.to_string()));
    }

    let controller = match prefix {
        Some(prefix) => format!("{prefix}/{head}"),
        None => head.to_string(),
    };

    if namespace.exists(&format!("{controller}.{CONTROLLER_EXT}")) {
        debug!(controller_id = %controller, remainder = %tail, "Route matched");
        return Ok((controller, tail.to_string()));
    }

    if namespace.exists(&controller) {
        return resolve_under(namespace, tail, Some(&controller));
    }

    warn!(segment = %head, prefix = ?prefix, "No route matched");
    Err(Error::Routing(head.to_string()))
}

/// Split a string at its first slash; the slash itself is consumed. A
/// string without a slash splits into itself and the empty string.
#[must_use]
pub fn split_on_first_slash(s: &str) -> (&str, &str) {
    match s.find('/') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}
