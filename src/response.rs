//! Buffered HTTP response and transport sink abstraction.
//!
//! A [`Response`] accumulates body, status and headers while the action
//! pipeline runs; nothing reaches the transport until [`Response::output`]
//! is called after the whole render pipeline has completed. That ordering
//! is load-bearing: action code routinely sets status and headers after
//! body-producing code has already executed.

use std::collections::HashMap;

/// Reason phrase for a status code per RFC 2616 section 6.1.1.
///
/// Unmapped codes yield the empty string.
#[must_use]
pub fn get_reason(status: u16) -> &'static str {
    match status {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        306 => "(Unused)",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Request Entity Too Large",
        414 => "Request-URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => "",
    }
}

/// Where a finished [`Response`] is written.
///
/// The framework does not speak HTTP itself; the host supplies whatever
/// transport it has (a socket, a CGI-style writer, a test buffer). The
/// status line follows the `HTTP/1.1 <status> <reason>` format.
pub trait TransportSink {
    /// Emit the status line. Called at most once, before any header.
    fn send_status(&mut self, line: &str, status: u16);
    /// Emit one header. Called once per header, before the body.
    fn send_header(&mut self, name: &str, value: &str);
    /// Emit the response body. Called exactly once, last.
    fn write_body(&mut self, body: &[u8]);
}

/// A response under construction: body, optional status with derived
/// reason phrase, and headers with last-write-wins semantics per key.
///
/// A fresh `Response` has no status; hosts treat that as 200.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// Response body, accumulated before any header is sent.
    pub body: String,
    /// Status code, unset until someone calls [`Response::set_status`].
    pub status: Option<u16>,
    /// Reason phrase, derived from the status unless overridden.
    pub reason: String,
    /// Response headers. Insertion order is irrelevant; the last write
    /// per key wins.
    pub headers: HashMap<String, String>,
}

impl Response {
    /// Create an empty response with no status and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a response with the given body.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Set the body. Chainable.
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Set the status code, deriving the reason phrase from the RFC 2616
    /// table. Chainable.
    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = Some(status);
        self.reason = get_reason(status).to_string();
        self
    }

    /// Set the status code with a custom reason phrase. Chainable.
    pub fn set_status_with_reason(&mut self, status: u16, reason: impl Into<String>) -> &mut Self {
        self.status = Some(status);
        self.reason = reason.into();
        self
    }

    /// Add or replace a header. Chainable.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Write this response to the transport: status line (if a status was
    /// set), then headers, then the buffered body.
    pub fn output(&self, sink: &mut dyn TransportSink) {
        if let Some(status) = self.status {
            let line = format!("HTTP/1.1 {} {}", status, self.reason);
            sink.send_status(&line, status);
        }
        for (key, value) in &self.headers {
            sink.send_header(key, value);
        }
        sink.write_body(self.body.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_reason_standard_codes() {
        assert_eq!(get_reason(200), "OK");
        assert_eq!(get_reason(302), "Found");
        assert_eq!(get_reason(306), "(Unused)");
        assert_eq!(get_reason(404), "Not Found");
        assert_eq!(get_reason(414), "Request-URI Too Long");
        assert_eq!(get_reason(500), "Internal Server Error");
        assert_eq!(get_reason(505), "HTTP Version Not Supported");
    }

    #[test]
    fn test_get_reason_unmapped_codes() {
        assert_eq!(get_reason(299), "");
        assert_eq!(get_reason(418), "");
        assert_eq!(get_reason(599), "");
    }

    #[test]
    fn test_set_status_derives_reason() {
        let mut response = Response::new();
        response.set_status(404);
        assert_eq!(response.status, Some(404));
        assert_eq!(response.reason, "Not Found");
    }

    #[test]
    fn test_custom_reason_overrides_table() {
        let mut response = Response::new();
        response.set_status_with_reason(404, "Gone Fishing");
        assert_eq!(response.reason, "Gone Fishing");
    }

    #[test]
    fn test_header_last_write_wins() {
        let mut response = Response::new();
        response
            .add_header("Content-Type", "text/html")
            .add_header("Content-Type", "text/javascript");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/javascript")
        );
    }
}
