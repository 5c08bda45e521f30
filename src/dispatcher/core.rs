use crate::config::DispatcherConfig;
use crate::controller::{perform, Context, Controller};
use crate::error::Error;
use crate::namespace::{ControllerNamespace, TemplateNamespace, CONTROLLER_EXT};
use crate::response::{Response, TransportSink};
use crate::router;
use crate::templates::TemplateFactory;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Strip the query part and leading slashes from a raw request path.
#[must_use]
pub fn clean_path(raw: &str) -> &str {
    let path = match raw.find('?') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    path.trim_start_matches('/')
}

/// Maps request paths to responses.
///
/// Holds the shared, read-only namespaces and configuration; construct
/// one at startup and share it across requests.
pub struct Dispatcher {
    config: DispatcherConfig,
    controllers: Arc<dyn ControllerNamespace>,
    templates: TemplateFactory,
}

impl Dispatcher {
    /// Create a dispatcher over the given namespaces.
    pub fn new(
        config: DispatcherConfig,
        controllers: Arc<dyn ControllerNamespace>,
        templates: Arc<dyn TemplateNamespace>,
    ) -> Self {
        Self {
            config,
            controllers,
            templates: TemplateFactory::new(templates),
        }
    }

    /// The shared template factory, for hosts that render outside a
    /// request.
    #[must_use]
    pub fn templates(&self) -> &TemplateFactory {
        &self.templates
    }

    /// Process one request path to completion and write the response to
    /// the transport sink. `remote_addr` decides whether error pages may
    /// carry diagnostic detail.
    pub fn dispatch(&self, raw_path: &str, remote_addr: Option<&str>, sink: &mut dyn TransportSink) {
        let path = clean_path(raw_path);
        info!(path = %path, "Request dispatch");
        self.respond(path, remote_addr).output(sink);
    }

    /// Map a clean path to a response without touching a transport.
    /// Error pages never carry diagnostic detail through this entry
    /// point.
    #[must_use]
    pub fn map_path_to_response(&self, path: &str) -> Response {
        self.respond(path, None)
    }

    fn respond(&self, path: &str, remote_addr: Option<&str>) -> Response {
        let mut controller: Option<Box<dyn Controller>> = None;
        match self.route_and_perform(path, &mut controller) {
            Ok(response) => response,
            Err(err) => {
                error!(
                    path = %path,
                    status = err.status(),
                    error = %err,
                    "Request failed"
                );
                if let Some(controller) = &controller {
                    if let Some(response) = controller.rescue(&err) {
                        return response;
                    }
                }
                self.error_response(&err, self.is_trusted(remote_addr))
            }
        }
    }

    fn route_and_perform(
        &self,
        path: &str,
        slot: &mut Option<Box<dyn Controller>>,
    ) -> Result<Response, Error> {
        let (controller_id, unconsumed) = if path.is_empty() {
            let default = &self.config.default_controller;
            if !self
                .controllers
                .exists(&format!("{default}.{CONTROLLER_EXT}"))
            {
                return Err(Error::MissingResource(default.clone()));
            }
            (default.clone(), String::new())
        } else {
            router::resolve(&*self.controllers, path)?
        };

        debug!(controller_id = %controller_id, remainder = %unconsumed, "Controller resolved");

        let controller = slot.insert(self.controllers.load(&controller_id)?);

        let mut ctx = Context::new(&self.templates, self.config.base_uri.clone());
        perform(controller.as_mut(), &mut ctx, &unconsumed)?;
        Ok(ctx.into_response())
    }

    fn is_trusted(&self, remote_addr: Option<&str>) -> bool {
        remote_addr.is_some_and(|addr| {
            self.config
                .trusted_peers
                .iter()
                .any(|trusted| trusted == addr)
        })
    }

    /// The generic failure-to-response translator: a minimal HTML error
    /// page with the escaped failure message, diagnostic detail for
    /// trusted peers only, and status/headers/reason from the failure.
    fn error_response(&self, err: &Error, detailed: bool) -> Response {
        let heading = format!("{} {}", err.status(), err);
        let detail = if detailed {
            escape_html(&format!("{err:?}"))
        } else {
            String::new()
        };
        let body = format!(
            "<html><head><title>Error</title></head>\
             <body><h1>{}</h1><pre>{}</pre></body></html>",
            escape_html(&heading),
            detail
        );

        let mut response = Response::with_body(body);
        for (key, value) in err.headers() {
            response.add_header(key.clone(), value.clone());
        }
        response.set_status_with_reason(err.status(), err.to_string());
        response
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/foo/bar?x=1"), "foo/bar");
        assert_eq!(clean_path("///foo"), "foo");
        assert_eq!(clean_path("?only=query"), "");
        assert_eq!(clean_path(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }
}
