#![allow(dead_code)]

//! Shared fixtures: test controllers, namespace builders and a capturing
//! transport sink.

use std::sync::Arc;
use switchback::{
    Context, Controller, ControllerRegistry, Dispatch, Dispatcher, DispatcherConfig, Error,
    TemplateFactory, TemplateRegistry, TransportSink,
};

/// Install a fmt subscriber honoring `RUST_LOG`; repeated calls are
/// no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Transport sink that records everything written to it, in order.
#[derive(Default)]
pub struct CaptureSink {
    pub status_line: Option<String>,
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub events: Vec<&'static str>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl TransportSink for CaptureSink {
    fn send_status(&mut self, line: &str, status: u16) {
        self.events.push("status");
        self.status_line = Some(line.to_string());
        self.status = Some(status);
    }

    fn send_header(&mut self, name: &str, value: &str) {
        self.events.push("header");
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write_body(&mut self, body: &[u8]) {
        self.events.push("body");
        self.body = Some(String::from_utf8_lossy(body).into_owned());
    }
}

/// The workhorse test controller: one action per render style.
pub struct FooController;

impl Controller for FooController {
    fn name(&self) -> &'static str {
        "FooController"
    }

    fn invoke(
        &mut self,
        ctx: &mut Context,
        action: &str,
        args: &[String],
    ) -> Result<Dispatch, Error> {
        match action {
            "index" => Ok(Dispatch::Handled),
            "greet" => {
                ctx.render_text(format!("hello {}", args.join(" ")))?;
                Ok(Dispatch::Handled)
            }
            "jump" => {
                ctx.redirect("where")?;
                Ok(Dispatch::Handled)
            }
            "nothing" => {
                ctx.render_nothing()?;
                Ok(Dispatch::Handled)
            }
            "show" => {
                ctx.set("id", args.first().cloned().unwrap_or_default());
                ctx.render_template("foo/show", None)?;
                Ok(Dispatch::Handled)
            }
            "update" => {
                ctx.set("id", args.first().cloned().unwrap_or_default());
                ctx.render_template("foo/update", None)?;
                Ok(Dispatch::Handled)
            }
            _ => Ok(Dispatch::Unknown),
        }
    }
}

/// Template sources backing the `foo` controller plus a layout.
pub fn fixture_templates() -> TemplateRegistry {
    let mut templates = TemplateRegistry::new();
    templates.add("foo/index.html", "foo/index");
    templates.add("foo/show.html", "showing {{ id }}");
    templates.add("foo/update.pjs", "$('list').innerHTML = '{{ id }}';");
    templates.add("layout.html", "[{{ content_for_layout }}]");
    templates
}

/// A template factory over [`fixture_templates`].
pub fn template_factory() -> TemplateFactory {
    TemplateFactory::new(Arc::new(fixture_templates()))
}

/// A dispatcher with `foo` mounted, `ghost` stubbed, and `foo` as the
/// default controller.
pub fn dispatcher() -> Dispatcher {
    let mut controllers = ControllerRegistry::new();
    controllers.mount("foo", || Box::new(FooController));
    controllers.mount_stub("ghost");
    Dispatcher::new(
        DispatcherConfig::new("http://test.host", "foo"),
        Arc::new(controllers),
        Arc::new(fixture_templates()),
    )
}
