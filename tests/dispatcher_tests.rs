use std::sync::Arc;
use switchback::dispatcher::clean_path;
use switchback::{
    Context, Controller, ControllerRegistry, Dispatch, Dispatcher, DispatcherConfig, Error,
    Response,
};

mod common;

use common::CaptureSink;

#[test]
fn test_maps_path_to_action_template() {
    common::init_tracing();
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("foo/index");
    assert_eq!(response, Response::with_body("foo/index"));
}

#[test]
fn test_bare_controller_path_runs_index() {
    let dispatcher = common::dispatcher();
    assert_eq!(dispatcher.map_path_to_response("foo").body, "foo/index");
}

#[test]
fn test_empty_path_uses_default_controller() {
    let dispatcher = common::dispatcher();
    assert_eq!(dispatcher.map_path_to_response("").body, "foo/index");
}

#[test]
fn test_missing_default_controller_is_a_server_error() {
    let mut controllers = ControllerRegistry::new();
    controllers.mount("foo", || Box::new(common::FooController));
    let dispatcher = Dispatcher::new(
        DispatcherConfig::new("http://test.host", "nope"),
        Arc::new(controllers),
        Arc::new(common::fixture_templates()),
    );
    let response = dispatcher.map_path_to_response("");
    assert_eq!(response.status, Some(500));
    assert_eq!(response.reason, "Default controller 'nope' not found");
}

#[test]
fn test_action_args_reach_the_action() {
    let dispatcher = common::dispatcher();
    assert_eq!(
        dispatcher.map_path_to_response("foo/greet/a/b").body,
        "hello a b"
    );
}

#[test]
fn test_unroutable_path_is_a_bad_request() {
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("qux");
    assert_eq!(response.status, Some(400));
    assert_eq!(response.reason, "No route matches 'qux'");
    assert!(response.body.contains("400"));
}

#[test]
fn test_unknown_action_renders_escaped_error_page() {
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("foo/missing");
    assert_eq!(response.status, Some(404));
    assert_eq!(response.reason, "No action responded to 'missing'");
    assert!(response.body.contains("<h1>404 No action responded to &#39;missing&#39;</h1>"));
}

#[test]
fn test_stub_resource_is_a_missing_controller() {
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("ghost");
    assert_eq!(response.status, Some(404));
    assert_eq!(response.reason, "Controller missing: 'GhostController'");
}

#[test]
fn test_redirect_sets_location_and_found_status() {
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("foo/jump");
    assert_eq!(response.status, Some(302));
    assert_eq!(
        response.headers.get("Location").map(String::as_str),
        Some("http://test.host/where")
    );
    assert_eq!(response.body, "");
}

#[test]
fn test_script_action_end_to_end() {
    let dispatcher = common::dispatcher();
    let response = dispatcher.map_path_to_response("foo/update/7");
    assert!(response.body.starts_with("try {"));
    assert!(response.body.contains("$('list').innerHTML = '7';"));
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("text/javascript")
    );
}

#[test]
fn test_dispatch_strips_query_and_leading_slashes() {
    let dispatcher = common::dispatcher();
    let mut sink = CaptureSink::new();
    dispatcher.dispatch("/foo/greet/hi?x=1", None, &mut sink);
    assert_eq!(sink.body.as_deref(), Some("hello hi"));
    assert_eq!(sink.status, None);
}

#[test]
fn test_dispatch_writes_status_then_headers_then_body() {
    let dispatcher = common::dispatcher();
    let mut sink = CaptureSink::new();
    dispatcher.dispatch("/foo/jump", None, &mut sink);
    assert_eq!(sink.status, Some(302));
    assert_eq!(sink.status_line.as_deref(), Some("HTTP/1.1 302 Found"));
    assert_eq!(sink.header("Location"), Some("http://test.host/where"));
    assert_eq!(sink.events, vec!["status", "header", "body"]);
    assert_eq!(sink.body.as_deref(), Some(""));
}

#[test]
fn test_trusted_peer_sees_diagnostic_detail() {
    let dispatcher = common::dispatcher();
    let mut sink = CaptureSink::new();
    dispatcher.dispatch("foo/missing", Some("127.0.0.1"), &mut sink);
    let body = sink.body.unwrap();
    assert!(body.contains("UnknownAction"));
}

#[test]
fn test_untrusted_peer_sees_no_detail() {
    let dispatcher = common::dispatcher();

    let mut sink = CaptureSink::new();
    dispatcher.dispatch("foo/missing", Some("10.0.0.1"), &mut sink);
    assert!(sink.body.unwrap().contains("<pre></pre>"));

    let mut sink = CaptureSink::new();
    dispatcher.dispatch("foo/missing", None, &mut sink);
    assert!(sink.body.unwrap().contains("<pre></pre>"));
}

struct Rescuing;

impl Controller for Rescuing {
    fn name(&self) -> &'static str {
        "RescuingController"
    }

    fn invoke(
        &mut self,
        _ctx: &mut Context,
        _action: &str,
        _args: &[String],
    ) -> Result<Dispatch, Error> {
        Ok(Dispatch::Unknown)
    }

    fn rescue(&self, error: &Error) -> Option<Response> {
        match error {
            Error::UnknownAction(_) => Some(Response::with_body("rescued")),
            _ => None,
        }
    }
}

#[test]
fn test_controller_rescue_overrides_error_page() {
    let mut controllers = ControllerRegistry::new();
    controllers.mount("rescue", || Box::new(Rescuing));
    let dispatcher = Dispatcher::new(
        DispatcherConfig::new("http://test.host", "rescue"),
        Arc::new(controllers),
        Arc::new(common::fixture_templates()),
    );
    let response = dispatcher.map_path_to_response("rescue/missing");
    assert_eq!(response, Response::with_body("rescued"));
}

#[test]
fn test_routing_failure_has_no_controller_to_rescue() {
    let mut controllers = ControllerRegistry::new();
    controllers.mount("rescue", || Box::new(Rescuing));
    let dispatcher = Dispatcher::new(
        DispatcherConfig::new("http://test.host", "rescue"),
        Arc::new(controllers),
        Arc::new(common::fixture_templates()),
    );
    let response = dispatcher.map_path_to_response("qux");
    assert_eq!(response.status, Some(400));
}

#[test]
fn test_clean_path_variants() {
    assert_eq!(clean_path("/wiki/show?page=Home"), "wiki/show");
    assert_eq!(clean_path("wiki"), "wiki");
    assert_eq!(clean_path("//wiki//show"), "wiki//show");
    assert_eq!(clean_path("/"), "");
}
