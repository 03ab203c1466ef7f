//! Shortcut dispatch against a mocked backend
//!
//! A recording host stands in for the browser so reloads and navigations can
//! be counted.
#![allow(clippy::unwrap_used, clippy::panic)]

use display::api::{DetailStyle, LayoutMode, RunStyle};
use display::client::StateClient;
use display::config::DisplayConfig;
use display::dispatcher::{CommandOutcome, Dispatched, Dispatcher, Host};
use display::shortcuts::{Command, Page};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct RecordingHost {
    reloads: Rc<Cell<usize>>,
    visits: Rc<RefCell<Vec<String>>>,
}

impl Host for RecordingHost {
    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
    }
}

fn dispatcher_for(base_url: &str) -> Dispatcher<RecordingHost> {
    let client = StateClient::new(&DisplayConfig::for_origin(base_url)).unwrap();
    Dispatcher::new(client, RecordingHost::default())
}

async fn mock_post(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn outcome(dispatched: Option<Dispatched>) -> CommandOutcome {
    match dispatched {
        Some(Dispatched::Sent(_, outcome)) => outcome,
        other => panic!("Expected a sent command, got: {other:?}"),
    }
}

// === d / a / r / s / w / l / k: reload whenever a body comes back ===

#[tokio::test]
async fn test_next_station_success_reloads_once() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/next",
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "next_station": "Harbor"})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("d", Page::Home, || false).await);

    assert!(result.reloaded());
    assert_eq!(dispatcher.host().reloads.get(), 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_next_station_failure_does_not_reload() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/next",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("D", Page::LineMap, || false).await);

    assert!(matches!(result, CommandOutcome::Failed(_)));
    assert_eq!(dispatcher.host().reloads.get(), 0);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_next_station_reloads_even_on_error_status() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/next",
        ResponseTemplate::new(200).set_body_json(json!({"status": "error", "message": "end of line"})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = dispatcher.execute(Command::NextStation).await;

    assert!(result.reloaded());
    assert_eq!(dispatcher.host().reloads.get(), 1);
}

#[tokio::test]
async fn test_unconditional_reload_keys() {
    let cases = [
        ("a", "/api/state/prev"),
        ("r", "/api/state/reverse"),
        ("s", "/api/state/route/next"),
        ("w", "/api/state/route/prev"),
        ("l", "/api/state/line/next"),
        ("k", "/api/state/line/prev"),
    ];

    for (key, endpoint) in cases {
        let mock_server = MockServer::start().await;
        mock_post(
            &mock_server,
            endpoint,
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "direction": 1, "route_name": "down", "line_name": "line_3"})),
        )
        .await;

        let dispatcher = dispatcher_for(&mock_server.uri());
        let result = outcome(dispatcher.handle_key(key, Page::Other, || false).await);

        assert!(result.reloaded(), "key {key}");
        assert_eq!(dispatcher.host().reloads.get(), 1, "key {key}");
        mock_server.verify().await;
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_a_logged_failure() {
    let dispatcher = dispatcher_for("http://127.0.0.1:9");
    let result = dispatcher.execute(Command::PrevStation).await;

    assert!(matches!(result, CommandOutcome::Failed(_)));
    assert_eq!(dispatcher.host().reloads.get(), 0);
}

#[tokio::test]
async fn test_unexpected_field_types_still_reload() {
    let cases = [
        (Command::Reverse, "/api/state/reverse", json!({"status": "success", "direction": "reverse"})),
        (Command::NextRoute, "/api/state/route/next", json!({"status": "success", "route_name": 3})),
        (Command::NextLine, "/api/state/line/next", json!({"status": "success", "line_name": ["line_3"]})),
    ];

    for (command, endpoint, body) in cases {
        let mock_server = MockServer::start().await;
        mock_post(&mock_server, endpoint, ResponseTemplate::new(200).set_body_json(body)).await;

        let dispatcher = dispatcher_for(&mock_server.uri());
        let result = dispatcher.execute(command).await;

        assert!(result.reloaded(), "{endpoint}: {result:?}");
        assert_eq!(dispatcher.host().reloads.get(), 1, "{endpoint}");
    }
}

#[tokio::test]
async fn test_non_object_body_still_reloads() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/next",
        ResponseTemplate::new(200).set_body_json(json!(true)),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("d", Page::Home, || false).await);

    assert!(result.reloaded());
    assert_eq!(dispatcher.host().reloads.get(), 1);
    mock_server.verify().await;
}

// === t: reload only on success ===

#[tokio::test]
async fn test_toggle_door_reloads_on_success() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/door/toggle",
        ResponseTemplate::new(200).set_body_json(json!({"status": "success"})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("T", Page::Arrival, || false).await);

    assert!(result.reloaded());
    assert_eq!(dispatcher.host().reloads.get(), 1);
}

#[tokio::test]
async fn test_toggle_door_rejected_does_not_reload() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/door/toggle",
        ResponseTemplate::new(200).set_body_json(json!({"status": "error", "message": "doors locked"})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = dispatcher.execute(Command::ToggleDoor).await;

    match result {
        CommandOutcome::Rejected(response) => {
            assert_eq!(response.message.as_deref(), Some("doors locked"));
        }
        other => panic!("Expected Rejected, got: {other:?}"),
    }
    assert_eq!(dispatcher.host().reloads.get(), 0);
}

// === f: never reload ===

#[tokio::test]
async fn test_quiet_next_station_never_reloads() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/next_no_refresh",
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "next_station": ["2", "7"]})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("f", Page::Home, || false).await);

    match result {
        CommandOutcome::Applied(response) => {
            assert_eq!(response.next_station, Some(json!(["2", "7"])));
        }
        other => panic!("Expected Applied, got: {other:?}"),
    }
    assert_eq!(dispatcher.host().reloads.get(), 0);
}

// === page-scoped layout and style keys ===

#[tokio::test]
async fn test_layout_keys_on_line_map() {
    let cases = [("i", "one_line"), ("o", "two_line"), ("p", "auto")];

    for (key, mode) in cases {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/state/layout"))
            .and(body_json(json!({"mode": mode})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "success", "layout": mode})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let dispatcher = dispatcher_for(&mock_server.uri());
        let result = outcome(dispatcher.handle_key(key, Page::LineMap, || false).await);

        assert!(result.reloaded(), "key {key}");
        mock_server.verify().await;
    }
}

#[tokio::test]
async fn test_home_o_sends_detail_without_branches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/state/run_style"))
        .and(body_json(json!({"style": "detail"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    outcome(dispatcher.handle_key("o", Page::Home, || false).await);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_home_o_sends_default_with_branches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/state/run_style"))
        .and(body_json(json!({"style": "default"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    outcome(dispatcher.handle_key("o", Page::Home, || true).await);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_line_detail_style_keys() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/state/detail_style"))
        .and(body_json(json!({"style": "column"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = outcome(dispatcher.handle_key("o", Page::LineDetail, || false).await);

    assert!(result.reloaded());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_style_update_rejected_is_logged_only() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/run_style",
        ResponseTemplate::new(400).set_body_json(json!({"status": "error", "message": "unknown style"})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = dispatcher.set_run_style(RunStyle::Detail).await;

    assert!(matches!(result, CommandOutcome::Rejected(_)));
    assert_eq!(dispatcher.host().reloads.get(), 0);
}

#[tokio::test]
async fn test_layout_success_with_object_layout_field_reloads() {
    let mock_server = MockServer::start().await;
    mock_post(
        &mock_server,
        "/api/state/layout",
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "layout": {"mode": "auto"}})),
    )
    .await;

    let dispatcher = dispatcher_for(&mock_server.uri());
    let result = dispatcher.set_layout(LayoutMode::Auto).await;

    match result {
        CommandOutcome::Reloaded(response) => {
            assert_eq!(response.layout, Some(json!({"mode": "auto"})));
        }
        other => panic!("Expected Reloaded, got: {other:?}"),
    }
    assert_eq!(dispatcher.host().reloads.get(), 1);
}

#[tokio::test]
async fn test_direct_setters_hit_their_endpoints() {
    let mock_server = MockServer::start().await;
    for endpoint in ["/api/state/layout", "/api/state/detail_style"] {
        mock_post(
            &mock_server,
            endpoint,
            ResponseTemplate::new(200).set_body_json(json!({"status": "success"})),
        )
        .await;
    }

    let dispatcher = dispatcher_for(&mock_server.uri());
    assert!(dispatcher.set_layout(LayoutMode::Auto).await.reloaded());
    assert!(dispatcher.set_detail_style(DetailStyle::Default).await.reloaded());
    assert_eq!(dispatcher.host().reloads.get(), 2);
    mock_server.verify().await;
}

// === navigation and unbound keys ===

#[tokio::test]
async fn test_digit_keys_navigate_without_requests() {
    let mock_server = MockServer::start().await;
    let dispatcher = dispatcher_for(&mock_server.uri());

    for key in ["1", "2", "3", "4"] {
        let dispatched = dispatcher.handle_key(key, Page::Home, || false).await;
        assert!(matches!(dispatched, Some(Dispatched::Navigated(_))));
    }

    assert_eq!(
        *dispatcher.host().visits.borrow(),
        vec!["/", "/line_map", "/line_detail", "/arrival"]
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unbound_keys_do_nothing() {
    let mock_server = MockServer::start().await;
    let dispatcher = dispatcher_for(&mock_server.uri());

    assert!(dispatcher.handle_key("p", Page::Home, || false).await.is_none());
    assert!(dispatcher.handle_key("Escape", Page::LineMap, || false).await.is_none());
    assert!(dispatcher.handle_key("x", Page::LineMap, || false).await.is_none());

    assert!(mock_server.received_requests().await.unwrap().is_empty());
    assert_eq!(dispatcher.host().reloads.get(), 0);
}
