use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use super::*;
use crate::SevenTvError;
use crate::gql::{BROWSE_EMOTES, SEARCH_EMOTES, Variables};

#[derive(Default)]
struct MockTransport {
    calls: AtomicUsize,
    requests: std::sync::Mutex<Vec<GqlRequest>>,
    responses: std::sync::Mutex<VecDeque<Result<String, SevenTvError>>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    fn with_responses(responses: Vec<Result<String, SevenTvError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> GqlRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl CatalogTransport for MockTransport {
    async fn post_gql(&self, request: &GqlRequest) -> Result<String, SevenTvError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(results_body(&["catJAM"], 1)))
    }
}

fn results_body(names: &[&str], count: u32) -> String {
    let items: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "id": format!("60ae958e229664e8667aea3{i}"),
                "name": name,
                "animated": false,
                "host": { "url": format!("//cdn.7tv.app/emote/60ae958e229664e8667aea3{i}"), "files": [] }
            })
        })
        .collect();
    serde_json::json!({ "data": { "emotes": { "count": count, "items": items } } }).to_string()
}

fn error_body(message: &str) -> String {
    serde_json::json!({ "errors": [{ "message": message }], "data": null }).to_string()
}

fn unthrottled(transport: MockTransport) -> SearchController<MockTransport> {
    SearchController::with_min_interval(transport, Settings::default(), Duration::ZERO)
}

#[tokio::test]
async fn test_rapid_requests_are_throttled() {
    let controller = SearchController::new(MockTransport::default(), Settings::default());

    assert_eq!(controller.fetch().await, FetchOutcome::Loaded { count: 1 });
    assert_eq!(controller.fetch().await, FetchOutcome::Throttled);
    assert_eq!(controller.transport.calls(), 1);
}

#[tokio::test]
async fn test_requests_after_interval_are_accepted() {
    let controller = unthrottled(MockTransport::default());

    controller.fetch().await;
    controller.fetch().await;
    assert_eq!(controller.transport.calls(), 2);
}

#[tokio::test]
async fn test_request_while_in_flight_is_dropped() {
    let gate = Arc::new(Notify::new());
    let controller = unthrottled(MockTransport {
        gate: Some(gate.clone()),
        ..MockTransport::default()
    });

    let (first, second, ()) = tokio::join!(controller.fetch(), controller.fetch(), async {
        gate.notify_one();
    });

    assert_eq!(first, FetchOutcome::Loaded { count: 1 });
    assert_eq!(second, FetchOutcome::Busy);
    assert_eq!(controller.transport.calls(), 1);
    assert!(!controller.snapshot().fetching);
}

#[tokio::test]
async fn test_abandoned_fetch_does_not_stay_in_flight() {
    let gate = Arc::new(Notify::new());
    let controller = unthrottled(MockTransport {
        gate: Some(gate.clone()),
        ..MockTransport::default()
    });

    let abandoned = tokio::time::timeout(Duration::from_millis(20), controller.fetch()).await;
    assert!(abandoned.is_err());
    assert!(!controller.snapshot().fetching);

    gate.notify_one();
    assert_eq!(controller.fetch().await, FetchOutcome::Loaded { count: 1 });
}

#[tokio::test]
async fn test_empty_text_browses_category() {
    let controller = unthrottled(MockTransport::default());

    controller.search("").await;
    assert_eq!(controller.transport.last_request().query, BROWSE_EMOTES);

    controller.search("catJAM").await;
    let request = controller.transport.last_request();
    assert_eq!(request.query, SEARCH_EMOTES);
    let Variables::Search(vars) = request.variables else {
        panic!("expected search variables");
    };
    assert_eq!(vars.query.as_deref(), Some("catJAM"));
    assert!(!vars.filter.unwrap().exact_match);
}

#[tokio::test]
async fn test_server_error_keeps_previous_results() {
    let controller = unthrottled(MockTransport::with_responses(vec![
        Ok(results_body(&["catJAM", "Pog"], 2)),
        Ok(error_body("query too short")),
        Ok(results_body(&["EZ"], 1)),
    ]));

    controller.fetch().await;
    let outcome = controller.fetch().await;
    assert_eq!(outcome, FetchOutcome::ServerError("query too short".into()));

    let state = controller.snapshot();
    assert_eq!(state.error, "query too short");
    assert_eq!(state.results.as_ref().map(Vec::len), Some(2));
    assert!(!state.fetching);
    assert_eq!(controller.status_line(), "query too short");

    controller.fetch().await;
    let state = controller.snapshot();
    assert!(state.error.is_empty());
    assert_eq!(state.results.unwrap()[0].name, "EZ");
}

#[tokio::test]
async fn test_transport_failure_returns_to_idle() {
    let controller = unthrottled(MockTransport::with_responses(vec![
        Err(SevenTvError::ApiError {
            status: 502,
            message: "bad gateway".into(),
        }),
        Ok("<html>".into()),
    ]));

    assert_eq!(controller.fetch().await, FetchOutcome::TransportFailed);
    assert_eq!(controller.fetch().await, FetchOutcome::TransportFailed);

    let state = controller.snapshot();
    assert!(!state.fetching);
    assert!(state.error.is_empty());
    assert!(state.results.is_none());
}

#[tokio::test]
async fn test_null_errors_field_is_a_success() {
    let controller = unthrottled(MockTransport::with_responses(vec![Ok(serde_json::json!({
        "data": { "emotes": { "count": 1, "items": [{
            "id": "60ae958e229664e8667aea38",
            "name": "catJAM",
            "host": { "url": "//cdn.7tv.app/emote/60ae958e229664e8667aea38" }
        }] } },
        "errors": null
    })
    .to_string())]));

    assert_eq!(controller.fetch().await, FetchOutcome::Loaded { count: 1 });
    assert!(controller.snapshot().error.is_empty());
}

#[tokio::test]
async fn test_null_result_list_is_not_stored() {
    let controller = unthrottled(MockTransport::with_responses(vec![Ok(
        r#"{ "data": { "emotes": { "count": 0, "items": null } } }"#.into(),
    )]));

    assert_eq!(controller.fetch().await, FetchOutcome::NoResults);
    assert!(controller.snapshot().results.is_none());
}

#[tokio::test]
async fn test_results_fetch_on_first_inspection() {
    let controller = unthrottled(MockTransport::default());

    let results = controller.results().await;
    assert_eq!(results.len(), 1);
    assert_eq!(controller.transport.calls(), 1);

    controller.results().await;
    assert_eq!(controller.transport.calls(), 1);
}

#[tokio::test]
async fn test_failed_first_inspection_yields_empty_list() {
    let controller = unthrottled(MockTransport::with_responses(vec![Ok(error_body("down"))]));
    assert!(controller.results().await.is_empty());
}

#[tokio::test]
async fn test_pagination() {
    let controller = unthrottled(MockTransport::with_responses(vec![Ok(results_body(
        &["a", "b"],
        45,
    ))]));

    controller.set_page(0);
    assert_eq!(controller.snapshot().page, 1);
    assert_eq!(controller.prev_page(), 1);

    controller.fetch().await;
    assert_eq!(controller.total_pages(), 3);
    assert_eq!(controller.next_page(), 2);
    assert_eq!(controller.status_line(), "Page 2 of 3");

    controller.set_query("new text");
    assert_eq!(controller.snapshot().page, 1);
}
