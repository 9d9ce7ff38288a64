use std::time::Duration;

use shareholding_lib::error::INVALID_ID_MESSAGE;
use shareholding_lib::views::{ISSUER_NOT_FOUND_MESSAGE, ITEMS_PER_PAGE};
use shareholding_lib::{
    Client, FetchStatus, FilerIssuersView, FilerView, FilersView, IssuerHistoryView,
    IssuerOwnershipsView, IssuerSearchView, ResourceId,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILERS: &str = include_str!("../../shareholding_api/tests/fixtures/filers.json");
const FILER: &str = include_str!("../../shareholding_api/tests/fixtures/filer.json");
const FILER_ISSUERS: &str = include_str!("../../shareholding_api/tests/fixtures/filer_issuers.json");
const ISSUERS_SEARCH: &str =
    include_str!("../../shareholding_api/tests/fixtures/issuers_search.json");
const OWNERSHIPS: &str = include_str!("../../shareholding_api/tests/fixtures/ownerships.json");
const HISTORY: &str = include_str!("../../shareholding_api/tests/fixtures/history.json");

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

/// Polls until the server has seen `expected` requests or two seconds pass.
async fn wait_for_requests(server: &MockServer, expected: usize) {
    for _ in 0..200 {
        if request_count(server).await >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server never received {} requests", expected);
}

#[tokio::test]
async fn filers_view_loads_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilersView::new(Client::with_base_url(&server.uri()), 1, "");
    assert!(view.loading());

    let state = view.settled().await;
    assert_eq!(state.status(), FetchStatus::Success);
    assert!(!view.loading());
    assert_eq!(view.error(), None);
    assert_eq!(view.filers().len(), 2);
    assert_eq!(view.filers()[0].name, "野村證券株式会社");
    assert_eq!(view.total_count(), 2);
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.current_page(), 1);
}

#[tokio::test]
async fn filers_view_page_change_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param("skip", "100"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilersView::new(Client::with_base_url(&server.uri()), 1, "");
    view.settled().await;

    view.set_current_page(3);
    assert!(view.loading());
    view.settled().await;
    assert_eq!(view.current_page(), 3);
}

#[tokio::test]
async fn filers_view_search_is_debounced_and_resets_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param("skip", "0"))
        .and(query_param("search", "野村"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = FilersView::new(Client::with_base_url(&server.uri()), 2, "");
    view.settled().await;
    assert_eq!(request_count(&server).await, 1);

    view.set_search_query("野");
    view.set_search_query("野村");
    assert_eq!(view.search_query(), "野村");
    assert_eq!(view.current_page(), 1);

    // The page reset goes out right away; the search text does not.
    view.settled().await;
    assert_eq!(request_count(&server).await, 2);

    wait_for_requests(&server, 3).await;
    view.settled().await;
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn filers_view_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let view = FilersView::new(Client::with_base_url(&server.uri()), 1, "");
    let state = view.settled().await;
    assert_eq!(state.status(), FetchStatus::Failure);
    assert_eq!(
        view.error().as_deref(),
        Some("API request failed: 500 Internal Server Error - boom")
    );
    assert!(view.filers().is_empty());
    assert_eq!(view.total_pages(), 0);

    view.refetch();
    view.settled().await;
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn filer_view_loads_by_string_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilerView::new(Client::with_base_url(&server.uri()), "42");
    view.settled().await;
    let filer = view.filer().unwrap();
    assert_eq!(filer.id, 42);
    assert_eq!(view.filer_id(), ResourceId::Valid(42));
}

#[tokio::test]
async fn invalid_id_leaves_views_idle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER))
        .expect(0)
        .mount(&server)
        .await;
    let client = Client::with_base_url(&server.uri());

    let filer = FilerView::new(client.clone(), "abc");
    let issuers = FilerIssuersView::new(client.clone(), None::<i64>, 1, "");
    let ownerships = IssuerOwnershipsView::new(client.clone(), 0);
    let history = IssuerHistoryView::new(client, 1, "x");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(filer.state().status(), FetchStatus::Idle);
    assert_eq!(issuers.state().status(), FetchStatus::Idle);
    assert_eq!(ownerships.state().status(), FetchStatus::Idle);
    assert_eq!(history.state().status(), FetchStatus::Idle);
    assert_eq!(filer.error(), None);

    filer.refetch();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn filer_view_switching_to_valid_id_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilerView::new(Client::with_base_url(&server.uri()), "");
    assert!(!view.loading());
    view.set_filer_id(42);
    assert!(view.loading());
    view.settled().await;
    assert!(view.filer().is_some());
}

#[tokio::test]
async fn filer_issuers_view_pages_through_holdings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers/1/issuers"))
        .and(query_param("skip", "50"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER_ISSUERS))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilerIssuersView::new(Client::with_base_url(&server.uri()), "1", 2, "");
    view.settled().await;
    assert_eq!(view.total_count(), 120);
    assert_eq!(view.total_pages(), 120_u64.div_ceil(ITEMS_PER_PAGE));
    let issuers = view.issuers();
    assert_eq!(issuers[0].id, 10);
    assert!(issuers[1].is_new());
}

#[tokio::test]
async fn filer_issuers_view_search_returns_to_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers/1/issuers"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .and(query_param("search", "トヨタ"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER_ISSUERS))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/filers/1/issuers"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILER_ISSUERS))
        .mount(&server)
        .await;

    let mut view = FilerIssuersView::new(Client::with_base_url(&server.uri()), 1, 3, "");
    view.settled().await;
    assert_eq!(view.current_page(), 3);

    view.set_search_query("トヨタ");
    assert_eq!(view.current_page(), 1);

    wait_for_requests(&server, 3).await;
    view.settled().await;
    let requests = server.received_requests().await.unwrap_or_default();
    let last = requests.last().unwrap();
    let pairs: Vec<(String, String)> = last
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("skip".to_string(), "0".to_string())));
    assert!(pairs.contains(&("search".to_string(), "トヨタ".to_string())));
    assert_eq!(view.error(), None);
}

#[tokio::test]
async fn huge_page_number_still_sends_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers"))
        .and(query_param("skip", u64::MAX.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(FILERS))
        .expect(1)
        .mount(&server)
        .await;

    let view = FilersView::new(Client::with_base_url(&server.uri()), u64::MAX, "");
    let state = view.settled().await;
    assert_eq!(state.status(), FetchStatus::Success);
    assert_eq!(view.current_page(), u64::MAX);
}

#[tokio::test]
async fn issuer_search_waits_for_execute() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuers"))
        .and(query_param("search", "トヨタ"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ISSUERS_SEARCH))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = IssuerSearchView::new(Client::with_base_url(&server.uri()), "");
    view.set_search("トヨタ");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(request_count(&server).await, 0);
    assert!(!view.loading());

    view.execute_search();
    // Typing after execution does not change the request in flight.
    view.set_search("ホンダ");
    view.settled().await;
    assert_eq!(view.total_count(), 1);
    assert_eq!(view.issuers()[0].id, 10);
    assert_eq!(view.search(), "ホンダ");
}

#[tokio::test]
async fn issuer_search_blank_query_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ISSUERS_SEARCH))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = IssuerSearchView::new(Client::with_base_url(&server.uri()), "");
    view.set_search("   ");
    view.execute_search();
    let state = view.settled().await;
    assert_eq!(state.status(), FetchStatus::Success);
    assert!(view.issuers().is_empty());
    assert_eq!(view.total_count(), 0);
}

#[tokio::test]
async fn issuer_search_initial_text_runs_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuers"))
        .and(query_param("search", "7203"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ISSUERS_SEARCH))
        .expect(2)
        .mount(&server)
        .await;

    let view = IssuerSearchView::new(Client::with_base_url(&server.uri()), "7203");
    view.settled().await;
    assert_eq!(view.total_count(), 1);

    // Same text again still counts as a new search.
    view.execute_search();
    view.settled().await;
}

#[tokio::test]
async fn ownerships_view_loads_holders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuers/10/ownerships"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OWNERSHIPS))
        .expect(1)
        .mount(&server)
        .await;

    let view = IssuerOwnershipsView::new(Client::with_base_url(&server.uri()), 10);
    view.settled().await;
    let data = view.data().unwrap();
    assert_eq!(data.issuer.id, 10);
    assert_eq!(data.ownerships.len(), 2);
}

#[tokio::test]
async fn ownerships_view_localizes_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuers/999/ownerships"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let view = IssuerOwnershipsView::new(Client::with_base_url(&server.uri()), "999");
    let state = view.settled().await;
    assert_eq!(state.error.as_deref(), Some(ISSUER_NOT_FOUND_MESSAGE));
    assert_eq!(view.error().as_deref(), Some(ISSUER_NOT_FOUND_MESSAGE));
    assert!(view.data().is_none());
}

#[tokio::test]
async fn ownerships_view_passes_other_errors_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/issuers/10/ownerships"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let view = IssuerOwnershipsView::new(Client::with_base_url(&server.uri()), 10);
    view.settled().await;
    assert_eq!(
        view.error().as_deref(),
        Some("API request failed: 503 Service Unavailable - down")
    );
}

#[tokio::test]
async fn history_view_loads_filings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filers/1/issuers/10/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY))
        .expect(1)
        .mount(&server)
        .await;

    let view = IssuerHistoryView::new(Client::with_base_url(&server.uri()), "1", "10");
    view.settled().await;
    let data = view.data().unwrap();
    assert_eq!(data.filer.id, 1);
    assert_eq!(data.issuer.id, 10);
    assert_eq!(data.history[0].doc_id, "S100ABCD");
}

#[test]
fn invalid_id_message_is_localized() {
    assert_eq!(INVALID_ID_MESSAGE, "有効なIDを指定してください");
}
