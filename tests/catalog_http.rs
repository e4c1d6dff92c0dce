//! `HttpCatalogClient` against a local stub of the catalog API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use football_search::catalog::{CatalogClient, HttpCatalogClient};
use football_search::domain::{CatalogError, NetworkError, SearchKind, SearchQuery};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Stub {
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Serves `router` on an ephemeral port and returns the base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/football/1.0/")
}

fn player(id: usize) -> Value {
    json!({
        "playerID": id.to_string(),
        "playerFirstName": "David",
        "playerSecondName": format!("Beckham {id}"),
        "playerNationality": "England",
        "playerAge": "47",
        "playerClub": "Inter Miami"
    })
}

async fn search(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    stub.requests.lock().unwrap().push(body.clone());
    let players: Vec<Value> = match body["searchType"].as_str() {
        Some("teams") => vec![],
        Some("players") => (10..13).map(player).collect(),
        _ => (0..10).map(player).collect(),
    };
    Json(json!({
        "result": {
            "players": players,
            "teams": [{"teamID": "t1", "teamName": "Beckenham Town", "teamStadium": "Eden Park",
                       "teamNationality": "England", "teamCity": "Beckenham"}],
            "status": true,
            "message": "",
            "request_order": body["requestOrder"],
            "searchType": body["searchType"],
            "searchString": body["searchString"],
            "serverAlert": ""
        }
    }))
}

async fn stub_client() -> (HttpCatalogClient, Stub) {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/football/1.0/search", post(search))
        .with_state(stub.clone());
    let base = serve(router).await;
    (HttpCatalogClient::new(&base, 10, Some(Duration::from_secs(5))).unwrap(), stub)
}

#[tokio::test]
async fn full_search_decodes_page_and_sends_camel_case_body() {
    let (client, stub) = stub_client().await;

    let page = client
        .search(&SearchQuery::both("Beck").with_request_order(7))
        .await
        .unwrap();

    assert_eq!(page.players.len(), 10);
    assert_eq!(page.teams.len(), 1);
    assert!(page.has_more_players);
    assert!(!page.has_more_teams);
    assert_eq!(page.players[0].display_name(), "David Beckham 0");
    assert_eq!(page.teams[0].city, "Beckenham");

    let requests = stub.requests.lock().unwrap();
    assert_eq!(
        requests[0],
        json!({"searchString": "Beck", "searchType": null, "offset": 0, "requestOrder": 7})
    );
}

#[tokio::test]
async fn single_kind_query_sends_type_and_offset() {
    let (client, stub) = stub_client().await;

    let page = client
        .search(&SearchQuery::more("Beck", SearchKind::Players, 10))
        .await
        .unwrap();
    assert_eq!(page.players.len(), 3);
    assert!(!page.has_more_players);

    let body = stub.requests.lock().unwrap()[0].clone();
    assert_eq!(body["searchType"], "players");
    assert_eq!(body["offset"], 10);
}

#[tokio::test]
async fn server_error_is_transport_error_with_status() {
    let router = Router::new().route(
        "/api/football/1.0/search",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let client = HttpCatalogClient::new(&serve(router).await, 10, None).unwrap();

    let err = client.search(&SearchQuery::both("Beck")).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Network(NetworkError::Transport { status: Some(500), .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let router = Router::new().route("/api/football/1.0/search", post(|| async { "<html>oops</html>" }));
    let client = HttpCatalogClient::new(&serve(router).await, 10, None).unwrap();

    let err = client.search(&SearchQuery::both("Beck")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(NetworkError::DecodeFailed(_))));
}

#[tokio::test]
async fn envelope_without_arrays_is_an_empty_page() {
    let router = Router::new().route(
        "/api/football/1.0/search",
        post(|| async { Json(json!({"result": {"searchString": "zz", "searchType": "coaches"}})) }),
    );
    let client = HttpCatalogClient::new(&serve(router).await, 10, None).unwrap();

    let page = client.search(&SearchQuery::both("zz")).await.unwrap();
    assert!(page.players.is_empty());
    assert!(page.teams.is_empty());
    assert!(!page.has_more_players);
    assert!(!page.has_more_teams);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = HttpCatalogClient::new(&format!("http://127.0.0.1:{port}/"), 10, None).unwrap();

    let err = client.search(&SearchQuery::both("Beck")).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Network(NetworkError::Transport { status: None, .. })
    ));
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(matches!(
        HttpCatalogClient::new("::not a url::", 10, None),
        Err(CatalogError::InvalidEndpoint(_))
    ));
}
