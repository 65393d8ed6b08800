use httpmock::prelude::*;
use rankit::config::{AppConfig, LookupMode};
use rankit::{build_router, AppState, CatalogLookup, HttpCatalog, LookupQuery, RankingError};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

fn descriptor_json(source_id: &str) -> Value {
    json!({
        "sourceId": source_id,
        "name": "Electric Kettle",
        "imageUrl": "https://img.example/kettle.jpg",
        "link": format!("https://shop.example/dp/{}", source_id),
        "price": "¥3,480",
    })
}

#[tokio::test]
async fn test_http_catalog_forwards_identifier() {
    let server = MockServer::start_async().await;
    let catalog_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/items")
                .query_param("identifier", "B0KETTLE00");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(descriptor_json("B0KETTLE00"));
        })
        .await;

    let catalog = HttpCatalog::new(&server.url("/items"), Duration::from_secs(2)).unwrap();
    let descriptor = catalog
        .lookup(&LookupQuery::by_identifier("B0KETTLE00"))
        .await
        .unwrap();

    catalog_mock.assert_async().await;
    assert_eq!(descriptor.source_id, "B0KETTLE00");
    assert_eq!(descriptor.name, "Electric Kettle");
    assert_eq!(descriptor.price, "¥3,480");
}

#[tokio::test]
async fn test_http_catalog_upstream_failure() {
    let server = MockServer::start_async().await;
    let catalog_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/items");
            then.status(503);
        })
        .await;

    let catalog = HttpCatalog::new(&server.url("/items"), Duration::from_secs(2)).unwrap();
    let err = catalog
        .lookup(&LookupQuery::by_keyword("kettle"))
        .await
        .unwrap_err();

    catalog_mock.assert_async().await;
    assert!(matches!(err, RankingError::LookupFailed { .. }));
}

#[tokio::test]
async fn test_http_catalog_rejects_empty_query_without_calling_upstream() {
    let server = MockServer::start_async().await;
    let catalog_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/items");
            then.status(200).json_body(descriptor_json("unused"));
        })
        .await;

    let catalog = HttpCatalog::new(&server.url("/items"), Duration::from_secs(2)).unwrap();
    let err = catalog.lookup(&LookupQuery::default()).await.unwrap_err();

    assert!(matches!(err, RankingError::InputMissing { .. }));
    assert_eq!(catalog_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_lookup_endpoint_in_http_mode() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/items").query_param("keyword", "kettle");
            then.status(200).json_body(descriptor_json("B0KETTLE00"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/items").query_param("keyword", "broken");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let mut config = AppConfig::default();
    config.lookup.mode = LookupMode::Http;
    config.lookup.endpoint = Some(server.url("/items"));
    let state = AppState::from_config(&config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/lookup", addr))
        .query(&[("keyword", "kettle")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["sourceId"], "B0KETTLE00");

    let response = client
        .get(format!("http://{}/api/lookup", addr))
        .query(&[("keyword", "broken")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch product information");
}
