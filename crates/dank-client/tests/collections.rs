//! Collection accessor tests: fetch through the cache, then filter in memory.

use dank_client::{DankClient, Filter, Predicate, Record, RecordId, Resource};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Steel Sword", "price": 15},
            {"id": 2, "name": "Axe", "price": 25},
            {"id": 3, "name": "Wooden Sword", "price": 8},
            {"id": 4, "name": "sword", "price": 0},
            {"id": 5, "name": "Mystery Box", "price": "abc"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/creatures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c-1", "name": "Goldfish", "rarity": "common"},
            {"id": "c-2", "name": "Kraken", "rarity": "legendary"}
        ])))
        .mount(&server)
        .await;

    server
}

fn client_for(server: &MockServer) -> DankClient {
    DankClient::builder()
        .base_url(server.uri())
        .build()
        .expect("Failed to build client")
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().filter_map(Record::name).collect()
}

#[tokio::test]
async fn test_list_returns_whole_collection() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let items = client.items().list().await.unwrap();
    assert_eq!(items.len(), 5);
}

#[tokio::test]
async fn test_query_contains_any_preserves_order() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let swords = client
        .items()
        .query(&Filter::contains_any("name", ["sword"]))
        .await
        .unwrap();

    assert_eq!(names(&swords), vec!["Steel Sword", "Wooden Sword", "sword"]);
}

#[tokio::test]
async fn test_query_range_skips_non_numeric() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let mid = client
        .items()
        .query(&Filter::range("price", 10.0, 20.0))
        .await
        .unwrap();

    assert_eq!(names(&mid), vec!["Steel Sword"]);
}

#[tokio::test]
async fn test_query_fuzzy_and_above() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let fuzzy_only = client
        .items()
        .query(&Filter::fuzzy("name", "sord"))
        .await
        .unwrap();
    assert!(names(&fuzzy_only).contains(&"sword"));

    let priced = client
        .items()
        .query(&Filter::above("price", 0.0).and(Filter::fuzzy("name", "sord")))
        .await
        .unwrap();
    assert!(!names(&priced).contains(&"sword"));
}

#[tokio::test]
async fn test_query_empty_combinators() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let everything = client.items().query(&Filter::all([])).await.unwrap();
    let nothing = client.items().query(&Filter::any([])).await.unwrap();

    assert_eq!(everything.len(), 5);
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_query_with_closure() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let legendary = |record: &Record| record.get_str("rarity") == Some("legendary");
    let found = client.creatures().query(&legendary).await.unwrap();

    assert_eq!(names(&found), vec!["Kraken"]);
}

#[tokio::test]
async fn test_query_with_boxed_predicate() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let predicate: Box<dyn Predicate> = Box::new(Filter::contains_any("name", ["fish"]));
    let found = client.creatures().query(predicate.as_ref()).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), Some(RecordId::Text("c-1".to_string())));
}

#[tokio::test]
async fn test_find_first_match() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let axe = client
        .items()
        .find(&Filter::contains_any("name", ["axe"]))
        .await
        .unwrap()
        .expect("axe should exist");
    assert_eq!(axe.get_number("price"), Some(25.0));

    let missing = client
        .items()
        .find(&Filter::contains_any("name", ["trident"]))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_queries_share_one_fetch() {
    let server = catalog_server().await;
    let client = client_for(&server);

    client.items().list().await.unwrap();
    client
        .items()
        .query(&Filter::below("price", 10.0))
        .await
        .unwrap();
    client
        .resource(Resource::Items)
        .query(&Filter::above("price", 10.0))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_unknown_collection_surfaces_error() {
    let server = catalog_server().await;
    let client = client_for(&server);

    let err = client.collection("/weapons").list().await.unwrap_err();
    assert!(err.is_not_found());
}
