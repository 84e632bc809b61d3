//! End-to-end tests against a bound product service.

use std::net::SocketAddr;

use product_service::config::ServiceConfig;
use product_service::registry::IdStrategy;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_greeting() {
    let addr: SocketAddr = "127.0.0.1:28381".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "Hello World");
}

#[tokio::test]
async fn test_create_delete_get_lifecycle() {
    let addr: SocketAddr = "127.0.0.1:28382".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/products"))
        .json(&json!({"name": "Tablet"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"4": "Tablet"}));

    let res = client.get(server.url("/products/4")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"4": "Tablet"}));

    let res = client.delete(server.url("/products/4")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!([{"1": "Laptop"}, {"2": "Phone"}, {"3": "Mouse"}])
    );

    let res = client.get(server.url("/products/4")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await.unwrap(), json!("product not found"));

    // Monotonic ids: 4 is not handed out again.
    let res = client
        .post(server.url("/products"))
        .json(&json!({"name": "Monitor"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"5": "Monitor"}));
}

#[tokio::test]
async fn test_update_flow() {
    let addr: SocketAddr = "127.0.0.1:28383".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .put(server.url("/products/2"))
        .json(&json!({"name": "Smartphone"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"2": "Smartphone"}));

    let res = client
        .put(server.url("/products/2"))
        .json(&json!({"name": "ab"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(server.url("/products/2")).send().await.unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"2": "Smartphone"}));
}

#[tokio::test]
async fn test_error_classes() {
    let addr: SocketAddr = "127.0.0.1:28384".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/products/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(server.url("/products?name=Laptop"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!("name query param was disabled")
    );

    let res = client
        .post(server.url("/products"))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // A rejected body fails only that request.
    let res = client.get(server.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Vec<Value>>().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_length_derived_ids_reused() {
    let addr: SocketAddr = "127.0.0.1:28385".parse().unwrap();
    let mut config = ServiceConfig::default();
    config.registry.id_strategy = IdStrategy::LengthDerived;
    let server = common::start_server(addr, config).await;
    let client = common::client();

    let res = client.delete(server.url("/products/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(server.url("/products"))
        .json(&json!({"name": "Keyboard"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"3": "Keyboard"}));
}

#[tokio::test]
async fn test_graceful_shutdown_stops_serving() {
    let addr: SocketAddr = "127.0.0.1:28386".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    assert!(client.get(server.url("/")).send().await.is_err());
}
