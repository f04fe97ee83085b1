use axum_test::TestServer;
use scim_core::config::DispatchConfig;
use scim_core::handler::ResourceHandler;
use scim_core::http::app;
use scim_core::memory::InMemoryHandler;
use scim_core::router::Router;
use serde_json::{json, Value};
use std::sync::Arc;

async fn server() -> TestServer {
    let router = Router::new(DispatchConfig::default());
    router
        .registry
        .register("Users", Arc::new(InMemoryHandler::new("User")) as Arc<dyn ResourceHandler>)
        .await;
    TestServer::new(app(Arc::new(router))).unwrap()
}

#[tokio::test]
async fn create_get_replace_delete_round_trip() {
    let server = server().await;

    let created = server.post("/Users").json(&json!({"userName": "bjensen"})).await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let fetched = server.get(&format!("/Users/{}", id)).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["userName"], "bjensen");

    let replaced = server
        .put(&format!("/Users/{}", id))
        .json(&json!({"userName": "bjensen2"}))
        .await;
    replaced.assert_status_ok();
    assert_eq!(replaced.json::<Value>()["userName"], "bjensen2");

    let deleted = server.delete(&format!("/Users/{}", id)).await;
    deleted.assert_status(axum::http::StatusCode::NO_CONTENT);

    let missing = server.get(&format!("/Users/{}", id)).await;
    missing.assert_status_not_found();
}

#[tokio::test]
async fn create_response_carries_meta() {
    let server = server().await;
    let created = server.post("/Users").json(&json!({"userName": "carol"})).await;
    let body = created.json::<Value>();
    assert!(body.get("meta").is_some());
    assert!(body["meta"]["created"].is_string());
}
