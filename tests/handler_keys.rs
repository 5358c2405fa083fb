mod common;

use serde_json::json;
use url_redirector::utils::id_generator::hash_key;

#[tokio::test]
async fn test_create_key_as_admin() {
    let state = common::create_test_state().await;
    let admin = common::issue_key(&state, Some(true)).await;
    let server = common::test_server(state);

    let response = server
        .post("/admin/key")
        .add_header("Cookie", common::access_cookie(&admin))
        .json(&json!({}))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let key = body["key"].as_str().unwrap();
    assert_eq!(key.len(), 16);
    assert_eq!(body["hashed"], hash_key(key));
    assert!(body["admin"].is_null());

    // The new key can create links but not administer keys.
    let add = server
        .post("/add")
        .add_header("Cookie", common::access_cookie(key))
        .json(&json!({ "url": "https://example.org" }))
        .await;
    add.assert_status_ok();

    let forbidden = server
        .get("/admin/keys")
        .add_header("Cookie", common::access_cookie(key))
        .await;
    assert_eq!(forbidden.status_code(), 403);
}

#[tokio::test]
async fn test_non_admin_forbidden_vs_missing_unauthorized() {
    let state = common::create_test_state().await;
    let plain = common::issue_key(&state, Some(false)).await;
    let server = common::test_server(state);

    let forbidden = server
        .post("/admin/key")
        .add_header("Cookie", common::access_cookie(&plain))
        .json(&json!({ "admin": true }))
        .await;
    assert_eq!(forbidden.status_code(), 403);
    assert_eq!(
        forbidden.json::<serde_json::Value>()["error"]["code"],
        "forbidden"
    );

    let missing = server.post("/admin/key").json(&json!({ "admin": true })).await;
    assert_eq!(missing.status_code(), 401);
}

#[tokio::test]
async fn test_list_and_get_keys() {
    let state = common::create_test_state().await;
    let admin = common::issue_key(&state, Some(true)).await;
    let other = common::issue_key(&state, None).await;
    let server = common::test_server(state);

    let list = server
        .get("/admin/keys")
        .add_header("Cookie", common::access_cookie(&admin))
        .await;

    list.assert_status_ok();
    let body = list.json::<serde_json::Value>();
    assert_eq!(body["total"], 2);
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|k| k.get("key").is_none()));

    let digest = hash_key(&other);
    let one = server
        .get(&format!("/admin/key/{digest}"))
        .add_header("Cookie", common::access_cookie(&admin))
        .await;

    one.assert_status_ok();
    let body = one.json::<serde_json::Value>();
    assert_eq!(body["hashed"], digest);
    assert!(body["admin"].is_null());
}

#[tokio::test]
async fn test_get_unknown_key_not_found() {
    let state = common::create_test_state().await;
    let admin = common::issue_key(&state, Some(true)).await;
    let server = common::test_server(state);

    let response = server
        .get(&format!("/admin/key/{}", "0".repeat(64)))
        .add_header("Cookie", common::access_cookie(&admin))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_bootstrap_only_on_empty_store() {
    let state = common::create_test_state().await;

    let first = state.key_service.bootstrap_admin_key().await.unwrap();
    assert!(first.is_some_and(|k| k.record.is_admin()));

    let second = state.key_service.bootstrap_admin_key().await.unwrap();
    assert!(second.is_none());
    assert_eq!(state.key_service.list_keys().await.unwrap().len(), 1);
}
