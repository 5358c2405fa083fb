mod common;

use serde_json::json;

#[tokio::test]
async fn test_add_short_link_end_to_end() {
    let state = common::create_test_state().await;
    let key = state
        .key_service
        .bootstrap_admin_key()
        .await
        .unwrap()
        .unwrap()
        .plaintext;
    let server = common::test_server(state);

    let response = server
        .post("/add")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "url": "https://example.org" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 8);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["url"], "https://example.org");

    let redirect = server.get(&format!("/{id}")).await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "https://example.org");
}

#[tokio::test]
async fn test_add_vanity_link_and_conflict() {
    let state = common::create_test_state().await;
    let key = common::issue_key(&state, None).await;
    let server = common::test_server(state);

    let response = server
        .post("/add/v")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "name": "docs", "url": "https://example.org/docs" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["name"], "docs");
    assert_eq!(body["url"], "https://example.org/docs");

    let redirect = server.get("/v/docs").await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "https://example.org/docs");

    let repeat = server
        .post("/add/v")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "name": "docs", "url": "https://elsewhere.example" }))
        .await;

    assert_eq!(repeat.status_code(), 409);
    assert_eq!(repeat.json::<serde_json::Value>()["error"]["code"], "conflict");

    let still = server.get("/v/docs").await;
    assert_eq!(still.header("location"), "https://example.org/docs");
}

#[tokio::test]
async fn test_add_requires_cookie() {
    let server = common::test_server(common::create_test_state().await);

    let response = server
        .post("/add")
        .json(&json!({ "url": "https://example.org" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_add_rejects_unknown_key() {
    let server = common::test_server(common::create_test_state().await);

    let response = server
        .post("/add/v")
        .add_header("Cookie", common::access_cookie("NotARealKey12345"))
        .json(&json!({ "name": "docs", "url": "https://example.org" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_add_rejects_empty_url() {
    let state = common::create_test_state().await;
    let key = common::issue_key(&state, Some(false)).await;
    let server = common::test_server(state);

    let response = server
        .post("/add")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_add_vanity_rejects_slash_in_name() {
    let state = common::create_test_state().await;
    let key = common::issue_key(&state, None).await;
    let server = common::test_server(state);

    let response = server
        .post("/add/v")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "name": "a/b", "url": "https://example.org" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_add_rejects_control_characters_in_url() {
    let state = common::create_test_state().await;
    let key = common::issue_key(&state, None).await;
    let server = common::test_server(state);

    let response = server
        .post("/add")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "url": "https://example.org/\nSet-Cookie: x=1" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );

    let vanity = server
        .post("/add/v")
        .add_header("Cookie", common::access_cookie(&key))
        .json(&json!({ "name": "crlf", "url": "https://example.org/\r\nX: y" }))
        .await;

    vanity.assert_status_bad_request();

    let missing = server.get("/v/crlf").await;
    assert_eq!(missing.status_code(), 404);
}
