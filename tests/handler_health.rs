mod common;

#[tokio::test]
async fn test_health_ok() {
    let server = common::test_server(common::create_test_state().await);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["database"]["backend"], "sqlite");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_degraded_when_database_closed() {
    let state = common::create_test_state().await;
    state.db.close().await;
    let server = common::test_server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
