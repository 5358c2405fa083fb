mod common;

use url_redirector::domain::entities::{ShortLink, VanityLink};
use url_redirector::domain::repositories::{ShortLinkRepository, VanityLinkRepository};
use url_redirector::infrastructure::persistence::{SqlShortLinkRepository, SqlVanityLinkRepository};

#[tokio::test]
async fn test_root_redirects_to_root_url() {
    let state = common::create_test_state().await;
    let server = common::test_server(state);

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), common::ROOT_URL);
}

#[tokio::test]
async fn test_resolve_short_link() {
    let state = common::create_test_state().await;
    SqlShortLinkRepository::new(state.db.clone())
        .create(ShortLink::new("redirect".to_string(), "https://example.com/target".to_string()))
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get("/redirect").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_resolve_falls_back_to_vanity() {
    let state = common::create_test_state().await;
    SqlVanityLinkRepository::new(state.db.clone())
        .create(VanityLink::new("docs".to_string(), "https://example.org/docs".to_string()))
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get("/docs").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.org/docs");
}

#[tokio::test]
async fn test_short_link_shadows_vanity() {
    let state = common::create_test_state().await;
    SqlShortLinkRepository::new(state.db.clone())
        .create(ShortLink::new("shared01".to_string(), "https://short.example".to_string()))
        .await
        .unwrap();
    SqlVanityLinkRepository::new(state.db.clone())
        .create(VanityLink::new("shared01".to_string(), "https://vanity.example".to_string()))
        .await
        .unwrap();
    let server = common::test_server(state);

    let bare = server.get("/shared01").await;
    assert_eq!(bare.header("location"), "https://short.example");

    let vanity = server.get("/v/shared01").await;
    assert_eq!(vanity.status_code(), 307);
    assert_eq!(vanity.header("location"), "https://vanity.example");
}

#[tokio::test]
async fn test_unknown_token_not_found() {
    let state = common::create_test_state().await;
    let server = common::test_server(state);

    let response = server.get("/nothing").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_vanity_route_ignores_short_links() {
    let state = common::create_test_state().await;
    SqlShortLinkRepository::new(state.db.clone())
        .create(ShortLink::new("onlyshrt".to_string(), "https://short.example".to_string()))
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get("/v/onlyshrt").await;

    response.assert_status_not_found();
}
