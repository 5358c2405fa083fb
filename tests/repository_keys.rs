mod common;

use chrono::{Duration, TimeZone, Utc};
use url_redirector::AppError;
use url_redirector::domain::entities::NewApiKey;
use url_redirector::domain::repositories::KeyRepository;
use url_redirector::infrastructure::persistence::SqlKeyRepository;

fn new_key(hashed: &str, admin: Option<bool>) -> NewApiKey {
    NewApiKey {
        hashed: hashed.to_string(),
        admin,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_create_and_find_key() {
    let repo = SqlKeyRepository::new(common::test_database().await);
    let digest = "a".repeat(64);

    let created = repo.create(new_key(&digest, Some(true))).await.unwrap();
    assert!(created.is_admin());

    let found = repo.find_by_digest(&digest).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.admin, Some(true));
}

#[tokio::test]
async fn test_admin_flag_round_trips_all_states() {
    let repo = SqlKeyRepository::new(common::test_database().await);

    for (digest, admin) in [("t", Some(true)), ("f", Some(false)), ("n", None)] {
        let digest = digest.repeat(64);
        repo.create(new_key(&digest, admin)).await.unwrap();

        let found = repo.find_by_digest(&digest).await.unwrap().unwrap();
        assert_eq!(found.admin, admin);
    }
}

#[tokio::test]
async fn test_created_at_has_second_precision() {
    let repo = SqlKeyRepository::new(common::test_database().await);
    let digest = "c".repeat(64);

    let mut key = new_key(&digest, None);
    key.created_at += Duration::milliseconds(750);

    let created = repo.create(key).await.unwrap();
    let found = repo.find_by_digest(&digest).await.unwrap().unwrap();

    assert_eq!(created.created_at, found.created_at);
    assert_eq!(
        found.created_at,
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_find_unknown_digest() {
    let repo = SqlKeyRepository::new(common::test_database().await);

    assert!(repo.find_by_digest(&"0".repeat(64)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_digest_is_conflict() {
    let repo = SqlKeyRepository::new(common::test_database().await);
    let digest = "d".repeat(64);

    repo.create(new_key(&digest, None)).await.unwrap();
    let err = repo.create(new_key(&digest, Some(true))).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_has_any() {
    let repo = SqlKeyRepository::new(common::test_database().await);

    assert!(!repo.has_any().await.unwrap());

    repo.create(new_key(&"e".repeat(64), None)).await.unwrap();

    assert!(repo.has_any().await.unwrap());
}

#[tokio::test]
async fn test_list_newest_first() {
    let repo = SqlKeyRepository::new(common::test_database().await);

    let mut older = new_key(&"1".repeat(64), None);
    older.created_at -= Duration::days(1);
    repo.create(older).await.unwrap();
    repo.create(new_key(&"2".repeat(64), Some(true))).await.unwrap();

    let keys = repo.list().await.unwrap();

    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].hashed, "2".repeat(64));
    assert_eq!(keys[1].hashed, "1".repeat(64));
}
