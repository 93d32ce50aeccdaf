use super::*;

#[tokio::test]
async fn set_get_and_remove_round_trip() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");

    assert_eq!(storage.get("@IoTLights:userId").await.expect("get"), None);

    storage
        .set("@IoTLights:userId", "user123")
        .await
        .expect("set");
    assert_eq!(
        storage.get("@IoTLights:userId").await.expect("get"),
        Some("user123".to_string())
    );

    storage.remove("@IoTLights:userId").await.expect("remove");
    assert_eq!(storage.get("@IoTLights:userId").await.expect("get"), None);
}

#[tokio::test]
async fn set_overwrites_existing_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set("key", "first").await.expect("set");
    storage.set("key", "second").await.expect("overwrite");

    assert_eq!(
        storage.get("key").await.expect("get"),
        Some("second".to_string())
    );
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries")
        .fetch_one(storage.pool())
        .await
        .expect("count");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn removing_missing_key_is_not_an_error() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.remove("never-set").await.expect("remove");
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn memory_store_behaves_like_sqlite_store() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);

    store.set("a", "1").await.expect("set");
    store.set("a", "2").await.expect("overwrite");
    assert_eq!(store.get("a").await.expect("get"), Some("2".to_string()));
    assert_eq!(store.len().await, 1);

    store.remove("a").await.expect("remove");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn shared_store_handle_sees_same_entries() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let other = Arc::clone(&store);

    store.set("k", "v").await.expect("set");
    assert_eq!(other.get("k").await.expect("get"), Some("v".to_string()));
}

#[test]
fn sqlite_path_skips_memory_urls() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/lights.db?mode=rwc"),
        Some(PathBuf::from("./data/lights.db"))
    );
    assert_eq!(sqlite_path("postgres://host/db"), None);
}
