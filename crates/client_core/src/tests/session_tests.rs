use super::*;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use storage::MemoryStore;

/// Store whose writes and deletes always fail.
struct ReadOnlyStore {
    inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full"))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
}

fn user(id: &str) -> UserId {
    UserId::parse(id).expect("user id")
}

#[tokio::test]
async fn new_session_is_loading_until_bootstrap() {
    let mut session = Session::new(MemoryStore::new());
    assert!(session.is_loading());
    assert!(!session.is_authenticated());

    assert_eq!(session.bootstrap().await, None);
    assert!(!session.is_loading());
    assert!(matches!(session.require_user(), Err(ClientError::NotLoggedIn)));
}

#[tokio::test]
async fn bootstrap_restores_persisted_user() {
    let store = MemoryStore::new();
    store.set(USER_ID_KEY, "user123").await.expect("seed");

    let mut session = Session::new(store);
    assert_eq!(session.bootstrap().await, Some(&user("user123")));
    assert_eq!(
        session.state(),
        &SessionState {
            user_id: Some(user("user123")),
            is_loading: false,
        }
    );
}

#[tokio::test]
async fn bootstrap_ignores_invalid_persisted_id() {
    let store = MemoryStore::new();
    store.set(USER_ID_KEY, "user-123").await.expect("seed");

    let mut session = Session::new(store);
    assert_eq!(session.bootstrap().await, None);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn bootstrap_read_failure_leaves_session_logged_out() {
    let mut session = Session::new(BrokenStore);
    assert_eq!(session.bootstrap().await, None);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn login_persists_and_next_process_sees_it() {
    let store = MemoryStore::new();
    let mut session = Session::new(store.clone());
    session.login(user("alice42")).await.expect("login");
    assert_eq!(session.user_id(), Some(&user("alice42")));
    assert!(!session.is_loading());

    let mut next = Session::new(store);
    assert_eq!(next.bootstrap().await, Some(&user("alice42")));
}

#[tokio::test]
async fn logout_clears_user_and_cached_settings() {
    let store = MemoryStore::new();
    let mut session = Session::new(store.clone());
    session.login(user("alice42")).await.expect("login");
    let applied = LightSettings::new(80, 3500, 60).expect("valid");
    session.remember_applied(&applied).await.expect("remember");
    assert_eq!(session.last_applied().await.expect("read"), Some(applied));

    session.logout().await.expect("logout");
    assert_eq!(session.user_id(), None);
    assert!(store.is_empty().await);
    assert_eq!(session.last_applied().await.expect("read"), None);
}

#[tokio::test]
async fn failed_login_keeps_previous_state() {
    let mut session = Session::new(ReadOnlyStore {
        inner: MemoryStore::new(),
    });
    session.bootstrap().await;

    let err = session
        .login(user("alice42"))
        .await
        .expect_err("write should fail");
    assert!(matches!(err, ClientError::Storage(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn failed_logout_keeps_user_logged_in() {
    let inner = MemoryStore::new();
    inner.set(USER_ID_KEY, "alice42").await.expect("seed");
    let mut session = Session::new(ReadOnlyStore { inner });
    session.bootstrap().await;

    let err = session.logout().await.expect_err("remove should fail");
    assert!(matches!(err, ClientError::Storage(_)));
    assert_eq!(session.user_id(), Some(&user("alice42")));
}

#[tokio::test]
async fn corrupt_cached_settings_are_reported() {
    let store = MemoryStore::new();
    store
        .set(LAST_APPLIED_KEY, "brightness:999|cct:3500|dimmer:60")
        .await
        .expect("seed");
    let session = Session::new(store);

    assert!(matches!(
        session.last_applied().await,
        Err(ClientError::MalformedToken(_))
    ));
}
