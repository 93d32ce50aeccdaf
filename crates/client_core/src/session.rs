use shared::{
    domain::{LightSettings, UserId},
    token::{decode, encode},
};
use storage::KeyValueStore;
use tracing::{info, warn};

use crate::error::ClientError;

pub const USER_ID_KEY: &str = "@IoTLights:userId";
pub const LAST_APPLIED_KEY: &str = "@IoTLights:lastApplied";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user_id: Option<UserId>,
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        // Loading until bootstrap has looked at the store.
        Self {
            user_id: None,
            is_loading: true,
        }
    }
}

/// Logged-in user for this process, persisted across runs through a
/// [`KeyValueStore`].
pub struct Session<S> {
    store: S,
    state: SessionState,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.state.user_id.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user_id.is_some()
    }

    pub fn require_user(&self) -> Result<&UserId, ClientError> {
        self.user_id().ok_or(ClientError::NotLoggedIn)
    }

    /// Restores a previously persisted user. Read failures and stored ids
    /// that no longer validate leave the session logged out.
    pub async fn bootstrap(&mut self) -> Option<&UserId> {
        self.state.is_loading = true;
        match self.store.get(USER_ID_KEY).await {
            Ok(Some(raw)) => match UserId::parse(&raw) {
                Ok(user_id) => {
                    info!(%user_id, "restored persisted session");
                    self.state.user_id = Some(user_id);
                }
                Err(error) => warn!(%error, "ignoring invalid persisted user id"),
            },
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load persisted user id"),
        }
        self.state.is_loading = false;
        self.state.user_id.as_ref()
    }

    /// Persists `user_id` and makes it the active user. The id is validated
    /// by construction of [`UserId`].
    pub async fn login(&mut self, user_id: UserId) -> Result<(), ClientError> {
        self.store
            .set(USER_ID_KEY, user_id.as_str())
            .await
            .map_err(ClientError::Storage)?;
        info!(%user_id, "logged in");
        self.state = SessionState {
            user_id: Some(user_id),
            is_loading: false,
        };
        Ok(())
    }

    /// Forgets the persisted user and cached settings. The in-memory session
    /// is only cleared once storage agrees.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.store
            .remove(USER_ID_KEY)
            .await
            .map_err(ClientError::Storage)?;
        self.store
            .remove(LAST_APPLIED_KEY)
            .await
            .map_err(ClientError::Storage)?;
        if let Some(user_id) = self.state.user_id.take() {
            info!(%user_id, "logged out");
        }
        self.state.is_loading = false;
        Ok(())
    }

    pub async fn remember_applied(&self, settings: &LightSettings) -> Result<(), ClientError> {
        self.store
            .set(LAST_APPLIED_KEY, &encode(settings))
            .await
            .map_err(ClientError::Storage)
    }

    pub async fn last_applied(&self) -> Result<Option<LightSettings>, ClientError> {
        let raw = self
            .store
            .get(LAST_APPLIED_KEY)
            .await
            .map_err(ClientError::Storage)?;
        raw.map(|token| decode(&token).map_err(ClientError::from))
            .transpose()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
