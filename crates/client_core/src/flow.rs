//! Fetch / edit / apply cycle for one user's light settings.
//!
//! `recommended` is the last fetched baseline and is never touched by edits;
//! `current` is the working copy the user moves around. Applying sends the
//! working copy back to the service as feedback.

use shared::{
    domain::{LightSettings, RecommendationResult, SettingKind},
    token::encode,
};
use storage::KeyValueStore;
use tracing::{error, info, warn};

use crate::{
    error::ClientError,
    recommendations::{select_recommendation, RecommendationClient},
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Fetching,
    Ready,
    Submitting,
}

/// One field that moved away from the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDelta {
    pub kind: SettingKind,
    pub recommended: u16,
    pub current: u16,
}

pub struct ReconciliationFlow<R> {
    client: R,
    phase: FlowPhase,
    recommended: LightSettings,
    current: LightSettings,
    confidence: Option<f64>,
    adjusted: bool,
    error: Option<String>,
}

impl<R: RecommendationClient> ReconciliationFlow<R> {
    pub fn new(client: R) -> Self {
        Self {
            client,
            phase: FlowPhase::Idle,
            recommended: LightSettings::DEFAULT,
            current: LightSettings::DEFAULT,
            confidence: None,
            adjusted: false,
            error: None,
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn recommended(&self) -> &LightSettings {
        &self.recommended
    }

    pub fn current(&self) -> &LightSettings {
        &self.current
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn is_adjusted(&self) -> bool {
        self.adjusted
    }

    /// Message of the last failed fetch, cleared by the next good one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Restores `Ready` after an in-flight call was abandoned (its future
    /// dropped before completion).
    pub fn reset_phase(&mut self) {
        if matches!(self.phase, FlowPhase::Fetching | FlowPhase::Submitting) {
            warn!(phase = ?self.phase, "resetting abandoned request");
            self.phase = FlowPhase::Ready;
        }
    }

    fn ensure_not_busy(&self) -> Result<(), ClientError> {
        match self.phase {
            FlowPhase::Fetching => Err(ClientError::Busy("fetch")),
            FlowPhase::Submitting => Err(ClientError::Busy("submit")),
            FlowPhase::Idle | FlowPhase::Ready => Ok(()),
        }
    }

    /// Fetches one recommendation for the session's user and makes it both
    /// the baseline and the working copy. On any failure both fall back to
    /// [`LightSettings::DEFAULT`], the error is kept for display and
    /// returned. Unsaved edits are discarded either way.
    pub async fn refresh<S: KeyValueStore>(
        &mut self,
        session: &Session<S>,
    ) -> Result<RecommendationResult, ClientError> {
        self.ensure_not_busy()?;
        let user_id = session.require_user()?.clone();

        info!(%user_id, "fetching recommendation");
        self.phase = FlowPhase::Fetching;
        let outcome = match self.client.fetch_recommendations(&user_id).await {
            Ok(response) => select_recommendation(&response).map_err(ClientError::from),
            Err(err) => Err(err),
        };
        self.phase = FlowPhase::Ready;

        match outcome {
            Ok(result) => {
                self.reset_to(result.settings, result.confidence);
                self.error = None;
                info!(
                    %user_id,
                    token = %encode(&result.settings),
                    "recommendation ready"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(%user_id, error = %err, "using default settings after failed fetch");
                self.reset_to(LightSettings::DEFAULT, None);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn reset_to(&mut self, settings: LightSettings, confidence: Option<f64>) {
        self.recommended = settings;
        self.current = settings;
        self.confidence = confidence;
        self.adjusted = false;
    }

    /// Moves one field of the working copy, clamped into range.
    pub fn set(&mut self, kind: SettingKind, value: i64) -> &LightSettings {
        self.current = self.current.with(kind, value);
        self.adjusted = self.current != self.recommended;
        &self.current
    }

    pub fn set_brightness(&mut self, value: i64) -> &LightSettings {
        self.set(SettingKind::Brightness, value)
    }

    pub fn set_color_temperature(&mut self, value: i64) -> &LightSettings {
        self.set(SettingKind::ColorTemperature, value)
    }

    pub fn set_dimmer_rate(&mut self, value: i64) -> &LightSettings {
        self.set(SettingKind::DimmerRate, value)
    }

    /// Fields of the working copy that differ from the baseline.
    pub fn deltas(&self) -> Vec<SettingDelta> {
        self.current
            .differing_fields(&self.recommended)
            .into_iter()
            .map(|kind| SettingDelta {
                kind,
                recommended: self.recommended.get(kind),
                current: self.current.get(kind),
            })
            .collect()
    }

    /// Sends the working copy as feedback. Success clears the adjusted flag
    /// and keeps the baseline; failure leaves everything as it was.
    pub async fn apply<S: KeyValueStore>(
        &mut self,
        session: &Session<S>,
    ) -> Result<LightSettings, ClientError> {
        self.ensure_not_busy()?;
        let user_id = session.require_user()?.clone();
        let applied = self.current;
        let token = encode(&applied);

        self.phase = FlowPhase::Submitting;
        let outcome = self.client.submit_feedback(&user_id, &token).await;
        self.phase = FlowPhase::Ready;

        match outcome {
            Ok(()) => {
                info!(%user_id, %token, "settings applied");
                self.adjusted = false;
                Ok(applied)
            }
            Err(err) => {
                error!(%user_id, %token, error = %err, "failed to apply settings");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
