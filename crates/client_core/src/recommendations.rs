use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use shared::{
    domain::{LightSettings, RecommendationResult, UserId},
    protocol::{FeedbackEvent, PutEventsRequest, RecommendationsRequest, RecommendationsResponse},
    token::{decode, MalformedTokenError},
};
use tracing::{debug, error};
use url::Url;

use crate::{config::ClientSettings, error::ClientError};

const RECOMMENDATIONS_ROUTE: &str = "recommendations";
const EVENTS_ROUTE: &str = "events";

/// Remote recommendation service: one campaign lookup and one event tracker.
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    async fn fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<RecommendationsResponse, ClientError>;

    async fn submit_feedback(&self, user_id: &UserId, item_id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl<T> RecommendationClient for Arc<T>
where
    T: RecommendationClient + ?Sized,
{
    async fn fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<RecommendationsResponse, ClientError> {
        (**self).fetch_recommendations(user_id).await
    }

    async fn submit_feedback(&self, user_id: &UserId, item_id: &str) -> Result<(), ClientError> {
        (**self).submit_feedback(user_id, item_id).await
    }
}

/// Picks the first item of a response. An empty list yields the default
/// settings with no confidence.
pub fn select_recommendation(
    response: &RecommendationsResponse,
) -> Result<RecommendationResult, MalformedTokenError> {
    match response.item_list.first() {
        Some(item) => Ok(RecommendationResult {
            settings: decode(&item.item_id)?,
            confidence: item.score,
        }),
        None => Ok(RecommendationResult {
            settings: LightSettings::DEFAULT,
            confidence: None,
        }),
    }
}

/// JSON-over-HTTP client for a Personalize style campaign and event tracker.
pub struct PersonalizeClient {
    http: Client,
    endpoint: Url,
    campaign_arn: String,
    tracking_id: String,
    event_source: String,
}

impl PersonalizeClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut endpoint = Url::parse(&settings.endpoint).map_err(|e| {
            ClientError::Network(format!("invalid endpoint '{}': {e}", settings.endpoint))
        })?;
        // Keep the last path segment when joining routes.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            campaign_arn: settings.campaign_arn.clone(),
            tracking_id: settings.tracking_id().to_string(),
            event_source: settings.event_source.clone(),
        })
    }

    fn route(&self, route: &str) -> Result<Url, ClientError> {
        self.endpoint
            .join(route)
            .map_err(|e| ClientError::Network(format!("invalid route '{route}': {e}")))
    }
}

fn network(operation: &'static str) -> impl FnOnce(reqwest::Error) -> ClientError {
    move |e| {
        error!(operation, error = %e, "recommendation service call failed");
        ClientError::Network(format!("{operation}: {e}"))
    }
}

#[async_trait]
impl RecommendationClient for PersonalizeClient {
    async fn fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<RecommendationsResponse, ClientError> {
        let request = RecommendationsRequest {
            campaign_arn: self.campaign_arn.clone(),
            user_id: user_id.clone(),
            num_results: 1,
        };
        let response = self
            .http
            .post(self.route(RECOMMENDATIONS_ROUTE)?)
            .json(&request)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(network("fetch recommendations"))?;
        let body: RecommendationsResponse = response
            .json()
            .await
            .map_err(network("decode recommendations"))?;
        debug!(%user_id, items = body.item_list.len(), "received recommendations");
        Ok(body)
    }

    async fn submit_feedback(&self, user_id: &UserId, item_id: &str) -> Result<(), ClientError> {
        let now = Utc::now();
        let request = PutEventsRequest {
            tracking_id: self.tracking_id.clone(),
            user_id: user_id.clone(),
            session_id: format!("session-{}", now.timestamp_millis()),
            event_list: vec![FeedbackEvent::setting_adjusted(
                item_id,
                now.timestamp(),
                self.event_source.as_str(),
            )?],
        };
        self.http
            .post(self.route(EVENTS_ROUTE)?)
            .json(&request)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(network("submit feedback"))?;
        debug!(%user_id, item_id, "feedback accepted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/recommendations_tests.rs"]
mod tests;
