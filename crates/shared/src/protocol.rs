use serde::{Deserialize, Serialize};

use crate::domain::{LightSettings, UserId};

pub const SETTING_ADJUSTED_EVENT: &str = "SETTING_ADJUSTED";

/// Body of a recommendation request against a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub campaign_arn: String,
    pub user_id: UserId,
    pub num_results: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub item_list: Vec<PredictedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedItem {
    /// Settings token, see [`crate::token`].
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Body of a feedback submission to an event tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutEventsRequest {
    pub tracking_id: String,
    pub user_id: UserId,
    pub session_id: String,
    pub event_list: Vec<FeedbackEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    pub event_type: String,
    /// Unix seconds.
    pub sent_at: i64,
    pub item_id: String,
    /// JSON document encoded as a string, as the tracker expects.
    pub properties: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackProperties {
    pub event: String,
    pub source: String,
}

impl FeedbackEvent {
    pub fn setting_adjusted(
        item_id: impl Into<String>,
        sent_at: i64,
        source: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        let properties = serde_json::to_string(&FeedbackProperties {
            event: SETTING_ADJUSTED_EVENT.to_string(),
            source: source.into(),
        })?;
        Ok(Self {
            event_type: SETTING_ADJUSTED_EVENT.to_string(),
            sent_at,
            item_id: item_id.into(),
            properties,
        })
    }
}

/// Payload of the demo server's `GET /api/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRecommendationsResponse {
    pub user_id: UserId,
    pub recommendations: Vec<DemoRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRecommendation {
    pub id: String,
    pub settings: LightSettings,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_request_uses_camel_case() {
        let request = RecommendationsRequest {
            campaign_arn: "arn:campaign".into(),
            user_id: UserId::parse("user123").expect("id"),
            num_results: 1,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("json"),
            serde_json::json!({ "campaignArn": "arn:campaign", "userId": "user123", "numResults": 1 })
        );
    }

    #[test]
    fn missing_item_list_reads_as_empty() {
        let response: RecommendationsResponse = serde_json::from_str("{}").expect("json");
        assert!(response.item_list.is_empty());

        let response: RecommendationsResponse = serde_json::from_str(
            r#"{"itemList":[{"itemId":"brightness:75|cct:3500|dimmer:60","score":0.89}]}"#,
        )
        .expect("json");
        assert_eq!(response.item_list[0].score, Some(0.89));
    }

    #[test]
    fn setting_adjusted_event_embeds_properties_as_string() {
        let event = FeedbackEvent::setting_adjusted("brightness:80|cct:3500|dimmer:60", 1_700_000_000, "cli")
            .expect("event");
        assert_eq!(event.event_type, "SETTING_ADJUSTED");

        let props: FeedbackProperties = serde_json::from_str(&event.properties).expect("props");
        assert_eq!(props.event, "SETTING_ADJUSTED");
        assert_eq!(props.source, "cli");

        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["sentAt"], 1_700_000_000);
        assert!(json["properties"].is_string());
    }
}
