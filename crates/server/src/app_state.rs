use std::sync::Arc;

use shared::{domain::UserId, protocol::DemoRecommendation};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) default_user_id: UserId,
    pub(crate) catalog: Arc<Vec<DemoRecommendation>>,
}
