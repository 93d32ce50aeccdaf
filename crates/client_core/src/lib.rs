//! Client side of the light recommendation app: session persistence, the
//! recommendation service client and the fetch/edit/apply flow.

pub mod config;
pub mod error;
pub mod flow;
pub mod recommendations;
pub mod session;

pub use config::{load_settings, ClientSettings};
pub use error::ClientError;
pub use flow::{FlowPhase, ReconciliationFlow, SettingDelta};
pub use recommendations::{select_recommendation, PersonalizeClient, RecommendationClient};
pub use session::{Session, SessionState};
