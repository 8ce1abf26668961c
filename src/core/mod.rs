//! 核心层：错误、状态投影与会话编排

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::AssistantError;
pub use orchestrator::{create_session, spawn_session, Command, NO_RESULTS_NOTICE};
pub use state::{Mode, SessionPhase, UiState};
