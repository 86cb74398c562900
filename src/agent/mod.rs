pub mod detector;
pub mod error;
pub mod mock;

pub use detector::{
    dedup_agents, display_location, filter_active, parse_pids, parse_ps_activity, parse_pwdx, Agent,
    AgentDetector, ProcessAgentDetector,
};
pub use error::AgentError;
pub use mock::MockAgentDetector;
