pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use config::SimConfig;
pub use error::{AdcueError, AdcueResult};
pub use types::{Action, ActionSpace, Cohort, DecisionRecord, Placement, Topic};
