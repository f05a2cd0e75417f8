//! Reinforcement Learning engine — the LinUCB contextual bandit used to pick
//! (ad, placement) combinations from a context vector, plus the dense
//! symmetric-positive-definite solver it rides on.

pub mod linalg;
pub mod linucb;

pub use linucb::LinUcb;
