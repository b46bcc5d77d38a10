pub mod resolver;
pub mod win_probability;

pub use win_probability::{estimate_win_probability, ModelParams, ProbabilityPolicy};
