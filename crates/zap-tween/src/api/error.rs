//! Error types for the fallible edges of the crate.
//!
//! Only JSON loading and script playback can fail. Ticking never returns
//! an error: dead targets are skipped and bad durations are clamped.

use thiserror::Error;

/// Errors raised while loading configuration or playing a transition script.
#[derive(Debug, Error)]
pub enum TweenError {
    /// The JSON input could not be parsed.
    #[error("failed to parse transition data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A property step was given without a target tag.
    #[error("step {step}: `{method}` needs a target")]
    MissingTarget { step: usize, method: &'static str },

    /// No node in the scene carries the requested tag.
    #[error("step {step}: no node tagged `{tag}`")]
    UnknownTarget { step: usize, tag: String },

    /// A property step has neither a goal nor `fill` set.
    #[error("step {step}: `{method}` needs a goal or `fill: true`")]
    MissingGoal { step: usize, method: &'static str },

    /// An event step has no event id.
    #[error("step {step}: `event` needs an `event` id")]
    MissingEvent { step: usize },

    /// The goal value does not match the property's value shape.
    #[error("step {step}: `{method}` expects a {expected} goal")]
    GoalMismatch {
        step: usize,
        method: &'static str,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, TweenError>;
