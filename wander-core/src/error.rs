use thiserror::Error;

pub type Result<T, E = WalkError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// A walk parameter is outside the range the generator accepts.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Statistics were requested without a walk to compute them from.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A scripted step source was asked for more steps than it holds.
    #[error("scripted step source exhausted after {0} steps")]
    ScriptExhausted(usize),

    /// A scripted step that is not a unit increment.
    #[error("step {value} at index {index} is not -1 or +1")]
    InvalidStep { index: usize, value: i64 },
}
