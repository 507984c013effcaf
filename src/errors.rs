use thiserror::Error;

/// Errors raised by the meal-logging flow. Unknown ids on update/delete are
/// deliberately not errors: the aggregator absorbs them as no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("estimation failed: {reason}")]
    EstimationFailed { reason: String },

    #[error("cannot {action} while {stage}")]
    InvalidTransition {
        action: &'static str,
        stage: &'static str,
    },
}
