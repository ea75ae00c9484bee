use shared::domain::ExamFormId;
use thiserror::Error;

/// Failure taxonomy for the console core. Command failures never escape
/// the executor boundary as panics and never leave the store partially
/// mutated; fetch failure is terminal for one refresh cycle only.
#[derive(Debug, Error)]
pub enum ExamDeskError {
    #[error("failed to load exam forms: {0}")]
    FetchFailed(String),
    #[error("exam form {0} is not in the current snapshot")]
    NotFound(ExamFormId),
    #[error("exam form {0} must be verified before a hall ticket can be issued")]
    PreconditionFailed(ExamFormId),
    #[error("a command for exam form {0} is already in flight")]
    CommandInProgress(ExamFormId),
    #[error("server rejected the command: {0}")]
    CommandRejected(String),
}
