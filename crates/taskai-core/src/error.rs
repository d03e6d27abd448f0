use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskaiError {
    #[error("not initialized: run 'taskai init'")]
    NotInitialized,

    #[error("commitment not found: {0}")]
    CommitmentNotFound(String),

    #[error("reminder not found: {0}")]
    ReminderNotFound(String),

    #[error("unknown template: {0} (expected passport, insurance, warranty or custom)")]
    TemplateNotFound(String),

    #[error("invalid commitment type: {0}")]
    InvalidCommitmentType(String),

    #[error("invalid commitment status: {0}")]
    InvalidCommitmentStatus(String),

    #[error("invalid commitment source: {0}")]
    InvalidCommitmentSource(String),

    #[error("invalid reminder status: {0}")]
    InvalidReminderStatus(String),

    #[error("invalid reminder source: {0}")]
    InvalidReminderSource(String),

    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ReminderRejected(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskaiError>;
