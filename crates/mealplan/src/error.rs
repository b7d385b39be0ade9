use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("plan serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
