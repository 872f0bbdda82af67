use crate::validate::ValidationError;
use providers::ProviderError;
use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValuationError {
    /// The label service failed; shown to the user, never retried.
    #[error("classification failed: {0}")]
    Classification(#[from] ProviderError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// A newer classification started before this one finished.
    #[error("classification result superseded by a newer request")]
    Superseded,
}
