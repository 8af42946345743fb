use diesel::result::Error as DieselError;
use thiserror::Error;
use tokio::task::JoinError;

// Failures of a dictionary lookup. A plain miss on the entry store is not one
// of these: it is an empty result.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Mdd file is not configured for this dictionary")]
    AttachmentStoreNotConfigured,
    #[error("No entry in mdd file: {0}")]
    AttachmentNotFound(String),
    #[error("No such word: {0}")]
    WordNotFound(String),
    #[error("Dictionary profile has no {0}")]
    Unsupported(&'static str),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Connection pool error")]
    PoolError(#[from] r2d2::Error),
    #[error("Lookup worker failed")]
    WorkerError(#[from] JoinError),
}
