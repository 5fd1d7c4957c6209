use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Factoid not found: {0}")]
    NotFound(i32),
}
