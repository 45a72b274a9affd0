use thiserror::Error;

/// Errors from the member registry. Kept separate from the other crates'
/// errors so callers can decide how registry failures degrade.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, UserError>;
