use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{entity} document has no usable natural key at `{path}`")]
    MissingKey { entity: &'static str, path: &'static str },
    #[error("{entity} lookup for {key:?} matched {matches} rows, expected at most one")]
    Ambiguous { entity: &'static str, key: String, matches: usize },
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        ModelError::Db(e.to_string())
    }
}

impl ModelError {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ModelError::Ambiguous { .. })
    }
}

/// Collapse a lookup result to "found or nothing", logging whatever went wrong.
///
/// For callers that cannot act on the difference between a missing row, an
/// ambiguous match and a store failure.
pub fn or_log<T>(res: Result<Option<T>, ModelError>) -> Option<T> {
    match res {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, ambiguous = e.is_ambiguous(), "lookup failed; treating as not found");
            None
        }
    }
}
