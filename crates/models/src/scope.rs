//! Per-operation transaction scoping.
//!
//! Every lookup and write opens its own transaction on the handle it was given
//! (a savepoint when that handle is already a transaction). A failed statement
//! is rolled back before the error is returned, so the caller's handle stays
//! usable for the next call.

use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use tracing::{error, warn};

use crate::errors::ModelError;

pub(crate) async fn begin<C>(db: &C, op: &'static str, entity: &'static str) -> Result<DatabaseTransaction, ModelError>
where
    C: TransactionTrait,
{
    db.begin().await.map_err(|e| {
        error!(op, entity, error = %e, "cannot open transaction");
        ModelError::from(e)
    })
}

/// Commit on success, roll back and log on failure.
pub(crate) async fn settle<T>(
    txn: DatabaseTransaction,
    op: &'static str,
    entity: &'static str,
    key: &str,
    res: Result<T, DbErr>,
) -> Result<T, ModelError> {
    match res {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            error!(op, entity, key, error = %e, "statement failed; rolling back");
            if let Err(rb) = txn.rollback().await {
                warn!(op, entity, key, error = %rb, "rollback failed");
            }
            Err(e.into())
        }
    }
}
