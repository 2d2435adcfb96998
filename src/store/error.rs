//! Store error taxonomy
//!
//! Every repository/coordinator failure surfaces as a `StoreError`; nothing
//! is swallowed or downgraded, and the core never retries internally.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced account/entry/transfer does not exist.
    #[error("Not found")]
    NotFound,

    /// Invalid currency or a database constraint rejected the statement.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The unit of work failed and the subsequent rollback failed too.
    /// Both errors stay visible; the rollback error never masks the cause.
    #[error("Transaction error: {source}, rollback error: {rollback}")]
    Rollback {
        source: Box<StoreError>,
        rollback: sqlx::Error,
    },

    /// The store is unreachable (pool exhausted, io/tls failure).
    #[error("Database unreachable: {0}")]
    Connectivity(sqlx::Error),

    /// Any other database error (begin/commit failures included).
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => {
                // Foreign key / check / not-null violations all come back as
                // database errors carrying a constraint name.
                if db.constraint().is_some() {
                    StoreError::ConstraintViolation(db.to_string())
                } else {
                    StoreError::Database(sqlx::Error::Database(db))
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Connectivity(e),
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_pool_timeout_maps_to_connectivity() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Connectivity(_)));
    }

    #[test]
    fn test_rollback_message_keeps_both_errors() {
        let err = StoreError::Rollback {
            source: Box::new(StoreError::NotFound),
            rollback: sqlx::Error::PoolClosed,
        };
        let msg = err.to_string();
        assert!(msg.contains("Not found"));
        assert!(msg.contains("rollback error"));
    }
}
