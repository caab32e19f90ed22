//! Error and outcome types for the store.

use diesel::result::{DatabaseErrorKind, Error as DieselError, QueryResult};
use thiserror::Error;
use tracing::debug;

/// Failure of the store itself, as opposed to a mutation that simply did not
/// apply. These propagate to the caller; the UI reports them and carries on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("database migration failed: {0}")]
    Migration(String),

    #[error("database query failed: {0}")]
    Query(#[from] DieselError),
}

/// Structured result of an insert/update/delete.
///
/// The legacy behaviour collapsed all of these into an affected-row count;
/// the taxonomy is kept representable here even though the UI still renders
/// `NotFound` and `ConstraintViolation` as the same generic failure message
/// in most flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation touched at least one row.
    Applied,
    /// No row matched the key (or, for credential-guarded deletes, the
    /// password did not match).
    NotFound,
    /// The store rejected the mutation, e.g. a duplicate user id.
    ConstraintViolation,
}

impl MutationOutcome {
    /// Convenience for call sites that only care about success.
    pub fn is_applied(self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Map the result of a Diesel `execute` into a [`MutationOutcome`].
///
/// Constraint violations are expected operator mistakes, not infrastructure
/// failures, so they become an outcome rather than an error.
pub(crate) fn mutation_outcome(result: QueryResult<usize>) -> Result<MutationOutcome, StoreError> {
    match result {
        Ok(0) => Ok(MutationOutcome::NotFound),
        Ok(_) => Ok(MutationOutcome::Applied),
        Err(DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
            info,
        )) => {
            debug!(?kind, message = info.message(), "mutation rejected by constraint");
            Ok(MutationOutcome::ConstraintViolation)
        }
        Err(e) => Err(StoreError::from(e)),
    }
}
