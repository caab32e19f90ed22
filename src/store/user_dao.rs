//! Data access for user accounts.
//!
//! Credential checks are plain equality on the stored password, executed
//! inside the query itself. That matches the system being administered;
//! hardening the scheme is explicitly out of scope.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::error::{mutation_outcome, MutationOutcome, StoreError};
use super::models::{UserPatch, UserRecord, UserSummary};
use super::schema::users;

/// Thin DAO over the `users` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserDao;

impl UserDao {
    /// Credential check plus fetch in one statement. `None` means the id or
    /// the password did not match; the two cases are indistinguishable by
    /// design.
    pub fn authenticate(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(users::table
            .filter(users::user_id.eq(user_id))
            .filter(users::user_pw.eq(password))
            .select(UserRecord::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn get(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(users::table
            .find(user_id)
            .select(UserRecord::as_select())
            .first(conn)
            .optional()?)
    }

    /// Restricted projection for looking up somebody else's account.
    pub fn get_summary(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Option<UserSummary>, StoreError> {
        Ok(users::table
            .find(user_id)
            .select(UserSummary::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn all(&self, conn: &mut SqliteConnection) -> Result<Vec<UserRecord>, StoreError> {
        Ok(users::table
            .order(users::user_id.asc())
            .select(UserRecord::as_select())
            .load(conn)?)
    }

    pub fn add(
        &self,
        conn: &mut SqliteConnection,
        record: &UserRecord,
    ) -> Result<MutationOutcome, StoreError> {
        mutation_outcome(diesel::insert_into(users::table).values(record).execute(conn))
    }

    /// Partial update addressed by the id the row has *now*; the patch may
    /// itself change the id. The caller guarantees the patch is non-empty.
    ///
    /// Diesel's changeset derive skips primary-key columns, so an id change
    /// is applied as an explicit set clause alongside the rest of the patch.
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
        current_id: &str,
        patch: &UserPatch,
    ) -> Result<MutationOutcome, StoreError> {
        let target = users::table.find(current_id);
        let result = match &patch.user_id {
            Some(new_id) => diesel::update(target)
                .set((users::user_id.eq(new_id.as_str()), patch))
                .execute(conn),
            None => diesel::update(target).set(patch).execute(conn),
        };
        mutation_outcome(result)
    }

    /// Password-guarded delete. A wrong password matches no row and comes
    /// back as `NotFound`.
    pub fn delete(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
        password: &str,
    ) -> Result<MutationOutcome, StoreError> {
        mutation_outcome(
            diesel::delete(
                users::table
                    .filter(users::user_id.eq(user_id))
                    .filter(users::user_pw.eq(password)),
            )
            .execute(conn),
        )
    }
}
