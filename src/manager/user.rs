//! Account workflows: login/logout, self-service operations on the signed-in
//! account, and the manager-privileged variants that address any account by
//! id. There is no separate manager-authentication layer; reaching the
//! privileged menu is the trust boundary.

use crate::session::Session;
use crate::store::{
    Database, MutationOutcome, StoreError, UserDao, UserPatch, UserRecord, UserSummary,
};

/// Orchestrates account CRUD and the session slot.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserManager {
    dao: UserDao,
}

impl UserManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check credentials and, on success, put the full record into the
    /// session. Returns whether the login succeeded.
    pub fn login(
        &self,
        db: &mut Database,
        session: &mut Session,
        user_id: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        match self.dao.authenticate(db.conn(), user_id, password)? {
            Some(user) => {
                session.sign_in(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn logout(&self, session: &mut Session) {
        session.sign_out();
    }

    /// Sign-up. Duplicate ids surface as `ConstraintViolation`.
    pub fn add_user(
        &self,
        db: &mut Database,
        record: &UserRecord,
    ) -> Result<MutationOutcome, StoreError> {
        self.dao.add(db.conn(), record)
    }

    /// Re-fetch the signed-in user so the view reflects any update that was
    /// just applied. `None` when nobody is signed in or the row is gone.
    pub fn my_info(
        &self,
        db: &mut Database,
        session: &Session,
    ) -> Result<Option<UserRecord>, StoreError> {
        let Some(current) = session.current() else {
            return Ok(None);
        };
        let user_id = current.user_id.clone();
        self.dao.get(db.conn(), &user_id)
    }

    pub fn search_other_user(
        &self,
        db: &mut Database,
        user_id: &str,
    ) -> Result<Option<UserSummary>, StoreError> {
        self.dao.get_summary(db.conn(), user_id)
    }

    /// Partial self-update. Blank fields keep their current values. On
    /// success the session slot is replaced with the record re-fetched from
    /// the store; on failure it is left untouched, so a failed attempt can
    /// never leave a half-updated user in the slot. If the re-fetch finds
    /// nothing, the session ends instead of keeping the stale record.
    pub fn update_self(
        &self,
        db: &mut Database,
        session: &mut Session,
        patch: &UserPatch,
    ) -> Result<MutationOutcome, StoreError> {
        let Some(current_id) = session.current().map(|u| u.user_id.clone()) else {
            return Ok(MutationOutcome::NotFound);
        };
        if patch.is_empty() {
            return Ok(MutationOutcome::Applied);
        }
        let outcome = self.dao.update(db.conn(), &current_id, patch)?;
        if outcome.is_applied() {
            let new_id = patch.user_id.clone().unwrap_or(current_id);
            session.refresh(self.dao.get(db.conn(), &new_id)?);
        }
        Ok(outcome)
    }

    /// Password-guarded self-deletion. The UI collects the confirmation; by
    /// the time this runs the operator has already said yes. Success clears
    /// the session, ending it.
    pub fn delete_account(
        &self,
        db: &mut Database,
        session: &mut Session,
        password: &str,
    ) -> Result<MutationOutcome, StoreError> {
        let Some(current_id) = session.current().map(|u| u.user_id.clone()) else {
            return Ok(MutationOutcome::NotFound);
        };
        let outcome = self.dao.delete(db.conn(), &current_id, password)?;
        if outcome.is_applied() {
            session.sign_out();
        }
        Ok(outcome)
    }

    pub fn all_users(&self, db: &mut Database) -> Result<Vec<UserRecord>, StoreError> {
        self.dao.all(db.conn())
    }

    /* Manager-privileged variants: same DAO calls, arbitrary target id. */

    pub fn add_account_by_manager(
        &self,
        db: &mut Database,
        record: &UserRecord,
    ) -> Result<MutationOutcome, StoreError> {
        self.dao.add(db.conn(), record)
    }

    /// Fetch the target first so the UI can prompt with its current values;
    /// `None` when the id does not exist.
    pub fn find_account_for_update(
        &self,
        db: &mut Database,
        target_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        self.dao.get(db.conn(), target_id)
    }

    pub fn update_account_by_manager(
        &self,
        db: &mut Database,
        target_id: &str,
        patch: &UserPatch,
    ) -> Result<MutationOutcome, StoreError> {
        if patch.is_empty() {
            return Ok(MutationOutcome::Applied);
        }
        self.dao.update(db.conn(), target_id, patch)
    }

    pub fn search_account_by_manager(
        &self,
        db: &mut Database,
        target_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        self.dao.get(db.conn(), target_id)
    }

    /// Deleting on behalf of a user still requires that user's id and
    /// password, since there is no separate manager credential.
    pub fn delete_account_by_manager(
        &self,
        db: &mut Database,
        target_id: &str,
        password: &str,
    ) -> Result<MutationOutcome, StoreError> {
        self.dao.delete(db.conn(), target_id, password)
    }
}
