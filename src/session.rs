//! The interactive session: at most one signed-in user at a time.
//!
//! The session is a plain value owned by the menu loop and passed into each
//! account operation, so there is no hidden global "current user" slot.

use crate::store::UserRecord;

/// Holds the currently authenticated user, if any.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<UserRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with a freshly fetched record.
    pub fn sign_in(&mut self, user: UserRecord) {
        self.current = Some(user);
    }

    /// Clear the slot unconditionally.
    pub fn sign_out(&mut self) {
        self.current = None;
    }

    /// Replace the slot with the result of a re-fetch. A vanished record
    /// ends the session rather than leaving a stale copy behind.
    pub fn refresh(&mut self, record: Option<UserRecord>) {
        self.current = record;
    }

    pub fn current(&self) -> Option<&UserRecord> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}
