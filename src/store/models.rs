//! Row structs and changesets for the store.
//!
//! Partial updates are modelled with `Option` fields: `None` means "leave the
//! column unchanged" and is skipped by Diesel when building the UPDATE. This
//! replaces the usual null-or-sentinel convention, so an impossible value like
//! a negative price can never be mistaken for a real one.

use diesel::prelude::*;

use super::schema::{menu, users};

/// A single menu row, identified by the (restaurant, menu) composite key.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = menu)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Menu {
    pub res_id: i32,
    pub menu_id: i32,
    pub menu_name: String,
    pub price: i32,
}

/// Partial update for a menu row. Blank console input maps to `None`.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = menu)]
pub struct MenuPatch {
    pub menu_name: Option<String>,
    pub price: Option<i32>,
}

impl MenuPatch {
    /// True when every field is `None`, i.e. the update would touch nothing.
    pub fn is_empty(&self) -> bool {
        self.menu_name.is_none() && self.price.is_none()
    }
}

/// A full user account row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRecord {
    pub user_id: String,
    pub user_pw: String,
    pub name: String,
    pub student_id: i32,
    pub email: String,
    pub location: String,
}

/// Privacy-limited projection used when looking up somebody else's account:
/// only the id and display name are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
}

/// Partial update for a user account. The id itself may be changed, which is
/// why updates address the row by its id at the time of the call. The derive
/// skips the primary-key field; `UserDao::update` applies it explicitly.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserPatch {
    pub user_id: Option<String>,
    pub user_pw: Option<String>,
    pub name: Option<String>,
    pub student_id: Option<i32>,
    pub email: Option<String>,
    pub location: Option<String>,
}

impl UserPatch {
    /// True when every field is `None`.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.user_pw.is_none()
            && self.name.is_none()
            && self.student_id.is_none()
            && self.email.is_none()
            && self.location.is_none()
    }
}

/// One row of the user-facing menu search: restaurant name, menu name, price.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct MenuSearchRow {
    pub res_name: String,
    pub menu_name: String,
    pub price: i32,
}
