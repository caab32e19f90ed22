//! Orchestration layer between the interactive menus and the DAOs.
//!
//! Managers hold no state of their own: the database handle and, for account
//! operations, the session are passed into every call by the owner of the
//! menu loop.

pub mod menu;
pub mod user;

pub use menu::MenuManager;
pub use user::UserManager;
