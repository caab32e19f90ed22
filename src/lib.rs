// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive tool.
//
// Module responsibilities:
// - `config`: Resolves where the SQLite database lives (env var, JSON
//   config file in the home directory, or a default path).
// - `store`: The data-access layer: connection handling, embedded
//   migrations, Diesel schema and the menu/user DAOs.
// - `session`: The "currently signed-in user" value owned by the menu loop.
// - `manager`: Menu and account workflows orchestrating DAO calls.
// - `ui`: Implements the terminal-based menus and delegates to `manager`.
//
// Keeping this separation makes the workflows testable against an
// in-memory database without driving the terminal.
pub mod config;
pub mod manager;
pub mod session;
pub mod store;
pub mod ui;
