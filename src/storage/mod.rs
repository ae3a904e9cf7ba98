//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - contacts(id, firstName, lastName, email)

pub mod schema;
pub mod sqlite;
pub mod store;

pub use sqlite::SqliteStore;
pub use store::ContactStore;
