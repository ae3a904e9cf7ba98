//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::contact::{Contact, ContactFields};
use super::schema::{self, CONTACT_COLUMNS};

/// SQLite-backed storage for contacts
///
/// Every method is a single statement in auto-commit mode.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the contacts table if it is not there yet
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Every contact, ascending by id
    pub fn list_all(&self) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"
        ))?;

        // A row that fails to decode fails the whole listing.
        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// Get a contact by id
    pub fn get_by_id(&self, id: i64) -> Result<Option<Contact>> {
        self.conn
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                [id],
                row_to_contact,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a contact and return it with its assigned id
    pub fn insert(&self, fields: &ContactFields) -> Result<Contact> {
        let contact = self.conn.query_row(
            &format!(
                "INSERT INTO contacts (firstName, lastName, email) VALUES (?1, ?2, ?3) RETURNING {CONTACT_COLUMNS}"
            ),
            params![fields.first_name, fields.last_name, fields.email],
            row_to_contact,
        )?;
        Ok(contact)
    }

    /// Replace the mutable fields of a contact
    ///
    /// Returns `false` when no row has that id.
    pub fn update(&self, id: i64, fields: &ContactFields) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE contacts SET firstName = ?1, lastName = ?2, email = ?3 WHERE id = ?4",
            params![fields.first_name, fields.last_name, fields.email, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a contact by id
    ///
    /// Returns `false` when no row has that id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM contacts WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    /// Count all contacts
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Helper to convert a row to a Contact
fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}
