//! Database schema definitions

/// SQL to create the contacts table
///
/// Column names match the GraphQL field names so databases written by
/// earlier deployments stay readable.
pub const CREATE_CONTACTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstName TEXT NOT NULL,
    lastName TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)
"#;

/// Column list shared by every SELECT, in `row_to_contact` order
pub const CONTACT_COLUMNS: &str = "id, firstName, lastName, email";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_CONTACTS_TABLE]
}
