//! GraphQL API for contacts
//!
//! ```graphql
//! { contacts { id firstName lastName email } }
//! { contact(id: 1) { email } }
//! mutation { createContact(firstName: "Ada", lastName: "Lovelace", email: "ada@x.com") { id } }
//! mutation { updateContact(id: 1, firstName: "Ada", lastName: "King", email: "ada@x.com") }
//! mutation { deleteContact(id: 1) }
//! ```

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use crate::storage::ContactStore;
pub use mutation::Mutation;
pub use query::Query;
pub use types::{SchemaOptions, parse_id};

/// The contacts GraphQL schema type
pub type ContactSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the GraphQL schema with the store as context
pub fn build_schema(store: ContactStore, options: SchemaOptions) -> ContactSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .data(options)
        .finish()
}

/// Export the schema as SDL
pub fn export_schema_sdl() -> String {
    Schema::build(Query, Mutation, EmptySubscription).finish().sdl()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn schema() -> (ContactSchema, ContactStore) {
        let store = ContactStore::open_in_memory().unwrap();
        (build_schema(store.clone(), SchemaOptions::default()), store)
    }

    async fn run(schema: &ContactSchema, query: &str) -> Value {
        let resp = schema.execute(query).await;
        serde_json::to_value(&resp).unwrap()
    }

    const CREATE_ADA: &str = r#"mutation {
        createContact(firstName: "Ada", lastName: "Lovelace", email: "ada@x.com") {
            id firstName lastName email
        }
    }"#;

    #[tokio::test]
    async fn test_lifecycle_example() {
        let (schema, _) = schema();

        let created = run(&schema, CREATE_ADA).await;
        assert_eq!(
            created["data"]["createContact"],
            json!({"id": "1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com"})
        );

        let fetched = run(&schema, "{ contact(id: 1) { id firstName lastName email } }").await;
        assert_eq!(fetched["data"]["contact"], created["data"]["createContact"]);

        let deleted = run(&schema, "mutation { deleteContact(id: 1) }").await;
        let msg = deleted["data"]["deleteContact"].as_str().unwrap();
        assert!(msg.contains('1'));

        let gone = run(&schema, "{ contact(id: 1) { id } }").await;
        assert_eq!(gone["data"]["contact"], Value::Null);
        assert!(gone.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_error() {
        let (schema, store) = schema();

        run(&schema, CREATE_ADA).await;
        let second = run(&schema, CREATE_ADA).await;

        let err = &second["errors"][0];
        assert!(err["message"].as_str().unwrap().contains("UNIQUE constraint failed"));
        assert_eq!(err["extensions"]["code"], "CONSTRAINT_VIOLATION");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_argument_rejected_before_storage() {
        let (schema, store) = schema();

        let resp = run(
            &schema,
            r#"mutation { createContact(firstName: "Ada", lastName: "Lovelace") { id } }"#,
        )
        .await;

        assert!(resp["errors"].as_array().is_some_and(|e| !e.is_empty()));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_reflects_and_isolates() {
        let (schema, _) = schema();

        run(&schema, CREATE_ADA).await;
        run(
            &schema,
            r#"mutation { createContact(firstName: "Grace", lastName: "Hopper", email: "grace@x.com") { id } }"#,
        )
        .await;

        let updated = run(
            &schema,
            r#"mutation { updateContact(id: "1", firstName: "Ada", lastName: "King", email: "ada@king.com") }"#,
        )
        .await;
        assert_eq!(updated["data"]["updateContact"], "Contact 1 updated");

        let all = run(&schema, "{ contacts { id lastName email } }").await;
        assert_eq!(
            all["data"]["contacts"],
            json!([
                {"id": "1", "lastName": "King", "email": "ada@king.com"},
                {"id": "2", "lastName": "Hopper", "email": "grace@x.com"},
            ])
        );
    }

    #[tokio::test]
    async fn test_unknown_id_is_silent_by_default() {
        let (schema, store) = schema();
        run(&schema, CREATE_ADA).await;

        let resp = run(&schema, "mutation { deleteContact(id: 99) }").await;
        assert_eq!(resp["data"]["deleteContact"], "Contact 99 deleted");
        assert!(resp.get("errors").is_none());

        let resp = run(
            &schema,
            r#"mutation { updateContact(id: 99, firstName: "x", lastName: "y", email: "z@x.com") }"#,
        )
        .await;
        assert_eq!(resp["data"]["updateContact"], "Contact 99 updated");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_strict_ids_reports_not_found() {
        let store = ContactStore::open_in_memory().unwrap();
        let schema = build_schema(store, SchemaOptions { strict_ids: true });

        let resp = run(&schema, "mutation { deleteContact(id: 5) }").await;
        let err = &resp["errors"][0];
        assert_eq!(err["message"], "Contact 5 not found");
        assert_eq!(err["extensions"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_id() {
        let (schema, _) = schema();

        let resp = run(&schema, r#"{ contact(id: "abc") { id } }"#).await;
        assert_eq!(resp["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");
    }

    #[tokio::test]
    async fn test_contacts_count_tracks_creates_and_deletes() {
        let (schema, _) = schema();

        for i in 0..5 {
            let q = format!(
                r#"mutation {{ createContact(firstName: "F{i}", lastName: "L{i}", email: "u{i}@x.com") {{ id }} }}"#
            );
            run(&schema, &q).await;
        }
        run(&schema, "mutation { deleteContact(id: 2) }").await;
        run(&schema, "mutation { deleteContact(id: 4) }").await;
        run(&schema, "mutation { deleteContact(id: 4) }").await;

        let all = run(&schema, "{ contacts { id } }").await;
        assert_eq!(all["data"]["contacts"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_field_is_null_not_missing() {
        let (schema, store) = schema();

        let resp = run(
            &schema,
            r#"mutation {
                a: createContact(firstName: "Ada", lastName: "Lovelace", email: "ada@x.com") { id }
                b: createContact(firstName: "Ada", lastName: "Again", email: "ada@x.com") { id }
            }"#,
        )
        .await;

        assert_eq!(resp["data"], json!({"a": {"id": "1"}, "b": null}));
        assert_eq!(resp["errors"][0]["path"], json!(["b"]));
        assert_eq!(resp["errors"][0]["extensions"]["code"], "CONSTRAINT_VIOLATION");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_error_not_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");
        let store = ContactStore::open(&path).await.unwrap();
        let schema = build_schema(store, SchemaOptions::default());
        run(&schema, CREATE_ADA).await;

        // Break the table out from under the live connection
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute("DROP TABLE contacts", [])
            .unwrap();

        for query in ["{ contact(id: 1) { id } }", "{ contacts { id } }"] {
            let resp = run(&schema, query).await;
            let err = &resp["errors"][0];
            assert_eq!(err["extensions"]["code"], "STORAGE_ERROR", "{query}");
            assert_eq!(err["message"], "no such table: contacts", "{query}");
        }
    }

    #[tokio::test]
    async fn test_non_numeric_id_in_mutations() {
        let (schema, store) = schema();
        run(&schema, CREATE_ADA).await;

        for query in [
            r#"mutation { deleteContact(id: "abc") }"#,
            r#"mutation { updateContact(id: "abc", firstName: "x", lastName: "y", email: "z@x.com") }"#,
        ] {
            let resp = run(&schema, query).await;
            assert_eq!(resp["errors"][0]["extensions"]["code"], "BAD_USER_INPUT", "{query}");
        }

        let all = run(&schema, "{ contacts { firstName email } }").await;
        assert_eq!(all["data"]["contacts"], json!([{"firstName": "Ada", "email": "ada@x.com"}]));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[test]
    fn test_sdl_has_wire_fields() {
        let sdl = export_schema_sdl();
        let lines: Vec<&str> = sdl.lines().map(str::trim).collect();

        for expected in [
            "type Contact {",
            "id: ID",
            "firstName: String",
            "lastName: String",
            "email: String",
            "contacts: [Contact]",
            "contact(id: ID!): Contact",
            "createContact(firstName: String!, lastName: String!, email: String!): Contact",
            "updateContact(id: ID!, firstName: String!, lastName: String!, email: String!): String",
            "deleteContact(id: ID!): String",
        ] {
            assert!(lines.contains(&expected), "missing `{expected}` in:\n{sdl}");
        }
        assert!(!sdl.contains("String!\n"), "output fields must be nullable:\n{sdl}");
    }
}
