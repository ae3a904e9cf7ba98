//! GraphQL output type and error mapping

use async_graphql::{ErrorExtensions, ID, Object};
use crate::contact::Contact;
use crate::Error;

// Fields are nullable on the wire even though a stored row always has them.
#[Object(name = "Contact")]
impl Contact {
    async fn id(&self) -> Option<ID> {
        Some(ID::from(self.id.to_string()))
    }

    async fn first_name(&self) -> Option<&str> {
        Some(&self.first_name)
    }

    async fn last_name(&self) -> Option<&str> {
        Some(&self.last_name)
    }

    async fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Parse an `ID` argument into a row id
///
/// Accepts both `1` and `"1"` on the wire; anything else is a user error.
pub fn parse_id(id: &ID) -> crate::Result<i64> {
    id.parse::<i64>().map_err(|_| Error::InvalidId(id.to_string()))
}

/// Per-schema behavior switches, injected as context data
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
    /// Report update/delete of an unknown id as an error instead of confirming
    pub strict_ids: bool,
}
