use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use crate::contact::{Contact, ContactFields};
use crate::storage::ContactStore;
use crate::Error;
use super::types::{SchemaOptions, parse_id};

#[derive(Default)]
pub struct Mutation;

/// Apply strict-id policy to the "row existed" flag from storage
fn check_found(ctx: &Context<'_>, id: i64, found: bool) -> Result<()> {
    if found {
        return Ok(());
    }
    tracing::debug!("no contact with id {}", id);
    let strict = ctx
        .data_opt::<SchemaOptions>()
        .map(|o| o.strict_ids)
        .unwrap_or(false);
    if strict {
        return Err(Error::NotFound(id).extend());
    }
    Ok(())
}

#[Object]
impl Mutation {
    /// Insert a contact; fails if the email is already taken
    async fn create_contact(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Result<Option<Contact>> {
        let store = ctx.data::<ContactStore>()?;
        let contact = store
            .insert(ContactFields::new(first_name, last_name, email))
            .await
            .map_err(|e| e.extend())?;
        tracing::debug!("created contact {}", contact);
        Ok(Some(contact))
    }

    async fn update_contact(
        &self,
        ctx: &Context<'_>,
        id: ID,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Result<Option<String>> {
        let id = parse_id(&id).map_err(|e| e.extend())?;
        let store = ctx.data::<ContactStore>()?;
        let found = store
            .update(id, ContactFields::new(first_name, last_name, email))
            .await
            .map_err(|e| e.extend())?;
        check_found(ctx, id, found)?;
        Ok(Some(format!("Contact {} updated", id)))
    }

    async fn delete_contact(&self, ctx: &Context<'_>, id: ID) -> Result<Option<String>> {
        let id = parse_id(&id).map_err(|e| e.extend())?;
        let store = ctx.data::<ContactStore>()?;
        let found = store.delete(id).await.map_err(|e| e.extend())?;
        check_found(ctx, id, found)?;
        Ok(Some(format!("Contact {} deleted", id)))
    }
}
