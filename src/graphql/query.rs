use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use crate::contact::Contact;
use crate::storage::ContactStore;
use super::types::parse_id;

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Every stored contact
    async fn contacts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Contact>>>> {
        let store = ctx.data::<ContactStore>()?;
        let contacts = store.list_all().await.map_err(|e| e.extend())?;
        tracing::debug!("contacts -> {} rows", contacts.len());
        Ok(Some(contacts.into_iter().map(Some).collect()))
    }

    /// One contact, or null when no row has this id
    async fn contact(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Contact>> {
        let id = parse_id(&id).map_err(|e| e.extend())?;
        let store = ctx.data::<ContactStore>()?;
        let contact = store.get_by_id(id).await.map_err(|e| e.extend())?;
        tracing::debug!("contact({}) found: {}", id, contact.is_some());
        Ok(contact)
    }
}
