use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::catalog::CatalogError;
use crate::domain::{CategoryFilter, MenuItem, MenuItemDraft};

/// Client for the menu actor. Serves both the storefront grid and the admin
/// catalog editor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<MenuItem>,
}

impl_basic_client!(CatalogClient, MenuItem, u64, CatalogError, menu_item);

impl CatalogClient {
    /// Items of one category in stored order; [`CategoryFilter::All`] returns everything.
    #[instrument(skip(self))]
    pub async fn by_category(&self, filter: &CategoryFilter) -> Result<Vec<MenuItem>, CatalogError> {
        let items = self.all().await?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    pub async fn by_id(&self, id: u64) -> Result<Option<MenuItem>, CatalogError> {
        self.get_menu_item(id).await
    }

    /// Saves the admin form.
    ///
    /// Without `existing_id` the item is created under a fresh id; with one, that
    /// item is replaced and keeps its id.
    ///
    /// # Errors
    /// - [`CatalogError::Validation`] for a negative price, non-finite rating or no images;
    ///   the menu is left unchanged.
    /// - [`CatalogError::NotFound`] when `existing_id` is not on the menu.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn upsert(&self, draft: MenuItemDraft, existing_id: Option<u64>) -> Result<MenuItem, CatalogError> {
        debug!("Sending request");
        let result = match existing_id {
            None => self.inner.create(draft).await,
            Some(id) => self.inner.update(id, draft).await,
        };
        match result {
            Ok(item) => {
                info!(item_id = item.id, "Menu item saved");
                Ok(item)
            }
            Err(e) => {
                warn!(error = %e, "Menu item not saved");
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: u64) -> Result<bool, CatalogError> {
        self.delete_menu_item(id).await
    }
}
