//! Item service — use-cases for managing shopping-list items.

use std::collections::BTreeMap;

use shoplist_domain::error::{NotFoundError, ShopListError};
use shoplist_domain::id::ItemId;
use shoplist_domain::item::{Item, ItemPatch, NewItem};
use shoplist_domain::page::Page;
use shoplist_domain::price::Price;
use shoplist_domain::time::{days_before, now};

use crate::ports::ItemRepository;

/// Application service for item CRUD and queries.
pub struct ItemService<R> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all items.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_items(&self) -> Result<Vec<Item>, ShopListError> {
        self.repo.get_all().await
    }

    /// Look up an item by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::NotFound`] when no item with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, ShopListError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Insert a new item. Unset `checked` becomes `false` and unset
    /// `date_added` becomes the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, item), fields(product_name = %item.product_name))]
    pub async fn insert_item(&self, mut item: NewItem) -> Result<Item, ShopListError> {
        item.validate()?;
        item.checked.get_or_insert(false);
        item.date_added.get_or_insert_with(now);
        let created = self.repo.create(item).await?;
        tracing::debug!(id = %created.id, "item inserted");
        Ok(created)
    }

    /// Change only the fields present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::Validation`] if a patched field is invalid,
    /// [`ShopListError::NotFound`] when no item with `id` exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<Item, ShopListError> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get_item(id).await;
        }
        self.repo
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Delete an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::NotFound`] when no item with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> Result<(), ShopListError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id).into())
        }
    }

    /// Items whose product name contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn search_items(&self, term: &str) -> Result<Vec<Item>, ShopListError> {
        self.repo.search_by_name(term.to_string()).await
    }

    /// One page of items in id order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn paginate_items(&self, page: Page) -> Result<Vec<Item>, ShopListError> {
        self.repo.get_page(page).await
    }

    /// Items added within the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn items_added_since(&self, days: u32) -> Result<Vec<Item>, ShopListError> {
        self.repo.find_added_after(days_before(now(), days)).await
    }

    /// Sum of item prices per category.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn total_price_by_category(
        &self,
    ) -> Result<BTreeMap<String, Price>, ShopListError> {
        self.repo.total_price_by_category().await
    }
}

fn not_found(id: ItemId) -> NotFoundError {
    NotFoundError {
        entity: "Item",
        id: id.to_string(),
    }
}
