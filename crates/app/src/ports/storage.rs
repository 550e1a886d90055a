//! Storage port — repository trait for item persistence.

use std::collections::BTreeMap;
use std::future::Future;

use shoplist_domain::error::ShopListError;
use shoplist_domain::id::ItemId;
use shoplist_domain::item::{Item, ItemPatch, NewItem};
use shoplist_domain::page::Page;
use shoplist_domain::price::Price;
use shoplist_domain::time::Timestamp;

/// Repository for persisting and querying [`Item`]s.
///
/// Every listing is ordered by id ascending. Missing rows are reported as
/// `None`/`false`; turning them into errors is the service's job.
pub trait ItemRepository {
    /// Insert a new item and return it with its store-assigned id.
    fn create(&self, item: NewItem) -> impl Future<Output = Result<Item, ShopListError>> + Send;

    /// Get an item by its id.
    fn get_by_id(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<Item>, ShopListError>> + Send;

    /// Get every item.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Item>, ShopListError>> + Send;

    /// Apply `patch` to the item with `id`, returning the updated row, or
    /// `None` when no such item exists.
    fn update(
        &self,
        id: ItemId,
        patch: ItemPatch,
    ) -> impl Future<Output = Result<Option<Item>, ShopListError>> + Send;

    /// Delete the item with `id`. Returns `false` when no row matched.
    fn delete(&self, id: ItemId) -> impl Future<Output = Result<bool, ShopListError>> + Send;

    /// Items whose product name contains `term`, ignoring case. The term is
    /// matched literally.
    fn search_by_name(
        &self,
        term: String,
    ) -> impl Future<Output = Result<Vec<Item>, ShopListError>> + Send;

    /// One page of items.
    fn get_page(
        &self,
        page: Page,
    ) -> impl Future<Output = Result<Vec<Item>, ShopListError>> + Send;

    /// Items added strictly after `cutoff`.
    fn find_added_after(
        &self,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<Vec<Item>, ShopListError>> + Send;

    /// Sum of prices per category. Categories with no items are absent.
    fn total_price_by_category(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, Price>, ShopListError>> + Send;
}
