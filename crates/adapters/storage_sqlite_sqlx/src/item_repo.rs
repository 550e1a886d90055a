//! `SQLite` implementation of [`ItemRepository`].

use std::collections::BTreeMap;

use chrono::{Datelike, SecondsFormat};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use shoplist_app::ports::ItemRepository;
use shoplist_domain::error::ShopListError;
use shoplist_domain::id::ItemId;
use shoplist_domain::item::{Item, ItemPatch, NewItem};
use shoplist_domain::page::Page;
use shoplist_domain::price::Price;
use shoplist_domain::time::{Timestamp, now};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Item);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Item> {
        value.map(|w| w.0)
    }

    fn many(rows: Vec<Self>) -> Vec<Item> {
        rows.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let product_name: String = row.try_get("product_name")?;
        let price_cents: i64 = row.try_get("price_cents")?;
        let category: String = row.try_get("category")?;
        let checked: bool = row.try_get("checked")?;
        let date_added_str: String = row.try_get("date_added")?;

        let price =
            Price::from_cents(price_cents).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let date_added = chrono::DateTime::parse_from_rfc3339(&date_added_str)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Item {
            id: ItemId::from_raw(id),
            product_name,
            price,
            category,
            checked,
            date_added,
        }))
    }
}

/// Fixed-width UTC text so that string comparison in SQL orders like time.
fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Case-insensitive substring match using Unicode lowercasing. `SQLite`'s
/// `LIKE` only folds ASCII, so names are matched here instead.
fn name_contains(product_name: &str, needle: &str) -> bool {
    product_name.to_lowercase().contains(needle)
}

const INSERT: &str = r"
    INSERT INTO shopping_list (product_name, price_cents, category, checked, date_added)
    VALUES (?, ?, ?, ?, ?)
    RETURNING *
";

const SELECT_BY_ID: &str = "SELECT * FROM shopping_list WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM shopping_list ORDER BY id ASC";

const UPDATE: &str = r"
    UPDATE shopping_list SET
        product_name = COALESCE(?, product_name),
        price_cents = COALESCE(?, price_cents),
        category = COALESCE(?, category),
        checked = COALESCE(?, checked),
        date_added = COALESCE(?, date_added)
    WHERE id = ?
    RETURNING *
";

const DELETE_BY_ID: &str = "DELETE FROM shopping_list WHERE id = ?";

const SELECT_PAGE: &str = "SELECT * FROM shopping_list ORDER BY id ASC LIMIT ? OFFSET ?";

const SELECT_ADDED_AFTER: &str = r"
    SELECT * FROM shopping_list
    WHERE date_added > ?
    ORDER BY id ASC
";

const SUM_BY_CATEGORY: &str = r"
    SELECT category, SUM(price_cents) AS total
    FROM shopping_list
    GROUP BY category
    ORDER BY category ASC
";

/// `SQLite`-backed item repository.
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ItemRepository for SqliteItemRepository {
    async fn create(&self, item: NewItem) -> Result<Item, ShopListError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(&item.product_name)
            .bind(item.price.cents())
            .bind(&item.category)
            .bind(item.checked.unwrap_or_default())
            .bind(encode_timestamp(item.date_added.unwrap_or_else(now)))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, ShopListError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Item>, ShopListError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, ShopListError> {
        let row: Option<Wrapper> = sqlx::query_as(UPDATE)
            .bind(patch.product_name)
            .bind(patch.price.map(Price::cents))
            .bind(patch.category)
            .bind(patch.checked)
            .bind(patch.date_added.map(encode_timestamp))
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn delete(&self, id: ItemId) -> Result<bool, ShopListError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_name(&self, term: String) -> Result<Vec<Item>, ShopListError> {
        let needle = term.to_lowercase();
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows)
            .into_iter()
            .filter(|item| name_contains(&item.product_name, &needle))
            .collect())
    }

    async fn get_page(&self, page: Page) -> Result<Vec<Item>, ShopListError> {
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(i64::from(page.size()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn find_added_after(&self, cutoff: Timestamp) -> Result<Vec<Item>, ShopListError> {
        // Stored dates all have four-digit years; bounds outside that range
        // would not compare correctly as text.
        match cutoff.year() {
            year if year < 0 => return self.get_all().await,
            year if year > 9999 => return Ok(Vec::new()),
            _ => {}
        }
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ADDED_AFTER)
            .bind(encode_timestamp(cutoff))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn total_price_by_category(&self) -> Result<BTreeMap<String, Price>, ShopListError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(SUM_BY_CATEGORY)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(category, total)| {
                Price::from_cents(total)
                    .map(|price| (category, price))
                    .map_err(|err| {
                        ShopListError::from(StorageError::from(sqlx::Error::Decode(Box::new(err))))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteItemRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteItemRepository::new(db.pool().clone())
    }

    fn test_item(name: &str, price: &str, category: &str, date_added: &str) -> NewItem {
        NewItem::builder()
            .product_name(name)
            .price(price)
            .category(category)
            .date_added(date_added.parse().unwrap())
            .build()
            .unwrap()
    }

    async fn seed(repo: &SqliteItemRepository) {
        for item in [
            test_item("Fish tricks", "13.10", "Main", "2029-01-22T16:28:32.615Z"),
            test_item("Not Dogs", "4.99", "Snack", "2100-05-22T16:28:32.615Z"),
            test_item("Bluffalo Wings", "5.50", "Snack", "1919-12-22T16:28:32.615Z"),
        ] {
            repo.create(item).await.unwrap();
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.product_name.as_str()).collect()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_item_when_valid() {
        let repo = setup().await;
        let item = test_item("Test new name", "5.05", "Lunch", "2020-01-01T00:00:00Z");

        let created = repo.create(item).await.unwrap();
        assert_eq!(created.id, ItemId::from_raw(1));
        assert!(!created.checked);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.price.to_string(), "5.05");
        assert_eq!(fetched.date_added.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn should_preserve_sub_second_timestamps() {
        let repo = setup().await;
        let date_added = now();
        let item = NewItem::builder()
            .product_name("Not Dogs")
            .price("4.99")
            .category("Snack")
            .date_added(date_added)
            .build()
            .unwrap();

        let created = repo.create(item).await.unwrap();
        assert_eq!(created.date_added, date_added);
    }

    #[tokio::test]
    async fn should_assign_increasing_ids() {
        let repo = setup().await;
        seed(&repo).await;

        let ids: Vec<i64> = repo
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|item| item.id.as_raw())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_not_reuse_ids_after_delete() {
        let repo = setup().await;
        seed(&repo).await;
        repo.delete(ItemId::from_raw(3)).await.unwrap();

        let created = repo
            .create(test_item("Tofurkey", "11.00", "Main", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(created.id, ItemId::from_raw(4));
    }

    #[tokio::test]
    async fn should_return_none_when_item_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(ItemId::from_raw(1)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_return_empty_list_when_table_empty() {
        let repo = setup().await;
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_update_only_patched_fields() {
        let repo = setup().await;
        seed(&repo).await;
        let id = ItemId::from_raw(3);
        let original = repo.get_by_id(id).await.unwrap().unwrap();

        let updated = repo
            .update(id, ItemPatch::default().price("9.99".parse().unwrap()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price.to_string(), "9.99");
        assert_eq!(updated.product_name, original.product_name);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.checked, original.checked);
        assert_eq!(updated.date_added, original.date_added);
    }

    #[tokio::test]
    async fn should_update_every_field() {
        let repo = setup().await;
        seed(&repo).await;
        let id = ItemId::from_raw(3);
        let date_added = "2024-06-01T08:30:00Z".parse().unwrap();

        let updated = repo
            .update(
                id,
                ItemPatch::default()
                    .product_name("updated title")
                    .price("99.99".parse().unwrap())
                    .category("Main")
                    .checked(true)
                    .date_added(date_added),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            updated,
            Item {
                id,
                product_name: "updated title".to_string(),
                price: "99.99".parse().unwrap(),
                category: "Main".to_string(),
                checked: true,
                date_added,
            }
        );
    }

    #[tokio::test]
    async fn should_leave_row_unchanged_when_patch_empty() {
        let repo = setup().await;
        seed(&repo).await;
        let id = ItemId::from_raw(1);
        let original = repo.get_by_id(id).await.unwrap().unwrap();

        let updated = repo.update(id, ItemPatch::default()).await.unwrap();
        assert_eq!(updated, Some(original));
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_item() {
        let repo = setup().await;
        let result = repo
            .update(ItemId::from_raw(7), ItemPatch::default().checked(true))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_delete_item_when_exists() {
        let repo = setup().await;
        seed(&repo).await;

        assert!(repo.delete(ItemId::from_raw(3)).await.unwrap());
        assert!(repo.get_by_id(ItemId::from_raw(3)).await.unwrap().is_none());
        assert!(!repo.delete(ItemId::from_raw(3)).await.unwrap());
    }

    #[tokio::test]
    async fn should_search_case_insensitively() {
        let repo = setup().await;
        seed(&repo).await;

        let found = repo.search_by_name("fish".to_string()).await.unwrap();
        assert_eq!(names(&found), vec!["Fish tricks"]);

        let found = repo.search_by_name("WINGS".to_string()).await.unwrap();
        assert_eq!(names(&found), vec!["Bluffalo Wings"]);

        assert!(repo.search_by_name("zz".to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_search_non_ascii_names_ignoring_case() {
        let repo = setup().await;
        seed(&repo).await;
        repo.create(test_item("Éclair", "3.20", "Dessert", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.create(test_item("CRÈME BRÛLÉE", "6.00", "Dessert", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        assert_eq!(
            names(&repo.search_by_name("éclair".to_string()).await.unwrap()),
            vec!["Éclair"]
        );
        assert_eq!(
            names(&repo.search_by_name("crème brûlée".to_string()).await.unwrap()),
            vec!["CRÈME BRÛLÉE"]
        );
    }

    #[tokio::test]
    async fn should_match_like_metacharacters_literally() {
        let repo = setup().await;
        seed(&repo).await;
        repo.create(test_item("100% Juice", "2.00", "Drink", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.create(test_item("snake_case", "1.00", "Snack", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        assert_eq!(
            names(&repo.search_by_name("%".to_string()).await.unwrap()),
            vec!["100% Juice"]
        );
        assert_eq!(
            names(&repo.search_by_name("_".to_string()).await.unwrap()),
            vec!["snake_case"]
        );
        assert!(
            repo.search_by_name("' OR 1=1 --".to_string())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn should_paginate_by_id() {
        let repo = setup().await;
        seed(&repo).await;

        let first = repo.get_page(Page::with_size(1, 2).unwrap()).await.unwrap();
        let second = repo.get_page(Page::with_size(2, 2).unwrap()).await.unwrap();
        let third = repo.get_page(Page::with_size(3, 2).unwrap()).await.unwrap();

        assert_eq!(names(&first), vec!["Fish tricks", "Not Dogs"]);
        assert_eq!(names(&second), vec!["Bluffalo Wings"]);
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn should_find_items_added_after_cutoff() {
        let repo = setup().await;
        seed(&repo).await;

        let cutoff = "2029-01-22T16:28:32.615Z".parse().unwrap();
        let found = repo.find_added_after(cutoff).await.unwrap();
        assert_eq!(names(&found), vec!["Not Dogs"]);

        let cutoff = "2000-01-01T00:00:00Z".parse().unwrap();
        let found = repo.find_added_after(cutoff).await.unwrap();
        assert_eq!(names(&found), vec!["Fish tricks", "Not Dogs"]);
    }

    #[tokio::test]
    async fn should_handle_cutoffs_outside_four_digit_years() {
        let repo = setup().await;
        seed(&repo).await;

        let found = repo.find_added_after(Timestamp::MIN_UTC).await.unwrap();
        assert_eq!(names(&found), vec!["Fish tricks", "Not Dogs", "Bluffalo Wings"]);

        assert!(repo.find_added_after(Timestamp::MAX_UTC).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_total_prices_per_category() {
        let repo = setup().await;
        seed(&repo).await;

        let totals = repo.total_price_by_category().await.unwrap();

        let rendered: Vec<(String, String)> = totals
            .iter()
            .map(|(category, price)| (category.clone(), price.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("Main".to_string(), "13.10".to_string()),
                ("Snack".to_string(), "10.49".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn should_return_no_totals_when_table_empty() {
        let repo = setup().await;
        assert!(repo.total_price_by_category().await.unwrap().is_empty());
    }
}
