//! Item — one shopping-list entry.
//!
//! An [`Item`] is what the store hands back: it always carries a
//! store-assigned [`ItemId`]. A [`NewItem`] is what callers hand in: no id,
//! and the defaulted fields (`checked`, `date_added`) may be left unset.
//! An [`ItemPatch`] names only the fields an update should touch.

use serde::{Deserialize, Serialize};

use crate::error::{ShopListError, ValidationError};
use crate::id::ItemId;
use crate::price::Price;
use crate::time::{Timestamp, is_four_digit_year};

/// A stored shopping-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub product_name: String,
    pub price: Price,
    pub category: String,
    pub checked: bool,
    pub date_added: Timestamp,
}

/// An item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub product_name: String,
    pub price: Price,
    pub category: String,
    /// Stored as `false` when unset.
    pub checked: Option<bool>,
    /// Stored as the insertion time when unset.
    pub date_added: Option<Timestamp>,
}

impl NewItem {
    /// Create a builder for constructing a [`NewItem`].
    #[must_use]
    pub fn builder() -> NewItemBuilder {
        NewItemBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::Validation`] when `product_name` or
    /// `category` is blank, or `date_added` is outside years 0000 to 9999.
    pub fn validate(&self) -> Result<(), ShopListError> {
        require_text("product_name", &self.product_name)?;
        require_text("category", &self.category)?;
        if let Some(date_added) = self.date_added {
            require_storable_date(date_added)?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`NewItem`].
#[derive(Debug, Default)]
pub struct NewItemBuilder {
    product_name: Option<String>,
    price: Option<String>,
    category: Option<String>,
    checked: Option<bool>,
    date_added: Option<Timestamp>,
}

impl NewItemBuilder {
    #[must_use]
    pub fn product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    /// Price as decimal text; parsed when the builder is consumed.
    #[must_use]
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn date_added(mut self, date_added: Timestamp) -> Self {
        self.date_added = Some(date_added);
        self
    }

    /// Consume the builder, validate, and return a [`NewItem`].
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::Validation`] if a required field is missing
    /// or blank, or if the price is malformed.
    pub fn build(self) -> Result<NewItem, ShopListError> {
        let product_name = self
            .product_name
            .ok_or(ValidationError::MissingField("product_name"))?;
        let price = self
            .price
            .ok_or(ValidationError::MissingField("price"))?
            .parse::<Price>()?;
        let category = self
            .category
            .ok_or(ValidationError::MissingField("category"))?;

        let item = NewItem {
            product_name,
            price,
            category,
            checked: self.checked,
            date_added: self.date_added,
        };
        item.validate()?;
        Ok(item)
    }
}

/// A partial update: `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub product_name: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub checked: Option<bool>,
    pub date_added: Option<Timestamp>,
}

impl ItemPatch {
    #[must_use]
    pub fn product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn date_added(mut self, date_added: Timestamp) -> Self {
        self.date_added = Some(date_added);
        self
    }

    /// `true` when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.checked.is_none()
            && self.date_added.is_none()
    }

    /// Check that any field being set is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ShopListError::Validation`] when a present text field is
    /// blank or a present `date_added` is outside years 0000 to 9999.
    pub fn validate(&self) -> Result<(), ShopListError> {
        if let Some(product_name) = &self.product_name {
            require_text("product_name", product_name)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(date_added) = self.date_added {
            require_storable_date(date_added)?;
        }
        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

fn require_storable_date(value: Timestamp) -> Result<(), ValidationError> {
    if !is_four_digit_year(value) {
        return Err(ValidationError::DateOutOfRange(value));
    }
    Ok(())
}
