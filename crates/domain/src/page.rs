//! Page — a fixed-size window over the item list.

use crate::error::ValidationError;

/// Number of items per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// One-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Page `number` with the default size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPage`] when `number` is zero.
    pub fn new(number: u32) -> Result<Self, ValidationError> {
        Self::with_size(number, DEFAULT_PAGE_SIZE)
    }

    /// Page `number` holding `size` items.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPage`] when either value is zero.
    pub fn with_size(number: u32, size: u32) -> Result<Self, ValidationError> {
        if number == 0 || size == 0 {
            return Err(ValidationError::InvalidPage { number, size });
        }
        Ok(Self { number, size })
    }

    #[must_use]
    pub fn number(self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn size(self) -> u32 {
        self.size
    }

    /// Rows to skip before this page starts.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}
