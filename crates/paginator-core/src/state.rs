//! Pagination state as exposed by a pageable collection.
//!
//! Page numbers stored here are in the collection's own numbering. The
//! window calculator works on 0-based values obtained through
//! [`PaginationState::normalized`].

use crate::{PaginatorError, PaginatorResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Index base used by a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PageBase {
    #[default]
    Zero,
    One,
}

impl PageBase {
    /// Page number of the first page in this base.
    pub fn first_page(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

impl From<PageBase> for u8 {
    fn from(base: PageBase) -> Self {
        base.first_page() as u8
    }
}

impl TryFrom<u8> for PageBase {
    type Error = PaginatorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(PaginatorError::InvalidState(format!(
                "first page must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

/// Number of records per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Records(usize),
    /// Every record on a single page.
    All,
}

impl PageSize {
    pub const ALL_VALUE: &'static str = "all";

    /// Create a page size, rejecting zero.
    pub fn records(size: usize) -> PaginatorResult<Self> {
        if size == 0 {
            return Err(PaginatorError::InvalidState(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self::Records(size))
    }

    /// Number of pages needed for `total_records`.
    pub fn page_count(self, total_records: usize) -> usize {
        match self {
            Self::Records(size) => total_records.div_ceil(size.max(1)),
            Self::All if total_records > 0 => 1,
            Self::All => 0,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Records(25)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Records(size) => write!(f, "{}", size),
            Self::All => f.write_str(Self::ALL_VALUE),
        }
    }
}

impl FromStr for PageSize {
    type Err = PaginatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::ALL_VALUE) {
            return Ok(Self::All);
        }
        let size = s.parse::<usize>().map_err(|_| {
            PaginatorError::InvalidState(format!(
                "page size must be a positive integer or '{}', got '{}'",
                Self::ALL_VALUE,
                s
            ))
        })?;
        Self::records(size)
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Records(size) => serializer.serialize_u64(*size as u64),
            Self::All => serializer.serialize_str(Self::ALL_VALUE),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(usize),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(size) => Self::records(size).map_err(serde::de::Error::custom),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Snapshot of a paged collection's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub base: PageBase,
    pub last_page: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub page_size: PageSize,
}

impl PaginationState {
    /// Create a state, checking that the current and last pages are in range.
    pub fn new(
        base: PageBase,
        last_page: usize,
        current_page: usize,
        total_pages: usize,
        total_records: usize,
        page_size: PageSize,
    ) -> PaginatorResult<Self> {
        let state = Self {
            base,
            last_page,
            current_page,
            total_pages,
            total_records,
            page_size,
        };
        state.validate()?;
        Ok(state)
    }

    /// Derive page counts from a record count and page size.
    ///
    /// Zero records gives zero pages with `last_page == first_page`.
    pub fn for_records(
        base: PageBase,
        total_records: usize,
        page_size: PageSize,
        current_page: usize,
    ) -> PaginatorResult<Self> {
        let total_pages = page_size.page_count(total_records);
        let last_page = base.first_page() + total_pages.saturating_sub(1);
        Self::new(
            base,
            last_page,
            current_page,
            total_pages,
            total_records,
            page_size,
        )
    }

    pub fn validate(&self) -> PaginatorResult<()> {
        let first_page = self.first_page();
        if self.last_page < first_page {
            return Err(PaginatorError::InvalidState(format!(
                "last page {} is before first page {}",
                self.last_page, first_page
            )));
        }
        if !(first_page..=self.last_page).contains(&self.current_page) {
            return Err(PaginatorError::InvalidState(format!(
                "current page {} is outside [{}, {}]",
                self.current_page, first_page, self.last_page
            )));
        }
        Ok(())
    }

    pub fn first_page(&self) -> usize {
        self.base.first_page()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > self.first_page()
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }

    /// `(last_page, current_page)` rebased to 0.
    pub fn normalized(&self) -> (usize, usize) {
        let first_page = self.first_page();
        let last_page = self.last_page.saturating_sub(first_page);
        let current_page = self.current_page.max(first_page) - first_page;
        (last_page, current_page)
    }

    /// Convert a 0-based index into this collection's numbering.
    pub fn rebase(&self, index: usize) -> usize {
        index + self.first_page()
    }

    pub fn contains_page(&self, page: usize) -> bool {
        (self.first_page()..=self.last_page).contains(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_records_one_based() {
        let state = PaginationState::for_records(PageBase::One, 101, PageSize::Records(10), 1)
            .unwrap();

        assert_eq!(state.total_pages, 11);
        assert_eq!(state.last_page, 11);
        assert!(!state.has_previous_page());
        assert!(state.has_next_page());
    }

    #[test]
    fn test_for_records_empty_collection() {
        let state = PaginationState::for_records(PageBase::One, 0, PageSize::Records(10), 1)
            .unwrap();

        assert_eq!(state.total_pages, 0);
        assert_eq!(state.last_page, 1);
        assert_eq!(state.normalized(), (0, 0));
    }

    #[test]
    fn test_all_records_on_one_page() {
        let state = PaginationState::for_records(PageBase::Zero, 500, PageSize::All, 0).unwrap();

        assert_eq!(state.total_pages, 1);
        assert_eq!(state.last_page, 0);
    }

    #[test]
    fn test_current_page_out_of_range() {
        let result = PaginationState::new(PageBase::One, 5, 6, 5, 50, PageSize::Records(10));
        assert!(matches!(result, Err(PaginatorError::InvalidState(_))));

        let result = PaginationState::new(PageBase::One, 5, 0, 5, 50, PageSize::Records(10));
        assert!(matches!(result, Err(PaginatorError::InvalidState(_))));
    }

    #[test]
    fn test_normalized_one_based() {
        let state = PaginationState::new(PageBase::One, 25, 12, 25, 250, PageSize::Records(10))
            .unwrap();

        assert_eq!(state.normalized(), (24, 11));
        assert_eq!(state.rebase(10), 11);
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!("all".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!(" 50 ".parse::<PageSize>().unwrap(), PageSize::Records(50));
        assert!("0".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_page_base_rejects_other_values() {
        assert!(PageBase::try_from(2).is_err());
        assert_eq!(PageBase::try_from(1).unwrap(), PageBase::One);
    }
}
