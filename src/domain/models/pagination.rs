//! Offset pagination shared by the cat and mission listings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MIN_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Raw `?page=&size=` query, both optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page: Some(page), size: Some(size) }
    }

    /// Apply defaults and check bounds, returning `(page, size)`.
    pub fn normalize(&self) -> Result<(u32, u32), String> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
            return Err(format!(
                "page size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"
            ));
        }
        Ok((page, size))
    }
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: total.div_ceil(u64::from(page_size)),
        }
    }

    /// Page 1 is always addressable; any later page must exist.
    pub fn check_in_range(&self) -> Result<(), String> {
        if self.page > 1 && u64::from(self.page) > self.total_pages {
            return Err(format!(
                "page {} is out of range, total pages: {}",
                self.page, self.total_pages
            ));
        }
        Ok(())
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// One page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PageRequest::default().normalize().unwrap(), (1, 10));
    }

    #[test]
    fn test_size_bounds() {
        assert!(PageRequest::new(1, 4).normalize().is_err());
        assert!(PageRequest::new(1, 5).normalize().is_ok());
        assert!(PageRequest::new(1, 50).normalize().is_ok());
        assert!(PageRequest::new(1, 51).normalize().is_err());
        assert!(PageRequest::new(0, 10).normalize().is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PageMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn test_page_range() {
        assert!(PageMeta::new(1, 10, 0).check_in_range().is_ok());
        assert!(PageMeta::new(2, 10, 11).check_in_range().is_ok());
        assert!(PageMeta::new(3, 10, 11).check_in_range().is_err());
        assert_eq!(PageMeta::new(3, 5, 20).offset(), 10);
    }
}
