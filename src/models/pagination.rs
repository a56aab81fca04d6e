//! Pagination parameters and listing metadata

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// Sentinel `limit` value meaning "return everything"
pub const NO_LIMIT: i64 = -1;

/// Page/limit query parameters accepted by every listing endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size, or -1 for no limit
    pub limit: Option<i64>,
}

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    /// `None` means no limit
    pub limit: Option<i64>,
}

impl PageWindow {
    /// Validate raw query parameters, falling back to the configured page size
    pub fn from_query(query: &PageQuery, default_limit: i64) -> AppResult<Self> {
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(default_limit);

        if limit == NO_LIMIT {
            return Ok(Self { page: 1, limit: None });
        }
        if page < 1 {
            return Err(AppError::MissingParameters(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if limit < 1 {
            return Err(AppError::MissingParameters(
                "limit must be greater than or equal to 1, or -1 for no limit".to_string(),
            ));
        }

        Ok(Self { page, limit: Some(limit) })
    }

    /// Number of records to skip
    pub fn skip(&self) -> i64 {
        match self.limit {
            Some(limit) => (self.page - 1) * limit,
            None => 0,
        }
    }

    fn total_pages(&self, total_items: i64) -> i64 {
        match self.limit {
            Some(limit) => (total_items + limit - 1) / limit,
            None => i64::from(total_items > 0),
        }
    }
}

/// Page slice plus listing metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total_items: i64, window: &PageWindow) -> Self {
        Self {
            total_pages: window.total_pages(total_items),
            current_page: window.page,
            page_size: window.limit.unwrap_or(total_items),
            items,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, limit: Option<i64>) -> PageQuery {
        PageQuery { page, limit }
    }

    #[test]
    fn test_defaults() {
        let w = PageWindow::from_query(&query(None, None), 20).unwrap();
        assert_eq!(w.page, 1);
        assert_eq!(w.limit, Some(20));
        assert_eq!(w.skip(), 0);
    }

    #[test]
    fn test_skip() {
        let w = PageWindow::from_query(&query(Some(3), Some(10)), 20).unwrap();
        assert_eq!(w.skip(), 20);
    }

    #[test]
    fn test_no_limit_sentinel() {
        let w = PageWindow::from_query(&query(Some(5), Some(NO_LIMIT)), 20).unwrap();
        assert_eq!(w.limit, None);
        assert_eq!(w.page, 1);
        assert_eq!(w.skip(), 0);
    }

    #[test]
    fn test_rejects_zero_page() {
        assert!(PageWindow::from_query(&query(Some(0), Some(10)), 20).is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert!(PageWindow::from_query(&query(Some(1), Some(0)), 20).is_err());
    }

    #[test]
    fn test_total_pages_ceiling() {
        let w = PageWindow::from_query(&query(Some(1), Some(10)), 20).unwrap();
        let p = Paginated::new(vec![0u8; 10], 41, &w);
        assert_eq!(p.total_pages, 5);

        let p = Paginated::new(vec![0u8; 10], 40, &w);
        assert_eq!(p.total_pages, 4);

        let p = Paginated::<u8>::new(vec![], 0, &w);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn test_unlimited_metadata() {
        let w = PageWindow::from_query(&query(None, Some(NO_LIMIT)), 20).unwrap();
        let p = Paginated::new(vec![0u8; 7], 7, &w);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page_size, 7);
    }
}
