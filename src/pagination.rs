use serde::{Deserialize, Serialize};

/// Rows-per-page used when no other value is configured.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;

/// A single sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub name: String,
    #[serde(default)]
    pub descend: bool,
}

impl SortBy {
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descend: false,
        }
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descend: true,
        }
    }
}

/// Pagination state owned by the searcher.
///
/// `page` is 1-based; `page` and `rows_per_page` stay positive. `rows_number`
/// is authoritative only after at least one successful paginated search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearcherPagination {
    pub sort_by: Vec<SortBy>,
    pub page: u32,
    pub rows_per_page: u32,
    pub rows_number: u64,
}

impl SearcherPagination {
    pub fn new(rows_per_page: u32) -> Self {
        Self {
            sort_by: Vec::new(),
            page: 1,
            rows_per_page,
            rows_number: 0,
        }
    }

    /// Apply a partial update in place; each `Some` field replaces the
    /// corresponding current value.
    pub fn overlay(&mut self, update: &PaginationUpdate) {
        if let Some(sort_by) = &update.sort_by {
            self.sort_by = sort_by.clone();
        }
        if let Some(page) = update.page {
            self.page = page;
        }
        if let Some(rows_per_page) = update.rows_per_page {
            self.rows_per_page = rows_per_page;
        }
        if let Some(rows_number) = update.rows_number {
            self.rows_number = rows_number;
        }
    }

    /// A copy with an optional partial update applied on top.
    pub fn overlaid(&self, update: Option<&PaginationUpdate>) -> Self {
        let mut merged = self.clone();
        if let Some(update) = update {
            merged.overlay(update);
        }
        merged
    }
}

impl Default for SearcherPagination {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

/// Partial pagination override; absent fields leave the current state alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationUpdate {
    pub sort_by: Option<Vec<SortBy>>,
    pub page: Option<u32>,
    pub rows_per_page: Option<u32>,
    pub rows_number: Option<u64>,
}

impl PaginationUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, sort_by: Vec<SortBy>) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn rows_per_page(mut self, rows_per_page: u32) -> Self {
        self.rows_per_page = Some(rows_per_page);
        self
    }

    pub fn rows_number(mut self, rows_number: u64) -> Self {
        self.rows_number = Some(rows_number);
        self
    }

    /// The reset transition: back to page 1 with the row count cleared,
    /// caller-supplied fields taking precedence. Sort order and page size are
    /// untouched unless the overrides name them.
    pub(crate) fn reset(overrides: Option<PaginationUpdate>) -> Self {
        let overrides = overrides.unwrap_or_default();
        Self {
            sort_by: overrides.sort_by,
            page: overrides.page.or(Some(1)),
            rows_per_page: overrides.rows_per_page,
            rows_number: overrides.rows_number.or(Some(0)),
        }
    }
}
