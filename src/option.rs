use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::filter::FilterField;
use crate::pagination::{PaginationUpdate, SearcherPagination};

/// Result-shaping function applied to the raw result rows exactly once per
/// search, before they are handed back to the caller. Defaults to identity.
pub type CastFunc<T> = Arc<dyn Fn(Vec<T>) -> Vec<T> + Send + Sync>;

/// Per-call search specification.
///
/// Every field is optional at the call site; absent fields fall back to the
/// searcher's baseline when the option is resolved. An empty map counts as
/// absent for the map-valued fields.
pub struct SearchOption<T> {
    /// Target listing endpoint.
    pub list_url: Option<String>,
    /// Filter conditions keyed by field name; values stay opaque.
    pub filter: HashMap<String, FilterField>,
    /// Transport-specific settings, opaque to the searcher.
    pub config: HashMap<String, serde_json::Value>,
    /// Extra query parameters appended to the request.
    pub extra_query: HashMap<String, serde_json::Value>,
    /// Extra payload data for transports that send a body.
    pub extra_data: HashMap<String, serde_json::Value>,
    /// Partial pagination override for this call.
    pub pagination: Option<PaginationUpdate>,
    /// Result-shaping function for this call.
    pub cast_func: Option<CastFunc<T>>,
}

impl<T> SearchOption<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_url(mut self, url: impl Into<String>) -> Self {
        self.list_url = Some(url.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, condition: impl Into<FilterField>) -> Self {
        self.filter.insert(field.into(), condition.into());
        self
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn extra_query(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra_query.insert(key.into(), value.into());
        self
    }

    pub fn extra_data(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }

    pub fn pagination(mut self, update: PaginationUpdate) -> Self {
        self.pagination = Some(update);
        self
    }

    pub fn cast(mut self, f: impl Fn(Vec<T>) -> Vec<T> + Send + Sync + 'static) -> Self {
        self.cast_func = Some(Arc::new(f));
        self
    }

    /// Field-level overlay used by `configure`: fields present on `other`
    /// replace this option's fields wholesale (no key-wise merging here; that
    /// is the resolver's job).
    pub(crate) fn overlay(&mut self, other: SearchOption<T>) {
        if other.list_url.is_some() {
            self.list_url = other.list_url;
        }
        if !other.filter.is_empty() {
            self.filter = other.filter;
        }
        if !other.config.is_empty() {
            self.config = other.config;
        }
        if !other.extra_query.is_empty() {
            self.extra_query = other.extra_query;
        }
        if !other.extra_data.is_empty() {
            self.extra_data = other.extra_data;
        }
        if other.pagination.is_some() {
            self.pagination = other.pagination;
        }
        if other.cast_func.is_some() {
            self.cast_func = other.cast_func;
        }
    }

    /// Merge this per-call option against a baseline and the current
    /// pagination state into a fully resolved option.
    ///
    /// Field rules:
    /// - `filter`, `config`, `extra_query`, `extra_data`: key-wise shallow
    ///   merge, per-call entries win on collision;
    /// - `pagination`: current state overlaid by the per-call update;
    /// - `list_url`: per-call if non-empty, else baseline, else `""`;
    /// - `cast_func`: per-call, else baseline, else identity.
    ///
    /// Every field has a deterministic fallback, so resolution never fails
    /// and mutates neither input.
    pub fn resolve(
        self,
        baseline: &SearchOption<T>,
        pagination: &SearcherPagination,
    ) -> ResolvedSearchOption<T> {
        let mut filter = baseline.filter.clone();
        filter.extend(self.filter);

        let mut config = baseline.config.clone();
        config.extend(self.config);

        let mut extra_query = baseline.extra_query.clone();
        extra_query.extend(self.extra_query);

        let mut extra_data = baseline.extra_data.clone();
        extra_data.extend(self.extra_data);

        let list_url = match self.list_url {
            Some(url) if !url.is_empty() => url,
            _ => baseline.list_url.clone().unwrap_or_default(),
        };

        let cast_func = self
            .cast_func
            .or_else(|| baseline.cast_func.clone())
            .unwrap_or_else(|| Arc::new(|rows| rows));

        ResolvedSearchOption {
            list_url,
            filter,
            config,
            extra_query,
            extra_data,
            pagination: pagination.overlaid(self.pagination.as_ref()),
            cast_func,
        }
    }
}

impl<T> Default for SearchOption<T> {
    fn default() -> Self {
        Self {
            list_url: None,
            filter: HashMap::new(),
            config: HashMap::new(),
            extra_query: HashMap::new(),
            extra_data: HashMap::new(),
            pagination: None,
            cast_func: None,
        }
    }
}

impl<T> Clone for SearchOption<T> {
    fn clone(&self) -> Self {
        Self {
            list_url: self.list_url.clone(),
            filter: self.filter.clone(),
            config: self.config.clone(),
            extra_query: self.extra_query.clone(),
            extra_data: self.extra_data.clone(),
            pagination: self.pagination.clone(),
            cast_func: self.cast_func.clone(),
        }
    }
}

impl<T> fmt::Debug for SearchOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOption")
            .field("list_url", &self.list_url)
            .field("filter", &self.filter)
            .field("config", &self.config)
            .field("extra_query", &self.extra_query)
            .field("extra_data", &self.extra_data)
            .field("pagination", &self.pagination)
            .field("cast_func", &self.cast_func.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Fully resolved option handed to the executor; every field is concrete.
pub struct ResolvedSearchOption<T> {
    pub list_url: String,
    pub filter: HashMap<String, FilterField>,
    pub config: HashMap<String, serde_json::Value>,
    pub extra_query: HashMap<String, serde_json::Value>,
    pub extra_data: HashMap<String, serde_json::Value>,
    pub pagination: SearcherPagination,
    pub cast_func: CastFunc<T>,
}

impl<T> Clone for ResolvedSearchOption<T> {
    fn clone(&self) -> Self {
        Self {
            list_url: self.list_url.clone(),
            filter: self.filter.clone(),
            config: self.config.clone(),
            extra_query: self.extra_query.clone(),
            extra_data: self.extra_data.clone(),
            pagination: self.pagination.clone(),
            cast_func: self.cast_func.clone(),
        }
    }
}

impl<T> fmt::Debug for ResolvedSearchOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSearchOption")
            .field("list_url", &self.list_url)
            .field("filter", &self.filter)
            .field("config", &self.config)
            .field("extra_query", &self.extra_query)
            .field("extra_data", &self.extra_data)
            .field("pagination", &self.pagination)
            .finish()
    }
}
