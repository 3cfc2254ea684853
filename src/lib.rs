//! Paginated, filterable search client for djolar-style listing endpoints.
//!
//! [`DjolarSearcher`] composes per-call [`SearchOption`]s with a persistent
//! baseline, tracks pagination state across calls, and delegates the network
//! call to a pluggable [`SearchExecutor`] ([`WebSearchExecutor`] over
//! `reqwest` by default). Success and failure hooks are registered on the
//! searcher and fired by the executor.
//!
//! ```no_run
//! use djolar_searcher::{DjolarSearcher, SearchError, SearchOption, SearcherConfig};
//! use serde_json::Value;
//!
//! async fn list_active_users(client: &reqwest::Client) -> Result<(), SearchError> {
//!     let searcher = DjolarSearcher::<Value>::new();
//!     searcher.configure(
//!         SearcherConfig::new()
//!             .baseline(SearchOption::new().list_url("https://example.com/api/users")),
//!     );
//!
//!     let resolves = searcher
//!         .search_with_pagination(
//!             client,
//!             SearchOption::new().filter("status", "status__eq__active"),
//!         )
//!         .await?;
//!
//!     println!("{} matching rows", resolves.response.count);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod executor;
pub mod filter;
pub mod option;
pub mod pagination;
pub mod searcher;

pub use error::SearchError;
pub use executor::{SearchExecutor, WebSearchExecutor};
pub use filter::FilterField;
pub use option::{CastFunc, ResolvedSearchOption, SearchOption};
pub use pagination::{PaginationUpdate, SearcherPagination, SortBy, DEFAULT_ROWS_PER_PAGE};
pub use searcher::{
    DjolarSearcher, FailHook, Hook, SearcherConfig, SearcherResolves, SearcherResponse,
    SuccessHook,
};
