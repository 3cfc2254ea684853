//! Pluggable search execution.
//!
//! The searcher delegates every network call to a [`SearchExecutor`]. The
//! default is [`WebSearchExecutor`], speaking the djolar wire format over
//! HTTP; applications swap in their own executor via
//! [`SearcherConfig::executor`](crate::SearcherConfig::executor).

mod web;

pub use web::WebSearchExecutor;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::option::ResolvedSearchOption;
use crate::searcher::{DjolarSearcher, SearcherResolves};

/// Search execution capability - the transport behind every search.
///
/// A conforming implementation must:
/// - apply `option.cast_func` to the raw result rows exactly once before
///   placing them into `response.result`;
/// - call [`DjolarSearcher::notify_success`] with the resolves after a
///   successful search (hooks fire in registration order);
/// - call [`DjolarSearcher::notify_fail`] with the error, then return the
///   error unchanged, when the transport fails.
///
/// The searcher never fires hooks itself, so skipping these calls silences
/// every registered hook. Cancellation and timeouts also live here: surface
/// them as ordinary [`SearchError`]s.
#[async_trait]
pub trait SearchExecutor<T, C>: Send + Sync {
    async fn execute(
        &self,
        searcher: &DjolarSearcher<T, C>,
        transport: &C,
        option: ResolvedSearchOption<T>,
    ) -> Result<SearcherResolves<T>, SearchError>;
}
