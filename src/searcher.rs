use std::fmt;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::SearchError;
use crate::executor::{SearchExecutor, WebSearchExecutor};
use crate::option::{ResolvedSearchOption, SearchOption};
use crate::pagination::{PaginationUpdate, SearcherPagination};

/// Parsed body of a listing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct SearcherResponse<T> {
    #[serde(default)]
    pub result: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> Default for SearcherResponse<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            count: 0,
            msg: None,
        }
    }
}

/// Result bundle of a completed search; owned by the caller afterwards.
#[derive(Debug, Clone)]
pub struct SearcherResolves<T> {
    pub response: SearcherResponse<T>,
    /// Raw transport body, untouched. `None` when the executor drops it.
    pub raw: Option<serde_json::Value>,
}

/// Callback fired by a conforming executor after a successful search.
pub type SuccessHook<T, C> =
    Arc<dyn Fn(&SearcherResolves<T>, &DjolarSearcher<T, C>) + Send + Sync>;

/// Callback fired by a conforming executor before a failure is propagated.
pub type FailHook<T, C> = Arc<dyn Fn(&SearchError, &DjolarSearcher<T, C>) + Send + Sync>;

/// A callback registered with [`DjolarSearcher::add_hook`].
pub enum Hook<T, C> {
    Success(SuccessHook<T, C>),
    Fail(FailHook<T, C>),
}

impl<T, C> Hook<T, C> {
    pub fn on_success(
        f: impl Fn(&SearcherResolves<T>, &DjolarSearcher<T, C>) + Send + Sync + 'static,
    ) -> Self {
        Self::Success(Arc::new(f))
    }

    pub fn on_fail(
        f: impl Fn(&SearchError, &DjolarSearcher<T, C>) + Send + Sync + 'static,
    ) -> Self {
        Self::Fail(Arc::new(f))
    }
}

/// Initial or incremental searcher configuration, applied by
/// [`DjolarSearcher::configure`].
pub struct SearcherConfig<T, C> {
    pub pagination: Option<PaginationUpdate>,
    pub baseline: Option<SearchOption<T>>,
    pub executor: Option<Arc<dyn SearchExecutor<T, C>>>,
}

impl<T, C> SearcherConfig<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pagination(mut self, update: PaginationUpdate) -> Self {
        self.pagination = Some(update);
        self
    }

    pub fn baseline(mut self, baseline: SearchOption<T>) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn SearchExecutor<T, C>>) -> Self {
        self.executor = Some(executor);
        self
    }
}

impl<T, C> Default for SearcherConfig<T, C> {
    fn default() -> Self {
        Self {
            pagination: None,
            baseline: None,
            executor: None,
        }
    }
}

struct Hooks<T, C> {
    on_success: Vec<SuccessHook<T, C>>,
    on_fail: Vec<FailHook<T, C>>,
}

impl<T, C> Default for Hooks<T, C> {
    fn default() -> Self {
        Self {
            on_success: Vec::new(),
            on_fail: Vec::new(),
        }
    }
}

/// Stateful orchestrator for paginated, filterable listing searches.
///
/// Owns the pagination state, the baseline [`SearchOption`] that supplies
/// per-call defaults, the active [`SearchExecutor`], and the success/failure
/// hook registries. `T` is the row type, `C` the transport handle passed to
/// the executor (a [`reqwest::Client`] for the default web executor).
///
/// All configuration methods take `&self` and return `&Self`, so a shared
/// (`Arc`) searcher supports the chained configuration style. Concurrently
/// issued searches each read the state present at their own invocation time;
/// whichever resolves last performs the final pagination write. Callers that
/// need strict ordering must sequence their calls.
pub struct DjolarSearcher<T, C = reqwest::Client> {
    pagination: RwLock<SearcherPagination>,
    baseline: RwLock<SearchOption<T>>,
    executor: RwLock<Arc<dyn SearchExecutor<T, C>>>,
    hooks: RwLock<Hooks<T, C>>,
}

impl<T, C> DjolarSearcher<T, C> {
    /// Create a searcher driven by the given executor.
    pub fn with_executor(executor: Arc<dyn SearchExecutor<T, C>>) -> Self {
        Self {
            pagination: RwLock::new(SearcherPagination::default()),
            baseline: RwLock::new(SearchOption::default()),
            executor: RwLock::new(executor),
            hooks: RwLock::new(Hooks::default()),
        }
    }

    /// Apply a partial configuration: pagination fields overlay the current
    /// state, baseline fields replace their counterparts wholesale, and the
    /// executor is swapped when one is supplied. A no-op for an empty config.
    pub fn configure(&self, config: SearcherConfig<T, C>) -> &Self {
        if let Some(update) = config.pagination {
            self.pagination.write().unwrap().overlay(&update);
        }
        if let Some(baseline) = config.baseline {
            self.baseline.write().unwrap().overlay(baseline);
        }
        if let Some(executor) = config.executor {
            *self.executor.write().unwrap() = executor;
        }
        self
    }

    /// Start a fresh query context: page back to 1 and the row count cleared,
    /// with any caller-supplied fields applied on top.
    pub fn reset_pagination(&self, overrides: Option<PaginationUpdate>) -> &Self {
        self.configure(SearcherConfig::new().pagination(PaginationUpdate::reset(overrides)))
    }

    /// Invoke an adapter callback with this searcher, letting it bundle
    /// cross-cutting `configure`/`add_hook` calls.
    pub fn install_adapter(&self, adapter: impl FnOnce(&Self)) -> &Self {
        adapter(self);
        self
    }

    /// Append a hook to its registry. Registries are append-only and preserve
    /// registration order; a conforming executor fires them in that order.
    pub fn add_hook(&self, hook: Hook<T, C>) -> &Self {
        let mut hooks = self.hooks.write().unwrap();
        match hook {
            Hook::Success(hook) => hooks.on_success.push(hook),
            Hook::Fail(hook) => hooks.on_fail.push(hook),
        }
        self
    }

    /// Snapshot of the current pagination state.
    pub fn pagination(&self) -> SearcherPagination {
        self.pagination.read().unwrap().clone()
    }

    /// Snapshot of the current baseline option.
    pub fn baseline(&self) -> SearchOption<T> {
        self.baseline.read().unwrap().clone()
    }

    /// Merge a per-call option against the baseline and current pagination.
    pub fn resolve_option(&self, option: SearchOption<T>) -> ResolvedSearchOption<T> {
        let baseline = self.baseline.read().unwrap();
        let pagination = self.pagination.read().unwrap();
        option.resolve(&baseline, &pagination)
    }

    /// Invoke every registered success hook in registration order.
    ///
    /// Part of the executor calling convention; the search path itself never
    /// calls this.
    pub fn notify_success(&self, resolves: &SearcherResolves<T>) {
        let hooks: Vec<SuccessHook<T, C>> = self.hooks.read().unwrap().on_success.clone();
        for hook in hooks {
            hook(resolves, self);
        }
    }

    /// Invoke every registered failure hook in registration order.
    pub fn notify_fail(&self, err: &SearchError) {
        let hooks: Vec<FailHook<T, C>> = self.hooks.read().unwrap().on_fail.clone();
        for hook in hooks {
            hook(err, self);
        }
    }

    /// Resolve the option and delegate to the active executor without
    /// touching persisted pagination. Executor failures propagate unchanged.
    pub async fn search_only(
        &self,
        transport: &C,
        option: SearchOption<T>,
    ) -> Result<SearcherResolves<T>, SearchError> {
        let resolved = self.resolve_option(option);

        tracing::debug!(
            list_url = %resolved.list_url,
            page = resolved.pagination.page,
            rows_per_page = resolved.pagination.rows_per_page,
            filter_count = resolved.filter.len(),
            "dispatching search"
        );

        let executor = self.executor.read().unwrap().clone();
        executor.execute(self, transport, resolved).await
    }

    /// [`search_only`](Self::search_only), plus the post-search pagination
    /// update on success: the per-call pagination override is merged into the
    /// persisted state, and a strictly positive `response.count` becomes the
    /// new `rows_number`. A failed search leaves all state untouched.
    pub async fn search_with_pagination(
        &self,
        transport: &C,
        option: SearchOption<T>,
    ) -> Result<SearcherResolves<T>, SearchError> {
        let overrides = option.pagination.clone();
        let resolves = self.search_only(transport, option).await?;

        {
            let mut pagination = self.pagination.write().unwrap();
            if let Some(overrides) = &overrides {
                pagination.overlay(overrides);
            }
            if resolves.response.count > 0 {
                pagination.rows_number = resolves.response.count;
            }

            tracing::debug!(
                page = pagination.page,
                rows_number = pagination.rows_number,
                "pagination updated after search"
            );
        }

        Ok(resolves)
    }
}

impl<T> DjolarSearcher<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a searcher with default pagination, an empty baseline, and the
    /// default [`WebSearchExecutor`].
    pub fn new() -> Self {
        Self::with_executor(Arc::new(WebSearchExecutor::new()))
    }

    /// [`new`](Self::new), then apply an initial configuration.
    pub fn with_config(config: SearcherConfig<T, reqwest::Client>) -> Self {
        let searcher = Self::new();
        searcher.configure(config);
        searcher
    }
}

impl<T> Default for DjolarSearcher<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for DjolarSearcher<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self.hooks.read().unwrap();
        f.debug_struct("DjolarSearcher")
            .field("pagination", &*self.pagination.read().unwrap())
            .field("baseline", &*self.baseline.read().unwrap())
            .field("success_hooks", &hooks.on_success.len())
            .field("fail_hooks", &hooks.on_fail.len())
            .finish()
    }
}
