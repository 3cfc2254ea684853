//! Shared fixtures for searcher integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use djolar_searcher::{
    DjolarSearcher, ResolvedSearchOption, SearchError, SearchExecutor, SearcherResolves,
    SearcherResponse,
};
use serde_json::Value;

/// Transport stand-in; the mock executor never touches the network.
#[derive(Debug, Default, Clone)]
pub struct NullTransport;

/// Scripted executor: returns canned rows and a canned count (or a canned
/// failure), records every resolved option it receives, and honors the hook
/// calling convention.
pub struct MockExecutor {
    count: u64,
    rows: Vec<Value>,
    fail: bool,
    pub seen: Mutex<Vec<ResolvedSearchOption<Value>>>,
}

impl MockExecutor {
    pub fn returning(count: u64, rows: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            count,
            rows,
            fail: false,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            count: 0,
            rows: Vec::new(),
            fail: true,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SearchExecutor<Value, NullTransport> for MockExecutor {
    async fn execute(
        &self,
        searcher: &DjolarSearcher<Value, NullTransport>,
        _transport: &NullTransport,
        option: ResolvedSearchOption<Value>,
    ) -> Result<SearcherResolves<Value>, SearchError> {
        self.seen.lock().unwrap().push(option.clone());

        if self.fail {
            let err = SearchError::Api {
                status: 500,
                body: "mock failure".to_string(),
            };
            searcher.notify_fail(&err);
            return Err(err);
        }

        let resolves = SearcherResolves {
            response: SearcherResponse {
                result: (option.cast_func)(self.rows.clone()),
                count: self.count,
                msg: None,
            },
            raw: None,
        };
        searcher.notify_success(&resolves);
        Ok(resolves)
    }
}

/// A searcher driven by the given mock executor.
pub fn searcher_with(executor: Arc<MockExecutor>) -> DjolarSearcher<Value, NullTransport> {
    DjolarSearcher::with_executor(executor)
}
