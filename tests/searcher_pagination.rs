//! Pagination state transitions: reset, the post-search update, and the
//! guarantee that plain searches and failures leave state untouched.

mod common;

use common::{searcher_with, MockExecutor, NullTransport};
use djolar_searcher::{
    PaginationUpdate, SearchError, SearchOption, SearcherConfig, SortBy,
};
use serde_json::json;

#[test]
fn test_reset_pagination_defaults() {
    let searcher = searcher_with(MockExecutor::returning(0, Vec::new()));
    searcher.configure(
        SearcherConfig::new().pagination(
            PaginationUpdate::new()
                .sort_by(vec![SortBy::desc("created_at")])
                .page(5)
                .rows_per_page(50)
                .rows_number(200),
        ),
    );

    searcher.reset_pagination(None);

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.rows_number, 0);
    assert_eq!(pagination.rows_per_page, 50);
    assert_eq!(pagination.sort_by, vec![SortBy::desc("created_at")]);
}

#[test]
fn test_reset_pagination_with_overrides() {
    let searcher = searcher_with(MockExecutor::returning(0, Vec::new()));
    searcher.reset_pagination(Some(PaginationUpdate::new().rows_per_page(100).page(2)));

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.rows_number, 0);
    assert_eq!(pagination.rows_per_page, 100);
}

#[tokio::test]
async fn test_positive_count_updates_rows_number() {
    let searcher = searcher_with(MockExecutor::returning(37, vec![json!({"id": 1})]));

    let resolves = searcher
        .search_with_pagination(&NullTransport, SearchOption::new())
        .await
        .unwrap();

    assert_eq!(resolves.response.count, 37);

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.rows_per_page, 10);
    assert_eq!(pagination.rows_number, 37);
    assert!(pagination.sort_by.is_empty());
}

#[tokio::test]
async fn test_zero_count_leaves_rows_number_at_merged_value() {
    let searcher = searcher_with(MockExecutor::returning(37, Vec::new()));
    searcher
        .search_with_pagination(&NullTransport, SearchOption::new())
        .await
        .unwrap();
    assert_eq!(searcher.pagination().rows_number, 37);

    searcher.configure(SearcherConfig::new().executor(MockExecutor::returning(0, Vec::new())));
    searcher
        .search_with_pagination(&NullTransport, SearchOption::new())
        .await
        .unwrap();

    // Zero-count responses do not force the row count down.
    assert_eq!(searcher.pagination().rows_number, 37);
}

#[tokio::test]
async fn test_per_call_override_is_persisted_on_success() {
    let searcher = searcher_with(MockExecutor::returning(50, Vec::new()));

    searcher
        .search_with_pagination(
            &NullTransport,
            SearchOption::new().pagination(PaginationUpdate::new().page(2)),
        )
        .await
        .unwrap();

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.rows_number, 50);
}

#[tokio::test]
async fn test_search_only_never_mutates_pagination() {
    let searcher = searcher_with(MockExecutor::returning(99, Vec::new()));

    searcher
        .search_only(
            &NullTransport,
            SearchOption::new().pagination(PaginationUpdate::new().page(4)),
        )
        .await
        .unwrap();

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.rows_number, 0);
}

#[tokio::test]
async fn test_failure_leaves_all_state_untouched() {
    let searcher = searcher_with(MockExecutor::failing());
    searcher.configure(
        SearcherConfig::new()
            .baseline(SearchOption::new().list_url("/api/users"))
            .pagination(PaginationUpdate::new().page(3).rows_number(80)),
    );

    let err = searcher
        .search_with_pagination(
            &NullTransport,
            SearchOption::new().pagination(PaginationUpdate::new().page(7)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Api { status: 500, .. }));

    let pagination = searcher.pagination();
    assert_eq!(pagination.page, 3);
    assert_eq!(pagination.rows_number, 80);
    assert_eq!(searcher.baseline().list_url.as_deref(), Some("/api/users"));
}

#[tokio::test]
async fn test_executor_sees_merged_pagination() {
    let executor = MockExecutor::returning(10, Vec::new());
    let searcher = searcher_with(executor.clone());
    searcher.configure(
        SearcherConfig::new().pagination(PaginationUpdate::new().rows_per_page(25)),
    );

    searcher
        .search_only(
            &NullTransport,
            SearchOption::new().pagination(PaginationUpdate::new().page(3)),
        )
        .await
        .unwrap();

    let seen = executor.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].pagination.page, 3);
    assert_eq!(seen[0].pagination.rows_per_page, 25);
}
