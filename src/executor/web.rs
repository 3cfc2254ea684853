use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::SearchError;
use crate::filter::FilterField;
use crate::option::ResolvedSearchOption;
use crate::pagination::SearcherPagination;
use crate::searcher::{DjolarSearcher, SearcherResolves, SearcherResponse};

use super::SearchExecutor;

/// Default executor speaking the djolar wire format over HTTP GET.
///
/// Query parameters: `q` (encoded filter conditions joined with `|`), `s`
/// (sort spec, `-` prefix for descending), `p` (page), `l` (rows per page),
/// plus every `extra_query` entry. Empty `q`/`s` are omitted. The response
/// body is expected to be a JSON object shaped like [`SearcherResponse`].
///
/// The only `config` key this executor understands is `"headers"`, an object
/// of header name to string value; everything else is ignored.
#[derive(Debug, Clone, Default)]
pub struct WebSearchExecutor;

impl WebSearchExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Join the encoded conditions with `|`, ordered by field name so the
    /// wire form is deterministic.
    fn encode_filter(filter: &HashMap<String, FilterField>) -> String {
        let ordered: BTreeMap<&String, &FilterField> = filter.iter().collect();
        ordered
            .values()
            .map(|field| field.encoded())
            .collect::<Vec<_>>()
            .join("|")
    }

    fn encode_sort(pagination: &SearcherPagination) -> String {
        pagination
            .sort_by
            .iter()
            .map(|sort| {
                if sort.descend {
                    format!("-{}", sort.name)
                } else {
                    sort.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Scalar JSON values are rendered bare, everything else as compact JSON.
    fn render_query_value(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn build_query<T>(option: &ResolvedSearchOption<T>) -> Vec<(String, String)> {
        let mut query = Vec::new();

        let q = Self::encode_filter(&option.filter);
        if !q.is_empty() {
            query.push(("q".to_string(), q));
        }

        let s = Self::encode_sort(&option.pagination);
        if !s.is_empty() {
            query.push(("s".to_string(), s));
        }

        query.push(("p".to_string(), option.pagination.page.to_string()));
        query.push(("l".to_string(), option.pagination.rows_per_page.to_string()));

        let extra: BTreeMap<&String, &serde_json::Value> = option.extra_query.iter().collect();
        for (key, value) in extra {
            query.push((key.clone(), Self::render_query_value(value)));
        }

        query
    }

    async fn perform<T>(
        &self,
        transport: &Client,
        option: &ResolvedSearchOption<T>,
    ) -> Result<SearcherResolves<T>, SearchError>
    where
        T: DeserializeOwned,
    {
        let query = Self::build_query(option);

        tracing::debug!(
            list_url = %option.list_url,
            page = option.pagination.page,
            rows_per_page = option.pagination.rows_per_page,
            filter_count = option.filter.len(),
            "performing djolar search"
        );

        let mut request = transport.get(&option.list_url).query(&query);
        if let Some(headers) = option.config.get("headers").and_then(|v| v.as_object()) {
            for (name, value) in headers {
                if let Some(value) = value.as_str() {
                    request = request.header(name.as_str(), value);
                }
            }
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            tracing::warn!(
                status = %status,
                body = %body,
                "djolar endpoint returned error"
            );

            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value = response.json().await?;
        let mut parsed: SearcherResponse<T> = serde_json::from_value(raw.clone())?;
        parsed.result = (option.cast_func)(parsed.result);

        tracing::debug!(
            count = parsed.count,
            rows = parsed.result.len(),
            "djolar search completed"
        );

        Ok(SearcherResolves {
            response: parsed,
            raw: Some(raw),
        })
    }
}

#[async_trait]
impl<T> SearchExecutor<T, Client> for WebSearchExecutor
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn execute(
        &self,
        searcher: &DjolarSearcher<T, Client>,
        transport: &Client,
        option: ResolvedSearchOption<T>,
    ) -> Result<SearcherResolves<T>, SearchError> {
        match self.perform(transport, &option).await {
            Ok(resolves) => {
                searcher.notify_success(&resolves);
                Ok(resolves)
            }
            Err(err) => {
                searcher.notify_fail(&err);
                Err(err)
            }
        }
    }
}
