//! Supabase REST (PostgREST) implementation of [`TableStore`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::{Row, StoreResult, TableStore};
use crate::error::ExternalServiceError;

const SERVICE: &str = "supabase";

/// Connection settings for [`SupabaseRestClient`].
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    /// Project URL (e.g. `https://xyz.supabase.co`).
    pub project_url: String,
    /// API key, sent as `apikey` and as a bearer token.
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// [`TableStore`] over `{project_url}/rest/v1/{table}`.
#[derive(Debug, Clone)]
pub struct SupabaseRestClient {
    http: reqwest::Client,
    rest_url: Url,
}

impl SupabaseRestClient {
    /// Builds a client from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalServiceError::Decode`] for an invalid URL or API
    /// key and [`ExternalServiceError::Transport`] if the HTTP client
    /// cannot be built.
    pub fn new(settings: SupabaseSettings) -> Result<Self, ExternalServiceError> {
        let base = settings.project_url.trim_end_matches('/');
        let rest_url =
            Url::parse(&format!("{base}/rest/v1/")).map_err(|e| ExternalServiceError::Decode {
                service: SERVICE,
                reason: format!("invalid project url {}: {e}", settings.project_url),
            })?;

        let invalid_key = |_| ExternalServiceError::Decode {
            service: SERVICE,
            reason: "api key is not a valid header value".to_string(),
        };
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&settings.api_key).map_err(invalid_key)?;
        key.set_sensitive(true);
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", settings.api_key)).map_err(invalid_key)?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;

        Ok(Self { http, rest_url })
    }

    fn table_url(&self, table: &str) -> StoreResult<Url> {
        self.rest_url
            .join(table)
            .map_err(|e| ExternalServiceError::Decode {
                service: SERVICE,
                reason: format!("invalid table name {table}: {e}"),
            })
    }

    async fn rows(response: reqwest::Response) -> StoreResult<Vec<Row>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;
        if !status.is_success() {
            return Err(ExternalServiceError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| ExternalServiceError::Decode {
            service: SERVICE,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl TableStore for SupabaseRestClient {
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Vec<Row>> {
        let url = self.table_url(table)?;
        tracing::debug!(table, "supabase insert");
        let response = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;
        Self::rows(response).await
    }

    async fn select_where_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> StoreResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair(column, &format!("eq.{value}"));
        tracing::debug!(table, column, "supabase select");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;
        Self::rows(response).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn client(project_url: &str) -> SupabaseRestClient {
        let Ok(client) = SupabaseRestClient::new(SupabaseSettings {
            project_url: project_url.to_string(),
            api_key: "anon".to_string(),
            timeout: Duration::from_secs(5),
        }) else {
            panic!("client should build");
        };
        client
    }

    #[test]
    fn table_url_tolerates_trailing_slash() {
        for base in ["https://demo.supabase.co", "https://demo.supabase.co/"] {
            let Ok(url) = client(base).table_url("user_episodes") else {
                panic!("url should join");
            };
            assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/user_episodes");
        }
    }

    #[test]
    fn rejects_invalid_project_url() {
        let result = SupabaseRestClient::new(SupabaseSettings {
            project_url: "::".to_string(),
            api_key: "anon".to_string(),
            timeout: Duration::from_secs(5),
        });
        assert!(result.is_err());
    }
}
