//! HTTP client for the 7TV APIs.

use crate::badges::BadgeResolver;
use crate::gql::GqlRequest;
use crate::models::{Badge, CosmeticsData, GqlResponse, UserConnection};
use crate::{API_BASE, GQL_URL, SevenTvError};

/// Sends catalog queries. Implemented by [`SevenTvClient`]; tests substitute
/// their own.
pub trait CatalogTransport: Send + Sync {
    /// POST a GraphQL request and return the raw response body.
    fn post_gql(
        &self,
        request: &GqlRequest,
    ) -> impl Future<Output = Result<String, SevenTvError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SevenTvClient {
    http: reqwest::Client,
    gql_url: String,
    api_base: String,
}

impl Default for SevenTvClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SevenTvClient {
    pub fn new() -> Self {
        Self::with_endpoints(GQL_URL, API_BASE)
    }

    /// Point the client at other endpoints (self-hosted mirrors, tests).
    pub fn with_endpoints(gql_url: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            gql_url: gql_url.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Identity lookup URL. The id is pushed as one path segment, so it is
    /// percent-encoded rather than interpreted.
    fn user_lookup_url(&self, local_user_id: &str) -> Result<url::Url, SevenTvError> {
        let mut url = url::Url::parse(&self.api_base)?;
        url.path_segments_mut()
            .map_err(|()| SevenTvError::UrlParse(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", "discord", local_user_id]);
        Ok(url)
    }

    /// Send a GET request. A 404 yields `None`.
    async fn get_optional(&self, url: &str) -> Result<Option<String>, SevenTvError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SevenTvError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(Some(body))
    }
}

impl CatalogTransport for SevenTvClient {
    async fn post_gql(&self, request: &GqlRequest) -> Result<String, SevenTvError> {
        let resp = self.http.post(&self.gql_url).json(request).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(SevenTvError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}

impl BadgeResolver for SevenTvClient {
    async fn remote_user_id(&self, local_user_id: &str) -> Result<Option<String>, SevenTvError> {
        let url = self.user_lookup_url(local_user_id)?;

        let Some(body) = self.get_optional(url.as_str()).await? else {
            tracing::debug!(local_user_id, "No 7TV account linked");
            return Ok(None);
        };
        let conn: UserConnection = serde_json::from_str(&body)?;
        Ok(conn.user.map(|u| u.id))
    }

    async fn active_badge(&self, remote_user_id: &str) -> Result<Option<Badge>, SevenTvError> {
        let body = self.post_gql(&GqlRequest::cosmetics(remote_user_id)).await?;
        let resp: GqlResponse<CosmeticsData> = serde_json::from_str(&body)?;
        if let Some(message) = resp.error_message() {
            return Err(SevenTvError::Gql(message.to_string()));
        }

        Ok(resp
            .data
            .and_then(|d| d.user)
            .and_then(|u| u.style)
            .and_then(|s| s.badge))
    }
}
