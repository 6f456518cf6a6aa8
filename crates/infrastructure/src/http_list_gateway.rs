use async_trait::async_trait;
use leaguedesk_application::{ListGateway, PageEnvelope};
use leaguedesk_core::{AppError, AppResult};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Error payload returned by the backend on non-success responses.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
}

/// Reqwest-backed implementation of the list gateway.
///
/// Serialized filter pairs are sent as-is, so repeated keys reach the
/// backend as repeated query parameters.
pub struct HttpListGateway {
    client: Client,
    base_url: String,
}

impl HttpListGateway {
    /// Creates a gateway over a shared HTTP client and backend base URL.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_matches('/'))
    }

    async fn error_from_response(endpoint: &str, response: Response) -> AppError {
        let status = response.status();
        let message = response
            .json::<BackendErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Transport(format!("request to '{endpoint}' failed: {message}")),
        }
    }
}

#[async_trait]
impl<T> ListGateway<T> for HttpListGateway
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(
        &self,
        resource: &str,
        query: &[(String, String)],
    ) -> AppResult<PageEnvelope<T>> {
        let endpoint = self.endpoint(resource);
        debug!(endpoint = %endpoint, pairs = query.len(), "issuing list request");

        let response = self
            .client
            .get(&endpoint)
            .query(query)
            .send()
            .await
            .map_err(|error| {
                AppError::Transport(format!("failed calling list endpoint '{endpoint}': {error}"))
            })?;

        if !response.status().is_success() {
            let error = Self::error_from_response(&endpoint, response).await;
            warn!(endpoint = %endpoint, error = %error, "list request failed");
            return Err(error);
        }

        response.json::<PageEnvelope<T>>().await.map_err(|error| {
            AppError::Transport(format!("invalid list envelope from '{endpoint}': {error}"))
        })
    }

    async fn delete_row(&self, resource: &str, id: &str) -> AppResult<()> {
        let endpoint = format!("{}/{id}", self.endpoint(resource));

        let response = self.client.delete(&endpoint).send().await.map_err(|error| {
            AppError::Transport(format!("failed calling delete endpoint '{endpoint}': {error}"))
        })?;

        if !response.status().is_success() {
            let error = Self::error_from_response(&endpoint, response).await;
            warn!(endpoint = %endpoint, error = %error, "delete request failed");
            return Err(error);
        }

        Ok(())
    }
}
