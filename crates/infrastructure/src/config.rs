use std::env;
use std::time::Duration;

use leaguedesk_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Runtime configuration for hosts talking to the list backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL, e.g. `https://api.leaguedesk.test/v1`.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Quiet period for debounced search inputs.
    pub search_debounce: Duration,
}

impl BackendConfig {
    /// Loads configuration from the environment.
    ///
    /// `LEAGUEDESK_API_BASE_URL` is required; `LEAGUEDESK_HTTP_TIMEOUT_MS`
    /// and `LEAGUEDESK_SEARCH_DEBOUNCE_MS` default to 10000 and 500.
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let base_url = required_env("LEAGUEDESK_API_BASE_URL")?;
        Url::parse(&base_url).map_err(|error| {
            AppError::Validation(format!(
                "invalid LEAGUEDESK_API_BASE_URL '{base_url}': {error}"
            ))
        })?;

        let request_timeout = env_millis("LEAGUEDESK_HTTP_TIMEOUT_MS", 10_000)?;
        let search_debounce = env_millis("LEAGUEDESK_SEARCH_DEBOUNCE_MS", 500)?;

        Ok(Self {
            base_url,
            request_timeout,
            search_debounce,
        })
    }

    /// Builds the shared HTTP client used by the list gateway.
    pub fn http_client(&self) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))
    }
}

/// Installs the process-wide tracing subscriber.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn env_millis(name: &str, default: u64) -> AppResult<Duration> {
    let millis = match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} '{value}': {error}"))
        })?,
        Err(_) => default,
    };

    Ok(Duration::from_millis(millis))
}
