use async_trait::async_trait;
use leaguedesk_core::AppResult;
use serde::{Deserialize, Serialize};

/// One page of list rows with the backend's pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Rows for the requested page.
    pub data: Vec<T>,
    /// Total matching rows across all pages.
    pub total_items: u64,
    /// Total pages at the requested page size.
    pub total_pages: u32,
    /// Page the backend actually served.
    pub current_page: u32,
    /// Page size the backend applied.
    pub page_size: u32,
}

/// Port for paginated list reads and row deletion against a list resource.
#[async_trait]
pub trait ListGateway<T>: Send + Sync {
    /// Fetches one page of `resource` rows for the serialized filter pairs.
    async fn fetch_page(
        &self,
        resource: &str,
        query: &[(String, String)],
    ) -> AppResult<PageEnvelope<T>>;

    /// Deletes one row of `resource` by identifier.
    async fn delete_row(&self, resource: &str, id: &str) -> AppResult<()>;
}

/// Port for explicit user confirmation ahead of destructive actions.
///
/// Replaces blocking native dialogs with a capability the controller awaits,
/// so the delete flow is testable without simulating one.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Asks the user to confirm the described action; `false` aborts it.
    async fn confirm(&self, message: &str) -> AppResult<bool>;
}
