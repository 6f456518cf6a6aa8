use std::sync::Arc;

use leaguedesk_core::{AppResult, NonEmptyString};
use leaguedesk_domain::{
    ContextOverride, FreeFilters, PageNumber, PageSize, ScopeField, ScopeRequirement,
    ScopedFilterState, SortState, UserIdentity, resolve_scope,
};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::{ConfirmationPrompt, ListGateway, PageEnvelope};

/// Failures surfaced by a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Required scope field absent after resolution; no list can be shown
    /// and no request is issued.
    #[error("{0} is not available for the current user")]
    MissingScope(ScopeField),

    /// List fetch failed; previously loaded rows stay visible.
    #[error("list fetch failed: {0}")]
    Fetch(String),

    /// Delete failed; the list is left unchanged.
    #[error("delete failed: {0}")]
    Mutation(String),
}

/// Display phase of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch settled successfully.
    Ready,
    /// The latest fetch or mutation failed.
    Error(ListError),
}

/// Rows and pagination metadata of the last successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot<T> {
    /// Rows of the fetched page.
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total_items: u64,
    /// Total pages at the current page size.
    pub total_pages: u32,
}

/// Handle for one issued fetch, carrying its sequence number and the query
/// snapshot taken at issue time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    sequence: u64,
    query: Vec<(String, String)>,
}

impl FetchTicket {
    /// Returns the monotonic sequence number of this fetch.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the serialized query pairs captured at issue time.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// How a completed fetch was folded into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result applied; the screen shows it.
    Applied,
    /// Result discarded because a newer fetch was issued meanwhile.
    Discarded,
    /// Fetch failed; the error phase is set and prior rows stay visible.
    Failed,
    /// Result applied, but the current page now sits past the last page;
    /// the caller should move to the returned page and refetch.
    PageOutOfRange(PageNumber),
}

/// Outcome of resolving a pending delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResolution {
    /// No delete was pending.
    NothingPending,
    /// The user declined; nothing was sent.
    Declined,
    /// Confirmation or the delete request failed.
    Failed,
    /// The row was deleted and the list refetched.
    Completed,
}

/// A delete awaiting explicit user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    row_id: String,
    message: String,
}

impl PendingDelete {
    /// Returns the identifier of the row to delete.
    #[must_use]
    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    /// Returns the confirmation message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Orchestrates one list screen: guards fetches behind the required scope,
/// serializes filter state into list queries, folds responses and failures
/// into a display phase, and runs the confirm-delete-refetch cycle.
///
/// Fetch issue and completion are separate steps joined by a [`FetchTicket`]
/// so completion order need not match issue order; a monotonic sequence
/// number discards every result but the latest issued. The async methods
/// drive both steps against the gateway port for hosts that do not need the
/// event-level API.
pub struct ScopedListController<T, F: FreeFilters> {
    resource: String,
    requirement: ScopeRequirement,
    identity: UserIdentity,
    context_override: ContextOverride,
    filters: ScopedFilterState<F>,
    phase: ListPhase,
    snapshot: Option<ListSnapshot<T>>,
    pending_delete: Option<PendingDelete>,
    issued_fetches: u64,
    gateway: Arc<dyn ListGateway<T>>,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl<T, F: FreeFilters> ScopedListController<T, F> {
    /// Creates an idle controller for one list resource.
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        requirement: ScopeRequirement,
        identity: UserIdentity,
        context_override: ContextOverride,
        sort: SortState,
        gateway: Arc<dyn ListGateway<T>>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        let scope = resolve_scope(&identity, &context_override);
        Self {
            resource: resource.into(),
            requirement,
            identity,
            context_override,
            filters: ScopedFilterState::new(scope, sort),
            phase: ListPhase::Idle,
            snapshot: None,
            pending_delete: None,
            issued_fetches: 0,
            gateway,
            prompt,
        }
    }

    /// Returns the list resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the current display phase.
    #[must_use]
    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    /// Returns the last successful fetch, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&ListSnapshot<T>> {
        self.snapshot.as_ref()
    }

    /// Returns the displayed rows; empty before the first successful fetch.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.snapshot
            .as_ref()
            .map_or(&[], |snapshot| snapshot.items.as_slice())
    }

    /// Returns the current filter state.
    #[must_use]
    pub fn filters(&self) -> &ScopedFilterState<F> {
        &self.filters
    }

    /// Returns the delete awaiting confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Issues a fetch: re-derives scope, runs the missing-scope guard, and
    /// on success moves to `Loading` and returns the ticket to complete.
    ///
    /// Returns `None` when the required scope is absent; the phase then
    /// carries [`ListError::MissingScope`] and no request may be sent.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let scope = resolve_scope(&self.identity, &self.context_override);
        self.filters.sync_scope(&scope);

        if let Err(missing) = self.requirement.check(&scope) {
            debug!(
                resource = %self.resource,
                field = %missing,
                "list fetch blocked by missing scope"
            );
            self.phase = ListPhase::Error(ListError::MissingScope(missing));
            return None;
        }

        self.issued_fetches += 1;
        self.phase = ListPhase::Loading;
        let ticket = FetchTicket {
            sequence: self.issued_fetches,
            query: self.filters.query_pairs(),
        };
        debug!(
            resource = %self.resource,
            sequence = ticket.sequence,
            "list fetch issued"
        );

        Some(ticket)
    }

    /// Folds a settled fetch back into the controller.
    ///
    /// Results of any fetch but the latest issued are discarded unseen, so
    /// the last mutation always determines the last displayed result even
    /// when responses arrive out of order.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: AppResult<PageEnvelope<T>>,
    ) -> FetchOutcome {
        if ticket.sequence != self.issued_fetches {
            trace!(
                resource = %self.resource,
                sequence = ticket.sequence,
                latest = self.issued_fetches,
                "stale list result discarded"
            );
            return FetchOutcome::Discarded;
        }

        match outcome {
            Ok(envelope) => {
                let total_pages = envelope.total_pages;
                self.snapshot = Some(ListSnapshot {
                    items: envelope.data,
                    total_items: envelope.total_items,
                    total_pages,
                });
                self.phase = ListPhase::Ready;

                let last_page = total_pages.max(1);
                if self.filters.page().get() > last_page {
                    return FetchOutcome::PageOutOfRange(
                        PageNumber::new(last_page).unwrap_or(PageNumber::FIRST),
                    );
                }

                FetchOutcome::Applied
            }
            Err(error) => {
                warn!(
                    resource = %self.resource,
                    error = %error,
                    "list fetch failed"
                );
                self.phase = ListPhase::Error(ListError::Fetch(error.to_string()));
                FetchOutcome::Failed
            }
        }
    }

    /// Runs one guarded fetch cycle, refetching once when the current page
    /// fell past the last page.
    pub async fn refresh(&mut self) {
        let Some(ticket) = self.begin_fetch() else {
            return;
        };

        if let FetchOutcome::PageOutOfRange(last_page) = self.run_fetch(ticket).await {
            self.filters.set_page(last_page);
            if let Some(retry) = self.begin_fetch() {
                self.run_fetch(retry).await;
            }
        }
    }

    /// Merges a free-filter change and refetches from the first page.
    pub async fn change_filters(&mut self, update: impl FnOnce(&mut F)) {
        let scope = resolve_scope(&self.identity, &self.context_override);
        self.filters.apply_filters(&scope, update);
        self.refresh().await;
    }

    /// Moves to another page and refetches.
    pub async fn change_page(&mut self, page: PageNumber) {
        self.filters.set_page(page);
        self.refresh().await;
    }

    /// Changes the page size and refetches from the first page.
    pub async fn change_page_size(&mut self, page_size: PageSize) {
        self.filters.set_page_size(page_size);
        self.refresh().await;
    }

    /// Applies a header click to the sort and refetches from the first page.
    pub async fn change_sort(&mut self, column: NonEmptyString) {
        self.filters.toggle_sort(column);
        self.refresh().await;
    }

    /// Resets free filters and refetches from the first page.
    pub async fn clear_filters(&mut self) {
        self.filters.clear_filters();
        self.refresh().await;
    }

    /// Replaces identity and override after a session or navigation change
    /// and refetches; the guard re-runs against the re-derived scope.
    pub async fn change_context(
        &mut self,
        identity: UserIdentity,
        context_override: ContextOverride,
    ) {
        self.identity = identity;
        self.context_override = context_override;
        self.refresh().await;
    }

    /// Stages a delete for explicit confirmation; nothing is sent yet.
    pub fn request_delete(&mut self, row_id: impl Into<String>) {
        let row_id = row_id.into();
        let message = format!(
            "Delete this {} entry ({row_id})? This cannot be undone.",
            self.resource.trim_end_matches('s')
        );
        self.pending_delete = Some(PendingDelete { row_id, message });
    }

    /// Resolves the pending delete through the confirmation port.
    ///
    /// A confirmed delete is sent to the gateway and, on success, the list
    /// is refetched with the filter state unchanged so the table reflects
    /// the removal at the same page, sort, and filters. A declined or
    /// failed delete leaves the list exactly as it was.
    pub async fn resolve_delete(&mut self) -> DeleteResolution {
        let Some(pending) = self.pending_delete.take() else {
            return DeleteResolution::NothingPending;
        };

        let prompt = Arc::clone(&self.prompt);
        let confirmed = match prompt.confirm(pending.message()).await {
            Ok(confirmed) => confirmed,
            Err(error) => {
                warn!(
                    resource = %self.resource,
                    row_id = %pending.row_id,
                    error = %error,
                    "delete confirmation failed"
                );
                self.phase = ListPhase::Error(ListError::Mutation(error.to_string()));
                return DeleteResolution::Failed;
            }
        };

        if !confirmed {
            debug!(
                resource = %self.resource,
                row_id = %pending.row_id,
                "delete declined"
            );
            return DeleteResolution::Declined;
        }

        let gateway = Arc::clone(&self.gateway);
        match gateway
            .delete_row(self.resource.as_str(), pending.row_id())
            .await
        {
            Ok(()) => {
                info!(
                    resource = %self.resource,
                    row_id = %pending.row_id,
                    "row deleted"
                );
                self.refresh().await;
                DeleteResolution::Completed
            }
            Err(error) => {
                warn!(
                    resource = %self.resource,
                    row_id = %pending.row_id,
                    error = %error,
                    "delete failed"
                );
                self.phase = ListPhase::Error(ListError::Mutation(error.to_string()));
                DeleteResolution::Failed
            }
        }
    }

    async fn run_fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        let gateway = Arc::clone(&self.gateway);
        let outcome = gateway
            .fetch_page(self.resource.as_str(), ticket.query())
            .await;

        self.complete_fetch(ticket, outcome)
    }
}
