//! List-controller life cycle and ports for scoped list screens.

#![forbid(unsafe_code)]

mod debounce;
mod list_controller;
mod list_ports;

pub use debounce::{DEFAULT_QUIET_PERIOD, DebounceTicket, SearchDebouncer};
pub use list_controller::{
    DeleteResolution, FetchOutcome, FetchTicket, ListError, ListPhase, ListSnapshot,
    PendingDelete, ScopedListController,
};
pub use list_ports::{ConfirmationPrompt, ListGateway, PageEnvelope};
