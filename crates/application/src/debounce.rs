use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::sleep;

/// Quiet period matching the search inputs this engine drives.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Coalesces rapid keystrokes into a single fetch.
///
/// Each keystroke takes a ticket; a ticket settles only if no newer ticket
/// was taken during the quiet period, so exactly the last keystroke of a
/// burst triggers work.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    generation: AtomicU64,
}

/// Ticket for one debounced input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DebounceTicket {
    generation: u64,
}

impl SearchDebouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            generation: AtomicU64::new(0),
        }
    }

    /// Registers one keystroke and returns its ticket.
    pub fn note_input(&self) -> DebounceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket { generation }
    }

    /// Waits out the quiet period; `true` means the ticket is still the
    /// latest input and its fetch should run.
    pub async fn settled(&self, ticket: DebounceTicket) -> bool {
        sleep(self.quiet_period).await;
        ticket.generation == self.generation.load(Ordering::SeqCst)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
