use async_trait::async_trait;
use leaguedesk_application::ConfirmationPrompt;
use leaguedesk_core::AppResult;
use tracing::debug;

/// Confirmation prompt with a preset decision.
///
/// For hosts without an interactive surface (demos, seeded dev runs) and
/// for wiring screens whose destructive actions are disabled.
pub struct AutoConfirmation {
    decision: bool,
}

impl AutoConfirmation {
    /// Confirms every action.
    #[must_use]
    pub fn approving() -> Self {
        Self { decision: true }
    }

    /// Declines every action.
    #[must_use]
    pub fn declining() -> Self {
        Self { decision: false }
    }
}

#[async_trait]
impl ConfirmationPrompt for AutoConfirmation {
    async fn confirm(&self, message: &str) -> AppResult<bool> {
        debug!(message = %message, decision = self.decision, "auto-resolved confirmation");
        Ok(self.decision)
    }
}
