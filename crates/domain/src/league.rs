use chrono::{DateTime, Utc};
use leaguedesk_core::{AppError, AppResult, LeagueId, TenantId};
use serde::{Deserialize, Serialize};

use crate::FreeFilters;

/// Lifecycle status of a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    /// Being configured, not visible to general users.
    Draft,
    /// Running competition.
    Active,
    /// Closed and read-only.
    Archived,
}

impl LeagueStatus {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Parses transport value into a league status.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(AppError::Validation(format!(
                "unknown league status '{value}'"
            ))),
        }
    }
}

/// One league row as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    /// Stable league identifier.
    pub id: LeagueId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: LeagueStatus,
    /// Number of teams registered in the league.
    pub team_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Free filters for league list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueFilters {
    /// Free-text search over league names.
    pub search: Option<String>,
    /// Status multi-select; each selection repeats the `status` key.
    pub statuses: Vec<LeagueStatus>,
}

impl FreeFilters for LeagueFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.trim().to_owned()));
        }
        for status in &self.statuses {
            pairs.push(("status".to_owned(), status.as_str().to_owned()));
        }

        pairs
    }
}
