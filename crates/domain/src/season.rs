use chrono::{DateTime, Utc};
use leaguedesk_core::{LeagueId, SeasonId};
use serde::{Deserialize, Serialize};

use crate::FreeFilters;

/// One season row as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    /// Stable season identifier.
    pub id: SeasonId,
    /// League the season belongs to.
    pub league_id: LeagueId,
    /// Display name, e.g. "2026 Spring".
    pub name: String,
    /// First scheduled day of play.
    pub starts_at: DateTime<Utc>,
    /// Last scheduled day of play.
    pub ends_at: DateTime<Utc>,
    /// Whether this is the league's current season.
    pub is_current: bool,
}

/// Free filters for season list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonFilters {
    /// Free-text search over season names.
    pub search: Option<String>,
    /// Restricts the list to the current season.
    pub current_only: bool,
}

impl FreeFilters for SeasonFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.trim().to_owned()));
        }
        if self.current_only {
            pairs.push(("currentOnly".to_owned(), "true".to_owned()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::{FreeFilters, SeasonFilters};

    #[test]
    fn current_only_is_omitted_unless_set() {
        assert!(SeasonFilters::default().query_pairs().is_empty());

        let filters = SeasonFilters {
            search: None,
            current_only: true,
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("currentOnly".to_owned(), "true".to_owned())]
        );
    }
}
