use chrono::{DateTime, Utc};
use leaguedesk_core::{LeagueId, TeamId, TenantId};
use serde::{Deserialize, Serialize};

use crate::FreeFilters;

/// One team row as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// Stable team identifier.
    pub id: TeamId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// League the team plays in.
    pub league_id: LeagueId,
    /// Display name.
    pub name: String,
    /// Division label within the league, if the league uses divisions.
    pub division: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Free filters for team list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilters {
    /// Free-text search over team names.
    pub search: Option<String>,
    /// Division multi-select; each selection repeats the `division` key.
    pub divisions: Vec<String>,
}

impl FreeFilters for TeamFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.trim().to_owned()));
        }
        for division in &self.divisions {
            pairs.push(("division".to_owned(), division.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::{FreeFilters, TeamFilters};

    #[test]
    fn divisions_repeat_the_key() {
        let filters = TeamFilters {
            search: None,
            divisions: vec!["East".to_owned(), "West".to_owned()],
        };

        let pairs = filters.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("division".to_owned(), "East".to_owned()),
                ("division".to_owned(), "West".to_owned()),
            ]
        );
    }
}
