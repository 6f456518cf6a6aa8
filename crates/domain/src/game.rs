use chrono::{DateTime, Utc};
use leaguedesk_core::{AppError, AppResult, GameId, LeagueId, SeasonId, TeamId};
use serde::{Deserialize, Serialize};

use crate::FreeFilters;

/// Play state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Fixture announced, not yet played.
    Scheduled,
    /// Currently being played.
    InProgress,
    /// Played to completion.
    Completed,
    /// Taken off the schedule.
    Postponed,
}

impl GameStatus {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Postponed => "postponed",
        }
    }

    /// Parses transport value into a game status.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "postponed" => Ok(Self::Postponed),
            _ => Err(AppError::Validation(format!(
                "unknown game status '{value}'"
            ))),
        }
    }
}

/// One game row as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    /// Stable game identifier.
    pub id: GameId,
    /// League the game belongs to.
    pub league_id: LeagueId,
    /// Season the game is scheduled in.
    pub season_id: SeasonId,
    /// Home side.
    pub home_team_id: TeamId,
    /// Away side.
    pub away_team_id: TeamId,
    /// Home score, present once play has started.
    pub home_score: Option<u32>,
    /// Away score, present once play has started.
    pub away_score: Option<u32>,
    /// Play state.
    pub status: GameStatus,
    /// Scheduled start time.
    pub scheduled_at: DateTime<Utc>,
}

/// Free filters for game list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilters {
    /// Status multi-select; each selection repeats the `status` key.
    pub statuses: Vec<GameStatus>,
    /// Narrows the schedule to one season.
    pub season_id: Option<SeasonId>,
}

impl FreeFilters for GameFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for status in &self.statuses {
            pairs.push(("status".to_owned(), status.as_str().to_owned()));
        }
        if let Some(season_id) = self.season_id {
            pairs.push(("seasonId".to_owned(), season_id.to_string()));
        }

        pairs
    }
}
