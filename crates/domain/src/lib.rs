//! Domain model for hierarchical context resolution and scoped list queries.
//!
//! Everything in this crate is pure: role ranking, scope resolution, filter
//! state, and link construction are total functions over explicit inputs,
//! with no network or session access.

#![forbid(unsafe_code)]

mod context;
mod filter;
mod game;
mod identity;
mod league;
mod navigation;
mod paging;
mod role;
mod season;
mod team;

pub use context::{
    CTX_LEAGUE_ID, CTX_SEASON_ID, CTX_TEAM_ID, CTX_TENANT_ID, ContextOverride, EffectiveScope,
    ScopeField, ScopeRequirement, resolve_scope,
};
pub use filter::{
    FreeFilters, NoFilters, PAGE_KEY, PAGE_SIZE_KEY, SORT_BY_KEY, SORT_ORDER_KEY,
    ScopedFilterState,
};
pub use game::{GameFilters, GameStatus, GameSummary};
pub use identity::UserIdentity;
pub use league::{LeagueFilters, LeagueStatus, LeagueSummary};
pub use navigation::{contextual_link, override_from_path};
pub use paging::{
    PAGE_SIZE_MAX, PAGE_SIZE_MIN, PageNumber, PageSize, SortDirection, SortState,
};
pub use role::{Role, ScopeAuthority};
pub use season::{SeasonFilters, SeasonSummary};
pub use team::{TeamFilters, TeamSummary};
