use std::collections::BTreeSet;
use std::str::FromStr;

use leaguedesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Administrative role tiers, ranked from narrowest to widest authority.
///
/// The discriminant order is the authority order: a numerically greater role
/// outranks a lesser one, and every precedence decision in scope resolution
/// routes through this ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Signed-in user with no administrative authority.
    GeneralUser = 0,

    /// Administers a single team and its roster.
    TeamAdmin = 1,

    /// Administers a single league, its seasons, teams, and games.
    LeagueAdmin = 2,

    /// Administers every league under one tenant.
    TenantAdmin = 3,

    /// Administers all tenants; the only tier with a global view.
    SystemAdmin = 4,
}

/// Identity field that supplies a role's default scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeAuthority {
    /// Everything is visible; drilling in narrows via the context override.
    Global,
    /// Scope comes from the identity's own tenant membership.
    OwnTenant,
    /// Scope comes from the identity's managed league (and its tenant).
    OwnLeague,
    /// Scope comes from the identity's managed team (and its league/tenant).
    OwnTeam,
    /// No default scope; consuming screens treat this as insufficient.
    Unscoped,
}

impl Role {
    /// Returns a stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralUser => "GENERAL_USER",
            Self::TeamAdmin => "TEAM_ADMIN",
            Self::LeagueAdmin => "LEAGUE_ADMIN",
            Self::TenantAdmin => "TENANT_ADMIN",
            Self::SystemAdmin => "SYSTEM_ADMIN",
        }
    }

    /// Returns all known roles in ascending rank order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::GeneralUser,
            Role::TeamAdmin,
            Role::LeagueAdmin,
            Role::TenantAdmin,
            Role::SystemAdmin,
        ];

        ALL
    }

    /// Returns which identity field supplies this role's default scope.
    #[must_use]
    pub fn authority(&self) -> ScopeAuthority {
        match self {
            Self::SystemAdmin => ScopeAuthority::Global,
            Self::TenantAdmin => ScopeAuthority::OwnTenant,
            Self::LeagueAdmin => ScopeAuthority::OwnLeague,
            Self::TeamAdmin => ScopeAuthority::OwnTeam,
            Self::GeneralUser => ScopeAuthority::Unscoped,
        }
    }

    /// Picks the single highest-ranked role out of a role set.
    ///
    /// Users may hold several roles at once; scope derivation always follows
    /// the dominant one, never a per-screen mixture.
    #[must_use]
    pub fn dominant(roles: &BTreeSet<Role>) -> Option<Role> {
        roles.iter().max().copied()
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GENERAL_USER" => Ok(Self::GeneralUser),
            "TEAM_ADMIN" => Ok(Self::TeamAdmin),
            "LEAGUE_ADMIN" => Ok(Self::LeagueAdmin),
            "TENANT_ADMIN" => Ok(Self::TenantAdmin),
            "SYSTEM_ADMIN" => Ok(Self::SystemAdmin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn rank_order_is_total() {
        assert!(Role::SystemAdmin > Role::TenantAdmin);
        assert!(Role::TenantAdmin > Role::LeagueAdmin);
        assert!(Role::LeagueAdmin > Role::TeamAdmin);
        assert!(Role::TeamAdmin > Role::GeneralUser);
    }

    #[test]
    fn role_roundtrip_transport_value() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()).ok(), Some(*role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("SUPER_ADMIN").is_err());
    }

    #[test]
    fn dominant_role_picks_highest_rank() {
        let roles = BTreeSet::from([Role::LeagueAdmin, Role::TenantAdmin, Role::GeneralUser]);
        assert_eq!(Role::dominant(&roles), Some(Role::TenantAdmin));
    }

    #[test]
    fn dominant_role_of_empty_set_is_none() {
        assert_eq!(Role::dominant(&BTreeSet::new()), None);
    }
}
