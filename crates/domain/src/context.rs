use leaguedesk_core::{AppResult, LeagueId, SeasonId, TeamId, TenantId};
use serde::{Deserialize, Serialize};

use crate::{ScopeAuthority, UserIdentity};

/// Query parameter carrying a drill-down tenant identifier.
pub const CTX_TENANT_ID: &str = "ctxTenantId";

/// Query parameter carrying a drill-down league identifier.
pub const CTX_LEAGUE_ID: &str = "ctxLeagueId";

/// Query parameter carrying a drill-down season identifier.
pub const CTX_SEASON_ID: &str = "ctxSeasonId";

/// Query parameter carrying a drill-down team identifier.
pub const CTX_TEAM_ID: &str = "ctxTeamId";

/// URL-carried identifiers for a higher-ranked admin drilling into a
/// specific lower entity.
///
/// Derived once per navigation and immutable for the lifetime of a page
/// view. Absent for a user acting on their own implicit scope. The season
/// and team entries are propagated through navigation links but never
/// consulted by scope resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextOverride {
    /// Tenant being drilled into, honored for system admins only.
    pub tenant_id: Option<TenantId>,
    /// League being drilled into, honored for system and tenant admins.
    pub league_id: Option<LeagueId>,
    /// Season being drilled into; link propagation only.
    pub season_id: Option<SeasonId>,
    /// Team being drilled into; link propagation only.
    pub team_id: Option<TeamId>,
}

impl ContextOverride {
    /// Returns whether no drill-down identifier is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenant_id.is_none()
            && self.league_id.is_none()
            && self.season_id.is_none()
            && self.team_id.is_none()
    }

    /// Parses `ctx*` query pairs into an override.
    ///
    /// Unknown keys are ignored; a malformed identifier value is a
    /// validation error at the transport boundary.
    pub fn from_query_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> AppResult<Self> {
        let mut override_ = Self::default();
        for (key, value) in pairs {
            match key {
                CTX_TENANT_ID => override_.tenant_id = Some(TenantId::parse_transport(value)?),
                CTX_LEAGUE_ID => override_.league_id = Some(LeagueId::parse_transport(value)?),
                CTX_SEASON_ID => override_.season_id = Some(SeasonId::parse_transport(value)?),
                CTX_TEAM_ID => override_.team_id = Some(TeamId::parse_transport(value)?),
                _ => {}
            }
        }

        Ok(override_)
    }
}

/// One field of the effective scope, named by its transport key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeField {
    /// Tenant partition of a query.
    Tenant,
    /// League partition of a query.
    League,
    /// Team partition of a query.
    Team,
}

impl ScopeField {
    /// Returns the transport query key for this field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenantId",
            Self::League => "leagueId",
            Self::Team => "teamId",
        }
    }

    /// Returns all scope fields.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ScopeField] = &[ScopeField::Tenant, ScopeField::League, ScopeField::Team];

        ALL
    }
}

impl std::fmt::Display for ScopeField {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The resolved `{tenant, league, team}` bound applied to every list query,
/// mutation, and generated navigation link.
///
/// A field is `None` only when the role tier is allowed an unscoped view of
/// that axis; all three are `None` only for a system admin's global view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectiveScope {
    /// Tenant bound, if any.
    pub tenant_id: Option<TenantId>,
    /// League bound, if any.
    pub league_id: Option<LeagueId>,
    /// Team bound, if any.
    pub team_id: Option<TeamId>,
}

impl EffectiveScope {
    /// Returns whether no bound is in force (system admin global view).
    #[must_use]
    pub fn is_unscoped(&self) -> bool {
        self.tenant_id.is_none() && self.league_id.is_none() && self.team_id.is_none()
    }

    /// Returns the value bound for one scope field, as transport text.
    #[must_use]
    pub fn field_value(&self, field: ScopeField) -> Option<String> {
        match field {
            ScopeField::Tenant => self.tenant_id.map(|id| id.to_string()),
            ScopeField::League => self.league_id.map(|id| id.to_string()),
            ScopeField::Team => self.team_id.map(|id| id.to_string()),
        }
    }

    /// Serializes the present bounds as transport query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        ScopeField::all()
            .iter()
            .filter_map(|field| {
                self.field_value(*field)
                    .map(|value| (field.as_str().to_owned(), value))
            })
            .collect()
    }
}

/// Scope field a list screen cannot render without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// Screen renders for any scope, including the global view.
    None,
    /// Screen needs a tenant bound (e.g. tenant user administration).
    Tenant,
    /// Screen needs a league bound (e.g. season and game lists).
    League,
    /// Screen needs a team bound (e.g. roster administration).
    Team,
}

impl ScopeRequirement {
    /// Checks the requirement against a resolved scope.
    ///
    /// Returns the missing field so the screen can surface a blocking
    /// message instead of issuing a query the backend would reject.
    pub fn check(&self, scope: &EffectiveScope) -> Result<(), ScopeField> {
        match self {
            Self::None => Ok(()),
            Self::Tenant => scope.tenant_id.map(|_| ()).ok_or(ScopeField::Tenant),
            Self::League => scope.league_id.map(|_| ()).ok_or(ScopeField::League),
            Self::Team => scope.team_id.map(|_| ()).ok_or(ScopeField::Team),
        }
    }
}

/// Computes the effective scope for an identity and an optional drill-down
/// override.
///
/// Total over its inputs; resolution follows the single dominant role:
///
/// 1. System admin: tenant and league come from the override alone.
/// 2. Tenant admin: tenant is always the identity's own (an override cannot
///    move it); league comes from the override.
/// 3. League admin: own tenant and own managed league; overrides ignored.
/// 4. Team admin: own tenant, the managed team's league, and the managed
///    team.
/// 5. General user: no scope; consuming screens treat this as insufficient.
#[must_use]
pub fn resolve_scope(identity: &UserIdentity, override_: &ContextOverride) -> EffectiveScope {
    let dominant = identity.dominant_role();
    match dominant.authority() {
        ScopeAuthority::Global => EffectiveScope {
            tenant_id: override_.tenant_id,
            league_id: override_.league_id,
            team_id: None,
        },
        ScopeAuthority::OwnTenant => EffectiveScope {
            tenant_id: identity.tenant_id(),
            league_id: override_.league_id,
            team_id: None,
        },
        ScopeAuthority::OwnLeague => EffectiveScope {
            tenant_id: identity.tenant_id(),
            league_id: identity.managing_league_id(),
            team_id: None,
        },
        ScopeAuthority::OwnTeam => EffectiveScope {
            tenant_id: identity.tenant_id(),
            league_id: identity.managed_team_league_id(),
            team_id: identity.managing_team_id(),
        },
        ScopeAuthority::Unscoped => EffectiveScope::default(),
    }
}
