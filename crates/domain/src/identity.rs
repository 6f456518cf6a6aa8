use std::collections::BTreeSet;

use leaguedesk_core::{AppError, AppResult, LeagueId, TeamId, TenantId, UserId};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Signed-in user information held for the lifetime of the session.
///
/// Created at sign-in, destroyed at sign-out, and read-only in between;
/// scope derivation never reads session state directly but always receives
/// an identity as an explicit argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    roles: BTreeSet<Role>,
    tenant_id: Option<TenantId>,
    managing_league_id: Option<LeagueId>,
    managing_team_id: Option<TeamId>,
    managed_team_league_id: Option<LeagueId>,
}

impl UserIdentity {
    /// Creates a validated user identity from session data.
    ///
    /// The role set must be non-empty. Tenant-bound roles require a tenant
    /// membership, a league admin must name a managed league, and a team
    /// admin must name both the managed team and that team's league (carried
    /// on the identity so league scope resolves without a lookup).
    pub fn new(
        user_id: UserId,
        roles: BTreeSet<Role>,
        tenant_id: Option<TenantId>,
        managing_league_id: Option<LeagueId>,
        managing_team_id: Option<TeamId>,
        managed_team_league_id: Option<LeagueId>,
    ) -> AppResult<Self> {
        if roles.is_empty() {
            return Err(AppError::Validation(
                "user identity must hold at least one role".to_owned(),
            ));
        }

        let tenant_bound = [Role::TenantAdmin, Role::LeagueAdmin, Role::TeamAdmin];
        if tenant_bound.iter().any(|role| roles.contains(role)) && tenant_id.is_none() {
            return Err(AppError::Validation(
                "tenant-bound roles require a tenant membership".to_owned(),
            ));
        }

        if roles.contains(&Role::LeagueAdmin) && managing_league_id.is_none() {
            return Err(AppError::Validation(
                "league admin identity must name its managed league".to_owned(),
            ));
        }

        if roles.contains(&Role::TeamAdmin)
            && (managing_team_id.is_none() || managed_team_league_id.is_none())
        {
            return Err(AppError::Validation(
                "team admin identity must name its managed team and that team's league".to_owned(),
            ));
        }

        Ok(Self {
            user_id,
            roles,
            tenant_id,
            managing_league_id,
            managing_team_id,
            managed_team_league_id,
        })
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the full role set held by the user.
    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Returns whether the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the single highest-ranked role, which drives scope derivation.
    #[must_use]
    pub fn dominant_role(&self) -> Role {
        Role::dominant(&self.roles).unwrap_or(Role::GeneralUser)
    }

    /// Returns the tenant the user belongs to, if any.
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// Returns the league managed by a league admin.
    #[must_use]
    pub fn managing_league_id(&self) -> Option<LeagueId> {
        self.managing_league_id
    }

    /// Returns the team managed by a team admin.
    #[must_use]
    pub fn managing_team_id(&self) -> Option<TeamId> {
        self.managing_team_id
    }

    /// Returns the league the managed team plays in.
    #[must_use]
    pub fn managed_team_league_id(&self) -> Option<LeagueId> {
        self.managed_team_league_id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use leaguedesk_core::{LeagueId, TeamId, TenantId, UserId};

    use super::{Role, UserIdentity};

    #[test]
    fn empty_role_set_is_rejected() {
        let result = UserIdentity::new(UserId::new(), BTreeSet::new(), None, None, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn tenant_bound_role_without_tenant_is_rejected() {
        let result = UserIdentity::new(
            UserId::new(),
            BTreeSet::from([Role::TenantAdmin]),
            None,
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn league_admin_without_league_is_rejected() {
        let result = UserIdentity::new(
            UserId::new(),
            BTreeSet::from([Role::LeagueAdmin]),
            Some(TenantId::new()),
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn team_admin_without_team_league_is_rejected() {
        let result = UserIdentity::new(
            UserId::new(),
            BTreeSet::from([Role::TeamAdmin]),
            Some(TenantId::new()),
            None,
            Some(TeamId::new()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn dominant_role_follows_rank_not_insertion() {
        let identity = UserIdentity::new(
            UserId::new(),
            BTreeSet::from([Role::LeagueAdmin, Role::TenantAdmin]),
            Some(TenantId::new()),
            Some(LeagueId::new()),
            None,
            None,
        );
        assert_eq!(
            identity.map(|identity| identity.dominant_role()).ok(),
            Some(Role::TenantAdmin)
        );
    }
}
