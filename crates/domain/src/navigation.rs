use leaguedesk_core::{AppError, AppResult, SeasonId};
use url::form_urlencoded;

use crate::context::{CTX_LEAGUE_ID, CTX_SEASON_ID, CTX_TEAM_ID, CTX_TENANT_ID};
use crate::{ContextOverride, EffectiveScope};

/// Builds a navigation link with the current context re-attached.
///
/// Appends one `ctx*` query pair per bound scope field (and the season
/// drill-down when given), replacing any pre-existing pair with the same
/// key and preserving every other query parameter and the fragment. The
/// operation is idempotent and never emits a pair for an absent field, so
/// screens reachable from an admin's drill-in keep their context instead of
/// falling back to the admin's own default scope.
pub fn contextual_link(
    path: &str,
    scope: &EffectiveScope,
    season_id: Option<SeasonId>,
) -> AppResult<String> {
    if path.trim().is_empty() {
        return Err(AppError::Validation(
            "navigation path must not be empty".to_owned(),
        ));
    }

    let (without_fragment, fragment) = match path.split_once('#') {
        Some((body, fragment)) => (body, Some(fragment)),
        None => (path, None),
    };
    let (base, existing_query) = match without_fragment.split_once('?') {
        Some((base, query)) => (base, query),
        None => (without_fragment, ""),
    };

    let mut context_pairs: Vec<(&'static str, String)> = Vec::new();
    if let Some(tenant_id) = scope.tenant_id {
        context_pairs.push((CTX_TENANT_ID, tenant_id.to_string()));
    }
    if let Some(league_id) = scope.league_id {
        context_pairs.push((CTX_LEAGUE_ID, league_id.to_string()));
    }
    if let Some(season_id) = season_id {
        context_pairs.push((CTX_SEASON_ID, season_id.to_string()));
    }
    if let Some(team_id) = scope.team_id {
        context_pairs.push((CTX_TEAM_ID, team_id.to_string()));
    }

    let kept_pairs: Vec<(String, String)> = form_urlencoded::parse(existing_query.as_bytes())
        .filter(|(key, _)| !context_pairs.iter().any(|(ctx_key, _)| key == ctx_key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(kept_pairs.iter().map(|(key, value)| (key, value)));
    serializer.extend_pairs(context_pairs.iter().map(|(key, value)| (*key, value)));
    let query = serializer.finish();

    let mut link = base.to_owned();
    if !query.is_empty() {
        link.push('?');
        link.push_str(&query);
    }
    if let Some(fragment) = fragment {
        link.push('#');
        link.push_str(fragment);
    }

    Ok(link)
}

/// Reads the `ctx*` query pairs of a navigation path back into an override.
///
/// The inverse of [`contextual_link`] for the context portion of the query
/// string; non-context parameters are ignored.
pub fn override_from_path(path: &str) -> AppResult<ContextOverride> {
    let without_fragment = path.split_once('#').map_or(path, |(body, _)| body);
    let query = without_fragment
        .split_once('?')
        .map_or("", |(_, query)| query);

    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    ContextOverride::from_query_pairs(
        pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    )
}

#[cfg(test)]
mod tests {
    use leaguedesk_core::{LeagueId, SeasonId, TeamId, TenantId};
    use proptest::prelude::*;
    use uuid::Uuid;

    use crate::{ContextOverride, EffectiveScope};

    use super::{contextual_link, override_from_path};

    fn occurrences(link: &str, key: &str) -> usize {
        link.match_indices(&format!("{key}=")).count()
    }

    #[test]
    fn link_carries_scope_and_season() {
        let tenant_id = TenantId::new();
        let league_id = LeagueId::new();
        let season_id = SeasonId::new();
        let scope = EffectiveScope {
            tenant_id: Some(tenant_id),
            league_id: Some(league_id),
            team_id: None,
        };

        let link = contextual_link("/seasons", &scope, Some(season_id));
        let link = link.unwrap_or_default();
        assert_eq!(occurrences(&link, "ctxTenantId"), 1);
        assert_eq!(occurrences(&link, "ctxLeagueId"), 1);
        assert_eq!(occurrences(&link, "ctxSeasonId"), 1);
        assert_eq!(occurrences(&link, "ctxTeamId"), 0);

        let parsed = override_from_path(&link);
        assert_eq!(
            parsed.ok(),
            Some(ContextOverride {
                tenant_id: Some(tenant_id),
                league_id: Some(league_id),
                season_id: Some(season_id),
                team_id: None,
            })
        );
    }

    #[test]
    fn existing_parameters_and_fragment_are_preserved() {
        let scope = EffectiveScope {
            tenant_id: Some(TenantId::new()),
            ..EffectiveScope::default()
        };

        let link = contextual_link("/teams?division=East&page=2#roster", &scope, None);
        let link = link.unwrap_or_default();
        assert!(link.starts_with("/teams?"));
        assert!(link.contains("division=East"));
        assert!(link.contains("page=2"));
        assert!(link.ends_with("#roster"));
    }

    #[test]
    fn building_twice_is_idempotent() {
        let scope = EffectiveScope {
            tenant_id: Some(TenantId::new()),
            league_id: Some(LeagueId::new()),
            team_id: Some(TeamId::new()),
        };

        let once = contextual_link("/games?status=final", &scope, None).unwrap_or_default();
        let twice = contextual_link(&once, &scope, None).unwrap_or_default();
        assert_eq!(once, twice);
    }

    #[test]
    fn unscoped_link_is_left_untouched() {
        let link = contextual_link("/leagues", &EffectiveScope::default(), None);
        assert_eq!(link.ok().as_deref(), Some("/leagues"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let link = contextual_link("  ", &EffectiveScope::default(), None);
        assert!(link.is_err());
    }

    fn arb_scope() -> impl Strategy<Value = EffectiveScope> {
        (
            proptest::option::of(any::<u128>()),
            proptest::option::of(any::<u128>()),
            proptest::option::of(any::<u128>()),
        )
            .prop_map(|(tenant, league, team)| EffectiveScope {
                tenant_id: tenant.map(|raw| TenantId::from_uuid(Uuid::from_u128(raw))),
                league_id: league.map(|raw| LeagueId::from_uuid(Uuid::from_u128(raw))),
                team_id: team.map(|raw| TeamId::from_uuid(Uuid::from_u128(raw))),
            })
    }

    proptest! {
        // Every bound field appears exactly once and parses back to the
        // same value; absent fields never appear.
        #[test]
        fn link_roundtrip_preserves_scope(scope in arb_scope()) {
            let link = contextual_link("/games?status=final", &scope, None);
            prop_assert!(link.is_ok());
            let link = link.unwrap_or_default();

            prop_assert_eq!(
                occurrences(&link, "ctxTenantId"),
                usize::from(scope.tenant_id.is_some())
            );
            prop_assert_eq!(
                occurrences(&link, "ctxLeagueId"),
                usize::from(scope.league_id.is_some())
            );
            prop_assert_eq!(
                occurrences(&link, "ctxTeamId"),
                usize::from(scope.team_id.is_some())
            );

            let parsed = override_from_path(&link);
            prop_assert!(parsed.is_ok());
            let parsed = parsed.unwrap_or_default();
            prop_assert_eq!(parsed.tenant_id, scope.tenant_id);
            prop_assert_eq!(parsed.league_id, scope.league_id);
            prop_assert_eq!(parsed.team_id, scope.team_id);
        }
    }
}
