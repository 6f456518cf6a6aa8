use leaguedesk_core::NonEmptyString;

use crate::{EffectiveScope, PageNumber, PageSize, ScopeField, SortState};

/// Transport query key for the page number.
pub const PAGE_KEY: &str = "page";

/// Transport query key for the page size.
pub const PAGE_SIZE_KEY: &str = "pageSize";

/// Transport query key for the sort column.
pub const SORT_BY_KEY: &str = "sortBy";

/// Transport query key for the sort direction.
pub const SORT_ORDER_KEY: &str = "sortOrder";

/// Screen-specific filter fields serialized into a list query.
///
/// Implementations emit one pair per populated field and repeat the key for
/// multi-valued fields. Pairs whose key collides with a pagination or scope
/// key are discarded at serialization; free filters cannot steer either.
pub trait FreeFilters: Clone + Default {
    /// Serializes populated filter fields as transport query pairs.
    fn query_pairs(&self) -> Vec<(String, String)>;
}

/// No-op filter set for screens with no free-filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoFilters;

impl FreeFilters for NoFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Pagination, sort, free filters, and the enforced scope of one list screen.
///
/// The scope portion is derived state: it is overwritten from the effective
/// scope supplied to each mutation and is never editable on its own, so a
/// stale bound from a previous render cannot be resubmitted after a context
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedFilterState<F: FreeFilters> {
    page: PageNumber,
    page_size: PageSize,
    sort: SortState,
    free: F,
    scope: EffectiveScope,
}

impl<F: FreeFilters> ScopedFilterState<F> {
    /// Creates filter state on the first page with default free filters.
    #[must_use]
    pub fn new(scope: EffectiveScope, sort: SortState) -> Self {
        Self {
            page: PageNumber::FIRST,
            page_size: PageSize::default(),
            sort,
            free: F::default(),
            scope,
        }
    }

    /// Returns the current page.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Returns the current page size.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the active sort.
    #[must_use]
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the current free filters.
    #[must_use]
    pub fn free(&self) -> &F {
        &self.free
    }

    /// Returns the enforced scope.
    #[must_use]
    pub fn scope(&self) -> &EffectiveScope {
        &self.scope
    }

    /// Merges a free-filter change, resets to the first page, and re-applies
    /// the supplied current scope.
    pub fn apply_filters(&mut self, scope: &EffectiveScope, update: impl FnOnce(&mut F)) {
        update(&mut self.free);
        self.page = PageNumber::FIRST;
        self.scope = *scope;
    }

    /// Moves to another page; scope and free filters are untouched.
    pub fn set_page(&mut self, page: PageNumber) {
        self.page = page;
    }

    /// Changes the page size and resets to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = PageNumber::FIRST;
    }

    /// Applies a header click to the sort and resets to the first page.
    pub fn toggle_sort(&mut self, column: NonEmptyString) {
        self.sort.toggle(column);
        self.page = PageNumber::FIRST;
    }

    /// Resets free filters to their defaults and returns to the first page;
    /// the enforced scope stays in force.
    pub fn clear_filters(&mut self) {
        self.free = F::default();
        self.page = PageNumber::FIRST;
    }

    /// Re-derives the enforced scope after an identity or override change.
    pub fn sync_scope(&mut self, scope: &EffectiveScope) {
        self.scope = *scope;
    }

    /// Serializes the full state as transport query pairs.
    ///
    /// Free-filter pairs come first with empty values dropped and reserved
    /// keys stripped, followed by pagination/sort pairs and the enforced
    /// scope pairs. Every scope-shaped value in the output therefore comes
    /// from the enforced scope, whatever the free filters tried to emit.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .free
            .query_pairs()
            .into_iter()
            .filter(|(key, value)| !value.is_empty() && !is_reserved_key(key))
            .collect();

        pairs.push((PAGE_KEY.to_owned(), self.page.get().to_string()));
        pairs.push((PAGE_SIZE_KEY.to_owned(), self.page_size.get().to_string()));
        pairs.push((SORT_BY_KEY.to_owned(), self.sort.sort_by().to_owned()));
        pairs.push((
            SORT_ORDER_KEY.to_owned(),
            self.sort.direction().as_str().to_owned(),
        ));
        pairs.extend(self.scope.query_pairs());

        pairs
    }
}

fn is_reserved_key(key: &str) -> bool {
    if matches!(key, PAGE_KEY | PAGE_SIZE_KEY | SORT_BY_KEY | SORT_ORDER_KEY) {
        return true;
    }

    ScopeField::all().iter().any(|field| field.as_str() == key)
}

#[cfg(test)]
mod tests {
    use leaguedesk_core::{LeagueId, NonEmptyString, TenantId};

    use crate::{EffectiveScope, PageNumber, PageSize, SortDirection, SortState};

    use super::{FreeFilters, NoFilters, ScopedFilterState};

    /// Filter set that tries to smuggle scope and pagination keys.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct HostileFilters {
        search: Option<String>,
    }

    impl FreeFilters for HostileFilters {
        fn query_pairs(&self) -> Vec<(String, String)> {
            let mut pairs = vec![
                ("tenantId".to_owned(), "smuggled-tenant".to_owned()),
                ("leagueId".to_owned(), "smuggled-league".to_owned()),
                ("page".to_owned(), "99".to_owned()),
            ];
            if let Some(search) = &self.search {
                pairs.push(("search".to_owned(), search.clone()));
            }
            pairs.push(("empty".to_owned(), String::new()));

            pairs
        }
    }

    #[allow(clippy::unwrap_used)]
    fn default_sort() -> SortState {
        SortState::new("createdAt", SortDirection::Desc).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    fn column(name: &str) -> NonEmptyString {
        NonEmptyString::new(name).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    fn page(value: u32) -> PageNumber {
        PageNumber::new(value).unwrap()
    }

    fn league_scope() -> (EffectiveScope, TenantId, LeagueId) {
        let tenant_id = TenantId::new();
        let league_id = LeagueId::new();
        let scope = EffectiveScope {
            tenant_id: Some(tenant_id),
            league_id: Some(league_id),
            team_id: None,
        };

        (scope, tenant_id, league_id)
    }

    fn pair_values<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(pair_key, _)| pair_key == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    #[test]
    fn scope_keys_from_free_filters_are_stripped() {
        let (scope, tenant_id, league_id) = league_scope();
        let mut state: ScopedFilterState<HostileFilters> =
            ScopedFilterState::new(scope, default_sort());
        state.apply_filters(&scope, |free| free.search = Some("foo".to_owned()));

        let pairs = state.query_pairs();
        assert_eq!(
            pair_values(&pairs, "tenantId"),
            vec![tenant_id.to_string().as_str()]
        );
        assert_eq!(
            pair_values(&pairs, "leagueId"),
            vec![league_id.to_string().as_str()]
        );
        assert_eq!(pair_values(&pairs, "page"), vec!["1"]);
        assert_eq!(pair_values(&pairs, "search"), vec!["foo"]);
    }

    #[test]
    fn empty_values_are_omitted() {
        let (scope, _, _) = league_scope();
        let state: ScopedFilterState<HostileFilters> =
            ScopedFilterState::new(scope, default_sort());

        let pairs = state.query_pairs();
        assert!(pair_values(&pairs, "empty").is_empty());
    }

    #[test]
    fn apply_filters_resets_page_and_rederives_scope() {
        let (scope, _, _) = league_scope();
        let mut state: ScopedFilterState<HostileFilters> =
            ScopedFilterState::new(scope, default_sort());
        state.set_page(page(7));

        let narrowed = EffectiveScope {
            league_id: None,
            ..scope
        };
        state.apply_filters(&narrowed, |free| free.search = Some("foo".to_owned()));

        assert_eq!(state.page(), PageNumber::FIRST);
        assert_eq!(state.scope(), &narrowed);
    }

    #[test]
    fn set_page_is_the_only_mutator_leaving_the_first_page() {
        let (scope, _, _) = league_scope();
        let mut state: ScopedFilterState<NoFilters> = ScopedFilterState::new(scope, default_sort());

        state.set_page(page(4));
        assert_eq!(state.page().get(), 4);

        state.toggle_sort(column("name"));
        assert_eq!(state.page(), PageNumber::FIRST);

        state.set_page(page(4));
        #[allow(clippy::unwrap_used)]
        state.set_page_size(PageSize::new(50).unwrap());
        assert_eq!(state.page(), PageNumber::FIRST);

        state.set_page(page(4));
        state.clear_filters();
        assert_eq!(state.page(), PageNumber::FIRST);
    }

    #[test]
    fn clear_filters_keeps_scope_in_force() {
        let (scope, tenant_id, _) = league_scope();
        let mut state: ScopedFilterState<HostileFilters> =
            ScopedFilterState::new(scope, default_sort());
        state.apply_filters(&scope, |free| free.search = Some("foo".to_owned()));
        state.clear_filters();

        assert_eq!(state.free(), &HostileFilters::default());
        assert_eq!(state.scope().tenant_id, Some(tenant_id));
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_column() {
        let (scope, _, _) = league_scope();
        let mut state: ScopedFilterState<NoFilters> = ScopedFilterState::new(scope, default_sort());

        state.toggle_sort(column("createdAt"));
        let pairs = state.query_pairs();
        assert_eq!(pair_values(&pairs, "sortBy"), vec!["createdAt"]);
        assert_eq!(pair_values(&pairs, "sortOrder"), vec!["asc"]);
    }
}
