use leaguedesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Smallest allowed page size.
pub const PAGE_SIZE_MIN: u32 = 1;

/// Largest allowed page size.
pub const PAGE_SIZE_MAX: u32 = 100;

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Creates a validated page number.
    pub fn new(value: u32) -> AppResult<Self> {
        if value < 1 {
            return Err(AppError::Validation(
                "page number must be at least 1".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the one-based page value.
    #[must_use]
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Number of rows per page, bounded to what the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize(u32);

impl PageSize {
    /// Creates a validated page size.
    pub fn new(value: u32) -> AppResult<Self> {
        if !(PAGE_SIZE_MIN..=PAGE_SIZE_MAX).contains(&value) {
            return Err(AppError::Validation(format!(
                "page size must be between {PAGE_SIZE_MIN} and {PAGE_SIZE_MAX}, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the row count per page.
    #[must_use]
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(25)
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parses transport value into a sort direction.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    sort_by: NonEmptyString,
    direction: SortDirection,
}

impl SortState {
    /// Creates a validated sort state.
    pub fn new(sort_by: impl Into<String>, direction: SortDirection) -> AppResult<Self> {
        Ok(Self {
            sort_by: NonEmptyString::new(sort_by)?,
            direction,
        })
    }

    /// Returns the sorted column name.
    #[must_use]
    pub fn sort_by(&self) -> &str {
        self.sort_by.as_str()
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Applies a header click: the same column flips direction, a new
    /// column sorts ascending.
    pub fn toggle(&mut self, column: NonEmptyString) {
        if self.sort_by == column {
            self.direction = self.direction.toggled();
        } else {
            self.sort_by = column;
            self.direction = SortDirection::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use leaguedesk_core::NonEmptyString;

    use super::{PageNumber, PageSize, SortDirection, SortState};

    #[test]
    fn page_number_rejects_zero() {
        assert!(PageNumber::new(0).is_err());
        assert_eq!(PageNumber::new(1).ok(), Some(PageNumber::FIRST));
    }

    #[test]
    fn page_size_enforces_bounds() {
        assert!(PageSize::new(0).is_err());
        assert!(PageSize::new(101).is_err());
        assert_eq!(PageSize::new(100).map(|size| size.get()).ok(), Some(100));
    }

    #[test]
    fn sort_direction_roundtrip_transport_value() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(
                SortDirection::parse_transport(direction.as_str()).ok(),
                Some(direction)
            );
        }
    }

    #[allow(clippy::unwrap_used)]
    fn sort(column: &str, direction: SortDirection) -> SortState {
        SortState::new(column, direction).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    fn column(name: &str) -> NonEmptyString {
        NonEmptyString::new(name).unwrap()
    }

    #[test]
    fn toggle_same_column_flips_direction() {
        let mut sort = sort("createdAt", SortDirection::Desc);
        sort.toggle(column("createdAt"));
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(sort.sort_by(), "createdAt");
    }

    #[test]
    fn toggle_new_column_sorts_ascending() {
        let mut sort = sort("createdAt", SortDirection::Desc);
        sort.toggle(column("name"));
        assert_eq!(sort.sort_by(), "name");
        assert_eq!(sort.direction(), SortDirection::Asc);
    }
}
