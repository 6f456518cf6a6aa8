use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use leaguedesk_application::{ListGateway, PageEnvelope};
use leaguedesk_core::{AppError, AppResult};
use leaguedesk_domain::{PAGE_KEY, PAGE_SIZE_KEY, SORT_BY_KEY, SORT_ORDER_KEY};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

/// In-memory implementation of the list gateway over seeded JSON rows.
///
/// Applies the same query contract as the backend: every non-pagination
/// pair filters rows (repeated keys form an OR-set, distinct keys AND),
/// `search` matches any string field as a case-insensitive substring, and
/// results are sorted and paginated into the envelope. Used by tests and
/// by hosts running without a backend.
#[derive(Default)]
pub struct InMemoryListGateway {
    rows: Mutex<HashMap<String, Vec<Value>>>,
}

impl InMemoryListGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the seeded rows for one resource.
    pub async fn seed(&self, resource: impl Into<String>, rows: Vec<Value>) {
        self.rows.lock().await.insert(resource.into(), rows);
    }
}

fn field_text(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(boolean) => Some(boolean.to_string()),
        _ => None,
    }
}

fn matches_search(row: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    row.as_object().is_some_and(|fields| {
        fields.values().any(|value| {
            value
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    })
}

fn matches_filters(row: &Value, filters: &HashMap<String, Vec<String>>) -> bool {
    filters.iter().all(|(key, values)| {
        if key == "search" {
            return values.iter().all(|needle| matches_search(row, needle));
        }

        field_text(row, key).is_some_and(|text| values.iter().any(|value| value == &text))
    })
}

fn compare_fields(left: &Value, right: &Value, key: &str) -> Ordering {
    let left = left.get(key);
    let right = right.get(key);
    match (left, right) {
        (Some(Value::Number(left)), Some(Value::Number(right))) => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(left), Some(right)) => left
            .as_str()
            .unwrap_or_default()
            .cmp(right.as_str().unwrap_or_default()),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl<T> ListGateway<T> for InMemoryListGateway
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(
        &self,
        resource: &str,
        query: &[(String, String)],
    ) -> AppResult<PageEnvelope<T>> {
        let mut page: u32 = 1;
        let mut page_size: u32 = 25;
        let mut sort_by: Option<String> = None;
        let mut descending = false;
        let mut filters: HashMap<String, Vec<String>> = HashMap::new();

        for (key, value) in query {
            match key.as_str() {
                PAGE_KEY => {
                    page = value.parse().map_err(|_| {
                        AppError::Validation(format!("invalid page value '{value}'"))
                    })?;
                }
                PAGE_SIZE_KEY => {
                    page_size = value.parse().map_err(|_| {
                        AppError::Validation(format!("invalid page size value '{value}'"))
                    })?;
                }
                SORT_BY_KEY => sort_by = Some(value.clone()),
                SORT_ORDER_KEY => descending = value == "desc",
                _ => filters.entry(key.clone()).or_default().push(value.clone()),
            }
        }

        let rows = self.rows.lock().await;
        let mut matches: Vec<Value> = rows
            .get(resource)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(row, &filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(rows);

        if let Some(sort_by) = &sort_by {
            matches.sort_by(|left, right| {
                let ordering = compare_fields(left, right, sort_by);
                if descending { ordering.reverse() } else { ordering }
            });
        }

        let total_items = u64::try_from(matches.len()).unwrap_or(u64::MAX);
        let total_pages = u32::try_from(matches.len().div_ceil(page_size.max(1) as usize))
            .unwrap_or(u32::MAX);
        let start = (page.saturating_sub(1) as usize) * page_size as usize;

        let data = matches
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .map(|row| {
                serde_json::from_value::<T>(row).map_err(|error| {
                    AppError::Internal(format!("seeded row does not match row type: {error}"))
                })
            })
            .collect::<AppResult<Vec<T>>>()?;

        Ok(PageEnvelope {
            data,
            total_items,
            total_pages,
            current_page: page,
            page_size,
        })
    }

    async fn delete_row(&self, resource: &str, id: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let resource_rows = rows
            .get_mut(resource)
            .ok_or_else(|| AppError::NotFound(format!("unknown list resource '{resource}'")))?;

        let index = resource_rows
            .iter()
            .position(|row| {
                row.get("id")
                    .and_then(Value::as_str)
                    .is_some_and(|row_id| row_id == id)
            })
            .ok_or_else(|| AppError::NotFound(format!("no {resource} row with id '{id}'")))?;

        resource_rows.remove(index);
        Ok(())
    }
}
