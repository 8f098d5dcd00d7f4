//! Shared query parameter types for API handlers.

use ambiental_core::search::{clamp_page_size, QueryState, SortDirection, SortSpec};
use serde::Deserialize;

/// Query parameters for `GET /records/{table}`.
///
/// `page` is zero-based. `page_size` is clamped to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordListParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// UI field to sort by.
    pub sort: Option<String>,
    pub order: Option<SortDirection>,
    /// Restrict to one case.
    pub numero_caso: Option<String>,
}

impl RecordListParams {
    pub fn query_state(&self) -> QueryState {
        let mut state = QueryState {
            page_size: clamp_page_size(self.page_size),
            ..QueryState::default()
        };
        state.set_query(self.q.clone().unwrap_or_default());
        state.set_page(self.page.unwrap_or(0));
        state
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(|field| SortSpec {
                field: field.to_string(),
                direction: self.order.unwrap_or_default(),
            })
    }

    /// The case filter, ignoring blank values.
    pub fn case_filter(&self) -> Option<&str> {
        self.numero_caso
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use ambiental_core::search::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let state = RecordListParams::default().query_state();
        assert_eq!(state.page, 0);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(state.query.is_empty());
    }

    #[test]
    fn explicit_page_survives_query() {
        let params = RecordListParams {
            q: Some("si".into()),
            page: Some(2),
            page_size: Some(500),
            ..Default::default()
        };
        let state = params.query_state();
        assert_eq!(state.query, "si");
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn sort_defaults_to_descending() {
        let params = RecordListParams {
            sort: Some("fecha".into()),
            ..Default::default()
        };
        assert_eq!(
            params.sort_spec(),
            Some(SortSpec {
                field: "fecha".into(),
                direction: SortDirection::Desc
            })
        );
        assert!(RecordListParams::default().sort_spec().is_none());
    }

    #[test]
    fn blank_case_filter_is_ignored() {
        let params = RecordListParams {
            numero_caso: Some("  ".into()),
            ..Default::default()
        };
        assert!(params.case_filter().is_none());
    }
}
