//! In-memory query engine: search, filter, sort and paginate.
//!
//! Operates on an already-fetched snapshot of UI-shape records and never
//! touches persistence. Every function here is pure: identical inputs give
//! identical outputs.

use std::borrow::Borrow;
use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tables::TableType;
use crate::types::{value_as_text, Record};
use crate::validation::dates::parse_date;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_SIZE: usize = 100;

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<usize>) -> usize {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Normalize raw query text: trimmed and lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a single field value matches a normalized query.
///
/// Matches when the lowercased value contains the whole query, or contains
/// every whitespace-separated token of it. Null and non-scalar values never
/// match.
fn field_matches(value: &Value, query: &str, tokens: &[&str]) -> bool {
    let Some(text) = value_as_text(value) else {
        return false;
    };
    let text = text.to_lowercase();
    text.contains(query) || tokens.iter().all(|token| text.contains(token))
}

/// Whether any of `fields` in `record` matches `query`.
///
/// An empty (or whitespace-only) query matches every record.
pub fn record_matches(record: &Record, fields: &[&str], query: &str) -> bool {
    let query = normalize_query(query);
    if query.is_empty() {
        return true;
    }
    let tokens: Vec<&str> = query.split_whitespace().collect();
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .any(|value| field_matches(value, &query, &tokens))
}

/// Free-text search over `fields`.
///
/// The result is always a subset of `records`, in the original order.
pub fn search<'a>(records: &'a [Record], query: &str, fields: &[&str]) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record_matches(record, fields, query))
        .collect()
}

/// Keep records whose `field` equals `expected` (compared as text, exact).
pub fn filter_eq<R: Borrow<Record>>(records: Vec<R>, field: &str, expected: &str) -> Vec<R> {
    records
        .into_iter()
        .filter(|record| {
            record
                .borrow()
                .get(field)
                .and_then(value_as_text)
                .is_some_and(|text| text == expected)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Field and direction for ordering a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Sortable form of one value. Kinds never interleave: numbers sort before
/// dates, dates before text.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl SortKey {
    fn classify(raw: &str) -> Self {
        if let Ok(n) = raw.trim().parse::<f64>() {
            return SortKey::Number(n);
        }
        if let Ok(d) = parse_date(raw) {
            return SortKey::Date(d);
        }
        SortKey::Text(raw.to_lowercase())
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Stable sort on one field.
///
/// Numbers compare numerically and dates chronologically (any accepted
/// layout); everything else compares as case-insensitive text. In a mixed
/// column numbers come first, then dates, then text. Records without a
/// value sort last in both directions.
pub fn sort_by_field<R: Borrow<Record>>(records: &mut [R], spec: &SortSpec) {
    let key = |r: &R| {
        r.borrow()
            .get(&spec.field)
            .and_then(value_as_text)
            .map(|text| SortKey::classify(&text))
    };
    records.sort_by(|a, b| {
        let (a, b) = (key(a), key(b));
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ord = a.total_cmp(&b);
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of results plus enough context to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Slice `items[page * page_size .. page * page_size + page_size]`.
///
/// Pages past the end are empty. A zero page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    Page {
        items: items[start..end].to_vec(),
        total,
        page,
        page_size,
        total_pages: total.div_ceil(page_size),
    }
}

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

/// Effective query and pagination position for one table view.
///
/// Changing the query or the page size sends the view back to page 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Replace the effective query. The page resets only when the query
    /// actually changes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 0;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = clamp_page_size(Some(page_size));
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

/// Search, optionally sort, then paginate a snapshot of `table` records.
pub fn run_query(
    table: TableType,
    records: &[Record],
    state: &QueryState,
    sort: Option<&SortSpec>,
) -> Page<Record> {
    let mut matched = search(records, &state.query, table.meta().search_fields);
    if let Some(spec) = sort {
        sort_by_field(&mut matched, spec);
    }
    let page = paginate(&matched, state.page, state.page_size);
    Page {
        items: page.items.into_iter().cloned().collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
