//! Client-side filtering and ordering of the loaded issue set.

use std::{cmp::Reverse, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use shared::domain::{Issue, IssueStatus};

use crate::error::ParseFilterError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(IssueStatus),
}

impl StatusFilter {
    /// Filter choices in display order, `All` first.
    pub fn choices() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(IssueStatus::KNOWN.into_iter().map(StatusFilter::Only))
            .collect()
    }

    pub fn matches(&self, status: &IssueStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Only(IssueStatus::Pending)),
            "in progress" => Ok(StatusFilter::Only(IssueStatus::InProgress)),
            "resolved" => Ok(StatusFilter::Only(IssueStatus::Resolved)),
            _ => Err(ParseFilterError::Status(value.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Newest, SortOrder::Oldest];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(ParseFilterError::Sort(value.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The user's current search, status and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort_by: SortOrder,
}

impl FilterState {
    /// Non-default fields among status and sort. The search term is not counted.
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.status_filter != StatusFilter::All)
            + usize::from(self.sort_by != SortOrder::Newest)
    }

    /// True when any of search, status or sort differs from its initial value.
    pub fn is_modified(&self) -> bool {
        !self.search_term.is_empty() || self.active_filter_count() > 0
    }

    fn matches_search(&self, issue: &Issue) -> bool {
        self.search_term.is_empty()
            || issue
                .course_unit
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }
}

/// Filters `source` by search term and status, then orders it by issue date.
///
/// The sort is stable, so issues sharing a date keep their source order. Dates that
/// failed to parse rank below every real date: last for `Newest`, first for `Oldest`.
pub fn derive(source: &[Issue], state: &FilterState) -> Vec<Issue> {
    let mut issues: Vec<Issue> = source
        .iter()
        .filter(|issue| state.matches_search(issue))
        .filter(|issue| state.status_filter.matches(&issue.status))
        .cloned()
        .collect();

    match state.sort_by {
        SortOrder::Newest => issues.sort_by_key(|issue| Reverse(sort_key(issue))),
        SortOrder::Oldest => issues.sort_by_key(sort_key),
    }

    issues
}

fn sort_key(issue: &Issue) -> Option<DateTime<Utc>> {
    issue.date_of_issue.instant()
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
