//! Issue list state: the loaded source set, the user's filter selection and the derived view.

use shared::{
    domain::{Issue, IssueId, IssueStatus},
    protocol::issue_detail_route,
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{FetchError, TrackerError},
    filter::{derive, FilterState, SortOrder, StatusFilter},
    IssueSource,
};

/// A user action against the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetSearch(String),
    SetStatus(StatusFilter),
    SetSort(SortOrder),
    ClearAll,
    ToggleFilters,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SetSearch(_) => "set_search",
            Intent::SetStatus(_) => "set_status",
            Intent::SetSort(_) => "set_sort",
            Intent::ClearAll => "clear_all",
            Intent::ToggleFilters => "toggle_filters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

/// Badge colour for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Green,
    Yellow,
    Red,
    Gray,
}

pub fn status_tone(status: &IssueStatus) -> StatusTone {
    match status {
        IssueStatus::Resolved => StatusTone::Green,
        IssueStatus::InProgress => StatusTone::Yellow,
        IssueStatus::Pending => StatusTone::Red,
        IssueStatus::Other(_) => StatusTone::Gray,
    }
}

/// Receives the detail route when the user opens an issue.
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

#[derive(Debug, Clone)]
pub struct IssueTracker {
    load_state: LoadState,
    all_issues: Vec<Issue>,
    issues: Vec<Issue>,
    filters: FilterState,
    show_filters: bool,
}

impl Default for IssueTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueTracker {
    pub fn new() -> Self {
        Self::with_filters(FilterState::default())
    }

    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            load_state: LoadState::Loading,
            all_issues: Vec::new(),
            issues: Vec::new(),
            filters,
            show_filters: false,
        }
    }

    /// Fetches the issue collection once. Later calls are ignored.
    pub async fn load<S>(&mut self, source: &S)
    where
        S: IssueSource + ?Sized,
    {
        if self.load_state != LoadState::Loading {
            warn!("issue collection already fetched; ignoring repeated load");
            return;
        }
        let outcome = source.fetch_issues().await;
        self.complete_load(outcome);
    }

    /// Publishes a fetch result. Failures are logged and leave the list empty.
    pub fn complete_load(&mut self, outcome: Result<Vec<Issue>, FetchError>) {
        if self.load_state != LoadState::Loading {
            warn!("issue collection already fetched; ignoring repeated load");
            return;
        }
        match outcome {
            Ok(issues) => {
                info!(count = issues.len(), "loaded issues");
                self.all_issues = issues;
                self.load_state = LoadState::Loaded;
                self.rederive();
            }
            Err(err) => {
                error!(error = %err, "error fetching issues");
                self.load_state = LoadState::Failed;
            }
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        debug!(intent = intent.name(), "applying intent");
        match intent {
            Intent::SetSearch(text) => self.filters.search_term = text,
            Intent::SetStatus(status) => self.filters.status_filter = status,
            Intent::SetSort(order) => self.filters.sort_by = order,
            Intent::ClearAll => self.filters = FilterState::default(),
            Intent::ToggleFilters => {
                self.show_filters = !self.show_filters;
                return;
            }
        }
        self.rederive();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.apply(Intent::SetSearch(text.into()));
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.apply(Intent::SetStatus(status));
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.apply(Intent::SetSort(order));
    }

    pub fn clear_all(&mut self) {
        self.apply(Intent::ClearAll);
    }

    pub fn toggle_filters(&mut self) {
        self.apply(Intent::ToggleFilters);
    }

    fn rederive(&mut self) {
        self.issues = derive(&self.all_issues, &self.filters);
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn all_issues(&self) -> &[Issue] {
        &self.all_issues
    }

    /// The filtered and sorted issues to render.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_visible(&self) -> bool {
        self.show_filters
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_filter_count()
    }

    pub fn filter_button_highlighted(&self) -> bool {
        self.show_filters || self.active_filter_count() > 0
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_modified()
    }

    /// Footer text, present only while the derived view is non-empty.
    pub fn summary(&self) -> Option<String> {
        if self.issues.is_empty() {
            return None;
        }
        Some(format!(
            "Showing {} of {} issues",
            self.issues.len(),
            self.all_issues.len()
        ))
    }

    /// Sends the detail route of a listed issue to `navigator`.
    pub fn open_issue<N>(&self, issue_id: IssueId, navigator: &mut N) -> Result<(), TrackerError>
    where
        N: Navigator + ?Sized,
    {
        if !self.issues.iter().any(|issue| issue.id == issue_id) {
            return Err(TrackerError::UnknownIssue(issue_id));
        }
        navigator.navigate(&issue_detail_route(issue_id));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
