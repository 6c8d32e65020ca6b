use client_core::FetchError;
use shared::domain::{IssueDate, IssueId};

use super::*;

fn issue(id: i64, course_unit: &str, status: &str, date: &str) -> Issue {
    Issue {
        id: IssueId(id),
        course_unit: course_unit.to_string(),
        date_of_issue: IssueDate::parse(date),
        status: IssueStatus::from(status.to_string()),
    }
}

fn loaded_tracker() -> IssueTracker {
    let mut tracker = IssueTracker::new();
    tracker.complete_load(Ok(vec![
        issue(1, "CS101", "pending", "2024-01-10"),
        issue(2, "MA201", "resolved", "2024-02-05"),
    ]));
    tracker
}

fn rendered(tracker: &IssueTracker) -> String {
    let mut buf = Vec::new();
    render_tracker(tracker, &mut buf).expect("render");
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn loading_state_shows_placeholder() {
    let text = rendered(&IssueTracker::new());
    assert!(text.starts_with("Issue Tracking\n"));
    assert!(text.contains("Loading issues..."));
}

#[test]
fn lists_newest_first_with_footer() {
    let text = rendered(&loaded_tracker());
    let ma = text.find("MA201").expect("MA201 row");
    let cs = text.find("CS101").expect("CS101 row");
    assert!(ma < cs, "newest issue should come first:\n{text}");
    assert!(text.contains("Showing 2 of 2 issues\n"));
    assert!(!text.contains("clear filters"));
    assert!(text.contains("Sort: ✓ Newest First / Oldest First"));
}

#[test]
fn search_only_offers_clear_but_no_filter_badge() {
    let mut tracker = loaded_tracker();
    tracker.set_search("cs");
    let text = rendered(&tracker);
    assert!(text.contains("Search: \"cs\" | Filter | Sort"));
    assert!(text.contains("Showing 1 of 2 issues | type 'clear' to clear filters"));
}

#[test]
fn active_filters_highlight_filter_button() {
    let mut tracker = loaded_tracker();
    tracker.set_sort(SortOrder::Oldest);
    let text = rendered(&tracker);
    assert!(text.contains("[Filter (1)]"));
    assert!(text.contains("Newest First / ✓ Oldest First"));
}

#[test]
fn filter_panel_marks_selected_status() {
    let mut tracker = loaded_tracker();
    tracker.toggle_filters();
    tracker.set_status(StatusFilter::Only(IssueStatus::Resolved));
    let text = rendered(&tracker);
    assert!(text.contains("Filter by Status"));
    assert!(text.contains("( ) All  ( ) Pending  ( ) In Progress  (*) Resolved"));
}

#[test]
fn empty_result_shows_empty_state() {
    let mut tracker = loaded_tracker();
    tracker.set_search("zzz");
    let text = rendered(&tracker);
    assert!(text.contains("No issues found matching your filters."));
    assert!(!text.contains("Showing"));
}

#[test]
fn failed_load_shows_empty_state() {
    let mut tracker = IssueTracker::new();
    tracker.complete_load(Err(FetchError::Status {
        status: 502,
        message: "Bad Gateway".to_string(),
    }));
    let text = rendered(&tracker);
    assert!(text.contains("No issues found matching your filters."));
}

#[test]
fn badge_shows_raw_status_with_tone_marker() {
    assert_eq!(status_badge(&IssueStatus::Resolved), "[+ resolved]");
    assert_eq!(status_badge(&IssueStatus::InProgress), "[~ In Progress]");
    assert_eq!(status_badge(&IssueStatus::Pending), "[! pending]");
    assert_eq!(
        status_badge(&IssueStatus::Other("Escalated".to_string())),
        "[? Escalated]"
    );
}

#[test]
fn row_carries_view_affordance() {
    let row = issue_row(&issue(7, "CS101", "pending", "2024-01-10"));
    assert!(row.starts_with("#7 "));
    assert!(row.contains("Date of Issue: 2024-01-10"));
    assert!(row.ends_with("(view 7)"));
}

#[test]
fn placeholder_is_replaced_once_the_load_completes() {
    let mut tracker = IssueTracker::with_filters(client_core::FilterState {
        search_term: "cs".to_string(),
        ..client_core::FilterState::default()
    });
    let before = rendered(&tracker);
    assert!(before.contains("Search: \"cs\""));
    assert!(before.contains("Loading issues..."));
    assert!(!before.contains("No issues found"));

    tracker.complete_load(Ok(vec![issue(1, "CS101", "pending", "2024-01-10")]));
    let after = rendered(&tracker);
    assert!(!after.contains("Loading issues..."));
    assert!(after.contains("CS101"));
}
