//! Plain-text rendering of the issue list.

use std::io::{self, Write};

use client_core::{status_tone, IssueTracker, SortOrder, StatusFilter, StatusTone};
use shared::domain::{Issue, IssueStatus};

const TITLE: &str = "Issue Tracking";
const EMPTY_STATE: &str = "No issues found matching your filters.";
const CLEAR_HINT: &str = "type 'clear' to clear filters";

pub fn render_tracker<W: Write>(tracker: &IssueTracker, out: &mut W) -> io::Result<()> {
    render_header(tracker, out)?;
    if tracker.filters_visible() {
        render_filter_panel(tracker, out)?;
    }
    writeln!(out)?;

    if tracker.is_loading() {
        writeln!(out, "Loading issues...")?;
        return Ok(());
    }

    if tracker.issues().is_empty() {
        writeln!(out, "{EMPTY_STATE}")?;
        writeln!(out, "({CLEAR_HINT})")?;
        return Ok(());
    }

    for issue in tracker.issues() {
        writeln!(out, "{}", issue_row(issue))?;
    }

    if let Some(summary) = tracker.summary() {
        writeln!(out)?;
        if tracker.has_active_filters() {
            writeln!(out, "{summary} | {CLEAR_HINT}")?;
        } else {
            writeln!(out, "{summary}")?;
        }
    }
    Ok(())
}

fn render_header<W: Write>(tracker: &IssueTracker, out: &mut W) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;

    let filters = tracker.filters();
    let search = if filters.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", filters.search_term)
    };

    let mut filter_button = String::from("Filter");
    if tracker.active_filter_count() > 0 {
        filter_button.push_str(&format!(" ({})", tracker.active_filter_count()));
    }
    if tracker.filter_button_highlighted() {
        filter_button = format!("[{filter_button}]");
    }

    let sort_menu = SortOrder::ALL
        .iter()
        .map(|order| checked(*order == filters.sort_by, order.label()))
        .collect::<Vec<_>>()
        .join(" / ");

    writeln!(out, "Search: {search} | {filter_button} | Sort: {sort_menu}")
}

fn render_filter_panel<W: Write>(tracker: &IssueTracker, out: &mut W) -> io::Result<()> {
    writeln!(out, "Filter by Status ({CLEAR_HINT})")?;
    let chips = StatusFilter::choices()
        .iter()
        .map(|choice| {
            let selected = *choice == tracker.filters().status_filter;
            if selected {
                format!("(*) {}", choice.label())
            } else {
                format!("( ) {}", choice.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "  {chips}")
}

fn checked(selected: bool, label: &str) -> String {
    if selected {
        format!("✓ {label}")
    } else {
        label.to_string()
    }
}

pub fn issue_row(issue: &Issue) -> String {
    format!(
        "#{:<5} {:<24} Date of Issue: {:<12} {}  (view {})",
        issue.id.0,
        issue.course_unit,
        issue.date_of_issue.raw(),
        status_badge(&issue.status),
        issue.id
    )
}

pub fn status_badge(status: &IssueStatus) -> String {
    let marker = match status_tone(status) {
        StatusTone::Green => '+',
        StatusTone::Yellow => '~',
        StatusTone::Red => '!',
        StatusTone::Gray => '?',
    };
    format!("[{marker} {}]", status.as_wire())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
