use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(IssueId);

/// Lifecycle state of an issue as reported by the server.
///
/// The three known states decode from their exact wire spelling; anything else is
/// carried verbatim in `Other` so it still renders and round-trips. A null or missing
/// status decodes as an empty `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum IssueStatus {
    Pending,
    InProgress,
    Resolved,
    Other(String),
}

impl IssueStatus {
    /// Statuses offered as filter choices, in display order.
    pub const KNOWN: [IssueStatus; 3] = [
        IssueStatus::Pending,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    pub fn as_wire(&self) -> &str {
        match self {
            IssueStatus::Pending => "pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for IssueStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => IssueStatus::Pending,
            "In Progress" => IssueStatus::InProgress,
            "resolved" => IssueStatus::Resolved,
            _ => IssueStatus::Other(raw),
        }
    }
}

impl From<Option<String>> for IssueStatus {
    fn from(raw: Option<String>) -> Self {
        Self::from(raw.unwrap_or_default())
    }
}

impl Default for IssueStatus {
    fn default() -> Self {
        IssueStatus::Other(String::new())
    }
}

impl From<IssueStatus> for String {
    fn from(status: IssueStatus) -> Self {
        match status {
            IssueStatus::Other(raw) => raw,
            known => known.as_wire().to_string(),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `date_of_issue` as sent by the server, parsed once on decode.
///
/// Values without a recognised date format keep their text and have no instant; they
/// order before every real date. Null or missing values decode as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct IssueDate {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl IssueDate {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_issue_date(raw.trim());
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }
}

impl From<String> for IssueDate {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<Option<String>> for IssueDate {
    fn from(raw: Option<String>) -> Self {
        Self::parse(raw.unwrap_or_default())
    }
}

impl From<IssueDate> for String {
    fn from(date: IssueDate) -> Self {
        date.raw
    }
}

impl fmt::Display for IssueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_issue_date(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub course_unit: String,
    #[serde(default)]
    pub date_of_issue: IssueDate,
    #[serde(default)]
    pub status: IssueStatus,
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn known_statuses_decode_from_exact_wire_spelling() {
        let decoded: Vec<IssueStatus> =
            serde_json::from_str(r#"["pending", "In Progress", "resolved"]"#).expect("decode");
        assert_eq!(decoded, IssueStatus::KNOWN.to_vec());
    }

    #[test]
    fn miscased_status_is_kept_as_other() {
        let decoded: IssueStatus = serde_json::from_str(r#""In progress""#).expect("decode");
        assert_eq!(decoded, IssueStatus::Other("In progress".to_string()));
        assert_ne!(decoded, IssueStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&decoded).expect("encode"),
            r#""In progress""#
        );
    }

    #[test]
    fn parses_plain_calendar_date_at_utc_midnight() {
        let date = IssueDate::parse("2024-02-05");
        let instant = date.instant().expect("parsed");
        assert_eq!((instant.year(), instant.month(), instant.day()), (2024, 2, 5));
        assert_eq!(instant.hour(), 0);
        assert_eq!(date.raw(), "2024-02-05");
    }

    #[test]
    fn parses_datetime_variants() {
        assert!(IssueDate::parse("2024-02-05T10:30:00Z").instant().is_some());
        assert!(IssueDate::parse("2024-02-05T10:30:00+03:00").instant().is_some());
        assert!(IssueDate::parse("2024-02-05T10:30:00.123").instant().is_some());
        assert!(IssueDate::parse("2024-02-05 10:30:00").instant().is_some());
    }

    #[test]
    fn unparseable_date_keeps_raw_text() {
        let date = IssueDate::parse("last tuesday");
        assert_eq!(date.instant(), None);
        assert_eq!(date.to_string(), "last tuesday");
        assert_eq!(IssueDate::parse("").instant(), None);
    }

    #[test]
    fn issue_decodes_and_ignores_unknown_fields() {
        let raw = r#"{
            "id": 7,
            "course_unit": "CS101",
            "date_of_issue": "2024-01-10",
            "status": "pending",
            "description": "missing marks"
        }"#;
        let issue: Issue = serde_json::from_str(raw).expect("decode");
        assert_eq!(issue.id, IssueId(7));
        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(issue.date_of_issue.raw(), "2024-01-10");
    }

    #[test]
    fn null_or_missing_date_and_status_keep_the_record() {
        let raw = r#"[
            {"id": 1, "course_unit": "CS101", "date_of_issue": "2024-01-10", "status": "pending"},
            {"id": 2, "course_unit": "MA201", "date_of_issue": null, "status": null},
            {"id": 3, "course_unit": "PH110"}
        ]"#;
        let issues: Vec<Issue> = serde_json::from_str(raw).expect("decode");
        assert_eq!(issues.len(), 3);

        for issue in &issues[1..] {
            assert_eq!(issue.date_of_issue.instant(), None);
            assert_eq!(issue.date_of_issue.raw(), "");
            assert_eq!(issue.status, IssueStatus::Other(String::new()));
        }
        assert!(issues[0].date_of_issue.instant().is_some());
    }
}
