//! Decoding of the submissions API payload.
//!
//! The API wraps its submission list in one of several envelopes depending on
//! the endpoint, and each record may carry either ready-made display fields
//! (`title`, `url`, `location_owner`) or the raw GitHub coordinates they are
//! derived from (`submission_type`, `issue_number`, `owner_name`, ...).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::model::Location;

/// Submission records pulled out of an envelope.
#[derive(Debug, Default)]
pub struct RecordSet {
    /// Student named by the envelope, used for records that omit their own.
    pub default_student: Option<String>,
    pub records: Vec<Value>,
}

/// Locate the submission list inside a payload.
///
/// Accepts a bare array, `{"report": {"submissions": [...]}}`,
/// `{"all_submissions": [...]}`, or `{"submissions": [...]}`. An envelope
/// with `"success": false` is rejected with its `error` message.
pub fn extract_records(payload: &Value) -> Result<RecordSet, ReportError> {
    let object = match payload {
        Value::Array(records) => {
            return Ok(RecordSet {
                default_student: None,
                records: records.clone(),
            })
        }
        Value::Object(object) => object,
        other => {
            return Err(ReportError::malformed_envelope(format!(
                "expected an array or object, got {}",
                json_kind(other)
            )))
        }
    };

    if object.get("success").and_then(Value::as_bool) == Some(false) {
        let message = object
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(ReportError::Rejected(message.to_string()));
    }

    let list = object
        .get("report")
        .and_then(|report| report.get("submissions"))
        .or_else(|| object.get("all_submissions"))
        .or_else(|| object.get("submissions"));

    let Some(list) = list else {
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        return Err(ReportError::malformed_envelope(format!(
            "no submissions list found (keys: {})",
            keys.join(", ")
        )));
    };

    let records = match list {
        Value::Array(records) => records.clone(),
        Value::Null => Vec::new(),
        other => {
            return Err(ReportError::malformed_envelope(format!(
                "submissions must be an array, got {}",
                json_kind(other)
            )))
        }
    };

    Ok(RecordSet {
        default_student: object
            .get("student")
            .and_then(Value::as_str)
            .map(str::to_string),
        records,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A numeric or textual identifier (comment ids are sometimes `"description"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

/// One record as sent by the API. Every field is optional here; required
/// fields are checked when the record is resolved.
#[derive(Debug, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub student: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub invalid_reason: Option<String>,
    #[serde(default)]
    pub validity_reasons: Option<Vec<String>>,
    #[serde(default)]
    pub location_owner: Option<String>,
    #[serde(default)]
    pub is_codepath_submission: Option<bool>,
    #[serde(default)]
    pub repo_type: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub submission_date: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub source_repository: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub submission_type: Option<String>,
    #[serde(default)]
    pub issue_number: Option<RawId>,
    #[serde(default)]
    pub issue_display: Option<String>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub comment_id: Option<RawId>,
    #[serde(default)]
    pub pr_number: Option<RawId>,
    #[serde(default)]
    pub pr_title: Option<String>,
    #[serde(default)]
    pub addressed_issues: Option<Vec<RawId>>,
}

/// Last path segment of an `owner/repo` string.
fn repo_segment(full: &str) -> Option<&str> {
    full.rsplit_once('/')
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
}

/// First path segment of an `owner/repo` string.
fn owner_segment(full: &str) -> Option<&str> {
    full.split_once('/')
        .map(|(owner, _)| owner)
        .filter(|owner| !owner.is_empty())
}

impl RawSubmission {
    /// Project id: explicit, else the repo name of the source repository
    /// (forks point back at it), else of the repository, else `repo_name`.
    pub fn project(&self) -> Option<String> {
        if let Some(project) = &self.project {
            return Some(project.clone());
        }
        self.source_repository
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.repository.as_deref())
            .and_then(repo_segment)
            .map(str::to_string)
            .or_else(|| self.repo_name.clone())
    }

    /// Owner of the repository the submission was made in.
    pub fn owner(&self) -> Option<String> {
        self.location_owner
            .clone()
            .or_else(|| self.owner_name.clone())
            .or_else(|| {
                self.repository
                    .as_deref()
                    .and_then(owner_segment)
                    .map(str::to_string)
            })
    }

    fn repo(&self) -> Option<String> {
        self.repo_name.clone().or_else(|| {
            self.repository
                .as_deref()
                .and_then(repo_segment)
                .map(str::to_string)
        })
    }

    /// Display title, derived from the submission type when not given.
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match self.submission_type.as_deref() {
            Some("COMMENT") => {
                let display = self
                    .issue_display
                    .clone()
                    .unwrap_or_else(|| match &self.issue_number {
                        Some(n) => format!("#{n}"),
                        None => "#?".to_string(),
                    });
                let issue_title = self.issue_title.as_deref().unwrap_or("Unknown");
                format!("{display} - {issue_title}")
            }
            Some("PULL_REQUEST") => {
                let number = self
                    .pr_number
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "?".to_string());
                let pr_title = self.pr_title.as_deref().unwrap_or("Unknown");
                format!("PR #{number} - {pr_title}")
            }
            _ => "Unknown".to_string(),
        }
    }

    /// Link to the submission, derived from GitHub coordinates when not given.
    pub fn url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        let owner = self.owner()?;
        let repo = self.repo()?;
        match self.submission_type.as_deref()? {
            "COMMENT" => {
                let issue = self.issue_number.as_ref()?;
                let comment = self.comment_id.as_ref()?;
                Some(format!(
                    "https://github.com/{owner}/{repo}/issues/{issue}#issuecomment-{comment}"
                ))
            }
            "PULL_REQUEST" => {
                let pr = self.pr_number.as_ref()?;
                Some(format!("https://github.com/{owner}/{repo}/pull/{pr}"))
            }
            _ => None,
        }
    }

    /// Reason text shown for invalid submissions.
    pub fn invalid_reason(&self) -> Option<String> {
        if let Some(reason) = &self.invalid_reason {
            return Some(reason.clone());
        }
        self.validity_reasons
            .as_ref()
            .filter(|reasons| !reasons.is_empty())
            .map(|reasons| reasons.join(", "))
    }

    /// Location declared by the API itself, for records without owner data.
    pub fn declared_location(&self) -> Option<Location> {
        if self.is_codepath_submission == Some(true) {
            return Some(Location::CodepathRepo);
        }
        match self.repo_type.as_deref() {
            Some("student_fork") => Some(Location::OwnFork),
            Some("codepath_repo") => Some(Location::CodepathRepo),
            _ => None,
        }
    }

    /// Addressed issues as display text; numeric ids are kept as written.
    pub fn addressed_issues(&self) -> Vec<String> {
        self.addressed_issues
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect()
    }

    /// Raw timestamp text, under either of its field names.
    pub fn timestamp(&self) -> Option<&str> {
        self.submitted_at
            .as_deref()
            .or(self.submission_date.as_deref())
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a submission timestamp.
///
/// Accepts RFC 3339, RFC 2822 (`Mon, 13 Oct 2025 14:10:42 GMT`), a naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.f]` (taken as UTC), or a bare `YYYY-MM-DD`
/// (midnight UTC). Offset timestamps are normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
