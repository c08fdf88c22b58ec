//! Turns a raw API payload into a grouped [`Report`].
//!
//! Projects and students are grouped in lexicographic order of their ids, so
//! the result does not depend on the order records arrive in. Within a
//! student, submissions are stable-sorted by `submitted_at`; undated ones come
//! first and ties keep payload order.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::model::{Location, ProjectGroup, Report, StudentGroup, Submission};
use crate::payload::{extract_records, parse_timestamp, RawSubmission};
use crate::window::DateWindow;

/// Classify where a submission was made.
///
/// The owner is compared case-sensitively, first against the student and then
/// against the master repo owner. A missing owner is [`Location::Other`].
pub fn classify_location(
    owner: Option<&str>,
    student: &str,
    master_repo_owner: &str,
) -> Location {
    match owner {
        Some(owner) if owner == student => Location::OwnFork,
        Some(owner) if owner == master_repo_owner => Location::CodepathRepo,
        _ => Location::Other,
    }
}

/// Builds reports for one master repository owner.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    master_repo_owner: String,
    window: DateWindow,
}

/// A record resolved into its grouping keys and display form.
struct Resolved {
    project: String,
    student: String,
    submission: Submission,
}

impl ReportBuilder {
    pub fn new(master_repo_owner: impl Into<String>) -> Self {
        Self {
            master_repo_owner: master_repo_owner.into(),
            window: DateWindow::unbounded(),
        }
    }

    /// Only keep submissions inside `window`.
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn master_repo_owner(&self) -> &str {
        &self.master_repo_owner
    }

    /// Build a report from a raw payload.
    pub fn build(&self, payload: &Value) -> Result<Report, ReportError> {
        let set = extract_records(payload)?;
        debug!(records = set.records.len(), "decoding submission records");

        let mut by_project: BTreeMap<String, BTreeMap<String, Vec<Submission>>> = BTreeMap::new();
        let mut skipped = 0usize;

        for (index, record) in set.records.iter().enumerate() {
            let resolved = self.resolve(index, record, set.default_student.as_deref())?;

            if !self.window.contains(resolved.submission.submitted_at) {
                skipped += 1;
                continue;
            }

            by_project
                .entry(resolved.project)
                .or_default()
                .entry(resolved.student)
                .or_default()
                .push(resolved.submission);
        }

        if skipped > 0 {
            debug!(skipped, "submissions outside the date window");
        }

        let projects = by_project
            .into_iter()
            .map(|(project, students)| ProjectGroup {
                project,
                students: students
                    .into_iter()
                    .map(|(student, mut submissions)| {
                        submissions.sort_by_key(|s| s.submitted_at);
                        StudentGroup {
                            student,
                            submissions,
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(Report::from_projects(projects))
    }

    fn resolve(
        &self,
        index: usize,
        record: &Value,
        default_student: Option<&str>,
    ) -> Result<Resolved, ReportError> {
        if !record.is_object() {
            return Err(ReportError::malformed(index, "expected an object"));
        }
        let raw: RawSubmission = serde_json::from_value(record.clone())
            .map_err(|e| ReportError::malformed(index, e.to_string()))?;

        let project = raw
            .project()
            .ok_or_else(|| ReportError::malformed(index, "missing project"))?;
        let student = raw
            .student
            .clone()
            .or_else(|| default_student.map(str::to_string))
            .ok_or_else(|| ReportError::malformed(index, "missing field `student`"))?;
        let url = raw
            .url()
            .ok_or_else(|| ReportError::malformed(index, "missing field `url`"))?;
        let is_valid = raw
            .is_valid
            .ok_or_else(|| ReportError::malformed(index, "missing field `is_valid`"))?;

        let submitted_at = raw.timestamp().and_then(|text| {
            let parsed = parse_timestamp(text);
            if parsed.is_none() {
                warn!(index, timestamp = text, "unrecognised timestamp, treating as undated");
            }
            parsed
        });

        // Owner data wins; the API's own location flags only fill the gap.
        let location = match raw.owner() {
            Some(owner) => {
                classify_location(Some(owner.as_str()), &student, &self.master_repo_owner)
            }
            None => raw.declared_location().unwrap_or(Location::Other),
        };
        debug!(index, %project, %student, %location, "resolved submission");

        Ok(Resolved {
            submission: Submission {
                title: raw.title(),
                url,
                is_valid,
                invalid_reason: raw.invalid_reason(),
                location,
                submitted_at,
                repository: raw.repository.clone(),
                addressed_issues: raw.addressed_issues(),
            },
            project,
            student,
        })
    }
}

/// Build a report with an unbounded date window.
pub fn build_report(payload: &Value, master_repo_owner: &str) -> Result<Report, ReportError> {
    ReportBuilder::new(master_repo_owner).build(payload)
}
