//! Core data model for submission reports.
//!
//! A [`Report`] is a read-only grouping of [`Submission`]s by project and then
//! by student. Its [`Summary`] is derived when the report is constructed and
//! cannot be changed afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a submission was made, relative to the submitting student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The repository is owned by the student.
    OwnFork,
    /// The repository is owned by the master repo owner.
    CodepathRepo,
    /// Anything else, including records with no known owner.
    Other,
}

impl Location {
    /// The label printed in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Location::OwnFork => "own fork",
            Location::CodepathRepo => "codepath repo",
            Location::Other => "other",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single student submission, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Human-readable title (issue or pull request).
    pub title: String,
    /// Link to the submission.
    pub url: String,
    /// Validity as computed upstream.
    pub is_valid: bool,
    /// Why the submission is invalid, when the API says so.
    #[serde(default)]
    pub invalid_reason: Option<String>,
    /// Where the submission was made.
    pub location: Location,
    /// When the submission was made, if known.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// `owner/repo` of the repository the submission was made against.
    #[serde(default)]
    pub repository: Option<String>,
    /// Issues this submission claims to address.
    #[serde(default)]
    pub addressed_issues: Vec<String>,
}

/// All submissions of one student within one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGroup {
    pub student: String,
    /// Ordered ascending by `submitted_at`.
    pub submissions: Vec<Submission>,
}

/// All student groups of one project, ordered by student id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectGroup {
    pub project: String,
    pub students: Vec<StudentGroup>,
}

/// Summary counters, always derived from the grouping structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_projects: usize,
    /// Distinct student ids across all projects.
    pub total_students: usize,
    pub total_submissions: usize,
}

/// Date range of one student's dated submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentActivity {
    pub student: String,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub count: usize,
}

/// A complete, read-only submission report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    projects: Vec<ProjectGroup>,
    summary: Summary,
}

impl Report {
    /// Build a report from already-grouped projects, deriving the summary.
    pub fn from_projects(projects: Vec<ProjectGroup>) -> Self {
        let summary = derive_summary(&projects);
        Self { projects, summary }
    }

    /// A report with no projects.
    pub fn empty() -> Self {
        Self::from_projects(Vec::new())
    }

    pub fn projects(&self) -> &[ProjectGroup] {
        &self.projects
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Iterate every submission together with its project and student ids.
    pub fn submissions(&self) -> impl Iterator<Item = (&str, &str, &Submission)> {
        self.projects.iter().flat_map(|p| {
            p.students.iter().flat_map(move |s| {
                s.submissions
                    .iter()
                    .map(move |sub| (p.project.as_str(), s.student.as_str(), sub))
            })
        })
    }

    /// Per-student date ranges over dated submissions, sorted by student.
    ///
    /// Students with no dated submissions are omitted.
    pub fn student_activity(&self) -> Vec<StudentActivity> {
        let mut ranges: BTreeMap<&str, StudentActivity> = BTreeMap::new();

        for (_, student, submission) in self.submissions() {
            let Some(at) = submission.submitted_at else {
                continue;
            };
            let day = at.date_naive();
            let entry = ranges.entry(student).or_insert_with(|| StudentActivity {
                student: student.to_string(),
                earliest: day,
                latest: day,
                count: 0,
            });
            entry.count += 1;
            entry.earliest = entry.earliest.min(day);
            entry.latest = entry.latest.max(day);
        }

        ranges.into_values().collect()
    }
}

fn derive_summary(projects: &[ProjectGroup]) -> Summary {
    let mut students = BTreeSet::new();
    let mut total_submissions = 0;

    for project in projects {
        for group in &project.students {
            students.insert(group.student.as_str());
            total_submissions += group.submissions.len();
        }
    }

    Summary {
        total_projects: projects.len(),
        total_students: students.len(),
        total_submissions,
    }
}
