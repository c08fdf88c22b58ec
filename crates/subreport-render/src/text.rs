//! Plain-text report renderer.
//!
//! Produces the banner, the summary block, an optional per-student date range
//! block, and one section per project. Output is a pure function of the
//! [`Report`] and [`RenderOptions`].

use std::fmt::Write;

use chrono::SecondsFormat;

use subreport_core::{Report, StudentActivity, StudentGroup, Submission};

pub const VALID_LABEL: &str = "✅ VALID";
pub const INVALID_LABEL: &str = "❌ INVALID";

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width of the `=` and `-` rules.
    pub width: usize,
    /// Include the per-student date range block.
    pub show_date_ranges: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            show_date_ranges: true,
        }
    }
}

/// Render a report with default options.
pub fn render(report: &Report) -> String {
    render_with(report, &RenderOptions::default())
}

/// Render a report.
pub fn render_with(report: &Report, options: &RenderOptions) -> String {
    let heavy = "=".repeat(options.width);
    let light = "-".repeat(options.width);
    let mut out = String::new();

    let summary = report.summary();
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "📊 STUDENT SUBMISSIONS SUMMARY");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "Total Projects: {}", summary.total_projects);
    let _ = writeln!(out, "Total Students: {}", summary.total_students);
    let _ = writeln!(out, "Total Submissions: {}", summary.total_submissions);
    let _ = writeln!(out);

    if options.show_date_ranges {
        let activity = report.student_activity();
        if !activity.is_empty() {
            let _ = writeln!(out, "📅 STUDENT DATE RANGES");
            let _ = writeln!(out, "{light}");
            for entry in &activity {
                let _ = writeln!(out, "{}", activity_line(entry));
            }
            let _ = writeln!(out);
        }
    }

    if report.is_empty() {
        let _ = writeln!(out, "No submissions found.");
        let _ = writeln!(out);
    }

    for project in report.projects() {
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "📦 Project: {}", project.project);
        let _ = writeln!(out, "{heavy}");

        for group in &project.students {
            render_student(&mut out, group, &light);
        }

        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{heavy}");
    out
}

fn activity_line(entry: &StudentActivity) -> String {
    let plural = if entry.count == 1 { "" } else { "s" };
    let earliest = entry.earliest.format("%Y-%m-%d");
    if entry.earliest == entry.latest {
        format!(
            "👤 {}: {earliest} ({} submission{plural})",
            entry.student, entry.count
        )
    } else {
        format!(
            "👤 {}: {earliest} to {} ({} submission{plural})",
            entry.student,
            entry.latest.format("%Y-%m-%d"),
            entry.count
        )
    }
}

fn render_student(out: &mut String, group: &StudentGroup, rule: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "👤 Student: {}", group.student);
    let _ = writeln!(out, "{rule}");

    for (idx, submission) in group.submissions.iter().enumerate() {
        render_submission(out, idx + 1, submission);
    }
}

fn render_submission(out: &mut String, ordinal: usize, submission: &Submission) {
    let status = if submission.is_valid {
        VALID_LABEL
    } else {
        INVALID_LABEL
    };
    // Timestamps are held in UTC, so offsets from the API print as `Z`.
    let date = submission
        .submitted_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "N/A".to_string());

    let _ = writeln!(out, "{ordinal}. {}", submission.title);
    if let Some(repository) = &submission.repository {
        let _ = writeln!(out, "   Repository: {repository}");
    }
    let _ = writeln!(out, "   Location: {}", submission.location.label());
    let _ = writeln!(out, "   Status: {status}");
    let _ = writeln!(out, "   Date: {date}");
    let _ = writeln!(out, "   URL: {}", submission.url);

    if !submission.is_valid {
        if let Some(reason) = &submission.invalid_reason {
            let _ = writeln!(out, "   ⚠️  Reasons: {reason}");
        }
    }

    if !submission.addressed_issues.is_empty() {
        let _ = writeln!(
            out,
            "   🎯 Addresses: {}",
            submission.addressed_issues.join(", ")
        );
    }

    let _ = writeln!(out);
}
