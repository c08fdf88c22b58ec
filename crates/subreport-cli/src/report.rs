//! The report pipeline: fetch, build, render.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use subreport_core::{DateWindow, ReportBuilder};
use subreport_fetch::{load_config_from, HttpSource, SubmissionQuery, SubmissionSource};
use subreport_render::{render_with, RenderOptions};

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub master_repo_owner: String,
    pub base_url: Option<String>,
    pub student: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub no_date_ranges: bool,
    pub config: Option<PathBuf>,
}

/// Resolve configuration, fetch over HTTP, and return the rendered report.
pub async fn execute(args: ReportArgs) -> Result<String> {
    let config = load_config_from(args.config.as_deref())?;
    let base_url = config.resolve_base_url(args.base_url.as_deref());

    let window = DateWindow::new(args.start_date, args.end_date)?;
    let builder = ReportBuilder::new(&args.master_repo_owner).with_window(window);
    let options = RenderOptions {
        show_date_ranges: config.show_date_ranges && !args.no_date_ranges,
        ..Default::default()
    };

    let query = match args.student {
        Some(student) => SubmissionQuery::one_student(args.master_repo_owner, student),
        None => SubmissionQuery::all_students(args.master_repo_owner),
    };

    let source = HttpSource::new(&base_url)?;
    generate(&source, &query, &builder, &options)
        .await
        .with_context(|| format!("failed to report submissions from {base_url}"))
}

/// Run one query through `source` and render the result.
pub async fn generate(
    source: &dyn SubmissionSource,
    query: &SubmissionQuery,
    builder: &ReportBuilder,
    options: &RenderOptions,
) -> Result<String> {
    let payload = source.fetch(query).await?;
    let report = builder.build(&payload)?;

    let summary = report.summary();
    info!(
        source = source.name(),
        owner = builder.master_repo_owner(),
        projects = summary.total_projects,
        students = summary.total_students,
        submissions = summary.total_submissions,
        "report built"
    );

    Ok(render_with(&report, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use subreport_core::ReportError;
    use subreport_fetch::{FetchError, MockSource};

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[tokio::test]
    async fn pipeline_renders_payload() {
        let source = MockSource::with_payload(json!({
            "success": true,
            "report": {"submissions": [{
                "project": "ios-app",
                "student": "john-doe",
                "title": "WK1",
                "url": "https://github.com/john-doe/ios-app/issues/1#issuecomment-123456",
                "is_valid": true,
                "location_owner": "john-doe",
                "submitted_at": "2024-01-01T00:00:00Z"
            }]}
        }));
        let query = SubmissionQuery::all_students("codepath");

        let text = generate(&source, &query, &ReportBuilder::new("codepath"), &options())
            .await
            .unwrap();
        assert!(text.contains("Project: ios-app"));
        assert!(text.contains("Location: own fork"));
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.last_query(), Some(query));
    }

    #[tokio::test]
    async fn fetch_errors_pass_through_unchanged() {
        let source = MockSource::failing(FetchError::Http {
            status: 503,
            body: "maintenance".into(),
        });
        let err = generate(
            &source,
            &SubmissionQuery::all_students("codepath"),
            &ReportBuilder::new("codepath"),
            &options(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<FetchError>(),
            Some(&FetchError::Http {
                status: 503,
                body: "maintenance".into()
            })
        );
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_is_reported() {
        let source = MockSource::with_payload(json!([{"student": "alice"}]));
        let err = generate(
            &source,
            &SubmissionQuery::all_students("codepath"),
            &ReportBuilder::new("codepath"),
            &options(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MalformedPayload { .. })
        ));
    }

    #[tokio::test]
    async fn reversed_dates_fail_before_fetching() {
        let args = ReportArgs {
            master_repo_owner: "codepath".into(),
            base_url: Some("http://127.0.0.1:1".into()),
            student: None,
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            no_date_ranges: false,
            config: None,
        };

        let err = execute(args).await.unwrap_err();
        assert!(err.to_string().contains("invalid date window"));
    }
}
