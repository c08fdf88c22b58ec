//! subreport CLI — fetch student submissions and print a grouped report.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(
    name = "subreport",
    version,
    about = "Fetch and format student submissions by project",
    after_help = "Examples:\n  \
        subreport --master-repo-owner codepath\n  \
        subreport --base-url https://www.zenocross.com \\\n      \
            --student jellyfishing2346 --master-repo-owner codepath\n  \
        subreport --master-repo-owner codepath --start-date 2023-12-01 --end-date 2023-12-31"
)]
struct Cli {
    /// Owner of the master (template) repository, e.g. "codepath"
    #[arg(long)]
    master_repo_owner: String,

    /// Base URL of the API [default: http://localhost:3000]
    #[arg(long)]
    base_url: Option<String>,

    /// Only fetch this student's submissions
    #[arg(long)]
    student: Option<String>,

    /// Keep submissions made on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Keep submissions made on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,

    /// Hide the per-student date range block
    #[arg(long)]
    no_date_ranges: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("subreport=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let args = report::ReportArgs {
        master_repo_owner: cli.master_repo_owner,
        base_url: cli.base_url,
        student: cli.student,
        start_date: cli.start_date,
        end_date: cli.end_date,
        no_date_ranges: cli.no_date_ranges,
        config: cli.config,
    };

    match report::execute(args).await {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
