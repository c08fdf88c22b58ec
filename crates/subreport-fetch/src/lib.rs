//! subreport-fetch — where submission payloads come from.
//!
//! Defines the `SubmissionSource` trait, the HTTP implementation that talks
//! to the admin API, a mock for tests, and the reporter configuration file.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod source;

pub use config::{load_config_from, ReporterConfig};
pub use error::FetchError;
pub use http::{HttpSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use mock::MockSource;
pub use source::{SubmissionQuery, SubmissionSource};
