//! subreport-core — submission report model and builder.
//!
//! Decodes the submissions API payload, classifies where each submission was
//! made, and groups submissions by project and student into a read-only
//! [`Report`] with derived summary counters.

pub mod builder;
pub mod error;
pub mod model;
pub mod payload;
pub mod window;

pub use builder::{build_report, classify_location, ReportBuilder};
pub use error::ReportError;
pub use model::{Location, ProjectGroup, Report, StudentActivity, StudentGroup, Submission, Summary};
pub use window::DateWindow;
