//! The submission source trait and the query it answers.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Path of the all-students endpoint.
pub const ALL_STUDENTS_PATH: &str = "/admin/fetch-student-submissions";
/// Path prefix of the single-student endpoint.
pub const ONE_STUDENT_PATH: &str = "/admin/fetch-student-submission";

/// What to fetch: every student, or just one, for a master repo owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionQuery {
    pub master_repo_owner: String,
    pub student: Option<String>,
}

impl SubmissionQuery {
    pub fn all_students(master_repo_owner: impl Into<String>) -> Self {
        Self {
            master_repo_owner: master_repo_owner.into(),
            student: None,
        }
    }

    pub fn one_student(master_repo_owner: impl Into<String>, student: impl Into<String>) -> Self {
        Self {
            master_repo_owner: master_repo_owner.into(),
            student: Some(student.into()),
        }
    }

    /// Endpoint path segments, without the base URL.
    pub fn path_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = match &self.student {
            Some(_) => ONE_STUDENT_PATH,
            None => ALL_STUDENTS_PATH,
        }
        .trim_start_matches('/')
        .split('/')
        .collect();
        if let Some(student) = &self.student {
            segments.push(student);
        }
        segments
    }

    /// Query-string parameters.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        vec![("master_repo_owner", self.master_repo_owner.as_str())]
    }
}

/// Anything that can answer a [`SubmissionQuery`] with a raw JSON payload.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Short name for logs (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the raw payload. Implementations make one attempt, no retries.
    async fn fetch(&self, query: &SubmissionQuery) -> Result<Value, FetchError>;
}
