//! Mock submission source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::source::{SubmissionQuery, SubmissionSource};

/// A source that answers every query with the same canned result.
pub struct MockSource {
    reply: Result<Value, FetchError>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last query received.
    last_query: Mutex<Option<SubmissionQuery>>,
}

impl MockSource {
    /// Always answer with `payload`.
    pub fn with_payload(payload: Value) -> Self {
        Self {
            reply: Ok(payload),
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self {
            reply: Err(error),
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_query(&self) -> Option<SubmissionQuery> {
        self.last_query
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SubmissionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &SubmissionQuery) -> Result<Value, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.clone());
        }
        self.reply.clone()
    }
}
