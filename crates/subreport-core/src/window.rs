//! Inclusive calendar-date filter for submissions.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ReportError;

/// Keeps submissions made between `start` and `end`, both inclusive.
///
/// An unbounded window keeps everything, including undated submissions. Once
/// either bound is set, undated submissions are dropped. Days are compared on
/// the UTC calendar, whatever offset the API sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ReportError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ReportError::InvalidWindow {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// A window that keeps every submission.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Whether a submission made at `at` falls inside the window.
    pub fn contains(&self, at: Option<DateTime<Utc>>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(at) = at else {
            return false;
        };
        let day = at.date_naive();
        self.start.map_or(true, |s| day >= s) && self.end.map_or(true, |e| day <= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, d).unwrap()
    }

    fn at(d: u32, h: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2023, 12, d, h, 0, 0).unwrap())
    }

    #[test]
    fn unbounded_keeps_everything() {
        let window = DateWindow::unbounded();
        assert!(window.contains(None));
        assert!(window.contains(at(1, 0)));
    }

    #[test]
    fn bounds_are_inclusive_by_day() {
        let window = DateWindow::new(Some(date(1)), Some(date(31))).unwrap();
        assert!(window.contains(at(1, 0)));
        assert!(window.contains(at(31, 23)));
        assert!(!window.contains(Some(Utc.with_ymd_and_hms(2023, 11, 30, 23, 59, 59).unwrap())));
        assert!(!window.contains(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())));
    }

    #[test]
    fn open_ended_windows() {
        let from = DateWindow::new(Some(date(10)), None).unwrap();
        assert!(!from.contains(at(9, 12)));
        assert!(from.contains(at(10, 0)));

        let until = DateWindow::new(None, Some(date(10))).unwrap();
        assert!(until.contains(at(10, 23)));
        assert!(!until.contains(at(11, 0)));
    }

    #[test]
    fn days_are_taken_in_utc() {
        let window = DateWindow::new(Some(date(1)), Some(date(31))).unwrap();
        // 2023-12-01 01:00 at +02:00 is still November in UTC.
        let local = DateTime::parse_from_rfc3339("2023-12-01T01:00:00+02:00").unwrap();
        assert!(!window.contains(Some(local.with_timezone(&Utc))));
    }

    #[test]
    fn bounded_window_drops_undated() {
        let window = DateWindow::new(Some(date(1)), None).unwrap();
        assert!(!window.contains(None));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let err = DateWindow::new(Some(date(31)), Some(date(1))).unwrap_err();
        assert!(err.to_string().contains("2023-12-31 is after end 2023-12-01"));
    }
}
