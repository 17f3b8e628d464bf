//! Request status shared by pickups and recycling requests.
//!
//! The status is a free-standing field: staff may move a request from any
//! status to any other. Only the vocabulary is enforced.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a pickup or recycling request.
///
/// Serialised exactly as the variant name, matching the stored TEXT value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Scheduled,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    /// The stored/serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Scheduled => "Scheduled",
            RequestStatus::Completed => "Completed",
            RequestStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: Pending, Scheduled, Completed, Cancelled"
                ))
            })
    }
}

/// Reject preferred dates before `today`.
pub fn validate_preferred_date(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if date < today {
        return Err(CoreError::Validation(format!(
            "preferred_date {date} is in the past"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in RequestStatus::ALL {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert!("pending".parse::<RequestStatus>().is_err());
        assert!("Done".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_variant_name() {
        let json = serde_json::to_string(&RequestStatus::Scheduled).unwrap();
        assert_eq!(json, "\"Scheduled\"");
        let back: RequestStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(back, RequestStatus::Cancelled);
    }

    #[test]
    fn preferred_date_today_is_allowed() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(validate_preferred_date(today, today).is_ok());
        assert!(validate_preferred_date(today.succ_opt().unwrap(), today).is_ok());
    }

    #[test]
    fn preferred_date_yesterday_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let err = validate_preferred_date(today.pred_opt().unwrap(), today).unwrap_err();
        assert!(err.to_string().contains("in the past"));
    }
}
