//! Recurrence rules and the schedule evaluator.
//!
//! A habit carries exactly one [`Schedule`] fixed at creation. The single
//! source of truth for "is this habit due on this date" is
//! [`Schedule::occurs_on`]; every view and statistic goes through it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Recurrence rule for a habit.
///
/// Wire format matches the backend rows:
/// `{"type":"every_day"}`, `{"type":"specific_days","days":[1,3,5]}`,
/// `{"type":"every_x_days","interval":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    /// Due every calendar day.
    EveryDay,
    /// Due on fixed days of the week. 0=Sun ... 6=Sat, sorted, non-empty.
    SpecificDays { days: Vec<u8> },
    /// Due on the anchor date and every `interval`-th day after it.
    EveryXDays { interval: u32 },
}

impl Schedule {
    /// Validate the rule's invariants.
    ///
    /// Runs at habit creation; the evaluator assumes a valid rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Schedule::EveryDay => Ok(()),
            Schedule::SpecificDays { days } => {
                if days.is_empty() {
                    return Err(ValidationError::EmptyCollection(
                        "schedule days".to_string(),
                    ));
                }
                if let Some(day) = days.iter().find(|d| **d > 6) {
                    return Err(ValidationError::InvalidValue {
                        field: "schedule.days".to_string(),
                        message: format!("weekday index {day} out of range 0-6"),
                    });
                }
                Ok(())
            }
            Schedule::EveryXDays { interval } => {
                if *interval < 1 {
                    return Err(ValidationError::InvalidValue {
                        field: "schedule.interval".to_string(),
                        message: "interval must be at least 1 day".to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Canonical form: an interval of 1 is stored as `EveryDay`, and
    /// weekday sets are sorted and deduplicated.
    pub fn normalized(self) -> Self {
        match self {
            Schedule::EveryXDays { interval: 1 } => Schedule::EveryDay,
            Schedule::SpecificDays { mut days } => {
                days.sort_unstable();
                days.dedup();
                Schedule::SpecificDays { days }
            }
            other => other,
        }
    }

    /// Whether `date` is a scheduled occurrence of this rule anchored at
    /// `anchor` (the habit's creation date).
    ///
    /// Dates before the anchor are never scheduled, for every variant.
    /// Differences are taken in calendar days, so the result is immune to
    /// DST transitions and time-of-day noise.
    pub fn occurs_on(&self, anchor: NaiveDate, date: NaiveDate) -> bool {
        if date < anchor {
            return false;
        }
        match self {
            Schedule::EveryDay => true,
            Schedule::SpecificDays { days } => {
                days.contains(&(date.weekday().num_days_from_sunday() as u8))
            }
            Schedule::EveryXDays { interval } => {
                let days_diff = (date - anchor).num_days();
                days_diff % i64::from(*interval) == 0
            }
        }
    }

    /// Short human-readable description, e.g. for list output.
    pub fn describe(&self) -> String {
        match self {
            Schedule::EveryDay => "every day".to_string(),
            Schedule::SpecificDays { days } => {
                if days.len() == 7 {
                    "every day".to_string()
                } else {
                    format!("{} days per week", days.len())
                }
            }
            Schedule::EveryXDays { interval } => format!("every {interval} days"),
        }
    }
}
