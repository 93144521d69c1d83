//! Habit model: the tracked behavior, its recurrence rule, and its
//! completion history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod history;
pub mod schedule;

pub use history::{DayMark, History};
pub use schedule::Schedule;

use crate::error::ValidationError;

/// Theme tag for a habit. Display concern only; never consulted by the
/// scheduling or progress logic.
///
/// Serialized as the backend's legacy utility-class strings so existing
/// rows keep deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitColor {
    #[default]
    #[serde(rename = "bg-blue-500")]
    Ocean,
    #[serde(rename = "bg-green-500")]
    Forest,
    #[serde(rename = "bg-purple-500")]
    Royal,
    #[serde(rename = "bg-red-500")]
    Sunset,
    #[serde(rename = "bg-orange-500")]
    Warm,
    #[serde(rename = "bg-pink-500")]
    Rose,
    #[serde(rename = "bg-cyan-500")]
    Sky,
    #[serde(rename = "bg-amber-500")]
    Amber,
}

impl HabitColor {
    /// Hex value used for rendering.
    pub fn hex(&self) -> &'static str {
        match self {
            HabitColor::Ocean => "#3b82f6",
            HabitColor::Forest => "#22c55e",
            HabitColor::Royal => "#a855f7",
            HabitColor::Sunset => "#ef4444",
            HabitColor::Warm => "#f97316",
            HabitColor::Rose => "#ec4899",
            HabitColor::Sky => "#06b6d4",
            HabitColor::Amber => "#f59e0b",
        }
    }

    /// Theme name shown in pickers and accepted by the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            HabitColor::Ocean => "ocean",
            HabitColor::Forest => "forest",
            HabitColor::Royal => "royal",
            HabitColor::Sunset => "sunset",
            HabitColor::Warm => "warm",
            HabitColor::Rose => "rose",
            HabitColor::Sky => "sky",
            HabitColor::Amber => "amber",
        }
    }
}

impl std::str::FromStr for HabitColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ocean" => Ok(HabitColor::Ocean),
            "forest" => Ok(HabitColor::Forest),
            "royal" => Ok(HabitColor::Royal),
            "sunset" => Ok(HabitColor::Sunset),
            "warm" => Ok(HabitColor::Warm),
            "rose" => Ok(HabitColor::Rose),
            "sky" => Ok(HabitColor::Sky),
            "amber" => Ok(HabitColor::Amber),
            other => Err(ValidationError::InvalidValue {
                field: "color".to_string(),
                message: format!("unknown color theme '{other}'"),
            }),
        }
    }
}

/// A tracked habit as stored in the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: HabitColor,
    /// Calendar date the habit begins. Anchor for scheduling and the
    /// 90-day sprint window. Immutable after creation.
    pub created_at: NaiveDate,
    pub schedule: Schedule,
    #[serde(default)]
    pub history: History,
    /// Denormalized count of completed history entries, recomputed on
    /// every toggle and persisted with it.
    #[serde(default)]
    pub total_completions: u32,
}

impl Habit {
    /// Create a habit from a validated draft, with empty history and
    /// `created_at` anchored at `today`.
    pub fn create(draft: HabitDraft, user_id: &str, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: draft.name,
            color: draft.color,
            created_at: today,
            schedule: draft.schedule,
            history: History::new(),
            total_completions: 0,
        }
    }

    /// Whether this habit is due on `date`. Single entry point for all
    /// views and statistics.
    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        self.schedule.occurs_on(self.created_at, date)
    }

    /// Flip the completion entry for `date` and refresh
    /// `total_completions`. Returns the new completion state.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let completed = self.history.toggle(date);
        self.total_completions = self.history.completed_count();
        completed
    }
}

/// Validated habit-creation input.
///
/// [`HabitDraft::new`] is the only way to build one, so a draft always
/// carries a trimmed non-empty name and a normalized, valid schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitDraft {
    name: String,
    color: HabitColor,
    schedule: Schedule,
}

impl HabitDraft {
    /// Validate and normalize creation input.
    pub fn new(
        name: &str,
        color: HabitColor,
        schedule: Schedule,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".to_string(),
                message: "name must not be empty".to_string(),
            });
        }
        schedule.validate()?;
        Ok(Self {
            name: name.to_string(),
            color,
            schedule: schedule.normalized(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(schedule: Schedule) -> HabitDraft {
        HabitDraft::new("Read", HabitColor::Ocean, schedule).unwrap()
    }

    #[test]
    fn create_starts_empty_and_anchored() {
        let today = date(2024, 1, 1);
        let habit = Habit::create(draft(Schedule::EveryDay), "user-1", today);

        assert_eq!(habit.created_at, today);
        assert!(habit.history.is_empty());
        assert_eq!(habit.total_completions, 0);
        assert!(!habit.id.is_empty());
    }

    #[test]
    fn toggle_keeps_total_completions_in_sync() {
        let mut habit = Habit::create(draft(Schedule::EveryDay), "user-1", date(2024, 1, 1));

        assert!(habit.toggle(date(2024, 1, 1)));
        assert!(habit.toggle(date(2024, 1, 2)));
        assert_eq!(habit.total_completions, 2);

        assert!(!habit.toggle(date(2024, 1, 1)));
        assert_eq!(habit.total_completions, 1);
    }

    #[test]
    fn draft_rejects_blank_name() {
        let result = HabitDraft::new("   ", HabitColor::Forest, Schedule::EveryDay);
        assert!(result.is_err());
    }

    #[test]
    fn draft_rejects_empty_day_set() {
        let result = HabitDraft::new(
            "Stretch",
            HabitColor::Forest,
            Schedule::SpecificDays { days: vec![] },
        );
        assert!(result.is_err());
    }

    #[test]
    fn draft_normalizes_interval_one() {
        let draft = HabitDraft::new(
            "Walk",
            HabitColor::Sky,
            Schedule::EveryXDays { interval: 1 },
        )
        .unwrap();
        assert_eq!(*draft.schedule(), Schedule::EveryDay);
    }

    #[test]
    fn habit_serialization_round_trip() {
        let mut habit = Habit::create(
            draft(Schedule::SpecificDays { days: vec![1, 3, 5] }),
            "user-1",
            date(2024, 1, 1),
        );
        habit.toggle(date(2024, 1, 3));

        let json = serde_json::to_string(&habit).unwrap();
        assert!(json.contains(r#""color":"bg-blue-500""#));
        assert!(json.contains(r#""created_at":"2024-01-01""#));
        assert!(json.contains(r#""2024-01-03":"completed""#));

        let decoded: Habit = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, habit);
    }

    #[test]
    fn color_parsing_and_hex() {
        let color: HabitColor = "forest".parse().unwrap();
        assert_eq!(color, HabitColor::Forest);
        assert_eq!(color.hex(), "#22c55e");
        assert!("mauve".parse::<HabitColor>().is_err());
    }
}
