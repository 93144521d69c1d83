//! Period rollups: reshaping per-day evaluator and aggregator results
//! into the buckets a view renders.
//!
//! This layer owns no counting rules of its own. Cells classify single
//! dates through [`Habit::is_scheduled`] and the history; every
//! whole-period total goes through [`range_progress`] /
//! [`sprint_progress`], so future dates are excluded from totals exactly
//! as they are everywhere else.
//!
//! Cells and totals answer different questions: a cell's `scheduled`
//! count includes future dates (a week or month view shows upcoming
//! load), while totals are clamped to `today`.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::progress::{
    self, day_status, range_progress, sprint_progress, DayStatus, SprintProgress, SPRINT_DAYS,
};

/// Reporting horizon selected by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Week,
    Month,
    Sprint,
    Year,
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" | "today" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "sprint" => Ok(Period::Sprint),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period '{other}'")),
        }
    }
}

/// Cross-habit scheduled/completed counts for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Habits due on this date.
    pub scheduled: u32,
    /// Habits due and completed on this date.
    pub completed: u32,
}

/// One habit's status on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDay {
    pub id: String,
    pub name: String,
    pub status: DayStatus,
}

/// Single-date view: counts plus per-habit statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRollup {
    pub date: NaiveDate,
    pub scheduled: u32,
    pub completed: u32,
    pub habits: Vec<HabitDay>,
}

/// Seven cells starting the Sunday of the reference date's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRollup {
    pub start: NaiveDate,
    pub days: Vec<DayCell>,
}

/// Calendar-grid month view: cells padded to whole Sunday-started weeks,
/// plus in-month totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRollup {
    pub year: i32,
    pub month: u32,
    /// Grid cells including leading/trailing days of adjacent months.
    pub cells: Vec<DayCell>,
    /// In-month totals, clamped to `today`.
    pub completed: u32,
    pub scheduled: u32,
    pub percentage: u8,
}

/// One habit's sprint summary inside a [`SprintRollup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSprint {
    pub id: String,
    pub name: String,
    pub progress: SprintProgress,
}

/// Cross-habit sprint overview. Sprint windows are per-habit (each is
/// anchored at its own creation date), so per-habit summaries are
/// computed first and then aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintRollup {
    pub habits: Vec<HabitSprint>,
    pub total_completed: u32,
    pub total_scheduled: u32,
    /// Best in-sprint streak across all habits.
    pub best_streak: u32,
    /// Fewest days left across all habits; 90 when there are none.
    pub min_days_left: u32,
}

/// Completed/scheduled counts for one month of a year view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: u32,
    pub completed: u32,
    pub scheduled: u32,
    pub percentage: u8,
}

/// Twelve monthly buckets plus year totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRollup {
    pub year: i32,
    pub months: Vec<MonthBucket>,
    pub completed: u32,
    pub scheduled: u32,
    pub percentage: u8,
}

/// Bucketed structure for one period kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum Rollup {
    Day(DayRollup),
    Week(WeekRollup),
    Month(MonthRollup),
    Sprint(SprintRollup),
    Year(YearRollup),
}

/// Build the rollup a view needs for `period` around `reference`.
pub fn build(habits: &[Habit], reference: NaiveDate, period: Period, today: NaiveDate) -> Rollup {
    match period {
        Period::Day => Rollup::Day(day_summary(habits, reference, today)),
        Period::Week => Rollup::Week(week_row(habits, reference)),
        Period::Month => Rollup::Month(month_grid(habits, reference, today)),
        Period::Sprint => Rollup::Sprint(sprint_overview(habits, today)),
        Period::Year => Rollup::Year(year_by_month(habits, reference.year(), today)),
    }
}

/// Counts and per-habit statuses for a single date.
pub fn day_summary(habits: &[Habit], date: NaiveDate, today: NaiveDate) -> DayRollup {
    let cell = day_cell(habits, date);
    let statuses = habits
        .iter()
        .map(|h| HabitDay {
            id: h.id.clone(),
            name: h.name.clone(),
            status: day_status(h, date, today),
        })
        .collect();
    DayRollup {
        date,
        scheduled: cell.scheduled,
        completed: cell.completed,
        habits: statuses,
    }
}

/// The 7-day row for the week containing `reference`, starting Sunday.
pub fn week_row(habits: &[Habit], reference: NaiveDate) -> WeekRollup {
    let start = week_start(reference);
    let days = start
        .iter_days()
        .take(7)
        .map(|d| day_cell(habits, d))
        .collect();
    WeekRollup { start, days }
}

/// Calendar grid for the month containing `reference`.
pub fn month_grid(habits: &[Habit], reference: NaiveDate, today: NaiveDate) -> MonthRollup {
    let (first, last) = month_bounds(reference);

    let mut cells = Vec::new();
    for date in week_start(first).iter_days() {
        // Pad with trailing days until the Sunday after the month ends.
        if date > last && date.weekday().num_days_from_sunday() == 0 {
            break;
        }
        cells.push(day_cell(habits, date));
    }

    let (completed, scheduled) = habits.iter().fold((0, 0), |(c, s), habit| {
        let p = range_progress(habit, first, last, today);
        (c + p.completed, s + p.scheduled)
    });

    MonthRollup {
        year: first.year(),
        month: first.month(),
        cells,
        completed,
        scheduled,
        percentage: progress::percentage(completed, scheduled),
    }
}

/// Per-habit sprint summaries plus cross-habit aggregates.
pub fn sprint_overview(habits: &[Habit], today: NaiveDate) -> SprintRollup {
    let summaries: Vec<HabitSprint> = habits
        .iter()
        .map(|h| HabitSprint {
            id: h.id.clone(),
            name: h.name.clone(),
            progress: sprint_progress(h, today),
        })
        .collect();

    let total_completed = summaries.iter().map(|s| s.progress.completed).sum();
    let total_scheduled = summaries.iter().map(|s| s.progress.scheduled).sum();
    let best_streak = summaries
        .iter()
        .map(|s| s.progress.best_streak)
        .max()
        .unwrap_or(0);
    let min_days_left = summaries
        .iter()
        .map(|s| s.progress.days_left)
        .min()
        .unwrap_or(SPRINT_DAYS);

    SprintRollup {
        habits: summaries,
        total_completed,
        total_scheduled,
        best_streak,
        min_days_left,
    }
}

/// Twelve monthly buckets for `year`, each aggregated through
/// [`range_progress`]. O(365 x habits), fine at this data scale.
pub fn year_by_month(habits: &[Habit], year: i32, today: NaiveDate) -> YearRollup {
    let mut months = Vec::with_capacity(12);
    let mut year_completed = 0;
    let mut year_scheduled = 0;

    for month in 1..=12 {
        let reference = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
        let (first, last) = month_bounds(reference);
        let (completed, scheduled) = habits.iter().fold((0, 0), |(c, s), habit| {
            let p = range_progress(habit, first, last, today);
            (c + p.completed, s + p.scheduled)
        });
        year_completed += completed;
        year_scheduled += scheduled;
        months.push(MonthBucket {
            month,
            completed,
            scheduled,
            percentage: progress::percentage(completed, scheduled),
        });
    }

    YearRollup {
        year,
        months,
        completed: year_completed,
        scheduled: year_scheduled,
        percentage: progress::percentage(year_completed, year_scheduled),
    }
}

fn day_cell(habits: &[Habit], date: NaiveDate) -> DayCell {
    let mut cell = DayCell {
        date,
        scheduled: 0,
        completed: 0,
    };
    for habit in habits {
        if habit.is_scheduled(date) {
            cell.scheduled += 1;
            if habit.history.is_completed(date) {
                cell.completed += 1;
            }
        }
    }
    cell
}

/// The Sunday on or before `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// First and last day of the month containing `reference`.
fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first =
        NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap_or(reference);
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or(first);
    (first, last)
}
