//! Progress aggregation over a habit's schedule and history.
//!
//! All statistics are computed by one walk over the calendar range so the
//! counting, percentage, and streak rules cannot drift between views.
//! Key rules:
//! - the effective range end is `min(range_end, today)`; future dates never
//!   count toward completions or totals;
//! - a streak is a run of consecutive *scheduled* dates all completed; a
//!   scheduled-but-incomplete date breaks it, unscheduled dates are neutral;
//! - `percentage` is 0 (never a division error) when nothing was scheduled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Length of the default reporting horizon, in calendar days, anchored at
/// each habit's creation date.
pub const SPRINT_DAYS: u32 = 90;

/// Derived status of a single (habit, date) pair. Computed on read, never
/// stored; the backend only ever holds explicit completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Scheduled and marked completed.
    Completed,
    /// Scheduled, in the past or today, and not completed.
    Missed,
    /// The recurrence rule does not put the habit on this date.
    NotScheduled,
    /// The date is after `today`.
    Future,
}

/// Statistics for one habit over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProgress {
    /// Scheduled dates marked completed.
    pub completed: u32,
    /// Scheduled dates in the effective range.
    pub scheduled: u32,
    /// `round(100 * completed / scheduled)`; 0 when nothing was scheduled.
    pub percentage: u8,
    /// Longest run of consecutive scheduled dates all completed.
    pub best_streak: u32,
}

/// Statistics for one habit over its own 90-day sprint window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintProgress {
    pub completed: u32,
    pub scheduled: u32,
    pub percentage: u8,
    pub best_streak: u32,
    /// Whole days of the sprint still ahead of `today`, clamped to
    /// `0..=90`.
    pub days_left: u32,
}

/// Classify a single date for a habit.
pub fn day_status(habit: &Habit, date: NaiveDate, today: NaiveDate) -> DayStatus {
    if date > today {
        DayStatus::Future
    } else if !habit.is_scheduled(date) {
        DayStatus::NotScheduled
    } else if habit.history.is_completed(date) {
        DayStatus::Completed
    } else {
        DayStatus::Missed
    }
}

/// Aggregate one habit over `[start, end]`, clamped to `today`.
pub fn range_progress(
    habit: &Habit,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> RangeProgress {
    let end = end.min(today);
    let mut progress = RangeProgress::default();
    if start > end {
        return progress;
    }

    let mut run = 0u32;
    for date in start.iter_days().take_while(|d| *d <= end) {
        if !habit.is_scheduled(date) {
            continue;
        }
        progress.scheduled += 1;
        if habit.history.is_completed(date) {
            progress.completed += 1;
            run += 1;
            progress.best_streak = progress.best_streak.max(run);
        } else {
            run = 0;
        }
    }
    progress.percentage = percentage(progress.completed, progress.scheduled);
    progress
}

/// Aggregate one habit over its sprint window
/// `[created_at, created_at + 90)`.
pub fn sprint_progress(habit: &Habit, today: NaiveDate) -> SprintProgress {
    let start = habit.created_at;
    let end = start + chrono::Duration::days(i64::from(SPRINT_DAYS) - 1);
    let range = range_progress(habit, start, end, today);
    SprintProgress {
        completed: range.completed,
        scheduled: range.scheduled,
        percentage: range.percentage,
        best_streak: range.best_streak,
        days_left: days_left(start, today),
    }
}

/// The streak ending at `today`: scan backward from `today` to the
/// habit's creation date, counting scheduled-and-completed dates, until
/// the first scheduled-and-incomplete date is hit. Unscheduled dates are
/// skipped. Distinct from [`RangeProgress::best_streak`].
pub fn trailing_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut date = today;
    while date >= habit.created_at {
        if habit.is_scheduled(date) {
            if habit.history.is_completed(date) {
                streak += 1;
            } else {
                break;
            }
        }
        match date.pred_opt() {
            Some(prev) => date = prev,
            None => break,
        }
    }
    streak
}

/// Whole sprint days remaining after `today`, clamped to `0..=90`.
///
/// Once the sprint has started, today itself counts as consumed: on the
/// creation day 89 days remain, and on day 90 none do. Before the
/// creation date the full 90 days remain.
pub fn days_left(created_at: NaiveDate, today: NaiveDate) -> u32 {
    if today < created_at {
        return SPRINT_DAYS;
    }
    let elapsed = ((today - created_at).num_days() + 1).min(i64::from(SPRINT_DAYS));
    SPRINT_DAYS - elapsed as u32
}

/// First date after the sprint window (exclusive bound at day 90).
pub fn sprint_end(created_at: NaiveDate) -> NaiveDate {
    created_at + chrono::Duration::days(i64::from(SPRINT_DAYS))
}

pub(crate) fn percentage(completed: u32, scheduled: u32) -> u8 {
    if scheduled == 0 {
        return 0;
    }
    ((f64::from(completed) / f64::from(scheduled)) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{HabitColor, HabitDraft, Schedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(schedule: Schedule, created: NaiveDate) -> Habit {
        let draft = HabitDraft::new("Read", HabitColor::Ocean, schedule).unwrap();
        Habit::create(draft, "user-1", created)
    }

    fn complete(habit: &mut Habit, dates: &[NaiveDate]) {
        for d in dates {
            assert!(habit.toggle(*d));
        }
    }

    #[test]
    fn every_day_scenario_first_ten_days() {
        // Created 2024-01-01, every day, today 2024-01-10. Jan 1-5 and
        // Jan 7-10 completed, Jan 6 missed.
        let created = date(2024, 1, 1);
        let mut h = habit(Schedule::EveryDay, created);
        let completed_dates: Vec<NaiveDate> = created
            .iter_days()
            .take(10)
            .filter(|d| *d != date(2024, 1, 6))
            .collect();
        complete(&mut h, &completed_dates);

        let today = date(2024, 1, 10);
        let p = range_progress(&h, created, today, today);
        assert_eq!(p.scheduled, 10);
        assert_eq!(p.completed, 9);
        assert_eq!(p.percentage, 90);
        assert_eq!(p.best_streak, 5);

        let sprint = sprint_progress(&h, today);
        assert_eq!(sprint.days_left, 80);
        assert_eq!(sprint.completed, 9);
    }

    #[test]
    fn empty_history_yields_zero_completed() {
        let created = date(2024, 1, 1);
        let h = habit(Schedule::EveryDay, created);
        let p = range_progress(&h, created, date(2024, 1, 31), date(2024, 1, 31));
        assert!(p.scheduled > 0);
        assert_eq!(p.completed, 0);
        assert_eq!(p.percentage, 0);
        assert_eq!(p.best_streak, 0);
    }

    #[test]
    fn all_completed_yields_full_percentage_and_streak() {
        let created = date(2024, 1, 1);
        let mut h = habit(Schedule::EveryXDays { interval: 3 }, created);
        let today = date(2024, 1, 31);
        let scheduled: Vec<NaiveDate> = created
            .iter_days()
            .take_while(|d| *d <= today)
            .filter(|d| h.is_scheduled(*d))
            .collect();
        complete(&mut h, &scheduled);

        let p = range_progress(&h, created, today, today);
        assert_eq!(p.percentage, 100);
        assert_eq!(p.best_streak, p.scheduled);
    }

    #[test]
    fn future_dates_are_excluded_from_totals() {
        let created = date(2024, 1, 1);
        let h = habit(Schedule::EveryDay, created);
        // Range runs through March; today is Jan 10.
        let p = range_progress(&h, created, date(2024, 3, 31), date(2024, 1, 10));
        assert_eq!(p.scheduled, 10);
    }

    #[test]
    fn today_before_creation_is_all_zeros() {
        let created = date(2024, 6, 1);
        let h = habit(Schedule::EveryDay, created);
        let today = date(2024, 5, 1);
        let sprint = sprint_progress(&h, today);
        assert_eq!(sprint.scheduled, 0);
        assert_eq!(sprint.completed, 0);
        assert_eq!(sprint.percentage, 0);
        assert_eq!(sprint.days_left, 90);
    }

    #[test]
    fn today_past_sprint_clamps_window() {
        let created = date(2024, 1, 1);
        let mut h = habit(Schedule::EveryDay, created);
        // Complete every day of the sprint plus a stray date beyond it.
        let in_window: Vec<NaiveDate> = created.iter_days().take(90).collect();
        complete(&mut h, &in_window);
        h.toggle(date(2024, 6, 1));

        let today = date(2024, 7, 1);
        let sprint = sprint_progress(&h, today);
        assert_eq!(sprint.scheduled, 90);
        assert_eq!(sprint.completed, 90);
        assert_eq!(sprint.percentage, 100);
        assert_eq!(sprint.days_left, 0);
    }

    #[test]
    fn unscheduled_days_do_not_break_streaks() {
        // Mon/Wed/Fri habit: completing three consecutive occurrences
        // spans neutral days without resetting the run.
        let created = date(2024, 1, 1); // Monday
        let mut h = habit(Schedule::SpecificDays { days: vec![1, 3, 5] }, created);
        complete(
            &mut h,
            &[date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5)],
        );

        let p = range_progress(&h, created, date(2024, 1, 7), date(2024, 1, 7));
        assert_eq!(p.best_streak, 3);
    }

    #[test]
    fn scheduled_incomplete_breaks_best_streak() {
        let created = date(2024, 1, 1);
        let mut h = habit(Schedule::EveryDay, created);
        complete(
            &mut h,
            &[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 4)],
        );

        let p = range_progress(&h, created, date(2024, 1, 4), date(2024, 1, 4));
        assert_eq!(p.best_streak, 2);
    }

    #[test]
    fn trailing_streak_counts_back_from_today() {
        let created = date(2024, 1, 1);
        let mut h = habit(Schedule::EveryDay, created);
        complete(
            &mut h,
            &[
                date(2024, 1, 1),
                date(2024, 1, 3),
                date(2024, 1, 4),
                date(2024, 1, 5),
            ],
        );

        // Jan 2 missed, so the streak ending Jan 5 is 3.
        assert_eq!(trailing_streak(&h, date(2024, 1, 5)), 3);
        // An incomplete today ends the scan immediately.
        assert_eq!(trailing_streak(&h, date(2024, 1, 6)), 0);
    }

    #[test]
    fn trailing_streak_skips_unscheduled_days() {
        let created = date(2024, 1, 1); // Monday
        let mut h = habit(Schedule::SpecificDays { days: vec![1, 3, 5] }, created);
        complete(&mut h, &[date(2024, 1, 3), date(2024, 1, 5)]);

        // Sunday Jan 7 is unscheduled; the streak still reaches back
        // through Friday and Wednesday, stopping at missed Monday Jan 1.
        assert_eq!(trailing_streak(&h, date(2024, 1, 7)), 2);
    }

    #[test]
    fn day_status_classification() {
        let created = date(2024, 1, 1); // Monday
        let mut h = habit(Schedule::SpecificDays { days: vec![1] }, created);
        h.toggle(date(2024, 1, 1));
        let today = date(2024, 1, 9);

        assert_eq!(day_status(&h, date(2024, 1, 1), today), DayStatus::Completed);
        assert_eq!(day_status(&h, date(2024, 1, 8), today), DayStatus::Missed);
        assert_eq!(
            day_status(&h, date(2024, 1, 2), today),
            DayStatus::NotScheduled
        );
        assert_eq!(day_status(&h, date(2024, 1, 15), today), DayStatus::Future);
    }

    #[test]
    fn days_left_boundaries() {
        let created = date(2024, 1, 1);
        assert_eq!(days_left(created, created), 89);
        assert_eq!(days_left(created, date(2024, 1, 10)), 80);
        assert_eq!(days_left(created, sprint_end(created)), 0);
        assert_eq!(days_left(created, date(2025, 1, 1)), 0);
        assert_eq!(days_left(created, date(2023, 12, 1)), 90);
    }
}
