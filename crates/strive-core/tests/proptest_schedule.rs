//! Property tests for the schedule evaluator and the aggregation rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use strive_core::habit::{Habit, HabitColor, HabitDraft, Schedule};
use strive_core::progress::range_progress;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..6000).prop_map(|n| base_date() + Duration::days(n))
}

fn weekday_set() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::btree_set(0u8..7, 1..=7).prop_map(|s| s.into_iter().collect())
}

fn habit(schedule: Schedule, created: NaiveDate) -> Habit {
    let draft = HabitDraft::new("Read", HabitColor::Ocean, schedule).unwrap();
    Habit::create(draft, "user-1", created)
}

proptest! {
    #[test]
    fn every_day_is_scheduled_on_every_date_after_creation(
        anchor in any_date(),
        offset in 0i64..1000,
    ) {
        let h = habit(Schedule::EveryDay, anchor);
        prop_assert!(h.is_scheduled(anchor + Duration::days(offset)));
    }

    #[test]
    fn nothing_is_scheduled_before_creation(
        anchor in any_date(),
        offset in 1i64..1000,
        interval in 1u32..30,
        days in weekday_set(),
    ) {
        let before = anchor - Duration::days(offset);
        prop_assert!(!habit(Schedule::EveryDay, anchor).is_scheduled(before));
        prop_assert!(!habit(Schedule::EveryXDays { interval }, anchor).is_scheduled(before), "EveryXDays scheduled before creation");
        prop_assert!(!habit(Schedule::SpecificDays { days }, anchor).is_scheduled(before), "SpecificDays scheduled before creation");
    }

    #[test]
    fn interval_schedule_hits_exactly_the_multiples(
        anchor in any_date(),
        interval in 2u32..30,
        offset in 0i64..1000,
    ) {
        let h = habit(Schedule::EveryXDays { interval }, anchor);
        let due = h.is_scheduled(anchor + Duration::days(offset));
        prop_assert_eq!(due, offset % i64::from(interval) == 0);
    }

    #[test]
    fn any_week_contains_one_occurrence_per_selected_weekday(
        anchor in any_date(),
        days in weekday_set(),
        start_offset in 0i64..1000,
    ) {
        let expected = days.len();
        let h = habit(Schedule::SpecificDays { days }, anchor);
        let start = anchor + Duration::days(start_offset);
        let count = (0i64..7)
            .filter(|i| h.is_scheduled(start + Duration::days(*i)))
            .count();
        prop_assert_eq!(count, expected);
    }

    #[test]
    fn toggling_a_date_twice_restores_the_habit(
        marked in proptest::collection::vec(0i64..365, 0..20),
        flip in 0i64..365,
    ) {
        let anchor = base_date();
        let mut h = habit(Schedule::EveryDay, anchor);
        for offset in marked {
            h.toggle(anchor + Duration::days(offset));
        }

        let before = h.clone();
        let day = anchor + Duration::days(flip);
        h.toggle(day);
        h.toggle(day);
        prop_assert_eq!(h, before);
    }

    #[test]
    fn completing_every_scheduled_date_yields_full_percentage(
        interval in 1u32..15,
        span in 1i64..200,
    ) {
        let anchor = base_date();
        let today = anchor + Duration::days(span);
        let mut h = habit(Schedule::EveryXDays { interval }, anchor);

        let scheduled: Vec<NaiveDate> = anchor
            .iter_days()
            .take_while(|d| *d <= today)
            .filter(|d| h.is_scheduled(*d))
            .collect();
        for d in &scheduled {
            h.toggle(*d);
        }

        let p = range_progress(&h, anchor, today, today);
        prop_assert_eq!(p.completed, p.scheduled);
        prop_assert_eq!(p.percentage, 100);
        prop_assert_eq!(p.best_streak, p.scheduled);
    }

    #[test]
    fn empty_history_never_reports_progress(
        interval in 1u32..15,
        span in 0i64..200,
    ) {
        let anchor = base_date();
        let today = anchor + Duration::days(span);
        let h = habit(Schedule::EveryXDays { interval }, anchor);

        let p = range_progress(&h, anchor, today, today);
        prop_assert_eq!(p.completed, 0);
        prop_assert_eq!(p.percentage, 0);
        prop_assert_eq!(p.best_streak, 0);
    }
}
