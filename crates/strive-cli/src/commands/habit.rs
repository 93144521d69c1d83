//! Habit management commands.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use strive_core::habit::{Habit, HabitColor, HabitDraft, Schedule};
use strive_core::store::HabitPatch;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Color theme: ocean, forest, royal, sunset, warm, rose, sky, amber
        #[arg(long, default_value = "ocean")]
        color: String,
        /// Comma-separated weekdays (0=Sun .. 6=Sat) for a specific-days schedule
        #[arg(long, conflicts_with = "every")]
        days: Option<String>,
        /// Interval in days for an every-x-days schedule
        #[arg(long)]
        every: Option<u32>,
    },
    /// List habits
    List,
    /// Toggle completion for a date
    Toggle {
        /// Habit ID
        id: String,
        /// Date to toggle (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a habit and its entire history
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HabitAction::Add {
            name,
            color,
            days,
            every,
        } => {
            let color: HabitColor = color.parse()?;
            let schedule = parse_schedule(days, every)?;
            let draft = HabitDraft::new(&name, color, schedule)?;

            let session = super::require_session()?;
            let client = super::client()?;
            let habit = Habit::create(draft, &session.user_id, Local::now().date_naive());
            super::runtime()?.block_on(client.insert_habit(&session, &habit))?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List => {
            let session = super::require_session()?;
            let client = super::client()?;
            let habits = super::runtime()?.block_on(client.list_habits(&session))?;
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Toggle { id, date } => {
            let session = super::require_session()?;
            let client = super::client()?;
            let runtime = super::runtime()?;

            let habits = runtime.block_on(client.list_habits(&session))?;
            let mut habit = habits
                .into_iter()
                .find(|h| h.id == id)
                .ok_or(format!("Habit not found: {id}"))?;

            let today = Local::now().date_naive();
            let date = date.unwrap_or(today);
            if date > today {
                return Err(format!("cannot toggle a future date ({date})").into());
            }
            if !habit.is_scheduled(date) {
                return Err(format!("'{}' is not scheduled on {date}", habit.name).into());
            }

            let completed = habit.toggle(date);
            runtime.block_on(client.update_habit(&session, &habit.id, &HabitPatch::from(&habit)))?;
            println!(
                "{} {} on {date}",
                habit.name,
                if completed { "completed" } else { "unmarked" }
            );
        }
        HabitAction::Delete { id } => {
            let session = super::require_session()?;
            let client = super::client()?;
            super::runtime()?.block_on(client.delete_habit(&session, &id))?;
            println!("Habit deleted: {id}");
        }
    }
    Ok(())
}

/// Map the schedule flags onto a recurrence rule. No flags means every
/// day; validation and normalization happen in `HabitDraft::new`.
fn parse_schedule(
    days: Option<String>,
    every: Option<u32>,
) -> Result<Schedule, Box<dyn std::error::Error>> {
    match (days, every) {
        (Some(days), None) => {
            let days = days
                .split(',')
                .map(|s| s.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| "expected --days as comma-separated weekday indexes, e.g. 1,3,5")?;
            Ok(Schedule::SpecificDays { days })
        }
        (None, Some(interval)) => Ok(Schedule::EveryXDays { interval }),
        (None, None) => Ok(Schedule::EveryDay),
        (Some(_), Some(_)) => Err("--days and --every are mutually exclusive".into()),
    }
}
