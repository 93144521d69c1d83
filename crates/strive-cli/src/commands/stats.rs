//! Progress views over each reporting period.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use strive_core::rollup::{self, Period};
use strive_core::Config;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Single-day summary
    Day {
        /// Date to summarize (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sunday-started week row containing the date
    Week {
        /// Any date inside the week (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Calendar-grid month view
    Month {
        /// Any date inside the month (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Per-habit 90-day sprint overview
    Sprint,
    /// Twelve monthly buckets
    Year {
        /// Year to report (default current)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn run(action: Option<StatsAction>) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();

    // Without a subcommand, fall back to the configured default view.
    let (reference, period) = match action {
        Some(StatsAction::Day { date }) => (date.unwrap_or(today), Period::Day),
        Some(StatsAction::Week { date }) => (date.unwrap_or(today), Period::Week),
        Some(StatsAction::Month { date }) => (date.unwrap_or(today), Period::Month),
        Some(StatsAction::Sprint) => (today, Period::Sprint),
        Some(StatsAction::Year { year }) => (
            year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)).unwrap_or(today),
            Period::Year,
        ),
        None => (today, Config::load_or_default().ui.default_period),
    };

    let session = super::require_session()?;
    let client = super::client()?;
    let habits = super::runtime()?.block_on(client.list_habits(&session))?;

    let rollup = rollup::build(&habits, reference, period, today);
    println!("{}", serde_json::to_string_pretty(&rollup)?);
    Ok(())
}
