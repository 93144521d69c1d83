//! # Strive Core Library
//!
//! This library provides the core business logic for Strive, a personal
//! habit tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary; any GUI shell
//! is a thin rendering layer over the same core library.
//!
//! ## Architecture
//!
//! - **Habit model**: recurrence rules and the sparse completion history,
//!   with all validation at creation time
//! - **Schedule evaluator**: the single source of truth for whether a
//!   habit is due on a given calendar date
//! - **Progress aggregator**: completion counts, percentages, streaks,
//!   and sprint countdowns over arbitrary date ranges
//! - **Period rollups**: day/week/month/sprint/year bucket structures
//!   for the views, all built on the evaluator and aggregator
//! - **Store**: client for the hosted auth/storage backend, the local
//!   habit cache, and keyring-backed session persistence
//!
//! The evaluator, aggregator, and rollup builders are pure: they take a
//! habit list and a reference date and return plain data, never
//! performing I/O.
//!
//! ## Key Components
//!
//! - [`Habit`], [`Schedule`], [`History`]: the data model
//! - [`progress`]: per-habit statistics
//! - [`rollup`]: per-period bucket structures
//! - [`StoreClient`], [`HabitCache`], [`Session`]: backend access
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod habit;
pub mod progress;
pub mod rollup;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use habit::{DayMark, Habit, HabitColor, HabitDraft, History, Schedule};
pub use progress::{DayStatus, RangeProgress, SprintProgress, SPRINT_DAYS};
pub use rollup::{Period, Rollup};
pub use store::{HabitCache, HabitPatch, Session, StoreClient};
