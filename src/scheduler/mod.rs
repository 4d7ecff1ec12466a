//! Weekly slot assignment and KPI evaluation.
//!
//! # Algorithm
//!
//! `SlotAssigner` places a week's matches into day/time slots using a
//! greedy, most-constrained-first heuristic scored by shared preference
//! plus a spacing bonus. It is not optimal, but it is fast, deterministic
//! and never violates table or player exclusivity.
//!
//! # KPI
//!
//! `WeekKpi` summarizes one run: placement rate, preference satisfaction
//! and the tightest gap between two matches of the same player.

mod assigner;
mod config;
mod kpi;
mod occupancy;

pub use assigner::SlotAssigner;
pub use config::{AssignerConfig, SlotTieBreak};
pub use kpi::WeekKpi;

pub(crate) use occupancy::Occupancy;
