//! Round-robin league scheduling.
//!
//! Generates a season's fixtures and places each week's matches into
//! half-hour slots on a weekly grid, driven by player availability.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `PlayerId`, `Match`, `Fixture`, `SlotKey`,
//!   `Availability`, `AvailabilityBook`, `SlotAssignment`, `WeekSchedule`
//! - **`fixtures`**: Circle-method round-robin and mid-season join fixtures
//! - **`scheduler`**: Greedy most-constrained-first slot assignment and week KPIs
//! - **`validation`**: Input integrity checks (duplicate players and IDs,
//!   self pairings, mixed weeks, unknown players)
//! - **`season`**: In-memory season workflow tying the engines together
//!
//! # Architecture
//!
//! Both engines are pure and synchronous: they take a full snapshot of
//! their inputs and return a full result, with no I/O and no state kept
//! between calls. Persisting fixtures and slots, and serializing calls
//! per season-week, is the caller's job.
//!
//! # References
//!
//! - Kirkman (1847), "On a Problem in Combinations"
//! - Brélaz (1979), "New Methods to Color the Vertices of a Graph"
//!   (most-constrained-first ordering)

pub mod error;
pub mod fixtures;
pub mod models;
pub mod scheduler;
pub mod season;
pub mod validation;

pub use error::ScheduleError;
