//! Fixture generation.
//!
//! - [`FixtureGenerator::generate`]: full single round-robin for a season
//! - [`FixtureGenerator::join_mid_season`]: fixtures for a late registrant

mod generator;

pub use generator::FixtureGenerator;
