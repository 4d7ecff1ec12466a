//! Circle-method round-robin generator.
//!
//! # Algorithm
//!
//! With `n` entrants (padded to even with a bye seat), the first entrant
//! stays fixed and the other `n-1` rotate one position per round. In each
//! round seat `i` meets seat `n-1-i`; pairings against the bye are skipped.
//! After `n-1` rounds every pair of real entrants has met exactly once.
//!
//! Rounds are then packed into weeks, `ceil((n-1) / total_weeks)` rounds
//! per week, with any excess rounds landing in the final week.
//!
//! # Complexity
//! O(n²) for `n` entrants.
//!
//! # Reference
//! Kirkman (1847), "On a Problem in Combinations"

use log::info;

use crate::error::ScheduleError;
use crate::models::{Fixture, PlayerId};
use crate::validation::{validate_roster, ValidationError, ValidationErrorKind};

/// A seat in the rotation: a real entrant (index into the roster) or the bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Player(usize),
    Bye,
}

/// Round-robin fixture generator.
///
/// # Example
///
/// ```
/// use league_schedule::fixtures::FixtureGenerator;
/// use league_schedule::models::PlayerId;
///
/// let roster: Vec<PlayerId> = ["A", "B", "C", "D"].into_iter().map(PlayerId::from).collect();
/// let fixtures = FixtureGenerator::new().generate(&roster, 3).unwrap();
///
/// assert_eq!(fixtures.len(), 6);
/// assert!(fixtures.iter().all(|f| (1..=3).contains(&f.week)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureGenerator;

impl FixtureGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a full single round-robin over `players`, packed into
    /// `total_weeks` weeks.
    ///
    /// Fewer than two players yields no fixtures.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidWeekCount`] if `total_weeks` is 0
    /// - [`ScheduleError::Validation`] if the roster repeats a player
    pub fn generate(
        &self,
        players: &[PlayerId],
        total_weeks: u32,
    ) -> Result<Vec<Fixture>, ScheduleError> {
        if total_weeks == 0 {
            return Err(ScheduleError::InvalidWeekCount { total_weeks });
        }
        validate_roster(players)?;

        if players.len() < 2 {
            return Ok(Vec::new());
        }

        let mut seats: Vec<Seat> = (0..players.len()).map(Seat::Player).collect();
        if seats.len() % 2 == 1 {
            seats.push(Seat::Bye);
        }
        let n = seats.len();
        let total_rounds = n - 1;
        let rounds_per_week = total_rounds.div_ceil(total_weeks as usize).max(1);

        let fixed = seats[0];
        let mut rotating = seats[1..].to_vec();
        let mut fixtures = Vec::with_capacity(players.len() * (players.len() - 1) / 2);

        for round in 0..total_rounds {
            let week = ((round / rounds_per_week) as u32 + 1).min(total_weeks);

            let current: Vec<Seat> = std::iter::once(fixed)
                .chain(rotating.iter().copied())
                .collect();
            for i in 0..n / 2 {
                if let (Seat::Player(a), Seat::Player(b)) = (current[i], current[n - 1 - i]) {
                    fixtures.push(Fixture::new(players[a].clone(), players[b].clone(), week));
                }
            }

            rotating.rotate_right(1);
        }

        info!(
            "generated {} fixtures for {} players over {} weeks ({} rounds, {} per week)",
            fixtures.len(),
            players.len(),
            total_weeks,
            total_rounds,
            rounds_per_week
        );
        Ok(fixtures)
    }

    /// Fixtures for a player joining an active season.
    ///
    /// The newcomer meets every existing opponent once. Fixtures are spread
    /// over the remaining weeks `current_week..=total_weeks` in turn, so the
    /// `i`-th opponent lands in `current_week + i % remaining`.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidWeekCount`] if `total_weeks` is 0
    /// - [`ScheduleError::WeekOutOfRange`] if `current_week` is not in `1..=total_weeks`
    /// - [`ScheduleError::Validation`] if opponents repeat or include the newcomer
    pub fn join_mid_season(
        &self,
        newcomer: &PlayerId,
        opponents: &[PlayerId],
        current_week: u32,
        total_weeks: u32,
    ) -> Result<Vec<Fixture>, ScheduleError> {
        if total_weeks == 0 {
            return Err(ScheduleError::InvalidWeekCount { total_weeks });
        }
        if current_week == 0 || current_week > total_weeks {
            return Err(ScheduleError::WeekOutOfRange {
                week: current_week,
                total_weeks,
            });
        }

        let mut errors = validate_roster(opponents).err().unwrap_or_default();
        if opponents.contains(newcomer) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPairing,
                format!("Player '{newcomer}' cannot be their own opponent"),
            ));
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let remaining = total_weeks - current_week + 1;
        let fixtures: Vec<Fixture> = opponents
            .iter()
            .zip(0u32..)
            .map(|(opponent, i)| {
                Fixture::new(newcomer.clone(), opponent.clone(), current_week + i % remaining)
            })
            .collect();

        info!(
            "player {} joins in week {}: {} fixtures over {} remaining weeks",
            newcomer,
            current_week,
            fixtures.len(),
            remaining
        );
        Ok(fixtures)
    }
}
