//! Availability-driven weekly slot assigner.
//!
//! # Algorithm
//!
//! 1. For every match, collect the slots where both players have a
//!    positive weight; each candidate's base score is the weight sum.
//! 2. Order matches by ascending candidate count (most-constrained-first).
//!    The sort is stable, so equally constrained matches keep input order.
//! 3. For each match in that order, drop candidates already taken by the
//!    table or by either player, then pick the highest
//!    `base + spacing(p1) + spacing(p2)`. The first candidate in canonical
//!    order wins ties.
//! 4. Commit the chosen slot to the table and both players before moving
//!    on, so later matches see the updated contention.
//!
//! There is no backtracking: an early choice can starve a later, more
//! flexible match. Matches that end up with no free candidate are left
//! out of the assignments and reported in [`WeekSchedule::unplaced`].
//!
//! # Complexity
//! O(m log m + m * c * k) where m = matches, c = candidates per match
//! (at most 196), k = matches already held by a participant.

use log::debug;

use super::config::{AssignerConfig, SlotTieBreak};
use super::occupancy::Occupancy;
use crate::error::ScheduleError;
use crate::models::{
    AvailabilityBook, CommittedSlot, Match, PlayerId, SlotAssignment, SlotKey, Unplaced,
    UnplacedReason, WeekSchedule,
};
use crate::validation::validate_week;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    slot: SlotKey,
    base_score: u32,
}

#[derive(Debug)]
struct MatchCandidates<'a> {
    fixture: &'a Match,
    candidates: Vec<Candidate>,
}

/// Greedy most-constrained-first slot assigner.
///
/// Pure and stateless between calls: all occupancy is rebuilt from the
/// arguments of each call, so one assigner can serve many weeks, and
/// identical inputs always produce identical output.
///
/// # Example
///
/// ```
/// use league_schedule::models::{Availability, AvailabilityBook, Match, SlotKey};
/// use league_schedule::scheduler::SlotAssigner;
///
/// let mon: SlotKey = "mon-09:00".parse().unwrap();
/// let book = AvailabilityBook::new()
///     .with_player("A", Availability::new().with_slot(mon, 1))
///     .with_player("B", Availability::new().with_slot(mon, 1));
/// let matches = vec![Match::new("m1", "A", "B", 1)];
///
/// let assignments = SlotAssigner::new().assign(&matches, &book, &[]).unwrap();
/// assert_eq!(assignments[0].slot, mon);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotAssigner {
    config: AssignerConfig,
}

impl SlotAssigner {
    /// Creates an assigner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: AssignerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    /// Assigns slots to one week's unscheduled matches.
    ///
    /// Returns one assignment per placed match; matches without a valid
    /// slot are omitted.
    ///
    /// # Errors
    /// [`ScheduleError::Validation`] if the matches span several weeks,
    /// repeat an ID, pair a player with themselves, or reference a player
    /// missing from `availability`.
    pub fn assign(
        &self,
        matches: &[Match],
        availability: &AvailabilityBook,
        committed: &[CommittedSlot],
    ) -> Result<Vec<SlotAssignment>, ScheduleError> {
        self.schedule_week(matches, availability, committed)
            .map(WeekSchedule::into_assignments)
    }

    /// Like [`assign`](Self::assign), but also reports why each dropped
    /// match could not be placed.
    pub fn schedule_week(
        &self,
        matches: &[Match],
        availability: &AvailabilityBook,
        committed: &[CommittedSlot],
    ) -> Result<WeekSchedule, ScheduleError> {
        validate_week(matches, availability)?;

        let mut occupancy = Occupancy::from_committed(committed);
        let mut plans: Vec<MatchCandidates<'_>> = matches
            .iter()
            .map(|m| self.candidates_for(m, availability))
            .collect();
        plans.sort_by_key(|p| p.candidates.len());

        let mut schedule = WeekSchedule::new();
        for plan in &plans {
            let fixture = plan.fixture;
            match self.select(plan, &occupancy) {
                Some(slot) => {
                    debug!(
                        "match {} ({} vs {}) -> {} ({} candidates)",
                        fixture.id,
                        fixture.player1,
                        fixture.player2,
                        slot,
                        plan.candidates.len()
                    );
                    occupancy.commit(slot, &fixture.player1, &fixture.player2);
                    schedule.add_assignment(SlotAssignment::new(fixture.id.clone(), slot));
                }
                None => {
                    let reason = if plan.candidates.is_empty() {
                        UnplacedReason::NoCommonAvailability
                    } else {
                        UnplacedReason::AllCandidatesTaken
                    };
                    debug!(
                        "match {} ({} vs {}) left unscheduled: {:?}",
                        fixture.id, fixture.player1, fixture.player2, reason
                    );
                    schedule.add_unplaced(Unplaced {
                        match_id: fixture.id.clone(),
                        reason,
                        candidate_count: plan.candidates.len(),
                    });
                }
            }
        }

        debug!(
            "placed {} of {} matches",
            schedule.assignment_count(),
            matches.len()
        );
        Ok(schedule)
    }

    /// Slots where both players are available, in canonical order.
    fn candidates_for<'a>(
        &self,
        fixture: &'a Match,
        availability: &AvailabilityBook,
    ) -> MatchCandidates<'a> {
        let mut candidates: Vec<Candidate> = match (
            availability.get(&fixture.player1),
            availability.get(&fixture.player2),
        ) {
            (Some(first), Some(second)) => first
                .available_slots()
                .filter_map(|(slot, w1)| {
                    let w2 = second.weight(&slot);
                    (w2 > 0).then_some(Candidate {
                        slot,
                        base_score: w1.saturating_add(w2),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        // Availability iterates chronologically already.
        if self.config.tie_break == SlotTieBreak::Lexical {
            candidates.sort_by_cached_key(|c| c.slot.to_string());
        }

        MatchCandidates {
            fixture,
            candidates,
        }
    }

    /// Best free candidate, first one wins on equal score.
    fn select(&self, plan: &MatchCandidates<'_>, occupancy: &Occupancy) -> Option<SlotKey> {
        let p1 = &plan.fixture.player1;
        let p2 = &plan.fixture.player2;

        let mut best: Option<(SlotKey, f64)> = None;
        for candidate in &plan.candidates {
            if !occupancy.is_free(&candidate.slot, p1, p2) {
                continue;
            }
            let score = f64::from(candidate.base_score)
                + self.spacing(occupancy, p1, &candidate.slot)
                + self.spacing(occupancy, p2, &candidate.slot);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate.slot, score));
            }
        }
        best.map(|(slot, _)| slot)
    }

    fn spacing(&self, occupancy: &Occupancy, player: &PlayerId, slot: &SlotKey) -> f64 {
        occupancy
            .nearest_distance(player, slot)
            .map_or(0.0, |d| self.config.spacing_bonus(d))
    }
}
