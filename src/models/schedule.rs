//! Weekly slot-assignment results.
//!
//! A [`WeekSchedule`] is the outcome of one assigner run: the placements
//! it made plus a diagnostic entry for every match it could not place.
//! Matches that were not placed are *not* errors; the caller leaves them
//! unscheduled.

use serde::{Deserialize, Serialize};

use super::{Day, MatchId, PlayerId, SlotKey};

/// A slot already consumed by a committed match in the target week.
///
/// Seeds both table occupancy and the two players' personal occupancy
/// before assignment begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedSlot {
    pub slot: SlotKey,
    pub player1: PlayerId,
    pub player2: PlayerId,
}

impl CommittedSlot {
    pub fn new(slot: SlotKey, player1: impl Into<PlayerId>, player2: impl Into<PlayerId>) -> Self {
        Self {
            slot,
            player1: player1.into(),
            player2: player2.into(),
        }
    }
}

/// A match placed into a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub match_id: MatchId,
    pub slot: SlotKey,
}

impl SlotAssignment {
    pub fn new(match_id: impl Into<MatchId>, slot: SlotKey) -> Self {
        Self {
            match_id: match_id.into(),
            slot,
        }
    }

    pub fn day(&self) -> Day {
        self.slot.day()
    }

    /// Start time as `"HH:MM"`.
    pub fn time(&self) -> String {
        self.slot.time_label()
    }
}

/// Why a match was left unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnplacedReason {
    /// The two players share no available slot at all.
    NoCommonAvailability,
    /// Shared slots existed, but all were taken by the table or by
    /// another match of one of the players.
    AllCandidatesTaken,
}

/// A match the assigner could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unplaced {
    pub match_id: MatchId,
    pub reason: UnplacedReason,
    /// Number of shared available slots before contention.
    pub candidate_count: usize,
}

/// Result of scheduling one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// Placements, in the order they were decided.
    pub assignments: Vec<SlotAssignment>,
    /// Matches left unscheduled.
    pub unplaced: Vec<Unplaced>,
}

impl WeekSchedule {
    /// Creates an empty week schedule.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_assignment(&mut self, assignment: SlotAssignment) {
        self.assignments.push(assignment);
    }

    pub fn add_unplaced(&mut self, unplaced: Unplaced) {
        self.unplaced.push(unplaced);
    }

    /// Whether every input match was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// The slot given to a match, if any.
    pub fn slot_for(&self, match_id: &MatchId) -> Option<SlotKey> {
        self.assignments
            .iter()
            .find(|a| &a.match_id == match_id)
            .map(|a| a.slot)
    }

    /// The unplaced entry for a match, if any.
    pub fn unplaced_for(&self, match_id: &MatchId) -> Option<&Unplaced> {
        self.unplaced.iter().find(|u| &u.match_id == match_id)
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Consumes the schedule, keeping only the placements.
    pub fn into_assignments(self) -> Vec<SlotAssignment> {
        self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> SlotKey {
        s.parse().unwrap()
    }

    fn sample_schedule() -> WeekSchedule {
        let mut s = WeekSchedule::new();
        s.add_assignment(SlotAssignment::new("m1", slot("mon-09:00")));
        s.add_assignment(SlotAssignment::new("m2", slot("wed-18:30")));
        s.add_unplaced(Unplaced {
            match_id: MatchId::new("m3"),
            reason: UnplacedReason::NoCommonAvailability,
            candidate_count: 0,
        });
        s
    }

    #[test]
    fn test_lookup() {
        let s = sample_schedule();
        assert_eq!(s.slot_for(&"m2".into()), Some(slot("wed-18:30")));
        assert_eq!(s.slot_for(&"m3".into()), None);
        assert_eq!(
            s.unplaced_for(&"m3".into()).map(|u| u.reason),
            Some(UnplacedReason::NoCommonAvailability)
        );
        assert_eq!(s.assignment_count(), 2);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_assignment_day_and_time() {
        let a = SlotAssignment::new("m1", slot("thu-13:30"));
        assert_eq!(a.day(), Day::Thu);
        assert_eq!(a.time(), "13:30");
    }

    #[test]
    fn test_empty_schedule() {
        let s = WeekSchedule::new();
        assert!(s.is_complete());
        assert!(s.into_assignments().is_empty());
    }

    #[test]
    fn test_assignment_json() {
        let a = SlotAssignment::new("m1", slot("mon-09:00"));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["match_id"], "m1");
        assert_eq!(json["slot"], "mon-09:00");
    }
}
