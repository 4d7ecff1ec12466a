//! Week schedule quality metrics (KPIs).
//!
//! Computes indicators from one assigner run and its inputs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed / Unplaced | Matches given a slot / left unscheduled |
//! | Placement Rate | placed / input matches |
//! | Avg Preference | Mean `weight1 + weight2` at the chosen slots |
//! | Min Player Gap | Smallest gap between two placed matches of one player |

use std::collections::BTreeMap;

use crate::models::{AvailabilityBook, Match, MatchId, PlayerId, SlotKey, WeekSchedule};

/// Weekly scheduling performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekKpi {
    /// Matches that received a slot.
    pub placed: usize,
    /// Matches left unscheduled.
    pub unplaced: usize,
    /// Fraction of input matches placed (0.0..1.0); 1.0 when there were none.
    pub placement_rate: f64,
    /// Mean combined preference weight at the chosen slots.
    pub avg_preference: f64,
    /// Smallest gap in minutes between two placed matches of the same
    /// player. `None` if no player has two placed matches.
    pub min_player_gap_minutes: Option<u32>,
    /// Placed matches per player.
    pub matches_by_player: BTreeMap<PlayerId, usize>,
}

impl WeekKpi {
    /// Computes KPIs from a week schedule and its inputs.
    ///
    /// # Arguments
    /// * `schedule` - The assigner's result.
    /// * `matches` - The matches that were handed to the assigner.
    /// * `availability` - The availability used for that run.
    pub fn calculate(
        schedule: &WeekSchedule,
        matches: &[Match],
        availability: &AvailabilityBook,
    ) -> Self {
        let by_id: BTreeMap<&MatchId, &Match> = matches.iter().map(|m| (&m.id, m)).collect();

        let mut player_slots: BTreeMap<PlayerId, Vec<SlotKey>> = BTreeMap::new();
        let mut total_preference: u64 = 0;
        let mut placed = 0usize;

        for assignment in &schedule.assignments {
            let Some(m) = by_id.get(&assignment.match_id) else {
                continue;
            };
            placed += 1;

            for player in m.players() {
                let weight = availability
                    .get(player)
                    .map_or(0, |a| a.weight(&assignment.slot));
                total_preference += u64::from(weight);
                player_slots
                    .entry(player.clone())
                    .or_default()
                    .push(assignment.slot);
            }
        }

        let min_player_gap_minutes = player_slots
            .values_mut()
            .filter_map(|slots| {
                slots.sort();
                slots.windows(2).map(|w| w[0].distance_minutes(&w[1])).min()
            })
            .min();

        let matches_by_player = player_slots
            .into_iter()
            .map(|(player, slots)| (player, slots.len()))
            .collect();

        let placement_rate = if matches.is_empty() {
            1.0
        } else {
            placed as f64 / matches.len() as f64
        };

        let avg_preference = if placed == 0 {
            0.0
        } else {
            total_preference as f64 / placed as f64
        };

        Self {
            placed,
            unplaced: schedule.unplaced.len(),
            placement_rate,
            avg_preference,
            min_player_gap_minutes,
            matches_by_player,
        }
    }

    /// Whether the week meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, min_gap_minutes: u32) -> bool {
        self.placement_rate >= min_placement_rate
            && self
                .min_player_gap_minutes
                .map_or(true, |gap| gap >= min_gap_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;
    use crate::scheduler::SlotAssigner;

    fn slot(s: &str) -> SlotKey {
        s.parse().unwrap()
    }

    fn sample() -> (Vec<Match>, AvailabilityBook) {
        let matches = vec![
            Match::new("m1", "A", "B", 1),
            Match::new("m2", "B", "C", 1),
            Match::new("m3", "C", "D", 1),
        ];
        let book = AvailabilityBook::new()
            .with_player("A", Availability::new().with_slot(slot("mon-09:00"), 2))
            .with_player(
                "B",
                Availability::new()
                    .with_slot(slot("mon-09:00"), 1)
                    .with_slot(slot("wed-09:00"), 1),
            )
            .with_player("C", Availability::new().with_slot(slot("wed-09:00"), 3))
            .with_player("D", Availability::new());
        (matches, book)
    }

    #[test]
    fn test_kpi_from_assigner_run() {
        let (matches, book) = sample();
        let schedule = SlotAssigner::new().schedule_week(&matches, &book, &[]).unwrap();
        let kpi = WeekKpi::calculate(&schedule, &matches, &book);

        assert_eq!(kpi.placed, 2);
        assert_eq!(kpi.unplaced, 1);
        assert!((kpi.placement_rate - 2.0 / 3.0).abs() < 1e-10);
        // m1: 2 + 1 at Monday, m2: 1 + 3 at Wednesday.
        assert!((kpi.avg_preference - 3.5).abs() < 1e-10);
        assert_eq!(kpi.min_player_gap_minutes, Some(2880));
        assert_eq!(kpi.matches_by_player[&PlayerId::new("B")], 2);
        assert!(!kpi.matches_by_player.contains_key(&PlayerId::new("D")));
    }

    #[test]
    fn test_thresholds() {
        let (matches, book) = sample();
        let schedule = SlotAssigner::new().schedule_week(&matches, &book, &[]).unwrap();
        let kpi = WeekKpi::calculate(&schedule, &matches, &book);

        assert!(kpi.meets_thresholds(0.5, 1440));
        assert!(!kpi.meets_thresholds(0.9, 0));
        assert!(!kpi.meets_thresholds(0.5, 3000));
    }

    #[test]
    fn test_empty_week() {
        let kpi = WeekKpi::calculate(&WeekSchedule::new(), &[], &AvailabilityBook::new());
        assert_eq!(kpi.placed, 0);
        assert_eq!(kpi.placement_rate, 1.0);
        assert_eq!(kpi.avg_preference, 0.0);
        assert_eq!(kpi.min_player_gap_minutes, None);
    }
}
