//! Player availability.
//!
//! Each player submits a sparse map from slot to preference weight.
//! Weight `0` or an absent slot means unavailable; any positive weight
//! means available, and higher weights are preferred by the assigner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PlayerId, SlotKey};

/// One player's weekly availability (slot → preference weight).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    slots: BTreeMap<SlotKey, u32>,
}

impl Availability {
    /// Creates an empty availability (unavailable everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preference weight of a slot.
    pub fn with_slot(mut self, slot: SlotKey, weight: u32) -> Self {
        self.set(slot, weight);
        self
    }

    /// Sets the preference weight of a slot (`0` clears it).
    pub fn set(&mut self, slot: SlotKey, weight: u32) {
        if weight == 0 {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, weight);
        }
    }

    /// Preference weight at `slot` (`0` = unavailable).
    #[inline]
    pub fn weight(&self, slot: &SlotKey) -> u32 {
        self.slots.get(slot).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_available(&self, slot: &SlotKey) -> bool {
        self.weight(slot) > 0
    }

    /// Available slots with their weights, in chronological order.
    pub fn available_slots(&self) -> impl Iterator<Item = (SlotKey, u32)> + '_ {
        self.slots
            .iter()
            .filter(|(_, w)| **w > 0)
            .map(|(&slot, &w)| (slot, w))
    }

    /// Number of available slots.
    pub fn available_count(&self) -> usize {
        self.available_slots().count()
    }

    pub fn is_empty(&self) -> bool {
        self.available_count() == 0
    }
}

impl FromIterator<(SlotKey, u32)> for Availability {
    fn from_iter<I: IntoIterator<Item = (SlotKey, u32)>>(iter: I) -> Self {
        let mut availability = Availability::new();
        for (slot, weight) in iter {
            availability.set(slot, weight);
        }
        availability
    }
}

/// Availability for every player relevant to a scheduling call.
///
/// The set of players present in the book is the roster the assigner
/// accepts matches for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityBook {
    players: BTreeMap<PlayerId, Availability>,
}

impl AvailabilityBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a player's availability.
    pub fn with_player(mut self, player: impl Into<PlayerId>, availability: Availability) -> Self {
        self.insert(player, availability);
        self
    }

    /// Adds or replaces a player's availability.
    pub fn insert(&mut self, player: impl Into<PlayerId>, availability: Availability) {
        self.players.insert(player.into(), availability);
    }

    pub fn get(&self, player: &PlayerId) -> Option<&Availability> {
        self.players.get(player)
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains_key(player)
    }

    /// Players in the book, in ID order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.keys()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Slots where both players are available, with the summed weight.
    ///
    /// Chronological order. Unknown players have no availability.
    pub fn overlap(&self, a: &PlayerId, b: &PlayerId) -> Vec<(SlotKey, u32)> {
        let (Some(first), Some(second)) = (self.get(a), self.get(b)) else {
            return Vec::new();
        };
        first
            .available_slots()
            .filter_map(|(slot, w1)| {
                let w2 = second.weight(&slot);
                (w2 > 0).then_some((slot, w1.saturating_add(w2)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> SlotKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_weight_and_zero_clears() {
        let mut a = Availability::new()
            .with_slot(slot("mon-09:00"), 2)
            .with_slot(slot("tue-10:00"), 1);
        assert_eq!(a.weight(&slot("mon-09:00")), 2);
        assert_eq!(a.weight(&slot("wed-09:00")), 0);
        assert_eq!(a.available_count(), 2);

        a.set(slot("mon-09:00"), 0);
        assert!(!a.is_available(&slot("mon-09:00")));
        assert_eq!(a.available_count(), 1);
    }

    #[test]
    fn test_available_slots_chronological() {
        let a: Availability = [
            (slot("wed-09:00"), 1),
            (slot("mon-20:00"), 3),
            (slot("mon-08:00"), 1),
        ]
        .into_iter()
        .collect();
        let keys: Vec<String> = a.available_slots().map(|(s, _)| s.to_string()).collect();
        assert_eq!(keys, vec!["mon-08:00", "mon-20:00", "wed-09:00"]);
    }

    #[test]
    fn test_overlap() {
        let book = AvailabilityBook::new()
            .with_player(
                "A",
                Availability::new()
                    .with_slot(slot("mon-09:00"), 1)
                    .with_slot(slot("wed-12:00"), 2),
            )
            .with_player(
                "B",
                Availability::new()
                    .with_slot(slot("mon-09:00"), 3)
                    .with_slot(slot("tue-10:00"), 1),
            );

        let overlap = book.overlap(&"A".into(), &"B".into());
        assert_eq!(overlap, vec![(slot("mon-09:00"), 4)]);
        assert!(book.overlap(&"A".into(), &"Z".into()).is_empty());
    }

    #[test]
    fn test_book_json_shape() {
        let json = r#"{"A": {"mon-09:00": 1, "tue-10:00": 2}, "B": {}}"#;
        let book: AvailabilityBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.len(), 2);
        assert!(book.contains(&"B".into()));
        assert!(book.get(&"B".into()).unwrap().is_empty());
        assert_eq!(book.get(&"A".into()).unwrap().weight(&slot("tue-10:00")), 2);
    }

    #[test]
    fn test_signed_slot_key_rejected() {
        let json = r#"{"A": {"mon-09:00": 1, "mon-+9:00": 5}}"#;
        assert!(serde_json::from_str::<AvailabilityBook>(json).is_err());
    }
}
