//! Per-call occupancy working set.
//!
//! Tracks which slots the single table is already booked for and which
//! slots each player is committed to. Built fresh for every assigner
//! call from the caller's committed matches and discarded afterwards.
//! Ordered collections keep every lookup and iteration deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{CommittedSlot, PlayerId, SlotKey};

#[derive(Debug, Clone, Default)]
pub(crate) struct Occupancy {
    table: BTreeSet<SlotKey>,
    players: BTreeMap<PlayerId, BTreeSet<SlotKey>>,
}

impl Occupancy {
    pub(crate) fn from_committed(committed: &[CommittedSlot]) -> Self {
        let mut occupancy = Self::default();
        for c in committed {
            occupancy.commit(c.slot, &c.player1, &c.player2);
        }
        occupancy
    }

    /// Whether the table and both players are free at `slot`.
    pub(crate) fn is_free(&self, slot: &SlotKey, p1: &PlayerId, p2: &PlayerId) -> bool {
        !self.table.contains(slot)
            && !self.player_has(p1, slot)
            && !self.player_has(p2, slot)
    }

    pub(crate) fn commit(&mut self, slot: SlotKey, p1: &PlayerId, p2: &PlayerId) {
        self.table.insert(slot);
        self.players.entry(p1.clone()).or_default().insert(slot);
        self.players.entry(p2.clone()).or_default().insert(slot);
    }

    /// Distance in minutes from `slot` to the player's nearest committed
    /// slot, or `None` if the player has nothing this week.
    pub(crate) fn nearest_distance(&self, player: &PlayerId, slot: &SlotKey) -> Option<u32> {
        self.players
            .get(player)?
            .iter()
            .map(|s| s.distance_minutes(slot))
            .min()
    }

    fn player_has(&self, player: &PlayerId, slot: &SlotKey) -> bool {
        self.players
            .get(player)
            .is_some_and(|slots| slots.contains(slot))
    }
}
