//! Match and fixture models.
//!
//! A [`Fixture`] is a pairing tagged with its week, as produced by the
//! round-robin generator. Once the caller gives it an identity it becomes
//! a [`Match`], the unit the slot assigner works on. Slot fields are not
//! part of either type; placements live in [`super::SlotAssignment`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PlayerId;

/// Opaque match identifier, assigned by whoever persists the fixture.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    /// Creates a match ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A pairing of two players in a given week (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub week: u32,
}

impl Fixture {
    /// Creates a fixture.
    pub fn new(player1: impl Into<PlayerId>, player2: impl Into<PlayerId>, week: u32) -> Self {
        Self {
            player1: player1.into(),
            player2: player2.into(),
            week,
        }
    }

    /// Gives the fixture an identity.
    pub fn into_match(self, id: impl Into<MatchId>) -> Match {
        Match {
            id: id.into(),
            player1: self.player1,
            player2: self.player2,
            week: self.week,
        }
    }
}

/// A match as the engine sees it: an identified pairing with a fixed week.
///
/// The week number is fixed at creation and never changed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub week: u32,
}

impl Match {
    /// Creates a match.
    pub fn new(
        id: impl Into<MatchId>,
        player1: impl Into<PlayerId>,
        player2: impl Into<PlayerId>,
        week: u32,
    ) -> Self {
        Self {
            id: id.into(),
            player1: player1.into(),
            player2: player2.into(),
            week,
        }
    }

    /// Whether `player` takes part in this match.
    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.player1 == player || &self.player2 == player
    }

    /// The other participant, if `player` takes part.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        if &self.player1 == player {
            Some(&self.player2)
        } else if &self.player2 == player {
            Some(&self.player1)
        } else {
            None
        }
    }

    /// Both participants.
    pub fn players(&self) -> [&PlayerId; 2] {
        [&self.player1, &self.player2]
    }
}
