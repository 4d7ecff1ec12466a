//! League scheduling domain models.
//!
//! Provides the data types shared by fixture generation and slot
//! assignment: players, matches, the weekly slot grid, availability,
//! and assignment results.
//!
//! # Identity
//!
//! | Type | Meaning |
//! |------|---------|
//! | `PlayerId` | Opaque player token |
//! | `MatchId` | Opaque match token, assigned by the persisting caller |
//! | `SlotKey` | `"{day}-{HH:MM}"` half-hour unit on the weekly grid |

mod availability;
mod fixture;
mod player;
mod schedule;
mod slot;

pub use availability::{Availability, AvailabilityBook};
pub use fixture::{Fixture, Match, MatchId};
pub use player::PlayerId;
pub use schedule::{CommittedSlot, SlotAssignment, Unplaced, UnplacedReason, WeekSchedule};
pub use slot::{
    Day, SlotKey, DAY_END_HOUR, DAY_START_HOUR, MINUTES_PER_DAY, SLOTS_PER_DAY, SLOTS_PER_WEEK,
    SLOT_MINUTES,
};
