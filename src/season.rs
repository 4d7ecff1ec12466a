//! In-memory season workflow.
//!
//! Drives fixture generation and slot assignment the way a league
//! manager does over a season's lifetime:
//!
//! ```text
//! Registration --start--> Active --complete--> Completed
//!                          |  ^
//!                          +--+ advance_week / rerun / register / reschedule
//!                               report_result / undo_result
//! ```
//!
//! Every week activation re-derives the table occupancy from the week's
//! already-slotted matches and hands only the unslotted, unplayed matches
//! to the assigner. Mutating operations take `&mut self`, so a season's
//! weeks are never scheduled concurrently through one value.
//!
//! Nothing here is durable; callers persist the season however they like
//! (it is `Serialize`/`Deserialize`).

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::fixtures::FixtureGenerator;
use crate::models::{
    Availability, AvailabilityBook, CommittedSlot, Fixture, Match, MatchId, PlayerId, SlotKey,
    WeekSchedule,
};
use crate::scheduler::{Occupancy, SlotAssigner};

/// Games needed to win a best-of-5 match.
pub const GAMES_TO_WIN: u8 = 3;

/// Season lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    /// Players may join; no fixtures exist yet.
    Registration,
    /// Fixtures generated, weeks being played.
    Active,
    /// Closed.
    Completed,
}

/// Whether a match has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

/// Final score of a best-of-5 match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player1_score: u8,
    pub player2_score: u8,
    pub winner: PlayerId,
}

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub wins: u32,
    pub losses: u32,
}

impl Standing {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Wins over games played; 0.0 before the first game.
    pub fn win_pct(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            played => f64::from(self.wins) / f64::from(played),
        }
    }
}

/// A match plus its season bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonMatch {
    pub fixture: Match,
    pub status: MatchStatus,
    /// Assigned slot within the match's week, if any.
    pub slot: Option<SlotKey>,
    /// Recorded score, present once completed.
    pub result: Option<MatchResult>,
}

impl SeasonMatch {
    fn new(fixture: Match) -> Self {
        Self {
            fixture,
            status: MatchStatus::Scheduled,
            slot: None,
            result: None,
        }
    }

    pub fn id(&self) -> &MatchId {
        &self.fixture.id
    }

    pub fn week(&self) -> u32 {
        self.fixture.week
    }

    /// Scheduled but not yet given a slot.
    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Scheduled && self.slot.is_none()
    }
}

/// A league season.
///
/// # Example
///
/// ```
/// use league_schedule::models::{Availability, AvailabilityBook, PlayerId};
/// use league_schedule::scheduler::SlotAssigner;
/// use league_schedule::season::{Season, SeasonStatus};
///
/// let mut season = Season::new(3).unwrap();
/// let book = AvailabilityBook::new();
/// let assigner = SlotAssigner::new();
/// for p in ["A", "B", "C"] {
///     season.register(PlayerId::new(p), &book, &assigner).unwrap();
/// }
///
/// season.start(&book, &assigner).unwrap();
/// assert_eq!(season.status(), SeasonStatus::Active);
/// assert_eq!(season.matches().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    total_weeks: u32,
    current_week: u32,
    status: SeasonStatus,
    starts_on: Option<NaiveDate>,
    players: Vec<PlayerId>,
    matches: Vec<SeasonMatch>,
    next_match: u64,
}

impl Season {
    /// Creates a season in registration.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidWeekCount`] if `total_weeks` is 0.
    pub fn new(total_weeks: u32) -> Result<Self, ScheduleError> {
        if total_weeks == 0 {
            return Err(ScheduleError::InvalidWeekCount { total_weeks });
        }
        Ok(Self {
            total_weeks,
            current_week: 0,
            status: SeasonStatus::Registration,
            starts_on: None,
            players: Vec::new(),
            matches: Vec::new(),
            next_match: 1,
        })
    }

    /// Sets the calendar date of the season's first day.
    pub fn with_start_date(mut self, starts_on: NaiveDate) -> Self {
        self.starts_on = Some(starts_on);
        self
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    /// Active week (1-based); 0 before the season starts.
    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn status(&self) -> SeasonStatus {
        self.status
    }

    pub fn starts_on(&self) -> Option<NaiveDate> {
        self.starts_on
    }

    /// Registered players in join order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn matches(&self) -> &[SeasonMatch] {
        &self.matches
    }

    pub fn matches_in_week(&self, week: u32) -> impl Iterator<Item = &SeasonMatch> {
        self.matches.iter().filter(move |m| m.week() == week)
    }

    pub fn get_match(&self, id: &MatchId) -> Option<&SeasonMatch> {
        self.matches.iter().find(|m| m.id() == id)
    }

    /// Calendar date-time of a slotted match, if the season has a start date.
    pub fn match_time(&self, id: &MatchId) -> Option<NaiveDateTime> {
        let m = self.get_match(id)?;
        m.slot?.resolve(self.starts_on?, m.week())
    }

    /// Adds a player.
    ///
    /// During registration the player is only recorded. In an active
    /// season the player also gets one fixture against every existing
    /// player over the remaining weeks, and the current week is scheduled
    /// again so the new matches can take free slots.
    ///
    /// # Errors
    /// - [`ScheduleError::AlreadyJoined`] if the player is registered
    /// - [`ScheduleError::InvalidTransition`] if the season is completed
    pub fn register(
        &mut self,
        player: PlayerId,
        availability: &AvailabilityBook,
        assigner: &SlotAssigner,
    ) -> Result<Option<WeekSchedule>, ScheduleError> {
        if self.players.contains(&player) {
            return Err(ScheduleError::AlreadyJoined(player));
        }

        match self.status {
            SeasonStatus::Registration => {
                info!("player {} registered", player);
                self.players.push(player);
                Ok(None)
            }
            SeasonStatus::Active => {
                let fixtures = FixtureGenerator::new().join_mid_season(
                    &player,
                    &self.players,
                    self.current_week,
                    self.total_weeks,
                )?;
                self.players.push(player);
                self.add_fixtures(fixtures);
                self.schedule_current_week(availability, assigner).map(Some)
            }
            status => Err(ScheduleError::InvalidTransition {
                status,
                action: "join",
            }),
        }
    }

    /// Generates the full round-robin and activates week 1.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidTransition`] unless in registration
    /// - [`ScheduleError::NotEnoughPlayers`] with fewer than two players
    pub fn start(
        &mut self,
        availability: &AvailabilityBook,
        assigner: &SlotAssigner,
    ) -> Result<WeekSchedule, ScheduleError> {
        self.require(SeasonStatus::Registration, "start")?;
        if self.players.len() < 2 {
            return Err(ScheduleError::NotEnoughPlayers {
                found: self.players.len(),
            });
        }

        let fixtures = FixtureGenerator::new().generate(&self.players, self.total_weeks)?;
        self.add_fixtures(fixtures);
        self.status = SeasonStatus::Active;
        self.current_week = 1;

        info!(
            "season started: {} players, {} matches, {} weeks",
            self.players.len(),
            self.matches.len(),
            self.total_weeks
        );
        self.schedule_current_week(availability, assigner)
    }

    /// Moves to the next week and schedules it.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidTransition`] unless active
    /// - [`ScheduleError::AtLastWeek`] on the final week
    pub fn advance_week(
        &mut self,
        availability: &AvailabilityBook,
        assigner: &SlotAssigner,
    ) -> Result<WeekSchedule, ScheduleError> {
        self.require(SeasonStatus::Active, "advance")?;
        if self.current_week >= self.total_weeks {
            return Err(ScheduleError::AtLastWeek {
                total_weeks: self.total_weeks,
            });
        }

        self.current_week += 1;
        info!("advanced to week {}", self.current_week);
        self.schedule_current_week(availability, assigner)
    }

    /// Clears the slots of the current week's unplayed matches and assigns
    /// them again, e.g. after players changed their availability.
    ///
    /// Played matches keep their slots and keep occupying the table.
    pub fn rerun(
        &mut self,
        availability: &AvailabilityBook,
        assigner: &SlotAssigner,
    ) -> Result<WeekSchedule, ScheduleError> {
        self.require(SeasonStatus::Active, "re-run")?;

        let week = self.current_week;
        let mut cleared = 0usize;
        for m in self
            .matches
            .iter_mut()
            .filter(|m| m.week() == week && m.status == MatchStatus::Scheduled)
        {
            if m.slot.take().is_some() {
                cleared += 1;
            }
        }

        info!("re-running week {} ({} slots cleared)", week, cleared);
        self.schedule_current_week(availability, assigner)
    }

    /// Records the score of a current-week match and marks it completed.
    ///
    /// Matches are best of 5: one side must have exactly 3 games and the
    /// other 0 to 2. A completed match keeps its slot.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidTransition`] unless active
    /// - [`ScheduleError::UnknownMatch`] if no such match exists
    /// - [`ScheduleError::MatchAlreadyCompleted`] if a result exists
    /// - [`ScheduleError::NotCurrentWeek`] for matches of other weeks
    /// - [`ScheduleError::InvalidScore`] for anything but 3-0, 3-1, 3-2 (either way)
    pub fn report_result(
        &mut self,
        id: &MatchId,
        player1_score: u8,
        player2_score: u8,
    ) -> Result<&MatchResult, ScheduleError> {
        self.require(SeasonStatus::Active, "record a result in")?;
        let current_week = self.current_week;
        let m = self.match_mut(id)?;
        if m.status == MatchStatus::Completed {
            return Err(ScheduleError::MatchAlreadyCompleted(id.clone()));
        }
        if m.week() != current_week {
            return Err(ScheduleError::NotCurrentWeek {
                id: id.clone(),
                week: m.week(),
                current_week,
            });
        }

        let winner = match (player1_score, player2_score) {
            (GAMES_TO_WIN, loser) if loser < GAMES_TO_WIN => m.fixture.player1.clone(),
            (loser, GAMES_TO_WIN) if loser < GAMES_TO_WIN => m.fixture.player2.clone(),
            _ => {
                return Err(ScheduleError::InvalidScore {
                    player1_score,
                    player2_score,
                });
            }
        };

        info!("match {}: {} wins {}-{}", id, winner, player1_score, player2_score);
        m.status = MatchStatus::Completed;
        Ok(m.result.insert(MatchResult {
            player1_score,
            player2_score,
            winner,
        }))
    }

    /// Removes a recorded result, returning the match to scheduled.
    ///
    /// # Errors
    /// - [`ScheduleError::UnknownMatch`] if no such match exists
    /// - [`ScheduleError::MatchNotCompleted`] if no result is recorded
    pub fn undo_result(&mut self, id: &MatchId) -> Result<MatchResult, ScheduleError> {
        let m = self.match_mut(id)?;
        let result = match (m.status, m.result.take()) {
            (MatchStatus::Completed, Some(result)) => result,
            (_, previous) => {
                m.result = previous;
                return Err(ScheduleError::MatchNotCompleted(id.clone()));
            }
        };
        m.status = MatchStatus::Scheduled;
        info!("match {}: result undone", id);
        Ok(result)
    }

    /// League table: every player, most wins first, then best win rate.
    /// Equal rows keep registration order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut table: Vec<Standing> = self
            .players
            .iter()
            .map(|player| Standing {
                player: player.clone(),
                wins: 0,
                losses: 0,
            })
            .collect();

        for m in &self.matches {
            let Some(result) = &m.result else {
                continue;
            };
            let loser = m.fixture.opponent_of(&result.winner);
            for row in table.iter_mut() {
                if row.player == result.winner {
                    row.wins += 1;
                } else if Some(&row.player) == loser {
                    row.losses += 1;
                }
            }
        }

        table.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.win_pct().total_cmp(&a.win_pct()))
        });
        table
    }

    /// Slots a match could move to within its week.
    ///
    /// Both players must be available there, and neither the table nor
    /// either player may be held by another unplayed match of the week.
    /// The match's own slot counts as free. Slots come back in
    /// chronological order.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownMatch`] if no such match exists.
    pub fn valid_reschedule_slots(
        &self,
        id: &MatchId,
        availability: &AvailabilityBook,
    ) -> Result<Vec<SlotKey>, ScheduleError> {
        let m = self
            .get_match(id)
            .ok_or_else(|| ScheduleError::UnknownMatch(id.clone()))?;
        let (p1, p2) = (&m.fixture.player1, &m.fixture.player2);
        let (Some(first), Some(second)) = (availability.get(p1), availability.get(p2)) else {
            return Ok(Vec::new());
        };

        let occupancy = self.occupancy_excluding(m);
        Ok(first
            .available_slots()
            .map(|(slot, _)| slot)
            .filter(|slot| second.is_available(slot) && occupancy.is_free(slot, p1, p2))
            .collect())
    }

    /// Moves a current-week match to `slot`.
    ///
    /// Availability is not checked; the players agreed on the new time.
    /// Only another unplayed match already at `slot` blocks the move.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidTransition`] unless active
    /// - [`ScheduleError::UnknownMatch`] if no such match exists
    /// - [`ScheduleError::MatchAlreadyCompleted`] for played matches
    /// - [`ScheduleError::NotCurrentWeek`] for matches of other weeks
    /// - [`ScheduleError::SlotTaken`] if another match holds the slot
    pub fn reschedule(&mut self, id: &MatchId, slot: SlotKey) -> Result<(), ScheduleError> {
        self.require(SeasonStatus::Active, "reschedule in")?;
        let m = self
            .get_match(id)
            .ok_or_else(|| ScheduleError::UnknownMatch(id.clone()))?;
        if m.status == MatchStatus::Completed {
            return Err(ScheduleError::MatchAlreadyCompleted(id.clone()));
        }
        if m.week() != self.current_week {
            return Err(ScheduleError::NotCurrentWeek {
                id: id.clone(),
                week: m.week(),
                current_week: self.current_week,
            });
        }
        if !self
            .occupancy_excluding(m)
            .is_free(&slot, &m.fixture.player1, &m.fixture.player2)
        {
            return Err(ScheduleError::SlotTaken {
                id: id.clone(),
                slot,
            });
        }

        let m = self.match_mut(id)?;
        let previous = m.slot.replace(slot);
        info!(
            "match {} moved from {} to {}",
            id,
            previous.map_or_else(|| "unscheduled".to_string(), |s| s.to_string()),
            slot
        );
        Ok(())
    }

    /// Closes the season.
    pub fn complete(&mut self) -> Result<(), ScheduleError> {
        self.require(SeasonStatus::Active, "complete")?;
        self.status = SeasonStatus::Completed;
        info!("season completed after week {}", self.current_week);
        Ok(())
    }

    fn require(&self, expected: SeasonStatus, action: &'static str) -> Result<(), ScheduleError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ScheduleError::InvalidTransition {
                status: self.status,
                action,
            })
        }
    }

    fn match_mut(&mut self, id: &MatchId) -> Result<&mut SeasonMatch, ScheduleError> {
        self.matches
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| ScheduleError::UnknownMatch(id.clone()))
    }

    /// Occupancy of `target`'s week from the other unplayed, slotted matches.
    fn occupancy_excluding(&self, target: &SeasonMatch) -> Occupancy {
        let committed: Vec<CommittedSlot> = self
            .matches_in_week(target.week())
            .filter(|m| m.id() != target.id() && m.status == MatchStatus::Scheduled)
            .filter_map(|m| {
                m.slot.map(|slot| {
                    CommittedSlot::new(slot, m.fixture.player1.clone(), m.fixture.player2.clone())
                })
            })
            .collect();
        Occupancy::from_committed(&committed)
    }

    fn add_fixtures(&mut self, fixtures: Vec<Fixture>) {
        for fixture in fixtures {
            let id = format!("m{}", self.next_match);
            self.next_match += 1;
            self.matches.push(SeasonMatch::new(fixture.into_match(id)));
        }
    }

    fn schedule_current_week(
        &mut self,
        availability: &AvailabilityBook,
        assigner: &SlotAssigner,
    ) -> Result<WeekSchedule, ScheduleError> {
        let week = self.current_week;

        // Every season player is on the roster, even without submitted slots.
        let mut roster = AvailabilityBook::new();
        for player in &self.players {
            roster.insert(
                player.clone(),
                availability.get(player).cloned().unwrap_or_else(Availability::new),
            );
        }

        let committed: Vec<CommittedSlot> = self
            .matches_in_week(week)
            .filter_map(|m| {
                m.slot.map(|slot| {
                    CommittedSlot::new(slot, m.fixture.player1.clone(), m.fixture.player2.clone())
                })
            })
            .collect();
        let pending: Vec<Match> = self
            .matches_in_week(week)
            .filter(|m| m.is_pending())
            .map(|m| m.fixture.clone())
            .collect();

        let schedule = assigner.schedule_week(&pending, &roster, &committed)?;

        for assignment in &schedule.assignments {
            if let Some(m) = self
                .matches
                .iter_mut()
                .find(|m| m.id() == &assignment.match_id)
            {
                m.slot = Some(assignment.slot);
            }
        }

        info!(
            "week {}: {} of {} pending matches slotted ({} already committed)",
            week,
            schedule.assignment_count(),
            pending.len(),
            committed.len()
        );
        if !schedule.is_complete() {
            warn!(
                "week {}: {} matches left without a slot",
                week,
                schedule.unplaced.len()
            );
        }
        Ok(schedule)
    }
}
