//! Crate error type.
//!
//! Every error here is a precondition violation: the caller handed the
//! engine something it cannot interpret. A match that simply finds no
//! slot is not an error; see [`crate::models::WeekSchedule`].

use thiserror::Error;

use crate::models::{MatchId, PlayerId, SlotKey};
use crate::season::SeasonStatus;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors returned by fixture generation, slot assignment and the season workflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A season must span at least one week.
    #[error("total weeks must be at least 1 (got {total_weeks})")]
    InvalidWeekCount { total_weeks: u32 },

    /// A week number outside `[1, total_weeks]`.
    #[error("week {week} is outside the season range 1..={total_weeks}")]
    WeekOutOfRange { week: u32, total_weeks: u32 },

    /// A slot key that is not on the `{day}-{HH:MM}` grid.
    #[error("invalid slot key '{0}'")]
    InvalidSlotKey(String),

    /// Structural input problems, all of them.
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Starting a season needs at least two players.
    #[error("need at least 2 players to start a season (got {found})")]
    NotEnoughPlayers { found: usize },

    /// The player is already registered in this season.
    #[error("player '{0}' already joined this season")]
    AlreadyJoined(PlayerId),

    /// The requested action is not allowed in the season's current status.
    #[error("cannot {action} a season in status {status:?}")]
    InvalidTransition {
        status: SeasonStatus,
        action: &'static str,
    },

    /// `advance_week` on the final week.
    #[error("already at the last week ({total_weeks})")]
    AtLastWeek { total_weeks: u32 },

    /// No match with this ID exists in the season.
    #[error("unknown match '{0}'")]
    UnknownMatch(MatchId),

    /// The match belongs to another week than the active one.
    #[error("match '{id}' is in week {week}, not the current week {current_week}")]
    NotCurrentWeek {
        id: MatchId,
        week: u32,
        current_week: u32,
    },

    /// A result was already recorded for the match.
    #[error("match '{0}' is already completed")]
    MatchAlreadyCompleted(MatchId),

    /// No result is recorded for the match.
    #[error("match '{0}' is not completed")]
    MatchNotCompleted(MatchId),

    /// Not a best-of-5 score: the winner takes 3 games, the loser 0 to 2.
    #[error("invalid score {player1_score}-{player2_score}: winner must have 3 games, loser 0-2")]
    InvalidScore { player1_score: u8, player2_score: u8 },

    /// Another unplayed match of the week already holds the slot.
    #[error("cannot move match '{id}' to {slot}: another match is scheduled there")]
    SlotTaken { id: MatchId, slot: SlotKey },
}

impl ScheduleError {
    /// Whether this is a validation failure containing an error of `kind`.
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        match self {
            ScheduleError::Validation(errors) => errors.iter().any(|e| e.kind == kind),
            _ => false,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_all_errors() {
        let err = ScheduleError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicatePlayer, "Duplicate player: A"),
            ValidationError::new(
                ValidationErrorKind::SelfPairing,
                "Match 'm1' pairs B with itself",
            ),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate player: A; Match 'm1' pairs B with itself"
        );
        assert!(err.has_kind(ValidationErrorKind::SelfPairing));
        assert!(!err.has_kind(ValidationErrorKind::MixedWeeks));
    }

    #[test]
    fn test_score_message() {
        let err = ScheduleError::InvalidScore {
            player1_score: 3,
            player2_score: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid score 3-3: winner must have 3 games, loser 0-2"
        );
    }

    #[test]
    fn test_week_count_message() {
        let err = ScheduleError::InvalidWeekCount { total_weeks: 0 };
        assert!(err.to_string().contains("at least 1"));
    }
}
