//! Input validation for fixture generation and slot assignment.
//!
//! Checks structural integrity of rosters and weekly match lists before
//! any scheduling work is done. Detects:
//! - Duplicate players in a roster
//! - Duplicate match IDs
//! - Matches pairing a player with themselves
//! - Week number 0, or a match list spanning more than one week
//! - Matches referencing players absent from the assignment roster
//!
//! Every problem found is reported, not just the first.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::{AvailabilityBook, Match, PlayerId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A player appears twice in a roster.
    DuplicatePlayer,
    /// Two matches share the same ID.
    DuplicateMatchId,
    /// A match pairs a player with themselves.
    SelfPairing,
    /// A match carries week number 0.
    ZeroWeek,
    /// Matches handed to one assigner call belong to different weeks.
    MixedWeeks,
    /// A match references a player with no entry in the availability book.
    UnknownPlayer,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster: no player may appear twice.
pub fn validate_roster(players: &[PlayerId]) -> ValidationResult {
    let mut seen = BTreeSet::new();
    let errors: Vec<ValidationError> = players
        .iter()
        .filter(|p| !seen.insert(*p))
        .map(|p| {
            ValidationError::new(
                ValidationErrorKind::DuplicatePlayer,
                format!("Duplicate player: {p}"),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the matches of one assigner call.
///
/// Checks:
/// 1. No duplicate match IDs
/// 2. No match pairs a player with themselves
/// 3. No match has week 0
/// 4. All matches share one week number
/// 5. Every participant has an entry in `availability`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_week(matches: &[Match], availability: &AvailabilityBook) -> ValidationResult {
    let mut errors = Vec::new();

    let mut match_ids = BTreeSet::new();
    for m in matches {
        if !match_ids.insert(&m.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateMatchId,
                format!("Duplicate match ID: {}", m.id),
            ));
        }

        if m.player1 == m.player2 {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPairing,
                format!("Match '{}' pairs {} with itself", m.id, m.player1),
            ));
        }

        if m.week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWeek,
                format!("Match '{}' has week number 0", m.id),
            ));
        }
    }

    let weeks: BTreeSet<u32> = matches.iter().map(|m| m.week).collect();
    if weeks.len() > 1 {
        let listed: Vec<String> = weeks.iter().map(|w| w.to_string()).collect();
        errors.push(ValidationError::new(
            ValidationErrorKind::MixedWeeks,
            format!("Matches span several weeks: {}", listed.join(", ")),
        ));
    }

    // Report each unknown player once, in ID order.
    let unknown: BTreeSet<&PlayerId> = matches
        .iter()
        .flat_map(|m| m.players())
        .filter(|p| !availability.contains(p))
        .collect();
    for player in unknown {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownPlayer,
            format!("Player '{player}' has no availability entry"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
