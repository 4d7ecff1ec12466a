//! Slot assigner configuration.

use serde::{Deserialize, Serialize};

use crate::models::MINUTES_PER_DAY;

/// Canonical order in which candidate slots are scored.
///
/// The assigner keeps the first candidate reaching the best score, so
/// this order decides ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTieBreak {
    /// Earliest slot in the week wins (Monday 08:00 first).
    #[default]
    Chronological,
    /// Lexically smallest slot key wins (`"fri-…"` before `"mon-…"`).
    Lexical,
}

/// Tunables for [`super::SlotAssigner`].
///
/// # Example
///
/// ```
/// use league_schedule::scheduler::{AssignerConfig, SlotTieBreak};
///
/// let config = AssignerConfig::default()
///     .with_spacing_weight(2.0)
///     .with_tie_break(SlotTieBreak::Lexical);
/// assert_eq!(config.spacing_saturation_minutes, 1440);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignerConfig {
    /// Maximum spacing bonus per player.
    pub spacing_weight: f64,
    /// Distance (minutes) from a player's nearest other match at which
    /// the spacing bonus reaches its maximum.
    pub spacing_saturation_minutes: u32,
    /// Candidate order used for tie-breaking.
    pub tie_break: SlotTieBreak,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        Self {
            spacing_weight: 3.0,
            spacing_saturation_minutes: MINUTES_PER_DAY,
            tie_break: SlotTieBreak::Chronological,
        }
    }
}

impl AssignerConfig {
    /// Sets the maximum spacing bonus per player.
    pub fn with_spacing_weight(mut self, weight: f64) -> Self {
        self.spacing_weight = weight;
        self
    }

    /// Sets the saturation distance of the spacing bonus.
    pub fn with_spacing_saturation(mut self, minutes: u32) -> Self {
        self.spacing_saturation_minutes = minutes;
        self
    }

    /// Sets the tie-breaking order.
    pub fn with_tie_break(mut self, tie_break: SlotTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Spacing bonus for a slot whose nearest other match of the same
    /// player is `min_distance` minutes away.
    ///
    /// `min(distance / saturation, 1) * weight`.
    pub fn spacing_bonus(&self, min_distance: u32) -> f64 {
        if self.spacing_saturation_minutes == 0 {
            return self.spacing_weight;
        }
        let ratio = f64::from(min_distance) / f64::from(self.spacing_saturation_minutes);
        ratio.min(1.0) * self.spacing_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AssignerConfig::default();
        assert_eq!(c.spacing_weight, 3.0);
        assert_eq!(c.spacing_saturation_minutes, 1440);
        assert_eq!(c.tie_break, SlotTieBreak::Chronological);
    }

    #[test]
    fn test_spacing_bonus_saturates() {
        let c = AssignerConfig::default();
        assert_eq!(c.spacing_bonus(0), 0.0);
        assert!((c.spacing_bonus(720) - 1.5).abs() < 1e-10);
        assert_eq!(c.spacing_bonus(1440), 3.0);
        assert_eq!(c.spacing_bonus(5000), 3.0);
    }

    #[test]
    fn test_zero_saturation_gives_full_bonus() {
        let c = AssignerConfig::default().with_spacing_saturation(0);
        assert_eq!(c.spacing_bonus(30), 3.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: AssignerConfig = serde_json::from_str(r#"{"tie_break": "lexical"}"#).unwrap();
        assert_eq!(c.tie_break, SlotTieBreak::Lexical);
        assert_eq!(c.spacing_weight, 3.0);

        let round: AssignerConfig =
            serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert_eq!(round, c);
    }
}
