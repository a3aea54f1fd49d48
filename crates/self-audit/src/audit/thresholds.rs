use serde::{Deserialize, Serialize};

use super::domain::{Band, GradeTier, PriorityTier};

/// Score boundaries shared by priority tiers, grade tiers, findings and row banding.
///
/// Every bound is inclusive on the tier above it: a score equal to
/// `improvement_below` is already `Low` priority and `Good` grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub critical_below: f64,
    pub improvement_below: f64,
    pub excellent_from: f64,
}

impl ScoreThresholds {
    pub const STANDARD: Self = Self {
        critical_below: 50.0,
        improvement_below: 70.0,
        excellent_from: 85.0,
    };

    /// Checks `0 < critical_below < improvement_below < excellent_from <= 100`.
    pub fn is_ordered(&self) -> bool {
        0.0 < self.critical_below
            && self.critical_below < self.improvement_below
            && self.improvement_below < self.excellent_from
            && self.excellent_from <= 100.0
    }

    pub fn priority(&self, percent: f64) -> PriorityTier {
        if percent < self.critical_below {
            PriorityTier::High
        } else if percent < self.improvement_below {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    pub fn grade(&self, score: f64) -> GradeTier {
        if score >= self.excellent_from {
            GradeTier::Excellent
        } else if score >= self.improvement_below {
            GradeTier::Good
        } else if score >= self.critical_below {
            GradeTier::NeedsImprovement
        } else {
            GradeTier::Critical
        }
    }

    pub fn band(&self, percent: f64) -> Band {
        match self.priority(percent) {
            PriorityTier::High => Band::Red,
            PriorityTier::Medium => Band::Amber,
            PriorityTier::Low => Band::Green,
        }
    }

    /// Whether a category or single question score should be surfaced for follow-up.
    pub fn needs_attention(&self, percent: f64) -> bool {
        percent < self.improvement_below
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_bounds_are_inclusive_on_the_upper_tier() {
        let thresholds = ScoreThresholds::STANDARD;
        assert_eq!(thresholds.priority(0.0), PriorityTier::High);
        assert_eq!(thresholds.priority(49.9), PriorityTier::High);
        assert_eq!(thresholds.priority(50.0), PriorityTier::Medium);
        assert_eq!(thresholds.priority(69.9), PriorityTier::Medium);
        assert_eq!(thresholds.priority(70.0), PriorityTier::Low);
        assert_eq!(thresholds.priority(100.0), PriorityTier::Low);
    }

    #[test]
    fn bands_follow_priority_tiers() {
        let thresholds = ScoreThresholds::STANDARD;
        assert_eq!(thresholds.band(49.9), Band::Red);
        assert_eq!(thresholds.band(50.0), Band::Amber);
        assert_eq!(thresholds.band(69.9), Band::Amber);
        assert_eq!(thresholds.band(70.0), Band::Green);
    }

    #[test]
    fn rejects_unordered_thresholds() {
        assert!(ScoreThresholds::STANDARD.is_ordered());
        let inverted = ScoreThresholds {
            critical_below: 70.0,
            improvement_below: 50.0,
            excellent_from: 85.0,
        };
        assert!(!inverted.is_ordered());
        let overflow = ScoreThresholds {
            excellent_from: 120.0,
            ..ScoreThresholds::STANDARD
        };
        assert!(!overflow.is_ordered());
    }
}
