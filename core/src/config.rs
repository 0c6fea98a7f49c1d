use crate::{
    error::{AnalyticsError, AnalyticsResult},
    presentation::Playbook,
    scoring::{RiskTier, Satisfaction},
    types::{Score, SCORE_MAX, SCORE_MIN},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Scoring formula ────────────────────────────────────────────────

/// Linear coefficients of the raw score.
///
/// `raw = recency * recency_weight - frequency * frequency_weight
///        - monetary * monetary_weight + satisfaction adjustment`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub recency_weight:   f64,
    pub frequency_weight: f64,
    #[serde(default)]
    pub monetary_weight:  f64,
}

/// Additive score adjustment per satisfaction level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionAdjustments {
    pub very_dissatisfied: f64,
    pub neutral:           f64,
    pub happy:             f64,
    pub loyalist:          f64,
}

impl SatisfactionAdjustments {
    pub fn for_level(&self, level: Option<Satisfaction>) -> f64 {
        match level {
            Some(Satisfaction::VeryDissatisfied) => self.very_dissatisfied,
            Some(Satisfaction::Neutral) => self.neutral,
            Some(Satisfaction::Happy) => self.happy,
            Some(Satisfaction::Loyalist) => self.loyalist,
            None => 0.0,
        }
    }
}

// ── Tiers ──────────────────────────────────────────────────────────

/// Lower bounds (inclusive) of the Medium and High tiers.
///
/// `medium == high` collapses the scale to two tiers: Low and High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: Score,
    pub high:   Score,
}

impl TierThresholds {
    pub fn tier_for(&self, score: Score) -> RiskTier {
        if score >= self.high {
            RiskTier::High
        } else if score >= self.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub model_version:            String,
    pub weights:                  ScoringWeights,
    pub satisfaction_adjustments: SatisfactionAdjustments,
    pub tier_thresholds:          TierThresholds,
    #[serde(default)]
    pub playbook:                 Playbook,
}

impl Default for ScoringConfig {
    /// The canonical configuration: 0.4 per day of recency, 1.5 per order,
    /// +40 for a very dissatisfied customer, tiers at 30 and 70.
    fn default() -> Self {
        Self {
            model_version: "1.0.0".into(),
            weights: ScoringWeights {
                recency_weight:   0.4,
                frequency_weight: 1.5,
                monetary_weight:  0.0,
            },
            satisfaction_adjustments: SatisfactionAdjustments {
                very_dissatisfied: 40.0,
                neutral:           0.0,
                happy:             0.0,
                loyalist:          0.0,
            },
            tier_thresholds: TierThresholds { medium: 30.0, high: 70.0 },
            playbook: Playbook::default(),
        }
    }
}

impl ScoringConfig {
    /// Load from a JSON file.
    /// In tests, use ScoringConfig::default().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ScoringConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!(
            "config: loaded scoring model {} from {}",
            config.model_version,
            path.display()
        );
        Ok(config)
    }

    /// Canonical weights with a single Low/High split.
    pub fn two_tier(split: Score) -> Self {
        Self {
            tier_thresholds: TierThresholds { medium: split, high: split },
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, medium: Score, high: Score) -> Self {
        self.tier_thresholds = TierThresholds { medium, high };
        self
    }

    pub fn with_satisfaction_adjustments(mut self, adjustments: SatisfactionAdjustments) -> Self {
        self.satisfaction_adjustments = adjustments;
        self
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        let w = &self.weights;
        let a = &self.satisfaction_adjustments;
        let coefficients = [
            ("recency_weight", w.recency_weight),
            ("frequency_weight", w.frequency_weight),
            ("monetary_weight", w.monetary_weight),
            ("very_dissatisfied", a.very_dissatisfied),
            ("neutral", a.neutral),
            ("happy", a.happy),
            ("loyalist", a.loyalist),
        ];
        if let Some((name, _)) = coefficients.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalyticsError::InvalidConfig(format!("{name} must be finite")));
        }

        let t = &self.tier_thresholds;
        for (name, v) in [("medium", t.medium), ("high", t.high)] {
            if !(SCORE_MIN..=SCORE_MAX).contains(&v) {
                return Err(AnalyticsError::InvalidConfig(format!(
                    "tier threshold {name}={v} outside [{SCORE_MIN}, {SCORE_MAX}]"
                )));
            }
        }
        if t.medium > t.high {
            return Err(AnalyticsError::InvalidConfig(format!(
                "medium threshold {} above high threshold {}",
                t.medium, t.high
            )));
        }
        Ok(())
    }
}
