//! Churn scoring engine — bounded linear risk heuristic.
//!
//! This module:
//!   1. Computes a raw score from recency, frequency and monetary features
//!   2. Adds the configured satisfaction adjustment
//!   3. Clamps the result into [0, 100]
//!   4. Buckets the score into a tier using the configured thresholds
//!   5. Attaches the playbook's recommended actions for that tier
//!
//! Every constant lives in `ScoringConfig`. Inputs are not range-checked
//! here: the caller enforces its own input ranges, and out-of-range
//! features simply produce a clamped score. A raw score that is undefined
//! (NaN from a weighted non-finite input) scores as the maximum.

use crate::{
    config::ScoringConfig,
    error::AnalyticsError,
    types::{Score, SCORE_MAX, SCORE_MIN},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Satisfaction {
    VeryDissatisfied,
    Neutral,
    Happy,
    Loyalist,
}

impl Satisfaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Satisfaction::VeryDissatisfied => "very_dissatisfied",
            Satisfaction::Neutral => "neutral",
            Satisfaction::Happy => "happy",
            Satisfaction::Loyalist => "loyalist",
        }
    }
}

impl FromStr for Satisfaction {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "very_dissatisfied" => Ok(Satisfaction::VeryDissatisfied),
            "neutral" => Ok(Satisfaction::Neutral),
            "happy" => Ok(Satisfaction::Happy),
            "loyalist" => Ok(Satisfaction::Loyalist),
            other => Err(AnalyticsError::Other(anyhow::anyhow!(
                "unknown satisfaction level '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerFeatures {
    pub recency_days:     u32,
    pub frequency_orders: u32,
    pub monetary_total:   f64,
    pub satisfaction:     Option<Satisfaction>,
}

impl CustomerFeatures {
    pub fn new(recency_days: u32, frequency_orders: u32) -> Self {
        Self {
            recency_days,
            frequency_orders,
            monetary_total: 0.0,
            satisfaction: None,
        }
    }

    pub fn with_monetary(mut self, monetary_total: f64) -> Self {
        self.monetary_total = monetary_total;
        self
    }

    pub fn with_satisfaction(mut self, satisfaction: Satisfaction) -> Self {
        self.satisfaction = Some(satisfaction);
        self
    }
}

/// Additive contributions to the raw score, kept for display and analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub recency_component:      f64,
    /// Non-positive: more orders lower the risk.
    pub frequency_component:    f64,
    /// Non-positive for non-negative spend and weight.
    pub monetary_component:     f64,
    pub satisfaction_component: f64,
    /// Sum of the components before clamping.
    pub raw_score:              f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score:               Score,
    pub tier:                RiskTier,
    pub recommended_actions: Vec<String>,
    pub components:          ScoreComponents,
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ChurnScorer {
    config: ScoringConfig,
}

impl ChurnScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, features: &CustomerFeatures) -> RiskAssessment {
        let components = self.components(features);

        // An undefined score is treated as the worst case, never as healthy.
        let score = if components.raw_score.is_nan() {
            log::warn!("scoring: undefined raw score for {features:?}; using {SCORE_MAX}");
            SCORE_MAX
        } else {
            components.raw_score.clamp(SCORE_MIN, SCORE_MAX)
        };

        let tier = self.config.tier_thresholds.tier_for(score);
        let recommended_actions = self.config.playbook.for_tier(tier).actions.clone();

        log::debug!(
            "scoring: recency={} frequency={} raw={:.2} score={:.2} tier={tier}",
            features.recency_days,
            features.frequency_orders,
            components.raw_score,
            score,
        );

        RiskAssessment {
            score,
            tier,
            recommended_actions,
            components,
        }
    }

    fn components(&self, features: &CustomerFeatures) -> ScoreComponents {
        let w = &self.config.weights;

        let recency_component = weighted(f64::from(features.recency_days), w.recency_weight);
        let frequency_component = -weighted(f64::from(features.frequency_orders), w.frequency_weight);
        let monetary_component = -weighted(features.monetary_total, w.monetary_weight);
        let satisfaction_component = self
            .config
            .satisfaction_adjustments
            .for_level(features.satisfaction);

        ScoreComponents {
            recency_component,
            frequency_component,
            monetary_component,
            satisfaction_component,
            raw_score: recency_component
                + frequency_component
                + monetary_component
                + satisfaction_component,
        }
    }
}

/// A zero weight switches its term off entirely, even for non-finite input.
fn weighted(value: f64, weight: f64) -> f64 {
    if weight == 0.0 {
        0.0
    } else {
        value * weight
    }
}

/// Score with the canonical configuration.
pub fn score(features: &CustomerFeatures) -> RiskAssessment {
    ChurnScorer::default().score(features)
}
