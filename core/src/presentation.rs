//! Risk presentation — tier to label, color band and retention actions.
//!
//! The mapping is a pure lookup on the tier. The score itself never
//! influences the payload.

use crate::scoring::{RiskAssessment, RiskTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Green,
    Amber,
    Red,
}

/// What the dashboard shows for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPlay {
    pub label:   String,
    pub band:    ColorBand,
    pub actions: Vec<String>,
}

impl TierPlay {
    fn new(label: &str, band: ColorBand, actions: &[&str]) -> Self {
        Self {
            label: label.into(),
            band,
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playbook {
    pub low:    TierPlay,
    pub medium: TierPlay,
    pub high:   TierPlay,
}

impl Default for Playbook {
    fn default() -> Self {
        Self {
            low: TierPlay::new(
                "Healthy relationship",
                ColorBand::Green,
                &["Enroll in loyalty rewards", "Recommend complementary products"],
            ),
            medium: TierPlay::new(
                "Monitor",
                ColorBand::Amber,
                &["Trigger win-back email sequence", "Track engagement weekly"],
            ),
            high: TierPlay::new(
                "Reactive recovery",
                ColorBand::Red,
                &[
                    "Issue retention discount",
                    "Send satisfaction survey",
                    "Contact via high-open-rate channel",
                ],
            ),
        }
    }
}

impl Playbook {
    pub fn for_tier(&self, tier: RiskTier) -> &TierPlay {
        match tier {
            RiskTier::Low => &self.low,
            RiskTier::Medium => &self.medium,
            RiskTier::High => &self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationPayload {
    pub label:               String,
    pub severity_color_band: ColorBand,
    pub actions:             Vec<String>,
}

/// Present with the canonical playbook.
pub fn present(assessment: &RiskAssessment) -> PresentationPayload {
    present_with(assessment, &Playbook::default())
}

pub fn present_with(assessment: &RiskAssessment, playbook: &Playbook) -> PresentationPayload {
    let play = playbook.for_tier(assessment.tier);
    PresentationPayload {
        label:               play.label.clone(),
        severity_color_band: play.band,
        actions:             play.actions.clone(),
    }
}
