use crate::reading::{Reading, SeriesStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of an ammonia concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Moderate => write!(f, "Moderate"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Which rule branch produced an advice entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    CriticalConditions,
    PhElevated,
    TemperatureHigh,
    AmmoniaHigh,
    AmmoniaModerate,
    AmmoniaAcceptable,
}

impl AdviceKind {
    /// True for the branches of the pH/temperature rule.
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            AdviceKind::CriticalConditions | AdviceKind::PhElevated | AdviceKind::TemperatureHigh
        )
    }
}

/// A recommended operational action tied to a priority level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceEntry {
    pub priority: Priority,
    pub kind: AdviceKind,
    pub message: String,
    pub action: String,
}

/// The outcome of one prediction cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub reading: Reading,
    pub tier: RiskTier,
    pub advice: Vec<AdviceEntry>,
}

/// Everything the presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub latest: Option<Assessment>,
    pub stats: Option<SeriesStats>,
    pub recent: Vec<Reading>,
}
