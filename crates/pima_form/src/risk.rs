use crate::tone::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub tone: Tone,
}

/// Lower bounds (exclusive) of the three upper risk tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub high: f64,
    pub elevated: f64,
    pub moderate: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 0.7,
            elevated: 0.5,
            moderate: 0.3,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, probability: f64) -> RiskAssessment {
        let (level, tone) = if probability > self.high {
            (RiskLevel::High, Tone::Red)
        } else if probability > self.elevated {
            (RiskLevel::Elevated, Tone::Orange)
        } else if probability > self.moderate {
            (RiskLevel::Moderate, Tone::Yellow)
        } else {
            (RiskLevel::Low, Tone::Green)
        };
        RiskAssessment { level, tone }
    }
}

/// Number of filled cells out of `width` for a probability indicator.
pub fn indicator_cells(probability: f64, width: u16) -> u16 {
    let ratio = probability.clamp(0.0, 1.0);
    (ratio * f64::from(width)).round() as u16
}
