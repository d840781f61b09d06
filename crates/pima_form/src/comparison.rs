use crate::record::{PatientField, PatientRecord};
use crate::round1;
use crate::tone::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

impl RangeStatus {
    pub fn label(self) -> &'static str {
        match self {
            RangeStatus::Below => "Below range",
            RangeStatus::Within => "Within range",
            RangeStatus::Above => "Above range",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            RangeStatus::Below => Tone::Blue,
            RangeStatus::Within => Tone::Green,
            RangeStatus::Above => Tone::Red,
        }
    }
}

/// Reference triple used for display only, never for validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub field: PatientField,
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
    pub label: &'static str,
    pub unit: &'static str,
}

impl ReferenceRange {
    pub fn status(&self, value: f64) -> RangeStatus {
        if value < self.min {
            RangeStatus::Below
        } else if value > self.max {
            RangeStatus::Above
        } else {
            RangeStatus::Within
        }
    }
}

/// One bar group of the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBar {
    pub field: PatientField,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
    pub status: RangeStatus,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    ranges: Vec<ReferenceRange>,
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self {
            ranges: vec![
                ReferenceRange { field: PatientField::Glucose, min: 83.0, optimal: 107.0, max: 143.4, label: "Glucose", unit: "mg/dL" },
                ReferenceRange { field: PatientField::BloodPressure, min: 56.0, optimal: 70.0, max: 86.0, label: "Pressure", unit: "mm Hg" },
                ReferenceRange { field: PatientField::Bmi, min: 23.0, optimal: 30.1, max: 39.4, label: "BMI", unit: "kg/m²" },
                ReferenceRange { field: PatientField::Age, min: 21.0, optimal: 27.0, max: 48.0, label: "Age", unit: "years" },
                ReferenceRange { field: PatientField::Insulin, min: 48.0, optimal: 102.5, max: 250.5, label: "Insulin", unit: "μU/mL" },
                ReferenceRange { field: PatientField::SkinThickness, min: 15.0, optimal: 27.0, max: 41.0, label: "Skin fold", unit: "mm" },
            ],
        }
    }
}

impl ReferenceTable {
    pub fn new(ranges: Vec<ReferenceRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[ReferenceRange] {
        &self.ranges
    }

    pub fn range_for(&self, field: PatientField) -> Option<&ReferenceRange> {
        self.ranges.iter().find(|range| range.field == field)
    }

    /// Projects the record onto the table, one bar per reference range, in table order.
    ///
    /// Status is decided on the raw value; only the displayed value is rounded.
    pub fn compare(&self, record: &PatientRecord) -> Vec<ComparisonBar> {
        self.ranges
            .iter()
            .map(|range| {
                let raw = record.get(range.field);
                let status = range.status(raw);
                ComparisonBar {
                    field: range.field,
                    label: range.label,
                    unit: range.unit,
                    value: round1(raw),
                    min: range.min,
                    optimal: range.optimal,
                    max: range.max,
                    status,
                    tone: status.tone(),
                }
            })
            .collect()
    }
}
