//! Form logic of the Pima diabetes prediction client: the patient record, its
//! range checks, the BMI calculator, and the projections shown next to a
//! prediction (risk tier and reference-range comparison).

mod bmi;
mod comparison;
mod error;
mod form;
mod parse;
mod presets;
mod record;
mod risk;
mod tone;
mod validation;

pub use bmi::{BmiBand, BmiBands, BmiCalculator, BmiCategory, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, derive_bmi};
pub use comparison::{ComparisonBar, RangeStatus, ReferenceRange, ReferenceTable};
pub use error::PredictionError;
pub use form::{
    CONNECTION_ALERT, FormController, FormEvent, FormPhase, FormStateMachine, FormTables, Predictor,
    SubmitBlocked, SubmitOutcome, TransitionResult,
};
pub use parse::parse_numeric;
pub use presets::{FAMILY_HISTORY_PRESETS, Preset, SKIN_THICKNESS_PRESETS, preset_matching, presets_for};
pub use record::{Classification, PatientField, PatientRecord, PredictionResult};
pub use risk::{RiskAssessment, RiskLevel, RiskThresholds, indicator_cells};
pub use tone::Tone;
pub use validation::{FieldBounds, ValidationErrors, ValidationTable};

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(24.221), 24.2);
        assert_eq!(round1(24.25), 24.3);
        assert_eq!(round1(150.0), 150.0);
    }
}
