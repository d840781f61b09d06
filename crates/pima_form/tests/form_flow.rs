use std::cell::RefCell;

use pima_form::{
    Classification, FormController, FormPhase, PatientField, PatientRecord, PredictionError,
    PredictionResult, Predictor, RangeStatus, RiskLevel, SubmitBlocked, SubmitOutcome, Tone,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<PatientRecord>>,
    fail: bool,
}

impl Predictor for Recorder {
    fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictionError> {
        self.sent.borrow_mut().push(*record);
        if self.fail {
            return Err(PredictionError::new("status 500"));
        }
        Ok(PredictionResult {
            prediction: if record.glucose > 140.0 {
                Classification::Diabetes
            } else {
                Classification::NoDiabetes
            },
            probability: if record.glucose > 140.0 { 0.75 } else { 0.1 },
        })
    }
}

#[test]
fn out_of_range_age_blocks_dispatch_end_to_end() {
    let mut form = FormController::default();
    let predictor = Recorder::default();

    form.edit_field(PatientField::Age, "150");
    assert_eq!(form.submit(&predictor), SubmitOutcome::Blocked(SubmitBlocked::Invalid));
    assert!(predictor.sent.borrow().is_empty());
    assert_eq!(
        form.errors().get(PatientField::Age),
        Some("Age must be between 18 and 99")
    );
}

#[test]
fn prediction_feeds_presenters() {
    let mut form = FormController::default();
    let predictor = Recorder::default();
    form.edit_field(PatientField::Glucose, "150");

    let SubmitOutcome::Predicted { record, result } = form.submit(&predictor) else {
        panic!("expected a prediction");
    };
    assert_eq!(predictor.sent.borrow().as_slice(), &[record]);

    let risk = form.tables().risk.classify(result.probability);
    assert_eq!(risk.level, RiskLevel::High);
    assert_eq!(risk.tone, Tone::Red);
    assert_eq!(result.prediction.headline(), "Diabetes risk");

    let bars = form.tables().references.compare(&record);
    assert_eq!(bars.len(), 6);
    let glucose = bars
        .iter()
        .find(|bar| bar.field == PatientField::Glucose)
        .expect("glucose bar");
    assert_eq!(glucose.status, RangeStatus::Above);
}

#[test]
fn transport_failure_returns_to_editing_with_alert() {
    let mut form = FormController::default();
    let predictor = Recorder {
        fail: true,
        ..Recorder::default()
    };

    let outcome = form.submit(&predictor);
    assert!(matches!(outcome, SubmitOutcome::Failed { ref alert } if !alert.is_empty()));
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(predictor.sent.borrow().len(), 1);

    // the next attempt goes out again, no retry was queued
    let _ = form.submit(&predictor);
    assert_eq!(predictor.sent.borrow().len(), 2);
}

#[test]
fn reset_restores_documented_defaults() {
    let mut form = FormController::default();
    form.edit_field(PatientField::Pregnancies, "4");
    form.edit_field(PatientField::Glucose, "300");
    form.edit_field(PatientField::BloodPressure, "90");
    form.cycle_preset(PatientField::SkinThickness, 2);
    form.edit_field(PatientField::Insulin, "200");
    form.cycle_preset(PatientField::DiabetesPedigreeFunction, 3);
    form.edit_field(PatientField::Age, "150");
    form.edit_weight("95");
    assert!(!form.errors().is_empty());

    assert!(form.reset());

    let expected = PatientRecord {
        pregnancies: 0.0,
        glucose: 120.0,
        blood_pressure: 70.0,
        skin_thickness: 27.0,
        insulin: 80.0,
        bmi: 24.2,
        diabetes_pedigree_function: 0.34,
        age: 30.0,
    };
    assert_eq!(form.record(), &expected);
    assert!(form.errors().is_empty());
    assert!(form.can_submit());
}

#[test]
fn split_submission_exposes_the_submitting_phase() {
    let mut form = FormController::default();
    let record = form.begin_submission().expect("default record is valid");
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert!(!form.can_submit());

    let outcome = form.complete_submission(
        record,
        Ok(PredictionResult {
            prediction: Classification::NoDiabetes,
            probability: 0.2,
        }),
    );
    assert!(matches!(outcome, SubmitOutcome::Predicted { .. }));
    assert_eq!(form.phase(), FormPhase::Editing);
}
