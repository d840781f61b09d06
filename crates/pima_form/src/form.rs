use log::{debug, error, info, warn};

use crate::bmi::{BmiBand, BmiBands, BmiCalculator, BmiCategory};
use crate::comparison::ReferenceTable;
use crate::error::PredictionError;
use crate::parse::parse_numeric;
use crate::presets::{position_of, presets_for};
use crate::record::{PatientField, PatientRecord, PredictionResult};
use crate::risk::RiskThresholds;
use crate::validation::{ValidationErrors, ValidationTable};

pub const CONNECTION_ALERT: &str = "Could not connect to the prediction server.";

/// Anything able to turn a record into a prediction.
pub trait Predictor {
    fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    PredictionSucceeded,
    PredictionFailed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub next_phase: FormPhase,
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub struct FormStateMachine {
    phase: FormPhase,
}

impl Default for FormStateMachine {
    fn default() -> Self {
        Self { phase: FormPhase::Editing }
    }
}

impl FormStateMachine {
    pub fn current_phase(&self) -> FormPhase {
        self.phase
    }

    pub fn dispatch(&mut self, event: FormEvent) -> TransitionResult {
        let current = self.phase;
        let (next, applied) = match (current, event) {
            (FormPhase::Editing, FormEvent::Submit) => (FormPhase::Submitting, true),
            (FormPhase::Submitting, FormEvent::PredictionSucceeded) => (FormPhase::Editing, true),
            (FormPhase::Submitting, FormEvent::PredictionFailed) => (FormPhase::Editing, true),
            (FormPhase::Editing, FormEvent::Reset) => (FormPhase::Editing, true),
            _ => (current, false),
        };
        if applied {
            self.phase = next;
        }
        TransitionResult {
            next_phase: self.phase,
            applied,
        }
    }
}

/// The immutable tables the form and its presenters read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormTables {
    pub validation: ValidationTable,
    pub bmi_bands: BmiBands,
    pub risk: RiskThresholds,
    pub references: ReferenceTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A request is already in flight.
    Busy,
    /// At least one field is out of range.
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Blocked(SubmitBlocked),
    Predicted {
        record: PatientRecord,
        result: PredictionResult,
    },
    Failed {
        alert: String,
    },
}

/// Owns one form session: the record, the BMI calculator and the inline errors.
///
/// BMI follows the calculator and each field's error follows its value; both
/// are recomputed inside the setters.
#[derive(Debug, Clone)]
pub struct FormController {
    tables: FormTables,
    record: PatientRecord,
    default_record: PatientRecord,
    calculator: BmiCalculator,
    errors: ValidationErrors,
    machine: FormStateMachine,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormTables::default())
    }
}

impl FormController {
    pub fn new(tables: FormTables) -> Self {
        Self::with_calculator(tables, BmiCalculator::default())
    }

    pub fn with_calculator(tables: FormTables, calculator: BmiCalculator) -> Self {
        let default_record = PatientRecord::with_bmi(calculator.bmi().unwrap_or_default());
        Self {
            tables,
            record: default_record,
            default_record,
            calculator,
            errors: ValidationErrors::default(),
            machine: FormStateMachine::default(),
        }
    }

    pub fn tables(&self) -> &FormTables {
        &self.tables
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn calculator(&self) -> &BmiCalculator {
        &self.calculator
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.machine.current_phase()
    }

    /// WHO band of the current BMI; none while BMI is not positive.
    pub fn bmi_band(&self) -> Option<&BmiBand> {
        if self.record.bmi > 0.0 {
            self.tables.bmi_bands.band_for(self.record.bmi)
        } else {
            None
        }
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.bmi_band().map(|band| band.category)
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == FormPhase::Editing && self.errors.is_empty()
    }

    /// Applies raw text typed into a field and returns the stored value.
    pub fn edit_field(&mut self, field: PatientField, raw: &str) -> f64 {
        let value = parse_numeric(raw);
        self.set_field(field, value);
        value
    }

    pub fn set_field(&mut self, field: PatientField, value: f64) {
        self.record.set(field, value);
        let message = self.tables.validation.validate(field, value);
        if let Some(message) = &message {
            debug!("{} rejected: {}", field.name(), message);
        }
        self.errors.set(field, message);
    }

    pub fn select_preset(&mut self, field: PatientField, index: usize) -> Option<f64> {
        let preset = presets_for(field).get(index)?;
        self.set_field(field, preset.value);
        Some(preset.value)
    }

    /// Moves `step` presets forward (or backward when negative), wrapping around.
    pub fn cycle_preset(&mut self, field: PatientField, step: isize) -> Option<f64> {
        let count = presets_for(field).len();
        if count == 0 {
            return None;
        }
        let next = match position_of(field, self.record.get(field)) {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };
        self.select_preset(field, next)
    }

    pub fn edit_height(&mut self, raw: &str) {
        self.calculator.height_cm = parse_numeric(raw);
        self.recompute_bmi();
    }

    pub fn edit_weight(&mut self, raw: &str) {
        self.calculator.weight_kg = parse_numeric(raw);
        self.recompute_bmi();
    }

    fn recompute_bmi(&mut self) {
        if let Some(bmi) = self.calculator.bmi() {
            self.set_field(PatientField::Bmi, bmi);
        }
    }

    /// Revalidates every field and, when nothing is out of range, enters
    /// [`FormPhase::Submitting`] and hands back the record to send.
    pub fn begin_submission(&mut self) -> Result<PatientRecord, SubmitBlocked> {
        if self.phase() == FormPhase::Submitting {
            return Err(SubmitBlocked::Busy);
        }
        self.errors = self.tables.validation.validate_record(&self.record);
        if !self.errors.is_empty() {
            warn!("submission blocked by {} invalid field(s)", self.errors.len());
            return Err(SubmitBlocked::Invalid);
        }
        self.machine.dispatch(FormEvent::Submit);
        info!("submitting record for prediction");
        Ok(self.record)
    }

    pub fn complete_submission(
        &mut self,
        record: PatientRecord,
        response: Result<PredictionResult, PredictionError>,
    ) -> SubmitOutcome {
        match response {
            Ok(result) => {
                self.finish(FormEvent::PredictionSucceeded);
                info!(
                    "prediction received: class={} probability={:.4}",
                    u8::from(result.prediction),
                    result.probability
                );
                SubmitOutcome::Predicted { record, result }
            }
            Err(err) => {
                self.finish(FormEvent::PredictionFailed);
                error!("prediction failed: {}", err.detail());
                SubmitOutcome::Failed {
                    alert: CONNECTION_ALERT.to_string(),
                }
            }
        }
    }

    fn finish(&mut self, event: FormEvent) {
        if !self.machine.dispatch(event).applied {
            warn!("{event:?} received outside of a submission");
        }
    }

    /// Full round trip: validate, call `predictor`, return to editing.
    pub fn submit<P: Predictor + ?Sized>(&mut self, predictor: &P) -> SubmitOutcome {
        match self.begin_submission() {
            Ok(record) => {
                let response = predictor.predict(&record);
                self.complete_submission(record, response)
            }
            Err(blocked) => SubmitOutcome::Blocked(blocked),
        }
    }

    /// Restores the default record and clears errors. The calculator keeps
    /// its inputs. Refused while a request is in flight.
    pub fn reset(&mut self) -> bool {
        if !self.machine.dispatch(FormEvent::Reset).applied {
            return false;
        }
        self.record = self.default_record;
        self.errors.clear();
        true
    }
}
