use std::collections::HashMap;

use log::{debug, info};
use pima_form::{
    FormController, FormPhase, PatientField, PatientRecord, PredictionResult, Predictor,
    SubmitBlocked, SubmitOutcome,
};

/// Represents actions that can be dispatched to the App.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Tick,
    FocusNext,
    FocusPrev,
    InputChar(char),
    Backspace,
    NextPreset,
    PrevPreset,
    Submit,
    Reset,
    DismissAlert,
    ToggleHelp,
}

/// A focusable input: the two calculator boxes, then the eight record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Height,
    Weight,
    Field(PatientField),
}

impl Input {
    pub fn all() -> Vec<Input> {
        let mut inputs = vec![Input::Height, Input::Weight];
        inputs.extend(PatientField::ALL.into_iter().map(Input::Field));
        inputs
    }

    pub fn is_preset(self) -> bool {
        matches!(self, Input::Field(field) if field.is_preset())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Unknown,
    Online(String),
    Offline,
}

/// The record that was sent together with the answer it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub record: PatientRecord,
    pub result: PredictionResult,
}

pub struct AppState {
    pub form: FormController,
    pub inputs: Vec<Input>,
    pub buffers: HashMap<Input, String>,
    pub focus: usize,
    pub submission: Option<Submission>,
    pub pending: Option<PatientRecord>,
    pub alert: Option<String>,
    pub service: ServiceStatus,
    pub show_help: bool,
    pub is_running: bool,
}

impl AppState {
    pub fn new(form: FormController) -> Self {
        let mut state = Self {
            form,
            inputs: Input::all(),
            buffers: HashMap::new(),
            focus: 0,
            submission: None,
            pending: None,
            alert: None,
            service: ServiceStatus::Unknown,
            show_help: false,
            is_running: true,
        };
        let calculator = *state.form.calculator();
        state.buffers.insert(Input::Height, calculator.height_cm.to_string());
        state.buffers.insert(Input::Weight, calculator.weight_kg.to_string());
        state.sync_field_buffers();
        state
    }

    pub fn focused(&self) -> Input {
        self.inputs[self.focus]
    }

    pub fn buffer(&self, input: Input) -> &str {
        self.buffers.get(&input).map(String::as_str).unwrap_or_default()
    }

    pub fn quit(&mut self) {
        self.is_running = false;
    }

    fn sync_field_buffers(&mut self) {
        for field in PatientField::ALL {
            self.sync_field_buffer(field);
        }
    }

    fn sync_field_buffer(&mut self, field: PatientField) {
        let text = self.form.record().get(field).to_string();
        self.buffers.insert(Input::Field(field), text);
    }
}

pub struct App<P: Predictor> {
    pub state: AppState,
    predictor: P,
}

impl<P: Predictor> App<P> {
    pub fn new(form: FormController, predictor: P) -> Self {
        Self {
            state: AppState::new(form),
            predictor,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        if self.state.alert.is_some() {
            match action {
                Action::Quit => self.state.quit(),
                Action::Submit | Action::DismissAlert => self.state.alert = None,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit => self.state.quit(),
            Action::Tick | Action::DismissAlert => {}
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::FocusNext => {
                self.state.focus = (self.state.focus + 1) % self.state.inputs.len();
            }
            Action::FocusPrev => {
                let len = self.state.inputs.len();
                self.state.focus = (self.state.focus + len - 1) % len;
            }
            Action::InputChar(ch) => self.edit_focused(|buffer| buffer.push(ch)),
            Action::Backspace => self.edit_focused(|buffer| {
                buffer.pop();
            }),
            Action::NextPreset => self.cycle_focused(1),
            Action::PrevPreset => self.cycle_focused(-1),
            Action::Submit => self.submit(),
            Action::Reset => self.reset(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.state.pending.is_some()
    }

    /// Sends the queued record, if any. Blocks until the service answers.
    pub fn process_pending(&mut self) {
        let Some(record) = self.state.pending.take() else {
            return;
        };
        let response = self.predictor.predict(&record);
        match self.state.form.complete_submission(record, response) {
            SubmitOutcome::Predicted { record, result } => {
                self.state.submission = Some(Submission { record, result });
            }
            SubmitOutcome::Failed { alert } => self.state.alert = Some(alert),
            SubmitOutcome::Blocked(_) => {}
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let input = self.state.focused();
        if input.is_preset() || self.state.form.phase() == FormPhase::Submitting {
            return;
        }
        let buffer = self.state.buffers.entry(input).or_default();
        edit(buffer);
        let raw = buffer.clone();
        match input {
            Input::Height => {
                self.state.form.edit_height(&raw);
                self.state.sync_field_buffer(PatientField::Bmi);
            }
            Input::Weight => {
                self.state.form.edit_weight(&raw);
                self.state.sync_field_buffer(PatientField::Bmi);
            }
            Input::Field(field) => {
                self.state.form.edit_field(field, &raw);
            }
        }
    }

    fn cycle_focused(&mut self, step: isize) {
        if let Input::Field(field) = self.state.focused() {
            if self.state.form.phase() == FormPhase::Editing
                && self.state.form.cycle_preset(field, step).is_some()
            {
                self.state.sync_field_buffer(field);
            }
        }
    }

    fn submit(&mut self) {
        match self.state.form.begin_submission() {
            Ok(record) => self.state.pending = Some(record),
            Err(SubmitBlocked::Invalid) => {
                debug!("submit ignored: {} field(s) out of range", self.state.form.errors().len());
            }
            Err(SubmitBlocked::Busy) => debug!("submit ignored: request in flight"),
        }
    }

    fn reset(&mut self) {
        if self.state.form.reset() {
            info!("form reset");
            self.state.submission = None;
            self.state.sync_field_buffers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pima_form::{Classification, PredictionError};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct Canned {
        fail: bool,
        calls: Cell<usize>,
    }

    impl Predictor for Canned {
        fn predict(&self, _record: &PatientRecord) -> Result<PredictionResult, PredictionError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(PredictionError::new("connection refused"))
            } else {
                Ok(PredictionResult {
                    prediction: Classification::NoDiabetes,
                    probability: 0.25,
                })
            }
        }
    }

    fn app(fail: bool) -> App<Canned> {
        App::new(
            FormController::default(),
            Canned {
                fail,
                calls: Cell::new(0),
            },
        )
    }

    fn focus(app: &mut App<Canned>, input: Input) {
        let index = app.state.inputs.iter().position(|i| *i == input).expect("input exists");
        app.state.focus = index;
    }

    fn type_text(app: &mut App<Canned>, text: &str) {
        for ch in text.chars() {
            app.dispatch(Action::InputChar(ch));
        }
    }

    #[test]
    fn buffers_start_from_defaults() {
        let app = app(false);
        assert_eq!(app.state.buffer(Input::Height), "170");
        assert_eq!(app.state.buffer(Input::Field(PatientField::Bmi)), "24.2");
        assert_eq!(app.state.buffer(Input::Field(PatientField::DiabetesPedigreeFunction)), "0.34");
    }

    #[test]
    fn typing_weight_updates_bmi_buffer() {
        let mut app = app(false);
        focus(&mut app, Input::Weight);
        app.dispatch(Action::Backspace);
        app.dispatch(Action::Backspace);
        type_text(&mut app, "100");
        assert_eq!(app.state.buffer(Input::Weight), "100");
        assert_eq!(app.state.form.record().bmi, 34.6);
        assert_eq!(app.state.buffer(Input::Field(PatientField::Bmi)), "34.6");
    }

    #[test]
    fn invalid_field_blocks_submit() {
        let mut app = app(false);
        focus(&mut app, Input::Field(PatientField::Age));
        type_text(&mut app, "0");
        assert_eq!(app.state.form.record().age, 300.0);
        app.dispatch(Action::Submit);
        assert!(!app.has_pending());
        app.process_pending();
        assert_eq!(app.predictor.calls.get(), 0);
    }

    #[test]
    fn submit_then_process_stores_submission() {
        let mut app = app(false);
        app.dispatch(Action::Submit);
        assert!(app.has_pending());
        assert_eq!(app.state.form.phase(), FormPhase::Submitting);
        app.dispatch(Action::Submit);
        app.process_pending();
        assert_eq!(app.predictor.calls.get(), 1);
        let submission = app.state.submission.expect("submission stored");
        assert_eq!(submission.result.probability, 0.25);
        assert_eq!(app.state.form.phase(), FormPhase::Editing);
    }

    #[test]
    fn failure_raises_modal_alert() {
        let mut app = app(true);
        app.dispatch(Action::Submit);
        app.process_pending();
        assert!(app.state.alert.is_some());
        assert!(app.state.submission.is_none());

        app.dispatch(Action::FocusNext);
        assert_eq!(app.state.focus, 0);
        app.dispatch(Action::DismissAlert);
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn presets_only_change_through_arrows() {
        let mut app = app(false);
        let skin = Input::Field(PatientField::SkinThickness);
        focus(&mut app, skin);
        app.dispatch(Action::InputChar('9'));
        assert_eq!(app.state.form.record().skin_thickness, 27.0);
        app.dispatch(Action::NextPreset);
        assert_eq!(app.state.form.record().skin_thickness, 35.0);
        assert_eq!(app.state.buffer(skin), "35");
    }

    #[test]
    fn reset_clears_submission_and_restores_buffers() {
        let mut app = app(false);
        app.dispatch(Action::Submit);
        app.process_pending();
        focus(&mut app, Input::Field(PatientField::Glucose));
        type_text(&mut app, "5");
        focus(&mut app, Input::Height);
        app.dispatch(Action::Backspace);

        app.dispatch(Action::Reset);
        assert!(app.state.submission.is_none());
        assert_eq!(app.state.buffer(Input::Field(PatientField::Glucose)), "120");
        assert_eq!(app.state.buffer(Input::Field(PatientField::Bmi)), "24.2");
        // the calculator is left as typed
        assert_eq!(app.state.buffer(Input::Height), "17");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = app(false);
        app.dispatch(Action::FocusPrev);
        assert_eq!(app.state.focused(), Input::Field(PatientField::Age));
        app.dispatch(Action::FocusNext);
        assert_eq!(app.state.focused(), Input::Height);
    }
}
