use std::collections::BTreeMap;

use crate::record::{PatientField, PatientRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
}

impl FieldBounds {
    pub const fn new(min: f64, max: f64, label: &'static str) -> Self {
        Self { min, max, label }
    }

    pub fn contains(&self, value: f64) -> bool {
        !(value < self.min || value > self.max)
    }

    pub fn message(&self) -> String {
        format!("{} must be between {} and {}", self.label, self.min, self.max)
    }
}

/// Per-field accepted ranges. The defaults mirror the empirical ranges of the
/// Pima Indians dataset and are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationTable {
    bounds: BTreeMap<PatientField, FieldBounds>,
}

impl Default for ValidationTable {
    fn default() -> Self {
        Self::from_entries([
            (PatientField::Pregnancies, FieldBounds::new(0.0, 20.0, "Pregnancies")),
            (PatientField::Glucose, FieldBounds::new(0.1, 250.0, "Glucose")),
            (PatientField::BloodPressure, FieldBounds::new(0.1, 200.0, "Blood pressure")),
            (PatientField::SkinThickness, FieldBounds::new(0.0, 100.0, "Skin fold thickness")),
            (PatientField::Insulin, FieldBounds::new(0.0, 900.0, "Insulin")),
            (PatientField::Bmi, FieldBounds::new(0.1, 70.0, "BMI")),
            (PatientField::DiabetesPedigreeFunction, FieldBounds::new(0.01, 3.0, "Pedigree function")),
            (PatientField::Age, FieldBounds::new(18.0, 99.0, "Age")),
        ])
    }
}

impl ValidationTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (PatientField, FieldBounds)>) -> Self {
        Self {
            bounds: entries.into_iter().collect(),
        }
    }

    pub fn bounds(&self, field: PatientField) -> Option<&FieldBounds> {
        self.bounds.get(&field)
    }

    /// Returns the out-of-range message for `value`, or `None` when it is
    /// accepted or the field has no bounds.
    pub fn validate(&self, field: PatientField, value: f64) -> Option<String> {
        let bounds = self.bounds(field)?;
        if bounds.contains(value) {
            None
        } else {
            Some(bounds.message())
        }
    }

    /// Same as [`ValidationTable::validate`] keyed by dataset name; unknown names are accepted.
    pub fn validate_named(&self, name: &str, value: f64) -> Option<String> {
        PatientField::from_name(name).and_then(|field| self.validate(field, value))
    }

    pub fn validate_record(&self, record: &PatientRecord) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for field in PatientField::ALL {
            errors.set(field, self.validate(field, record.get(field)));
        }
        errors
    }
}

/// Messages for the fields currently out of range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<PatientField, String>,
}

impl ValidationErrors {
    pub fn set(&mut self, field: PatientField, message: Option<String>) {
        match message {
            Some(message) if !message.is_empty() => {
                self.messages.insert(field, message);
            }
            _ => {
                self.messages.remove(&field);
            }
        }
    }

    pub fn get(&self, field: PatientField) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatientField, &str)> {
        self.messages.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn message_names_label_and_bounds() {
        let table = ValidationTable::default();
        assert_eq!(
            table.validate(PatientField::Age, 150.0).as_deref(),
            Some("Age must be between 18 and 99")
        );
        assert_eq!(
            table.validate(PatientField::Glucose, 0.0).as_deref(),
            Some("Glucose must be between 0.1 and 250")
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = ValidationTable::default();
        assert_eq!(table.validate(PatientField::Age, 18.0), None);
        assert_eq!(table.validate(PatientField::Age, 99.0), None);
        assert_eq!(table.validate(PatientField::Insulin, 900.0), None);
        assert!(table.validate(PatientField::Insulin, 900.1).is_some());
    }

    #[test]
    fn unknown_names_are_accepted() {
        let table = ValidationTable::default();
        assert_eq!(table.validate_named("Cholesterol", -1.0), None);
        assert!(table.validate_named("Age", 10.0).is_some());
    }

    #[test]
    fn nan_is_not_out_of_range() {
        // comparisons against NaN are false, so NaN slips through; the form never stores one
        let table = ValidationTable::default();
        assert_eq!(table.validate(PatientField::Age, f64::NAN), None);
    }

    #[test]
    fn default_record_has_no_errors() {
        let table = ValidationTable::default();
        assert!(table.validate_record(&PatientRecord::with_bmi(24.2)).is_empty());
    }

    #[test]
    fn setting_none_clears_a_message() {
        let mut errors = ValidationErrors::default();
        errors.set(PatientField::Age, Some("bad".to_string()));
        assert_eq!(errors.len(), 1);
        errors.set(PatientField::Age, None);
        assert!(errors.is_empty());
        errors.set(PatientField::Age, Some(String::new()));
        assert!(errors.is_empty());
    }

    fn any_field() -> impl Strategy<Value = PatientField> {
        proptest::sample::select(PatientField::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn inside_bounds_is_accepted(field in any_field(), t in 0.0f64..=1.0) {
            let table = ValidationTable::default();
            let bounds = *table.bounds(field).expect("every field has bounds");
            let value = (bounds.min + (bounds.max - bounds.min) * t).clamp(bounds.min, bounds.max);
            prop_assert_eq!(table.validate(field, value), None);
        }

        #[test]
        fn outside_bounds_mentions_label(field in any_field(), excess in 0.001f64..1000.0, below in any::<bool>()) {
            let table = ValidationTable::default();
            let bounds = *table.bounds(field).expect("every field has bounds");
            let value = if below { bounds.min - excess } else { bounds.max + excess };
            let message = table.validate(field, value);
            prop_assert!(message.is_some());
            let message = message.unwrap_or_default();
            prop_assert!(message.contains(bounds.label));
            let max_text = bounds.max.to_string();
            prop_assert!(message.contains(&max_text));
        }
    }
}
