use serde::{Deserialize, Serialize};

/// One of the eight measurements the prediction service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatientField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl PatientField {
    pub const ALL: [PatientField; 8] = [
        PatientField::Pregnancies,
        PatientField::Glucose,
        PatientField::BloodPressure,
        PatientField::SkinThickness,
        PatientField::Insulin,
        PatientField::Bmi,
        PatientField::DiabetesPedigreeFunction,
        PatientField::Age,
    ];

    /// Dataset column name, also used as the JSON key on the wire.
    pub fn name(self) -> &'static str {
        match self {
            PatientField::Pregnancies => "Pregnancies",
            PatientField::Glucose => "Glucose",
            PatientField::BloodPressure => "BloodPressure",
            PatientField::SkinThickness => "SkinThickness",
            PatientField::Insulin => "Insulin",
            PatientField::Bmi => "BMI",
            PatientField::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            PatientField::Age => "Age",
        }
    }

    pub fn from_name(name: &str) -> Option<PatientField> {
        PatientField::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Fields chosen from a fixed preset list instead of typed in.
    pub fn is_preset(self) -> bool {
        matches!(
            self,
            PatientField::SkinThickness | PatientField::DiabetesPedigreeFunction
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,
    #[serde(rename = "Glucose")]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: f64,
    #[serde(rename = "Insulin")]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    pub age: f64,
}

impl PatientRecord {
    /// Form defaults; BMI is supplied by the caller since it is derived from the calculator.
    pub fn with_bmi(bmi: f64) -> Self {
        Self {
            pregnancies: 0.0,
            glucose: 120.0,
            blood_pressure: 70.0,
            skin_thickness: 27.0,
            insulin: 80.0,
            bmi,
            diabetes_pedigree_function: 0.34,
            age: 30.0,
        }
    }

    pub fn get(&self, field: PatientField) -> f64 {
        match field {
            PatientField::Pregnancies => self.pregnancies,
            PatientField::Glucose => self.glucose,
            PatientField::BloodPressure => self.blood_pressure,
            PatientField::SkinThickness => self.skin_thickness,
            PatientField::Insulin => self.insulin,
            PatientField::Bmi => self.bmi,
            PatientField::DiabetesPedigreeFunction => self.diabetes_pedigree_function,
            PatientField::Age => self.age,
        }
    }

    pub fn set(&mut self, field: PatientField, value: f64) {
        let slot = match field {
            PatientField::Pregnancies => &mut self.pregnancies,
            PatientField::Glucose => &mut self.glucose,
            PatientField::BloodPressure => &mut self.blood_pressure,
            PatientField::SkinThickness => &mut self.skin_thickness,
            PatientField::Insulin => &mut self.insulin,
            PatientField::Bmi => &mut self.bmi,
            PatientField::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
            PatientField::Age => &mut self.age,
        };
        *slot = value;
    }
}

/// Binary outcome reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Classification {
    NoDiabetes,
    Diabetes,
}

impl Classification {
    pub fn headline(self) -> &'static str {
        match self {
            Classification::NoDiabetes => "No diabetes risk",
            Classification::Diabetes => "Diabetes risk",
        }
    }
}

impl TryFrom<u8> for Classification {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Classification::NoDiabetes),
            1 => Ok(Classification::Diabetes),
            other => Err(format!("prediction must be 0 or 1, got {other}")),
        }
    }
}

impl From<Classification> for u8 {
    fn from(value: Classification) -> Self {
        match value {
            Classification::NoDiabetes => 0,
            Classification::Diabetes => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Classification,
    pub probability: f64,
}

impl PredictionResult {
    /// Probability as a percentage with one decimal, e.g. `"42.0"`.
    pub fn probability_percent(&self) -> String {
        format!("{:.1}", self.probability * 100.0)
    }
}
