use crate::record::PatientField;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub value: f64,
    pub label: &'static str,
    pub description: &'static str,
}

pub const SKIN_THICKNESS_PRESETS: [Preset; 5] = [
    Preset { value: 15.0, label: "Thin (15 mm)", description: "Low value" },
    Preset { value: 27.0, label: "Average (27 mm)", description: "Typical value" },
    Preset { value: 35.0, label: "Raised (35 mm)", description: "Above the median" },
    Preset { value: 41.0, label: "Thick (41 mm)", description: "High value" },
    Preset { value: 50.0, label: "Very thick (50 mm)", description: "Extreme value" },
];

pub const FAMILY_HISTORY_PRESETS: [Preset; 5] = [
    Preset { value: 0.16, label: "Low family predisposition", description: "No relatives or distant ones only" },
    Preset { value: 0.34, label: "Average predisposition", description: "Standard genetic risk" },
    Preset { value: 0.5, label: "Raised predisposition", description: "A single relative" },
    Preset { value: 0.8, label: "High predisposition", description: "Several cases in the family" },
    Preset { value: 1.2, label: "Very high predisposition", description: "Extreme family history" },
];

/// Preset list for fields entered by choice, empty for free-entry fields.
pub fn presets_for(field: PatientField) -> &'static [Preset] {
    match field {
        PatientField::SkinThickness => &SKIN_THICKNESS_PRESETS,
        PatientField::DiabetesPedigreeFunction => &FAMILY_HISTORY_PRESETS,
        _ => &[],
    }
}

pub(crate) fn position_of(field: PatientField, value: f64) -> Option<usize> {
    presets_for(field).iter().position(|preset| preset.value == value)
}

/// Preset whose value is exactly `value`.
pub fn preset_matching(field: PatientField, value: f64) -> Option<&'static Preset> {
    position_of(field, value).map(|idx| &presets_for(field)[idx])
}
