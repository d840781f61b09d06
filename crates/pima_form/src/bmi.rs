use crate::round1;
use crate::tone::Tone;

pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Weight over height squared, rounded to one decimal.
///
/// Returns `None` unless both inputs are strictly positive; callers keep
/// their previous BMI in that case.
pub fn derive_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm > 0.0 && weight_kg > 0.0 {
        let height_m = height_cm / 100.0;
        Some(round1(weight_kg / (height_m * height_m)))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiCalculator {
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Default for BmiCalculator {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
        }
    }
}

impl BmiCalculator {
    pub fn bmi(&self) -> Option<f64> {
        derive_bmi(self.height_cm, self.weight_kg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// Half-open band `[min, max)` for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiBand {
    pub category: BmiCategory,
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
    pub tone: Tone,
}

impl BmiBand {
    /// WHO range as shown to the user; the open-ended top band prints `∞`.
    pub fn range_text(&self, open_ended: bool) -> String {
        if open_ended {
            format!("{} - ∞", self.min)
        } else {
            format!("{} - {}", self.min, self.max)
        }
    }
}

/// WHO bands, ordered by ascending upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct BmiBands {
    bands: Vec<BmiBand>,
}

impl Default for BmiBands {
    fn default() -> Self {
        Self {
            bands: vec![
                BmiBand { category: BmiCategory::Underweight, min: 0.0, max: 18.5, label: "Underweight", tone: Tone::Blue },
                BmiBand { category: BmiCategory::Normal, min: 18.5, max: 25.0, label: "Normal weight", tone: Tone::Green },
                BmiBand { category: BmiCategory::Overweight, min: 25.0, max: 30.0, label: "Overweight", tone: Tone::Yellow },
                BmiBand { category: BmiCategory::Obese, min: 30.0, max: 100.0, label: "Obesity", tone: Tone::Red },
            ],
        }
    }
}

impl BmiBands {
    pub fn new(bands: Vec<BmiBand>) -> Self {
        Self { bands }
    }

    /// The band holding `bmi`. Anything past the last upper bound lands in the last band.
    pub fn band_for(&self, bmi: f64) -> Option<&BmiBand> {
        self.bands
            .iter()
            .find(|band| bmi < band.max)
            .or_else(|| self.bands.last())
    }

    pub fn categorize(&self, bmi: f64) -> Option<BmiCategory> {
        self.band_for(bmi).map(|band| band.category)
    }

    pub fn is_last(&self, band: &BmiBand) -> bool {
        self.bands.last().is_some_and(|last| last.category == band.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_calculator_gives_24_2() {
        assert_eq!(derive_bmi(170.0, 70.0), Some(24.2));
        assert_eq!(BmiCalculator::default().bmi(), Some(24.2));
        assert_eq!(BmiBands::default().categorize(24.2), Some(BmiCategory::Normal));
    }

    #[test]
    fn non_positive_inputs_derive_nothing() {
        assert_eq!(derive_bmi(0.0, 70.0), None);
        assert_eq!(derive_bmi(170.0, 0.0), None);
        assert_eq!(derive_bmi(-170.0, 70.0), None);
    }

    #[test]
    fn band_edges_are_half_open() {
        let bands = BmiBands::default();
        assert_eq!(bands.categorize(18.4), Some(BmiCategory::Underweight));
        assert_eq!(bands.categorize(18.5), Some(BmiCategory::Normal));
        assert_eq!(bands.categorize(25.0), Some(BmiCategory::Overweight));
        assert_eq!(bands.categorize(30.0), Some(BmiCategory::Obese));
        assert_eq!(bands.categorize(140.0), Some(BmiCategory::Obese));
    }

    #[test]
    fn custom_bands_replace_who_table() {
        let bands = BmiBands::new(vec![
            BmiBand { category: BmiCategory::Normal, min: 0.0, max: 27.5, label: "Normal weight", tone: Tone::Green },
            BmiBand { category: BmiCategory::Obese, min: 27.5, max: 100.0, label: "Obesity", tone: Tone::Red },
        ]);
        assert_eq!(bands.categorize(26.0), Some(BmiCategory::Normal));
        assert_eq!(bands.categorize(27.5), Some(BmiCategory::Obese));
        assert_eq!(bands.categorize(140.0), Some(BmiCategory::Obese));
        assert_eq!(BmiBands::new(Vec::new()).categorize(24.2), None);
    }

    #[test]
    fn range_text_marks_open_band() {
        let bands = BmiBands::default();
        let obese = *bands.band_for(35.0).expect("band");
        assert!(bands.is_last(&obese));
        assert_eq!(obese.range_text(bands.is_last(&obese)), "30 - ∞");
        let normal = *bands.band_for(20.0).expect("band");
        assert_eq!(normal.range_text(bands.is_last(&normal)), "18.5 - 25");
    }

    proptest! {
        #[test]
        fn category_matches_band_bounds(bmi in 0.0f64..150.0) {
            let bands = BmiBands::default();
            let band = bands.band_for(bmi).expect("default bands are non-empty");
            prop_assert!(bmi >= band.min);
            prop_assert!(bmi < band.max || band.category == BmiCategory::Obese);
        }

        #[test]
        fn derived_bmi_has_one_decimal(height in 50.0f64..250.0, weight in 1.0f64..300.0) {
            let bmi = derive_bmi(height, weight).expect("positive inputs");
            prop_assert!(((bmi * 10.0).round() - bmi * 10.0).abs() < 1e-6);
        }
    }
}
