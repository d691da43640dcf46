use crate::food::models::NutritionEstimate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Protein,
    Fat,
    Carbs,
}

impl Macro {
    pub fn label(&self) -> &'static str {
        match self {
            Macro::Protein => "Protein",
            Macro::Fat => "Fat",
            Macro::Carbs => "Carbs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroShare {
    #[serde(rename = "macro")]
    pub kind: Macro,
    pub grams: f64,
    /// Share of the included macros' grams, rounded to one decimal.
    pub percent: f64,
}

/// Splits an estimate into its positive macro categories. Zero-gram macros
/// are left out; an estimate with no macros yields an empty breakdown.
pub fn macro_breakdown(estimate: &NutritionEstimate) -> Vec<MacroShare> {
    let included: Vec<(Macro, f64)> = [
        (Macro::Protein, estimate.protein),
        (Macro::Fat, estimate.fat),
        (Macro::Carbs, estimate.carbs),
    ]
    .into_iter()
    .filter(|(_, grams)| *grams > 0.0)
    .collect();

    let total: f64 = included.iter().map(|(_, grams)| grams).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    included
        .into_iter()
        .map(|(kind, grams)| MacroShare {
            kind,
            grams,
            percent: round_one_decimal(grams / total * 100.0),
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
