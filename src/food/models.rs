use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estimated nutrition for one described food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub name: String,
    pub calories: f64, // kcal
    pub protein: f64,  // grams
    pub fat: f64,      // grams
    pub carbs: f64,    // grams
    #[serde(rename = "weight_g")]
    pub weight_grams: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NutritionEstimate {
    /// Portion label for display: the model's description, or the weight.
    pub fn portion_label(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("{}g", self.weight_grams),
        }
    }
}

/// An accepted estimate in the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub estimate: NutritionEstimate,
}

impl LogEntry {
    pub fn new(estimate: NutritionEstimate) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            estimate,
        }
    }
}

/// Componentwise sum of calories and macros across log entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl DailyTotals {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl From<&NutritionEstimate> for DailyTotals {
    fn from(estimate: &NutritionEstimate) -> Self {
        Self {
            calories: estimate.calories,
            protein: estimate.protein,
            fat: estimate.fat,
            carbs: estimate.carbs,
        }
    }
}

impl std::ops::Add for DailyTotals {
    type Output = DailyTotals;

    fn add(self, other: DailyTotals) -> DailyTotals {
        DailyTotals {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }
}

impl std::iter::Sum for DailyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DailyTotals::zero(), |acc, t| acc + t)
    }
}
