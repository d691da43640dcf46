//! Response contract with the estimation model.
//!
//! The model is asked for a single JSON object. Parsing is all-or-nothing:
//! a response is either a complete, valid estimate, an explicit "not food"
//! answer, or malformed.

use crate::food::models::NutritionEstimate;
use serde::Deserialize;
use serde_json::{json, Value};

pub const REQUIRED_FIELDS: [&str; 7] = ["name", "calories", "protein", "fat", "carbs", "weight_g", "is_food"];

/// Schema in the Generative Language API's OpenAPI subset.
pub fn response_schema(target_language: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {
                "type": "STRING",
                "description": format!("Short name of the food in {}", target_language)
            },
            "calories": { "type": "NUMBER", "description": "Total calories (kcal)" },
            "protein": { "type": "NUMBER", "description": "Protein content in grams" },
            "fat": { "type": "NUMBER", "description": "Fat content in grams" },
            "carbs": { "type": "NUMBER", "description": "Carbohydrate content in grams" },
            "weight_g": { "type": "NUMBER", "description": "Estimated weight in grams" },
            "description": {
                "type": "STRING",
                "description": format!("Short description of the portion size in {}, e.g. '1 medium apple'", target_language)
            },
            "is_food": { "type": "BOOLEAN", "description": "True if valid food, false otherwise" }
        },
        "required": REQUIRED_FIELDS
    })
}

#[derive(Debug, Deserialize)]
struct RawEstimate {
    name: String,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    weight_g: f64,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum ParsedResponse {
    Food(NutritionEstimate),
    NotFood,
}

/// Validates raw model output. `Err` carries a diagnostic for logs.
pub fn parse_response(text: &str) -> Result<ParsedResponse, String> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| format!("response is not valid JSON: {}", e))?;

    let object = value
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;

    // Non-food answers may carry nulls everywhere else, so classify first.
    match object.get("is_food") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => return Ok(ParsedResponse::NotFood),
        Some(other) => return Err(format!("is_food must be a boolean, got {}", other)),
        None => return Err("missing field `is_food`".to_string()),
    }

    let raw: RawEstimate = serde_json::from_value(value)
        .map_err(|e| format!("response does not match schema: {}", e))?;

    for (field, amount) in [
        ("calories", raw.calories),
        ("protein", raw.protein),
        ("fat", raw.fat),
        ("carbs", raw.carbs),
        ("weight_g", raw.weight_g),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("field `{}` must be a non-negative number, got {}", field, amount));
        }
    }

    Ok(ParsedResponse::Food(NutritionEstimate {
        name: raw.name,
        calories: raw.calories,
        protein: raw.protein,
        fat: raw.fat,
        carbs: raw.carbs,
        weight_grams: raw.weight_g,
        description: raw.description,
    }))
}
