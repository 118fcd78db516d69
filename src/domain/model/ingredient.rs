//! Ingredient records and the request shape used to create/replace them.

use super::coerce_text;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// One nutrient line item as stored.
///
/// `name` travels as `ingredient` on the wire, matching the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    #[serde(rename = "ingredient")]
    pub name: String,
    pub parent_id: Option<i64>,
    pub unit: Option<String>,
    pub rdi: Option<f64>,
    pub is_daily_value: bool,
}

/// Ingredients partitioned by their daily-value flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IngredientGroups {
    #[serde(rename = "dailyValue")]
    pub daily_value: Vec<Ingredient>,
    #[serde(rename = "nonDailyValue")]
    pub non_daily_value: Vec<Ingredient>,
}

impl IngredientGroups {
    /// Splits rows by `is_daily_value`, keeping the input order within each group.
    pub fn partition(rows: Vec<Ingredient>) -> Self {
        let (daily_value, non_daily_value) = rows.into_iter().partition(|r| r.is_daily_value);
        Self {
            daily_value,
            non_daily_value,
        }
    }
}

/// Body of `POST /api/ingredients` and `PUT /api/ingredients/:id`.
///
/// Scalars arrive loosely typed from the client; [`IngredientInput::normalize`]
/// coerces them. Nothing here is validated: a missing name is left for the
/// store's NOT NULL constraint to reject.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct IngredientInput {
    #[serde(default, alias = "name")]
    #[schema(value_type = Option<String>)]
    pub ingredient: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub unit: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub rdi: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub is_daily_value: Option<JsonValue>,
}

/// Column values ready to bind, after falsy-to-NULL normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewIngredient {
    pub name: Option<String>,
    pub parent_id: Option<i64>,
    pub unit: Option<String>,
    pub rdi: Option<f64>,
    pub is_daily_value: bool,
}

impl NewIngredient {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

impl IngredientInput {
    pub fn normalize(&self) -> NewIngredient {
        NewIngredient {
            name: self.ingredient.as_ref().and_then(coerce_text),
            parent_id: self.parent_id.as_ref().and_then(coerce_id),
            unit: self.unit.as_ref().and_then(coerce_text),
            rdi: self.rdi.as_ref().and_then(coerce_amount),
            is_daily_value: self.is_daily_value.as_ref().map(is_truthy).unwrap_or(false),
        }
    }
}

/// Integer id from a number or numeric string; zero and anything else is `None`.
fn coerce_id(v: &JsonValue) -> Option<i64> {
    let id = match v {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

/// Decimal amount from a number or numeric string; zero and NaN are `None`.
fn coerce_amount(v: &JsonValue) -> Option<f64> {
    let amount = match v {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (amount != 0.0 && !amount.is_nan()).then_some(amount)
}

fn is_truthy(v: &JsonValue) -> bool {
    match v {
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        JsonValue::String(s) => {
            let lc = s.trim().to_lowercase();
            !matches!(lc.as_str(), "" | "false" | "f" | "0")
        }
        JsonValue::Null => false,
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
