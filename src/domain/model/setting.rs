//! Display settings: a flat key/value store with two well-known keys.

use super::coerce_text;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const DAILY_VALUE_SYMBOL: &str = "dailyValueSymbol";
pub const NON_DAILY_VALUE_SYMBOL: &str = "nonDailyValueSymbol";

/// All stored settings, key → value.
pub type Settings = BTreeMap<String, String>;

/// Body of `PUT /api/settings`. Unrecognized keys are dropped by serde.
///
/// Values may be any JSON scalar; they are stored as text.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SettingsUpdate {
    #[serde(default, rename = "dailyValueSymbol")]
    #[schema(value_type = Option<String>)]
    pub daily_value_symbol: Option<JsonValue>,
    #[serde(default, rename = "nonDailyValueSymbol")]
    #[schema(value_type = Option<String>)]
    pub non_daily_value_symbol: Option<JsonValue>,
}

impl SettingsUpdate {
    /// Keys carrying a truthy value, in write order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        [
            (DAILY_VALUE_SYMBOL, self.daily_value_symbol.as_ref()),
            (NON_DAILY_VALUE_SYMBOL, self.non_daily_value_symbol.as_ref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| is_set(v)).and_then(coerce_text).map(|s| (k, s)))
        .collect()
    }
}

/// `null`, `false`, zero and the empty string leave a key untouched.
fn is_set(v: &JsonValue) -> bool {
    match v {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
