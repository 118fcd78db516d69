//! Record types for the supplement data store.

pub mod ingredient;
pub mod panel;
pub mod reference;
pub mod setting;

pub use ingredient::{Ingredient, IngredientGroups, IngredientInput, NewIngredient};
pub use panel::{NewPanel, Panel};
pub use reference::{Allergen, Organization, OrganizationKind};
pub use setting::{Settings, SettingsUpdate, DAILY_VALUE_SYMBOL, NON_DAILY_VALUE_SYMBOL};

use serde_json::Value as JsonValue;

/// Text column value from any JSON scalar: strings pass through, `null` is
/// absent, anything else is stored in its JSON rendering.
pub(crate) fn coerce_text(v: &JsonValue) -> Option<String> {
    match v {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
