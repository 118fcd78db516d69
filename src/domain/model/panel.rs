//! Per-SKU nutrition panels: an SKU plus an opaque JSON document.

use super::coerce_text;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;

/// A stored panel. Serializes as one flat object: `id`, `sku`, then every document field.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct Panel {
    pub id: i64,
    pub sku: String,
    #[schema(value_type = Object)]
    pub fields: Map<String, JsonValue>,
}

impl Panel {
    /// Flattened JSON object. Document fields are applied last, so a document
    /// field named `id` shadows the row id.
    pub fn to_document(&self) -> Map<String, JsonValue> {
        let mut out = Map::with_capacity(self.fields.len() + 2);
        out.insert("id".to_string(), JsonValue::from(self.id));
        out.insert("sku".to_string(), JsonValue::from(self.sku.clone()));
        for (k, v) in &self.fields {
            out.insert(k.clone(), v.clone());
        }
        out
    }
}

impl Serialize for Panel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

/// A panel about to be inserted: the SKU split off from the rest of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPanel {
    /// `None` when the body carried no usable SKU; the store rejects it.
    pub sku: Option<String>,
    pub fields: Map<String, JsonValue>,
}

impl NewPanel {
    pub fn from_body(mut body: Map<String, JsonValue>) -> Self {
        let sku = body.remove("sku").as_ref().and_then(coerce_text);
        Self { sku, fields: body }
    }

    pub fn json_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}
