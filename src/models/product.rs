use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// Fields required to insert a product; the id comes from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Unwrap a request body into a non-empty JSON object.
pub fn body_object(body: Option<Value>) -> Result<Map<String, Value>, ApiError> {
    match body {
        Some(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(ApiError::bad_request("No product data provided")),
    }
}

// Mirrors loose truthiness: null, "", 0, false, [] and {} all count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn string_field(body: &Map<String, Value>, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) => Err(ApiError::bad_request(format!("Field '{}' cannot be null", field))),
        Some(_) => Err(ApiError::bad_request(format!("Field '{}' must be a string", field))),
    }
}

fn number_field(body: &Map<String, Value>, field: &str) -> Result<Option<f64>, ApiError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Field '{}' must be a number", field))),
        Some(Value::Null) => Err(ApiError::bad_request(format!("Field '{}' cannot be null", field))),
        Some(_) => Err(ApiError::bad_request(format!("Field '{}' must be a number", field))),
    }
}

impl NewProduct {
    /// Validate a create body. A price of exactly 0 is rejected as missing.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        let present = ["title", "description", "price"]
            .iter()
            .all(|field| body.get(*field).map_or(false, is_truthy));
        if !present {
            return Err(ApiError::bad_request("Missing required fields"));
        }

        // Truthiness passed, so each lookup yields Some unless the type is wrong.
        let missing = || ApiError::bad_request("Missing required fields");
        Ok(Self {
            title: string_field(body, "title")?.ok_or_else(missing)?,
            description: string_field(body, "description")?.ok_or_else(missing)?,
            price: number_field(body, "price")?.ok_or_else(missing)?,
        })
    }
}

impl ProductPatch {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        Ok(Self {
            title: string_field(body, "title")?,
            description: string_field(body, "description")?,
            price: number_field(body, "price")?,
        })
    }
}

impl Product {
    /// Overwrite only the fields supplied in the patch.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        body_object(Some(value)).unwrap()
    }

    #[test]
    fn body_must_be_non_empty_object() {
        assert!(body_object(None).is_err());
        assert!(body_object(Some(json!({}))).is_err());
        assert!(body_object(Some(json!([1, 2]))).is_err());
        assert!(body_object(Some(json!("text"))).is_err());
        assert!(body_object(Some(json!({"title": "x"}))).is_ok());
    }

    #[test]
    fn create_accepts_complete_body() {
        let product = NewProduct::from_body(&object(json!({
            "title": "Lamp",
            "description": "Desk lamp",
            "price": 19.5
        })))
        .unwrap();

        assert_eq!(product.title, "Lamp");
        assert_eq!(product.description, "Desk lamp");
        assert_eq!(product.price, 19.5);
    }

    #[test]
    fn create_treats_falsy_fields_as_missing() {
        let cases = [
            json!({"description": "d", "price": 1}),
            json!({"title": "", "description": "d", "price": 1}),
            json!({"title": "t", "description": null, "price": 1}),
            json!({"title": "t", "description": "d", "price": 0}),
            json!({"title": "t", "description": "d", "price": 0.0}),
            json!({"title": "t", "description": "d", "price": false}),
        ];

        for case in cases {
            let err = NewProduct::from_body(&object(case.clone())).unwrap_err();
            assert_eq!(err.message(), "Missing required fields", "case: {}", case);
        }
    }

    #[test]
    fn create_rejects_wrong_types() {
        let err = NewProduct::from_body(&object(json!({
            "title": 42,
            "description": "d",
            "price": 1
        })))
        .unwrap_err();
        assert_eq!(err.message(), "Field 'title' must be a string");

        let err = NewProduct::from_body(&object(json!({
            "title": "t",
            "description": "d",
            "price": "cheap"
        })))
        .unwrap_err();
        assert_eq!(err.message(), "Field 'price' must be a number");
    }

    #[test]
    fn patch_keeps_omitted_fields() {
        let mut product = Product {
            id: 1,
            title: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: 19.5,
        };

        let patch = ProductPatch::from_body(&object(json!({"price": 25}))).unwrap();
        product.apply(patch);

        assert_eq!(product.title, "Lamp");
        assert_eq!(product.description, "Desk lamp");
        assert_eq!(product.price, 25.0);
        assert_eq!(product.id, 1);
    }

    #[test]
    fn patch_ignores_unknown_fields_and_rejects_nulls() {
        let patch = ProductPatch::from_body(&object(json!({"id": 99, "colour": "red"}))).unwrap();
        assert_eq!(patch, ProductPatch::default());

        let err = ProductPatch::from_body(&object(json!({"title": null}))).unwrap_err();
        assert_eq!(err.message(), "Field 'title' cannot be null");
    }
}
