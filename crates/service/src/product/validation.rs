//! Boundary validation: untyped request data in, typed values out.
//!
//! Known fields are cast to their type the way a permissive document schema
//! would: numeric strings become numbers, scalars become strings. Only values
//! that cannot be cast are rejected. Nothing is required, unknown fields are
//! dropped and an explicit `null` is kept so an update can clear the field.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::ProductInput;

/// Apply the product shape to an arbitrary JSON payload.
pub fn validate_payload(payload: Value) -> Result<ProductInput, ServiceError> {
    let Value::Object(obj) = payload else {
        return Err(ServiceError::Validation("payload must be a JSON object".into()));
    };
    Ok(ProductInput {
        name: field(&obj, "name", cast_text)?,
        description: field(&obj, "description", cast_text)?,
        price: field(&obj, "price", cast_number)?,
        quantity: field(&obj, "quantity", cast_integer)?,
        category: field(&obj, "category", cast_text)?,
    })
}

/// Parse the external string form of a product id.
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

fn field<T>(
    obj: &Map<String, Value>,
    key: &str,
    cast: fn(&Value) -> Option<Option<T>>,
) -> Result<Option<Option<T>>, ServiceError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(v) => cast(v)
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("`{key}` cannot be cast from {v}"))),
    }
}

fn cast_text(v: &Value) -> Option<Option<String>> {
    match v {
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        _ => None,
    }
}

fn cast_number(v: &Value) -> Option<Option<f64>> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        // an empty string casts to null
        Value::String(s) if s.trim().is_empty() => return Some(None),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    n.is_finite().then_some(Some(n))
}

fn cast_integer(v: &Value) -> Option<Option<i64>> {
    if let Value::Number(n) = v {
        if let Some(i) = n.as_i64() {
            return Some(Some(i));
        }
    }
    let n = cast_number(v)?;
    match n {
        None => Some(None),
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Some(Some(f as i64)),
        Some(_) => None,
    }
}
