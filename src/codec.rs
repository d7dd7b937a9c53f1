//! Generic `to_wire` / `from_wire` engine driven by [`ObjectSchema`] tables.

use serde_json::{Number, Value as Json};

use crate::error::ValidationError;
use crate::schema::{FieldSchema, FieldType, ObjectSchema};
use crate::value::{Value, WireMap, WireObject};

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(n) if n.is_f64() => "float",
        Json::Number(_) => "integer",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "object",
    }
}

fn mismatch(
    owner: &'static str,
    field: &FieldSchema,
    ty: &FieldType,
    found: &'static str,
) -> ValidationError {
    ValidationError::TypeMismatch {
        object: owner,
        field: field.name,
        expected: ty.describe(),
        found,
    }
}

/// Check `value` against `ty`, widening integers to floats where needed
pub(crate) fn coerce(
    schema: &'static ObjectSchema,
    field: &FieldSchema,
    ty: &FieldType,
    value: Value,
) -> Result<Value, ValidationError> {
    match (ty, value) {
        (FieldType::String, value @ Value::Str(_))
        | (FieldType::Integer, value @ Value::Int(_))
        | (FieldType::Float, value @ Value::Float(_))
        | (FieldType::Boolean, value @ Value::Bool(_)) => Ok(value),
        (FieldType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (FieldType::Object(expected), Value::Object(object)) => {
            if object.schema().is(expected) {
                Ok(Value::Object(object))
            } else {
                Err(mismatch(schema.name, field, ty, object.schema().name))
            }
        }
        (FieldType::OneOf(variants), Value::Object(object)) => {
            if variants.iter().any(|variant| object.schema().is(variant)) {
                Ok(Value::Object(object))
            } else {
                Err(ValidationError::UnknownVariant {
                    object: schema.name,
                    field: field.name,
                    found: object.schema().name,
                })
            }
        }
        (FieldType::List(inner), Value::List(items)) => items
            .into_iter()
            .map(|item| coerce(schema, field, inner, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (ty, value) => Err(mismatch(schema.name, field, ty, value.kind())),
    }
}

pub(crate) fn encode_object(object: &WireObject) -> Result<WireMap, ValidationError> {
    let schema = object.schema();
    let mut map = WireMap::new();
    for (field, value) in schema.fields.iter().zip(object.values()) {
        match value {
            Some(value) => {
                let encoded = encode_value(schema.name, field, &field.ty, value)?;
                map.insert(field.wire_key.to_string(), encoded);
            }
            None if field.required => {
                return Err(ValidationError::MissingRequiredField {
                    object: schema.name,
                    field: field.name,
                });
            }
            None => {}
        }
    }
    Ok(map)
}

pub(crate) fn encode_value(
    owner: &'static str,
    field: &FieldSchema,
    ty: &FieldType,
    value: &Value,
) -> Result<Json, ValidationError> {
    match (ty, value) {
        (FieldType::String, Value::Str(s)) => Ok(Json::String(s.clone())),
        (FieldType::Integer, Value::Int(i)) => Ok(Json::from(*i)),
        (FieldType::Boolean, Value::Bool(b)) => Ok(Json::Bool(*b)),
        (FieldType::Float, Value::Float(_) | Value::Int(_)) => value
            .as_f64()
            .and_then(Number::from_f64)
            .map(Json::Number)
            .ok_or_else(|| mismatch(owner, field, ty, "non-finite float")),
        (FieldType::Object(expected), Value::Object(object)) => {
            if object.schema().is(expected) {
                encode_object(object).map(Json::Object)
            } else {
                Err(mismatch(owner, field, ty, object.schema().name))
            }
        }
        (FieldType::OneOf(variants), Value::Object(object)) => {
            if variants.iter().any(|variant| object.schema().is(variant)) {
                encode_object(object).map(Json::Object)
            } else {
                Err(ValidationError::UnknownVariant {
                    object: owner,
                    field: field.name,
                    found: object.schema().name,
                })
            }
        }
        (FieldType::List(inner), Value::List(items)) => items
            .iter()
            .map(|item| encode_value(owner, field, inner, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        (ty, value) => Err(mismatch(owner, field, ty, value.kind())),
    }
}

pub(crate) fn decode_object(
    schema: &'static ObjectSchema,
    map: &WireMap,
) -> Result<WireObject, ValidationError> {
    let mut values = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        // An explicit null counts as absent
        let value = match map.get(field.wire_key) {
            None | Some(Json::Null) if field.required => {
                return Err(ValidationError::MissingRequiredField {
                    object: schema.name,
                    field: field.name,
                });
            }
            None | Some(Json::Null) => None,
            Some(raw) => Some(decode_value(schema.name, field, &field.ty, raw)?),
        };
        values.push(value);
    }
    Ok(WireObject::from_parts(schema, values))
}

pub(crate) fn decode_value(
    owner: &'static str,
    field: &FieldSchema,
    ty: &FieldType,
    raw: &Json,
) -> Result<Value, ValidationError> {
    let decoded = match ty {
        FieldType::String => raw.as_str().map(|s| Value::Str(s.to_string())),
        FieldType::Integer => raw.as_i64().map(Value::Int),
        FieldType::Float => raw.as_f64().map(Value::Float),
        FieldType::Boolean => raw.as_bool().map(Value::Bool),
        FieldType::Object(schema) => match raw.as_object() {
            Some(map) => return decode_object(*schema, map).map(Value::Object),
            None => None,
        },
        FieldType::OneOf(variants) => match raw.as_object() {
            Some(map) => {
                // No type tag on the wire: the first variant that fully
                // validates wins.
                return variants
                    .iter()
                    .find_map(|variant| decode_object(*variant, map).ok())
                    .map(Value::Object)
                    .ok_or(ValidationError::NoVariantMatched {
                        object: owner,
                        field: field.name,
                    });
            }
            None => None,
        },
        FieldType::List(inner) => match raw.as_array() {
            Some(items) => {
                return items
                    .iter()
                    .map(|item| decode_value(owner, field, inner, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List);
            }
            None => None,
        },
    };
    decoded.ok_or_else(|| mismatch(owner, field, ty, json_kind(raw)))
}
