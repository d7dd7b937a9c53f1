use serde::ser::{Error as _, Serialize, Serializer};

use crate::codec;
use crate::error::ValidationError;
use crate::schema::ObjectSchema;

/// JSON-compatible key/value map exactly as it travels on the wire.
/// Insertion order is preserved.
pub type WireMap = serde_json::Map<String, serde_json::Value>;

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Object(WireObject),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&WireObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<WireObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Kind name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Object(object) => object.schema().name,
            Value::List(_) => "list",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<WireObject> for Value {
    fn from(value: WireObject) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// An instance of one [`ObjectSchema`].
///
/// Field values are type-checked when they are set; required fields are
/// only enforced by [`WireObject::validate`] and [`WireObject::to_wire`],
/// so an instance can be assembled one field at a time.
#[derive(Debug, Clone)]
pub struct WireObject {
    schema: &'static ObjectSchema,
    values: Vec<Option<Value>>,
}

impl WireObject {
    /// Empty instance with every field absent
    pub fn new(schema: &'static ObjectSchema) -> Self {
        WireObject {
            schema,
            values: vec![None; schema.fields.len()],
        }
    }

    pub(crate) fn from_parts(schema: &'static ObjectSchema, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(values.len(), schema.fields.len());
        WireObject { schema, values }
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        self.schema
    }

    /// Set a field, coercing the value to the declared type
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<(), ValidationError> {
        let index = self.index_of(name)?;
        let schema = self.schema;
        let field = &schema.fields[index];
        let value = codec::coerce(schema, field, &field.ty, value.into())?;
        self.values[index] = Some(value);
        Ok(())
    }

    /// Builder form of [`WireObject::set`]
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Result<Self, ValidationError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Reset a field to absent, returning the previous value
    pub fn unset(&mut self, name: &str) -> Result<Option<Value>, ValidationError> {
        let index = self.index_of(name)?;
        Ok(self.values[index].take())
    }

    /// Value of a field, `None` when absent or undeclared
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|index| self.values[index].as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_object(&self, name: &str) -> Option<&WireObject> {
        self.get(name).and_then(Value::as_object)
    }

    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Iterate over present fields in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.schema
            .fields
            .iter()
            .zip(self.values.iter())
            .filter_map(|(field, value)| value.as_ref().map(|value| (field.name, value)))
    }

    pub(crate) fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.schema.fields.iter().zip(self.values.iter()) {
            if field.required && value.is_none() {
                return Err(ValidationError::MissingRequiredField {
                    object: self.schema.name,
                    field: field.name,
                });
            }
        }
        Ok(())
    }

    /// Serialize to a wire map; absent optional fields are omitted
    pub fn to_wire(&self) -> Result<WireMap, ValidationError> {
        codec::encode_object(self)
    }

    /// Validate and deserialize a wire map against `schema`
    pub fn from_wire(
        schema: &'static ObjectSchema,
        map: &WireMap,
    ) -> Result<WireObject, ValidationError> {
        codec::decode_object(schema, map)
    }

    fn index_of(&self, name: &str) -> Result<usize, ValidationError> {
        self.schema
            .position(name)
            .ok_or_else(|| ValidationError::UnknownField {
                object: self.schema.name,
                field: name.to_string(),
            })
    }
}

impl PartialEq for WireObject {
    fn eq(&self, other: &Self) -> bool {
        self.schema.is(other.schema) && self.values == other.values
    }
}

impl Serialize for WireObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
