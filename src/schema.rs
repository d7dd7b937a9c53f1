//! Declarative schema descriptions for wire objects and commands.
//!
//! Every concrete Bot API object is a static [`ObjectSchema`]: an ordered
//! list of [`FieldSchema`] rows. One generic codec reads these rows to
//! build, validate and (de)serialize instances, so adding a new type means
//! adding a table entry, not new code.

use std::fmt;
use std::ptr;

/// Semantic type of a single field
#[derive(Clone, Copy)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// A nested wire object of exactly this schema
    Object(&'static ObjectSchema),
    /// One of several object schemas, tried in declared priority order
    OneOf(&'static [&'static ObjectSchema]),
    /// Ordered list of the inner type
    List(&'static FieldType),
}

impl FieldType {
    /// Short name used in error messages
    pub fn describe(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Object(schema) => schema.name.to_string(),
            FieldType::OneOf(variants) => {
                let names: Vec<&str> = variants.iter().map(|v| v.name).collect();
                format!("one of [{}]", names.join(", "))
            }
            FieldType::List(inner) => format!("list of {}", inner.describe()),
        }
    }
}

// Object schemas can be self-referential (a message replies to a message),
// so Debug prints nested schemas by name only.
impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// One field of one wire object
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Name used by application code
    pub name: &'static str,
    /// Key used on the wire
    pub wire_key: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

/// Field that must always be present
pub const fn required(name: &'static str, ty: FieldType) -> FieldSchema {
    FieldSchema {
        name,
        wire_key: name,
        ty,
        required: true,
    }
}

/// Field that may be absent; absent values are omitted from outgoing maps
pub const fn optional(name: &'static str, ty: FieldType) -> FieldSchema {
    FieldSchema {
        name,
        wire_key: name,
        ty,
        required: false,
    }
}

/// Field whose wire key differs from its name (e.g. `from`, `type`)
pub const fn renamed(
    name: &'static str,
    wire_key: &'static str,
    ty: FieldType,
    required: bool,
) -> FieldSchema {
    FieldSchema {
        name,
        wire_key,
        ty,
        required,
    }
}

/// Ordered field list describing one concrete object type
#[derive(Debug)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl ObjectSchema {
    /// Index of the field called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        let fields: &'static [FieldSchema] = self.fields;
        fields.iter().find(|field| field.name == name)
    }

    /// Schema identity; two schemas are the same type only if they are the
    /// same table entry.
    pub fn is(&self, other: &ObjectSchema) -> bool {
        ptr::eq(self, other)
    }
}

/// A remote method: its parameters, result type and context slots
#[derive(Debug)]
pub struct CommandSchema {
    /// Bot API method name, e.g. `sendMessage`
    pub method: &'static str,
    /// Parameters other than the destination and reply slots
    pub params: &'static ObjectSchema,
    /// Type of the `result` payload on success
    pub result: FieldType,
    /// Wire key for the destination chat, if the method targets one
    pub destination_key: Option<&'static str>,
    /// Wire key for the replied-to message, if the method can reply
    pub reply_key: Option<&'static str>,
}

impl CommandSchema {
    pub fn is(&self, other: &CommandSchema) -> bool {
        ptr::eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static INNER: ObjectSchema = ObjectSchema {
        name: "Inner",
        fields: &[required("id", FieldType::Integer)],
    };
    static OTHER: ObjectSchema = ObjectSchema {
        name: "Other",
        fields: &[],
    };
    static INNER_ITEM: FieldType = FieldType::Object(&INNER);
    static VARIANTS: [&ObjectSchema; 2] = [&INNER, &OTHER];

    #[test]
    fn describes_nested_types() {
        assert_eq!(FieldType::List(&INNER_ITEM).describe(), "list of Inner");
        assert_eq!(
            FieldType::OneOf(&VARIANTS).describe(),
            "one of [Inner, Other]"
        );
    }

    #[test]
    fn identity_is_by_table_entry() {
        assert!(INNER.is(&INNER));
        assert!(!INNER.is(&OTHER));
        assert_eq!(INNER.position("id"), Some(0));
        assert!(INNER.field("missing").is_none());
    }
}
