//! Field-by-field decoding of JSON request bodies.
//!
//! `serde_json::from_value` gives up at the first bad field. [`decode`]
//! keeps going: a field with the wrong type, or a required field that is
//! absent, is recorded and then stood in for by a neutral value of the type
//! the target expects (`""`, `0`, `false`, `[]`, `None`). Decoding is retried
//! until the body yields a value, so every such field ends up reported.

use serde::Deserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Expected, MapAccess, SeqAccess, Visitor,
    value::BorrowedStrDeserializer,
};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

static NULL: Value = Value::Null;

/// Decode `body` into `T`, collecting every type and presence violation.
///
/// On success the returned errors list the fields that were stood in for;
/// the value is only meaningful for the fields not named there. Fails when
/// the body cannot be shaped into `T` at all (e.g. an array where an object
/// is expected).
pub(crate) fn decode<T: DeserializeOwned>(
    body: &Value,
) -> Result<(T, ValidationErrors), ValidationErrors> {
    let mut broken = HashSet::new();
    let mut errors = ValidationErrors::new();

    loop {
        let root = Field::new(body, String::new(), &broken, false);
        let error = match <T as serde::Deserialize>::deserialize(root) {
            Ok(value) => return Ok((value, errors)),
            Err(error) => error.at(""),
        };

        if error.path.is_empty() {
            record(&mut errors, error);
            return Err(errors);
        }
        // The neutral value was rejected too; nothing more to learn.
        if !broken.insert(error.path.clone()) {
            return Err(errors);
        }
        record(&mut errors, error);
    }
}

/// Files a violation under its top-level field; nested paths go in `path`.
fn record(errors: &mut ValidationErrors, violation: Violation) {
    let field = match violation.path.split(&['.', '['][..]).next() {
        Some(field) if !field.is_empty() => field.to_string(),
        _ => "body".to_string(),
    };

    let mut error =
        ValidationError::new(violation.code).with_message(Cow::Owned(violation.message));
    if !violation.path.is_empty() && violation.path != field {
        error.add_param(Cow::Borrowed("path"), &violation.path);
    }

    if let ValidationErrorsKind::Field(list) = errors
        .errors_mut()
        .entry(Cow::Owned(field))
        .or_insert_with(|| ValidationErrorsKind::Field(Vec::new()))
    {
        list.push(error);
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug)]
struct Violation {
    path: String,
    code: &'static str,
    message: String,
}

#[derive(Debug)]
enum FieldError {
    /// Raised by a struct visitor; not yet tied to a path.
    Missing(&'static str),
    /// Raised by a visitor or by `serde_json`; not yet tied to a path.
    Custom(String),
    At(Violation),
}

impl FieldError {
    fn at(self, path: &str) -> Violation {
        match self {
            FieldError::Missing(field) => Violation {
                path: join(path, field),
                code: "required",
                message: "field required".to_string(),
            },
            FieldError::Custom(message) => Violation {
                path: path.to_string(),
                code: "type",
                message,
            },
            FieldError::At(violation) => violation,
        }
    }

    fn placed(self, path: &str) -> Self {
        FieldError::At(self.at(path))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing(field) => write!(f, "missing field `{field}`"),
            FieldError::Custom(message) => f.write_str(message),
            FieldError::At(violation) => write!(f, "{}: {}", violation.path, violation.message),
        }
    }
}

impl std::error::Error for FieldError {}

impl de::Error for FieldError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FieldError::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        FieldError::Missing(field)
    }
}

/// One value of the body, with its dotted path.
///
/// `neutral` fields skip the body entirely and hand the visitor the neutral
/// value for whatever it asks for.
struct Field<'a, 'de> {
    value: &'de Value,
    path: String,
    broken: &'a HashSet<String>,
    neutral: bool,
}

impl<'a, 'de> Field<'a, 'de> {
    fn new(value: &'de Value, path: String, broken: &'a HashSet<String>, inherited: bool) -> Self {
        let neutral = inherited || broken.contains(&path);
        Self {
            value,
            path,
            broken,
            neutral,
        }
    }

    fn mismatch(&self, expected: &dyn Expected) -> FieldError {
        FieldError::At(Violation {
            path: self.path.clone(),
            code: "type",
            message: format!(
                "invalid type: {}, expected {}",
                describe(self.value),
                expected
            ),
        })
    }
}

macro_rules! leaves {
    ($visitor:ident; $($method:ident => $neutral:expr),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, $visitor: V) -> Result<V::Value, FieldError> {
                if self.neutral {
                    return $neutral;
                }
                let path = self.path;
                self.value
                    .$method($visitor)
                    .map_err(|e| FieldError::Custom(e.to_string()).placed(&path))
            }
        )*
    };
}

impl<'de> Deserializer<'de> for Field<'_, 'de> {
    type Error = FieldError;

    leaves! { visitor;
        deserialize_any => visitor.visit_unit(),
        deserialize_bool => visitor.visit_bool(false),
        deserialize_i8 => visitor.visit_i64(0),
        deserialize_i16 => visitor.visit_i64(0),
        deserialize_i32 => visitor.visit_i64(0),
        deserialize_i64 => visitor.visit_i64(0),
        deserialize_u8 => visitor.visit_u64(0),
        deserialize_u16 => visitor.visit_u64(0),
        deserialize_u32 => visitor.visit_u64(0),
        deserialize_u64 => visitor.visit_u64(0),
        deserialize_f32 => visitor.visit_f64(0.0),
        deserialize_f64 => visitor.visit_f64(0.0),
        deserialize_char => visitor.visit_char('\0'),
        deserialize_str => visitor.visit_str(""),
        deserialize_string => visitor.visit_str(""),
        deserialize_bytes => visitor.visit_bytes(&[]),
        deserialize_byte_buf => visitor.visit_bytes(&[]),
        deserialize_identifier => visitor.visit_str(""),
        deserialize_unit => visitor.visit_unit(),
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, FieldError> {
        if self.neutral || self.value.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, FieldError> {
        let items: &'de [Value] = match self.value {
            _ if self.neutral => &[][..],
            Value::Array(items) => items.as_slice(),
            _ => return Err(self.mismatch(&visitor)),
        };

        let elements = Elements {
            items: items.iter().enumerate(),
            path: &self.path,
            broken: self.broken,
            neutral: self.neutral,
        };
        visitor
            .visit_seq(elements)
            .map_err(|e| e.placed(&self.path))
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, FieldError> {
        self.deserialize_struct("", &[], visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        let entries: Vec<(&'de str, &'de Value)> = if self.neutral {
            fields
                .iter()
                .map(|field| -> (&'de str, &'de Value) { (*field, &NULL) })
                .collect()
        } else if let Value::Object(object) = self.value {
            // Absent fields already reported as missing get a neutral stand-in.
            let replaced = fields.iter().filter(|field| {
                !object.contains_key(**field) && self.broken.contains(&join(&self.path, field))
            });
            object
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .chain(
                    replaced.map(|field| -> (&'de str, &'de Value) { (*field, &NULL) }),
                )
                .collect()
        } else {
            return Err(self.mismatch(&visitor));
        };

        let entries = Entries {
            entries: entries.into_iter(),
            pending: None,
            path: &self.path,
            broken: self.broken,
            neutral: self.neutral,
        };
        visitor
            .visit_map(entries)
            .map_err(|e| e.placed(&self.path))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, FieldError> {
        if self.neutral {
            return Err(FieldError::Custom(format!("no neutral value for enum {name}"))
                .placed(&self.path));
        }
        let path = self.path;
        self.value
            .deserialize_enum(name, variants, visitor)
            .map_err(|e| FieldError::Custom(e.to_string()).placed(&path))
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, FieldError> {
        visitor.visit_unit()
    }
}

struct Entries<'a, 'de> {
    entries: std::vec::IntoIter<(&'de str, &'de Value)>,
    pending: Option<(&'de str, &'de Value)>,
    path: &'a str,
    broken: &'a HashSet<String>,
    neutral: bool,
}

impl<'de> MapAccess<'de> for Entries<'_, 'de> {
    type Error = FieldError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, FieldError> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        self.pending = Some((key, value));
        seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, FieldError> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| FieldError::Custom("value requested before its key".to_string()))?;
        seed.deserialize(Field::new(
            value,
            join(self.path, key),
            self.broken,
            self.neutral,
        ))
    }
}

struct Elements<'a, 'de> {
    items: std::iter::Enumerate<std::slice::Iter<'de, Value>>,
    path: &'a str,
    broken: &'a HashSet<String>,
    neutral: bool,
}

impl<'de> SeqAccess<'de> for Elements<'_, 'de> {
    type Error = FieldError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, FieldError> {
        let Some((index, value)) = self.items.next() else {
            return Ok(None);
        };
        let path = format!("{}[{}]", self.path, index);
        seed.deserialize(Field::new(value, path, self.broken, self.neutral))
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Line {
        sku: String,
        quantity: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Cart {
        owner: String,
        #[serde(default)]
        note: Option<String>,
        #[serde(default = "default_true")]
        gift: bool,
        lines: Vec<Line>,
    }

    fn default_true() -> bool {
        true
    }

    fn codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors.field_errors()[field]
            .iter()
            .map(|error| error.code.to_string())
            .collect()
    }

    #[test]
    fn test_valid_body_has_no_errors() {
        let body = json!({"owner": "ana", "lines": [{"sku": "A", "quantity": 2}]});
        let (cart, errors) = decode::<Cart>(&body).unwrap();

        assert!(errors.is_empty());
        assert_eq!(cart.owner, "ana");
        assert!(cart.gift);
        assert!(cart.note.is_none());
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_every_wrong_type_is_reported() {
        let body = json!({"owner": 5, "gift": "yes", "note": 3, "lines": []});
        let (_, errors) = decode::<Cart>(&body).unwrap();

        assert_eq!(codes(&errors, "owner"), ["type"]);
        assert_eq!(codes(&errors, "gift"), ["type"]);
        assert_eq!(codes(&errors, "note"), ["type"]);
        assert!(!errors.errors().contains_key("lines"));
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let body = json!({"gift": false});
        let (cart, errors) = decode::<Cart>(&body).unwrap();

        assert_eq!(codes(&errors, "owner"), ["required"]);
        assert_eq!(codes(&errors, "lines"), ["required"]);
        assert!(!cart.gift);
    }

    #[test]
    fn test_nested_errors_keep_their_path() {
        let body = json!({
            "owner": "ana",
            "lines": [{"sku": "A", "quantity": 1}, {"quantity": -3}]
        });
        let (_, errors) = decode::<Cart>(&body).unwrap();

        let field_errors = errors.field_errors();
        let lines = field_errors["lines"];
        assert_eq!(lines.len(), 2);
        let paths: Vec<_> = lines.iter().map(|error| &error.params["path"]).collect();
        assert!(paths.contains(&&json!("lines[1].sku")));
        assert!(paths.contains(&&json!("lines[1].quantity")));
    }

    #[test]
    fn test_non_object_body_fails() {
        let errors = decode::<Cart>(&json!([1, 2])).unwrap_err();
        assert_eq!(codes(&errors, "body"), ["type"]);
    }
}
