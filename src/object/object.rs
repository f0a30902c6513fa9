use std::fmt::Display;

use crate::errors::errors::ErrorImpl;

/// A runtime value. The variant is the value's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Null,
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Double(_) => "Double",
            Object::String(_) => "String",
            Object::Null => "Null",
        }
    }

    /// Short description used in cast errors, e.g. `"abc"` or `Null`.
    fn describe(&self) -> String {
        match self {
            Object::String(value) => format!("{:?}", value),
            Object::Null => String::from("Null"),
            other => other.to_string(),
        }
    }

    fn cast_error(&self, to: &str) -> ErrorImpl {
        ErrorImpl::CastError {
            value: self.describe(),
            to: to.to_string(),
        }
    }

    /// Truthiness of a value.
    ///
    /// `true`/`True` and `false`/`False` are recognised by name; any other
    /// string must hold an integer and is true when it is at least 1.
    /// Numbers are true when non-zero.
    pub fn cast_boolean(&self) -> Result<bool, ErrorImpl> {
        match self {
            Object::Boolean(value) => Ok(*value),
            Object::Integer(value) => Ok(*value != 0),
            Object::Double(value) => Ok(*value != 0.0),
            Object::String(value) => match value.as_str() {
                "true" | "True" => Ok(true),
                "false" | "False" => Ok(false),
                other => other
                    .trim()
                    .parse::<i64>()
                    .map(|number| number >= 1)
                    .map_err(|_| self.cast_error("Boolean")),
            },
            Object::Null => Err(self.cast_error("Boolean")),
        }
    }

    /// Doubles truncate toward zero.
    pub fn cast_integer(&self) -> Result<i64, ErrorImpl> {
        match self {
            Object::Boolean(value) => Ok(*value as i64),
            Object::Integer(value) => Ok(*value),
            Object::Double(value) => Ok(*value as i64),
            Object::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| self.cast_error("Integer")),
            Object::Null => Err(self.cast_error("Integer")),
        }
    }

    pub fn cast_double(&self) -> Result<f64, ErrorImpl> {
        match self {
            Object::Boolean(value) => Ok(if *value { 1.0 } else { 0.0 }),
            Object::Integer(value) => Ok(*value as f64),
            Object::Double(value) => Ok(*value),
            Object::String(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| self.cast_error("Double")),
            Object::Null => Err(self.cast_error("Double")),
        }
    }

    /// Canonical text of a value; never fails.
    pub fn cast_string(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Integer(value) => write!(f, "{}", value),
            // Debug formatting keeps the `.0` of integral doubles
            Object::Double(value) => write!(f, "{:?}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "NULL"),
        }
    }
}
