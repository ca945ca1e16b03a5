mod num;
mod value_chrono;
mod value_uuid;

use crate::{Error, Result};

use chrono::{DateTime, Utc};

/// A dynamically typed column value handed over by a row source.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 64-bit floating point number
    F64(f64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// A UUID
    Uuid(uuid::Uuid),

    /// A point in time, in UTC
    Timestamp(DateTime<Utc>),

    /// A list of values
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Value {
        Value::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Name of the variant, used in conversion error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::U64(_) => "U64",
            Value::F64(_) => "F64",
            Value::Null => "Null",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Uuid(_) => "Uuid",
            Value::Timestamp(_) => "Timestamp",
            Value::List(_) => "List",
        }
    }

    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Value {
        Value::Bool(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Value {
        Value::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Value {
        Value::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Value {
        Value::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Value {
        Value::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Value {
        Value::Bytes(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Value {
        Value::List(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Value {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<bool> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(&value, "bool")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<f64> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            Value::String(ref s) => s
                .parse::<f64>()
                .map_err(|_| Error::type_conversion(&value, "f64")),
            _ => Err(Error::type_conversion(&value, "f64")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<String> {
        match value {
            Value::String(v) => Ok(v),
            Value::Bytes(v) => {
                String::from_utf8(v).map_err(|e| Error::from(anyhow::Error::from(e)))
            }
            _ => Err(Error::type_conversion(&value, "String")),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Vec<u8>> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            _ => Err(Error::type_conversion(&value, "Vec<u8>")),
        }
    }
}
