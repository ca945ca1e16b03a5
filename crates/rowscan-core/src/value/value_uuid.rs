use crate::{Error, Result, Value};

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Value {
        Value::Uuid(value)
    }
}

impl TryFrom<Value> for uuid::Uuid {
    type Error = Error;

    fn try_from(value: Value) -> Result<uuid::Uuid> {
        match value {
            Value::Uuid(value) => Ok(value),
            Value::String(s) => Ok(s.parse()?),
            Value::Bytes(bytes) => Ok(uuid::Uuid::from_slice(&bytes)?),
            _ => Err(Error::type_conversion(&value, "Uuid")),
        }
    }
}
