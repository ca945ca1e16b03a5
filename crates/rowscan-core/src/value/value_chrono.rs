use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Result, Value};

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Value {
        Value::Timestamp(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Value {
        Value::Timestamp(value.and_utc())
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<DateTime<Utc>> {
        match value {
            Value::Timestamp(value) => Ok(value),
            Value::String(ref s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| Error::type_conversion(&value, "DateTime<Utc>")),
            _ => Err(Error::type_conversion(&value, "DateTime<Utc>")),
        }
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: Value) -> Result<NaiveDateTime> {
        DateTime::<Utc>::try_from(value).map(|ts| ts.naive_utc())
    }
}
