use crate::{Error, Result, Value};

macro_rules! impl_num {
    ( $( $variant:ident($ty:ty) )* ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Value {
                    Value::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Value {
                    Value::$variant(*value)
                }
            }
        )*
    };
}

impl_num! {
    I32(i32)
    I64(i64)
    U64(u64)
}

// Integer destinations accept any integer variant holding an in-range value,
// and strings that parse as the destination type.
macro_rules! impl_try_from_int {
    ( $( $ty:ty => $name:literal ),* $(,)? ) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<$ty> {
                    let converted = match &value {
                        Value::I32(v) => <$ty>::try_from(*v).ok(),
                        Value::I64(v) => <$ty>::try_from(*v).ok(),
                        Value::U64(v) => <$ty>::try_from(*v).ok(),
                        Value::String(s) => s.parse::<$ty>().ok(),
                        _ => None,
                    };

                    converted.ok_or_else(|| Error::type_conversion(&value, $name))
                }
            }
        )*
    };
}

impl_try_from_int! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
}

impl From<i8> for Value {
    fn from(value: i8) -> Value {
        Value::I32(value.into())
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Value {
        Value::I32(value.into())
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Value {
        Value::I32(value.into())
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Value {
        Value::I32(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Value {
        Value::I64(value.into())
    }
}
