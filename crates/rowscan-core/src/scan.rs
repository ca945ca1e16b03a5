use crate::{Result, Value};

use chrono::{DateTime, NaiveDateTime, Utc};

/// A destination a row source can write a single column value into.
///
/// Row sources never see the destination's concrete type: they hand every
/// column over as a [`Value`] and the destination converts it.
pub trait Scan {
    fn scan(&mut self, value: Value) -> Result<()>;
}

macro_rules! impl_scan {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl Scan for $ty {
                fn scan(&mut self, value: Value) -> Result<()> {
                    *self = <$ty>::try_from(value)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_scan! {
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f64,
    String,
    Vec<u8>,
    uuid::Uuid,
    DateTime<Utc>,
    NaiveDateTime,
}

impl Scan for Value {
    fn scan(&mut self, value: Value) -> Result<()> {
        *self = value;
        Ok(())
    }
}

impl<T: Scan + Default> Scan for Option<T> {
    fn scan(&mut self, value: Value) -> Result<()> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }

        self.get_or_insert_with(T::default).scan(value)
    }
}

/// Accepts and drops any value. Bound to columns nobody asked for when
/// unknown columns are allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Scan for Discard {
    fn scan(&mut self, _value: Value) -> Result<()> {
        Ok(())
    }
}
