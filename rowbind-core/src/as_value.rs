use crate::{Error, Result, Value, truncate_long};
use anyhow::Context;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::any;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// This is the type-directed conversion behind the scan contract: a cursor
/// produces a [`Value`] and `try_from_value` turns it into the destination type.
///
/// # Conversion contract
/// - The canonical variant of the type is always accepted (e.g. `Value::Int32`
///   for `i32`).
/// - Other integer widths are accepted after a range check.
/// - Textual values (`Varchar`, `Unknown`) are parsed through [`AsValue::parse`].
/// - A NULL is never accepted: NULL handling belongs to the scan layer (see
///   [`NullSafe`](crate::NullSafe)), conversions only deal with concrete values.
///
/// # Examples
/// ```rust
/// use rowbind_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The typed NULL of this type.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a concrete [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
    /// Parse a full textual representation into `Self`.
    fn parse(input: &str) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            truncate_long!(input),
            any::type_name::<Self>()
        )))
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl<T: AsValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

pub(crate) fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {} value {} to {}",
        value.type_name(),
        value,
        any::type_name::<T>(),
    ))
}

macro_rules! parse_from_str {
    ($input:expr) => {{
        let input: &str = $input;
        input.trim().parse::<Self>().with_context(|| {
            format!(
                "Cannot parse `{}` as {}",
                truncate_long!(input),
                any::type_name::<Self>()
            )
        })
    }};
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self as _))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                macro_rules! narrow {
                    ($v:expr, $from:ty) => {
                        <$source>::try_from($v).map_err(|_| {
                            Error::msg(format!(
                                "Value {}: {} is out of range for {}",
                                $v,
                                stringify!($from),
                                any::type_name::<Self>(),
                            ))
                        })
                    };
                }
                match value {
                    Value::Int8(Some(v)) => narrow!(v, i8),
                    Value::Int16(Some(v)) => narrow!(v, i16),
                    Value::Int32(Some(v)) => narrow!(v, i32),
                    Value::Int64(Some(v)) => narrow!(v, i64),
                    Value::Int128(Some(v)) => narrow!(v, i128),
                    Value::UInt8(Some(v)) => narrow!(v, u8),
                    Value::UInt16(Some(v)) => narrow!(v, u16),
                    Value::UInt32(Some(v)) => narrow!(v, u32),
                    Value::UInt64(Some(v)) => narrow!(v, u64),
                    Value::UInt128(Some(v)) => narrow!(v, u128),
                    Value::Decimal(Some(v)) => {
                        let error = Error::msg(format!(
                            "Value {v}: Decimal does not fit into {}",
                            any::type_name::<Self>()
                        ));
                        if !v.is_integer() {
                            return Err(error.context("The value is not a integer"));
                        }
                        let v = v.to_i128().ok_or(error)?;
                        narrow!(v, Decimal)
                    }
                    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
            fn parse(input: &str) -> Result<Self> {
                parse_from_str!(input)
            }
        }
    };
}
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(i128, Value::Int128);
impl_as_value!(isize, Value::Int64);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);
impl_as_value!(u128, Value::UInt128);
impl_as_value!(usize, Value::UInt64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path, $to_float:ident) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Float32(Some(v)) => Ok(v as _),
                    Value::Float64(Some(v)) => Ok(v as _),
                    Value::Int8(Some(v)) => Ok(v as _),
                    Value::Int16(Some(v)) => Ok(v as _),
                    Value::Int32(Some(v)) => Ok(v as _),
                    Value::Int64(Some(v)) => Ok(v as _),
                    Value::Int128(Some(v)) => Ok(v as _),
                    Value::UInt8(Some(v)) => Ok(v as _),
                    Value::UInt16(Some(v)) => Ok(v as _),
                    Value::UInt32(Some(v)) => Ok(v as _),
                    Value::UInt64(Some(v)) => Ok(v as _),
                    Value::UInt128(Some(v)) => Ok(v as _),
                    Value::Decimal(Some(v)) => v.$to_float().ok_or_else(|| {
                        Error::msg(format!(
                            "Value {v}: Decimal does not fit into {}",
                            any::type_name::<Self>()
                        ))
                    }),
                    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
            fn parse(input: &str) -> Result<Self> {
                parse_from_str!(input)
            }
        }
    };
}
impl_as_value!(f32, Value::Float32, to_f32);
impl_as_value!(f64, Value::Float64, to_f64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(v != 0),
            Value::Int16(Some(v)) => Ok(v != 0),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::Int128(Some(v)) => Ok(v != 0),
            Value::UInt8(Some(v)) => Ok(v != 0),
            Value::UInt16(Some(v)) => Ok(v != 0),
            Value::UInt32(Some(v)) => Ok(v != 0),
            Value::UInt64(Some(v)) => Ok(v != 0),
            Value::UInt128(Some(v)) => Ok(v != 0),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            x if x.eq_ignore_ascii_case("true") || x.eq_ignore_ascii_case("t") || x == "1" => {
                Ok(true)
            }
            x if x.eq_ignore_ascii_case("false") || x.eq_ignore_ascii_case("f") || x == "0" => {
                Ok(false)
            }
            _ => Err(Error::msg(format!(
                "Cannot parse boolean from `{}`",
                truncate_long!(input)
            ))),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(v.into()),
            Value::Int16(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::UInt8(Some(v)) => Ok(v.into()),
            Value::UInt16(Some(v)) => Ok(v.into()),
            Value::UInt32(Some(v)) => Ok(v.into()),
            Value::UInt64(Some(v)) => Ok(v.into()),
            Value::Int128(Some(v)) => Decimal::from_i128(v)
                .ok_or_else(|| Error::msg(format!("Value {v}: i128 does not fit into Decimal"))),
            Value::UInt128(Some(v)) => Decimal::from_u128(v)
                .ok_or_else(|| Error::msg(format!("Value {v}: u128 does not fit into Decimal"))),
            Value::Float32(Some(v)) => Decimal::from_f32(v)
                .ok_or_else(|| Error::msg(format!("Value {v}: f32 does not fit into Decimal"))),
            Value::Float64(Some(v)) => Decimal::from_f64(v)
                .ok_or_else(|| Error::msg(format!("Value {v}: f64 does not fit into Decimal"))),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        parse_from_str!(input)
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) | Value::Unknown(Some(v)) => Ok(v),
            Value::Blob(Some(v)) => String::from_utf8(v.into_vec())
                .context("Cannot convert a BLOB value that is not valid UTF-8 to String"),
            Value::Boolean(Some(v)) => Ok(v.to_string()),
            Value::Int8(Some(v)) => Ok(v.to_string()),
            Value::Int16(Some(v)) => Ok(v.to_string()),
            Value::Int32(Some(v)) => Ok(v.to_string()),
            Value::Int64(Some(v)) => Ok(v.to_string()),
            Value::Int128(Some(v)) => Ok(v.to_string()),
            Value::UInt8(Some(v)) => Ok(v.to_string()),
            Value::UInt16(Some(v)) => Ok(v.to_string()),
            Value::UInt32(Some(v)) => Ok(v.to_string()),
            Value::UInt64(Some(v)) => Ok(v.to_string()),
            Value::UInt128(Some(v)) => Ok(v.to_string()),
            Value::Float32(Some(v)) => Ok(v.to_string()),
            Value::Float64(Some(v)) => Ok(v.to_string()),
            Value::Decimal(Some(v)) => Ok(v.to_string()),
            Value::Uuid(Some(v)) => Ok(v.to_string()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        Ok(input.to_owned())
    }
}

macro_rules! impl_as_value {
    ($source:ty) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                Value::Blob(None)
            }
            fn as_value(self) -> Value {
                Value::Blob(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Blob(Some(v)) => Ok(v.into()),
                    Value::Varchar(Some(v)) | Value::Unknown(Some(v)) => {
                        Ok(v.into_bytes().into())
                    }
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(Vec<u8>);
impl_as_value!(Box<[u8]>);

impl AsValue for Uuid {
    fn as_empty_value() -> Value {
        Value::Uuid(None)
    }
    fn as_value(self) -> Value {
        Value::Uuid(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(Some(v)) => Ok(v),
            Value::Blob(Some(ref v)) => Uuid::from_slice(v).context("Cannot convert BLOB to Uuid"),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        Uuid::parse_str(input.trim())
            .with_context(|| format!("Cannot parse `{}` as Uuid", truncate_long!(input)))
    }
}

macro_rules! parse_time {
    ($input:expr, $parse:path, $($format:expr),+ $(,)?) => {{
        let input = $input.trim();
        $(
            if let Ok(result) = $parse(input, $format) {
                return Ok(result);
            }
        )+
        Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            truncate_long!(input),
            any::type_name::<Self>()
        )))
    }};
}

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        parse_time!(input, Date::parse, format_description!("[year]-[month]-[day]"))
    }
}

impl AsValue for Time {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(Some(v)) => Ok(v),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        parse_time!(
            input,
            Time::parse,
            format_description!("[hour]:[minute]:[second].[subsecond]"),
            format_description!("[hour]:[minute]:[second]"),
            format_description!("[hour]:[minute]"),
        )
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Date(Some(v)) => Ok(v.midnight()),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        parse_time!(
            input,
            PrimitiveDateTime::parse,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    }
}

impl AsValue for OffsetDateTime {
    fn as_empty_value() -> Value {
        Value::TimestampWithTimezone(None)
    }
    fn as_value(self) -> Value {
        Value::TimestampWithTimezone(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::TimestampWithTimezone(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
            Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        parse_time!(
            input,
            OffsetDateTime::parse,
            &Rfc3339,
            format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
            ),
            format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
            ),
            format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]"
            ),
        )
    }
}
