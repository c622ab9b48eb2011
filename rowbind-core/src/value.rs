use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// A single column value as produced by a cursor or bound as a query argument.
///
/// Every typed variant carries an `Option`: `None` is a NULL whose type the
/// driver knows. `Null` is a NULL of unknown type. `Unknown` is a textual value
/// the driver did not type, it gets parsed by the destination.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    Unknown(Option<String>),
}

impl Value {
    /// True for `Null` and for every typed NULL.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Int128(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::UInt128(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
            Value::Unknown(v) => v.is_none(),
        }
    }

    /// Name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "BOOLEAN",
            Value::Int8(..) => "TINYINT",
            Value::Int16(..) => "SMALLINT",
            Value::Int32(..) => "INTEGER",
            Value::Int64(..) => "BIGINT",
            Value::Int128(..) => "HUGEINT",
            Value::UInt8(..) => "UTINYINT",
            Value::UInt16(..) => "USMALLINT",
            Value::UInt32(..) => "UINTEGER",
            Value::UInt64(..) => "UBIGINT",
            Value::UInt128(..) => "UHUGEINT",
            Value::Float32(..) => "FLOAT",
            Value::Float64(..) => "DOUBLE",
            Value::Decimal(..) => "DECIMAL",
            Value::Varchar(..) => "VARCHAR",
            Value::Blob(..) => "BLOB",
            Value::Date(..) => "DATE",
            Value::Time(..) => "TIME",
            Value::Timestamp(..) => "TIMESTAMP",
            Value::TimestampWithTimezone(..) => "TIMESTAMP WITH TIME ZONE",
            Value::Uuid(..) => "UUID",
            Value::Unknown(..) => "UNKNOWN",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! display {
            ($v:expr) => {
                match $v {
                    Some(v) => write!(f, "{v}"),
                    None => f.write_str("NULL"),
                }
            };
        }
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => display!(v),
            Value::Int8(v) => display!(v),
            Value::Int16(v) => display!(v),
            Value::Int32(v) => display!(v),
            Value::Int64(v) => display!(v),
            Value::Int128(v) => display!(v),
            Value::UInt8(v) => display!(v),
            Value::UInt16(v) => display!(v),
            Value::UInt32(v) => display!(v),
            Value::UInt64(v) => display!(v),
            Value::UInt128(v) => display!(v),
            Value::Float32(v) => display!(v),
            Value::Float64(v) => display!(v),
            Value::Decimal(v) => display!(v),
            Value::Varchar(Some(v)) | Value::Unknown(Some(v)) => write!(f, "'{v}'"),
            Value::Varchar(None) | Value::Unknown(None) => f.write_str("NULL"),
            Value::Blob(Some(v)) => {
                f.write_str("x'")?;
                for b in v.iter() {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
            Value::Blob(None) => f.write_str("NULL"),
            Value::Date(v) => display!(v),
            Value::Time(v) => display!(v),
            Value::Timestamp(v) => display!(v),
            Value::TimestampWithTimezone(v) => display!(v),
            Value::Uuid(v) => display!(v),
        }
    }
}
