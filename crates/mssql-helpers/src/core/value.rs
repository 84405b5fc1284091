//! SQL value types bound to generated statement parameters.
//!
//! Values borrow string and byte data from the record they were read from,
//! so building a statement's parameter list does not copy field contents.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Type hint for NULL values.
///
/// Drivers bind a typed NULL (e.g. `nvarchar` vs `int`), so a null read
/// from a record keeps the type of the field it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlNullType {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Uuid,
    Decimal,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
}

/// SQL value enum for type-safe parameter binding.
///
/// Uses `Cow` for string and byte data so values can borrow from records.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use mssql_helpers::core::SqlValue;
///
/// let borrowed: SqlValue<'_> = SqlValue::Text(Cow::Borrowed("hello"));
/// let owned: SqlValue<'static> = borrowed.into_owned();
/// assert!(!owned.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// NULL with type hint.
    Null(SqlNullType),

    /// Boolean value (bit).
    Bool(bool),

    /// 16-bit signed integer (smallint).
    I16(i16),

    /// 32-bit signed integer (int).
    I32(i32),

    /// 64-bit signed integer (bigint).
    I64(i64),

    /// 32-bit floating point (real).
    F32(f32),

    /// 64-bit floating point (float).
    F64(f64),

    /// Text/string data.
    Text(Cow<'a, str>),

    /// Binary data.
    Bytes(Cow<'a, [u8]>),

    /// UUID/GUID value (uniqueidentifier).
    Uuid(Uuid),

    /// Decimal value with arbitrary precision.
    Decimal(Decimal),

    /// Timestamp without timezone (datetime2).
    DateTime(NaiveDateTime),

    /// Timestamp with timezone offset (datetimeoffset).
    DateTimeOffset(DateTime<FixedOffset>),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null(t) => SqlValue::Null(t),
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::I16(v) => SqlValue::I16(v),
            SqlValue::I32(v) => SqlValue::I32(v),
            SqlValue::I64(v) => SqlValue::I64(v),
            SqlValue::F32(v) => SqlValue::F32(v),
            SqlValue::F64(v) => SqlValue::F64(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
            SqlValue::Bytes(v) => SqlValue::Bytes(Cow::Owned(v.into_owned())),
            SqlValue::Uuid(v) => SqlValue::Uuid(v),
            SqlValue::Decimal(v) => SqlValue::Decimal(v),
            SqlValue::DateTime(v) => SqlValue::DateTime(v),
            SqlValue::DateTimeOffset(v) => SqlValue::DateTimeOffset(v),
            SqlValue::Date(v) => SqlValue::Date(v),
            SqlValue::Time(v) => SqlValue::Time(v),
        }
    }

    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Get the SqlNullType for this value.
    #[must_use]
    pub fn null_type(&self) -> SqlNullType {
        match self {
            SqlValue::Null(t) => *t,
            SqlValue::Bool(_) => SqlNullType::Bool,
            SqlValue::I16(_) => SqlNullType::I16,
            SqlValue::I32(_) => SqlNullType::I32,
            SqlValue::I64(_) => SqlNullType::I64,
            SqlValue::F32(_) => SqlNullType::F32,
            SqlValue::F64(_) => SqlNullType::F64,
            SqlValue::Text(_) => SqlNullType::String,
            SqlValue::Bytes(_) => SqlNullType::Bytes,
            SqlValue::Uuid(_) => SqlNullType::Uuid,
            SqlValue::Decimal(_) => SqlNullType::Decimal,
            SqlValue::DateTime(_) => SqlNullType::DateTime,
            SqlValue::DateTimeOffset(_) => SqlNullType::DateTimeOffset,
            SqlValue::Date(_) => SqlNullType::Date,
            SqlValue::Time(_) => SqlNullType::Time,
        }
    }
}

/// Borrowing conversion from a record field to a [`SqlValue`].
///
/// Implemented for the scalar types a mapped field may have. `Option<T>`
/// maps `None` to a NULL typed by `T::NULL_TYPE`.
pub trait AsSqlValue {
    /// Type hint used when the field holds no value.
    const NULL_TYPE: SqlNullType;

    fn as_sql_value(&self) -> SqlValue<'_>;
}

macro_rules! copy_as_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsSqlValue for $ty {
                const NULL_TYPE: SqlNullType = SqlNullType::$variant;

                fn as_sql_value(&self) -> SqlValue<'_> {
                    SqlValue::$variant(*self)
                }
            }

            impl From<$ty> for SqlValue<'static> {
                fn from(v: $ty) -> Self {
                    SqlValue::$variant(v)
                }
            }
        )*
    };
}

copy_as_sql_value! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Uuid => Uuid,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
}

impl AsSqlValue for String {
    const NULL_TYPE: SqlNullType = SqlNullType::String;

    fn as_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl AsSqlValue for str {
    const NULL_TYPE: SqlNullType = SqlNullType::String;

    fn as_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self))
    }
}

impl AsSqlValue for Vec<u8> {
    const NULL_TYPE: SqlNullType = SqlNullType::Bytes;

    fn as_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Bytes(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: AsSqlValue> AsSqlValue for Option<T> {
    const NULL_TYPE: SqlNullType = T::NULL_TYPE;

    fn as_sql_value(&self) -> SqlValue<'_> {
        match self {
            Some(v) => v.as_sql_value(),
            None => SqlValue::Null(T::NULL_TYPE),
        }
    }
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue<'static> {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for SqlValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        SqlValue::Bytes(Cow::Borrowed(v))
    }
}

impl<'a, T> From<Option<T>> for SqlValue<'a>
where
    T: AsSqlValue + Into<SqlValue<'a>>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null(T::NULL_TYPE),
        }
    }
}
