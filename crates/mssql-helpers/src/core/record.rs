//! Record field access.
//!
//! A [`Record`] lists its declared field names and resolves a field name to
//! a [`FieldReader`]. Mappings are validated against [`Record::field_names`];
//! the generator resolves every mapped field to a reader once per call, so
//! reading a row can not fail.

use super::value::SqlValue;

/// Reads one field of `T` as a borrowed [`SqlValue`].
pub type FieldReader<T> = for<'r> fn(&'r T) -> SqlValue<'r>;

/// A type whose fields can be mapped to table columns.
///
/// Usually implemented with [`impl_record!`](crate::impl_record):
///
/// ```rust
/// use mssql_helpers::impl_record;
///
/// struct Person {
///     first_name: String,
///     age: Option<i32>,
/// }
///
/// impl_record!(Person { first_name, age });
///
/// use mssql_helpers::Record;
/// assert_eq!(Person::field_names(), &["first_name", "age"]);
/// ```
pub trait Record {
    /// Declared field names, in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Reader for `field`, or `None` for names that are not fields.
    fn field_reader(field: &str) -> Option<FieldReader<Self>>;

    /// Read a field by name. Returns `None` for names that are not fields.
    fn field_value(&self, field: &str) -> Option<SqlValue<'_>> {
        Self::field_reader(field).map(|read| read(self))
    }

    /// Check whether `field` is a declared field.
    fn has_field(field: &str) -> bool {
        Self::field_names().contains(&field)
    }
}

/// Implement [`Record`] for a struct from its field list.
///
/// Every listed field's type must implement
/// [`AsSqlValue`](crate::core::AsSqlValue). Fields left out of the list are
/// invisible to mappings.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::core::Record for $ty {
            fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),+]
            }

            fn field_reader(field: &str) -> Option<$crate::core::FieldReader<Self>> {
                match field {
                    $(
                        stringify!($field) => {
                            fn read(record: &$ty) -> $crate::core::SqlValue<'_> {
                                $crate::core::AsSqlValue::as_sql_value(&record.$field)
                            }
                            Some(read as $crate::core::FieldReader<$ty>)
                        }
                    )+
                    _ => None,
                }
            }
        }
    };
}
