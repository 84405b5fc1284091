//! Fluent construction of [`FieldMapping`]s.

use std::marker::PhantomData;

use super::{FieldAccessor, FieldMapping};
use crate::error::Result;

/// Builder for [`FieldMapping`].
///
/// Each step consumes the builder and returns it, so a finished mapping can
/// not be changed through a builder reference kept elsewhere. `build()` does
/// not validate; the generator validates every mapping before use.
///
/// ```rust
/// use mssql_helpers::{impl_record, FieldMapping};
///
/// struct Person {
///     first_name: String,
///     last_name: String,
/// }
/// impl_record!(Person { first_name, last_name });
///
/// let mapping = FieldMapping::<Person>::builder()
///     .table_name("People")
///     .add_mapping("first_name", "FirstName")
///     .add_field("last_name")
///     .build();
///
/// assert!(mapping.validate().is_valid());
/// ```
#[derive(Debug)]
pub struct MappingBuilder<T> {
    table_name: Option<String>,
    fields: Vec<(String, String)>,
    _record: PhantomData<fn() -> T>,
}

impl<T> MappingBuilder<T> {
    /// Start an empty mapping with no table name.
    pub fn new() -> Self {
        Self {
            table_name: None,
            fields: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Start an empty mapping for `table_name`.
    pub fn for_table(table_name: impl Into<String>) -> Self {
        Self::new().table_name(table_name)
    }

    /// Set the destination table name, replacing any previous one.
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Map `field` to `column`.
    ///
    /// Mapping a field a second time replaces its column and keeps its
    /// original position.
    pub fn add_mapping(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        let field = field.into();
        let column = column.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = column,
            None => self.fields.push((field, column)),
        }
        self
    }

    /// Map `field` to a column of the same name.
    pub fn add_field(self, field: impl Into<String>) -> Self {
        let field = field.into();
        let column = field.clone();
        self.add_mapping(field, column)
    }

    /// Map the field named by `accessor`. The column defaults to the field name.
    pub fn add_accessor(self, accessor: FieldAccessor<T>, column: Option<&str>) -> Self {
        let field = accessor.into_name();
        let column = column.map_or_else(|| field.clone(), str::to_string);
        self.add_mapping(field, column)
    }

    /// Map the field named by an accessor expression such as `|p| p.first_name`.
    ///
    /// Fails with [`HelperError::InvalidMappingExpression`](crate::HelperError::InvalidMappingExpression)
    /// when the expression is not a direct field reference.
    pub fn add_expression(self, expression: &str, column: Option<&str>) -> Result<Self> {
        let accessor = FieldAccessor::parse(expression)?;
        Ok(self.add_accessor(accessor, column))
    }

    /// Replace every field mapping with `mappings`, in iteration order.
    pub fn set_mappings<I, F, C>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (F, C)>,
        F: Into<String>,
        C: Into<String>,
    {
        self.fields.clear();
        mappings
            .into_iter()
            .fold(self, |builder, (field, column)| builder.add_mapping(field, column))
    }

    /// Finish the mapping. No validation happens here.
    pub fn build(self) -> FieldMapping<T> {
        FieldMapping::from_parts(self.table_name, self.fields)
    }
}

impl<T> Default for MappingBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HelperError;

    #[allow(dead_code)]
    struct Person {
        first_name: String,
        last_name: String,
        date_of_birth: chrono::NaiveDate,
    }

    crate::impl_record!(Person {
        first_name,
        last_name,
        date_of_birth
    });

    fn pairs(mapping: &FieldMapping<Person>) -> Vec<(&str, &str)> {
        mapping
            .fields()
            .iter()
            .map(|(f, c)| (f.as_str(), c.as_str()))
            .collect()
    }

    #[test]
    fn test_builder_keeps_insertion_order() {
        let mapping = MappingBuilder::<Person>::for_table("People")
            .add_mapping("last_name", "LastName")
            .add_field("first_name")
            .add_mapping("date_of_birth", "Birthday")
            .build();

        assert_eq!(mapping.table_name(), Some("People"));
        assert_eq!(
            pairs(&mapping),
            vec![
                ("last_name", "LastName"),
                ("first_name", "first_name"),
                ("date_of_birth", "Birthday"),
            ]
        );
    }

    #[test]
    fn test_table_name_overwrites() {
        let mapping = MappingBuilder::<Person>::for_table("Old")
            .table_name("New")
            .build();
        assert_eq!(mapping.table_name(), Some("New"));
        assert!(MappingBuilder::<Person>::new().build().table_name().is_none());
    }

    #[test]
    fn test_remapping_a_field_keeps_position() {
        let mapping = MappingBuilder::<Person>::new()
            .add_mapping("first_name", "A")
            .add_mapping("last_name", "B")
            .add_mapping("first_name", "C")
            .build();
        assert_eq!(pairs(&mapping), vec![("first_name", "C"), ("last_name", "B")]);
    }

    #[test]
    fn test_set_mappings_replaces_everything() {
        let mapping = MappingBuilder::<Person>::new()
            .add_mapping("first_name", "FirstName")
            .set_mappings([("last_name", "Surname"), ("date_of_birth", "Dob")])
            .build();
        assert_eq!(
            pairs(&mapping),
            vec![("last_name", "Surname"), ("date_of_birth", "Dob")]
        );

        let empty = MappingBuilder::<Person>::new()
            .add_field("first_name")
            .set_mappings(Vec::<(String, String)>::new())
            .build();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_accessors() {
        let mapping = MappingBuilder::<Person>::for_table("People")
            .add_accessor(crate::field!(Person, first_name), None)
            .add_accessor(crate::field!(Person, date_of_birth), Some("Birthday"))
            .add_expression("|p| p.last_name", Some("Surname"))
            .unwrap()
            .build();
        assert_eq!(
            pairs(&mapping),
            vec![
                ("first_name", "first_name"),
                ("date_of_birth", "Birthday"),
                ("last_name", "Surname"),
            ]
        );
        assert!(mapping.validate().is_valid());
    }

    #[test]
    fn test_add_expression_rejects_computed_expression() {
        let result = MappingBuilder::<Person>::new().add_expression("|p| p.first_name.len()", None);
        assert!(matches!(
            result,
            Err(HelperError::InvalidMappingExpression { .. })
        ));
    }

    #[test]
    fn test_build_does_not_validate() {
        let mapping = MappingBuilder::<Person>::new().add_field("nope").build();
        assert_eq!(mapping.len(), 1);
        assert!(!mapping.validate().is_valid());
    }
}
