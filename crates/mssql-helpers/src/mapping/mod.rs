//! Field-to-column mappings for a destination table.
//!
//! A [`FieldMapping`] is built once with a [`MappingBuilder`] and then reused
//! read-only across any number of generation calls. Building never fails on
//! content; [`FieldMapping::validate`] reports every problem at once and the
//! query generator refuses to run on an invalid mapping.

mod accessor;
mod builder;

pub use accessor::FieldAccessor;
pub use builder::MappingBuilder;

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

use crate::core::identifier::{validate_identifier, IdentifierError};
use crate::core::Record;

/// Ordered association of record fields to table columns.
pub struct FieldMapping<T> {
    table_name: Option<String>,
    fields: Vec<(String, String)>,
    _record: PhantomData<fn() -> T>,
}

impl<T> FieldMapping<T> {
    pub(crate) fn from_parts(table_name: Option<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            table_name,
            fields,
            _record: PhantomData,
        }
    }

    /// Destination table name, as given (unquoted).
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Field-to-column pairs in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Column mapped to `field`, if any.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, c)| c.as_str())
    }

    /// Number of mapped fields (parameters per row).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, c)| c.as_str())
    }

    pub(crate) fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(f, _)| f.as_str())
    }
}

impl<T: Record> FieldMapping<T> {
    /// Start building a mapping for `T`.
    pub fn builder() -> MappingBuilder<T> {
        MappingBuilder::new()
    }

    /// Validate the mapping against `T`'s declared fields.
    ///
    /// Every check runs; the result lists all violations found.
    pub fn validate(&self) -> MappingValidation {
        let mut violations = Vec::new();

        match self.table_name.as_deref() {
            None => violations.push(MappingViolation::BlankTableName),
            Some(name) if name.trim().is_empty() => {
                violations.push(MappingViolation::BlankTableName)
            }
            Some(name) => {
                if let Err(reason) = validate_identifier(name) {
                    violations.push(MappingViolation::InvalidIdentifier {
                        name: name.to_string(),
                        reason,
                    });
                }
            }
        }

        if self.fields.is_empty() {
            violations.push(MappingViolation::EmptyMapping);
        }

        let mut unknown: Vec<String> = Vec::new();
        for field in self.field_keys() {
            if !T::has_field(field) && !unknown.iter().any(|u| u == field) {
                unknown.push(field.to_string());
            }
        }
        if !unknown.is_empty() {
            violations.push(MappingViolation::UnknownFields {
                record: short_type_name::<T>(),
                fields: unknown,
            });
        }

        for column in self.columns() {
            if let Err(reason) = validate_identifier(column) {
                violations.push(MappingViolation::InvalidIdentifier {
                    name: column.to_string(),
                    reason,
                });
            }
        }

        MappingValidation { violations }
    }
}

impl<T> Clone for FieldMapping<T> {
    fn clone(&self) -> Self {
        Self::from_parts(self.table_name.clone(), self.fields.clone())
    }
}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("record", &short_type_name::<T>())
            .field("table_name", &self.table_name)
            .field("fields", &self.fields)
            .finish()
    }
}

pub(crate) fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// A single mapping validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingViolation {
    #[error("[FieldMapping.table_name] can not be null, empty or white-space.")]
    BlankTableName,

    #[error("[FieldMapping.fields] can not be null or empty.")]
    EmptyMapping,

    #[error(
        "Fields [{}] in [FieldMapping.fields] not found in the source record [{record}].",
        .fields.join(", ")
    )]
    UnknownFields { record: String, fields: Vec<String> },

    #[error("Identifier {name:?} is invalid: {reason}.")]
    InvalidIdentifier {
        name: String,
        reason: IdentifierError,
    },
}

/// Outcome of [`FieldMapping::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingValidation {
    violations: Vec<MappingViolation>,
}

impl MappingValidation {
    pub(crate) fn from_violations(violations: Vec<MappingViolation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[MappingViolation] {
        &self.violations
    }

    /// Human-readable messages, one per violation, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for MappingValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}
