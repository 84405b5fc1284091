//! # mssql-helpers
//!
//! Batched, parameterized INSERT generation for SQL Server.
//!
//! This library turns a slice of records and a field-to-column mapping into
//! the smallest number of INSERT statements that respect SQL Server's
//! per-statement limits:
//!
//! - **Mappings** built fluently and validated against the record's fields
//! - **Batch sizing** under the 2100 parameter and 1000 row ceilings
//! - **Identity insert** wrapping with SET IDENTITY_INSERT ON/OFF
//! - **Locale-aware literals** for scripts that embed values directly
//! - **YAML configuration** for limits, locale and named mappings
//!
//! ## Example
//!
//! ```rust
//! use mssql_helpers::{field, generate_bulk_inserts, impl_record, FieldMapping};
//!
//! struct Person {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! impl_record!(Person { first_name, last_name });
//!
//! let mapping = FieldMapping::<Person>::builder()
//!     .table_name("People")
//!     .add_accessor(field!(Person, first_name), Some("FirstName"))
//!     .add_field("last_name")
//!     .build();
//!
//! let people = vec![
//!     Person { first_name: "Ada".into(), last_name: "Lovelace".into() },
//!     Person { first_name: "Alan".into(), last_name: "Turing".into() },
//! ];
//!
//! let statements: Vec<_> = generate_bulk_inserts(&mapping, &people, false)?.collect();
//! assert_eq!(statements.len(), 1);
//! assert_eq!(
//!     statements[0].sql,
//!     "SET NOCOUNT ON; INSERT INTO [People] ([FirstName], [last_name]) VALUES (@p0, @p1), (@p2, @p3);"
//! );
//! assert_eq!(statements[0].parameters.len(), 4);
//! # Ok::<(), mssql_helpers::HelperError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod literal;
pub mod mapping;

// Re-exports for convenient access
pub use config::{FieldConfig, GeneratorConfig, MappingConfig};
pub use crate::core::{AsSqlValue, FieldReader, Record, SqlNullType, SqlValue};
pub use error::{HelperError, Result};
pub use generator::{
    generate_bulk_inserts, generate_bulk_inserts_dynamic, BatchLimits, BatchPlan, BulkInserts,
    DynamicBulkInserts, DynamicStatement, Parameter, ParameterBag, QueryGenerator, Statement,
};
pub use literal::{to_sql_literal, Locale};
pub use mapping::{FieldAccessor, FieldMapping, MappingBuilder, MappingValidation, MappingViolation};
