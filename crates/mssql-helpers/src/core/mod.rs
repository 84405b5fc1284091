//! Core types shared by mappings and the query generator.
//!
//! - [`value`]: SQL value representation bound to statement parameters
//! - [`record`]: Field listing and field access for mapped record types
//! - [`identifier`]: Identifier validation and bracket quoting

pub mod identifier;
pub mod record;
pub mod value;

pub use identifier::{quote_mssql, validate_identifier, IdentifierError};
pub use record::{FieldReader, Record};
pub use value::{AsSqlValue, SqlNullType, SqlValue};
