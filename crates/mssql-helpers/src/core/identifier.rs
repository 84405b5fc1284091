//! Identifier validation and quoting for SQL Server.
//!
//! Table and column names cannot be passed as parameters, only data values
//! can. Generated statements therefore embed identifiers directly, after
//! validating them and wrapping them in brackets.

use thiserror::Error;

/// Maximum identifier length for SQL Server (sysname is nvarchar(128)).
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Reason an identifier was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier can not be null, empty or white-space")]
    Blank,

    #[error("identifier contains a null byte")]
    NullByte,

    #[error("identifier exceeds maximum length of {MAX_IDENTIFIER_LENGTH} characters (got {0})")]
    TooLong(usize),
}

/// Validate an identifier.
///
/// Rejects:
/// - Empty or whitespace-only identifiers
/// - Identifiers containing null bytes
/// - Identifiers longer than [`MAX_IDENTIFIER_LENGTH`] characters
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    if name.trim().is_empty() {
        return Err(IdentifierError::Blank);
    }

    if name.contains('\0') {
        return Err(IdentifierError::NullByte);
    }

    let len = name.chars().count();
    if len > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong(len));
    }

    Ok(())
}

/// Quote a SQL Server identifier using brackets.
///
/// Escapes closing brackets by doubling them and wraps in brackets.
///
/// # Examples
///
/// ```
/// use mssql_helpers::core::identifier::quote_mssql;
///
/// assert_eq!(quote_mssql("users"), "[users]");
/// assert_eq!(quote_mssql("table]name"), "[table]]name]");
/// ```
pub fn quote_mssql(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}
