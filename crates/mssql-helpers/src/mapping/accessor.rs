//! Typed field accessors.
//!
//! An accessor names one field of a record type directly. The [`field!`]
//! macro checks the field at compile time; [`FieldAccessor::parse`]
//! resolves a textual accessor expression such as `|p| p.first_name`.
//!
//! [`field!`]: crate::field

use std::fmt;
use std::marker::PhantomData;

use crate::error::{HelperError, Result};

/// Direct reference to a field of `T`.
pub struct FieldAccessor<T> {
    name: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> FieldAccessor<T> {
    #[doc(hidden)]
    pub fn __checked(name: &'static str) -> Self {
        Self {
            name: name.to_string(),
            _record: PhantomData,
        }
    }

    /// Resolve an accessor expression to the field it reads.
    ///
    /// Accepted forms: `name`, `r.name`, `|r| r.name` and `r => r.name`.
    /// Anything that is not a direct field reference (method calls,
    /// arithmetic, nested member access, literals) is rejected with
    /// [`HelperError::InvalidMappingExpression`].
    pub fn parse(expression: &str) -> Result<Self> {
        let name = resolve_field(expression)?;
        Ok(Self {
            name: name.to_string(),
            _record: PhantomData,
        })
    }

    /// Name of the referenced field.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldAccessor").field(&self.name).finish()
    }
}

/// Build a compile-time checked [`FieldAccessor`].
///
/// ```rust
/// use mssql_helpers::{field, impl_record, FieldMapping};
///
/// struct Person {
///     first_name: String,
/// }
/// impl_record!(Person { first_name });
///
/// let mapping = FieldMapping::<Person>::builder()
///     .table_name("People")
///     .add_accessor(field!(Person, first_name), Some("FirstName"))
///     .build();
/// assert_eq!(mapping.column_for("first_name"), Some("FirstName"));
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $field:ident) => {{
        let _ = |record: &$ty| {
            let _ = &record.$field;
        };
        $crate::mapping::FieldAccessor::<$ty>::__checked(stringify!($field))
    }};
}

fn resolve_field(expression: &str) -> Result<&str> {
    let expr = expression.trim();
    if expr.is_empty() {
        return Err(HelperError::expression(expression, "expression is empty"));
    }

    let (binding, body) = split_closure(expression, expr)?;

    match body.split_once('.') {
        None => {
            if binding.is_some() {
                return Err(HelperError::expression(
                    expression,
                    "closure body must access a field of its parameter",
                ));
            }
            check_identifier(expression, body)?;
            Ok(body)
        }
        Some((receiver, field)) => {
            let receiver = receiver.trim();
            let field = field.trim();
            check_identifier(expression, receiver)?;
            if field.contains('.') {
                return Err(HelperError::expression(
                    expression,
                    "nested member access is not a direct field reference",
                ));
            }
            check_identifier(expression, field)?;
            if let Some(binding) = binding {
                if binding != receiver {
                    return Err(HelperError::expression(
                        expression,
                        format!("expected access through closure parameter `{}`", binding),
                    ));
                }
            }
            Ok(field)
        }
    }
}

/// Split `|r| body` or `r => body` into its binding and body.
fn split_closure<'e>(expression: &str, expr: &'e str) -> Result<(Option<&'e str>, &'e str)> {
    if let Some(rest) = expr.strip_prefix('|') {
        let Some((param, body)) = rest.split_once('|') else {
            return Err(HelperError::expression(expression, "unterminated closure parameter list"));
        };
        let param = param.trim().trim_start_matches('&').trim();
        let param = param.split_once(':').map_or(param, |(p, _)| p.trim());
        check_identifier(expression, param)?;
        return Ok((Some(param), body.trim()));
    }

    if let Some((param, body)) = expr.split_once("=>") {
        let param = param.trim();
        check_identifier(expression, param)?;
        return Ok((Some(param), body.trim()));
    }

    Ok((None, expr))
}

fn check_identifier(expression: &str, ident: &str) -> Result<()> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_') && ident != "_"
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(HelperError::expression(
            expression,
            format!("`{}` is not a direct field reference", ident),
        ))
    }
}
