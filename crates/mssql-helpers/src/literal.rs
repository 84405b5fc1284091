//! Locale-aware SQL literal formatting.
//!
//! For scripts that embed values directly instead of binding parameters.
//! Strings are quoted but not escaped; only use this with trusted values.
//! Generated bulk inserts never go through this module.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::SqlValue;

/// Literal used for NULL.
pub const SQL_NULL: &str = "null";

/// Session language whose conventions literals follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnglishUnitedStates,
    #[serde(rename = "pt-BR")]
    PortugueseBrazilian,
}

/// Formatting conventions of a [`Locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub decimal_separator: char,
    /// chrono format string for date and timestamp literals.
    pub datetime_pattern: &'static str,
    /// chrono format string for time-of-day literals.
    pub time_pattern: &'static str,
}

const EN_US: LocaleFormat = LocaleFormat {
    decimal_separator: '.',
    datetime_pattern: "%Y-%m-%d %H:%M:%S%.3f",
    time_pattern: "%H:%M:%S%.3f",
};

const PT_BR: LocaleFormat = LocaleFormat {
    decimal_separator: ',',
    datetime_pattern: "%d-%m-%Y %H:%M:%S%.3f",
    time_pattern: "%H:%M:%S%.3f",
};

/// Offset suffix appended to `datetimeoffset` literals.
const OFFSET_PATTERN: &str = "%:z";

impl Locale {
    pub fn format(self) -> LocaleFormat {
        match self {
            Locale::EnglishUnitedStates => EN_US,
            Locale::PortugueseBrazilian => PT_BR,
        }
    }

    /// Language tag, e.g. `en-US`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnglishUnitedStates => "en-US",
            Locale::PortugueseBrazilian => "pt-BR",
        }
    }
}

/// Render `value` as a SQL literal for `locale`.
///
/// ```rust
/// use mssql_helpers::literal::{to_sql_literal, Locale};
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_sql_literal(Option::<i32>::None, Locale::default()), "null");
/// assert_eq!(to_sql_literal("a'b", Locale::default()), "'a'b'");
/// assert_eq!(to_sql_literal(Decimal::new(12345, 2), Locale::PortugueseBrazilian), "123,45");
/// ```
pub fn to_sql_literal<'v>(value: impl Into<SqlValue<'v>>, locale: Locale) -> String {
    format_literal(&value.into(), locale)
}

/// Render a borrowed value as a SQL literal for `locale`.
pub fn format_literal(value: &SqlValue<'_>, locale: Locale) -> String {
    let fmt = locale.format();
    match value {
        SqlValue::Null(_) => SQL_NULL.to_string(),
        SqlValue::Text(s) => format!("'{}'", s),
        SqlValue::Decimal(d) => format_decimal(d, fmt.decimal_separator),
        SqlValue::DateTime(dt) => dt.format(fmt.datetime_pattern).to_string(),
        SqlValue::Date(d) => NaiveDateTime::from(*d)
            .format(fmt.datetime_pattern)
            .to_string(),
        SqlValue::Bool(v) => v.to_string(),
        SqlValue::I16(v) => v.to_string(),
        SqlValue::I32(v) => v.to_string(),
        SqlValue::I64(v) => v.to_string(),
        SqlValue::F32(v) => v.to_string(),
        SqlValue::F64(v) => v.to_string(),
        SqlValue::Bytes(b) => {
            let mut hex = String::with_capacity(2 + b.len() * 2);
            hex.push_str("0x");
            for byte in b.iter() {
                let _ = write!(hex, "{:02X}", byte);
            }
            hex
        }
        SqlValue::Uuid(u) => u.hyphenated().to_string(),
        SqlValue::DateTimeOffset(dt) => format!(
            "{} {}",
            dt.format(fmt.datetime_pattern),
            dt.format(OFFSET_PATTERN)
        ),
        SqlValue::Time(t) => t.format(fmt.time_pattern).to_string(),
    }
}

fn format_decimal(d: &Decimal, separator: char) -> String {
    let text = d.to_string();
    if separator == '.' {
        text
    } else {
        text.replace('.', &separator.to_string())
    }
}
