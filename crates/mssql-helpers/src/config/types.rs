//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::generator::BatchLimits;
use crate::literal::Locale;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Statement ceilings (defaults: 2099 parameters, 1000 rows).
    #[serde(default)]
    pub limits: BatchLimits,

    /// Wrap inserts in SET IDENTITY_INSERT ON/OFF (default: false).
    #[serde(default)]
    pub allow_identity_insert: bool,

    /// Locale for literal formatting (default: en-US).
    #[serde(default)]
    pub locale: Locale,

    /// Named table mappings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<MappingConfig>,
}

/// A table mapping as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Destination table name.
    pub table: String,

    /// Field-to-column pairs, in column order.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One mapped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Record field name.
    pub field: String,

    /// Column name (default: same as field).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl FieldConfig {
    /// Column this field maps to.
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.field)
    }
}
