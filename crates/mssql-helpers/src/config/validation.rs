//! Configuration validation.

use super::GeneratorConfig;
use crate::error::{HelperError, Result};
use crate::generator::ENGINE_MAX_PARAMETERS;

/// Validate the configuration.
pub fn validate(config: &GeneratorConfig) -> Result<()> {
    let limits = &config.limits;
    if limits.max_parameters_per_statement == 0 {
        return Err(HelperError::Config(
            "limits.max_parameters_per_statement must be at least 1".into(),
        ));
    }
    if limits.max_parameters_per_statement > ENGINE_MAX_PARAMETERS {
        return Err(HelperError::Config(format!(
            "limits.max_parameters_per_statement must be at most {}, got {}",
            ENGINE_MAX_PARAMETERS, limits.max_parameters_per_statement
        )));
    }
    if limits.max_rows_per_statement == 0 {
        return Err(HelperError::Config(
            "limits.max_rows_per_statement must be at least 1".into(),
        ));
    }

    for (i, mapping) in config.mappings.iter().enumerate() {
        if mapping.table.trim().is_empty() {
            return Err(HelperError::Config(format!(
                "mappings[{}].table is required",
                i
            )));
        }
        if config.mappings[..i]
            .iter()
            .any(|other| other.table == mapping.table)
        {
            return Err(HelperError::Config(format!(
                "mappings[{}]: table '{}' is mapped more than once",
                i, mapping.table
            )));
        }
        if mapping.fields.is_empty() {
            return Err(HelperError::Config(format!(
                "mappings[{}].fields must not be empty",
                i
            )));
        }
    }

    Ok(())
}
