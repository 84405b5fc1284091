//! Configuration loading and validation.
//!
//! ```yaml
//! limits:
//!   max_parameters_per_statement: 2099
//!   max_rows_per_statement: 1000
//! allow_identity_insert: false
//! locale: en-US
//! mappings:
//!   - table: People
//!     fields:
//!       - { field: first_name, column: FirstName }
//!       - { field: last_name }
//! ```

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use tracing::info;

use crate::core::{Record, SqlValue};
use crate::error::{HelperError, Result};
use crate::generator::{BulkInserts, DynamicBulkInserts, QueryGenerator};
use crate::literal;
use crate::mapping::{FieldMapping, MappingBuilder};

impl GeneratorConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        info!(
            "Loaded generator configuration from {:?} ({} mapping(s))",
            path,
            config.mappings.len()
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Generator using the configured limits.
    pub fn generator(&self) -> QueryGenerator {
        QueryGenerator::with_limits(self.limits)
    }

    /// Generate bulk inserts under the configured limits and identity-insert setting.
    pub fn generate_bulk_inserts<'r, T: Record>(
        &self,
        mapping: &FieldMapping<T>,
        records: &'r [T],
    ) -> Result<BulkInserts<'r, T>> {
        self.generator()
            .generate_bulk_inserts(mapping, records, self.allow_identity_insert)
    }

    pub fn generate_bulk_inserts_dynamic<'r, T: Record>(
        &self,
        mapping: &FieldMapping<T>,
        records: &'r [T],
    ) -> Result<DynamicBulkInserts<'r, T>> {
        self.generator()
            .generate_bulk_inserts_dynamic(mapping, records, self.allow_identity_insert)
    }

    /// Generate bulk inserts for `records` using the mapping configured for `table`.
    pub fn generate_for_table<'r, T: Record>(
        &self,
        table: &str,
        records: &'r [T],
    ) -> Result<BulkInserts<'r, T>> {
        let mapping = self.mapping::<T>(table)?;
        self.generate_bulk_inserts(&mapping, records)
    }

    /// Render `value` as a SQL literal in the configured locale.
    pub fn to_sql_literal<'v>(&self, value: impl Into<SqlValue<'v>>) -> String {
        literal::to_sql_literal(value, self.locale)
    }

    /// Build the mapping configured for `table`.
    pub fn mapping<T: Record>(&self, table: &str) -> Result<FieldMapping<T>> {
        self.mappings
            .iter()
            .find(|m| m.table == table)
            .map(MappingConfig::to_mapping::<T>)
            .ok_or_else(|| {
                HelperError::Config(format!("no mapping configured for table '{}'", table))
            })
    }
}

impl MappingConfig {
    /// Build a [`FieldMapping`]. Like [`MappingBuilder::build`], this does not validate.
    pub fn to_mapping<T>(&self) -> FieldMapping<T> {
        self.fields
            .iter()
            .fold(MappingBuilder::for_table(&self.table), |builder, f| {
                builder.add_mapping(&f.field, f.column_name())
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::BatchLimits;
    use crate::literal::Locale;
    use std::io::Write;

    #[allow(dead_code)]
    struct Person {
        first_name: String,
        last_name: String,
    }

    crate::impl_record!(Person {
        first_name,
        last_name
    });

    const YAML: &str = r#"
limits:
  max_rows_per_statement: 500
allow_identity_insert: true
locale: pt-BR
mappings:
  - table: People
    fields:
      - { field: first_name, column: FirstName }
      - { field: last_name }
"#;

    #[test]
    fn test_from_yaml() {
        let config = GeneratorConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.limits, BatchLimits::new(2099, 500));
        assert!(config.allow_identity_insert);
        assert_eq!(config.locale, Locale::PortugueseBrazilian);
        assert_eq!(config.generator().limits().max_rows_per_statement, 500);

        let mapping = config.mapping::<Person>("People").unwrap();
        assert_eq!(mapping.table_name(), Some("People"));
        assert_eq!(mapping.column_for("first_name"), Some("FirstName"));
        assert_eq!(mapping.column_for("last_name"), Some("last_name"));
        assert!(mapping.validate().is_valid());
    }

    #[test]
    fn test_settings_drive_generation_and_literals() {
        let config = GeneratorConfig::from_yaml(YAML).unwrap();
        let records = vec![
            Person {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            },
            Person {
                first_name: "Alan".into(),
                last_name: "Turing".into(),
            },
        ];

        let statements: Vec<_> = config
            .generate_for_table("People", &records)
            .unwrap()
            .collect();
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].sql,
            "SET NOCOUNT ON; SET IDENTITY_INSERT [People] ON; INSERT INTO [People] ([FirstName], [last_name]) \
             VALUES (@p0, @p1), (@p2, @p3); SET IDENTITY_INSERT [People] OFF;"
        );

        let mapping = config.mapping::<Person>("People").unwrap();
        let dynamic: Vec<_> = config
            .generate_bulk_inserts_dynamic(&mapping, &records)
            .unwrap()
            .collect();
        assert_eq!(dynamic[0].sql, statements[0].sql);

        let plain = GeneratorConfig::default();
        let statement = plain
            .generate_bulk_inserts(&mapping, &records)
            .unwrap()
            .next()
            .unwrap();
        assert!(!statement.sql.contains("IDENTITY_INSERT"));

        let price = rust_decimal::Decimal::new(1999, 2);
        assert_eq!(config.to_sql_literal(price), "19,99");
        assert_eq!(plain.to_sql_literal(price), "19.99");
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_yaml("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.limits, BatchLimits::default());
        assert_eq!(config.locale, Locale::EnglishUnitedStates);
        assert!(!config.allow_identity_insert);
    }

    #[test]
    fn test_unknown_table() {
        let config = GeneratorConfig::from_yaml(YAML).unwrap();
        let err = config.mapping::<Person>("Nope").unwrap_err();
        assert!(matches!(err, HelperError::Config(_)));
    }

    #[test]
    fn test_invalid_yaml_values_rejected() {
        let err = GeneratorConfig::from_yaml("limits:\n  max_rows_per_statement: 0\n").unwrap_err();
        assert!(matches!(err, HelperError::Config(_)));

        let err = GeneratorConfig::from_yaml("locale: fr-FR\n").unwrap_err();
        assert!(matches!(err, HelperError::Yaml(_)));
    }

    #[test]
    fn test_round_trip_through_yaml() {
        let config = GeneratorConfig::from_yaml(YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(GeneratorConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.mappings.len(), 1);

        let missing = GeneratorConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(HelperError::Io(_))));
    }
}
