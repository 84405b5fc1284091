//! Batch sizing under SQL Server's statement limits.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{HelperError, Result};

/// SQL Server rejects requests with more than 2100 parameters.
pub const ENGINE_MAX_PARAMETERS: usize = 2100;

/// Default parameter ceiling, one below the engine limit.
pub const DEFAULT_MAX_PARAMETERS_PER_STATEMENT: usize = ENGINE_MAX_PARAMETERS - 1;

/// A table value constructor may hold at most 1000 rows.
pub const DEFAULT_MAX_ROWS_PER_STATEMENT: usize = 1000;

/// Ceilings every generated statement must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLimits {
    /// Maximum bound parameters in one statement (default: 2099).
    #[serde(default = "default_max_parameters")]
    pub max_parameters_per_statement: usize,

    /// Maximum rows inserted by one statement (default: 1000).
    #[serde(default = "default_max_rows")]
    pub max_rows_per_statement: usize,
}

fn default_max_parameters() -> usize {
    DEFAULT_MAX_PARAMETERS_PER_STATEMENT
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS_PER_STATEMENT
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_parameters_per_statement: DEFAULT_MAX_PARAMETERS_PER_STATEMENT,
            max_rows_per_statement: DEFAULT_MAX_ROWS_PER_STATEMENT,
        }
    }
}

impl BatchLimits {
    pub fn new(max_parameters_per_statement: usize, max_rows_per_statement: usize) -> Self {
        Self {
            max_parameters_per_statement,
            max_rows_per_statement,
        }
    }

    /// Rows per statement for a row of `fields_per_row` parameters.
    ///
    /// Fails when a single row needs more parameters than one statement may
    /// bind, rather than planning zero-row batches.
    pub fn rows_per_batch(&self, fields_per_row: usize) -> Result<usize> {
        if fields_per_row == 0 {
            return Err(HelperError::Config(
                "cannot size batches for a mapping with zero fields".into(),
            ));
        }

        let rows_by_params = self.max_parameters_per_statement / fields_per_row;
        if rows_by_params == 0 {
            return Err(HelperError::TooManyFields {
                fields: fields_per_row,
                max_parameters: self.max_parameters_per_statement,
            });
        }

        let rows = rows_by_params.min(self.max_rows_per_statement);
        if rows == 0 {
            return Err(HelperError::Config(
                "max_rows_per_statement must be at least 1".into(),
            ));
        }

        Ok(rows)
    }

    /// Plan the batches for `total_rows` records of `fields_per_row` fields.
    pub fn plan(&self, fields_per_row: usize, total_rows: usize) -> Result<BatchPlan> {
        let rows_per_batch = self.rows_per_batch(fields_per_row)?;
        Ok(BatchPlan {
            fields_per_row,
            rows_per_batch,
            total_rows,
            batch_count: total_rows.div_ceil(rows_per_batch),
        })
    }
}

/// Partition of one generation call into contiguous batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub fields_per_row: usize,
    pub rows_per_batch: usize,
    pub total_rows: usize,
    pub batch_count: usize,
}

impl BatchPlan {
    /// Record index range covered by batch `index`, or `None` past the end.
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.batch_count {
            return None;
        }
        let start = index * self.rows_per_batch;
        let end = (start + self.rows_per_batch).min(self.total_rows);
        Some(start..end)
    }

    /// Parameters bound by batch `index`.
    pub fn parameter_count(&self, index: usize) -> usize {
        self.range(index).map_or(0, |r| r.len() * self.fields_per_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_batch_by_parameter_ceiling() {
        let limits = BatchLimits::default();
        // 3 columns -> 2099 / 3 = 699 rows
        assert_eq!(limits.rows_per_batch(3).unwrap(), 699);
        // 10 columns -> 2099 / 10 = 209 rows
        assert_eq!(limits.rows_per_batch(10).unwrap(), 209);
        // 100 columns -> 2099 / 100 = 20 rows
        assert_eq!(limits.rows_per_batch(100).unwrap(), 20);
        // 2099 columns -> exactly one row
        assert_eq!(limits.rows_per_batch(2099).unwrap(), 1);
    }

    #[test]
    fn test_rows_per_batch_by_row_ceiling() {
        let limits = BatchLimits::default();
        assert_eq!(limits.rows_per_batch(1).unwrap(), 1000);
        assert_eq!(limits.rows_per_batch(2).unwrap(), 1000);
        // 2099 / 3 would be 699, a lower row cap wins
        assert_eq!(BatchLimits::new(2099, 500).rows_per_batch(3).unwrap(), 500);
    }

    #[test]
    fn test_too_many_fields_is_an_error() {
        let limits = BatchLimits::default();
        match limits.rows_per_batch(2100) {
            Err(HelperError::TooManyFields {
                fields,
                max_parameters,
            }) => {
                assert_eq!(fields, 2100);
                assert_eq!(max_parameters, 2099);
            }
            other => panic!("expected TooManyFields, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_limits_are_errors() {
        assert!(BatchLimits::default().rows_per_batch(0).is_err());
        assert!(BatchLimits::new(2099, 0).rows_per_batch(1).is_err());
    }

    #[test]
    fn test_plan_batch_count() {
        let limits = BatchLimits::default();

        let plan = limits.plan(1, 1001).unwrap();
        assert_eq!(plan.rows_per_batch, 1000);
        assert_eq!(plan.batch_count, 2);

        let plan = limits.plan(3, 700).unwrap();
        assert_eq!(plan.rows_per_batch, 699);
        assert_eq!(plan.batch_count, 2);

        let plan = limits.plan(3, 699).unwrap();
        assert_eq!(plan.batch_count, 1);

        let plan = limits.plan(3, 0).unwrap();
        assert_eq!(plan.batch_count, 0);
    }

    #[test]
    fn test_plan_ranges_cover_input() {
        let plan = BatchLimits::new(10, 1000).plan(3, 10).unwrap();
        // 10 / 3 = 3 rows per batch -> 3 + 3 + 3 + 1
        assert_eq!(plan.rows_per_batch, 3);
        assert_eq!(plan.batch_count, 4);
        assert_eq!(plan.range(0), Some(0..3));
        assert_eq!(plan.range(1), Some(3..6));
        assert_eq!(plan.range(2), Some(6..9));
        assert_eq!(plan.range(3), Some(9..10));
        assert_eq!(plan.range(4), None);
        assert_eq!(plan.parameter_count(3), 3);
        assert_eq!(plan.parameter_count(0), 9);

        let covered: usize = (0..plan.batch_count)
            .map(|i| plan.range(i).unwrap().len())
            .sum();
        assert_eq!(covered, 10);
    }
}
