//! Parameterized bulk INSERT generation.
//!
//! [`QueryGenerator::generate_bulk_inserts`] validates a mapping and a record
//! slice, plans batches under [`BatchLimits`], and returns a lazy iterator
//! producing one [`Statement`] per batch:
//!
//! ```text
//! SET NOCOUNT ON; INSERT INTO [People] ([FirstName], [LastName]) VALUES (@p0, @p1), (@p2, @p3);
//! ```
//!
//! With identity insert enabled the insert is bracketed by
//! `SET IDENTITY_INSERT [People] ON;` and `SET IDENTITY_INSERT [People] OFF;`
//! inside the same statement text, so every statement leaves the session as
//! it found it.
//!
//! Placeholder indices are local to a statement: each one starts at `@p0`.
//! The iterator keeps no borrow of the mapping; statements borrow only from
//! the records.

mod sizing;
mod statement;

pub use sizing::{
    BatchLimits, BatchPlan, DEFAULT_MAX_PARAMETERS_PER_STATEMENT, DEFAULT_MAX_ROWS_PER_STATEMENT,
    ENGINE_MAX_PARAMETERS,
};
pub use statement::{DynamicStatement, Parameter, ParameterBag, Statement};

use std::fmt;
use std::fmt::Write as _;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::core::identifier::quote_mssql;
use crate::core::{FieldReader, Record};
use crate::error::{HelperError, Result};
use crate::mapping::{short_type_name, FieldMapping, MappingValidation, MappingViolation};

use statement::placeholder;

/// Generates batched INSERT statements under fixed [`BatchLimits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryGenerator {
    limits: BatchLimits,
}

impl QueryGenerator {
    /// Generator with SQL Server's default limits (2099 parameters, 1000 rows).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: BatchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> BatchLimits {
        self.limits
    }

    /// Generate parameterized INSERT statements for `records`.
    ///
    /// Fails before producing anything when the mapping is invalid
    /// ([`HelperError::InvalidMapping`]), `records` is empty
    /// ([`HelperError::EmptyInput`]) or one row needs more parameters than a
    /// statement may bind ([`HelperError::TooManyFields`]).
    pub fn generate_bulk_inserts<'r, T: Record>(
        &self,
        mapping: &FieldMapping<T>,
        records: &'r [T],
        allow_identity_insert: bool,
    ) -> Result<BulkInserts<'r, T>> {
        let validation = mapping.validate();
        if !validation.is_valid() {
            warn!(
                "Rejected bulk insert generation: {} mapping violation(s)",
                validation.violations().len()
            );
            return Err(HelperError::InvalidMapping(validation));
        }

        if records.is_empty() {
            warn!("Rejected bulk insert generation: record collection is empty");
            return Err(HelperError::EmptyInput);
        }

        let readers = resolve_readers(mapping)?;

        let plan = self.limits.plan(readers.len(), records.len())?;
        debug!(
            table = mapping.table_name().unwrap_or_default(),
            rows = plan.total_rows,
            fields = plan.fields_per_row,
            rows_per_batch = plan.rows_per_batch,
            batches = plan.batch_count,
            identity_insert = allow_identity_insert,
            "Planned bulk insert batches"
        );

        Ok(BulkInserts::new(
            mapping,
            records,
            readers,
            plan,
            allow_identity_insert,
        ))
    }

    /// Same as [`generate_bulk_inserts`](Self::generate_bulk_inserts), with
    /// each statement's parameters collected into a [`ParameterBag`].
    pub fn generate_bulk_inserts_dynamic<'r, T: Record>(
        &self,
        mapping: &FieldMapping<T>,
        records: &'r [T],
        allow_identity_insert: bool,
    ) -> Result<DynamicBulkInserts<'r, T>> {
        let inner = self.generate_bulk_inserts(mapping, records, allow_identity_insert)?;
        Ok(DynamicBulkInserts { inner })
    }
}

/// [`QueryGenerator::generate_bulk_inserts`] with default limits.
pub fn generate_bulk_inserts<'r, T: Record>(
    mapping: &FieldMapping<T>,
    records: &'r [T],
    allow_identity_insert: bool,
) -> Result<BulkInserts<'r, T>> {
    QueryGenerator::new().generate_bulk_inserts(mapping, records, allow_identity_insert)
}

/// [`QueryGenerator::generate_bulk_inserts_dynamic`] with default limits.
pub fn generate_bulk_inserts_dynamic<'r, T: Record>(
    mapping: &FieldMapping<T>,
    records: &'r [T],
    allow_identity_insert: bool,
) -> Result<DynamicBulkInserts<'r, T>> {
    QueryGenerator::new().generate_bulk_inserts_dynamic(mapping, records, allow_identity_insert)
}

/// Every mapped field must resolve to a reader, not just be declared.
fn resolve_readers<T: Record>(mapping: &FieldMapping<T>) -> Result<Vec<FieldReader<T>>> {
    let mut readers = Vec::with_capacity(mapping.len());
    let mut unreadable = Vec::new();
    for (field, _) in mapping.fields() {
        match T::field_reader(field) {
            Some(read) => readers.push(read),
            None => unreadable.push(field.clone()),
        }
    }

    if unreadable.is_empty() {
        return Ok(readers);
    }

    warn!(
        "Rejected bulk insert generation: {} declared field(s) have no reader",
        unreadable.len()
    );
    Err(HelperError::InvalidMapping(MappingValidation::from_violations(
        vec![MappingViolation::UnknownFields {
            record: short_type_name::<T>(),
            fields: unreadable,
        }],
    )))
}

/// Lazy sequence of INSERT statements, one per batch.
pub struct BulkInserts<'r, T> {
    records: &'r [T],
    /// One reader per mapped field, in column order.
    readers: Vec<FieldReader<T>>,
    plan: BatchPlan,
    next_batch: usize,
    /// `SET NOCOUNT ON; [SET IDENTITY_INSERT .. ON; ]INSERT INTO [t] (..) VALUES `
    head: String,
    /// `;` or `; SET IDENTITY_INSERT .. OFF;`
    tail: String,
}

impl<'r, T: Record> BulkInserts<'r, T> {
    fn new(
        mapping: &FieldMapping<T>,
        records: &'r [T],
        readers: Vec<FieldReader<T>>,
        plan: BatchPlan,
        allow_identity_insert: bool,
    ) -> Self {
        let table = quote_mssql(mapping.table_name().unwrap_or_default());
        let columns = mapping
            .fields()
            .iter()
            .map(|(_, column)| quote_mssql(column))
            .collect::<Vec<_>>()
            .join(", ");

        let mut head = String::from("SET NOCOUNT ON; ");
        if allow_identity_insert {
            let _ = write!(head, "SET IDENTITY_INSERT {} ON; ", table);
        }
        let _ = write!(head, "INSERT INTO {} ({}) VALUES ", table, columns);

        let tail = if allow_identity_insert {
            format!("; SET IDENTITY_INSERT {} OFF;", table)
        } else {
            ";".to_string()
        };

        Self {
            records,
            readers,
            plan,
            next_batch: 0,
            head,
            tail,
        }
    }

    /// Batch plan for this call.
    pub fn plan(&self) -> &BatchPlan {
        &self.plan
    }

    fn build(&self, batch_index: usize, rows: &'r [T]) -> Statement<'r> {
        let param_count = rows.len() * self.readers.len();

        // "(@pNNNN, " is at most 9 bytes per parameter
        let mut sql = String::with_capacity(self.head.len() + self.tail.len() + param_count * 9);
        sql.push_str(&self.head);

        let mut parameters = Vec::with_capacity(param_count);
        let mut index = 0;

        for (row_idx, record) in rows.iter().enumerate() {
            if row_idx > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (field_idx, read) in self.readers.iter().enumerate() {
                if field_idx > 0 {
                    sql.push_str(", ");
                }
                let name = placeholder(index);
                sql.push_str(&name);
                parameters.push(Parameter::new(name, read(record)));
                index += 1;
            }
            sql.push(')');
        }

        sql.push_str(&self.tail);

        trace!(
            batch = batch_index,
            rows = rows.len(),
            parameters = parameters.len(),
            "Generated bulk insert statement"
        );

        Statement {
            batch_index,
            rows: rows.len(),
            sql,
            parameters,
        }
    }
}

impl<'r, T: Record> Iterator for BulkInserts<'r, T> {
    type Item = Statement<'r>;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.plan.range(self.next_batch)?;
        let batch_index = self.next_batch;
        self.next_batch += 1;
        let records: &'r [T] = self.records;
        Some(self.build(batch_index, &records[range]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.batch_count - self.next_batch;
        (remaining, Some(remaining))
    }
}

impl<'r, T: Record> ExactSizeIterator for BulkInserts<'r, T> {}

impl<'r, T: Record> FusedIterator for BulkInserts<'r, T> {}

impl<T> fmt::Debug for BulkInserts<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkInserts")
            .field("record", &short_type_name::<T>())
            .field("head", &self.head)
            .field("plan", &self.plan)
            .field("next_batch", &self.next_batch)
            .finish()
    }
}

/// Lazy sequence of [`DynamicStatement`]s.
pub struct DynamicBulkInserts<'r, T> {
    inner: BulkInserts<'r, T>,
}

impl<'r, T: Record> DynamicBulkInserts<'r, T> {
    pub fn plan(&self) -> &BatchPlan {
        self.inner.plan()
    }
}

impl<'r, T: Record> Iterator for DynamicBulkInserts<'r, T> {
    type Item = DynamicStatement<'r>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Statement::into_dynamic)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'r, T: Record> ExactSizeIterator for DynamicBulkInserts<'r, T> {}

impl<'r, T: Record> FusedIterator for DynamicBulkInserts<'r, T> {}

impl<T> fmt::Debug for DynamicBulkInserts<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynamicBulkInserts").field(&self.inner).finish()
    }
}
