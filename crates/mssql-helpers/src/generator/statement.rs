//! Generated statements and their parameters.

use std::collections::HashMap;

use crate::core::SqlValue;

/// A named value bound to one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<'a> {
    /// Placeholder name, e.g. `@p0`.
    pub name: String,
    pub value: SqlValue<'a>,
}

impl<'a> Parameter<'a> {
    pub fn new(name: impl Into<String>, value: SqlValue<'a>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn into_owned(self) -> Parameter<'static> {
        Parameter {
            name: self.name,
            value: self.value.into_owned(),
        }
    }
}

/// One executable INSERT statement with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'a> {
    /// Zero-based position of this statement in its generation call.
    pub batch_index: usize,
    /// Number of records inserted by this statement.
    pub rows: usize,
    pub sql: String,
    /// Parameters in placeholder order (`@p0`, `@p1`, ...).
    pub parameters: Vec<Parameter<'a>>,
}

impl<'a> Statement<'a> {
    pub fn into_parts(self) -> (String, Vec<Parameter<'a>>) {
        (self.sql, self.parameters)
    }

    /// Same statement with its parameters collected into a [`ParameterBag`].
    pub fn into_dynamic(self) -> DynamicStatement<'a> {
        DynamicStatement {
            batch_index: self.batch_index,
            rows: self.rows,
            sql: self.sql,
            // placeholder names are unique within a statement
            parameters: ParameterBag::from_unique(self.parameters),
        }
    }
}

/// Statement whose parameters are held in a named [`ParameterBag`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicStatement<'a> {
    pub batch_index: usize,
    pub rows: usize,
    pub sql: String,
    pub parameters: ParameterBag<'a>,
}

impl<'a> DynamicStatement<'a> {
    pub fn into_parts(self) -> (String, ParameterBag<'a>) {
        (self.sql, self.parameters)
    }
}

/// Named parameter collection for drivers that bind by name.
///
/// Keeps insertion order; adding a name twice replaces its value.
#[derive(Debug, Clone, Default)]
pub struct ParameterBag<'a> {
    entries: Vec<Parameter<'a>>,
    /// Name -> position in `entries`.
    index: HashMap<String, usize>,
}

impl<'a> ParameterBag<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Build from parameters whose names are already distinct.
    pub(crate) fn from_unique(entries: Vec<Parameter<'a>>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn add(&mut self, name: impl Into<String>, value: SqlValue<'a>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].value = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Parameter::new(name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue<'a>> {
        self.index.get(name).map(|&i| &self.entries[i].value)
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<Parameter<'a>> for ParameterBag<'a> {
    fn from_iter<I: IntoIterator<Item = Parameter<'a>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bag = ParameterBag::with_capacity(iter.size_hint().0);
        for p in iter {
            bag.add(p.name, p.value);
        }
        bag
    }
}

impl PartialEq for ParameterBag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<'a> IntoIterator for ParameterBag<'a> {
    type Item = Parameter<'a>;
    type IntoIter = std::vec::IntoIter<Parameter<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Placeholder name for a batch-local parameter index.
pub(crate) fn placeholder(index: usize) -> String {
    format!("@p{}", index)
}
