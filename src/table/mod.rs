//! # The in-memory `Table` the pipeline and the analyzer work on
//!
//! A `Table` is a [Schema] and a list of rows of [Value]s.
//! Every transform consumes a table and returns a new one, so that a "before" and an "after"
//! version of the same data never alias.
//!

pub mod schema;
pub mod value;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{error, fmt, result};

use crate::builder::{Ready, With};
pub use schema::Schema;
pub use value::Value;

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    Schema(String),
    Serialization(String),
}

impl Error {
    pub fn missing_column(name: impl fmt::Display) -> Error {
        Error::Schema(format!("column {} is missing", name))
    }
    pub fn duplicate_column(name: impl fmt::Display) -> Error {
        Error::Schema(format!("column {} is ambiguous", name))
    }
    pub fn arity(row: usize, expected: usize, found: usize) -> Error {
        Error::Schema(format!(
            "row {} has {} values, {} expected",
            row, found, expected
        ))
    }
    pub fn serialization(err: impl fmt::Display) -> Error {
        Error::Serialization(format!("{}", err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema(desc) => writeln!(f, "Schema: {}", desc),
            Error::Serialization(desc) => writeln!(f, "Serialization: {}", desc),
        }
    }
}

impl error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

pub type Row = Vec<Value>;

/// A table of retail transactions, or of any other records
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Table constructor, checking every row matches the schema
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != schema.len())
        {
            return Err(Error::arity(index, schema.len(), row.len()));
        }
        Ok(Table { schema, rows })
    }

    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the index of the column with the given name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.schema.index_of(name)
    }

    /// The values of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let index = self.index_of(name)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Apply `f` to every value of the column `name`.
    /// The first failing value aborts the whole transform.
    pub fn map_column<E, F>(self, name: &str, f: F) -> result::Result<Table, E>
    where
        E: From<Error>,
        F: Fn(&Value) -> result::Result<Value, E>,
    {
        let index = self.index_of(name)?;
        let Table { schema, rows } = self;
        let rows = rows
            .into_iter()
            .map(|mut row| -> result::Result<Row, E> {
                row[index] = f(&row[index])?;
                Ok(row)
            })
            .collect::<result::Result<Vec<Row>, E>>()?;
        Ok(Table { schema, rows })
    }

    /// Remove the column `name`
    pub fn drop_column(self, name: &str) -> Result<Table> {
        let index = self.index_of(name)?;
        let schema = self.schema.without(name)?;
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                row.remove(index);
                row
            })
            .collect();
        Ok(Table { schema, rows })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Table> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.schema.iter().join(" | "))?;
        for row in &self.rows {
            writeln!(f, "{}", row.iter().join(" | "))?;
        }
        Ok(())
    }
}

/// The serialized form of a table
#[derive(Serialize, Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TryFrom<RawTable> for Table {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Table::new(Schema::new(raw.columns)?, raw.rows)
    }
}

impl From<Table> for RawTable {
    fn from(table: Table) -> Self {
        RawTable {
            columns: table.schema.columns().to_vec(),
            rows: table.rows,
        }
    }
}

/// Build a [Table] column names first, then row by row
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TableBuilder {
    pub fn new() -> Self {
        TableBuilder::default()
    }

    pub fn column<S: Into<String>>(mut self, name: S) -> Self {
        self.columns.push(name.into());
        self
    }

    pub fn columns<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.columns.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn row<I: IntoIterator<Item = V>, V: Into<Value>>(self, values: I) -> Self {
        self.with(values.into_iter().map(Into::into).collect::<Row>())
    }
}

impl With<Row> for TableBuilder {
    fn with(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}

impl Ready<Table> for TableBuilder {
    type Error = Error;

    fn try_build(self) -> Result<Table> {
        Table::new(Schema::new(self.columns)?, self.rows)
    }
}
