//! # Generalization pipeline
//!
//! Validation, then stripping of the direct identifiers, then generalization of
//! the quasi-identifiers, one column at a time.
//! A failing value aborts the whole run: a partially generalized table would bias the
//! k-anonymity statistics computed on it.
//!

use itertools::Itertools;
use std::{error, fmt, result};

use crate::{
    fields,
    generalization::{self, Registry},
    table::{self, Table, Value},
};

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    Configuration(String),
    Lookup(String),
    Format(String),
    Schema(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(desc) => writeln!(f, "Configuration: {}", desc),
            Error::Lookup(desc) => writeln!(f, "Lookup: {}", desc),
            Error::Format(desc) => writeln!(f, "Format: {}", desc),
            Error::Schema(desc) => writeln!(f, "Schema: {}", desc),
        }
    }
}

impl error::Error for Error {}

impl From<generalization::Error> for Error {
    fn from(err: generalization::Error) -> Self {
        match err {
            generalization::Error::Configuration(desc) => Error::Configuration(desc),
            generalization::Error::Lookup(desc) => Error::Lookup(desc),
            generalization::Error::Format(desc) => Error::Format(desc),
        }
    }
}

impl From<table::Error> for Error {
    fn from(err: table::Error) -> Self {
        match err {
            table::Error::Schema(desc) => Error::Schema(desc),
            table::Error::Serialization(desc) => Error::Format(desc),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The generalization stages run after the direct identifiers are stripped
pub const QUASI_IDENTIFIERS: [&str; 8] = [
    fields::DATE_TIME,
    fields::STORE_NAME,
    fields::COORDINATES,
    fields::TOTAL_COST,
    fields::NUMBER_OF_PRODUCTS,
    fields::PRICE,
    fields::CATEGORIES,
    fields::BRANDS,
];

/// Check the required columns are there and render card numbers as text
pub fn validate(table: Table) -> Result<Table> {
    let missing = fields::REQUIRED
        .iter()
        .filter(|name| !table.schema().contains(name))
        .join(", ");
    if !missing.is_empty() {
        return Err(table::Error::missing_column(missing).into());
    }
    table.map_column(fields::CARDS_NUMBER, |value| -> Result<Value> {
        Ok(Value::Text(value.to_text()))
    })
}

/// Generalize every value of the column `field`, other columns are left untouched
pub fn apply(table: Table, registry: &Registry, field: &str) -> Result<Table> {
    let generalization = registry.get(field)?;
    log::debug!("generalizing {} with {}", field, generalization);
    table.map_column(field, |value| -> Result<Value> {
        Ok(generalization.generalize(value, registry.dictionaries())?)
    })
}

/// Mask `cards_number` and drop `receipt_id`
pub fn strip_direct_identifiers(table: Table, registry: &Registry) -> Result<Table> {
    let table = apply(table, registry, fields::CARDS_NUMBER)?;
    Ok(table.drop_column(fields::RECEIPT_ID)?)
}

/// Validate, strip the direct identifiers and generalize every quasi-identifier
pub fn full_anonymization(table: Table, registry: &Registry) -> Result<Table> {
    Pipeline::default().run(table, registry)
}

/// An ordered list of columns to generalize
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<String>,
}

impl Pipeline {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(stages: I) -> Pipeline {
        Pipeline {
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn run(&self, table: Table, registry: &Registry) -> Result<Table> {
        log::info!("anonymizing {} rows: {}", table.len(), self);
        let table = strip_direct_identifiers(validate(table)?, registry)?;
        let table = self
            .stages
            .iter()
            .try_fold(table, |table, field| apply(table, registry, field))?;
        log::info!("{} rows anonymized", table.len());
        Ok(table)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(QUASI_IDENTIFIERS)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            [fields::CARDS_NUMBER, fields::RECEIPT_ID]
                .iter()
                .map(|s| s.to_string())
                .chain(self.stages.iter().cloned())
                .join(" -> ")
        )
    }
}
