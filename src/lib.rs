//! # Retail transactions anonymization
//!
//! Generalize the identifying and quasi-identifying fields of a table of retail transactions,
//! then measure the re-identification risk of the result with the k-anonymity model.
//!
//! ## Generalization
//! A [generalization::Registry] maps each field to a deterministic, lossy generalization:
//! card masking, month or hour-range bucketing of timestamps, dictionary pseudonyms for stores,
//! districts, categories and brands, and range bucketing of amounts and product counts.
//! [pipeline::full_anonymization] strips the direct identifiers then generalizes every quasi-identifier.
//!
//! ## K-anonymity
//! [k_anonymity::analyze] groups rows by a set of quasi-identifiers and reports the share of rows
//! in groups of at least k* rows, k* depending on the size of the table.
//!
//! ```
//! use retail_anon::{builder::Ready, k_anonymity, parameters::Parameters, Table};
//!
//! let table = Table::builder()
//!     .columns(["store_name", "date-time"])
//!     .row(["A", "2024-01"])
//!     .row(["A", "2024-01"])
//!     .row(["B", "2024-02"])
//!     .try_build()
//!     .unwrap();
//! let quasi_ids = k_anonymity::resolve([3, 2]).unwrap();
//! let report = k_anonymity::analyze(&table, &quasi_ids, &Parameters::default()).unwrap();
//! assert_eq!(report.fraction_good_label(), "0.00%");
//! ```
//!

pub mod builder;
pub mod fields;
pub mod generalization;
pub mod k_anonymity;
pub mod parameters;
pub mod pipeline;
pub mod setup;
pub mod table;

pub use builder::{Ready, With, WithIterator};
pub use generalization::{Dictionaries, Registry};
pub use k_anonymity::{analyze, QuasiIdentifiers, Report};
pub use parameters::Parameters;
pub use pipeline::full_anonymization;
pub use table::{Table, Value};
