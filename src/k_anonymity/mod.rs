//! # K-anonymity analysis
//!
//! Rows sharing the same values on a set of quasi-identifiers form an equivalence class.
//! A row is considered safe when its class holds at least k* rows,
//! where k* depends on the size of the table (see [Thresholds]).
//!
//! The [Report] gives the share of safe rows and the share of rows in the smallest,
//! most exposed, classes.
//!

pub mod selector;
pub mod thresholds;

use colored::Colorize;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::{BTreeMap, HashMap}, error, fmt, result};

use crate::{
    parameters::Parameters,
    table::{self, Table, Value},
};
pub use selector::{resolve, QuasiIdentifiers};
pub use thresholds::{Step, Thresholds};

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    Configuration(String),
    Schema(String),
    EmptyTable(String),
}

impl Error {
    pub fn configuration(desc: impl fmt::Display) -> Error {
        Error::Configuration(format!("{}", desc))
    }
    pub fn unknown_key(key: impl fmt::Display) -> Error {
        Error::Configuration(format!("{} is not a valid key", key))
    }
    pub fn empty_table() -> Error {
        Error::EmptyTable("cannot analyze a table without rows".to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(desc) => writeln!(f, "Configuration: {}", desc),
            Error::Schema(desc) => writeln!(f, "Schema: {}", desc),
            Error::EmptyTable(desc) => writeln!(f, "EmptyTable: {}", desc),
        }
    }
}

impl error::Error for Error {}

impl From<table::Error> for Error {
    fn from(err: table::Error) -> Self {
        match err {
            table::Error::Schema(desc) | table::Error::Serialization(desc) => Error::Schema(desc),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The size of each equivalence class, keyed by the quasi-identifier values of the class
pub fn equivalence_classes<'a>(
    table: &'a Table,
    quasi_ids: &QuasiIdentifiers,
) -> Result<HashMap<Vec<&'a Value>, usize>> {
    let indices = quasi_ids
        .iter()
        .map(|name| table.index_of(name))
        .collect::<table::Result<Vec<usize>>>()?;
    Ok(table
        .rows()
        .iter()
        .map(|row| indices.iter().map(|&index| &row[index]).collect::<Vec<_>>())
        .counts())
}

/// The group-size distribution, sorted in ascending order
pub fn group_sizes(table: &Table, quasi_ids: &QuasiIdentifiers) -> Result<Vec<usize>> {
    Ok(equivalence_classes(table, quasi_ids)?
        .into_values()
        .sorted()
        .collect())
}

/// The k-anonymity report of `table` under the given quasi-identifiers
pub fn analyze(
    table: &Table,
    quasi_ids: &QuasiIdentifiers,
    parameters: &Parameters,
) -> Result<Report> {
    let rows = table.len();
    if rows == 0 {
        return Err(Error::empty_table());
    }
    let threshold = parameters.thresholds.k(rows)?;
    let sizes = group_sizes(table, quasi_ids)?;
    // Number of rows in classes of each size
    let rows_by_size: BTreeMap<usize, usize> =
        sizes.iter().fold(BTreeMap::new(), |mut rows_by_size, &size| {
            *rows_by_size.entry(size).or_insert(0) += size;
            rows_by_size
        });
    let share = |count: usize| count as f64 / rows as f64 * 100.;
    let good: usize = rows_by_size.range(threshold..).map(|(_, count)| count).sum();
    let bad_sizes: Vec<(usize, f64)> = rows_by_size
        .range(1..threshold)
        .take(parameters.max_reported_sizes)
        .map(|(&size, &count)| (size, share(count)))
        .collect();
    let report = Report {
        rows,
        classes: sizes.len(),
        achieved_k: sizes.first().copied().unwrap_or(0),
        threshold,
        fraction_good: share(good),
        bad_sizes,
    };
    log::info!("k-anonymity of {} on {} rows: {}", quasi_ids, rows, report.fraction_good_label());
    log::debug!("{}", report);
    Ok(report)
}

/// Summary of the re-identification risk of a table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    rows: usize,
    classes: usize,
    achieved_k: usize,
    threshold: usize,
    fraction_good: f64,
    bad_sizes: Vec<(usize, f64)>,
}

impl Report {
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of equivalence classes
    pub fn classes(&self) -> usize {
        self.classes
    }

    /// The size of the smallest class, i.e. the k the table actually achieves
    pub fn achieved_k(&self) -> usize {
        self.achieved_k
    }

    /// k*
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Percentage of rows in classes of at least k* rows
    pub fn fraction_good(&self) -> f64 {
        self.fraction_good
    }

    /// Percentage of rows per class size, for the smallest sizes below k*
    pub fn bad_sizes(&self) -> &[(usize, f64)] {
        &self.bad_sizes
    }

    /// Every class has at least k* rows
    pub fn is_k_anonymous(&self) -> bool {
        self.achieved_k >= self.threshold
    }

    pub fn fraction_good_label(&self) -> String {
        percentage(self.fraction_good)
    }

    pub fn bad_size_labels(&self) -> Vec<(usize, String)> {
        self.bad_sizes
            .iter()
            .map(|&(size, fraction)| (size, percentage(fraction)))
            .collect()
    }

    /// A colored rendering for terminals
    pub fn pretty(&self) -> String {
        let good = if self.is_k_anonymous() {
            self.fraction_good_label().green()
        } else {
            self.fraction_good_label().red()
        };
        let mut lines = vec![format!(
            "{} of {} rows are in groups of at least {} rows",
            good.bold(),
            self.rows,
            format!("k = {}", self.threshold).bold()
        )];
        lines.extend(
            self.bad_size_labels()
                .into_iter()
                .map(|(size, fraction)| format!("  groups of {}: {}", size, fraction.yellow())),
        );
        lines.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "k = {}: {} of {} rows in {} groups (smallest group: {})",
            self.threshold,
            self.fraction_good_label(),
            self.rows,
            self.classes,
            self.achieved_k
        )?;
        for (size, fraction) in self.bad_size_labels() {
            writeln!(f, "  groups of {}: {}", size, fraction)?;
        }
        Ok(())
    }
}

fn percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Ready;

    fn three_rows() -> Table {
        Table::builder()
            .columns(["store_name", "date-time", "price"])
            .row(["A", "2024-01", "<=500"])
            .row(["A", "2024-01", "500-1000"])
            .row(["B", "2024-02", "<=500"])
            .try_build()
            .unwrap()
    }

    #[test]
    fn test_group_sizes() {
        let table = three_rows();
        let quasi_ids = QuasiIdentifiers::from(["store_name", "date-time"]);
        assert_eq!(group_sizes(&table, &quasi_ids).unwrap(), vec![1, 2]);
        let quasi_ids = QuasiIdentifiers::from(["store_name", "price"]);
        assert_eq!(group_sizes(&table, &quasi_ids).unwrap(), vec![1, 1, 1]);
        assert_eq!(group_sizes(&table, &QuasiIdentifiers::default()).unwrap(), vec![3]);
    }

    #[test]
    fn test_unknown_column() {
        let table = three_rows();
        assert!(matches!(
            group_sizes(&table, &QuasiIdentifiers::from(["brands"])),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn test_three_rows_report() {
        let report = analyze(
            &three_rows(),
            &QuasiIdentifiers::from(["store_name", "date-time"]),
            &Parameters::default(),
        )
        .unwrap();
        println!("{report}");
        println!("{}", report.pretty());
        assert_eq!(report.threshold(), 10);
        assert_eq!(report.fraction_good_label(), "0.00%");
        assert_eq!(
            report.bad_size_labels(),
            vec![(1, "33.33%".to_string()), (2, "66.67%".to_string())]
        );
        assert_eq!(report.classes(), 2);
        assert_eq!(report.achieved_k(), 1);
        assert!(!report.is_k_anonymous());
    }

    #[test]
    fn test_small_threshold() {
        let parameters = Parameters::default().with_thresholds(Thresholds::constant(2));
        let report = analyze(
            &three_rows(),
            &QuasiIdentifiers::from(["store_name"]),
            &parameters,
        )
        .unwrap();
        assert_eq!(report.fraction_good_label(), "66.67%");
        assert_eq!(report.bad_size_labels(), vec![(1, "33.33%".to_string())]);
    }

    #[test]
    fn test_at_most_five_bad_sizes() {
        // Groups of sizes 1 to 7, k* = 10
        let mut builder = Table::builder().column("store_name");
        for size in 1..=7 {
            for _ in 0..size {
                builder = builder.row([format!("store_{size}")]);
            }
        }
        let table = builder.try_build().unwrap();
        let report = analyze(&table, &QuasiIdentifiers::from(["store_name"]), &Parameters::default()).unwrap();
        println!("{report}");
        let sizes: Vec<usize> = report.bad_sizes().iter().map(|(size, _)| *size).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.fraction_good(), 0.);
        let parameters = Parameters::default().with_max_reported_sizes(2);
        let report = analyze(&table, &QuasiIdentifiers::from(["store_name"]), &parameters).unwrap();
        assert_eq!(report.bad_sizes().len(), 2);
    }

    #[test]
    fn test_no_reported_sizes() {
        let table = Table::builder()
            .column("store_name")
            .row(["A"])
            .row(["B"])
            .try_build()
            .unwrap();
        let parameters = Parameters::default().with_max_reported_sizes(0);
        let report = analyze(&table, &QuasiIdentifiers::from(["store_name"]), &parameters).unwrap();
        println!("{}", report.pretty());
        assert!(report.bad_sizes().is_empty());
        assert_eq!(report.fraction_good_label(), "0.00%");
        assert_eq!(report.achieved_k(), 1);
        assert!(!report.is_k_anonymous());
    }

    #[test]
    fn test_schema_error_description() {
        let err = group_sizes(&three_rows(), &QuasiIdentifiers::from(["brands"])).unwrap_err();
        let Error::Schema(desc) = err else {
            panic!("expected a schema error")
        };
        assert!(!desc.starts_with("Schema"));
        assert!(!desc.ends_with('\n'));
    }

    #[test]
    fn test_fully_anonymous() {
        let mut builder = Table::builder().column("date-time");
        for i in 0..30 {
            builder = builder.row([format!("2024-0{}", i % 3 + 1)]);
        }
        let report = analyze(
            &builder.try_build().unwrap(),
            &QuasiIdentifiers::from(["date-time"]),
            &Parameters::default(),
        )
        .unwrap();
        assert_eq!(report.fraction_good_label(), "100.00%");
        assert!(report.is_k_anonymous());
        assert_eq!(report.achieved_k(), 10);
    }

    #[test]
    fn test_empty_and_oversized() {
        let empty = Table::builder().column("store_name").try_build().unwrap();
        assert!(matches!(
            analyze(&empty, &QuasiIdentifiers::from(["store_name"]), &Parameters::default()),
            Err(Error::EmptyTable(_))
        ));
        let parameters = Parameters::default()
            .with_thresholds(Thresholds::new(vec![Step::new(2, 2)]).unwrap());
        assert!(matches!(
            analyze(&three_rows(), &QuasiIdentifiers::from(["store_name"]), &parameters),
            Err(Error::Configuration(_))
        ));
    }
}
