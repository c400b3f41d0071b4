//! # Size dependent acceptance threshold
//!
//! The required group size k* depends on the number of rows of the released table:
//! larger tables tolerate smaller groups for the same disclosure risk.
//!

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Error, Result};
use itertools::Itertools;

/// Tables of at most `max_rows` rows require groups of at least `k` rows
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub max_rows: usize,
    pub k: usize,
}

impl Step {
    pub fn new(max_rows: usize, k: usize) -> Step {
        Step { max_rows, k }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct Thresholds {
    steps: Vec<Step>,
}

impl Thresholds {
    /// Steps must be sorted by strictly increasing `max_rows`
    pub fn new(steps: Vec<Step>) -> Result<Thresholds> {
        if steps.is_empty() {
            return Err(Error::configuration("a threshold table cannot be empty"));
        }
        if let Some(step) = steps.iter().find(|step| step.k == 0) {
            return Err(Error::configuration(format!(
                "k must be positive for tables up to {} rows",
                step.max_rows
            )));
        }
        if let Some((previous, next)) = steps
            .iter()
            .tuple_windows()
            .find(|(previous, next)| previous.max_rows >= next.max_rows)
        {
            return Err(Error::configuration(format!(
                "steps up to {} and {} rows are not sorted",
                previous.max_rows, next.max_rows
            )));
        }
        Ok(Thresholds { steps })
    }

    /// The same k whatever the number of rows
    pub fn constant(k: usize) -> Thresholds {
        Thresholds {
            steps: vec![Step::new(usize::MAX, k.max(1))],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// k* for a table of `rows` rows, rows beyond the last step are not covered
    pub fn k(&self, rows: usize) -> Result<usize> {
        self.steps
            .iter()
            .find(|step| rows <= step.max_rows)
            .map(|step| step.k)
            .ok_or_else(|| {
                Error::configuration(format!("no threshold is defined for {} rows", rows))
            })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            steps: vec![
                Step::new(51_000, 10),
                Step::new(105_000, 7),
                Step::new(260_000, 5),
            ],
        }
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.steps
                .iter()
                .map(|step| format!("n <= {} -> k = {}", step.max_rows, step.k))
                .join(", ")
        )
    }
}

impl TryFrom<Vec<Step>> for Thresholds {
    type Error = Error;

    fn try_from(steps: Vec<Step>) -> Result<Self> {
        Thresholds::new(steps)
    }
}

impl From<Thresholds> for Vec<Step> {
    fn from(thresholds: Thresholds) -> Self {
        thresholds.steps
    }
}
