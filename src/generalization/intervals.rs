//! # Range bucketing of numeric values
//!
//! A [BucketTable] is an ordered list of contiguous, non-overlapping buckets.
//! Each bucket is closed on its upper bound, the last one may be unbounded above.
//! The tables are plain data: changing the boundaries never touches the lookup code.
//!

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Error, Result};
use crate::table::Value;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lower {
    Inclusive(f64),
    Exclusive(f64),
}

impl Lower {
    fn value(&self) -> f64 {
        match self {
            Lower::Inclusive(bound) | Lower::Exclusive(bound) => *bound,
        }
    }

    fn admits(&self, x: f64) -> bool {
        match self {
            Lower::Inclusive(bound) => x >= *bound,
            Lower::Exclusive(bound) => x > *bound,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    lower: Lower,
    upper: Option<f64>,
    label: String,
}

impl Bucket {
    pub fn new<S: Into<String>>(lower: Lower, upper: Option<f64>, label: S) -> Bucket {
        Bucket {
            lower,
            upper,
            label: label.into(),
        }
    }

    /// `[lower, upper]`
    pub fn closed<S: Into<String>>(lower: f64, upper: f64, label: S) -> Bucket {
        Bucket::new(Lower::Inclusive(lower), Some(upper), label)
    }

    /// `(lower, upper]`
    pub fn left_open<S: Into<String>>(lower: f64, upper: f64, label: S) -> Bucket {
        Bucket::new(Lower::Exclusive(lower), Some(upper), label)
    }

    /// `(lower, ∞)`
    pub fn unbounded<S: Into<String>>(lower: f64, label: S) -> Bucket {
        Bucket::new(Lower::Exclusive(lower), None, label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower.admits(x) && self.upper.map_or(!x.is_nan(), |upper| x <= upper)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Lower::Inclusive(lower) => write!(f, "[{}, ", lower)?,
            Lower::Exclusive(lower) => write!(f, "({}, ", lower)?,
        }
        match self.upper {
            Some(upper) => write!(f, "{}] -> {}", upper, self.label),
            None => write!(f, "∞) -> {}", self.label),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct BucketTable {
    buckets: Vec<Bucket>,
    integral: bool,
}

impl BucketTable {
    /// Build a table, checking the buckets are ordered, contiguous and non-overlapping
    pub fn new(buckets: Vec<Bucket>) -> Result<BucketTable> {
        let first = buckets
            .first()
            .ok_or_else(|| Error::configuration("a bucket table cannot be empty"))?;
        if first.lower.value().is_nan() {
            return Err(Error::configuration(format!("{} has no lower bound", first)));
        }
        for bucket in &buckets {
            let well_formed = match (bucket.lower, bucket.upper) {
                (_, None) => true,
                (Lower::Inclusive(lower), Some(upper)) => lower <= upper,
                (Lower::Exclusive(lower), Some(upper)) => lower < upper,
            };
            if !well_formed {
                return Err(Error::configuration(format!("{} is empty", bucket)));
            }
        }
        for (previous, next) in buckets.iter().tuple_windows() {
            match (previous.upper, next.lower) {
                (Some(upper), Lower::Exclusive(lower)) if upper == lower => {}
                _ => {
                    return Err(Error::configuration(format!(
                        "{} and {} are not contiguous",
                        previous, next
                    )))
                }
            }
        }
        Ok(BucketTable {
            buckets,
            integral: false,
        })
    }

    /// Only integers are bucketed
    pub fn integral(self) -> BucketTable {
        BucketTable {
            integral: true,
            ..self
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Linear scan of the ordered buckets
    pub fn bucket(&self, x: f64) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.contains(x))
    }

    pub fn label(&self, x: f64) -> Option<&str> {
        self.bucket(x).map(Bucket::label)
    }

    /// Values outside of the table fail closed
    pub fn generalize(&self, value: &Value) -> Result<Value> {
        let x = if self.integral {
            value
                .to_i64()
                .ok_or_else(|| Error::format(value, "an integer"))? as f64
        } else {
            value
                .to_f64()
                .ok_or_else(|| Error::format(value, "a number"))?
        };
        self.label(x)
            .map(Value::text)
            .ok_or_else(|| Error::format(value, format!("a value in {}", self)))
    }

    /// Price and total cost buckets
    pub fn costs() -> BucketTable {
        BucketTable {
            buckets: vec![
                Bucket::closed(0., 500., "<=500"),
                Bucket::left_open(500., 1000., "500-1000"),
                Bucket::left_open(1000., 2000., "1000-2000"),
                Bucket::left_open(2000., 5000., "2000-5000"),
                Bucket::left_open(5000., 10000., "5000-10000"),
                Bucket::left_open(10000., 30000., "10000-30000"),
                Bucket::left_open(30000., 50000., "30000-50000"),
                Bucket::left_open(50000., 100000., "50000-100000"),
                Bucket::unbounded(100000., "100000+"),
            ],
            integral: false,
        }
    }

    /// Number of products buckets
    pub fn product_counts() -> BucketTable {
        BucketTable {
            buckets: vec![
                Bucket::closed(1., 1., "1"),
                Bucket::left_open(1., 3., "2-3"),
                Bucket::left_open(3., 6., "4-6"),
                Bucket::unbounded(6., "6+"),
            ],
            integral: true,
        }
    }
}

impl fmt::Display for BucketTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.buckets.iter().join(", "))
    }
}

impl TryFrom<Vec<Bucket>> for BucketTable {
    type Error = Error;

    fn try_from(buckets: Vec<Bucket>) -> Result<Self> {
        BucketTable::new(buckets)
    }
}

impl From<BucketTable> for Vec<Bucket> {
    fn from(table: BucketTable) -> Self {
        table.buckets
    }
}
