//! # Anonymization parameters
//!
//! Every policy choice of the pipeline and of the analyzer in one place.
//! Parameters can be loaded from JSON, missing entries take their default value:
//!
//! ```
//! use retail_anon::{parameters::Parameters, generalization::Temporal};
//!
//! let parameters = Parameters::from_json(r#"{"temporal": {"hour_range": {"interval": 4}}}"#).unwrap();
//! assert_eq!(parameters.temporal, Temporal::HourRange { interval: 4 });
//! assert_eq!(parameters.max_reported_sizes, 5);
//! ```
//!

use serde::{Deserialize, Serialize};
use std::{error, fmt, result};

use crate::{
    generalization::{self, card::DEFAULT_MASK, BucketTable, CardPolicy, Geographic, Temporal},
    k_anonymity::Thresholds,
};

pub const DEFAULT_MAX_REPORTED_SIZES: usize = 5;

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    Configuration(String),
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(desc) => writeln!(f, "Configuration: {}", desc),
            Error::Serialization(desc) => writeln!(f, "Serialization: {}", desc),
        }
    }
}

impl error::Error for Error {}

impl From<generalization::Error> for Error {
    fn from(err: generalization::Error) -> Self {
        match err {
            generalization::Error::Configuration(desc)
            | generalization::Error::Lookup(desc)
            | generalization::Error::Format(desc) => Error::Configuration(desc),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Which 4 card digits are kept
    pub card_policy: CardPolicy,
    pub mask: char,
    /// Month or hour-range bucketing of `date-time`
    pub temporal: Temporal,
    /// District lookup or rounding of `coordinates`
    pub geographic: Geographic,
    /// Buckets of `total_cost` and `price`
    pub costs: BucketTable,
    /// The k* step table
    pub thresholds: Thresholds,
    /// How many under-threshold group sizes a report lists, 0 lists none
    pub max_reported_sizes: usize,
}

impl Parameters {
    pub fn with_card_policy(self, card_policy: CardPolicy) -> Parameters {
        Parameters { card_policy, ..self }
    }

    pub fn with_mask(self, mask: char) -> Parameters {
        Parameters { mask, ..self }
    }

    pub fn with_temporal(self, temporal: Temporal) -> Parameters {
        Parameters { temporal, ..self }
    }

    pub fn with_geographic(self, geographic: Geographic) -> Parameters {
        Parameters { geographic, ..self }
    }

    pub fn with_costs(self, costs: BucketTable) -> Parameters {
        Parameters { costs, ..self }
    }

    pub fn with_thresholds(self, thresholds: Thresholds) -> Parameters {
        Parameters { thresholds, ..self }
    }

    pub fn with_max_reported_sizes(self, max_reported_sizes: usize) -> Parameters {
        Parameters {
            max_reported_sizes,
            ..self
        }
    }

    /// Bucket tables and thresholds are checked on deserialization, only the temporal granularity is left
    pub fn validate(&self) -> Result<()> {
        self.temporal.validate()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Parameters> {
        let parameters: Parameters = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            card_policy: CardPolicy::default(),
            mask: DEFAULT_MASK,
            temporal: Temporal::default(),
            geographic: Geographic::default(),
            costs: BucketTable::costs(),
            thresholds: Thresholds::default(),
            max_reported_sizes: DEFAULT_MAX_REPORTED_SIZES,
        }
    }
}
