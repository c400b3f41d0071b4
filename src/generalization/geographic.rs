//! Geographic generalization of `lon,lat` coordinates

use serde::{Deserialize, Serialize};

use super::{
    dictionary::{Dictionaries, DictionaryKind},
    Error, Result,
};
use crate::table::Value;

pub const DEFAULT_DECIMALS: usize = 2;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geographic {
    /// Replace the raw coordinates with the district containing them
    #[default]
    District,
    /// Round both coordinates
    Round { decimals: usize },
}

impl Geographic {
    pub fn round() -> Geographic {
        Geographic::Round {
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn generalize(&self, value: &Value, dictionaries: &Dictionaries) -> Result<Value> {
        match self {
            Geographic::District => dictionaries.lookup(DictionaryKind::Districts, value),
            Geographic::Round { decimals } => round_coordinates(value, *decimals).map(Value::Text),
        }
    }
}

fn round_coordinates(value: &Value, decimals: usize) -> Result<String> {
    let text = value
        .as_text()
        .ok_or_else(|| Error::format(value, "a lon,lat pair"))?;
    let coordinates = text
        .split(',')
        .map(|coordinate| coordinate.trim().parse::<f64>().ok().filter(|c| c.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .filter(|coordinates| coordinates.len() == 2)
        .ok_or_else(|| Error::format(value, "a lon,lat pair"))?;
    Ok(format!(
        "{:.*},{:.*}",
        decimals, coordinates[0], decimals, coordinates[1]
    ))
}
