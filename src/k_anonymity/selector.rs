//! # Quasi-identifier selection
//!
//! Turns the numbers a human picks from a menu into a [QuasiIdentifiers] set.
//!

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

use super::{Error, Result};
use crate::fields;

/// The menu, key `i` selects `MENU[i - 1]`
pub const MENU: [&str; 9] = [
    fields::CARDS_NUMBER,
    fields::DATE_TIME,
    fields::STORE_NAME,
    fields::COORDINATES,
    fields::TOTAL_COST,
    fields::NUMBER_OF_PRODUCTS,
    fields::PRICE,
    fields::CATEGORIES,
    fields::BRANDS,
];

/// An ordered set of column names.
/// The order is only used for display, grouping does not depend on it.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuasiIdentifiers(Vec<String>);

impl QuasiIdentifiers {
    /// Duplicates are dropped, the first occurrence is kept
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(names: I) -> QuasiIdentifiers {
        QuasiIdentifiers(names.into_iter().map(Into::into).unique().collect())
    }
}

impl Deref for QuasiIdentifiers {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for QuasiIdentifiers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        QuasiIdentifiers::new(iter)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for QuasiIdentifiers {
    fn from(names: [S; N]) -> Self {
        QuasiIdentifiers::new(names)
    }
}

impl fmt::Display for QuasiIdentifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// Resolve menu keys into column names, in the order they were given
pub fn resolve<I: IntoIterator<Item = usize>>(keys: I) -> Result<QuasiIdentifiers> {
    keys.into_iter()
        .map(|key| {
            key.checked_sub(1)
                .and_then(|index| MENU.get(index))
                .copied()
                .ok_or_else(|| Error::unknown_key(key))
        })
        .collect()
}

/// Parse a reply such as `3 2` or `3,2`
pub fn parse_keys(input: &str) -> Result<Vec<usize>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().map_err(|_| Error::unknown_key(token)))
        .collect()
}

pub fn resolve_input(input: &str) -> Result<QuasiIdentifiers> {
    resolve(parse_keys(input)?)
}

/// The numbered list of selectable columns
pub fn menu() -> String {
    MENU.iter()
        .enumerate()
        .map(|(index, name)| format!("{}. {}", index + 1, name))
        .join("\n")
}
