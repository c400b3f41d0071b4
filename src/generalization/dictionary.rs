//! # Pseudonym dictionaries
//!
//! Dictionaries are supplied fully populated by the caller and never change during a run.
//!

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::{Error, Result};
use crate::{builder::With, table::Value};

/// A mapping from raw strings to their pseudonyms
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(BTreeMap<String, String>);

impl Dictionary {
    pub fn new(entries: BTreeMap<String, String>) -> Dictionary {
        Dictionary(entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Dictionary> {
        serde_json::from_str(json).map_err(|err| Error::configuration(err))
    }
}

impl<K: Into<String>, V: Into<String>> With<(K, V)> for Dictionary {
    fn with(mut self, (key, pseudonym): (K, V)) -> Self {
        self.0.insert(key.into(), pseudonym.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary(
            iter.into_iter()
                .map(|(key, pseudonym)| (key.into(), pseudonym.into()))
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    Stores,
    Districts,
    Categories,
    Brands,
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryKind::Stores => write!(f, "stores"),
            DictionaryKind::Districts => write!(f, "districts"),
            DictionaryKind::Categories => write!(f, "categories"),
            DictionaryKind::Brands => write!(f, "brands"),
        }
    }
}

/// The four dictionaries the registry looks pseudonyms up in
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dictionaries {
    pub stores: Dictionary,
    pub districts: Dictionary,
    pub categories: Dictionary,
    pub brands: Dictionary,
}

impl Dictionaries {
    pub fn get(&self, kind: DictionaryKind) -> &Dictionary {
        match kind {
            DictionaryKind::Stores => &self.stores,
            DictionaryKind::Districts => &self.districts,
            DictionaryKind::Categories => &self.categories,
            DictionaryKind::Brands => &self.brands,
        }
    }

    /// Look the pseudonym of `value` up, numeric keys are rendered as text first
    pub fn lookup(&self, kind: DictionaryKind, value: &Value) -> Result<Value> {
        let key = value.to_text();
        self.get(kind)
            .get(&key)
            .map(Value::text)
            .ok_or_else(|| Error::missing_entry(kind, key))
    }

    pub fn from_json(json: &str) -> Result<Dictionaries> {
        serde_json::from_str(json).map_err(|err| Error::configuration(err))
    }
}

impl With<(DictionaryKind, Dictionary)> for Dictionaries {
    fn with(mut self, (kind, dictionary): (DictionaryKind, Dictionary)) -> Self {
        match kind {
            DictionaryKind::Stores => self.stores = dictionary,
            DictionaryKind::Districts => self.districts = dictionary,
            DictionaryKind::Categories => self.categories = dictionary,
            DictionaryKind::Brands => self.brands = dictionary,
        }
        self
    }
}
