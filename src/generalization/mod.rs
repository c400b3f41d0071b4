//! # Generalization registry
//!
//! A [Registry] maps a column name to the [Generalization] applied to every value of that column.
//! Generalizations are deterministic and lossy: card masking, temporal bucketing,
//! dictionary pseudonymization, geographic generalization and numeric range bucketing.
//!

pub mod card;
pub mod dictionary;
pub mod geographic;
pub mod intervals;
pub mod temporal;

use std::{collections::BTreeMap, error, fmt, result};

use crate::{
    builder::With,
    fields,
    parameters::Parameters,
    table::Value,
};
pub use card::{CardMask, CardPolicy};
pub use dictionary::{Dictionaries, Dictionary, DictionaryKind};
pub use geographic::Geographic;
pub use intervals::{Bucket, BucketTable};
pub use temporal::Temporal;

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    /// Unknown field or invalid policy
    Configuration(String),
    /// A raw value missing from a dictionary
    Lookup(String),
    /// A raw value that cannot be parsed or bucketed
    Format(String),
}

impl Error {
    pub fn configuration(desc: impl fmt::Display) -> Error {
        Error::Configuration(format!("{}", desc))
    }
    pub fn unknown_field(field: impl fmt::Display) -> Error {
        Error::Configuration(format!("unknown field {}", field))
    }
    pub fn missing_entry(kind: impl fmt::Display, key: impl fmt::Display) -> Error {
        Error::Lookup(format!("{} has no entry for {}", kind, key))
    }
    pub fn format(value: impl fmt::Display, expected: impl fmt::Display) -> Error {
        Error::Format(format!("{} is not {}", value, expected))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(desc) => writeln!(f, "Configuration: {}", desc),
            Error::Lookup(desc) => writeln!(f, "Lookup: {}", desc),
            Error::Format(desc) => writeln!(f, "Format: {}", desc),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// One strategy per kind of field
#[derive(Clone, Debug, PartialEq)]
pub enum Generalization {
    Card(CardMask),
    Temporal(Temporal),
    Pseudonym(DictionaryKind),
    Geographic(Geographic),
    Buckets(BucketTable),
}

impl Generalization {
    pub fn generalize(&self, value: &Value, dictionaries: &Dictionaries) -> Result<Value> {
        match self {
            Generalization::Card(mask) => mask.generalize(value),
            Generalization::Temporal(temporal) => temporal.generalize(value),
            Generalization::Pseudonym(kind) => dictionaries.lookup(*kind, value),
            Generalization::Geographic(geographic) => geographic.generalize(value, dictionaries),
            Generalization::Buckets(table) => table.generalize(value),
        }
    }
}

impl fmt::Display for Generalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generalization::Card(mask) => write!(f, "card mask ({:?})", mask.policy()),
            Generalization::Temporal(temporal) => write!(f, "temporal ({:?})", temporal),
            Generalization::Pseudonym(kind) => write!(f, "pseudonym ({})", kind),
            Generalization::Geographic(geographic) => write!(f, "geographic ({:?})", geographic),
            Generalization::Buckets(table) => write!(f, "buckets {}", table),
        }
    }
}

/// The catalog of generalizations and the dictionaries they look pseudonyms up in
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    generalizations: BTreeMap<String, Generalization>,
    dictionaries: Dictionaries,
}

impl Registry {
    /// A registry without any generalization
    pub fn empty(dictionaries: Dictionaries) -> Registry {
        Registry {
            generalizations: BTreeMap::new(),
            dictionaries,
        }
    }

    /// The catalog for retail transactions tables
    pub fn new(parameters: &Parameters, dictionaries: Dictionaries) -> Result<Registry> {
        parameters.temporal.validate()?;
        Ok(Registry::empty(dictionaries)
            .with((
                fields::CARDS_NUMBER,
                Generalization::Card(CardMask::new(parameters.card_policy, parameters.mask)),
            ))
            .with((fields::DATE_TIME, Generalization::Temporal(parameters.temporal)))
            .with((
                fields::STORE_NAME,
                Generalization::Pseudonym(DictionaryKind::Stores),
            ))
            .with((
                fields::COORDINATES,
                Generalization::Geographic(parameters.geographic),
            ))
            .with((
                fields::TOTAL_COST,
                Generalization::Buckets(parameters.costs.clone()),
            ))
            .with((fields::PRICE, Generalization::Buckets(parameters.costs.clone())))
            .with((
                fields::NUMBER_OF_PRODUCTS,
                Generalization::Buckets(BucketTable::product_counts()),
            ))
            .with((
                fields::CATEGORIES,
                Generalization::Pseudonym(DictionaryKind::Categories),
            ))
            .with((
                fields::BRANDS,
                Generalization::Pseudonym(DictionaryKind::Brands),
            )))
    }

    pub fn get(&self, field: &str) -> Result<&Generalization> {
        self.generalizations
            .get(field)
            .ok_or_else(|| Error::unknown_field(field))
    }

    pub fn generalize(&self, field: &str, value: &Value) -> Result<Value> {
        self.get(field)?.generalize(value, &self.dictionaries)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.generalizations.keys().map(String::as_str)
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }
}

/// Register or substitute the generalization of a field
impl<S: Into<String>> With<(S, Generalization)> for Registry {
    fn with(mut self, (field, generalization): (S, Generalization)) -> Self {
        self.generalizations.insert(field.into(), generalization);
        self
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, generalization) in &self.generalizations {
            writeln!(f, "{}: {}", field, generalization)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let dictionaries = Dictionaries::default()
            .with((
                DictionaryKind::Stores,
                Dictionary::from_iter([("Magnit", "store_2")]),
            ))
            .with((
                DictionaryKind::Brands,
                Dictionary::from_iter([("Acme", "brand_9")]),
            ));
        Registry::new(&Parameters::default(), dictionaries).unwrap()
    }

    #[test]
    fn test_catalog() {
        let registry = registry();
        println!("{registry}");
        let mut expected = vec![
            fields::CARDS_NUMBER,
            fields::DATE_TIME,
            fields::STORE_NAME,
            fields::COORDINATES,
            fields::TOTAL_COST,
            fields::PRICE,
            fields::NUMBER_OF_PRODUCTS,
            fields::CATEGORIES,
            fields::BRANDS,
        ];
        expected.sort();
        assert_eq!(registry.fields().collect::<Vec<_>>(), expected);
        assert_eq!(
            registry.get(fields::PRICE).unwrap(),
            registry.get(fields::TOTAL_COST).unwrap()
        );
    }

    #[test]
    fn test_unknown_field() {
        let registry = registry();
        assert!(matches!(
            registry.get(fields::RECEIPT_ID),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            registry.generalize("Store_name", &Value::from("Magnit")),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_generalize() {
        let registry = registry();
        assert_eq!(
            registry
                .generalize(fields::CARDS_NUMBER, &Value::from("4000123412345678"))
                .unwrap(),
            Value::from("************5678")
        );
        assert_eq!(
            registry
                .generalize(fields::DATE_TIME, &Value::from("2024-02-29T13:00:00"))
                .unwrap(),
            Value::from("2024-02")
        );
        assert_eq!(
            registry
                .generalize(fields::STORE_NAME, &Value::from("Magnit"))
                .unwrap(),
            Value::from("store_2")
        );
        assert_eq!(
            registry.generalize(fields::PRICE, &Value::from(750)).unwrap(),
            Value::from("500-1000")
        );
        assert_eq!(
            registry
                .generalize(fields::NUMBER_OF_PRODUCTS, &Value::from(5))
                .unwrap(),
            Value::from("4-6")
        );
        assert_eq!(
            registry.generalize(fields::BRANDS, &Value::from("Acme")).unwrap(),
            Value::from("brand_9")
        );
        assert!(matches!(
            registry.generalize(fields::STORE_NAME, &Value::from("Lenta")),
            Err(Error::Lookup(_))
        ));
        assert!(matches!(
            registry.generalize(fields::CATEGORIES, &Value::from("dairy")),
            Err(Error::Lookup(_))
        ));
    }

    #[test]
    fn test_substitution() {
        let registry = registry()
            .with((fields::COORDINATES, Generalization::Geographic(Geographic::round())))
            .with((
                fields::DATE_TIME,
                Generalization::Temporal(Temporal::hour_range(4).unwrap()),
            ));
        assert_eq!(
            registry
                .generalize(fields::COORDINATES, &Value::from("37.6173,55.7558"))
                .unwrap(),
            Value::from("37.62,55.76")
        );
        assert_eq!(
            registry
                .generalize(fields::DATE_TIME, &Value::from("2024-02-29T13:00:00"))
                .unwrap(),
            Value::from("2024-02-29T12:00-16:00")
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let parameters = Parameters::default().with_temporal(Temporal::HourRange { interval: 7 });
        assert!(matches!(
            Registry::new(&parameters, Dictionaries::default()),
            Err(Error::Configuration(_))
        ));
    }
}
