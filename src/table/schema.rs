use itertools::Itertools;
use std::{collections::HashSet, fmt, ops::Deref};

use super::{Error, Result};

/// The ordered column names of a [super::Table]
///
/// Names are exact and case-sensitive, a name appears at most once.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Schema constructor, checking for name collisions
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut names = HashSet::new();
        if let Some(duplicate) = columns.iter().find(|name| !names.insert(name.as_str())) {
            return Err(Error::duplicate_column(duplicate));
        }
        Ok(Schema { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Find the index of the column with the given name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| Error::missing_column(name))
    }

    /// A new schema without the given column
    pub fn without(&self, name: &str) -> Result<Schema> {
        let index = self.index_of(name)?;
        let mut columns = self.columns.clone();
        columns.remove(index);
        Ok(Schema { columns })
    }

    /// A new schema with one more column
    pub fn with<S: Into<String>>(self, name: S) -> Result<Schema> {
        let mut columns = self.columns;
        columns.push(name.into());
        Schema::new(columns)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.columns.iter().join(", "))
    }
}

impl Deref for Schema {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let schema = Schema::new(["cards_number", "receipt_id", "date-time"]).unwrap();
        println!("schema = {schema}");
        assert_eq!(schema.index_of("date-time").unwrap(), 2);
        assert!(schema.contains("receipt_id"));
        assert!(!schema.contains("Receipt_id"));
        assert!(matches!(schema.index_of("price"), Err(Error::Schema(_))));
    }

    #[test]
    fn test_duplicates() {
        assert!(matches!(
            Schema::new(["price", "brands", "price"]),
            Err(Error::Schema(_))
        ));
        assert!(Schema::new(["price"]).unwrap().with("price").is_err());
    }

    #[test]
    fn test_without() {
        let schema = Schema::new(["a", "b", "c"]).unwrap();
        assert_eq!(schema.without("b").unwrap().columns(), &["a", "c"]);
        assert!(schema.without("d").is_err());
    }
}
