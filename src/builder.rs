//! # Builder utilities
//!
//! Traits shared by the builders of this crate
//! such as: [crate::table::TableBuilder] or [crate::generalization::Registry]
//!

use std::error;

/// A trait for builder ad-hoc polymorphism
pub trait With<Input, Output = Self> {
    fn with(self, input: Input) -> Output;
}

pub trait WithIterator<Input> {
    fn with_iter<I: IntoIterator<Item = Input>>(self, iter: I) -> Self;
}

impl<Input, W: With<Input>> WithIterator<Input> for W {
    fn with_iter<I: IntoIterator<Item = Input>>(self, iter: I) -> Self {
        iter.into_iter().fold(self, |w, i| w.with(i))
    }
}

/// A trait enabling build when a builder is ready
pub trait Ready<Output>: Sized {
    type Error: error::Error;
    /// Try to build
    fn try_build(self) -> Result<Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Labels(Vec<String>);

    impl With<&str> for Labels {
        fn with(mut self, input: &str) -> Self {
            self.0.push(input.to_string());
            self
        }
    }

    #[test]
    fn test_with_iter() {
        let labels = Labels::default().with("<=500").with_iter(["500-1000", "1000-2000"]);
        println!("labels = {:?}", labels);
        assert_eq!(labels.0, vec!["<=500", "500-1000", "1000-2000"]);
    }
}
