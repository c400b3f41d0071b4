//! Payment card masking

use serde::{Deserialize, Serialize};

use super::{Error, Result};
use crate::table::Value;

pub const CARD_LENGTH: usize = 16;
pub const KEPT_DIGITS: usize = 4;
pub const DEFAULT_MASK: char = '*';

/// Which 4 digits of the card survive the masking
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPolicy {
    /// `************5678`
    #[default]
    KeepLast,
    /// `4000************`
    KeepFirst,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CardMask {
    policy: CardPolicy,
    mask: char,
}

impl CardMask {
    pub fn new(policy: CardPolicy, mask: char) -> CardMask {
        CardMask { policy, mask }
    }

    pub fn policy(&self) -> CardPolicy {
        self.policy
    }

    /// Mask all but 4 of the first 16 characters of the card number.
    /// Numeric cards are rendered as text first, characters past the 16th are discarded.
    pub fn generalize(&self, value: &Value) -> Result<Value> {
        let card: Vec<char> = value.to_text().chars().take(CARD_LENGTH).collect();
        if card.len() < CARD_LENGTH {
            return Err(Error::format(value, "a 16 characters card number"));
        }
        let kept = match self.policy {
            CardPolicy::KeepLast => CARD_LENGTH - KEPT_DIGITS..CARD_LENGTH,
            CardPolicy::KeepFirst => 0..KEPT_DIGITS,
        };
        Ok(Value::Text(
            card.iter()
                .enumerate()
                .map(|(i, c)| if kept.contains(&i) { *c } else { self.mask })
                .collect(),
        ))
    }
}

impl Default for CardMask {
    fn default() -> Self {
        CardMask::new(CardPolicy::default(), DEFAULT_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_last() {
        let mask = CardMask::default();
        assert_eq!(
            mask.generalize(&Value::from("4000123412345678")).unwrap(),
            Value::from("************5678")
        );
        assert_eq!(
            mask.generalize(&Value::from("1234567812345678")).unwrap(),
            Value::from("************5678")
        );
    }

    #[test]
    fn test_keep_first() {
        let mask = CardMask::new(CardPolicy::KeepFirst, '#');
        assert_eq!(
            mask.generalize(&Value::from("1234567812345678")).unwrap(),
            Value::from("1234############")
        );
    }

    #[test]
    fn test_numeric_cards() {
        let mask = CardMask::default();
        assert_eq!(
            mask.generalize(&Value::from(4000123412345678_i64)).unwrap(),
            Value::from("************5678")
        );
        assert_eq!(
            mask.generalize(&Value::from(4000123412349999.)).unwrap(),
            Value::from("************9999")
        );
    }

    #[test]
    fn test_retains_exactly_four() {
        for policy in [CardPolicy::KeepLast, CardPolicy::KeepFirst] {
            let masked = CardMask::new(policy, '*')
                .generalize(&Value::from("9876543210987654"))
                .unwrap()
                .to_string();
            println!("{:?} -> {masked}", policy);
            assert_eq!(masked.chars().count(), CARD_LENGTH);
            assert_eq!(masked.chars().filter(|c| *c == '*').count(), 12);
            assert_ne!(masked, "9876543210987654");
        }
    }

    #[test]
    fn test_idempotent() {
        let mask = CardMask::default();
        let once = mask.generalize(&Value::from("4000123412345678")).unwrap();
        assert_eq!(mask.generalize(&once).unwrap(), once);
    }

    #[test]
    fn test_short_and_long_cards() {
        let mask = CardMask::default();
        assert!(matches!(
            mask.generalize(&Value::from("40001234")),
            Err(Error::Format(_))
        ));
        assert_eq!(
            mask.generalize(&Value::from("400012341234567890")).unwrap(),
            Value::from("************5678")
        );
    }
}
