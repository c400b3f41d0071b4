//! Temporal bucketing of ISO-8601 timestamps

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{Error, Result};
use crate::table::Value;

const HOURS_PER_DAY: u32 = 24;

const FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    /// `2024-01`
    #[default]
    Month,
    /// `2024-01-15T08:00-12:00` for an interval of 4 hours
    HourRange { interval: u32 },
}

impl Temporal {
    pub fn hour_range(interval: u32) -> Result<Temporal> {
        let temporal = Temporal::HourRange { interval };
        temporal.validate()?;
        Ok(temporal)
    }

    /// The interval must split a day in equal parts
    pub fn validate(&self) -> Result<()> {
        match self {
            Temporal::Month => Ok(()),
            Temporal::HourRange { interval }
                if (1..=HOURS_PER_DAY).contains(interval) && HOURS_PER_DAY % interval == 0 =>
            {
                Ok(())
            }
            Temporal::HourRange { interval } => Err(Error::configuration(format!(
                "an hour range of {} hours does not split a day",
                interval
            ))),
        }
    }

    pub fn generalize(&self, value: &Value) -> Result<Value> {
        let timestamp = value
            .as_text()
            .and_then(parse_timestamp)
            .ok_or_else(|| Error::format(value, "an ISO-8601 timestamp"))?;
        Ok(Value::Text(match self {
            Temporal::Month => format!("{}-{:02}", timestamp.year(), timestamp.month()),
            Temporal::HourRange { interval } => {
                let start = (timestamp.hour() / interval) * interval;
                format!(
                    "{}T{:02}:00-{:02}:00",
                    timestamp.date().format("%Y-%m-%d"),
                    start,
                    start + interval
                )
            }
        }))
    }
}

/// Parse a timestamp, an offset is dropped and the local wall-clock time kept
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month() {
        let temporal = Temporal::Month;
        for timestamp in [
            "2024-01-15T10:42:00",
            "2024-01-15 10:42:00",
            "2024-01-15T10:42:00.250",
            "2024-01-15T10:42",
            "2024-01-15T10:42:00+03:00",
            "2024-01-15",
        ] {
            assert_eq!(
                temporal.generalize(&Value::from(timestamp)).unwrap(),
                Value::from("2024-01"),
                "{timestamp}"
            );
        }
    }

    #[test]
    fn test_hour_range() {
        let four = Temporal::hour_range(4).unwrap();
        assert_eq!(
            four.generalize(&Value::from("2024-03-02T10:42:00")).unwrap(),
            Value::from("2024-03-02T08:00-12:00")
        );
        let eight = Temporal::hour_range(8).unwrap();
        assert_eq!(
            eight.generalize(&Value::from("2024-03-02T23:59:59")).unwrap(),
            Value::from("2024-03-02T16:00-24:00")
        );
        assert_eq!(
            eight.generalize(&Value::from("2024-03-02T00:00:00")).unwrap(),
            Value::from("2024-03-02T00:00-08:00")
        );
    }

    #[test]
    fn test_invalid_interval() {
        assert!(matches!(Temporal::hour_range(5), Err(Error::Configuration(_))));
        assert!(matches!(Temporal::hour_range(0), Err(Error::Configuration(_))));
        assert!(Temporal::hour_range(24).is_ok());
    }

    #[test]
    fn test_malformed() {
        for value in [Value::from("15/01/2024"), Value::from("2024-13-01T00:00:00"), Value::from(1)] {
            assert!(matches!(Temporal::Month.generalize(&value), Err(Error::Format(_))));
        }
    }
}
