use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month date {0:?}: expected MM-YYYY")]
pub struct InvalidMonthDate(pub String);

/// Month-granularity date carried over the wire as "MM-YYYY".
/// Internally pinned to the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Truncates an arbitrary date to month granularity.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl FromStr for MonthDate {
    type Err = InvalidMonthDate;

    // Strict: exactly two digits, hyphen, exactly four digits. chrono's %m
    // would accept "1-2025", which the API must reject.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthDate(s.to_string());

        let (month_part, year_part) = s.split_once('-').ok_or_else(invalid)?;
        if month_part.len() != 2
            || year_part.len() != 4
            || !month_part.bytes().all(|b| b.is_ascii_digit())
            || !year_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        let year: i32 = year_part.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for MonthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_month() {
        for month in 1..=12 {
            let date = MonthDate::new(month, 2025).unwrap();
            let encoded = date.to_string();
            let decoded: MonthDate = encoded.parse().unwrap();
            assert_eq!(decoded, date);
        }
    }

    #[test]
    fn encodes_zero_padded() {
        let date = MonthDate::new(1, 2026).unwrap();
        assert_eq!(date.to_string(), "01-2026");
    }

    #[test]
    fn rejects_malformed_input() {
        let cases = [
            "",
            "13-2025",
            "00-2025",
            "2025-01",
            "1-2025",
            "01-25",
            "01/2025",
            "012025",
            "ab-2025",
            "01-20a5",
            " 01-2025",
        ];
        for case in cases {
            assert!(case.parse::<MonthDate>().is_err(), "accepted {case:?}");
        }
    }

    #[test]
    fn truncates_to_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        assert_eq!(
            MonthDate::from_naive(date),
            MonthDate::new(7, 2025).unwrap()
        );
    }

    #[test]
    fn serde_round_trip() {
        let date = MonthDate::new(2, 2024).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"02-2024\"");

        let back: MonthDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn serde_rejects_non_padded_month() {
        assert!(serde_json::from_str::<MonthDate>("\"1-2025\"").is_err());
    }
}
