//! Partial dates and date-times
//!
//! FHIR `date` values may stop at year or month precision and `dateTime`
//! values may additionally carry a full timestamp, which must then include
//! a zone offset.

use crate::error::{Error, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    Utc,
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`. Components below the precision are
/// stored as the first day of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialDate {
    date: NaiveDate,
    precision: DatePrecision,
}

impl PartialDate {
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            date: NaiveDate::from_ymd_opt(year, 1, 1)?,
            precision: DatePrecision::Year,
        })
    }

    pub fn year_month(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            date: NaiveDate::from_ymd_opt(year, month, 1)?,
            precision: DatePrecision::Month,
        })
    }

    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidValue(format!("Invalid date value: '{input}'"));
        if !input.chars().all(|ch| ch.is_ascii_digit() || ch == '-') {
            return Err(invalid());
        }
        let (date, precision) = match input.len() {
            4 => (
                NaiveDate::parse_from_str(&format!("{input}-01-01"), "%Y-%m-%d"),
                DatePrecision::Year,
            ),
            7 => (
                NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d"),
                DatePrecision::Month,
            ),
            10 => (NaiveDate::parse_from_str(input, "%Y-%m-%d"), DatePrecision::Day),
            _ => return Err(invalid()),
        };
        Ok(Self {
            date: date.map_err(|_| invalid())?,
            precision,
        })
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    /// First day covered by the value.
    pub fn lower_bound(&self) -> NaiveDate {
        self.date
    }

    /// Last day covered by the value.
    pub fn upper_bound(&self) -> NaiveDate {
        let next = match self.precision {
            DatePrecision::Year => NaiveDate::from_ymd_opt(self.date.year() + 1, 1, 1),
            DatePrecision::Month => self.date.checked_add_months(Months::new(1)),
            DatePrecision::Day => return self.date,
        };
        next.and_then(|date| date.pred_opt()).unwrap_or(self.date)
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            date,
            precision: DatePrecision::Day,
        }
    }
}

impl FromStr for PartialDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Year => write!(f, "{:04}", self.date.year()),
            DatePrecision::Month => write!(f, "{:04}-{:02}", self.date.year(), self.date.month()),
            DatePrecision::Day => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

/// A partial date, or a timestamp with zone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialDateTime {
    Date(PartialDate),
    Instant(DateTime<FixedOffset>),
}

impl PartialDateTime {
    pub fn parse(input: &str) -> Result<Self> {
        if !input.contains('T') {
            return PartialDate::parse(input).map(Self::Date);
        }
        DateTime::parse_from_rfc3339(input)
            .map(Self::Instant)
            .map_err(|_| {
                Error::InvalidValue(format!(
                    "Invalid dateTime value: '{input}' (a time requires seconds and a zone offset)"
                ))
            })
    }

    /// Earliest instant covered by the value. Partial dates are read as UTC.
    pub fn lower_bound(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Date(date) => utc(date.lower_bound().and_time(NaiveTime::default())),
            Self::Instant(instant) => *instant,
        }
    }

    /// Latest instant covered by the value. Partial dates are read as UTC.
    pub fn upper_bound(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Date(date) => {
                let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                    .unwrap_or_default();
                utc(date.upper_bound().and_time(end_of_day))
            }
            Self::Instant(instant) => *instant,
        }
    }
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).into()
}

impl From<PartialDate> for PartialDateTime {
    fn from(date: PartialDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDate> for PartialDateTime {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.into())
    }
}

impl From<DateTime<FixedOffset>> for PartialDateTime {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::Instant(instant)
    }
}

impl FromStr for PartialDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PartialDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => fmt::Display::fmt(date, f),
            Self::Instant(instant) => {
                write!(f, "{}", instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}
