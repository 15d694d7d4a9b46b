use crate::error::{Result, TodoTxtError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use time::{Date, Month};
use tracing::debug;

/// Length of a `YYYY-MM-DD` token in bytes.
pub(crate) const DATE_TOKEN_LEN: usize = 10;

/// A task date.
///
/// Most dates are real calendar days. A token that has the `YYYY-MM-DD` shape
/// but names no calendar day (month 13, February 30) is kept verbatim so that
/// re-serializing a parsed line reproduces it unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskDate(Repr);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Calendar(Date),
    Verbatim(String),
}

impl TaskDate {
    /// Calendar day, or `None` for a verbatim token.
    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match &self.0 {
            Repr::Calendar(date) => Some(*date),
            Repr::Verbatim(_) => None,
        }
    }

    /// Whether the date names a real calendar day.
    #[must_use]
    pub const fn is_calendar(&self) -> bool {
        matches!(self.0, Repr::Calendar(_))
    }

    /// Build a date from a token already known to be date-shaped.
    pub(crate) fn from_token(token: &str) -> Self {
        match calendar_from_token(token) {
            Some(date) => Self(Repr::Calendar(date)),
            None => {
                debug!(%token, "Keeping non-calendar date verbatim");
                Self(Repr::Verbatim(token.to_owned()))
            }
        }
    }

    /// Keep a pre-formatted date as written. Date-shaped text is read as a
    /// calendar day when it names one; anything else stays verbatim.
    pub(crate) fn from_written(raw: &str) -> Self {
        if is_date_shaped(raw) {
            Self::from_token(raw)
        } else {
            debug!(%raw, "Keeping pre-formatted date verbatim");
            Self(Repr::Verbatim(raw.to_owned()))
        }
    }
}

/// Whether `s` is exactly `\d{4}-\d{2}-\d{2}` (ASCII digits).
pub(crate) fn is_date_shaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == DATE_TOKEN_LEN
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn calendar_from_token(token: &str) -> Option<Date> {
    let year = token.get(0..4)?.parse::<i32>().ok()?;
    let month = token.get(5..7)?.parse::<u8>().ok()?;
    let day = token.get(8..10)?.parse::<u8>().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Render a date as `YYYY-MM-DD`; verbatim dates come back unchanged.
#[must_use]
pub fn format_date(date: &TaskDate) -> String {
    date.to_string()
}

/// Parse a `YYYY-MM-DD` string into a task date.
///
/// # Errors
///
/// Returns [`TodoTxtError::InvalidDate`] when `s` is not date-shaped.
pub fn parse_date(s: &str) -> Result<TaskDate> {
    s.parse()
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Calendar(date) => write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Repr::Verbatim(token) => f.write_str(token),
        }
    }
}

impl FromStr for TaskDate {
    type Err = TodoTxtError;

    fn from_str(s: &str) -> Result<Self> {
        if is_date_shaped(s) {
            Ok(Self::from_token(s))
        } else {
            Err(TodoTxtError::InvalidDate(s.to_owned()))
        }
    }
}

impl TryFrom<Date> for TaskDate {
    type Error = TodoTxtError;

    fn try_from(date: Date) -> Result<Self> {
        // Four-digit years only.
        if (0..=9999).contains(&date.year()) {
            Ok(Self(Repr::Calendar(date)))
        } else {
            Err(TodoTxtError::InvalidDate(format!(
                "{}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            )))
        }
    }
}

impl Serialize for TaskDate {
    fn serialize<S>(&self, s: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskDate {
    fn deserialize<D>(d: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
