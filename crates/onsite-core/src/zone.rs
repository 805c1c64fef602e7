//! Time zone used to bucket timestamps into months.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use onsite_domain::MonthKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthZone {
    /// The zone of the running process.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl MonthZone {
    pub fn utc() -> Self {
        MonthZone::Fixed(Utc.fix())
    }

    pub fn month_key(&self, date: &DateTime<Utc>) -> MonthKey {
        match self {
            MonthZone::Local => MonthKey::from_datetime(date, &Local),
            MonthZone::Fixed(offset) => MonthKey::from_datetime(date, offset),
        }
    }
}

impl fmt::Display for MonthZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthZone::Local => f.write_str("local"),
            MonthZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for MonthZone {
    type Err = String;

    /// Accepts `local`, `utc`, `Z`, or an offset such as `+02:00`, `-0530` or `+2`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" | "" => return Ok(MonthZone::Local),
            "utc" | "z" => return Ok(MonthZone::utc()),
            _ => {}
        }
        parse_offset(trimmed)
            .map(MonthZone::Fixed)
            .ok_or_else(|| format!("invalid month zone `{}`", value))
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|ch| *ch != ':').collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
