//! Recording start time encoded in file names as `DDMMYY_HHMMSS`

use std::{fmt, path::Path, str::FromStr};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use crate::error::{Error, Result};

/// Order of the date fields in the 6 digit date part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    /// `DDMMYY`
    #[default]
    DayFirst,

    /// `YYMMDD`
    YearFirst,
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "day-first" | "ddmmyy" => Ok(Self::DayFirst),
            "year-first" | "yymmdd" => Ok(Self::YearFirst),
            x => Err(format!("Invalid date order {:#?}, expected day-first or year-first", x)),
        }
    }
}

/// Naive local time a recording started at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartTime(NaiveDateTime);

impl StartTime {
    /// Decode start time from the last component of `path`, the extension is ignored
    ///
    /// Parsing is strictly positional, `240816_000059.mp4` is read as 24th of August 2016 with
    /// [`DateOrder::DayFirst`]. Two digit years are always in the 2000s.
    pub fn from_filename(path: impl AsRef<Path>, order: DateOrder) -> Result<Self> {
        let path = path.as_ref();
        let name = path.file_name()
            .map(|x| x.to_string_lossy())
            .unwrap_or_default();

        let re = Regex::new(
            r#"(?x)
            ^
            (?P<a>[0-9]{2})(?P<b>[0-9]{2})(?P<c>[0-9]{2})
            _
            (?P<h>[0-9]{2})(?P<m>[0-9]{2})(?P<s>[0-9]{2})
            # anything after the first dot is extension
            (?:\..*)?
            $"#
        ).expect("Error building start time regex");

        let captures = re.captures(&name)
            .ok_or_else(|| Error::format(name.clone(), "expected DDMMYY_HHMMSS"))?;

        // the regex guarantees two ascii digits
        let field = |x: &str| -> u32 { captures[x].parse().unwrap_or_default() };

        let (day, month, year) = match order {
            DateOrder::DayFirst => (field("a"), field("b"), field("c")),
            DateOrder::YearFirst => (field("c"), field("b"), field("a")),
        };

        let date = NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
            .ok_or_else(|| Error::format(name.clone(), format!("no such date {:02}.{:02}.20{:02}", day, month, year)))?;

        let time = date.and_hms_opt(field("h"), field("m"), field("s"))
            .ok_or_else(|| Error::format(name.clone(), "time of day out of range"))?;

        Ok(Self(time))
    }

    pub fn new(time: NaiveDateTime) -> Self {
        Self(time)
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Time `seconds` after this one
    pub fn after(&self, seconds: u64) -> Result<Self> {
        i64::try_from(seconds).ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|x| self.0.checked_add_signed(x))
            .map(Self)
            .ok_or_else(|| Error::format(seconds.to_string(), "offset overflows the calendar"))
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
