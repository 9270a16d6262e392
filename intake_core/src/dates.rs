//! Birthdate parsing and calendar-accurate age calculation.
//!
//! Profile birthdates travel as `DD-MonthName-YYYY` (English month names,
//! zero-padded day). Daily logs and weight entries use ISO `YYYY-MM-DD`.

use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// English month-name table used by the birthdate wire format
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a `DD-MonthName-YYYY` birthdate string.
pub fn parse_birthdate(raw: &str) -> Result<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '-');
    let (day, month, year) = match (parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y)) => (d, m, y),
        _ => return Err(Error::Parse(format!("malformed birthdate: {raw:?}"))),
    };

    let month_index = MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(month.trim()))
        .ok_or_else(|| Error::Parse(format!("unknown month name: {month:?}")))?;

    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("invalid day in birthdate: {raw:?}")))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("invalid year in birthdate: {raw:?}")))?;

    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, day)
        .ok_or_else(|| Error::Parse(format!("no such calendar date: {raw:?}")))
}

/// Format a date in the birthdate wire format, e.g. `05-April-1990`.
pub fn format_birthdate(date: NaiveDate) -> String {
    format!(
        "{:02}-{}-{:04}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// Age in whole years as of the given date.
///
/// The year difference is decremented by one when the birthday has not yet
/// occurred in `as_of`'s year. A malformed birthdate is a `Parse` error;
/// callers treat the value as "not computable" rather than fatal.
pub fn age_in_years(birthdate: &str, as_of: NaiveDate) -> Result<u32> {
    let birth = parse_birthdate(birthdate)?;

    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }

    Ok(age.max(0) as u32)
}
