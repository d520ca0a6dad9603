use crate::error::CoreError;
use chrono::{Days, NaiveDate};

/// The only date format the dataset and the API accept.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Surrounding whitespace is not tolerated; the input must be exactly the
/// date. Impossible dates such as `2017-02-30` are rejected.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, CoreError> {
    let invalid = || CoreError::InvalidDate(input.to_string());
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())?;
    // chrono tolerates unpadded fields, signed years and padding spaces; only
    // the canonical rendering of the parsed date is accepted.
    if format_iso_date(date) != input {
        return Err(invalid());
    }
    Ok(date)
}

/// Formats a date the way it is stored in the `measurement.date` column.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The start of the trailing-year window ending on `date`.
///
/// This is a plain 365 day subtraction. Leap years are not special-cased, so
/// a window that spans February 29th covers one calendar day less than a year.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(365)).unwrap_or(NaiveDate::MIN)
}
