use std::fmt;

use thiserror::Error;
use time::{Date, Month, OffsetDateTime};

/// The month and year whose transactions and totals are on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Filter {
    pub month: Month,
    pub year: i32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("\"{0}\" is not a month between 01 and 12")]
    InvalidMonth(String),
    #[error("\"{0}\" is not a four digit year")]
    InvalidYear(String),
}

impl Filter {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    pub fn from_date(date: Date) -> Self {
        Self::new(date.month(), date.year())
    }

    /// The current local month, or the UTC month when the browser does not
    /// expose its offset.
    pub fn current() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::from_date(now.date())
    }

    /// Zero-padded month query parameter, e.g. `05`.
    pub fn month_param(&self) -> String {
        format!("{:02}", u8::from(self.month))
    }

    /// Four digit year query parameter.
    pub fn year_param(&self) -> String {
        format!("{:04}", self.year)
    }

    pub fn query_string(&self) -> String {
        format!("month={}&year={}", self.month_param(), self.year_param())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month_param(), self.year_param())
    }
}

/// Parse a month selector value, `"01"` to `"12"`.
pub fn parse_month(value: &str) -> Result<Month, FilterError> {
    let invalid = || FilterError::InvalidMonth(value.to_string());

    if value.len() != 2 {
        return Err(invalid());
    }

    value
        .parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(invalid)
}

/// Parse a year selector value such as `"2024"`.
pub fn parse_year(value: &str) -> Result<i32, FilterError> {
    if value.len() != 4 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(FilterError::InvalidYear(value.to_string()));
    }

    value
        .parse()
        .map_err(|_| FilterError::InvalidYear(value.to_string()))
}

/// All twelve months in calendar order.
pub fn months() -> impl Iterator<Item = Month> {
    std::iter::successors(Some(Month::January), |month| match month {
        Month::December => None,
        month => Some(month.next()),
    })
}

#[cfg(test)]
mod tests {
    use time::{macros::date, Month};

    use super::{months, parse_month, parse_year, Filter, FilterError};

    #[test]
    fn query_parameters_are_zero_padded() {
        let filter = Filter::new(Month::May, 2024);

        assert_eq!(filter.month_param(), "05");
        assert_eq!(filter.year_param(), "2024");
        assert_eq!(filter.query_string(), "month=05&year=2024");
    }

    #[test]
    fn filter_from_date_uses_month_and_year() {
        let filter = Filter::from_date(date!(2023 - 12 - 31));

        assert_eq!(filter, Filter::new(Month::December, 2023));
    }

    #[test]
    fn parses_month_values() {
        assert_eq!(parse_month("01"), Ok(Month::January));
        assert_eq!(parse_month("12"), Ok(Month::December));
    }

    #[test]
    fn rejects_invalid_month_values() {
        for value in ["", "1", "00", "13", "ab", "001"] {
            assert_eq!(
                parse_month(value),
                Err(FilterError::InvalidMonth(value.to_string())),
                "want {value:?} to be rejected"
            );
        }
    }

    #[test]
    fn parses_year_values() {
        assert_eq!(parse_year("2024"), Ok(2024));

        for value in ["24", "20245", "+202", "year"] {
            assert!(parse_year(value).is_err(), "want {value:?} to be rejected");
        }
    }

    #[test]
    fn months_are_in_calendar_order() {
        let all = months().collect::<Vec<_>>();

        assert_eq!(all.len(), 12);
        assert_eq!(all.first(), Some(&Month::January));
        assert_eq!(all.last(), Some(&Month::December));
    }
}
