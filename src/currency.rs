//! Conversion between Brazilian-real display strings and minor units (cents).
//!
//! Display strings use `.` to group thousands and `,` before the two cent
//! digits, e.g. `1.234,56`. Parsing looks at the digits only: the last two are
//! cents and everything before them is whole reais, so separators typed in the
//! wrong place are simply ignored.

use thiserror::Error;

pub const CURRENCY_SYMBOL: &str = "R$";

const DECIMAL_SEPARATOR: char = ',';
const THOUSANDS_SEPARATOR: char = '.';

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    #[error("the amount contains no digits")]
    Empty,
    #[error("the amount is too large")]
    TooLarge,
}

/// Parse a display string into minor units, ignoring everything but digits.
pub fn parse_display_to_minor_units(input: &str) -> Result<u64, AmountError> {
    let mut digits = input.chars().filter_map(|ch| ch.to_digit(10)).peekable();

    if digits.peek().is_none() {
        return Err(AmountError::Empty);
    }

    digits.try_fold(0u64, |amount, digit| {
        amount
            .checked_mul(10)
            .and_then(|amount| amount.checked_add(u64::from(digit)))
            .ok_or(AmountError::TooLarge)
    })
}

/// Render minor units as `1.234,56`.
pub fn format_minor_units(amount: u64) -> String {
    let whole = group_thousands(amount / 100);
    format!("{whole}{DECIMAL_SEPARATOR}{:02}", amount % 100)
}

/// Read-only label with the currency symbol, e.g. `R$ 1.234,56`.
///
/// Accepts any integer amount of minor units; negative values are prefixed
/// with `-`. The symbol is followed by a non-breaking space so it never wraps
/// away from the number.
pub fn currency_label(amount: impl Into<i128>) -> String {
    let amount: i128 = amount.into();
    let sign = if amount < 0 { "-" } else { "" };
    let magnitude = amount.unsigned_abs();
    let whole = group_thousands(magnitude / 100);

    format!(
        "{sign}{CURRENCY_SYMBOL}\u{a0}{whole}{DECIMAL_SEPARATOR}{:02}",
        magnitude % 100
    )
}

/// Reformat the raw contents of the amount input after a keystroke.
///
/// Returns `None` when the digits no longer fit, in which case the caller
/// should keep the previous value.
pub fn mask_amount_input(raw: &str) -> Option<String> {
    match parse_display_to_minor_units(raw) {
        Ok(amount) => Some(format_minor_units(amount)),
        Err(AmountError::Empty) => Some(String::new()),
        Err(AmountError::TooLarge) => None,
    }
}

/// Whether `display` has the visible shape `1.000,00`: one to three leading
/// digits, further groups of exactly three digits separated by `.`, and an
/// optional `,` followed by exactly two digits.
pub fn is_well_formed_amount(display: &str) -> bool {
    let (whole, cents) = match display.split_once(DECIMAL_SEPARATOR) {
        Some((whole, cents)) => (whole, Some(cents)),
        None => (display, None),
    };

    if let Some(cents) = cents {
        if cents.len() != 2 || !is_all_digits(cents) {
            return false;
        }
    }

    let mut groups = whole.split(THOUSANDS_SEPARATOR);
    let leading_ok = groups
        .next()
        .is_some_and(|group| (1..=3).contains(&group.len()) && is_all_digits(group));

    leading_ok && groups.all(|group| group.len() == 3 && is_all_digits(group))
}

fn is_all_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

fn group_thousands(value: impl ToString) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}
