//! Expense model
//!
//! A single recorded outlay and its one-line text encoding in the backing
//! store: `amount,category,date`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

/// Field delimiter of the store format
pub const FIELD_DELIMITER: char = ',';

/// Canonical date-time format written to the store
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats accepted when reading a date-time, tried in order
const ACCEPTED_DATE_TIME_FORMATS: &[&str] = &[DATE_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S%.f"];

/// A recorded expense
///
/// Plain value: sign of the amount and content of the category are not
/// validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDateTime,
}

impl Expense {
    /// Create a new expense
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
        }
    }

    /// Create a new expense stamped with the current local time
    pub fn new_now(amount: f64, category: impl Into<String>) -> Self {
        Self::new(amount, category, Local::now().naive_local())
    }

    /// Calendar date, ignoring the time of day
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Check whether this expense falls in the given calendar month
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Return a copy with the fields present in `update` replaced
    pub fn apply(&self, update: &ExpenseUpdate) -> Self {
        Self {
            amount: update.amount.unwrap_or(self.amount),
            category: update
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            date: update.date.unwrap_or(self.date),
        }
    }

    /// Encode as one store line (without line terminator)
    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.amount,
            FIELD_DELIMITER,
            self.category,
            FIELD_DELIMITER,
            self.date.format(DATE_TIME_FORMAT)
        )
    }

    /// Decode one store line
    ///
    /// The line must split into exactly three fields. Amount and date are
    /// trimmed before parsing; the category is kept as-is.
    pub fn from_line(line: &str) -> ExpenseResult<Self> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() != 3 {
            return Err(ExpenseError::parse(format!(
                "expected 3 comma-separated fields (amount,category,date), found {}",
                fields.len()
            )));
        }

        Ok(Self {
            amount: parse_amount(fields[0])?,
            category: fields[1].to_string(),
            date: parse_date_time(fields[2])?,
        })
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl FromStr for Expense {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s)
    }
}

/// Optional replacement values for an edit
///
/// An absent field leaves the corresponding expense field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
}

impl ExpenseUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the amount
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Replace the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the date
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// True if no field would change
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.date.is_none()
    }
}

/// Parse an amount, e.g. `12.50` or `-3`
pub fn parse_amount(s: &str) -> ExpenseResult<f64> {
    let trimmed = s.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ExpenseError::parse(format!("invalid amount '{}'", trimmed)))?;

    if !amount.is_finite() {
        return Err(ExpenseError::parse(format!("invalid amount '{}'", trimmed)));
    }
    Ok(amount)
}

/// Parse a date-time, accepting `YYYY-MM-DD HH:MM:SS[.f]`, the `T`-separated
/// form, or a bare `YYYY-MM-DD` (midnight)
pub fn parse_date_time(s: &str) -> ExpenseResult<NaiveDateTime> {
    let trimmed = s.trim();

    for format in ACCEPTED_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ExpenseError::parse(format!(
                "invalid date '{}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)",
                trimmed
            ))
        })
}

/// Check that a category can be stored without corrupting the line format
pub fn validate_category(category: &str) -> ExpenseResult<()> {
    if category.contains(FIELD_DELIMITER) || category.contains(['\n', '\r']) {
        return Err(ExpenseError::Validation(format!(
            "category '{}' must not contain commas or line breaks",
            category.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Timelike};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_to_line() {
        let expense = Expense::new(12.5, "Food", dt(2025, 3, 15, 14, 30, 0));
        assert_eq!(expense.to_line(), "12.5,Food,2025-03-15 14:30:00");
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_time(NaiveTime::from_hms_micro_opt(9, 5, 7, 123_456).unwrap());
        let cases = [
            Expense::new(0.1 + 0.2, "Food", date),
            Expense::new(-42.0, "Refund", date),
            Expense::new(1234567.891, "", date),
            Expense::new(7.0, " spaced out ", dt(1999, 12, 31, 23, 59, 59)),
        ];

        for expense in cases {
            let parsed = Expense::from_line(&expense.to_line()).unwrap();
            assert_eq!(parsed, expense);
        }
    }

    #[test]
    fn test_sub_second_precision_survives() {
        let expense = Expense::new_now(3.0, "Coffee");
        let parsed: Expense = expense.to_line().parse().unwrap();
        assert_eq!(parsed.date, expense.date);
        assert_eq!(parsed.date.nanosecond(), expense.date.nanosecond());
    }

    #[test]
    fn test_from_line_two_fields_fails() {
        let err = Expense::from_line("12.5,Food").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_line_extra_field_fails() {
        let err = Expense::from_line("12.5,Food,Drinks,2025-03-15 14:30:00").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_line_bad_amount_fails() {
        let err = Expense::from_line("twelve,Food,2025-03-15 14:30:00").unwrap_err();
        assert!(err.to_string().contains("invalid amount 'twelve'"));
    }

    #[test]
    fn test_from_line_bad_date_fails() {
        let err = Expense::from_line("12,Food,yesterday").unwrap_err();
        assert!(err.to_string().contains("invalid date 'yesterday'"));
    }

    #[test]
    fn test_from_line_non_finite_amount_fails() {
        assert!(Expense::from_line("NaN,Food,2025-03-15").is_err());
        assert!(Expense::from_line("inf,Food,2025-03-15").is_err());
    }

    #[test]
    fn test_from_line_accepts_bare_date_and_t_separator() {
        let bare = Expense::from_line("5,Bus,2025-04-01").unwrap();
        assert_eq!(bare.date, dt(2025, 4, 1, 0, 0, 0));

        let iso = Expense::from_line("5,Bus,2025-04-01T08:15:00").unwrap();
        assert_eq!(iso.date, dt(2025, 4, 1, 8, 15, 0));
    }

    #[test]
    fn test_from_line_keeps_category_verbatim() {
        let expense = Expense::from_line(" 5 , food ,2025-04-01 ").unwrap();
        assert_eq!(expense.amount, 5.0);
        assert_eq!(expense.category, " food ");
    }

    #[test]
    fn test_negative_amount_and_empty_category_allowed() {
        let expense = Expense::from_line("-10,,2025-04-01").unwrap();
        assert_eq!(expense.amount, -10.0);
        assert_eq!(expense.category, "");
    }

    #[test]
    fn test_apply_only_category() {
        let original = Expense::new(20.0, "Misc", dt(2025, 2, 1, 12, 0, 0));
        let updated = original.apply(&ExpenseUpdate::new().category("Food"));

        assert_eq!(updated.category, "Food");
        assert_eq!(updated.amount, original.amount);
        assert_eq!(updated.date, original.date);
        // original value is untouched
        assert_eq!(original.category, "Misc");
    }

    #[test]
    fn test_apply_all_fields() {
        let original = Expense::new(20.0, "Misc", dt(2025, 2, 1, 12, 0, 0));
        let update = ExpenseUpdate::new()
            .amount(3.5)
            .category("Travel")
            .date(dt(2024, 1, 1, 0, 0, 0));
        assert!(!update.is_empty());

        let updated = original.apply(&update);
        assert_eq!(updated, Expense::new(3.5, "Travel", dt(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_is_in_month() {
        let expense = Expense::new(1.0, "Food", dt(2025, 3, 15, 10, 0, 0));
        assert!(expense.is_in_month(2025, 3));
        assert!(!expense.is_in_month(2025, 4));
        assert!(!expense.is_in_month(2024, 3));
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Food").is_ok());
        assert!(validate_category("").is_ok());
        assert!(validate_category("Food, Drinks").unwrap_err().is_validation());
        assert!(validate_category("Food\nDrinks").unwrap_err().is_validation());
    }
}
