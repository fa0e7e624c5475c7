//! Transaction date resolution for receipts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::FieldResolver;
use super::patterns::{DATE_MONTH_NAME, DATE_NUMERIC};
use crate::models::record::ReceiptText;

/// Date used when no valid date is found.
pub const DEFAULT_DATE: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

/// Inclusive range of accepted transaction years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub min_year: i32,
    pub max_year: i32,
}

impl DateWindow {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::new(2019, 2020)
    }
}

/// Date resolver. First valid date in scan order wins.
pub struct DateResolver {
    window: DateWindow,
}

impl DateResolver {
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }

    /// Find the first valid date, if any.
    pub fn find(&self, receipt: &ReceiptText) -> Option<NaiveDate> {
        receipt.lines().iter().find_map(|line| self.find_in_line(line))
    }

    /// Probe one line: numeric shape first, then month-name shape.
    fn find_in_line(&self, line: &str) -> Option<NaiveDate> {
        self.numeric_date(line).or_else(|| self.month_name_date(line))
    }

    fn numeric_date(&self, line: &str) -> Option<NaiveDate> {
        let caps = DATE_NUMERIC.captures(line)?;
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;

        let date = self.validate(year, month, day);
        if date.is_none() {
            trace!("Rejected numeric date candidate: {}", &caps[0]);
        }
        date
    }

    fn month_name_date(&self, line: &str) -> Option<NaiveDate> {
        let caps = DATE_MONTH_NAME.captures(line)?;
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;

        let date = self.validate(year, month, day);
        if date.is_none() {
            trace!("Rejected month-name date candidate: {}", &caps[0]);
        }
        date
    }

    fn validate(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !self.window.contains(year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(DateWindow::default())
    }
}

impl FieldResolver for DateResolver {
    type Output = NaiveDate;

    fn resolve(&self, receipt: &ReceiptText) -> NaiveDate {
        match self.find(receipt) {
            Some(date) => date,
            None => {
                debug!("No valid date found, using {}", DEFAULT_DATE);
                DEFAULT_DATE
            }
        }
    }
}

/// Two-digit years are taken as 20YY.
fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 { Some(2000 + year) } else { Some(year) }
}

fn month_to_number(month: &str) -> Option<u32> {
    let prefix = month.get(..3)?.to_lowercase();
    let number = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolve(lines: &[&str]) -> NaiveDate {
        DateResolver::default().resolve(&ReceiptText::new(lines.iter().copied()))
    }

    #[test]
    fn test_numeric_slash_four_digit_year() {
        assert_eq!(resolve(&["2655 El Camino Real", "03/01/2020"]), date(2020, 3, 1));
    }

    #[test]
    fn test_numeric_dash_two_digit_year() {
        assert_eq!(resolve(&["12-24-19 14:02"]), date(2019, 12, 24));
    }

    #[test]
    fn test_month_name_form() {
        assert_eq!(resolve(&["Sold on March 1, 2020"]), date(2020, 3, 1));
        assert_eq!(resolve(&["SEPT. 14, 2019"]), date(2019, 9, 14));
        assert_eq!(resolve(&["nov 2 2019"]), date(2019, 11, 2));
    }

    #[test]
    fn test_words_starting_with_month_prefix_are_not_dates() {
        assert_eq!(resolve(&["Marketplace 12, 2019", "03/01/2020"]), date(2020, 3, 1));
        assert_eq!(resolve(&["Junction 7, 2020"]), DEFAULT_DATE);
        assert_eq!(resolve(&["Decor 5 2020"]), DEFAULT_DATE);
    }

    #[test]
    fn test_no_date_is_epoch() {
        assert_eq!(resolve(&["random store", "no date here", "9.99"]), DEFAULT_DATE);
        assert_eq!(resolve(&[]), DEFAULT_DATE);
        assert_eq!(DEFAULT_DATE.to_string(), "1970-01-01");
    }

    #[test]
    fn test_out_of_window_year_is_skipped() {
        assert_eq!(resolve(&["01/15/2018", "02/20/2020"]), date(2020, 2, 20));
    }

    #[test]
    fn test_invalid_month_and_day_are_skipped() {
        assert_eq!(resolve(&["13/01/2020", "01/32/2020", "04/05/20"]), date(2020, 4, 5));
    }

    #[test]
    fn test_impossible_calendar_date_is_skipped() {
        assert_eq!(resolve(&["02/30/2020", "02/29/2020"]), date(2020, 2, 29));
    }

    #[test]
    fn test_first_valid_date_wins() {
        assert_eq!(resolve(&["05/06/2019", "07/08/2020"]), date(2019, 5, 6));
    }

    #[test]
    fn test_numeric_shape_has_priority_on_same_line() {
        assert_eq!(resolve(&["January 5, 2019 printed 02/03/2020"]), date(2020, 2, 3));
    }

    #[test]
    fn test_rejected_numeric_falls_back_to_month_name_on_same_line() {
        assert_eq!(resolve(&["ref 99/99/2020 on Jun 3, 2019"]), date(2019, 6, 3));
    }

    #[test]
    fn test_configured_window() {
        let resolver = DateResolver::new(DateWindow::new(2023, 2024));
        let receipt = ReceiptText::new(["03/01/2020", "06/15/2024"]);
        assert_eq!(resolver.resolve(&receipt), date(2024, 6, 15));
    }
}
