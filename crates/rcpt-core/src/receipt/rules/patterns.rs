//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // MM/DD/YY, MM/DD/YYYY, MM-DD-YY, MM-DD-YYYY
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"(\d{2})[/-](\d{2})[/-]((?:20)?\d{2})"
    ).unwrap();

    // "March 1, 2020", "Mar 1 2020", "SEPT. 14, 2019"
    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    ).unwrap();

    // Optional leading digits, a dot, exactly two digits: "36.54", ".99"
    pub static ref AMOUNT: Regex = Regex::new(
        r"\d*\.\d{2}"
    ).unwrap();
}
