//! Cell parsing: years and percent/plain numeric values.
//!
//! No silent coercion: an empty cell, a non-numeric body, or a non-finite
//! number is an error, never zero or null.

use crate::data::source::ValueFormat;
use crate::error::ValueError;

/// Parse a percent string such as `"4.20%"` into `4.20`.
///
/// The trailing `%` is required; surrounding whitespace is ignored.
pub fn parse_percent(raw: &str) -> Result<f64, ValueError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValueError::Empty);
    }
    let body = trimmed
        .strip_suffix('%')
        .ok_or_else(|| ValueError::MissingPercentSign(trimmed.to_string()))?;
    parse_number(body.trim_end(), trimmed)
}

/// Parse a cell according to the source's value format.
pub fn parse_value(raw: &str, format: ValueFormat) -> Result<f64, ValueError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValueError::Empty);
    }
    match format {
        ValueFormat::Percent => parse_percent(trimmed),
        ValueFormat::Plain => {
            if trimmed.contains('%') {
                return Err(ValueError::UnexpectedPercentSign(trimmed.to_string()));
            }
            parse_number(trimmed, trimmed)
        }
        ValueFormat::Detect => match trimmed.strip_suffix('%') {
            Some(body) => parse_number(body.trim_end(), trimmed),
            None => parse_number(trimmed, trimmed),
        },
    }
}

/// Parse a calendar year cell.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn parse_number(body: &str, original: &str) -> Result<f64, ValueError> {
    match body.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValueError::NotNumeric(original.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_strings() {
        assert_eq!(parse_percent("4.20%").unwrap(), 4.20);
        assert_eq!(parse_percent("-1.5%").unwrap(), -1.5);
        assert_eq!(parse_percent("  3% ").unwrap(), 3.0);
        assert_eq!(parse_percent("0.75 %").unwrap(), 0.75);
    }

    #[test]
    fn malformed_percent_is_error() {
        assert_eq!(
            parse_percent("abc%"),
            Err(ValueError::NotNumeric("abc%".into()))
        );
        assert_eq!(parse_percent("%"), Err(ValueError::NotNumeric("%".into())));
        assert_eq!(parse_percent(""), Err(ValueError::Empty));
        assert_eq!(
            parse_percent("4.2"),
            Err(ValueError::MissingPercentSign("4.2".into()))
        );
    }

    #[test]
    fn bare_number_in_percent_column_needs_detect() {
        assert!(matches!(
            parse_value("4.2", ValueFormat::Percent),
            Err(ValueError::MissingPercentSign(_))
        ));
        assert_eq!(parse_value("4.2", ValueFormat::Detect), Ok(4.2));
    }

    #[test]
    fn non_finite_numbers_rejected() {
        assert!(parse_percent("inf%").is_err());
        assert!(parse_value("NaN", ValueFormat::Detect).is_err());
    }

    #[test]
    fn plain_rejects_percent_sign() {
        assert_eq!(parse_value("2.5", ValueFormat::Plain).unwrap(), 2.5);
        assert_eq!(
            parse_value("2.5%", ValueFormat::Plain),
            Err(ValueError::UnexpectedPercentSign("2.5%".into()))
        );
    }

    #[test]
    fn detect_accepts_both_forms() {
        assert_eq!(parse_value("3.4", ValueFormat::Detect).unwrap(), 3.4);
        assert_eq!(parse_value("3.4%", ValueFormat::Detect).unwrap(), 3.4);
        assert!(parse_value("n/a", ValueFormat::Detect).is_err());
    }

    #[test]
    fn years() {
        assert_eq!(parse_year(" 1984 "), Some(1984));
        assert_eq!(parse_year("Year"), None);
        assert_eq!(parse_year("1984.5"), None);
    }
}
