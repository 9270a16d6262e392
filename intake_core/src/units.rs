//! Parsers for the string-encoded height and weight wire formats.
//!
//! The onboarding screens persist height as `5'11" ft` and weight as
//! `74 kg`. These strings are re-parsed defensively on every read; the rest
//! of the core works in centimeters and kilograms.

use crate::{Error, Result};

const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;

/// Parse a height string containing a `<feet>'<inches>"` pattern anywhere
/// and convert to centimeters.
pub fn parse_height_cm(raw: &str) -> Result<f64> {
    let apostrophe = raw
        .find('\'')
        .ok_or_else(|| Error::Parse(format!("no feet/inches pattern in height: {raw:?}")))?;
    let quote = raw[apostrophe + 1..]
        .find('"')
        .map(|i| apostrophe + 1 + i)
        .ok_or_else(|| Error::Parse(format!("no feet/inches pattern in height: {raw:?}")))?;

    let feet = trailing_integer(&raw[..apostrophe])
        .ok_or_else(|| Error::Parse(format!("missing feet value in height: {raw:?}")))?;
    let inches: u32 = raw[apostrophe + 1..quote]
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("missing inches value in height: {raw:?}")))?;

    Ok(feet as f64 * CM_PER_FOOT + inches as f64 * CM_PER_INCH)
}

/// Parse a weight string like `74 kg`: the token before the first space is
/// taken as the value. The unit suffix is not validated. A bare numeric
/// string passes through.
pub fn parse_weight_kg(raw: &str) -> Result<f64> {
    let token = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::Parse(format!("empty weight: {raw:?}")))?;
    token
        .parse()
        .map_err(|_| Error::Parse(format!("invalid weight value: {raw:?}")))
}

/// The longest run of ascii digits at the end of `s`, parsed as an integer.
fn trailing_integer(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_height() {
        let cm = parse_height_cm("5'11\" ft").unwrap();
        assert!((cm - (5.0 * 30.48 + 11.0 * 2.54)).abs() < 1e-9);
        assert!((cm - 180.34).abs() < 1e-9);
    }

    #[test]
    fn test_parse_height_pattern_anywhere() {
        let cm = parse_height_cm("height is 6'2\" tall").unwrap();
        assert!((cm - (6.0 * 30.48 + 2.0 * 2.54)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_height_missing_pattern() {
        assert!(matches!(parse_height_cm("180 cm"), Err(Error::Parse(_))));
        assert!(matches!(parse_height_cm("5 ft"), Err(Error::Parse(_))));
        assert!(matches!(parse_height_cm("'\" ft"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_weight_with_suffix() {
        assert_eq!(parse_weight_kg("74 kg").unwrap(), 74.0);
        // Suffix is not validated
        assert_eq!(parse_weight_kg("74 lbs").unwrap(), 74.0);
    }

    #[test]
    fn test_parse_weight_bare_number() {
        assert_eq!(parse_weight_kg("74.5").unwrap(), 74.5);
    }

    #[test]
    fn test_parse_weight_garbage() {
        assert!(parse_weight_kg("").is_err());
        assert!(parse_weight_kg("heavy").is_err());
    }
}
