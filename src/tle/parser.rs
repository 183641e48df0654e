use std::ops::Range;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::error::ParseError;
use super::record::{checksum, verify_checksum, TleRecord, TLE_LINE_LEN};

// Zero-based column ranges of the two-line element format.
const L1_CATALOG: Range<usize> = 2..7;
const L1_CLASSIFICATION: usize = 7;
const L1_INTL_DESIGNATOR: Range<usize> = 9..17;
const L1_EPOCH_YEAR: Range<usize> = 18..20;
const L1_EPOCH_DAY: Range<usize> = 20..32;
const L1_MEAN_MOTION_DOT: Range<usize> = 33..43;
const L1_MEAN_MOTION_DDOT: Range<usize> = 44..52;
const L1_BSTAR: Range<usize> = 53..61;
const L1_EPHEMERIS_TYPE: usize = 62;
const L1_ELEMENT_SET: Range<usize> = 64..68;

const L2_CATALOG: Range<usize> = 2..7;
const L2_INCLINATION: Range<usize> = 8..16;
const L2_RAAN: Range<usize> = 17..25;
const L2_ECCENTRICITY: Range<usize> = 26..33;
const L2_ARG_PERIGEE: Range<usize> = 34..42;
const L2_MEAN_ANOMALY: Range<usize> = 43..51;
const L2_MEAN_MOTION: Range<usize> = 52..63;
const L2_REV_NUM: Range<usize> = 63..68;

const CHECKSUM_COL: usize = TLE_LINE_LEN - 1;

/// Decode one element set. `name` is the optional title line of a 3-line set.
pub fn parse_tle(name: Option<&str>, line1: &str, line2: &str) -> Result<TleRecord, ParseError> {
    let line1 = validate_line(1, line1)?;
    let line2 = validate_line(2, line2)?;

    let catalog_id = parse_catalog(&line1[L1_CATALOG])?;
    let catalog_id_2 = parse_catalog(&line2[L2_CATALOG])?;
    if catalog_id != catalog_id_2 {
        return Err(ParseError::CatalogMismatch {
            line1: catalog_id,
            line2: catalog_id_2,
        });
    }

    let epoch = parse_epoch(&line1[L1_EPOCH_YEAR], &line1[L1_EPOCH_DAY])?;

    let mean_motion = float_field(line2, L2_MEAN_MOTION, "mean_motion")?;
    if mean_motion <= 0.0 {
        return Err(ParseError::NonPositiveMeanMotion(mean_motion));
    }

    // Leading decimal point is implied.
    let eccentricity = finite(
        format!("0.{}", line2[L2_ECCENTRICITY].trim()).parse().ok(),
        "eccentricity",
    )?;

    let ephemeris_type = match line1.as_bytes()[L1_EPHEMERIS_TYPE] {
        b' ' => 0,
        b @ b'0'..=b'9' => b - b'0',
        _ => return Err(ParseError::NonFiniteField { field: "ephemeris_type" }),
    };

    Ok(TleRecord {
        name: name.map(str::trim).filter(|n| !n.is_empty()).map(String::from),
        catalog_id,
        classification: line1.as_bytes()[L1_CLASSIFICATION] as char,
        intl_designator: line1[L1_INTL_DESIGNATOR].trim().to_string(),
        ephemeris_type,
        element_set_number: int_field(line1, L1_ELEMENT_SET, "element_set_number")?,
        epoch,
        mean_motion_dot: float_field(line1, L1_MEAN_MOTION_DOT, "mean_motion_dot")?,
        mean_motion_ddot: implied_decimal(&line1[L1_MEAN_MOTION_DDOT], "mean_motion_ddot")?,
        bstar: implied_decimal(&line1[L1_BSTAR], "bstar")?,
        inclination: float_field(line2, L2_INCLINATION, "inclination")?.to_radians(),
        raan: float_field(line2, L2_RAAN, "raan")?.to_radians(),
        eccentricity,
        arg_perigee: float_field(line2, L2_ARG_PERIGEE, "arg_perigee")?.to_radians(),
        mean_anomaly: float_field(line2, L2_MEAN_ANOMALY, "mean_anomaly")?.to_radians(),
        mean_motion,
        rev_num: int_field(line2, L2_REV_NUM, "rev_num")?,
        line1: line1.to_string(),
        line2: line2.to_string(),
    })
}

fn validate_line(number: u8, line: &str) -> Result<&str, ParseError> {
    let line = line.trim_end();
    if !line.is_ascii() || line.len() != TLE_LINE_LEN {
        return Err(ParseError::MalformedLength {
            line: number,
            len: line.chars().count(),
        });
    }

    let first = line.as_bytes()[0] as char;
    if first.to_digit(10) != Some(number as u32) {
        return Err(ParseError::WrongLineNumber {
            line: number,
            found: first,
        });
    }

    if !verify_checksum(line) {
        return Err(ParseError::ChecksumMismatch {
            line: number,
            expected: checksum(line),
            found: line.as_bytes()[CHECKSUM_COL] as char,
        });
    }

    Ok(line)
}

fn parse_catalog(field: &str) -> Result<u32, ParseError> {
    let field = field.trim();
    let err = || ParseError::NonFiniteField { field: "catalog_id" };
    let mut chars = field.chars();
    let first = chars.next().ok_or_else(err)?;

    // Alpha-5: a leading letter (I and O excluded) extends the range past 99999.
    if first.is_ascii_uppercase() {
        let prefix = alpha5_value(first).ok_or_else(err)?;
        let rest: u32 = chars.as_str().parse().map_err(|_| err())?;
        return Ok(prefix * 10_000 + rest);
    }

    field.parse().map_err(|_| err())
}

fn alpha5_value(c: char) -> Option<u32> {
    let offset = match c {
        'A'..='H' => c as u32 - 'A' as u32,
        'J'..='N' => c as u32 - 'A' as u32 - 1,
        'P'..='Z' => c as u32 - 'A' as u32 - 2,
        _ => return None,
    };
    Some(10 + offset)
}

fn parse_epoch(year: &str, day: &str) -> Result<DateTime<Utc>, ParseError> {
    let err = ParseError::NonFiniteField { field: "epoch" };
    let yy: i32 = year.trim().parse().map_err(|_| err.clone())?;
    let day: f64 = day.trim().parse().map_err(|_| err.clone())?;
    if !day.is_finite() || !(1.0..367.0).contains(&day) {
        return Err(err);
    }

    let year = if yy < 57 { 2000 + yy } else { 1900 + yy };
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| err.clone())?;
    let offset = Duration::microseconds(((day - 1.0) * 86_400_000_000.0).round() as i64);
    Ok((jan1 + offset).and_utc())
}

fn float_field(line: &str, range: Range<usize>, field: &'static str) -> Result<f64, ParseError> {
    finite(line[range].trim().parse().ok(), field)
}

fn finite(value: Option<f64>, field: &'static str) -> Result<f64, ParseError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(ParseError::NonFiniteField { field })
}

fn int_field(line: &str, range: Range<usize>, field: &'static str) -> Result<u32, ParseError> {
    let raw = line[range].trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| ParseError::NonFiniteField { field })
}

/// Decode the `±MMMMM±E` notation, i.e. `±0.MMMMM × 10^±E`.
fn implied_decimal(raw: &str, field: &'static str) -> Result<f64, ParseError> {
    let err = || ParseError::NonFiniteField { field };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    if raw.len() < 3 {
        return Err(err());
    }

    let (mantissa, exponent) = raw.split_at(raw.len() - 2);
    let (sign, digits) = match mantissa.as_bytes()[0] {
        b'-' => (-1.0, &mantissa[1..]),
        b'+' => (1.0, &mantissa[1..]),
        _ => (1.0, mantissa),
    };
    let mantissa: f64 = format!("0.{}", digits.trim())
        .parse()
        .map_err(|_| err())?;
    let exponent: i32 = exponent.parse().map_err(|_| err())?;

    let value = sign * mantissa * 10f64.powi(exponent);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use crate::testing::{fix_checksum, ISS_L1, ISS_L2};
    use rstest::rstest;

    #[test]
    fn parses_iss() {
        let record = parse_tle(Some("ISS (ZARYA)"), ISS_L1, ISS_L2).unwrap();
        assert_eq!(record.catalog_id, 25544);
        assert_eq!(record.name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(record.classification, 'U');
        assert_eq!(record.intl_designator, "98067A");
        assert_eq!(record.ephemeris_type, 0);
        assert_eq!(record.element_set_number, 999);
        assert_eq!(record.rev_num, 38071);
        assert!((record.mean_motion - 15.50001033).abs() < 1e-9);
        assert!((record.eccentricity - 0.0005032).abs() < 1e-12);
        assert!((record.inclination.to_degrees() - 51.6422).abs() < 1e-9);
        assert!((record.bstar - 0.27247e-3).abs() < 1e-12);
        assert!((record.mean_motion_dot - 0.00015130).abs() < 1e-12);
        assert_eq!(record.mean_motion_ddot, 0.0);
    }

    #[test]
    fn epoch_is_fractional_day_of_year() {
        let record = parse_tle(None, ISS_L1, ISS_L2).unwrap();
        // Day 28.71505935 of 2023 is 28 January, 17:09:41.128 UTC.
        assert_eq!(record.epoch.year(), 2023);
        assert_eq!(record.epoch.month(), 1);
        assert_eq!(record.epoch.day(), 28);
        assert_eq!(record.epoch.hour(), 17);
        assert_eq!(record.epoch.minute(), 9);
        assert_eq!(record.epoch.second(), 41);
    }

    #[rstest]
    #[case("56", 2056)]
    #[case("57", 1957)]
    #[case("99", 1999)]
    #[case("00", 2000)]
    fn two_digit_year_pivot(#[case] yy: &str, #[case] year: i32) {
        let line1 = fix_checksum(&format!("{}{}{}", &ISS_L1[..18], yy, &ISS_L1[20..]));
        let record = parse_tle(None, &line1, ISS_L2).unwrap();
        assert_eq!(record.epoch.year(), year);
    }

    #[rstest]
    #[case("00005", 5)]
    #[case("25544", 25544)]
    #[case("99999", 99999)]
    #[case("A0000", 100000)]
    #[case("J1234", 181234)]
    #[case("Z9999", 339999)]
    fn catalog_id_from_columns_3_to_7(#[case] field: &str, #[case] expected: u32) {
        let line1 = fix_checksum(&format!("1 {}{}", field, &ISS_L1[7..]));
        let line2 = fix_checksum(&format!("2 {}{}", field, &ISS_L2[7..]));
        let record = parse_tle(None, &line1, &line2).unwrap();
        assert_eq!(record.catalog_id, expected);
    }

    #[test]
    fn rejects_short_line() {
        let err = parse_tle(None, &ISS_L1[..68], ISS_L2).unwrap_err();
        assert_eq!(err, ParseError::MalformedLength { line: 1, len: 68 });
    }

    #[test]
    fn rejects_long_line() {
        let long = format!("{}0", ISS_L2);
        let err = parse_tle(None, ISS_L1, &long).unwrap_err();
        assert_eq!(err, ParseError::MalformedLength { line: 2, len: 70 });
    }

    #[test]
    fn tolerates_trailing_carriage_return() {
        let line1 = format!("{}\r", ISS_L1);
        assert!(parse_tle(None, &line1, ISS_L2).is_ok());
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let bad = format!("{}5", &ISS_L1[..68]);
        let err = parse_tle(None, &bad, ISS_L2).unwrap_err();
        assert_eq!(
            err,
            ParseError::ChecksumMismatch {
                line: 1,
                expected: 4,
                found: '5'
            }
        );
    }

    #[test]
    fn checksum_rejects_exactly_wrong_digits() {
        for digit in 0..10u8 {
            let line = format!("{}{}", &ISS_L2[..68], digit);
            let result = parse_tle(None, ISS_L1, &line);
            assert_eq!(result.is_ok(), digit == checksum(ISS_L2), "digit {digit}");
        }
    }

    #[test]
    fn rejects_swapped_lines() {
        let err = parse_tle(None, ISS_L2, ISS_L1).unwrap_err();
        assert_eq!(err, ParseError::WrongLineNumber { line: 1, found: '2' });
    }

    #[test]
    fn rejects_catalog_mismatch() {
        let line2 = fix_checksum(&format!("2 25545{}", &ISS_L2[7..]));
        let err = parse_tle(None, ISS_L1, &line2).unwrap_err();
        assert_eq!(
            err,
            ParseError::CatalogMismatch {
                line1: 25544,
                line2: 25545
            }
        );
    }

    #[test]
    fn rejects_zero_mean_motion() {
        let line2 = fix_checksum(&format!("{} 0.00000000{}", &ISS_L2[..52], &ISS_L2[63..]));
        let err = parse_tle(None, ISS_L1, &line2).unwrap_err();
        assert_eq!(err, ParseError::NonPositiveMeanMotion(0.0));
    }

    #[test]
    fn rejects_non_numeric_mean_motion() {
        let line2 = fix_checksum(&format!("{}15.5000X033{}", &ISS_L2[..52], &ISS_L2[63..]));
        let err = parse_tle(None, ISS_L1, &line2).unwrap_err();
        assert_eq!(err, ParseError::NonFiniteField { field: "mean_motion" });
    }

    #[rstest]
    #[case(" 27247-3", 0.27247e-3)]
    #[case("-11606-4", -0.11606e-4)]
    #[case(" 00000+0", 0.0)]
    #[case(" 12345+1", 1.2345)]
    fn implied_decimal_notation(#[case] raw: &str, #[case] expected: f64) {
        let value = implied_decimal(raw, "bstar").unwrap();
        assert!((value - expected).abs() < 1e-15, "{raw} -> {value}");
    }
}
