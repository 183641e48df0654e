use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::tle::{ParseError, TleLines};

/// Values upstream catalogs use in place of a missing field.
const SENTINELS: &[&str] = &["unknown", "n/a", "none", "null", "tbd", "-999"];

/// One object as delivered by the upstream catalog feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RawSatellite {
    #[serde(default, deserialize_with = "deserialize_catalog_id")]
    pub norad_cat_id: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub object_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub tle_line1: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub tle_line2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub object_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub launch_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub site: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub decay_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub rcs_size: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub country_code: Option<String>,
    /// Set when the upstream element could not be read as an object at all.
    #[serde(skip)]
    pub(crate) invalid: Option<String>,
}

impl RawSatellite {
    pub fn from_tle(lines: TleLines) -> Self {
        Self {
            object_name: lines.name,
            tle_line1: Some(lines.line1),
            tle_line2: Some(lines.line2),
            ..Self::default()
        }
    }

    /// Convert one element of an upstream JSON array. Elements that are not
    /// usable objects are kept and fail at the parse stage.
    pub fn from_json(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| Self {
            invalid: Some(e.to_string()),
            ..Self::default()
        })
    }

    /// Read an upstream JSON array. Only a malformed document is an error;
    /// bad elements are carried as failing records.
    pub fn parse_json_batch(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Ok(values.into_iter().map(Self::from_json).collect())
    }

    pub fn tle_lines(&self) -> Result<TleLines, ParseError> {
        if let Some(reason) = &self.invalid {
            return Err(ParseError::InvalidRecord(reason.clone()));
        }
        let line1 = present(&self.tle_line1).ok_or(ParseError::MissingLine(1))?;
        let line2 = present(&self.tle_line2).ok_or(ParseError::MissingLine(2))?;
        Ok(TleLines {
            name: clean(&self.object_name),
            line1,
            line2,
        })
    }
}

/// Validated side information carried next to the element set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatelliteMetadata {
    pub norad_cat_id: Option<u32>,
    pub name: Option<String>,
    pub object_type: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub site: Option<String>,
    pub decay_date: Option<NaiveDate>,
    pub rcs_size: Option<String>,
    pub country_code: Option<String>,
}

impl From<&RawSatellite> for SatelliteMetadata {
    fn from(raw: &RawSatellite) -> Self {
        Self {
            norad_cat_id: raw.norad_cat_id,
            name: clean(&raw.object_name),
            object_type: clean(&raw.object_type),
            launch_date: parse_date(&raw.launch_date),
            site: clean(&raw.site),
            decay_date: parse_date(&raw.decay_date),
            rcs_size: clean(&raw.rcs_size),
            country_code: clean(&raw.country_code),
        }
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn clean(value: &Option<String>) -> Option<String> {
    let value = value.as_deref()?.trim();
    if value.is_empty() || SENTINELS.iter().any(|s| value.eq_ignore_ascii_case(s)) {
        None
    } else {
        Some(value.to_string())
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Accepts `YYYY-MM-DD` (or `/`, `.` separated), optionally followed by a time part.
fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    let value = clean(value)?;
    let date = value.get(..10).unwrap_or(&value);
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok());
    if parsed.is_none() {
        log::debug!("ignoring unrecognised date {:?}", value);
    }
    parsed
}

/// Any JSON scalar a catalog export may put in a field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_catalog_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    // Negative sentinels, fractions and anything unparseable carry no id.
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Integer(n)) => u32::try_from(n).ok(),
        Some(Scalar::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Integer(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(f.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
        Some(Scalar::Text(s)) => Some(s),
        Some(Scalar::Other(_)) | None => None,
    })
}
