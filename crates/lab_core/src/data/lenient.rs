//! Lenient numeric and text fields.
//!
//! The editor lets a designer type anything into a number box, so numeric
//! fields accept numbers, numeric strings, or garbage. Garbage reads as an
//! absent value and the engine applies its fallback at the point of use.
//! Integer fields (level, tile coordinates, grid size) truncate toward zero
//! and fall back to their default when absent or out of range. Tag fields
//! (weapon type, side) only read strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Read an optional number, falling back when absent or not finite.
#[must_use]
pub fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serialize an optional number as-is.
pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.serialize(serializer)
}

/// Deserialize any value into an optional finite number.
///
/// Use together with `#[serde(default)]` so a missing key is also `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(v) => Some(v),
        RawNumber::Text(text) => text.trim().parse::<f64>().ok(),
        RawNumber::Other(_) => None,
    };
    Ok(number.filter(|v| v.is_finite()))
}

/// Truncate a finite number into `T`, `None` when it does not fit.
#[allow(clippy::cast_possible_truncation)]
fn to_integer<T: TryFrom<i64>>(value: Option<f64>) -> Option<T> {
    // `as` saturates, so only the target range check can fail.
    let whole = value?.trunc() as i64;
    T::try_from(whole).ok()
}

/// Deserialize any value into an integer, `T::default()` on garbage.
///
/// For `#[serde(deserialize_with = ...)]` on integer fields.
pub fn integer_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    Ok(to_integer(deserialize(deserializer)?).unwrap_or_default())
}

/// Deserialize any value into an integer, `fallback` on garbage.
pub fn integer_or<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Ok(to_integer(deserialize(deserializer)?).unwrap_or(fallback))
}

/// Deserialize any value into an optional string. Non-strings are `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawText::deserialize(deserializer)? {
        RawText::Text(text) => Some(text),
        RawText::Other(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, with = "super")]
        value: Option<f64>,
    }

    fn read(json: &str) -> Option<f64> {
        serde_json::from_str::<Holder>(json).unwrap().value
    }

    #[derive(Deserialize)]
    struct Tile {
        #[serde(default, deserialize_with = "integer_or_default")]
        x: i32,
        #[serde(default, deserialize_with = "integer_or_default")]
        width: u32,
        #[serde(default, deserialize_with = "text")]
        tag: Option<String>,
    }

    fn tile(json: &str) -> (i32, u32, Option<String>) {
        let tile = serde_json::from_str::<Tile>(json).unwrap();
        (tile.x, tile.width, tile.tag)
    }

    #[test]
    fn test_accepts_numbers_and_numeric_text() {
        assert_eq!(read(r#"{"value": 7}"#), Some(7.0));
        assert_eq!(read(r#"{"value": -2.5}"#), Some(-2.5));
        assert_eq!(read(r#"{"value": " 12 "}"#), Some(12.0));
    }

    #[test]
    fn test_garbage_reads_as_absent() {
        assert_eq!(read(r#"{"value": null}"#), None);
        assert_eq!(read(r#"{"value": "abc"}"#), None);
        assert_eq!(read(r#"{"value": true}"#), None);
        assert_eq!(read(r#"{"value": {"nested": 1}}"#), None);
        assert_eq!(read(r#"{"value": "NaN"}"#), None);
        assert_eq!(read("{}"), None);
    }

    #[test]
    fn test_integers_truncate_or_default() {
        assert_eq!(tile(r#"{"x": 3, "width": 10}"#), (3, 10, None));
        assert_eq!(tile(r#"{"x": "3", "width": " 7 "}"#), (3, 7, None));
        assert_eq!(tile(r#"{"x": 2.5, "width": 9.9}"#), (2, 9, None));
        assert_eq!(tile(r#"{"x": -2.5}"#).0, -2);
        assert_eq!(tile(r#"{"x": null, "width": "wide"}"#), (0, 0, None));
        assert_eq!(tile(r#"{"width": -4}"#).1, 0);
        assert_eq!(tile(r#"{"x": 1e300}"#).0, 0);
        assert_eq!(tile("{}"), (0, 0, None));
    }

    #[test]
    fn test_text_ignores_non_strings() {
        assert_eq!(tile(r#"{"tag": "magic"}"#).2.as_deref(), Some("magic"));
        assert_eq!(tile(r#"{"tag": null}"#).2, None);
        assert_eq!(tile(r#"{"tag": 3}"#).2, None);
        assert_eq!(tile(r#"{"tag": ["magic"]}"#).2, None);
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(Some(4.0), 0.0), 4.0);
        assert_eq!(finite_or(None, 3.0), 3.0);
        assert_eq!(finite_or(Some(f64::NAN), 1.0), 1.0);
        assert_eq!(finite_or(Some(f64::INFINITY), 0.0), 0.0);
    }
}
