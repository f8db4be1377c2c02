//! Text-to-value conversion with fixed defaults.
//!
//! Every function here is total: unparsable or absent input maps to a
//! documented default instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// A coerced point in time, or an explicit marker for unparsable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timestamp {
    /// Parsed instant, interpreted as UTC when the source had no offset.
    Known(DateTime<Utc>),
    /// Source was absent or could not be parsed.
    Unknown,
}

impl Timestamp {
    /// Returns the instant when known.
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unknown => None,
        }
    }

    /// Returns whether the value is the unknown marker.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns an RFC 3339 rendering for known values.
    #[must_use]
    pub fn to_rfc3339(&self) -> Option<String> {
        self.as_datetime()
            .map(|value| value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_rfc3339() {
            Some(rendered) => serializer.serialize_str(rendered.as_str()),
            None => serializer.serialize_none(),
        }
    }
}

/// Parses an integer count; decimal text truncates toward zero. Defaults to 0.
#[must_use]
pub fn coerce_integer(raw: Option<&str>) -> i64 {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return 0;
    };

    if let Ok(value) = text.parse::<i64>() {
        return value;
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

/// Parses a finite floating-point value. Defaults to 0.0.
#[must_use]
pub fn coerce_float(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// True iff the text is `true` in any letter case.
#[must_use]
pub fn coerce_bool(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|text| text.eq_ignore_ascii_case("true"))
}

/// Parses a timestamp in any of the accepted export formats.
#[must_use]
pub fn coerce_timestamp(raw: Option<&str>) -> Timestamp {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Timestamp::Unknown;
    };

    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Timestamp::Known(value.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Timestamp::Known(value.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(value) = NaiveDate::parse_from_str(text, format)
            && let Some(midnight) = value.and_hms_opt(0, 0, 0)
        {
            return Timestamp::Known(midnight.and_utc());
        }
    }

    Timestamp::Unknown
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::{Timestamp, coerce_bool, coerce_float, coerce_integer, coerce_timestamp};

    #[test]
    fn integers_accept_integral_and_decimal_text() {
        assert_eq!(coerce_integer(Some("42")), 42);
        assert_eq!(coerce_integer(Some(" 7 ")), 7);
        assert_eq!(coerce_integer(Some("3.0")), 3);
        assert_eq!(coerce_integer(Some("3.9")), 3);
        assert_eq!(coerce_integer(Some("-2")), -2);
    }

    #[test]
    fn integers_default_to_zero() {
        assert_eq!(coerce_integer(None), 0);
        assert_eq!(coerce_integer(Some("")), 0);
        assert_eq!(coerce_integer(Some("n/a")), 0);
        assert_eq!(coerce_integer(Some("NaN")), 0);
    }

    #[test]
    fn floats_default_to_zero() {
        assert_eq!(coerce_float(Some("12.5")), 12.5);
        assert_eq!(coerce_float(Some("abc")), 0.0);
        assert_eq!(coerce_float(Some("inf")), 0.0);
        assert_eq!(coerce_float(None), 0.0);
    }

    #[test]
    fn booleans_only_accept_true() {
        assert!(coerce_bool(Some("true")));
        assert!(coerce_bool(Some("TRUE")));
        assert!(coerce_bool(Some("True")));
        assert!(!coerce_bool(Some("1")));
        assert!(!coerce_bool(Some("yes")));
        assert!(!coerce_bool(Some("false")));
        assert!(!coerce_bool(None));
    }

    #[test]
    fn timestamps_parse_export_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).single();
        assert!(expected.is_some());
        let expected = Timestamp::Known(expected.unwrap_or_else(|| unreachable!()));

        assert_eq!(coerce_timestamp(Some("2024-03-05T14:30:00Z")), expected);
        assert_eq!(coerce_timestamp(Some("2024-03-05 14:30:00")), expected);
        assert_eq!(coerce_timestamp(Some("03/05/2024 14:30")), expected);
        assert_eq!(coerce_timestamp(Some("03/05/2024 2:30 PM")), expected);
    }

    #[test]
    fn plain_dates_map_to_midnight() {
        let parsed = coerce_timestamp(Some("2023-12-31"));
        assert_eq!(
            parsed.to_rfc3339().as_deref(),
            Some("2023-12-31T00:00:00Z")
        );
    }

    #[test]
    fn unparsable_timestamps_are_unknown() {
        assert_eq!(coerce_timestamp(Some("yesterday")), Timestamp::Unknown);
        assert_eq!(coerce_timestamp(None), Timestamp::Unknown);
        assert!(coerce_timestamp(Some("13/45/2024")).is_unknown());
    }

    #[test]
    fn unknown_timestamps_serialize_as_null() {
        let encoded = serde_json::to_string(&Timestamp::Unknown);
        assert!(encoded.is_ok());
        assert_eq!(encoded.unwrap_or_default(), "null");
    }

    proptest! {
        #[test]
        fn integer_coercion_round_trips_rendered_values(value in any::<i64>()) {
            prop_assert_eq!(coerce_integer(Some(&value.to_string())), value);
        }

        #[test]
        fn coercion_never_panics_on_arbitrary_text(text in "\\PC{0,32}") {
            let _ = coerce_integer(Some(&text));
            let _ = coerce_float(Some(&text));
            let _ = coerce_bool(Some(&text));
            let _ = coerce_timestamp(Some(&text));
        }
    }
}
