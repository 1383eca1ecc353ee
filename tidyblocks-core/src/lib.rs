//! TidyBlocks Core - Fundamental types
//!
//! This crate provides the types shared by every node family:
//! - `Family`: which top-level codec a node belongs to
//! - `Number`: a JSON number that keeps its integer/float form
//! - `DateTime`: a millisecond-precision UTC instant
//! - `Literal`: scalar payload of `constant` expressions
//! - `MalformedEncoding`: the single decode error

mod datetime;
mod error;
mod family;
mod literal;
mod number;

pub use datetime::{DateTime, DateTimeError};
pub use error::{codes, MalformedEncoding};
pub use family::Family;
pub use literal::{json_type_name, Literal, LiteralError, DATE_TAG};
pub use number::{Number, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{DateTime, Family, Literal, MalformedEncoding, Number};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod number_tests {
        use super::*;

        #[test]
        fn test_integer_stays_integer() {
            let n = Number::from(123);
            assert!(n.is_integer());
            assert_eq!(n.to_json(), json!(123));
        }

        #[test]
        fn test_float_stays_float() {
            let n = Number::try_from(0.03).unwrap();
            assert!(!n.is_integer());
            assert_eq!(n.to_json(), json!(0.03));
            assert_eq!(n.as_f64(), 0.03);
        }

        #[test]
        fn test_rejects_non_finite() {
            assert!(matches!(Number::try_from(f64::NAN), Err(NumberError::NotFinite(_))));
            assert!(Number::try_from(f64::INFINITY).is_err());
        }

        #[test]
        fn test_integer_and_float_differ() {
            let int = Number::from(1);
            let float = Number::try_from(1.0).unwrap();
            assert_ne!(int, float);
            assert_eq!(int.as_f64(), float.as_f64());
        }
    }

    mod datetime_tests {
        use super::*;

        #[test]
        fn test_components() {
            let dt = DateTime::from_ymd_hms_milli(1983, 12, 2, 7, 55, 19, 0).unwrap();
            assert_eq!(dt.year(), 1983);
            assert_eq!(dt.month(), 12);
            assert_eq!(dt.day(), 2);
            assert_eq!(dt.hours(), 7);
            assert_eq!(dt.minutes(), 55);
            assert_eq!(dt.seconds(), 19);
            assert_eq!(dt.millisecond(), 0);
            // 1983-12-02 was a Friday
            assert_eq!(dt.weekday(), 5);
        }

        #[test]
        fn test_epoch() {
            let dt = DateTime::from_unix_millis(0).unwrap();
            assert_eq!(dt.to_iso_string(), "1970-01-01T00:00:00.000Z");
            assert_eq!(dt.weekday(), 4);
        }

        #[test]
        fn test_iso_round_trip() {
            let dt = DateTime::from_ymd_hms_milli(2024, 2, 29, 23, 59, 59, 999).unwrap();
            let text = dt.to_iso_string();
            assert_eq!(text, "2024-02-29T23:59:59.999Z");
            assert_eq!(DateTime::parse_iso(&text).unwrap(), dt);
        }

        #[test]
        fn test_pre_epoch() {
            let dt = DateTime::from_unix_millis(-1).unwrap();
            assert_eq!(dt.to_iso_string(), "1969-12-31T23:59:59.999Z");
            assert_eq!(DateTime::parse_iso("1969-12-31T23:59:59.999Z").unwrap(), dt);
        }

        #[test]
        fn test_expanded_years() {
            let dt = DateTime::from_ymd_hms_milli(-44, 3, 15, 12, 0, 0, 0).unwrap();
            let text = dt.to_iso_string();
            assert_eq!(text, "-000044-03-15T12:00:00.000Z");
            assert_eq!(DateTime::parse_iso(&text).unwrap(), dt);

            let far = DateTime::from_ymd_hms_milli(12345, 1, 1, 0, 0, 0, 0).unwrap();
            assert_eq!(far.to_iso_string(), "+012345-01-01T00:00:00.000Z");
        }

        #[test]
        fn test_parse_is_strict() {
            assert!(DateTime::parse_iso("1983-12-02").is_err());
            assert!(DateTime::parse_iso("1983-12-02T07:55:19Z").is_err());
            assert!(DateTime::parse_iso("1983-12-02T07:55:19.000+01:00").is_err());
            assert!(DateTime::parse_iso("1983-13-02T07:55:19.000Z").is_err());
            assert!(DateTime::parse_iso("1983-02-30T07:55:19.000Z").is_err());
            assert!(DateTime::parse_iso("+001983-12-02T07:55:19.000Z").is_err());
            assert!(DateTime::parse_iso("1983-12-02T07:55:19.000Zé").is_err());
        }

        #[test]
        fn test_range() {
            assert!(DateTime::from_unix_millis(DateTime::MAX_MILLIS).is_ok());
            assert!(matches!(
                DateTime::from_unix_millis(DateTime::MAX_MILLIS + 1),
                Err(DateTimeError::OutOfRange(_))
            ));
        }

        #[test]
        fn test_extreme_years_are_out_of_range() {
            for year in [i32::MIN, i32::MAX, -275_761, 275_761] {
                for month in [1, 12] {
                    assert!(
                        matches!(
                            DateTime::from_ymd_hms_milli(year, month, 1, 0, 0, 0, 0),
                            Err(DateTimeError::OutOfRange(_))
                        ),
                        "{}-{}",
                        year,
                        month
                    );
                }
            }
            assert!(DateTime::from_ymd_hms_milli(275_760, 9, 13, 0, 0, 0, 0).is_ok());
            assert!(DateTime::from_ymd_hms_milli(-271_821, 4, 20, 0, 0, 0, 0).is_ok());
        }

        #[test]
        fn test_invalid_components() {
            assert_eq!(
                DateTime::from_ymd_hms_milli(2023, 2, 29, 0, 0, 0, 0),
                Err(DateTimeError::InvalidDay { day: 29, month: 2, year: 2023 })
            );
            assert_eq!(
                DateTime::from_ymd_hms_milli(2023, 1, 1, 24, 0, 0, 0),
                Err(DateTimeError::InvalidHour(24))
            );
        }
    }

    mod literal_tests {
        use super::*;

        #[test]
        fn test_scalars_to_json() {
            assert_eq!(Literal::from(123).to_json(), json!(123));
            assert_eq!(Literal::from("orange").to_json(), json!("orange"));
            assert_eq!(Literal::from(false).to_json(), json!(false));
        }

        #[test]
        fn test_datetime_is_tagged() {
            let dt = DateTime::from_ymd_hms_milli(1983, 12, 2, 7, 55, 19, 0).unwrap();
            let encoded = Literal::from(dt).to_json();
            assert_eq!(encoded, json!({"@date": "1983-12-02T07:55:19.000Z"}));
            assert_eq!(Literal::from_json(&encoded).unwrap(), Literal::DateTime(dt));
        }

        #[test]
        fn test_date_text_stays_text() {
            let text = json!("1983-12-02T07:55:19.000Z");
            assert!(matches!(Literal::from_json(&text).unwrap(), Literal::Text(_)));
        }

        #[test]
        fn test_rejects_non_scalars() {
            assert!(matches!(Literal::from_json(&json!(null)), Err(LiteralError::NotScalar("null"))));
            assert!(Literal::from_json(&json!([1])).is_err());
            assert!(Literal::from_json(&json!({"other": 1})).is_err());
            assert!(Literal::from_json(&json!({"@date": "yesterday"})).is_err());
            assert!(Literal::from_json(&json!({"@date": 0})).is_err());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_display_includes_location() {
            let err = MalformedEncoding::unknown_variant(Family::Stage, "@transform", "whoops")
                .with_path("/1/2");
            let text = err.to_string();
            assert!(text.contains("UNKNOWN_VARIANT"), "{}", text);
            assert!(text.contains("whoops"), "{}", text);
            assert!(text.contains("/1/2"), "{}", text);
        }

        #[test]
        fn test_serializes_for_tooling() {
            let err = MalformedEncoding::unknown_kind(Family::Expression, "@whoops", &["@nullary"]);
            let value = serde_json::to_value(&err).unwrap();
            assert_eq!(value["code"], json!(codes::UNKNOWN_KIND));
            assert_eq!(value["family"], json!("expression"));
            assert_eq!(value["kind"], json!("@whoops"));
        }
    }
}
