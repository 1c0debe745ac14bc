//! MiniJinja filter registration.
//!
//! Two filters are exposed to templates:
//!
//! - `l2gal` - liters to gallons. The gallon flavor (imperial or US) is chosen
//!   once when the environment is built and never changes during a run.
//! - `arabic2roman` - integer to Roman numeral.
//!
//! The two filters fail differently on bad input. `l2gal` aborts the render;
//! `arabic2roman` logs a warning and substitutes [`NOT_A_NUMBER`] so the
//! render can continue.
//!
//! ```jinja
//! Tank: {{ capacity | l2gal | round(1) }} gal
//! Chapter {{ chapter | arabic2roman }}
//! ```

use std::num::{IntErrorKind, ParseFloatError};

use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, Value};

use crate::roman::{to_roman, OutOfRange};

/// Imperial gallons per liter.
pub const IMPERIAL_GALLONS_PER_LITER: f64 = 0.2199692;

/// US liquid gallons per liter.
pub const US_GALLONS_PER_LITER: f64 = 0.2641720;

/// Sentinel produced by `arabic2roman` for input that is not an integer.
pub const NOT_A_NUMBER: &str = "NaN";

/// Which gallon the `l2gal` filter converts to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GallonUnit {
    /// Imperial gallon (4.54609 L).
    #[default]
    Imperial,
    /// US liquid gallon (3.785411784 L).
    Us,
}

impl GallonUnit {
    /// Gallons per liter for this unit.
    pub fn per_liter(self) -> f64 {
        match self {
            GallonUnit::Imperial => IMPERIAL_GALLONS_PER_LITER,
            GallonUnit::Us => US_GALLONS_PER_LITER,
        }
    }

    /// Converts a textual liter amount to this unit.
    pub fn convert(self, text: &str) -> Result<f64, ParseFloatError> {
        Ok(text.trim().parse::<f64>()? * self.per_liter())
    }
}

/// Converts a textual liter amount to imperial gallons.
pub fn liters_to_imperial_gallons(text: &str) -> Result<f64, ParseFloatError> {
    GallonUnit::Imperial.convert(text)
}

/// Converts a textual liter amount to US gallons.
pub fn liters_to_us_gallons(text: &str) -> Result<f64, ParseFloatError> {
    GallonUnit::Us.convert(text)
}

/// Converts a template value to a Roman numeral.
///
/// Values that are not integers produce [`NOT_A_NUMBER`] after a warning is
/// logged. Integers outside the representable range are an error.
pub fn arabic_to_roman(value: &Value) -> Result<String, OutOfRange> {
    match integer_of(value) {
        Some(number) => number.and_then(to_roman),
        None => {
            tracing::warn!(value = %value, "Number needs to be an integer.");
            Ok(NOT_A_NUMBER.to_string())
        }
    }
}

/// Reads an integer out of a template value.
///
/// Strings are trimmed and parsed, floats truncate toward zero, booleans count
/// as 0 or 1. Integers too large for `i64` are out of range, not "not a
/// number".
fn integer_of(value: &Value) -> Option<Result<i64, OutOfRange>> {
    match value.kind() {
        ValueKind::String => match value.as_str()?.trim().parse::<i64>() {
            Ok(number) => Some(Ok(number)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Some(Err(OutOfRange(i64::MAX))),
                IntErrorKind::NegOverflow => Some(Err(OutOfRange(i64::MIN))),
                _ => None,
            },
        },
        ValueKind::Number => i64::try_from(value.clone())
            .ok()
            .or_else(|| {
                f64::try_from(value.clone())
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
            .map(Ok),
        ValueKind::Bool => Some(Ok(i64::from(value.is_true()))),
        _ => None,
    }
}

/// Text form of a value as the filters see it.
fn text_of(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Registers `l2gal` and `arabic2roman` on a MiniJinja environment.
///
/// # Arguments
///
/// * `env` - The MiniJinja environment to register filters on
/// * `unit` - The gallon flavor `l2gal` converts to
pub fn register_filters(env: &mut Environment<'static>, unit: GallonUnit) {
    env.add_filter("l2gal", move |value: Value| -> Result<f64, Error> {
        let text = text_of(&value);
        unit.convert(&text).map_err(|err| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("l2gal: cannot convert {:?} to a number", text),
            )
            .with_source(err)
        })
    });

    env.add_filter("arabic2roman", |value: Value| -> Result<String, Error> {
        arabic_to_roman(&value)
            .map_err(|err| Error::new(ErrorKind::InvalidOperation, format!("arabic2roman: {}", err)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn render(unit: GallonUnit, source: &'static str, value: Value) -> Result<String, Error> {
        let mut env = Environment::new();
        register_filters(&mut env, unit);
        env.add_template("test", source).unwrap();
        env.get_template("test")
            .unwrap()
            .render(minijinja::context! { value => value })
    }

    #[test]
    fn test_liters_to_gallons_values() {
        assert_eq!(liters_to_imperial_gallons("1").unwrap(), 0.2199692);
        assert_eq!(liters_to_us_gallons("1").unwrap(), 0.2641720);
        assert_eq!(liters_to_us_gallons(" 2.5 ").unwrap(), 2.5 * 0.2641720);
        assert!(liters_to_imperial_gallons("ten").is_err());
        assert!(liters_to_us_gallons("").is_err());
    }

    #[test]
    fn test_gallon_unit_default_is_imperial() {
        assert_eq!(GallonUnit::default(), GallonUnit::Imperial);
        assert_eq!(GallonUnit::Us.per_liter(), US_GALLONS_PER_LITER);
    }

    #[test]
    fn test_l2gal_filter_uses_selected_unit() {
        let imperial = render(GallonUnit::Imperial, "{{ value | l2gal | round(2) }}", Value::from("100"));
        assert_eq!(imperial.unwrap(), "22.0");

        let us = render(GallonUnit::Us, "{{ value | l2gal | round(2) }}", Value::from("100"));
        assert_eq!(us.unwrap(), "26.42");
    }

    #[test]
    fn test_l2gal_accepts_numbers() {
        let out = render(GallonUnit::Us, "{{ value | l2gal | round(2) }}", Value::from(10));
        assert_eq!(out.unwrap(), "2.64");
    }

    #[test]
    fn test_l2gal_rejects_non_numeric_input() {
        let err = render(GallonUnit::Imperial, "{{ value | l2gal }}", Value::from("lots")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(format!("{:#}", err).contains("lots"));
    }

    #[test]
    fn test_arabic_to_roman_soft_fails() {
        assert_eq!(arabic_to_roman(&Value::from("abc")).unwrap(), "NaN");
        assert_eq!(arabic_to_roman(&Value::from("3.5")).unwrap(), "NaN");
        assert_eq!(arabic_to_roman(&Value::from(())).unwrap(), "NaN");
    }

    #[test]
    fn test_arabic_to_roman_accepts_strings_and_numbers() {
        assert_eq!(arabic_to_roman(&Value::from(" 12 ")).unwrap(), "XII");
        assert_eq!(arabic_to_roman(&Value::from(2024)).unwrap(), "MMXXIV");
        assert_eq!(arabic_to_roman(&Value::from(7.9)).unwrap(), "VII");
        assert_eq!(arabic_to_roman(&Value::from(true)).unwrap(), "I");
    }

    #[test]
    fn test_arabic_to_roman_out_of_range_is_hard_error() {
        assert_eq!(arabic_to_roman(&Value::from("0")), Err(OutOfRange(0)));
        assert_eq!(arabic_to_roman(&Value::from(-3)), Err(OutOfRange(-3)));

        let err = render(GallonUnit::Imperial, "{{ value | arabic2roman }}", Value::from(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_arabic_to_roman_overflowing_integer_is_out_of_range() {
        assert_eq!(
            arabic_to_roman(&Value::from("99999999999999999999")),
            Err(OutOfRange(i64::MAX))
        );
        assert_eq!(
            arabic_to_roman(&Value::from("-99999999999999999999")),
            Err(OutOfRange(i64::MIN))
        );

        let err = render(
            GallonUnit::Imperial,
            "{{ value | arabic2roman }}",
            Value::from("99999999999999999999"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_arabic_to_roman_warns_on_soft_failure() {
        let captured = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(arabic_to_roman(&Value::from("XII")).unwrap(), "NaN");
        });
        let log = captured.contents();
        assert!(log.contains("WARN"), "log was: {log}");
        assert!(log.contains("Number needs to be an integer."), "log was: {log}");
    }

    #[test]
    fn test_arabic_to_roman_valid_input_logs_nothing() {
        let captured = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(arabic_to_roman(&Value::from("12")).unwrap(), "XII");
        });
        assert!(captured.contents().is_empty());
    }

    #[test]
    fn test_arabic2roman_filter_renders_nan_and_continues() {
        let out = render(
            GallonUnit::Imperial,
            "[{{ value | arabic2roman }}] [{{ 9 | arabic2roman }}]",
            Value::from("abc"),
        );
        assert_eq!(out.unwrap(), "[NaN] [IX]");
    }

    proptest! {
        #[test]
        fn us_gallons_match_multiplier(x in -1.0e9f64..1.0e9) {
            let text = x.to_string();
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(liters_to_us_gallons(&text).unwrap(), parsed * 0.2641720);
        }

        #[test]
        fn imperial_gallons_match_multiplier(x in -1.0e9f64..1.0e9) {
            let text = x.to_string();
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(liters_to_imperial_gallons(&text).unwrap(), parsed * 0.2199692);
        }
    }
}
