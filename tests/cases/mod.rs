#![allow(dead_code)]

use ceval::{Environment, Error, Language, Value, eval};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

pub fn timestamp(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

/// Bindings shared by every case.
pub static ENVIRONMENT: Lazy<Environment> = Lazy::new(|| {
    Environment::new()
        .with("x", 1)
        .with("rate", 0.5)
        .with("arr", vec![1i64, 2, 3, 4])
        .with("weights", vec![0.25, 0.75])
        .with("flags", vec![true, false])
        .with("flag", false)
        .with("date1", timestamp(2024, 1, 15))
        .with("date2", timestamp(2024, 3, 1))
});

pub fn evaluate(input: &str) -> Result<Value, Error> {
    eval(input, &ENVIRONMENT, Language::C)
}

/// Declares one evaluation test.
///
/// - `value:` the expected result, anything convertible into a `Value`.
/// - `eval_error:` a pattern over `EvalErrorKind`.
/// - `parse_error:` a pattern over `ParseErrorKind`.
#[macro_export]
macro_rules! test_case {
    ($name:ident, input: $input:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            let expected: ::ceval::Value = ($value).into();
            let result = $crate::cases::evaluate($input);
            pretty_assertions::assert_eq!(
                result.map_err(|e| e.to_string()),
                Ok(expected),
                "input: {}",
                $input
            );
        }
    };
    ($name:ident, input: $input:expr, eval_error: $pattern:pat $(,)?) => {
        #[test]
        fn $name() {
            #[allow(unused_imports)]
            use ::ceval::{EvalErrorKind::*, ValueType};
            match $crate::cases::evaluate($input) {
                Err(::ceval::Error::Eval { error, .. }) => assert!(
                    matches!(error.kind, $pattern),
                    "input: {}\nunexpected error: {:?}",
                    $input,
                    error
                ),
                other => panic!("input: {}\nexpected an evaluation error, got {:?}", $input, other),
            }
        }
    };
    ($name:ident, input: $input:expr, parse_error: $pattern:pat $(,)?) => {
        #[test]
        fn $name() {
            #[allow(unused_imports)]
            use ::ceval::ParseErrorKind::*;
            match $crate::cases::evaluate($input) {
                Err(::ceval::Error::Parse(error)) => assert!(
                    matches!(error.kind, $pattern),
                    "input: {}\nunexpected error: {:?}",
                    $input,
                    error
                ),
                other => panic!("input: {}\nexpected a parse error, got {:?}", $input, other),
            }
        }
    };
}
