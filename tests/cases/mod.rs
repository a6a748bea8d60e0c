//! Shared harness for the end-to-end expression tests.
//!
//! Every case evaluates against the same fixture environment:
//!
//! | name    | value                                  |
//! |---------|----------------------------------------|
//! | `price` | decimal `12.50`                        |
//! | `qty`   | 32-bit integer `3`                     |
//! | `name`  | `'Ada'`                                |
//! | `tags`  | `('red', 'green')`                     |
//! | `start` | expression `#1/15/2024 09:00:00#`      |
//! | `Twice` | function doubling its argument         |

#![allow(dead_code)]

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use reckon::numeric::{self, MathOptions};
use reckon::{Engine, Environment, Error, EvalError, ExpressionOptions, Value};
use rust_decimal::Decimal;

static ENGINE: Lazy<Engine> = Lazy::new(Engine::new);

macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        options: $options:expr,
        $check:ident: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let options = $options;
            let result = crate::cases::evaluate($input, options);
            crate::cases::$check($input, result, $expected);
        }
    };
    (
        name: $name:ident,
        input: $input:expr,
        $check:ident: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let options = reckon::ExpressionOptions::empty();
            let result = crate::cases::evaluate($input, options);
            crate::cases::$check($input, result, $expected);
        }
    };
}

pub fn environment(options: ExpressionOptions) -> Environment {
    let start = ENGINE
        .compile("#1/15/2024 09:00:00#", Environment::new())
        .expect("fixture date parses");

    Environment::new()
        .with_options(options)
        .with_parameter("price", Decimal::new(1250, 2))
        .with_parameter("qty", 3)
        .with_parameter("name", "Ada")
        .with_parameter("tags", vec![Value::from("red"), Value::from("green")])
        .with_expression_parameter("start", start)
        .with_function("Twice", |call| {
            let env = call.environment;
            let value = call.arg(0)?;
            numeric::multiply(
                &value,
                &Value::from(2),
                &MathOptions::new(env.options(), env.culture()),
            )
        })
}

pub fn evaluate(input: &str, options: ExpressionOptions) -> Result<Value, Error> {
    ENGINE.evaluate(input, &environment(options))
}

/// Numeric results compare by value, whatever their representation.
pub fn value(input: &str, result: Result<Value, Error>, expected: impl Into<Value>) {
    match result {
        Ok(actual) => assert_eq!(actual, expected.into(), "{input}"),
        Err(e) => panic!("{input} failed: {e}"),
    }
}

pub fn display(input: &str, result: Result<Value, Error>, expected: &str) {
    match result {
        Ok(actual) => assert_eq!(actual.to_string(), expected, "{input}"),
        Err(e) => panic!("{input} failed: {e}"),
    }
}

pub fn error(input: &str, result: Result<Value, Error>, expected: EvalError) {
    match result {
        Ok(actual) => panic!("{input} unexpectedly produced {actual:?}"),
        Err(e) => assert_eq!(e, Error::Runtime(expected), "{input}"),
    }
}

pub fn type_name(input: &str, result: Result<Value, Error>, expected: &str) {
    match result {
        Ok(actual) => assert_eq!(actual.type_name(), expected, "{input}"),
        Err(e) => panic!("{input} failed: {e}"),
    }
}
