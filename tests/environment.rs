use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use reckon::{Engine, Environment, Error, EvalError, ExpressionOptions, Value};

#[test]
fn test_parameter_hook_claims_before_tables() {
    let engine = Engine::new();
    let env = Environment::new()
        .with_parameter("x", 1)
        .with_parameter_hook(|call| Ok((call.name == "x").then(|| Value::from(100))));

    assert_eq!(engine.evaluate("x + 1", &env).unwrap(), Value::from(101));
}

#[test]
fn test_unclaimed_hook_falls_through() {
    let engine = Engine::new();
    let env = Environment::new()
        .with_parameter("x", 1)
        .with_parameter_hook(|_| Ok(None))
        .with_function_hook(|_| Ok(None));

    assert_eq!(engine.evaluate("Abs(-x)", &env).unwrap(), Value::from(1));
}

#[test]
fn test_function_hook_overrides_builtins() {
    let engine = Engine::new();
    let env = Environment::new().with_function_hook(|call| {
        if call.name == "Abs" {
            return Ok(Some(Value::from("hooked")));
        }
        Ok(None)
    });

    assert_eq!(engine.evaluate("Abs(-1)", &env).unwrap(), Value::from("hooked"));
    assert_eq!(engine.evaluate("Sign(-4)", &env).unwrap(), Value::from(-1));
}

#[test]
fn test_registered_function_shadows_builtin() {
    let engine = Engine::new();
    let env = Environment::new().with_function("Max", |_| Ok(Value::from(0)));

    assert_eq!(engine.evaluate("Max(1, 2)", &env).unwrap(), Value::from(0));
}

#[test]
fn test_hooks_see_distinct_correlation_ids() {
    let engine = Engine::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let env = Environment::new().with_dynamic_parameter("a", move |call| {
        record.lock().unwrap().push(call.id);
        Ok(Value::from(1))
    });

    let expression = engine.compile("a + a", env).unwrap();
    expression.evaluate().unwrap();
    expression.evaluate().unwrap();

    let ids = seen.lock().unwrap();
    assert_eq!(ids.len(), 4);
    assert_ne!(ids[0], ids[1]);
    // Same tree, same occurrences.
    assert_eq!(ids[0], ids[2]);
    assert_eq!(ids[1], ids[3]);
}

#[test]
fn test_function_controls_argument_evaluation() {
    let engine = Engine::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let env = Environment::new()
        .with_dynamic_parameter("expensive", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(42))
        })
        .with_function("FirstNonZero", |call| {
            for index in 0..call.args.len() {
                let value = call.arg(index)?;
                if value != Value::from(0) {
                    return Ok(value);
                }
            }
            Ok(Value::Null)
        });

    assert_eq!(
        engine.evaluate("FirstNonZero(7, expensive)", &env).unwrap(),
        Value::from(7)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(
        engine.evaluate("FirstNonZero(0, expensive, expensive)", &env).unwrap(),
        Value::from(42)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nested_expression_shares_outer_parameters() {
    let engine = Engine::new();
    let subtotal = engine.compile("price * qty", Environment::new()).unwrap();
    let env = Environment::new()
        .with_parameter("price", 2.5)
        .with_parameter("qty", 4)
        .with_expression_parameter("subtotal", subtotal);

    assert_eq!(engine.evaluate("subtotal + 1", &env).unwrap(), Value::from(11));

    let mut cheaper = env.clone();
    cheaper.set_parameter("price", 1);
    assert_eq!(engine.evaluate("subtotal", &cheaper).unwrap(), Value::from(4));
}

#[test]
fn test_expression_reports_names() {
    let engine = Engine::new();
    let expression = engine
        .compile("Round(a * [b c], 2) > Max(a, d) ? a : Round(d)", Environment::new())
        .unwrap();

    assert_eq!(expression.parameter_names(), vec!["a", "b c", "d"]);
    assert_eq!(expression.function_names(), vec!["Round", "Max"]);
    assert_eq!(expression.source(), "Round(a * [b c], 2) > Max(a, d) ? a : Round(d)");
}

#[test]
fn test_evaluate_with_another_environment() {
    let engine = Engine::new();
    let expression = engine
        .compile("x * 2", Environment::new().with_parameter("x", 1))
        .unwrap();
    let other = Environment::new().with_parameter("x", 5);

    assert_eq!(expression.evaluate().unwrap(), Value::from(2));
    assert_eq!(expression.evaluate_with(&other).unwrap(), Value::from(10));
}

#[test]
fn test_builtin_case_sensitivity() {
    let engine = Engine::new();
    let exact = Environment::new();
    assert_eq!(
        engine.evaluate("abs(-1)", &exact).unwrap_err(),
        Error::Runtime(EvalError::FunctionNotFound {
            name: "abs".to_string()
        })
    );

    let relaxed =
        Environment::new().with_options(ExpressionOptions::IGNORE_CASE_AT_BUILTIN_FUNCTIONS);
    assert_eq!(engine.evaluate("abs(-1)", &relaxed).unwrap(), Value::from(1));
}

#[test]
fn test_builtin_arity_is_checked() {
    let engine = Engine::new();
    let err = engine.evaluate("Abs(1, 2)", &Environment::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(EvalError::InvalidArguments { ref function, .. }) if function == "Abs"
    ));
}

#[test]
fn test_parse_errors_surface_as_compilation_errors() {
    let engine = Engine::new();
    let err = engine.evaluate("1 + * 2", &Environment::new()).unwrap_err();
    let Error::Compilation(parse_error) = err else {
        panic!("expected a compilation error");
    };
    assert_eq!(parse_error.position(), 2);

    let err = engine.evaluate("#13/45/2020#", &Environment::new()).unwrap_err();
    assert!(matches!(err, Error::Compilation(ref e) if e.is_format_error()));
}

#[test]
fn test_rendered_errors() {
    let engine = Engine::new();
    let err = engine.evaluate("(1 + 2", &Environment::new()).unwrap_err();
    let rendered = reckon::render_error_to_string_no_color(&err);
    assert!(rendered.contains("P001"));
    assert!(rendered.contains("(1 + 2"));

    let err = engine.evaluate("1 / 'x'", &Environment::new()).unwrap_err();
    let rendered = reckon::render_error_to_string_no_color(&err);
    assert!(rendered.contains("E003"));
    assert!(rendered.contains("Cannot convert String to Double for operator '/'"));
}
