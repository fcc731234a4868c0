//! Shared helpers for the integration suites.
#![allow(dead_code)]

use minilisp::interpreter::{parse_and_run, InterpreterError, RunError};

/// Runs a program against a fresh interpreter, capturing its output.
pub fn run(source: &str) -> (String, Result<(), RunError>) {
    let mut out = Vec::new();
    let result = parse_and_run(source, &mut out);
    (String::from_utf8(out).expect("output was not UTF-8"), result)
}

/// Runs a program that must complete without any failure.
pub fn run_ok(source: &str) -> String {
    let (output, result) = run(source);
    assert!(result.is_ok(), "program failed: {:?}", result.err());
    output
}

/// Asserts the program halts on a type violation, with the fixed
/// diagnostic line appended to whatever it printed before the stop.
pub fn assert_type_error(source: &str, expected_output: &str) {
    let (output, result) = run(source);
    match result {
        Err(RunError::Runtime(error)) => {
            assert!(
                error.is_type_violation(),
                "expected a type violation, got {:?}",
                error
            );
        }
        other => panic!("expected a type violation, got {:?}", other),
    }
    assert_eq!(output, expected_output);
}

/// Asserts the program stops on a runtime failure that is *not* a type
/// violation: nothing is reported, and only `expected_output` was printed
/// before the stop. Returns the error for finer-grained assertions.
pub fn assert_silent_stop(source: &str, expected_output: &str) -> InterpreterError {
    let (output, result) = run(source);
    let error = match result {
        Err(RunError::Runtime(error)) => error,
        other => panic!("expected a runtime error, got {:?}", other),
    };
    assert!(
        !error.is_type_violation(),
        "expected a silent failure, got a type violation"
    );
    assert_eq!(output, expected_output);
    error
}

/// Asserts parsing fails before anything runs.
pub fn assert_syntax_error(source: &str) {
    let (output, result) = run(source);
    assert!(
        matches!(result, Err(RunError::Syntax(_))),
        "expected a syntax error, got {:?}",
        result
    );
    assert_eq!(output, "", "a syntax error must not produce output");
}
