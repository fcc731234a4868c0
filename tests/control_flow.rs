//! Conditionals and short-circuiting logical operators.

mod common;
use common::{assert_type_error, run_ok};

// =============================================================================
// IF
// =============================================================================

#[test]
fn test_if_selects_a_branch() {
    assert_eq!(run_ok("(print-num (if #t 1 2))"), "1\n");
    assert_eq!(run_ok("(print-num (if #f 1 2))"), "2\n");
}

#[test]
fn test_if_test_must_be_boolean() {
    assert_type_error("(if 1 2 3)", "Type error!\n");
}

#[test]
fn test_if_skips_the_unchosen_branch() {
    // The untaken branch would fail if it were evaluated; it must not be.
    assert_eq!(run_ok("(print-num (if #t 1 (mod 1 0)))"), "1\n");
    assert_eq!(run_ok("(print-num (if #f (mod 1 0) 2))"), "2\n");
    assert_eq!(run_ok("(print-num (if #t 1 undefined-thing))"), "1\n");
}

#[test]
fn test_if_branch_side_effects_run_once() {
    assert_eq!(run_ok("(if #t (print-num 1) (print-num 2))"), "1\n");
}

#[test]
fn test_nested_if() {
    let source = "(print-num (if (> 3 2) (if (> 2 3) 1 2) 3))";
    assert_eq!(run_ok(source), "2\n");
}

// =============================================================================
// AND / OR
// =============================================================================

#[test]
fn test_and() {
    assert_eq!(run_ok("(print-bool (and #t #t))"), "#t\n");
    assert_eq!(run_ok("(print-bool (and #t #f))"), "#f\n");
    assert_eq!(run_ok("(print-bool (and #t #t #f))"), "#f\n");
}

#[test]
fn test_or() {
    assert_eq!(run_ok("(print-bool (or #f #f))"), "#f\n");
    assert_eq!(run_ok("(print-bool (or #f #f #t))"), "#t\n");
    assert_eq!(run_ok("(print-bool (or #t #f))"), "#t\n");
}

#[test]
fn test_and_short_circuits() {
    // The second operand would print if it were reached.
    assert_eq!(run_ok("(print-bool (and #f (print-bool #t)))"), "#f\n");
}

#[test]
fn test_or_short_circuits() {
    assert_eq!(run_ok("(print-bool (or #t (print-bool #f)))"), "#t\n");
}

#[test]
fn test_short_circuit_skips_type_violations() {
    // `5` is never evaluated, so no type error is raised.
    assert_eq!(run_ok("(print-bool (or #t 5))"), "#t\n");
    assert_eq!(run_ok("(print-bool (and #f 5))"), "#f\n");
}

#[test]
fn test_logical_operands_must_be_boolean() {
    assert_type_error("(and #t 5)", "Type error!\n");
    assert_type_error("(or #f 0)", "Type error!\n");
    assert_type_error("(not 1)", "Type error!\n");
}

#[test]
fn test_not() {
    assert_eq!(run_ok("(print-bool (not #t))"), "#f\n");
    assert_eq!(run_ok("(print-bool (not #f))"), "#t\n");
    assert_eq!(run_ok("(print-bool (not (> 1 2)))"), "#t\n");
}

#[test]
fn test_combined_logic() {
    let source = "(print-bool (and (> 3 2) (or (< 5 4) (= 1 1))))";
    assert_eq!(run_ok(source), "#t\n");
}
