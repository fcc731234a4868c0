//! Arithmetic, comparison, and equality operators.

mod common;
use common::{assert_type_error, run_ok};

// =============================================================================
// ARITHMETIC
// =============================================================================

#[test]
fn test_variadic_sum() {
    assert_eq!(run_ok("(print-num (+ 1 2 3))"), "6\n");
    assert_eq!(run_ok("(print-num (+ 10 20))"), "30\n");
}

#[test]
fn test_variadic_product() {
    assert_eq!(run_ok("(print-num (* 2 3 4))"), "24\n");
    assert_eq!(run_ok("(print-num (* 7 1))"), "7\n");
}

#[test]
fn test_subtraction() {
    assert_eq!(run_ok("(print-num (- 10 4))"), "6\n");
    assert_eq!(run_ok("(print-num (- 4 10))"), "-6\n");
}

#[test]
fn test_nested_arithmetic() {
    assert_eq!(run_ok("(print-num (+ (+ 1 2) (* 3 4) 5))"), "20\n");
    assert_eq!(run_ok("(print-num (* (- 5 2) (+ 1 1)))"), "6\n");
}

#[test]
fn test_negative_literals() {
    assert_eq!(run_ok("(print-num -5)"), "-5\n");
    assert_eq!(run_ok("(print-num (+ -3 -4))"), "-7\n");
}

// =============================================================================
// DIVISION AND MODULO (floored convention, applied uniformly)
// =============================================================================

#[test]
fn test_integer_division() {
    assert_eq!(run_ok("(print-num (/ 7 2))"), "3\n");
    assert_eq!(run_ok("(print-num (/ 6 3))"), "2\n");
    assert_eq!(run_ok("(print-num (/ 1 2))"), "0\n");
}

#[test]
fn test_division_floors_toward_negative_infinity() {
    assert_eq!(run_ok("(print-num (/ -7 2))"), "-4\n");
    assert_eq!(run_ok("(print-num (/ 7 -2))"), "-4\n");
    assert_eq!(run_ok("(print-num (/ -7 -2))"), "3\n");
}

#[test]
fn test_modulo() {
    assert_eq!(run_ok("(print-num (mod 7 2))"), "1\n");
    assert_eq!(run_ok("(print-num (mod 6 3))"), "0\n");
}

#[test]
fn test_modulo_sign_follows_division_convention() {
    // The remainder takes the divisor's sign, so `/` and `mod` agree.
    assert_eq!(run_ok("(print-num (mod -7 2))"), "1\n");
    assert_eq!(run_ok("(print-num (mod 7 -2))"), "-1\n");
    assert_eq!(run_ok("(print-num (mod -7 -2))"), "-1\n");
}

// =============================================================================
// COMPARISON AND EQUALITY
// =============================================================================

#[test]
fn test_greater_and_less() {
    assert_eq!(run_ok("(print-bool (> 2 1))"), "#t\n");
    assert_eq!(run_ok("(print-bool (> 1 2))"), "#f\n");
    assert_eq!(run_ok("(print-bool (< 1 2))"), "#t\n");
    assert_eq!(run_ok("(print-bool (< 2 1))"), "#f\n");
}

#[test]
fn test_nary_equality() {
    assert_eq!(run_ok("(print-bool (= 1 1 1))"), "#t\n");
    assert_eq!(run_ok("(print-bool (= 1 2 1))"), "#f\n");
    assert_eq!(run_ok("(print-bool (= (+ 1 1) 2 (- 3 1)))"), "#t\n");
}

// =============================================================================
// TYPE DISCIPLINE
// =============================================================================

#[test]
fn test_arithmetic_rejects_booleans() {
    assert_type_error("(+ 1 #t)", "Type error!\n");
    assert_type_error("(- #t 1)", "Type error!\n");
    assert_type_error("(* 2 #f 3)", "Type error!\n");
    assert_type_error("(/ #t #f)", "Type error!\n");
    assert_type_error("(mod 5 #t)", "Type error!\n");
}

#[test]
fn test_comparison_rejects_booleans() {
    assert_type_error("(> #t 1)", "Type error!\n");
    assert_type_error("(< 1 #f)", "Type error!\n");
    assert_type_error("(= 1 #t)", "Type error!\n");
}

#[test]
fn test_arithmetic_rejects_closures() {
    assert_type_error("(+ 1 (fun (x) x))", "Type error!\n");
}
