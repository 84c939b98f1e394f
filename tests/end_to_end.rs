//! Source → expected-output scenarios from the distilled spec's testable
//! properties table, plus the parser shadowing-rejection table.
//!
//! Two comparison styles are used, matching how the reference
//! implementation's own test harness distinguishes them:
//! - A bare expression (no top-level definitions involved) is compared by
//!   its exact rendered text, since the scenario's "expected" column is
//!   already that expression's true normal form.
//! - A full program (`main = ...;` plus other definitions) is compared by
//!   *interpreting* both the program's `main` and a freshly parsed copy of
//!   the expected expression against the same definition table via
//!   [`lambda_calc::interpreter::interpret_expression`], then checking
//!   structural equality of the two results. This is necessary because
//!   eta-reduction can cascade further than the expected column's text
//!   shows (e.g. `\ f x . f x` and `\ f . f` are the same normal form one
//!   eta-step apart) — the expected text only needs to be *equivalent*,
//!   not byte-identical to what `reduce` alone would print.

use lambda_calc::error::PipelineError;
use lambda_calc::lexer::tokenize;
use lambda_calc::parser::{parse_expression_standalone, parse_program};
use lambda_calc::printer::render_expression;
use lambda_calc::reducer::reduce;
use lambda_calc::{ast::Statement, interpreter};

fn reduce_expression(source: &str) -> String {
    let expression = parse_expression_standalone(tokenize(source).unwrap()).unwrap();
    render_expression(&reduce(expression).unwrap())
}

fn interpret_program(program: &str) -> Result<(Vec<Statement>, lambda_calc::ast::Expression), PipelineError> {
    let statements = parse_program(tokenize(program).unwrap())?;
    let result = interpreter::interpret(&statements)?;
    Ok((statements, result))
}

fn assert_program_normalizes_to(program: &str, expected_expression: &str) {
    let (statements, actual) = interpret_program(program).expect("program should interpret successfully");
    let expected_ast = parse_expression_standalone(tokenize(expected_expression).unwrap()).unwrap();
    let expected = interpreter::interpret_expression(&statements, expected_ast).unwrap();
    assert_eq!(
        actual, expected,
        "program normalized to `{}`, expected something equivalent to `{}`",
        render_expression(&actual),
        expected_expression
    );
}

#[test]
fn scenario_1_identity_applied_to_a_free_variable() {
    assert_eq!(reduce_expression("(\\ x . x) value"), "value");
}

#[test]
fn scenario_2_triple_eta_collapses_to_one_parameter() {
    assert_eq!(reduce_expression("\\ x y z . x y z"), "\\ x . x");
}

#[test]
fn scenario_3_capture_free_substitution_under_a_shadowing_binder() {
    assert_eq!(reduce_expression("(\\ x y . y x) (\\ y . y)"), "\\ y . y (\\ y_1 . y_1)");
}

#[test]
fn scenario_4_disambiguates_a_parameter_against_an_inlined_free_name() {
    assert_eq!(reduce_expression("(\\ y x . x y) x"), "\\ x_1 . x_1 x");
}

#[test]
fn scenario_5_three_parameter_shuffle_with_disambiguation() {
    assert_eq!(
        reduce_expression("(\\ g y x . y x g) x (\\ a b x . a x b)"),
        "\\ x_1 x_2 . x_1 x_2 x"
    );
}

#[test]
fn scenario_6_church_successor_of_zero() {
    let program = "zero = \\ f x . x;\nsucc = \\ n f x . f (n f x);\nmain = succ zero;";
    assert_program_normalizes_to(program, "\\ f x . f x");
}

#[test]
fn scenario_7_omega_combinator_hits_the_recursion_limit() {
    let err = interpret_program("main = (\\ x . x x) (\\ x . x x);").unwrap_err();
    assert!(err.message.contains("recursion limit"));
}

#[test]
fn rejects_duplicate_parameter_in_one_lambda_head() {
    assert!(parse_program(tokenize("main = \\ x x . x;").unwrap()).is_err());
}

#[test]
fn rejects_a_parameter_that_repeats_with_an_unrelated_one_between() {
    assert!(parse_program(tokenize("main = \\ x y x . z;").unwrap()).is_err());
}

#[test]
fn rejects_shadowing_two_levels_up() {
    assert!(parse_program(tokenize("main = \\ x . \\ y . \\ x . z;").unwrap()).is_err());
}

#[test]
fn rejects_shadowing_one_level_up() {
    assert!(parse_program(tokenize("main = \\ x . \\ y . \\ y . z;").unwrap()).is_err());
}

#[test]
fn rejects_duplicate_top_level_definitions() {
    let err = parse_program(tokenize("zero = \\ f x . x;\nzero = \\ f x . f x;").unwrap()).unwrap_err();
    assert!(err.message.contains("duplicate definition"));
}

#[test]
fn missing_main_is_reported() {
    let err = interpret_program("identity = \\ x . x;").unwrap_err();
    assert_eq!(err.code, "E0003");
}

#[test]
fn file_not_found_is_its_own_error_kind() {
    let err = PipelineError::file_not_found("does-not-exist.lc");
    assert_eq!(err.code, "E0005");
}
