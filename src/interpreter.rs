/*
 * ==========================================================================
 * lambda-calc
 * ==========================================================================
 *
 * An interpreter for an untyped lambda calculus with top-level named
 * definitions.
 *
 * License: dual-licensed under the MIT license and the Apache License,
 * Version 2.0. You may choose either license to govern your use of this
 * software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * ==========================================================================
 */

//! The fixed-point driver that ties reduction to global-name resolution
//! (§4.4).
//!
//! Reduction alone only ever normalizes the redexes already present in an
//! expression; it has no notion of a top-level definition table. Recursion
//! (and mutual recursion) only work because [`interpret`] interleaves
//! reduction with inlining: each pass reduces as far as it can, then
//! replaces every free variable that names a statement with a fresh copy
//! of that statement's body, and keeps going until a pass changes nothing.

use crate::ast::{Expression, Statement, VariableRef};
use crate::error::PipelineError;
use crate::reducer::reduce;

/// If `--verbose` is set, each fixed-point iteration's intermediate term is
/// reported through this callback before the next pass runs (§6, §10.1).
pub type IterationObserver = dyn FnMut(u32, &Expression);

/// Finds `main` in `program`, then runs the fixed-point loop to normal
/// form, reporting nothing about intermediate iterations.
pub fn interpret(program: &[Statement]) -> Result<Expression, PipelineError> {
    interpret_with_observer(program, None)
}

/// Same as [`interpret`], but invokes `observer` with the iteration number
/// and the term produced by that iteration's reduce-then-resolve pass,
/// before testing it for a fixed point. Used by the CLI's `--verbose` flag.
pub fn interpret_with_observer(
    program: &[Statement],
    mut observer: Option<&mut IterationObserver>,
) -> Result<Expression, PipelineError> {
    let main = program
        .iter()
        .find(|statement| statement.name == "main")
        .ok_or_else(PipelineError::missing_main)?;

    run_fixed_point(program, main.expression.clone(), &mut observer)
}

/// Runs the same fixed-point loop seeded from an arbitrary expression
/// instead of `main`'s body. Used by the test harness to compare two
/// programs (or two expressions against the same definition table) for
/// semantic equality under this interpreter's reduction strategy.
pub fn interpret_expression(program: &[Statement], expression: Expression) -> Result<Expression, PipelineError> {
    let mut observer: Option<&mut IterationObserver> = None;
    run_fixed_point(program, expression, &mut observer)
}

fn run_fixed_point(
    program: &[Statement],
    mut current: Expression,
    observer: &mut Option<&mut IterationObserver>,
) -> Result<Expression, PipelineError> {
    let mut iteration = 0u32;
    loop {
        let reduced = reduce(current.clone())?;
        let resolved = resolve_globals(reduced, program);

        iteration += 1;
        if let Some(observe) = observer.as_deref_mut() {
            observe(iteration, &resolved);
        }

        if resolved == current {
            return Ok(resolved);
        }
        current = resolved;
    }
}

/// Walks `expression`, replacing every free Variable whose name matches a
/// statement in `program` with a deep copy of that statement's expression.
/// Bound variables are left untouched: global names can only shadow at
/// the free-variable level, since the parser already forbids a bound
/// parameter from colliding with a top-level name (§4.2).
fn resolve_globals(expression: Expression, program: &[Statement]) -> Expression {
    match expression {
        Expression::Variable { var: VariableRef::Free { ref global_name }, .. } => {
            match program.iter().find(|statement| &statement.name == global_name) {
                Some(statement) => statement.expression.clone(),
                None => expression,
            }
        }
        Expression::Variable { .. } => expression,
        Expression::Function { parameter_name, binder_id, body, paren_depth } => {
            let body = resolve_globals(*body, program);
            Expression::function(parameter_name, binder_id, body, paren_depth)
        }
        Expression::Application { left, right, paren_depth } => {
            let left = resolve_globals(*left, program);
            let right = resolve_globals(*right, program);
            Expression::application(left, right, paren_depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;
    use crate::printer::render_expression;

    fn run(source: &str) -> Result<String, PipelineError> {
        let statements = parse_program(tokenize(source).unwrap())?;
        let result = interpret(&statements)?;
        Ok(render_expression(&result))
    }

    #[test]
    fn missing_main_is_an_error() {
        let statements = parse_program(tokenize("identity = \\ x . x;").unwrap()).unwrap();
        let err = interpret(&statements).unwrap_err();
        assert_eq!(err.code, "E0003");
    }

    #[test]
    fn inlines_a_single_global_definition() {
        assert_eq!(run("value = \\ x . x;\nmain = value y;").unwrap(), "y");
    }

    #[test]
    fn church_successor_unfolds_by_one_step() {
        // succ zero normalizes to the Church numeral for one, via
        // repeated inlining of `succ` and `zero` interleaved with beta.
        let source = "zero = \\ f x . x;\nsucc = \\ n f x . f (n f x);\nmain = succ zero;";
        assert_eq!(run(source).unwrap(), "\\ f x . f x");
    }

    #[test]
    fn mutually_recursive_definitions_resolve_through_each_other() {
        // Neither alone reduces to anything; each only makes progress by
        // inlining the other, so this exercises the interleaving directly.
        let source = "a = \\ x . b x;\nb = \\ x . x;\nmain = a y;";
        assert_eq!(run(source).unwrap(), "y");
    }

    #[test]
    fn propagates_recursion_limit_from_a_diverging_reduction() {
        let err = run("main = (\\ x . x x) (\\ x . x x);").unwrap_err();
        assert_eq!(err.code, "E0004");
    }

    #[test]
    fn interpret_expression_seeds_the_loop_from_an_arbitrary_term() {
        let statements = parse_program(tokenize("value = \\ x . x;").unwrap()).unwrap();
        let tokens = tokenize("value y").unwrap();
        let expression = crate::parser::parse_expression_standalone(tokens).unwrap();
        let result = interpret_expression(&statements, expression).unwrap();
        assert_eq!(render_expression(&result), "y");
    }

    #[test]
    fn verbose_observer_sees_every_iteration_in_order() {
        let statements = parse_program(tokenize("value = \\ x . x;\nmain = value y;").unwrap()).unwrap();
        let mut seen = Vec::new();
        {
            let mut observer: Box<IterationObserver> =
                Box::new(|iteration, expr| seen.push((iteration, render_expression(expr))));
            interpret_with_observer(&statements, Some(&mut *observer)).unwrap();
        }
        assert_eq!(seen.first().map(|(n, _)| *n), Some(1));
        assert_eq!(seen.last().map(|(_, s)| s.clone()), Some("y".to_string()));
    }
}
