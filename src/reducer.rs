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

//! Capture-free beta/eta reduction over de Bruijn-indexed terms (§4.3).
//!
//! `reduce` is the only entry point consumers should call; `beta_reduce`
//! and `eta_reduce` are exposed for the test module and for
//! [`crate::interpreter`], which needs `reduce` itself but nothing below it.

use crate::ast::{Expression, VariableRef};
use crate::error::PipelineError;

/// Exceeding this many nested `reduce` calls means the term is (or looks
/// like) a diverging reduction such as the Ω-combinator. Kept as a `const`
/// rather than a CLI flag — see SPEC_FULL.md §8/§9.
pub const RECURSION_LIMIT: u32 = 300;

/// Reduces `expression` to (an attempt at) beta/eta normal form.
///
/// On success the result contains no Application whose left side is a
/// Function — i.e. no outer redex remains. Exceeding [`RECURSION_LIMIT`]
/// nested calls yields a recursion-limit error instead of looping forever.
pub fn reduce(expression: Expression) -> Result<Expression, PipelineError> {
    reduce_at(expression, 0)
}

fn reduce_at(expression: Expression, recursion_counter: u32) -> Result<Expression, PipelineError> {
    if recursion_counter == RECURSION_LIMIT {
        return Err(PipelineError::recursion_limit(RECURSION_LIMIT));
    }
    let recursion_counter = recursion_counter + 1;

    match expression {
        Expression::Variable { .. } => Ok(expression),

        Expression::Function { parameter_name, binder_id, body, paren_depth } => {
            let reduced_body = reduce_at(*body, recursion_counter)?;
            let function = Expression::function(parameter_name, binder_id, reduced_body, paren_depth);
            Ok(eta_reduce(function))
        }

        Expression::Application { left, right, paren_depth } => {
            let reduced_left = reduce_at(*left, recursion_counter)?;
            let reduced_right = reduce_at(*right, recursion_counter)?;

            if let Expression::Function { body, .. } = reduced_left {
                let beta_reduced = beta_reduce(0, &reduced_right, *body);
                reduce_at(beta_reduced, recursion_counter)
            } else {
                Ok(Expression::application(reduced_left, reduced_right, paren_depth))
            }
        }
    }
}

/// Substitutes `argument` for the bound variable at `bound_index` inside
/// `body`, decrementing every bound index greater than `bound_index` by one
/// to account for the binder being removed.
///
/// `argument` is cloned once per occurrence, since a bound variable may be
/// used more than once in `body` (e.g. `\ x . x x`). It is inserted
/// verbatim, with no index shifting of its own — see SPEC_FULL.md §4.3 and
/// §9 for why that is sound for this reduction strategy.
pub fn beta_reduce(bound_index: u32, argument: &Expression, body: Expression) -> Expression {
    match body {
        Expression::Variable { var: VariableRef::Bound { bound_index: bi, binder_id }, paren_depth } => {
            if bi < bound_index {
                Expression::bound_variable(bi, binder_id, paren_depth)
            } else if bi == bound_index {
                argument.clone()
            } else {
                Expression::bound_variable(bi - 1, binder_id, paren_depth)
            }
        }
        Expression::Variable { var: VariableRef::Free { .. }, .. } => body,
        Expression::Function { parameter_name, binder_id, body: inner, paren_depth } => {
            let substituted = beta_reduce(bound_index + 1, argument, *inner);
            Expression::function(parameter_name, binder_id, substituted, paren_depth)
        }
        Expression::Application { left, right, paren_depth } => {
            let left = beta_reduce(bound_index, argument, *left);
            let right = beta_reduce(bound_index, argument, *right);
            Expression::application(left, right, paren_depth)
        }
    }
}

/// Does `expression` contain a bound-Variable occurrence at `bound_index`?
/// Used by [`eta_reduce`] to check `f` does not depend on the parameter
/// being eta-contracted away.
fn has_usages(bound_index: u32, expression: &Expression) -> bool {
    match expression {
        Expression::Variable { var: VariableRef::Bound { bound_index: bi, .. }, .. } => *bi == bound_index,
        Expression::Variable { var: VariableRef::Free { .. }, .. } => false,
        Expression::Function { body, .. } => has_usages(bound_index + 1, body),
        Expression::Application { left, right, .. } => {
            has_usages(bound_index, left) || has_usages(bound_index, right)
        }
    }
}

/// Decrements every bound-Variable index greater than `bound_index` by one.
/// Applied to the function body left behind by an eta-contraction, since
/// the binder that used to own index 0 at this level no longer exists.
fn shift_after_eta(bound_index: u32, expression: Expression) -> Expression {
    match expression {
        Expression::Variable { var: VariableRef::Bound { bound_index: bi, binder_id }, paren_depth } => {
            if bi > bound_index {
                Expression::bound_variable(bi - 1, binder_id, paren_depth)
            } else {
                Expression::bound_variable(bi, binder_id, paren_depth)
            }
        }
        Expression::Variable { var: VariableRef::Free { .. }, .. } => expression,
        Expression::Function { parameter_name, binder_id, body, paren_depth } => {
            let body = shift_after_eta(bound_index + 1, *body);
            Expression::function(parameter_name, binder_id, body, paren_depth)
        }
        Expression::Application { left, right, paren_depth } => {
            let left = shift_after_eta(bound_index, *left);
            let right = shift_after_eta(bound_index, *right);
            Expression::application(left, right, paren_depth)
        }
    }
}

/// Attempts a single eta-contraction at a Function node: `\ . f x` becomes
/// `f` when `x` (bound index 0) does not occur free in `f`. Returns
/// `function` unchanged when the shape doesn't match.
fn eta_reduce(function: Expression) -> Expression {
    let eligible = match &function {
        Expression::Function { body, .. } => match body.as_ref() {
            Expression::Application { left, right, .. } => {
                matches!(
                    right.as_ref(),
                    Expression::Variable { var: VariableRef::Bound { bound_index: 0, .. }, .. }
                ) && !has_usages(0, left)
            }
            _ => false,
        },
        _ => unreachable!("eta_reduce is only ever called on a Function node"),
    };

    if !eligible {
        return function;
    }

    match function {
        Expression::Function { body, .. } => match *body {
            Expression::Application { left, .. } => shift_after_eta(0, *left),
            _ => unreachable!("eligibility check already confirmed this shape"),
        },
        _ => unreachable!(),
    }
}
