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

//! The AST shared by the parser, reducer, interpreter, and printer (§3).

/// Fresh ids are allocated per parse session (see [`crate::parser`]);
/// never a process-global counter, so nothing stops two parses from
/// running concurrently.
pub type BinderId = u32;

/// A variable occurrence: either bound by an enclosing [`Expression::Function`]
/// (carries a de Bruijn index for reduction and a `binder_id` for printing)
/// or free (resolved against the top-level definition table at interpret
/// time).
#[derive(Debug, Clone, serde::Serialize)]
pub enum VariableRef {
    Bound { bound_index: u32, binder_id: BinderId },
    Free { global_name: String },
}

/// A lambda calculus expression.
///
/// `paren_depth` is parse-time-only metadata (§3, §4.2): it records how
/// many parenthesized groups enclosed this node when it was parsed, purely
/// so the parser can decide how to reassociate adjacent applications. It
/// carries no reduction or equality semantics.
#[derive(Debug, Clone, serde::Serialize)]
pub enum Expression {
    Variable { var: VariableRef, paren_depth: u32 },
    Function { parameter_name: String, binder_id: BinderId, body: Box<Expression>, paren_depth: u32 },
    Application { left: Box<Expression>, right: Box<Expression>, paren_depth: u32 },
}

impl Expression {
    pub fn bound_variable(bound_index: u32, binder_id: BinderId, paren_depth: u32) -> Self {
        Expression::Variable { var: VariableRef::Bound { bound_index, binder_id }, paren_depth }
    }

    pub fn free_variable(global_name: impl Into<String>, paren_depth: u32) -> Self {
        Expression::Variable { var: VariableRef::Free { global_name: global_name.into() }, paren_depth }
    }

    pub fn function(parameter_name: impl Into<String>, binder_id: BinderId, body: Expression, paren_depth: u32) -> Self {
        Expression::Function {
            parameter_name: parameter_name.into(),
            binder_id,
            body: Box::new(body),
            paren_depth,
        }
    }

    pub fn application(left: Expression, right: Expression, paren_depth: u32) -> Self {
        Expression::Application { left: Box::new(left), right: Box::new(right), paren_depth }
    }

    pub fn paren_depth(&self) -> u32 {
        match self {
            Expression::Variable { paren_depth, .. } => *paren_depth,
            Expression::Function { paren_depth, .. } => *paren_depth,
            Expression::Application { paren_depth, .. } => *paren_depth,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expression::Function { .. })
    }

    pub fn is_application(&self) -> bool {
        matches!(self, Expression::Application { .. })
    }
}

/// Structural equality per §3/§4.6: the variant tag and, for variables,
/// either the bound index or the global name must match. `binder_id`,
/// `parameter_name`, and `paren_depth` are presentation metadata and are
/// never consulted — this is what makes the comparison alpha-invariant.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Variable { var: a, .. }, Expression::Variable { var: b, .. }) => match (a, b) {
                (
                    VariableRef::Bound { bound_index: i, .. },
                    VariableRef::Bound { bound_index: j, .. },
                ) => i == j,
                (VariableRef::Free { global_name: a }, VariableRef::Free { global_name: b }) => a == b,
                _ => false,
            },
            (Expression::Function { body: a, .. }, Expression::Function { body: b, .. }) => a == b,
            (
                Expression::Application { left: al, right: ar, .. },
                Expression::Application { left: bl, right: br, .. },
            ) => al == bl && ar == br,
            _ => false,
        }
    }
}

impl Eq for Expression {}

/// One `name = expression;` top-level binding.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Statement {
    pub name: String,
    pub expression: Expression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_binder_id_and_parameter_name() {
        let a = Expression::function("x", 0, Expression::bound_variable(0, 0, 0), 0);
        let b = Expression::function("y", 99, Expression::bound_variable(0, 99, 0), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_distinguishes_free_names() {
        let a = Expression::free_variable("x", 0);
        let b = Expression::free_variable("y", 0);
        assert_ne!(a, b);
    }

    #[test]
    fn equality_ignores_paren_depth() {
        let a = Expression::free_variable("x", 0);
        let b = Expression::free_variable("x", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_distinguishes_bound_vs_free_with_same_name_shape() {
        let bound = Expression::bound_variable(0, 0, 0);
        let free = Expression::free_variable("x", 0);
        assert_ne!(bound, free);
    }
}
