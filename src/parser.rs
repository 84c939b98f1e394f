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

//! Recursive-descent parser (§4.2).
//!
//! Each grammar rule below backtracks on failure rather than raising an
//! error: `parse_variable`, `parse_function`, `parse_application`, and
//! `parse_parenthesized_expression` all return `Option<Expression>` and
//! restore the token cursor themselves when they don't match. Only
//! [`Parser::parse_statement`] turns "nothing matched" into a hard
//! [`PipelineError`], since at that point there is no other alternative
//! left to try.
//!
//! Two pieces of state ride along with the cursor and make the grammar
//! context-sensitive:
//! - `bound_stack` + `global_names` reject any parameter name that would
//!   shadow an already-bound or already-defined name, so every name the
//!   parser accepts resolves unambiguously while parsing.
//! - `paren_depth` is stamped onto every node and lets [`parse_application`]
//!   find where one parenthesized group ends and another begins, so it can
//!   left-associate a run of applications within a group without needing a
//!   separate associativity pass.

use crate::ast::{BinderId, Expression, Statement};
use crate::error::PipelineError;
use crate::token::{Token, TokenKind};

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    paren_depth: u32,
    bound_stack: Vec<(String, BinderId)>,
    global_names: Vec<String>,
    next_binder_id: BinderId,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            paren_depth: 0,
            bound_stack: Vec::new(),
            global_names: Vec::new(),
            next_binder_id: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn is_done(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_done() && self.current().kind == TokenKind::Whitespace {
            self.index += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if !self.is_done() && self.current().kind == kind {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn current_name(&self) -> Option<String> {
        match &self.current().kind {
            TokenKind::Name(name) => Some(name.clone()),
            _ => None,
        }
    }

    fn parse_variable(&mut self) -> Option<Expression> {
        let name = self.current_name()?;
        let paren_depth = self.paren_depth;

        let expression = match self.bound_stack.iter().rev().position(|(n, _)| n == &name) {
            Some(bound_index) => {
                let (_, binder_id) = self.bound_stack[self.bound_stack.len() - 1 - bound_index];
                Expression::bound_variable(bound_index as u32, binder_id, paren_depth)
            }
            None => Expression::free_variable(name, paren_depth),
        };

        self.index += 1;
        Some(expression)
    }

    /// Parses `\ name... . body`. A parameter name is rejected whether it
    /// shadows a name already bound in an enclosing head or collides with
    /// a top-level definition — both would make later occurrences of that
    /// name ambiguous.
    fn parse_function(&mut self) -> Option<Expression> {
        let original_index = self.index;
        let original_stack_len = self.bound_stack.len();
        let paren_depth = self.paren_depth;

        if !self.expect(TokenKind::LambdaHeadStart) {
            return None;
        }
        self.skip_whitespace();

        let mut parameters: Vec<(String, BinderId)> = Vec::new();
        loop {
            let Some(name) = self.current_name() else { break };
            let shadows_bound = self.bound_stack.iter().any(|(n, _)| n == &name);
            let shadows_global = self.global_names.iter().any(|n| n == &name);
            if shadows_bound || shadows_global {
                self.index = original_index;
                self.bound_stack.truncate(original_stack_len);
                return None;
            }

            let binder_id = self.next_binder_id;
            self.next_binder_id += 1;
            self.bound_stack.push((name.clone(), binder_id));
            parameters.push((name, binder_id));

            self.index += 1;
            self.skip_whitespace();
        }

        if parameters.is_empty() || !self.expect(TokenKind::LambdaHeadEnd) {
            self.index = original_index;
            self.bound_stack.truncate(original_stack_len);
            return None;
        }
        self.skip_whitespace();

        let Some(body) = self.parse_expression() else {
            self.index = original_index;
            self.bound_stack.truncate(original_stack_len);
            return None;
        };

        self.bound_stack.truncate(original_stack_len);

        let function = parameters
            .into_iter()
            .rev()
            .fold(body, |body, (name, binder_id)| Expression::function(name, binder_id, body, paren_depth));
        Some(function)
    }

    /// Parses `left right`, reassociating a run of applications within the
    /// same `paren_depth` into a left-leaning tree (`a b c` becomes
    /// `(a b) c`, not `a (b c)`). See [`append_left`].
    fn parse_application(&mut self) -> Option<Expression> {
        let original_index = self.index;

        let left = self.parse_variable().or_else(|| self.parse_parenthesized_expression());

        if let Some(left) = left {
            self.skip_whitespace();
            if let Some(right) = self.parse_expression() {
                let depth = self.paren_depth;
                return Some(if right.is_application() && right.paren_depth() == depth {
                    append_left(depth, left, right)
                } else {
                    Expression::application(left, right, depth)
                });
            }
        }

        self.index = original_index;
        None
    }

    fn parse_parenthesized_expression(&mut self) -> Option<Expression> {
        let original_index = self.index;

        if self.expect(TokenKind::OpenParen) {
            let original_depth = self.paren_depth;
            self.paren_depth += 1;

            if let Some(expression) = self.parse_expression() {
                if self.expect(TokenKind::CloseParen) {
                    self.paren_depth = original_depth;
                    return Some(expression);
                }
            }
            self.paren_depth = original_depth;
        }

        self.index = original_index;
        None
    }

    /// Tried in an order that matters: application is attempted before a
    /// bare variable or parenthesized group so that e.g. `a b` is not
    /// mistaken for the single variable `a` followed by leftover input.
    fn parse_expression(&mut self) -> Option<Expression> {
        self.parse_application()
            .or_else(|| self.parse_variable())
            .or_else(|| self.parse_function())
            .or_else(|| self.parse_parenthesized_expression())
    }

    fn parse_statement(&mut self) -> Result<Statement, PipelineError> {
        if self.is_done() {
            return Err(PipelineError::parse_error("expected a statement, encountered end of file", self.current().span));
        }

        let name_span = self.current().span;
        let name = self.current_name().ok_or_else(|| {
            PipelineError::parse_error(
                format!("expected a name at the start of a statement, encountered {}", self.current().kind.describe()),
                name_span,
            )
        })?;

        if self.global_names.iter().any(|n| n == &name) {
            return Err(PipelineError::parse_error(format!("duplicate definition of '{name}'"), name_span));
        }
        self.global_names.push(name.clone());
        self.index += 1;
        self.skip_whitespace();

        if !self.expect(TokenKind::Equals) {
            return Err(PipelineError::parse_error(
                format!("expected an equals sign, encountered {}", self.current().kind.describe()),
                self.current().span,
            ));
        }
        self.skip_whitespace();

        let expression = self
            .parse_expression()
            .ok_or_else(|| PipelineError::parse_error(format!("failed to parse expression for definition '{name}'"), name_span))?;
        self.skip_whitespace();

        if !self.expect(TokenKind::Semicolon) {
            return Err(PipelineError::parse_error(
                format!("expected a semicolon, encountered {}", self.current().kind.describe()),
                self.current().span,
            ));
        }

        // Local bound names from one definition must never leak into the next.
        self.bound_stack.clear();

        Ok(Statement { name, expression })
    }
}

/// Walks down the left spine of `tree` (an `Application` at `depth`),
/// stopping at the first node whose own left child is not itself an
/// `Application` at `depth`, and inserts `node_to_append` there as a new
/// leftmost leaf.
///
/// This is how a right-recursive `parse_expression` ends up producing
/// left-associative application trees: `a b c` parses `b c` first (since
/// `parse_expression` is tried on what follows `a`), then this function
/// reshapes `(b c)` plus the pending `a` into `(a b) c`.
fn append_left(depth: u32, node_to_append: Expression, tree: Expression) -> Expression {
    let Expression::Application { left, right, paren_depth } = tree else {
        unreachable!("append_left is only ever called with an Application tree")
    };

    if left.is_application() && left.paren_depth() == depth {
        let new_left = append_left(depth, node_to_append, *left);
        Expression::application(new_left, *right, paren_depth)
    } else {
        let new_left = Expression::application(node_to_append, *left, paren_depth);
        Expression::application(new_left, *right, paren_depth)
    }
}

/// Parses a full program: zero or more `name = expression;` statements.
pub fn parse_program(tokens: Vec<Token>) -> Result<Vec<Statement>, PipelineError> {
    let mut parser = Parser::new(tokens);
    parser.skip_whitespace();

    let mut statements = Vec::new();
    while !parser.is_done() {
        statements.push(parser.parse_statement()?);
        parser.skip_whitespace();
    }
    Ok(statements)
}

/// Parses a single expression with no surrounding statement, requiring the
/// whole token stream to be consumed. Used by tests and by `--ast-json`
/// when invoked on a bare expression rather than a program.
pub fn parse_expression_standalone(tokens: Vec<Token>) -> Result<Expression, PipelineError> {
    let mut parser = Parser::new(tokens);
    parser.skip_whitespace();

    let expression = parser
        .parse_expression()
        .ok_or_else(|| PipelineError::parse_error("failed to parse expression", parser.current().span))?;
    parser.skip_whitespace();

    if !parser.is_done() {
        return Err(PipelineError::parse_error(
            format!("unexpected trailing {}", parser.current().kind.describe()),
            parser.current().span,
        ));
    }
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::printer::render_expression;

    fn parse(source: &str) -> Expression {
        parse_expression_standalone(tokenize(source).unwrap()).unwrap()
    }

    fn parse_program_str(source: &str) -> Result<Vec<Statement>, PipelineError> {
        parse_program(tokenize(source).unwrap())
    }

    #[test]
    fn parses_a_simple_definition() {
        let program = parse_program_str("identity = \\ x . x;").unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].name, "identity");
    }

    #[test]
    fn applications_left_associate_within_one_paren_group() {
        assert_eq!(render_expression(&parse("a b c")), "a b c");
        assert_eq!(render_expression(&parse("a b c")), render_expression(&parse("(a b) c")));
    }

    #[test]
    fn parentheses_form_an_independent_associativity_group() {
        assert_eq!(render_expression(&parse("a (b c)")), "a (b c)");
        assert_ne!(parse("a b c"), parse("a (b c)"));
    }

    #[test]
    fn rejects_a_parameter_that_shadows_an_enclosing_parameter() {
        let err = parse_program_str("main = \\ x x . x;").unwrap_err();
        assert_eq!(err.code, "E0002");
    }

    #[test]
    fn rejects_a_parameter_that_collides_with_a_top_level_name() {
        let err = parse_program_str("x = \\ y . y;\nmain = \\ x . x;").unwrap_err();
        assert_eq!(err.code, "E0002");
    }

    #[test]
    fn rejects_duplicate_top_level_definitions() {
        let err = parse_program_str("x = \\ y . y;\nx = \\ z . z;").unwrap_err();
        assert_eq!(err.code, "E0002");
    }

    #[test]
    fn bound_names_from_one_definition_do_not_leak_into_the_next() {
        // `x` bound in the first definition must not shadow a fresh use of
        // `x` as a free name in the second.
        let program = parse_program_str("first = \\ x . x;\nsecond = x;").unwrap();
        assert!(matches!(
            &program[1].expression,
            Expression::Variable { var: crate::ast::VariableRef::Free { .. }, .. }
        ));
    }

    /// Backs `--ast-json` (§10.4): parsing the same source always yields
    /// byte-identical JSON, and the shape exposes the fields tooling built
    /// against this flag would depend on.
    #[test]
    fn ast_json_snapshot_is_stable_and_well_shaped() {
        let program = parse_program_str("identity = \\ x . x;").unwrap();
        let json = serde_json::to_string_pretty(&program).unwrap();

        let program_again = parse_program_str("identity = \\ x . x;").unwrap();
        let json_again = serde_json::to_string_pretty(&program_again).unwrap();
        assert_eq!(json, json_again, "parsing identical source must yield identical JSON");

        assert!(json.contains("\"name\": \"identity\""));
        assert!(json.contains("\"Function\""));
        assert!(json.contains("\"parameter_name\": \"x\""));
    }
}
