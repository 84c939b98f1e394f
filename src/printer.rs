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

//! Disambiguating pretty-printer (§5).
//!
//! De Bruijn indices carry no names, so printing has to invent readable
//! ones and then prove they don't lie: a rendered name must always refer
//! back to the binder it came from, even when an inner parameter shadows an
//! outer one or happens to collide with a free/global name used somewhere
//! in its scope. Two passes make that true:
//!
//! 1. [`collect_collisions`] walks the whole expression once and records,
//!    for every binder enclosing a free variable occurrence, that the
//!    binder's scope contains a name collision if a bound parameter were
//!    ever to reuse that free name.
//! 2. [`Printer`] walks the expression a second time, maintaining a stack
//!    of currently-open binders. Each binder's suffix is fixed the moment
//!    it is pushed: the number of same-named binders already on the stack,
//!    plus one more if this binder's own name collides with a free name per
//!    step 1. Every later occurrence of that binder reuses the stored
//!    suffix, so a name together with its suffix always picks out exactly
//!    one binder.

use std::collections::HashSet;

use crate::ast::{BinderId, Expression, Statement, VariableRef};

/// Renders a whole program back to source form, one `name = expression;`
/// line per statement, in the order the statements appear.
pub fn render_program(statements: &[Statement]) -> String {
    let mut out = String::new();
    for statement in statements {
        out.push_str(&statement.name);
        out.push_str(" = ");
        out.push_str(&render_expression(&statement.expression));
        out.push_str(";\n");
    }
    out
}

/// Renders a single expression with no enclosing statement.
pub fn render_expression(expression: &Expression) -> String {
    let mut collisions = HashSet::new();
    let mut enclosing = Vec::new();
    collect_collisions(expression, &mut enclosing, &mut collisions);

    let mut printer = Printer { collisions, stack: Vec::new(), out: String::new() };
    printer.write_expression(expression);
    printer.out
}

/// `(binder_id, name)` pairs for which a free variable named `name` occurs
/// somewhere in the scope of the binder `binder_id`. A bound parameter that
/// reuses such a name would otherwise be visually indistinguishable from
/// the free one.
type CollisionSet = HashSet<(BinderId, String)>;

fn collect_collisions(expression: &Expression, enclosing: &mut Vec<BinderId>, collisions: &mut CollisionSet) {
    match expression {
        Expression::Variable { var: VariableRef::Free { global_name }, .. } => {
            for binder_id in enclosing.iter() {
                collisions.insert((*binder_id, global_name.clone()));
            }
        }
        Expression::Variable { var: VariableRef::Bound { .. }, .. } => {}
        Expression::Function { binder_id, body, .. } => {
            enclosing.push(*binder_id);
            collect_collisions(body, enclosing, collisions);
            enclosing.pop();
        }
        Expression::Application { left, right, .. } => {
            collect_collisions(left, enclosing, collisions);
            collect_collisions(right, enclosing, collisions);
        }
    }
}

/// One binder currently in scope while printing: its id (to match
/// occurrences against), its source name, and the disambiguating suffix
/// decided when it was pushed.
struct OpenBinder {
    binder_id: BinderId,
    name: String,
    suffix: u32,
}

struct Printer {
    collisions: CollisionSet,
    stack: Vec<OpenBinder>,
    out: String,
}

impl Printer {
    fn push_binder(&mut self, binder_id: BinderId, name: String) -> u32 {
        let shadow_count = self.stack.iter().filter(|b| b.name == name).count() as u32;
        let collision_bump = u32::from(self.collisions.contains(&(binder_id, name.clone())));
        let suffix = shadow_count + collision_bump;
        self.stack.push(OpenBinder { binder_id, name, suffix });
        suffix
    }

    fn write_name(&mut self, name: &str, suffix: u32) {
        self.out.push_str(name);
        if suffix != 0 {
            self.out.push('_');
            self.out.push_str(&suffix.to_string());
        }
    }

    fn write_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Variable { var: VariableRef::Bound { binder_id, .. }, .. } => {
                let open = self
                    .stack
                    .iter()
                    .rev()
                    .find(|b| b.binder_id == *binder_id)
                    .expect("a bound variable's binder is always still open while printing it");
                let name = open.name.clone();
                let suffix = open.suffix;
                self.write_name(&name, suffix);
            }
            Expression::Variable { var: VariableRef::Free { global_name }, .. } => {
                self.out.push_str(global_name);
            }
            Expression::Function { .. } => self.write_function_chain(expression),
            Expression::Application { left, right, .. } => {
                if left.is_function() {
                    self.out.push('(');
                    self.write_expression(left);
                    self.out.push(')');
                } else {
                    self.write_expression(left);
                }

                self.out.push(' ');

                if right.is_function() || right.is_application() {
                    self.out.push('(');
                    self.write_expression(right);
                    self.out.push(')');
                } else {
                    self.write_expression(right);
                }
            }
        }
    }

    /// Prints a run of directly-nested single-parameter `Function` nodes as
    /// one `\ a b c . body` head, the inverse of how the parser builds that
    /// chain one parameter at a time.
    fn write_function_chain(&mut self, expression: &Expression) {
        let original_depth = self.stack.len();
        self.out.push_str("\\ ");

        let mut node = expression;
        while let Expression::Function { parameter_name, binder_id, body, .. } = node {
            let suffix = self.push_binder(*binder_id, parameter_name.clone());
            self.write_name(parameter_name, suffix);
            self.out.push(' ');
            node = body;
        }

        self.out.push_str(". ");
        self.write_expression(node);

        self.stack.truncate(original_depth);
    }
}
