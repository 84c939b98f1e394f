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

//! Library crate for the lambda calculus interpreter.
//!
//! The pipeline runs leaves first: [`lexer`] turns source text into
//! [`token`]s, [`parser`] turns tokens into an [`ast`] with de Bruijn
//! indices already resolved, [`reducer`] normalizes a single expression,
//! [`interpreter`] drives the reduce/resolve fixed-point loop that makes
//! top-level recursion work, and [`printer`] renders the result back to
//! disambiguated source text. [`error`] and [`diagnostics`] carry failures
//! across those stage boundaries and render them for a human.

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod reducer;
pub mod span;
pub mod token;

use error::PipelineError;

/// Runs the whole pipeline over `source` and returns the rendered normal
/// form of `main`. This is what [`crate`]'s binary calls; it is exposed
/// here too so integration tests can drive the pipeline without spawning
/// a subprocess.
pub fn run(source: &str) -> Result<String, PipelineError> {
    let tokens = lexer::tokenize(source)?;
    let statements = parser::parse_program(tokens)?;
    let result = interpreter::interpret(&statements)?;
    Ok(printer::render_expression(&result))
}
