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

//! The interpreter's single error type.
//!
//! Every stage of the pipeline (tokenizer, parser, reducer, interpreter,
//! CLI shell) reports failure through this one struct rather than five
//! unrelated error types, so `?` composes across stage boundaries without
//! per-call-site conversions.

use crate::span::Span;

#[derive(Debug, Clone)]
pub struct PipelineError {
    /// Stable error code (E0001, E0002, …) — see SPEC_FULL.md §7.
    pub code: &'static str,

    /// Human-readable message, single line.
    pub message: String,

    /// Source location the error is anchored to.
    pub span: Span,

    /// Optional follow-up hint shown by the diagnostics printer.
    pub help: Option<String>,
}

impl PipelineError {
    pub fn new(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self { code, message: message.into(), span, help: None }
    }

    /// Unknown byte encountered while scanning.
    pub fn tokenize_error(offset: usize, span: Span) -> Self {
        Self::new(
            "E0001",
            format!("Tokenization failed at character {offset}"),
            span,
        )
    }

    /// Grammar violation, shadowing, or duplicate top-level definition.
    pub fn parse_error(message: impl Into<String>, span: Span) -> Self {
        let message = message.into();
        Self::new("E0002", format!("Parsing failed: {message}"), span)
    }

    /// No statement named `main` in the program.
    pub fn missing_main() -> Self {
        Self::new(
            "E0003",
            "Interpretation failed: Failed to find definition of 'main'",
            Span::none(),
        )
    }

    /// `reduce` exceeded its recursion budget.
    pub fn recursion_limit(limit: u32) -> Self {
        Self::new(
            "E0004",
            format!("Interpretation failed: recursion limit of {limit} reached"),
            Span::none(),
        )
    }

    /// The CLI couldn't read the requested source file.
    pub fn file_not_found(path: &str) -> Self {
        Self::new("E0005", format!("File '{path}' not found"), Span::none())
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PipelineError {}

pub type PipelineResult<T> = Result<T, PipelineError>;
