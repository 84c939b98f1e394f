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

use crate::error::PipelineError;
use crate::span::Span;

/// Renders human-friendly, compiler-style diagnostics for [`PipelineError`].
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// The output is intentionally inspired by `rustc` diagnostics, simplified
/// and with no color support.
pub struct DiagnosticPrinter {
    /// Full source code of the file being interpreted.
    ///
    /// Stored as a single string so we can easily extract specific
    /// lines for error reporting.
    source: String,

    /// Name of the source file, used only for display purposes.
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a new diagnostic printer for a given source file.
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self { file_name: file_name.into(), source: source.into() }
    }

    /// Prints a formatted error diagnostic to stderr.
    ///
    /// Errors with no real source position (missing `main`, recursion
    /// limit, file-not-found — see [`Span::none`]) skip the source
    /// excerpt and caret entirely, since there is nothing in the file to
    /// point at.
    ///
    /// # Output Example
    /// ```text
    /// error[E0002]: Parsing failed: unexpected end of file
    ///   --> main.lc:3:1
    ///    |
    ///  3 | main = x
    ///    | ^
    /// ```
    pub fn print(&self, error: &PipelineError) {
        let Span { line, column, .. } = error.span;

        if line == 0 {
            eprintln!("error[{}]: {}", error.code, error.message);
        } else {
            let lines: Vec<&str> = self.source.lines().collect();
            let src_line = lines.get(line.saturating_sub(1)).unwrap_or(&"");

            eprintln!("error[{}]: {}\n  --> {}:{}:{}", error.code, error.message, self.file_name, line, column + 1);
            eprintln!("   |");
            eprintln!("{:>3} | {}", line, src_line);

            let mut underline = String::new();
            for _ in 0..column {
                underline.push(' ');
            }
            underline.push('^');
            eprintln!("   | {}", underline);
        }

        if let Some(help) = &error.help {
            eprintln!("\nhelp: {}", help);
        }
    }
}
