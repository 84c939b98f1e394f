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

//! CLI shell (§6). Everything interesting lives in the library crate;
//! this binary only reads a file, calls it, and maps the result onto an
//! exit code.

use std::process::ExitCode;

use lambda_calc::diagnostics::DiagnosticPrinter;
use lambda_calc::error::PipelineError;
use lambda_calc::{ast, interpreter, lexer, parser, printer};

struct Args {
    path: String,
    ast_json: bool,
    verbose: bool,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    raw.next(); // skip argv[0]

    let mut path = None;
    let mut ast_json = false;
    let mut verbose = false;

    for arg in raw {
        match arg.as_str() {
            "--ast-json" => ast_json = true,
            "--verbose" => verbose = true,
            _ if path.is_none() => path = Some(arg),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    let path = path.ok_or_else(|| "usage: lambda-calc [--ast-json] [--verbose] <source-file>".to_string())?;
    Ok(Args { path, ast_json, verbose })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let source = match std::fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(_) => {
            let error = PipelineError::file_not_found(&args.path);
            DiagnosticPrinter::new(args.path.clone(), String::new()).print(&error);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            DiagnosticPrinter::new(args.path, source).print(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, source: &str) -> Result<(), PipelineError> {
    let tokens = lexer::tokenize(source)?;
    let statements = parser::parse_program(tokens)?;

    if args.ast_json {
        let json = serde_json::to_string_pretty(&statements)
            .expect("Statement/Expression serialization never fails");
        println!("{json}");
        return Ok(());
    }

    let result = if args.verbose {
        interpreter::interpret_with_observer(
            &statements,
            Some(&mut |iteration, expression: &ast::Expression| {
                eprintln!("iteration {iteration}: {}", printer::render_expression(expression));
            }),
        )?
    } else {
        interpreter::interpret(&statements)?
    };

    println!("{}", printer::render_expression(&result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_positional_source_path() {
        let args = parse_args(vec!["lambda-calc".to_string(), "main.lc".to_string()].into_iter()).unwrap();
        assert_eq!(args.path, "main.lc");
        assert!(!args.ast_json);
        assert!(!args.verbose);
    }

    #[test]
    fn parses_flags_in_either_order() {
        let args = parse_args(
            vec!["lambda-calc".to_string(), "--verbose".to_string(), "main.lc".to_string(), "--ast-json".to_string()]
                .into_iter(),
        )
        .unwrap();
        assert_eq!(args.path, "main.lc");
        assert!(args.ast_json);
        assert!(args.verbose);
    }

    #[test]
    fn rejects_a_missing_path() {
        assert!(parse_args(vec!["lambda-calc".to_string()].into_iter()).is_err());
    }
}
