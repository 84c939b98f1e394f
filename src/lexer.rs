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

//! Byte-by-byte tokenizer (§4.1).
//!
//! Single-character tokens are matched first, then a maximal run of
//! whitespace, then a maximal `[A-Za-z_][A-Za-z0-9_]*` name. Any byte that
//! matches none of these is a fatal tokenization failure reporting the
//! offset of the first unmatched input.

use crate::error::PipelineError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_tail(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Scanning state for one tokenization pass over a source string.
///
/// Lives only for the duration of [`tokenize`]; tracks a byte cursor plus
/// the line/column needed to stamp each token's [`Span`].
struct Lexer<'a> {
    source: &'a [u8],
    index: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), index: 0, line: 1, column: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.index == self.source.len()
    }

    fn current(&self) -> u8 {
        self.source[self.index]
    }

    fn span(&self) -> Span {
        Span::new(self.index, self.line, self.column)
    }

    /// Advances the cursor by one byte, updating line/column as it crosses
    /// a newline.
    fn advance(&mut self) {
        if self.current() == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.index += 1;
    }

    fn single_char_token(&mut self, kind: TokenKind) -> Token {
        let span = self.span();
        self.advance();
        Token::new(kind, span)
    }

    fn scan_whitespace(&mut self) -> Token {
        let span = self.span();
        while !self.is_at_end() && is_whitespace(self.current()) {
            self.advance();
        }
        Token::new(TokenKind::Whitespace, span)
    }

    fn scan_name(&mut self) -> Token {
        let span = self.span();
        let start = self.index;
        while !self.is_at_end() && is_name_tail(self.current()) {
            self.advance();
        }
        let name = std::str::from_utf8(&self.source[start..self.index])
            .expect("name bytes are ASCII by construction")
            .to_string();
        Token::new(TokenKind::Name(name), span)
    }
}

/// Scans `source` into a complete token list terminated by `Eof`.
///
/// This is the entry point for lexical analysis in the pipeline: every
/// downstream stage (the parser, the test harness) consumes the `Vec<Token>`
/// this returns, never raw bytes again.
pub fn tokenize(source: &str) -> Result<Vec<Token>, PipelineError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while !lexer.is_at_end() {
        let byte = lexer.current();
        let token = match byte {
            b'(' => lexer.single_char_token(TokenKind::OpenParen),
            b')' => lexer.single_char_token(TokenKind::CloseParen),
            b'\\' => lexer.single_char_token(TokenKind::LambdaHeadStart),
            b'.' => lexer.single_char_token(TokenKind::LambdaHeadEnd),
            b'=' => lexer.single_char_token(TokenKind::Equals),
            b';' => lexer.single_char_token(TokenKind::Semicolon),
            b if is_whitespace(b) => lexer.scan_whitespace(),
            b if is_name_start(b) => lexer.scan_name(),
            _ => {
                let span = lexer.span();
                return Err(PipelineError::tokenize_error(lexer.index, span));
            }
        };
        tokens.push(token);
    }

    tokens.push(Token::new(TokenKind::Eof, lexer.span()));
    Ok(tokens)
}
