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

//! The tokens consumed by the parser (§4.1, §3).

use crate::span::Span;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    LambdaHeadStart,
    LambdaHeadEnd,
    Equals,
    Semicolon,
    Whitespace,
    Name(String),
    Eof,
}

impl TokenKind {
    /// Human-readable description used by parser error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::OpenParen => "opening parenthesis",
            TokenKind::CloseParen => "closing parenthesis",
            TokenKind::LambdaHeadStart => "lambda head start",
            TokenKind::LambdaHeadEnd => "lambda head end",
            TokenKind::Equals => "equals sign",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Name(_) => "name",
            TokenKind::Eof => "end of file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
