/*
 * ==========================================================================
 * BRISK - A small imperative scripting language
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the BRISK programming language project.
 *
 * BRISK is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::span::Span;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BriskError>;

/// The category of a [`BriskError`].
///
/// Every error raised by the lexer, parser or interpreter falls into exactly
/// one of these buckets. Hosts usually only need the display name and the
/// stable code; tests match on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// An unrecognized character (or an unterminated string) in the source.
    Lex,

    /// The parser met `found` where it needed `expected` (when a single
    /// token kind was expected) or a malformed construct.
    Parse {
        expected: Option<TokenKind>,
        found: TokenKind,
    },

    /// Undefined name, duplicate definition in one scope, unknown type name.
    Name,

    /// Operand type mismatch, non-boolean condition, non-type used as a type,
    /// calling something that is not a function.
    Type,

    /// Wrong number of arguments.
    Arity,

    /// Call depth ceiling exceeded.
    Recursion,

    /// A language feature that parses but has no evaluation semantics.
    NotImplemented,
}

impl ErrorKind {
    /// Stable error code (`E_NAME`, `E_TYPE`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Lex => "E_LEX",
            ErrorKind::Parse { .. } => "E_PARSE",
            ErrorKind::Name => "E_NAME",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::Arity => "E_ARITY",
            ErrorKind::Recursion => "E_RECURSION",
            ErrorKind::NotImplemented => "E_NOT_IMPLEMENTED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lex => "LexError",
            ErrorKind::Parse { .. } => "ParseError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Arity => "ArityError",
            ErrorKind::Recursion => "RecursionError",
            ErrorKind::NotImplemented => "NotImplementedError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct BriskError {
    /// Error category (also provides the stable code)
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Source location, when the failing construct still carries one
    pub span: Option<Span>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl BriskError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Unrecognized input character.
    pub fn lex_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lex, message).at(span)
    }

    /// Unexpected token.
    pub fn parse_error(
        message: impl Into<String>,
        expected: Option<TokenKind>,
        found: TokenKind,
        span: Span,
    ) -> Self {
        Self::new(ErrorKind::Parse { expected, found }, message).at(span)
    }

    /// Undefined or duplicate name.
    pub fn name_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Name, message)
    }

    /// Invalid operation / operand types.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn arity_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Arity, message)
    }

    pub fn recursion_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Recursion, message)
    }

    pub fn not_implemented(feature: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NotImplemented,
            format!("{feature} is not implemented"),
        )
    }

    /// Stable code of this error's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Attach a source location (builder-style).
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_kind_name() {
        let err = BriskError::name_error("Variable named x wasn't found.");
        assert_eq!(err.to_string(), "NameError: Variable named x wasn't found.");
        assert_eq!(err.code(), "E_NAME");
    }

    #[test]
    fn parse_errors_carry_expected_and_found() {
        let err = BriskError::parse_error(
            "Unexpected token",
            Some(TokenKind::Semi),
            TokenKind::RCur,
            Span::new(3, 4),
        );
        assert_eq!(
            err.kind,
            ErrorKind::Parse {
                expected: Some(TokenKind::Semi),
                found: TokenKind::RCur
            }
        );
        assert_eq!(err.span, Some(Span::new(3, 4)));
    }

    #[test]
    fn not_implemented_names_the_feature() {
        let err = BriskError::not_implemented("class inheritance").with_help("drop the ': Base' clause");
        assert_eq!(err.message, "class inheritance is not implemented");
        assert_eq!(err.help.as_deref(), Some("drop the ': Base' clause"));
    }
}
