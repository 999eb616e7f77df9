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

use std::mem;

use crate::error::{BriskError, Result};
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Returns the current token and pulls the next one from the lexer.
    pub(crate) fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Checks the current token's kind without consuming it.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Consumes the current token if it is of `kind`.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes a required token.
    ///
    /// # Errors
    /// A parse error naming the found and the expected kind.
    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            return self.advance();
        }

        Err(BriskError::parse_error(
            format!(
                "Unexpected token: {}. Expected {}",
                self.current.kind, kind
            ),
            Some(kind),
            self.current.kind,
            self.current.span,
        ))
    }

    /// Consumes and returns an identifier.
    pub(crate) fn consume_identifier(&mut self) -> Result<String> {
        Ok(self.consume(TokenKind::Id)?.text)
    }

    /// Kind of the token after the current one, without consuming anything.
    pub(crate) fn peek_next(&self) -> Result<TokenKind> {
        let mut lookahead = self.lexer.clone();
        Ok(lookahead.next_token()?.kind)
    }

    /// Returns true if the parser is at end of input.
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::End)
    }

    /// Consumes a statement terminator.
    ///
    /// The `;` may be left out right before a `}` or at end of input; in every
    /// other position it is required.
    pub(crate) fn statement_terminator(&mut self) -> Result<()> {
        if self.match_token(TokenKind::Semi)? {
            return Ok(());
        }

        if self.check(TokenKind::RCur) || self.is_at_end() {
            return Ok(());
        }

        Err(BriskError::parse_error(
            format!("Unexpected token: {}. Expected SEMI", self.current.kind),
            Some(TokenKind::Semi),
            self.current.kind,
            self.current.span,
        )
        .with_help("end the statement with ';'"))
    }

    /// A parse error at the current token for a malformed construct.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> BriskError {
        BriskError::parse_error(message, None, self.current.kind, self.current.span)
    }
}
