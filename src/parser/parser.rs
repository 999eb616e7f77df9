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

use crate::ast::Ast;
use crate::config::{CommentStyle, InterpreterConfig};
use crate::error::{BriskError, Result};
use crate::lexer::{Lexer, Token, TokenKind};

/// The core BRISK recursive-descent parser.
///
/// This structure maintains:
/// - The lexer it pulls tokens from, one at a time
/// - The current (not yet consumed) token
/// - How deeply it is nested inside class bodies, which is where `static`
///   and `init` are legal
///
/// The actual grammar logic is implemented through extension modules
/// (`statements`, `expressions`, `helpers`) via additional `impl Parser` blocks.
#[derive(Debug, Clone)]
pub struct Parser {
    /// Token source.
    pub(crate) lexer: Lexer,

    /// One-token lookahead: the next token to be consumed.
    pub(crate) current: Token,

    /// Number of enclosing class bodies.
    pub(crate) class_depth: usize,
}

impl Parser {
    /// Creates a parser positioned on the first token of `source`.
    ///
    /// # Errors
    /// A lex error in the very first token.
    pub fn new(source: &str) -> Result<Self> {
        Self::with_comment_style(source, CommentStyle::default())
    }

    /// Like [`Parser::new`], lexing comments the way `config` asks.
    pub fn with_config(source: &str, config: &InterpreterConfig) -> Result<Self> {
        Self::with_comment_style(source, config.comment_style)
    }

    fn with_comment_style(source: &str, style: CommentStyle) -> Result<Self> {
        let mut lexer = Lexer::with_comment_style(source, style);
        let current = lexer.next_token()?;

        Ok(Self {
            lexer,
            current,
            class_depth: 0,
        })
    }

    /// Replaces the input and rewinds to its first token.
    pub fn set_text(&mut self, source: &str) -> Result<()> {
        self.lexer.set_text(source);
        self.current = self.lexer.next_token()?;
        self.class_depth = 0;
        Ok(())
    }

    /// Parses a whole program into a single `Block`.
    ///
    /// # Errors
    /// Any syntax error, or input left over after the last statement (a
    /// stray `}` at top level).
    pub fn parse_program(&mut self) -> Result<Ast> {
        let statements = self.parse_to_end()?;
        Ok(Ast::Block { statements })
    }

    /// Parses a statement list that must reach end of input.
    pub fn parse_to_end(&mut self) -> Result<Vec<Ast>> {
        let statements = self.parse_statement_list()?;

        if !self.is_at_end() {
            return Err(BriskError::parse_error(
                format!("Unexpected token '{}'.", self.current.kind),
                Some(TokenKind::End),
                self.current.kind,
                self.current.span,
            ));
        }

        Ok(statements)
    }

    /// Parses statements until end of input or a closing `}`.
    ///
    /// Used for top-level blocks, block bodies and as the REPL unit.
    pub fn parse_statement_list(&mut self) -> Result<Vec<Ast>> {
        let mut statements = Vec::new();

        while !self.is_at_end() && !self.check(TokenKind::RCur) {
            statements.push(self.statement(true)?);
        }

        tracing::trace!(count = statements.len(), "parsed statement list");
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_program_is_an_empty_block() {
        let ast = Parser::new("  # nothing here").unwrap().parse_program().unwrap();
        assert_eq!(ast, Ast::Block { statements: vec![] });
    }

    #[test]
    fn stray_closing_brace_is_rejected() {
        let err = Parser::new("1; }").unwrap().parse_program().unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Parse {
                expected: Some(TokenKind::End),
                found: TokenKind::RCur
            }
        );
    }

    #[test]
    fn set_text_starts_over() {
        let mut parser = Parser::new("1;").unwrap();
        parser.set_text("x;").unwrap();
        assert_eq!(
            parser.parse_statement_list().unwrap(),
            vec![Ast::Variable { name: "x".into() }]
        );
    }
}
