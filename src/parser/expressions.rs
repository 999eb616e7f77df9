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

//! Expression grammar, loosest to tightest:
//!
//! ```text
//! ternary     → logic_or ( "?" logic_or ":" logic_or )*
//! logic_or    → logic_and ( "||" logic_and )*
//! logic_and   → comparison ( "&&" comparison )*
//! comparison  → additive ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) additive )*
//! additive    → term ( ( "+" | "-" ) term )*
//! term        → power ( ( "*" | "/" ) power )*
//! power       → postfix ( "^" postfix )*
//! postfix     → factor ( "++" | "--" | op= ternary | "." ID | "::" ID
//!                      | "(" args ")" | "=" ternary )*
//! factor      → literal | "!" postfix | ("+" | "-") postfix | "(" ternary ")"
//!             | "new" ID "(" args ")" | ID ID [ "=" ternary ] | ID
//!             | "func" "(" params ")" [ ":" ID ] "->" ( "{" body "}" | ternary )
//! ```

use std::rc::Rc;

use crate::ast::{Ast, BinaryOp, Function, UnaryOp};
use crate::error::Result;
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Entry point of the expression grammar.
    pub(crate) fn ternary(&mut self) -> Result<Ast> {
        ensure_sufficient_stack(|| {
            let mut node = self.logic_or()?;

            while self.match_token(TokenKind::Quest)? {
                let then_branch = self.logic_or()?;
                self.consume(TokenKind::Colon)?;
                let else_branch = self.logic_or()?;

                node = Ast::TernaryOp {
                    cond: Box::new(node),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                };
            }

            Ok(node)
        })
    }

    fn logic_or(&mut self) -> Result<Ast> {
        let mut node = self.logic_and()?;

        while self.match_token(TokenKind::Or)? {
            let right = self.logic_and()?;
            node = Ast::binary(BinaryOp::Or, node, right);
        }

        Ok(node)
    }

    fn logic_and(&mut self) -> Result<Ast> {
        let mut node = self.comparison()?;

        while self.match_token(TokenKind::And)? {
            let right = self.comparison()?;
            node = Ast::binary(BinaryOp::And, node, right);
        }

        Ok(node)
    }

    fn comparison(&mut self) -> Result<Ast> {
        let mut node = self.additive()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(node),
            };
            self.advance()?;

            let right = self.additive()?;
            node = Ast::binary(op, node, right);
        }
    }

    fn additive(&mut self) -> Result<Ast> {
        let mut node = self.term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(node),
            };
            self.advance()?;

            let right = self.term()?;
            node = Ast::binary(op, node, right);
        }
    }

    fn term(&mut self) -> Result<Ast> {
        let mut node = self.power()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Mul => BinaryOp::Mul,
                TokenKind::Div => BinaryOp::Div,
                _ => return Ok(node),
            };
            self.advance()?;

            let right = self.power()?;
            node = Ast::binary(op, node, right);
        }
    }

    fn power(&mut self) -> Result<Ast> {
        let mut node = self.postfix()?;

        while self.match_token(TokenKind::Pow)? {
            let right = self.postfix()?;
            node = Ast::binary(BinaryOp::Pow, node, right);
        }

        Ok(node)
    }

    /// Resolves a chain of postfix operators applied to one primary.
    ///
    /// Increments and compound assignments are rewritten on the spot:
    /// `x++` becomes `x = x + 1` and `x *= e` becomes `x = x * e`.
    fn postfix(&mut self) -> Result<Ast> {
        let mut node = self.factor()?;

        loop {
            node = match self.current.kind {
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.advance()?.is(TokenKind::PlusPlus) {
                        BinaryOp::Add
                    } else {
                        BinaryOp::Sub
                    };

                    let one = Ast::Int { value: "1".into() };
                    Ast::assignment(node.clone(), Ast::binary(op, node, one))
                }

                TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::MulEq
                | TokenKind::DivEq
                | TokenKind::PowEq => {
                    let op = match self.advance()?.kind {
                        TokenKind::PlusEq => BinaryOp::Add,
                        TokenKind::MinusEq => BinaryOp::Sub,
                        TokenKind::MulEq => BinaryOp::Mul,
                        TokenKind::DivEq => BinaryOp::Div,
                        _ => BinaryOp::Pow,
                    };

                    let right = self.ternary()?;
                    Ast::assignment(node.clone(), Ast::binary(op, node, right))
                }

                TokenKind::Dot => {
                    self.advance()?;
                    let name = self.consume_identifier()?;
                    Ast::MemberVar {
                        inst: Box::new(node),
                        name,
                    }
                }

                TokenKind::DColon => {
                    self.advance()?;
                    let name = self.consume_identifier()?;
                    Ast::StaticVar {
                        inst: Box::new(node),
                        name,
                    }
                }

                TokenKind::LPar => {
                    self.advance()?;
                    let args = self.arguments()?;
                    Ast::FuncCall {
                        fun: Box::new(node),
                        args,
                    }
                }

                TokenKind::Assign => {
                    self.advance()?;
                    let value = self.ternary()?;
                    Ast::assignment(node, value)
                }

                _ => return Ok(node),
            };
        }
    }

    /// Comma separated arguments after an opening `(`, through the closing
    /// `)`.
    pub(crate) fn arguments(&mut self) -> Result<Vec<Ast>> {
        let mut args = Vec::new();

        while !self.check(TokenKind::RPar) {
            args.push(self.ternary()?);

            if !self.check(TokenKind::RPar) {
                self.consume(TokenKind::Comma)?;
            }
        }

        self.consume(TokenKind::RPar)?;
        Ok(args)
    }

    fn factor(&mut self) -> Result<Ast> {
        match self.current.kind {
            TokenKind::Real => Ok(Ast::Double {
                value: self.advance()?.text,
            }),
            TokenKind::Int => Ok(Ast::Int {
                value: self.advance()?.text,
            }),
            TokenKind::Str => Ok(Ast::Str {
                value: self.advance()?.text,
            }),
            TokenKind::Bool => Ok(Ast::Bool {
                value: self.advance()?.text,
            }),

            TokenKind::Not | TokenKind::Plus | TokenKind::Minus => {
                let op = match self.advance()?.kind {
                    TokenKind::Not => UnaryOp::Not,
                    TokenKind::Plus => UnaryOp::Plus,
                    _ => UnaryOp::Minus,
                };

                let right = self.postfix()?;
                Ok(Ast::UnaryOp {
                    op,
                    right: Box::new(right),
                })
            }

            TokenKind::LPar => {
                self.advance()?;
                let expr = self.ternary()?;
                self.consume(TokenKind::RPar)?;
                Ok(expr)
            }

            TokenKind::New => {
                self.advance()?;
                let name = self.consume_identifier()?;
                self.consume(TokenKind::LPar)?;
                let args = self.arguments()?;
                Ok(Ast::ClassInitializer { name, args })
            }

            TokenKind::Id => {
                let name = self.advance()?.text;

                // `type name` starts a declaration
                if self.check(TokenKind::Id) {
                    return self.declaration(name);
                }

                Ok(Ast::Variable { name })
            }

            TokenKind::Func => {
                self.advance()?;
                self.func_expression()
            }

            other => Err(self.error_here(format!(
                "Unexpected token: {other}. Expected an expression"
            ))),
        }
    }

    /// `name [= initial]`, after the type name has been consumed.
    fn declaration(&mut self, var_type: String) -> Result<Ast> {
        let name = self.consume_identifier()?;

        let initial = if self.match_token(TokenKind::Assign)? {
            Some(Box::new(self.ternary()?))
        } else {
            None
        };

        Ok(Ast::Declaration {
            var_type,
            name,
            initial,
        })
    }

    /// `(params)[: type] -> expr` or `(params)[: type] -> { body }`, after
    /// `func`.
    fn func_expression(&mut self) -> Result<Ast> {
        self.consume(TokenKind::LPar)?;
        let params = self.parameters()?;
        self.consume(TokenKind::RPar)?;

        let ret_type = self.return_type()?;
        self.consume(TokenKind::Arrow)?;

        let body = if self.check(TokenKind::LCur) {
            self.func_body()?
        } else {
            self.ternary()?
        };

        Ok(Ast::FuncExpression {
            function: Rc::new(Function::new(params, ret_type, body)),
        })
    }
}
