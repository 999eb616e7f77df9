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

//! Statement-level grammar: blocks, control flow, named functions and
//! class bodies. Anything else falls through to an expression statement.

use std::rc::Rc;

use crate::ast::{Ast, Function, Param};
use crate::error::{BriskError, Result};
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses a single statement.
    ///
    /// `with_terminator` is false only where the grammar closes the
    /// statement itself (the increment clause of a `for` header).
    pub(crate) fn statement(&mut self, with_terminator: bool) -> Result<Ast> {
        match self.current.kind {
            TokenKind::LCur => self.braced_block(),

            TokenKind::Semi => {
                self.advance()?;
                Ok(Ast::NoOp)
            }

            TokenKind::If => {
                self.advance()?;
                self.if_statement()
            }

            TokenKind::While => {
                self.advance()?;
                self.while_statement()
            }

            TokenKind::For => {
                self.advance()?;
                self.for_statement()
            }

            TokenKind::Loop => {
                self.advance()?;
                let body = self.loop_body()?;
                Ok(Ast::Loop {
                    body: Box::new(body),
                })
            }

            TokenKind::Break => {
                self.advance()?;
                if with_terminator {
                    self.statement_terminator()?;
                }
                Ok(Ast::Break)
            }

            TokenKind::Return => {
                self.advance()?;

                let value = if self.check(TokenKind::Semi)
                    || self.check(TokenKind::RCur)
                    || self.is_at_end()
                {
                    None
                } else {
                    Some(Box::new(self.ternary()?))
                };

                if with_terminator {
                    self.statement_terminator()?;
                }
                Ok(Ast::Return { value })
            }

            // `func name(...)` declares; `func(...)` starts an expression
            TokenKind::Func if self.peek_next()? == TokenKind::Id => {
                self.advance()?;
                self.func_declaration()
            }

            TokenKind::Class => {
                self.advance()?;
                self.class_statement()
            }

            TokenKind::Static => {
                if self.class_depth == 0 {
                    return Err(self.error_here("'static' is only allowed inside a class body"));
                }
                self.advance()?;
                let statement = self.statement(with_terminator)?;
                Ok(Ast::StaticStatement {
                    statement: Box::new(statement),
                })
            }

            TokenKind::Init => {
                if self.class_depth == 0 {
                    return Err(self.error_here("'init' is only allowed inside a class body"));
                }
                self.advance()?;
                self.constructor(with_terminator)
            }

            _ => {
                let expr = self.ternary()?;
                if with_terminator {
                    self.statement_terminator()?;
                }
                Ok(expr)
            }
        }
    }

    /// `{ statements }` as a `Block`.
    fn braced_block(&mut self) -> Result<Ast> {
        self.consume(TokenKind::LCur)?;
        let statements = self.parse_statement_list()?;
        self.consume(TokenKind::RCur)?;
        Ok(Ast::Block { statements })
    }

    /// Body of `if`, `while`, `for` and `loop`: a braced block or one
    /// statement.
    fn loop_body(&mut self) -> Result<Ast> {
        if self.check(TokenKind::LCur) {
            self.braced_block()
        } else {
            self.statement(true)
        }
    }

    /// `if cond body [else (if ... | body)]`, with `if` already consumed.
    fn if_statement(&mut self) -> Result<Ast> {
        let cond = self.ternary()?;
        let then_branch = self.loop_body()?;

        let else_branch = if self.match_token(TokenKind::Else)? {
            if self.match_token(TokenKind::If)? {
                Some(Box::new(self.if_statement()?))
            } else {
                Some(Box::new(self.loop_body()?))
            }
        } else {
            None
        };

        Ok(Ast::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Ast> {
        let cond = self.ternary()?;
        let body = self.loop_body()?;

        Ok(Ast::While {
            cond: Box::new(cond),
            body: Box::new(body),
        })
    }

    /// `for (init; cond; incr) body`, with `for` already consumed.
    ///
    /// The initializer is a full statement and brings its own `;`. An empty
    /// increment clause is allowed.
    fn for_statement(&mut self) -> Result<Ast> {
        self.consume(TokenKind::LPar)?;

        let init = self.statement(true)?;

        let cond = self.ternary()?;
        self.consume(TokenKind::Semi)?;

        let incr = if self.check(TokenKind::RPar) {
            Ast::NoOp
        } else {
            self.statement(false)?
        };

        self.consume(TokenKind::RPar)?;
        let body = self.loop_body()?;

        Ok(Ast::For {
            init: Box::new(init),
            cond: Box::new(cond),
            incr: Box::new(incr),
            body: Box::new(body),
        })
    }

    /// `func name(params)[: type] { body }`, with `func` already consumed.
    fn func_declaration(&mut self) -> Result<Ast> {
        let name = self.consume_identifier()?;

        self.consume(TokenKind::LPar)?;
        let params = self.parameters()?;
        self.consume(TokenKind::RPar)?;

        let ret_type = self.return_type()?;
        let body = self.func_body()?;

        Ok(Ast::FuncDecl {
            name,
            function: Rc::new(Function::new(params, ret_type, body)),
        })
    }

    /// Optional `: type` after a parameter list.
    pub(crate) fn return_type(&mut self) -> Result<Option<String>> {
        if self.match_token(TokenKind::Colon)? {
            Ok(Some(self.consume_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// `{ statements }` as a `FuncBody`.
    pub(crate) fn func_body(&mut self) -> Result<Ast> {
        self.consume(TokenKind::LCur)?;
        let statements = self.parse_statement_list()?;
        self.consume(TokenKind::RCur)?;
        Ok(Ast::FuncBody { statements })
    }

    /// Comma separated `type name [= default]` list, up to (not including)
    /// the closing `)`.
    pub(crate) fn parameters(&mut self) -> Result<Vec<Param>> {
        let mut params = Vec::new();

        if self.check(TokenKind::RPar) {
            return Ok(params);
        }

        loop {
            let type_name = self.consume_identifier()?;
            let name = self.consume_identifier()?;

            let default = if self.match_token(TokenKind::Assign)? {
                Some(self.ternary()?)
            } else {
                None
            };

            params.push(Param::new(type_name, name, default));

            if self.check(TokenKind::RPar) {
                return Ok(params);
            }
            self.consume(TokenKind::Comma)?;
        }
    }

    /// `class Name [: Super] { members }`, with `class` already consumed.
    ///
    /// Members are split into the static part, which runs once when the
    /// class is declared, and the instance part, which runs for every
    /// `new`. The resulting `ClassBody` lists the `StaticStatement`s in
    /// source order followed by a single `InstanceBody`.
    fn class_statement(&mut self) -> Result<Ast> {
        let name = self.consume_identifier()?;

        let superclass = if self.match_token(TokenKind::Colon)? {
            Some(self.consume_identifier()?)
        } else {
            None
        };

        self.consume(TokenKind::LCur)?;
        self.class_depth += 1;
        let members = self.parse_statement_list();
        self.class_depth -= 1;
        let members = members?;
        let close = self.consume(TokenKind::RCur)?;

        let mut statics = Vec::new();
        let mut instance = Vec::new();
        let mut constructors = 0;

        for member in members {
            match member {
                Ast::StaticStatement { .. } => statics.push(member),
                Ast::ConstructorDecl { .. } => {
                    constructors += 1;
                    instance.push(member);
                }
                other => instance.push(other),
            }
        }

        if constructors > 1 {
            return Err(BriskError::parse_error(
                format!("class {name} declares more than one constructor"),
                None,
                close.kind,
                close.span,
            ));
        }

        statics.push(Ast::InstanceBody {
            statements: instance,
        });

        Ok(Ast::Class {
            name,
            superclass,
            body: Rc::new(Ast::ClassBody {
                statements: statics,
            }),
        })
    }

    /// After `init`: either a constructor declaration `init(params) { .. }`
    /// or a superclass constructor call `init Name(args);`.
    fn constructor(&mut self, with_terminator: bool) -> Result<Ast> {
        if self.match_token(TokenKind::LPar)? {
            let params = self.parameters()?;
            self.consume(TokenKind::RPar)?;
            let body = self.func_body()?;

            return Ok(Ast::ConstructorDecl {
                function: Rc::new(Function::new(params, None, body)),
            });
        }

        let name = self.consume_identifier()?;
        self.consume(TokenKind::LPar)?;
        let args = self.arguments()?;

        if with_terminator {
            self.statement_terminator()?;
        }

        Ok(Ast::ConstructorCall { name, args })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Ast, BinaryOp};
    use crate::error::ErrorKind;
    use crate::lexer::TokenKind;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Vec<Ast> {
        Parser::new(source)
            .unwrap()
            .parse_statement_list()
            .unwrap()
    }

    fn parse_err(source: &str) -> ErrorKind {
        Parser::new(source)
            .and_then(|mut p| p.parse_program())
            .unwrap_err()
            .kind
    }

    fn var(name: &str) -> Ast {
        Ast::Variable { name: name.into() }
    }

    fn int(text: &str) -> Ast {
        Ast::Int { value: text.into() }
    }

    #[test]
    fn semicolon_is_required_between_statements() {
        assert_eq!(
            parse_err("x 1"),
            ErrorKind::Parse {
                expected: Some(TokenKind::Semi),
                found: TokenKind::Int
            }
        );
    }

    #[test]
    fn two_identifiers_form_a_declaration() {
        assert_eq!(
            parse("x y"),
            vec![Ast::Declaration {
                var_type: "x".into(),
                name: "y".into(),
                initial: None
            }]
        );
    }

    #[test]
    fn semicolon_is_optional_before_brace_and_end() {
        assert_eq!(
            parse("{ x } y"),
            vec![Ast::Block { statements: vec![var("x")] }, var("y")]
        );
    }

    #[test]
    fn lone_semicolon_is_a_noop() {
        assert_eq!(parse(";"), vec![Ast::NoOp]);
    }

    #[test]
    fn stray_paren_is_an_error_instead_of_a_hang() {
        assert!(matches!(parse_err(")"), ErrorKind::Parse { .. }));
    }

    #[test]
    fn if_else_if_chain() {
        let ast = parse("if a { 1; } else if b 2; else { 3; }");

        let Ast::If { else_branch: Some(else_branch), .. } = &ast[0] else {
            panic!("expected an if, got {ast:?}");
        };
        assert!(matches!(**else_branch, Ast::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn for_header() {
        let ast = parse("for (int i = 0; i < 3; i++) { }");

        let Ast::For { init, cond, incr, .. } = &ast[0] else {
            panic!("expected a for loop");
        };
        assert!(matches!(**init, Ast::Declaration { .. }));
        assert_eq!(**cond, Ast::binary(BinaryOp::Lt, var("i"), int("3")));
        assert_eq!(
            **incr,
            Ast::assignment(var("i"), Ast::binary(BinaryOp::Add, var("i"), int("1")))
        );
    }

    #[test]
    fn for_without_increment() {
        let ast = parse("for (;true;) break;");
        assert!(matches!(&ast[0], Ast::For { init, incr, .. } if **init == Ast::NoOp && **incr == Ast::NoOp));
    }

    #[test]
    fn return_without_value() {
        assert_eq!(parse("return;"), vec![Ast::Return { value: None }]);
    }

    #[test]
    fn named_function_declaration() {
        let ast = parse("func add(int a, int b = 2): int { return a + b; }");

        let Ast::FuncDecl { name, function } = &ast[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(name, "add");
        assert_eq!(function.params.len(), 2);
        assert!(function.params[0].is_required());
        assert!(!function.params[1].is_required());
        assert_eq!(function.ret_type.as_deref(), Some("int"));
    }

    #[test]
    fn class_members_are_split() {
        let ast = parse("class P { int x = 1; static int count = 0; init(int v) { x = v; } }");

        let Ast::Class { name, body, superclass } = &ast[0] else {
            panic!("expected a class");
        };
        assert_eq!(name, "P");
        assert_eq!(*superclass, None);

        let Ast::ClassBody { statements } = &**body else {
            panic!("expected a class body");
        };
        assert!(matches!(statements[0], Ast::StaticStatement { .. }));
        let Ast::InstanceBody { statements: instance } = &statements[1] else {
            panic!("expected the instance body last");
        };
        assert!(matches!(instance[0], Ast::Declaration { .. }));
        assert!(matches!(instance[1], Ast::ConstructorDecl { .. }));
    }

    #[test]
    fn static_and_init_need_a_class() {
        assert!(matches!(parse_err("static int x;"), ErrorKind::Parse { .. }));
        assert!(matches!(parse_err("init(){}"), ErrorKind::Parse { .. }));
    }

    #[test]
    fn two_constructors_are_rejected() {
        assert!(matches!(
            parse_err("class A { init() {} init() {} }"),
            ErrorKind::Parse { .. }
        ));
    }

    #[test]
    fn constructor_call_inside_class() {
        let ast = parse("class B : A { init() { init A(1); } }");
        let Ast::Class { superclass, .. } = &ast[0] else {
            panic!("expected a class");
        };
        assert_eq!(superclass.as_deref(), Some("A"));
    }
}
