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

//! Blocks, branches and loops.
//!
//! `break` and `return` are flags on the interpreter rather than Rust
//! control flow: a statement list stops walking as soon as either is set,
//! the innermost loop consumes `breaking`, and the function body consumes
//! `returning`.

use std::rc::Rc;

use crate::ast::Ast;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// `{ ... }` in a scope of its own. Evaluates to its last statement.
    pub(crate) fn visit_block(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        let scope = self.child_scope("block");
        self.in_scope(scope, |this| this.run_until_interrupted(statements))
    }

    /// Runs `statements` in the current scope until one of them breaks or
    /// returns.
    pub(crate) fn run_until_interrupted(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        let mut last = Rc::clone(&self.null);

        for statement in statements {
            last = self.visit(statement)?;

            if self.interrupted() {
                break;
            }
        }

        Ok(last)
    }

    fn interrupted(&self) -> bool {
        self.breaking || self.returning.is_some()
    }

    pub(crate) fn visit_if(
        &mut self,
        cond: &Ast,
        then_branch: &Ast,
        else_branch: Option<&Ast>,
    ) -> Result<Rc<Value>> {
        let condition = self.visit(cond)?;

        if self.expect_bool(&condition, "if statement")? {
            self.visit(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.visit(else_branch)
        } else {
            Ok(Rc::clone(&self.null))
        }
    }

    pub(crate) fn visit_while(&mut self, cond: &Ast, body: &Ast) -> Result<Rc<Value>> {
        loop {
            let condition = self.visit(cond)?;
            if !self.expect_bool(&condition, "while loop")? {
                break;
            }

            self.visit(body)?;
            if self.leave_loop() {
                break;
            }
        }

        Ok(Rc::clone(&self.null))
    }

    /// `loop body`: runs until a `break` or `return`.
    pub(crate) fn visit_loop(&mut self, body: &Ast) -> Result<Rc<Value>> {
        loop {
            self.visit(body)?;
            if self.leave_loop() {
                break;
            }
        }

        Ok(Rc::clone(&self.null))
    }

    /// `for (init; cond; incr) body`. The scope spans all four parts.
    pub(crate) fn visit_for(
        &mut self,
        init: &Ast,
        cond: &Ast,
        incr: &Ast,
        body: &Ast,
    ) -> Result<Rc<Value>> {
        let scope = self.child_scope("for-loop");

        self.in_scope(scope, |this| {
            this.visit(init)?;

            loop {
                let condition = this.visit(cond)?;
                if !this.expect_bool(&condition, "for loop")? {
                    break;
                }

                this.visit(body)?;
                if this.leave_loop() {
                    break;
                }

                this.visit(incr)?;
            }

            Ok(Rc::clone(&this.null))
        })
    }

    /// Consumes a pending `break`. `true` when the loop must stop.
    fn leave_loop(&mut self) -> bool {
        if self.breaking {
            self.breaking = false;
            return true;
        }

        self.returning.is_some()
    }

    /// Pins the returned value so it outlives the sweeps between here and
    /// the function body that takes it.
    pub(crate) fn visit_return(&mut self, value: Option<&Ast>) -> Result<Rc<Value>> {
        let value = match value {
            Some(value) => self.visit(value)?,
            None => Rc::clone(&self.null),
        };

        value.pin();
        self.returning = Some(value);

        Ok(Rc::clone(&self.null))
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{Interpreter, ResultValue};
    use pretty_assertions::assert_eq;

    fn eval(source: &str) -> ResultValue {
        Interpreter::new().evaluate(source).unwrap()
    }

    #[test]
    fn block_evaluates_to_its_last_statement() {
        assert_eq!(eval("{ 1; 2 }"), ResultValue::Int(2));
    }

    #[test]
    fn block_declarations_do_not_leak() {
        let mut interpreter = Interpreter::new();
        interpreter.evaluate("{ int hidden = 1; }").unwrap();

        assert!(interpreter.evaluate("hidden").is_err());
    }

    #[test]
    fn while_counts() {
        assert_eq!(
            eval("int i = 0; while (i < 5) { i++; } i"),
            ResultValue::Int(5)
        );
    }

    #[test]
    fn loop_needs_a_break() {
        assert_eq!(
            eval("int i = 0; loop { i += 2; if (i > 5) break; } i"),
            ResultValue::Int(6)
        );
    }

    #[test]
    fn for_loop_variable_stays_inside() {
        let mut interpreter = Interpreter::new();
        let sum = interpreter
            .evaluate("int sum = 0; for (int i = 0; i < 4; i++) { sum += i; } sum")
            .unwrap();

        assert_eq!(sum, ResultValue::Int(6));
        assert!(interpreter.evaluate("i").is_err());
    }

    #[test]
    fn else_if_chain() {
        let source = "int x = 7; string s = \"\";
            if (x < 5) { s = \"small\"; } else if (x < 10) { s = \"medium\"; } else { s = \"large\"; }
            s";
        assert_eq!(eval(source), ResultValue::Str("medium".into()));
    }

    #[test]
    fn top_level_return_stops_the_program() {
        assert_eq!(eval("return 4; 5"), ResultValue::Int(4));
    }
}
