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

//! The tree-walking evaluator.
//!
//! An [`Interpreter`] is one session: a global scope holding the builtin
//! types and `null`, a persistent REPL scope beneath it, the value store,
//! and the control state of the evaluation in progress (breaking flag,
//! value being returned, call depth). Nothing is process-wide, so sessions
//! are independent.

pub mod calls;
pub mod classes;
pub mod display;
pub mod expressions;
pub mod statements;

use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::ast::Ast;
use crate::config::InterpreterConfig;
use crate::error::{BriskError, Result};
use crate::parser::Parser;
use crate::prototypes::Console;
use crate::stack::ensure_sufficient_stack;
use crate::symbols::{BuiltinTypes, Scope, Symbol, SymbolTable};
use crate::value::{Payload, Value, ValueStore};

pub use display::ResultValue;

/// A BRISK session.
pub struct Interpreter {
    config: InterpreterConfig,

    pub(crate) types: BuiltinTypes,
    pub(crate) store: ValueStore,

    global: Scope,
    session: Scope,
    pub(crate) current: Scope,

    /// The one null value, bound to the global `null` symbol.
    pub(crate) null: Rc<Value>,

    /// Set by `break`, cleared by the loop that consumes it.
    pub(crate) breaking: bool,

    /// Set by `return`, taken by the function body that consumes it.
    pub(crate) returning: Option<Rc<Value>>,

    pub(crate) call_depth: usize,

    pub(crate) console: Console,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let types = BuiltinTypes::new();
        let null_symbol = Symbol::var("null", Rc::clone(&types.null));
        let global = SymbolTable::root_with(&types, [Rc::clone(&null_symbol)]);
        let session = SymbolTable::child("repl", &global);

        let mut store = ValueStore::new();
        let null = store.allocate(Rc::clone(&types.null), Payload::Null);
        store.bind(&null_symbol, &null);

        let console = Console::stdout(config.mirror_console_to_log);

        Self {
            config,
            types,
            store,
            current: Rc::clone(&global),
            global,
            session,
            null,
            breaking: false,
            returning: None,
            call_depth: 0,
            console,
        }
    }

    /// Sends `print`/`println` output to `out` instead of stdout.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.console = Console::new(out, self.config.mirror_console_to_log);
        self
    }

    /* ========================================================================
     * Entry points
     * ====================================================================== */

    /// Parses `source` as a statement list and runs it in the session's
    /// persistent scope. Declarations stay visible to later calls.
    ///
    /// Returns the value of the last statement (or of a top-level `return`).
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn evaluate(&mut self, source: &str) -> Result<ResultValue> {
        let session = Rc::clone(&self.session);
        self.run_source(source, |this, statements| {
            this.with_scope(session, |this| this.run_statements(statements))
        })
    }

    /// Runs `source` in a fresh scope beneath the session scope. The scope is
    /// torn down and swept afterwards, so nothing it declares survives.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn interpret(&mut self, source: &str) -> Result<ResultValue> {
        let scope = SymbolTable::child("interpret", &self.session);
        self.run_source(source, |this, statements| {
            this.in_scope(scope, |this| this.run_statements(statements))
        })
    }

    fn run_source(
        &mut self,
        source: &str,
        run: impl FnOnce(&mut Self, &[Ast]) -> Result<Rc<Value>>,
    ) -> Result<ResultValue> {
        self.reset_control_state();

        let outcome = Parser::with_config(source, &self.config)
            .and_then(|mut parser| parser.parse_to_end())
            .and_then(|statements| run(self, &statements))
            .map(|value| ResultValue::from(&*value));

        self.reset_control_state();
        self.store.collect();

        outcome
    }

    /// Runs top-level statements, stopping at a `return`.
    fn run_statements(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        let mut result = Rc::clone(&self.null);

        for statement in statements {
            result = self.visit(statement)?;

            // a `break` outside any loop has nothing to end
            self.breaking = false;

            if let Some(returned) = self.returning.take() {
                returned.unpin();
                return Ok(returned);
            }
        }

        Ok(result)
    }

    fn reset_control_state(&mut self) {
        self.current = Rc::clone(&self.global);
        self.breaking = false;
        if let Some(returned) = self.returning.take() {
            returned.unpin();
        }
        self.call_depth = 0;
    }

    /* ========================================================================
     * Accessors
     * ====================================================================== */

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn global_scope(&self) -> &Scope {
        &self.global
    }

    /// The persistent scope `evaluate` runs in.
    pub fn session_scope(&self) -> &Scope {
        &self.session
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /* ========================================================================
     * Scopes
     * ====================================================================== */

    /// Runs `f` with `scope` as the current scope, restoring the previous
    /// one afterwards (also on error).
    pub(crate) fn with_scope<T>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let previous = mem::replace(&mut self.current, scope);
        let result = f(self);
        self.current = previous;
        result
    }

    /// Like [`Interpreter::with_scope`], then tears the scope down: its
    /// symbols release their values and the store is swept.
    pub(crate) fn in_scope<T>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let result = self.with_scope(Rc::clone(&scope), f);
        self.store.sweep(&scope.borrow());
        result
    }

    /// A new scope nested in the current one.
    pub(crate) fn child_scope(&self, name: &str) -> Scope {
        SymbolTable::child(name, &self.current)
    }

    /// Resolves a type name from the current scope.
    pub(crate) fn lookup_type(&self, name: &str) -> Result<Rc<Symbol>> {
        let symbol = self
            .current
            .borrow()
            .find_symbol(name)
            .ok_or_else(|| BriskError::name_error(format!("Unknown type {name}.")))?;

        if !symbol.is_type() {
            return Err(BriskError::type_error(format!(
                "Symbol(identifier) '{name}' is not a type"
            )));
        }

        Ok(symbol)
    }

    /// Declares `symbol` in the current scope.
    pub(crate) fn declare(&mut self, symbol: Rc<Symbol>) -> Result<()> {
        self.current.borrow_mut().add_symbol(symbol)
    }

    /* ========================================================================
     * Dispatch
     * ====================================================================== */

    /// Evaluates one node.
    pub(crate) fn visit(&mut self, node: &Ast) -> Result<Rc<Value>> {
        ensure_sufficient_stack(|| self.dispatch(node))
    }

    fn dispatch(&mut self, node: &Ast) -> Result<Rc<Value>> {
        match node {
            // Literals
            Ast::Double { value } => self.visit_double(value),
            Ast::Int { value } => self.visit_int(value),
            Ast::Bool { value } => Ok(self.visit_bool(value)),
            Ast::Str { value } => Ok(self.string_value(value.clone())),

            // Operators
            Ast::BinOp { op, left, right } => self.visit_bin_op(*op, left, right),
            Ast::UnaryOp { op, right } => self.visit_unary_op(*op, right),
            Ast::TernaryOp {
                cond,
                then_branch,
                else_branch,
            } => self.visit_ternary(cond, then_branch, else_branch),
            Ast::NoOp => Ok(Rc::clone(&self.null)),

            // Variables
            Ast::Declaration {
                var_type,
                name,
                initial,
            } => self.visit_declaration(var_type, name, initial.as_deref()),
            Ast::Variable { name } => self.visit_variable(name),
            Ast::Assignment { target, value } => self.visit_assignment(target, value),

            // Control flow
            Ast::Block { statements } => self.visit_block(statements),
            Ast::If {
                cond,
                then_branch,
                else_branch,
            } => self.visit_if(cond, then_branch, else_branch.as_deref()),
            Ast::For {
                init,
                cond,
                incr,
                body,
            } => self.visit_for(init, cond, incr, body),
            Ast::While { cond, body } => self.visit_while(cond, body),
            Ast::Loop { body } => self.visit_loop(body),
            Ast::Break => {
                self.breaking = true;
                Ok(Rc::clone(&self.null))
            }
            Ast::Return { value } => self.visit_return(value.as_deref()),

            // Functions
            Ast::FuncExpression { function } => self.visit_func_expression(function),
            Ast::FuncDecl { name, function } => self.visit_func_decl(name, function),
            Ast::FuncCall { fun, args } => self.visit_func_call(fun, args),
            Ast::FuncBody { statements } => self.visit_func_body(statements),

            // Classes
            Ast::Class {
                name,
                superclass,
                body,
            } => self.visit_class(name, superclass.as_deref(), body),
            Ast::ClassBody { statements } => self.visit_class_body(statements),
            Ast::InstanceBody { statements } => self.visit_instance_body(statements),
            Ast::ClassInitializer { name, args } => self.visit_class_initializer(name, args),
            Ast::ConstructorDecl { function } => self.visit_constructor_decl(function),
            Ast::ConstructorCall { name, .. } => Err(BriskError::not_implemented(format!(
                "Calling the constructor of superclass {name}"
            ))),
            Ast::StaticStatement { statement } => self.visit(statement),
            Ast::MemberVar { inst, name } => self.visit_member(inst, name, false),
            Ast::StaticVar { inst, name } => self.visit_member(inst, name, true),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("config", &self.config)
            .field("values", &self.store.len())
            .field("call_depth", &self.call_depth)
            .finish_non_exhaustive()
    }
}
