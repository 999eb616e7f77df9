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

/*!
 * BRISK Function Calls
 * --------------------
 *
 * Function values, built-in calls and invocation.
 *
 * A call scope is a child of the scope the function captured when it was
 * created, never of the caller's scope. Arguments are evaluated in the
 * caller's scope first; defaults are evaluated inside the call scope, so a
 * default may refer to earlier parameters. A parameter with neither an
 * argument nor a default is declared but left unbound.
 */

use std::rc::Rc;

use tracing::debug;

use crate::ast::{Ast, Function};
use crate::error::{BriskError, Result};
use crate::interpreter::expressions::as_number;
use crate::interpreter::Interpreter;
use crate::prototypes::{self, Builtin};
use crate::symbols::{intern_function_type, Scope, Symbol, SymbolTable};
use crate::value::Value;

impl Interpreter {
    /* ========================================================================
     * Function values
     * ====================================================================== */

    /// Resolves the parameter and return types of `function` to its
    /// interned function type.
    fn function_type(&self, function: &Function) -> Result<Rc<Symbol>> {
        let params = function
            .params
            .iter()
            .map(|param| Ok((self.lookup_type(&param.type_name)?, param.is_required())))
            .collect::<Result<Vec<_>>>()?;

        let ret = function
            .ret_type
            .as_deref()
            .map(|name| self.lookup_type(name))
            .transpose()?;

        intern_function_type(&self.current, params, ret)
    }

    /// A function value closing over the current scope.
    pub(crate) fn function_value(&mut self, function: &Rc<Function>) -> Result<Rc<Value>> {
        let ty = self.function_type(function)?;

        Ok(self
            .store
            .allocate_function(ty, Rc::clone(function), Rc::clone(&self.current)))
    }

    /// `func name(params) { body }` binds a function value to `name`.
    pub(crate) fn visit_func_decl(&mut self, name: &str, function: &Rc<Function>) -> Result<Rc<Value>> {
        self.bind_function(name, function)?;
        Ok(Rc::clone(&self.null))
    }

    pub(crate) fn bind_function(&mut self, name: &str, function: &Rc<Function>) -> Result<()> {
        if self.current.borrow().symbol_exists(name) {
            return Err(BriskError::name_error(format!(
                "Redefinition of symbol {name}"
            )));
        }

        let value = self.function_value(function)?;
        let symbol = Symbol::function(name, Rc::clone(value.ty()));

        self.declare(Rc::clone(&symbol))?;
        self.store.bind(&symbol, &value);

        debug!(function = name, ty = value.ty().name(), "declared function");
        Ok(())
    }

    pub(crate) fn visit_func_expression(&mut self, function: &Rc<Function>) -> Result<Rc<Value>> {
        self.function_value(function)
    }

    /* ========================================================================
     * Calls
     * ====================================================================== */

    pub(crate) fn visit_func_call(&mut self, fun: &Ast, args: &[Ast]) -> Result<Rc<Value>> {
        self.check_call_depth()?;

        if let Ast::Variable { name } = fun {
            if let Some(builtin) = prototypes::lookup(name) {
                return self.call_builtin(builtin, args);
            }
        }

        let callee = self.visit(fun)?;
        let Some(data) = callee.as_function() else {
            return Err(BriskError::type_error(format!(
                "Value of type {} is not callable",
                callee.ty().name()
            )));
        };

        let label = match fun {
            Ast::Variable { name } | Ast::MemberVar { name, .. } | Ast::StaticVar { name, .. } => {
                name.as_str()
            }
            _ => "<anonymous>",
        };

        let (function, captured) = (Rc::clone(&data.function), Rc::clone(&data.scope));
        self.invoke(&function, &captured, args, label)
    }

    pub(crate) fn check_call_depth(&self) -> Result<()> {
        if self.call_depth >= self.config().max_call_depth {
            return Err(BriskError::recursion_error("Max call stack depth exceeded")
                .with_help(format!(
                    "the limit is {} nested calls",
                    self.config().max_call_depth
                )));
        }

        Ok(())
    }

    fn call_builtin(&mut self, builtin: Builtin, args: &[Ast]) -> Result<Rc<Value>> {
        match builtin {
            Builtin::Math(fun) => {
                fun.check_arity(args.len())?;

                let mut numbers = Vec::with_capacity(args.len());
                for arg in args {
                    let value = self.visit(arg)?;
                    let number = as_number(&value).ok_or_else(|| {
                        BriskError::type_error(format!(
                            "The function {} takes numeric arguments.",
                            fun.name()
                        ))
                    })?;
                    numbers.push(number);
                }

                let result = fun.apply(&numbers)?;
                Ok(self.double_value(result))
            }

            Builtin::Console(fun) => {
                let mut parts = Vec::with_capacity(args.len());
                for arg in args {
                    parts.push(self.visit(arg)?.to_string());
                }

                self.console.write(fun, &parts);
                Ok(Rc::clone(&self.null))
            }
        }
    }

    /// Calls `function` in a new scope under `captured`.
    ///
    /// The result is unpinned on the way out, so ordinary collection applies
    /// to it again in the caller.
    pub(crate) fn invoke(
        &mut self,
        function: &Function,
        captured: &Scope,
        args: &[Ast],
        label: &str,
    ) -> Result<Rc<Value>> {
        let params = &function.params;

        if args.len() > params.len() {
            return Err(BriskError::arity_error(format!(
                "{label} takes at most {} arguments but {} were given",
                params.len(),
                args.len()
            )));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.visit(arg)?;
            values.push(self.copy_if_builtin(value));
        }

        let scope = SymbolTable::child(format!("call:{label}"), captured);

        self.call_depth += 1;
        debug!(function = label, depth = self.call_depth, "call");

        let result = self.in_scope(scope, |this| {
            for (index, param) in params.iter().enumerate() {
                let symbol = Symbol::var(&param.name, this.lookup_type(&param.type_name)?);
                this.declare(Rc::clone(&symbol))?;

                let value = match (values.get(index), &param.default) {
                    (Some(value), _) => Rc::clone(value),
                    (None, Some(default)) => {
                        let value = this.visit(default)?;
                        this.copy_if_builtin(value)
                    }
                    (None, None) => continue,
                };
                this.store.bind(&symbol, &value);
            }

            this.visit(&function.body)
        });

        self.call_depth -= 1;
        self.breaking = false;

        let result = result?;
        result.unpin();
        Ok(result)
    }

    pub(crate) fn copy_if_builtin(&mut self, value: Rc<Value>) -> Rc<Value> {
        if value.is_builtin() {
            self.store.copy(&value)
        } else {
            value
        }
    }

    /// A braced function body. Evaluates to the returned value, or null.
    pub(crate) fn visit_func_body(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        let scope = self.child_scope("func-body");
        self.in_scope(scope, |this| this.run_until_interrupted(statements))?;

        Ok(self
            .returning
            .take()
            .unwrap_or_else(|| Rc::clone(&self.null)))
    }
}
