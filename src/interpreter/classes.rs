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

//! Classes and instances.
//!
//! A class value owns a class scope, nested in the scope the class was
//! declared in. `static` members run once, at declaration, inside that
//! scope. Every `new` creates an instance scope nested in the class scope,
//! runs the instance part of the body there and then calls `init`, if the
//! class declares one. Methods therefore close over their instance's scope
//! and reach statics through the parent chain.
//!
//! Inheritance is parsed but not evaluated.

use std::rc::Rc;

use tracing::debug;

use crate::ast::{Ast, Function};
use crate::error::{BriskError, Result};
use crate::interpreter::Interpreter;
use crate::symbols::{Scope, Symbol, SymbolKind, SymbolTable};
use crate::value::{Payload, Value};

impl Interpreter {
    pub(crate) fn visit_class(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        body: &Rc<Ast>,
    ) -> Result<Rc<Value>> {
        if let Some(superclass) = superclass {
            return Err(BriskError::not_implemented(format!(
                "Inheritance (class {name} : {superclass})"
            )));
        }

        if self.current.borrow().symbol_exists(name) {
            return Err(BriskError::name_error(format!(
                "Redefinition of symbol {name}"
            )));
        }

        let symbol = Symbol::class(name);
        let class_scope = self.child_scope(&format!("class:{name}"));
        let class = self.store.allocate_class(
            Rc::clone(&symbol),
            Rc::clone(&class_scope),
            Rc::clone(&self.current),
            Rc::clone(body),
        );

        self.declare(Rc::clone(&symbol))?;
        self.store.bind(&symbol, &class);

        debug!(class = name, address = class.address(), "declared class");

        self.with_scope(class_scope, |this| this.visit(body))?;
        Ok(Rc::clone(&self.null))
    }

    /// Runs the static members. The instance part waits for `new`.
    pub(crate) fn visit_class_body(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        for statement in statements {
            if !matches!(statement, Ast::InstanceBody { .. }) {
                self.visit(statement)?;
            }
        }

        Ok(Rc::clone(&self.null))
    }

    pub(crate) fn visit_instance_body(&mut self, statements: &[Ast]) -> Result<Rc<Value>> {
        for statement in statements {
            self.visit(statement)?;
        }

        Ok(Rc::clone(&self.null))
    }

    /// `init(params) { ... }` binds the constructor in the instance scope.
    pub(crate) fn visit_constructor_decl(&mut self, function: &Rc<Function>) -> Result<Rc<Value>> {
        self.bind_function("init", function)?;
        Ok(Rc::clone(&self.null))
    }

    /// `new Name(args)`
    pub(crate) fn visit_class_initializer(&mut self, name: &str, args: &[Ast]) -> Result<Rc<Value>> {
        self.check_call_depth()?;

        let symbol = self.current.borrow().find_symbol(name).ok_or_else(|| {
            BriskError::name_error(format!("Class named {name} wasn't found."))
        })?;

        if !matches!(symbol.kind(), SymbolKind::Class) {
            return Err(BriskError::type_error(format!("{name} is not a class")));
        }

        let class = self.store.get_bound(&symbol).ok_or_else(|| {
            BriskError::name_error(format!("Class named {name} wasn't found."))
        })?;
        let Some(data) = class.as_class() else {
            return Err(BriskError::type_error(format!("{name} is not a class")));
        };

        let body = Rc::clone(&data.body);
        let scope = SymbolTable::child(format!("instance:{name}"), &data.class_scope);
        let instance = self
            .store
            .allocate_instance(symbol, Rc::clone(&class), Rc::clone(&scope));

        // nothing refers to the instance until the caller binds it
        instance.pin();
        let constructed = self.construct(name, &scope, &body, args);
        instance.unpin();
        constructed?;

        debug!(class = name, address = instance.address(), "constructed instance");
        Ok(instance)
    }

    fn construct(&mut self, name: &str, scope: &Scope, body: &Ast, args: &[Ast]) -> Result<()> {
        if let Ast::ClassBody { statements } = body {
            for statement in statements {
                if let Ast::InstanceBody { statements } = statement {
                    self.with_scope(Rc::clone(scope), |this| {
                        this.visit_instance_body(statements)
                    })?;
                }
            }
        }

        let init = scope.borrow().find_local("init");
        let constructor = init.and_then(|symbol| self.store.get_bound(&symbol));

        match constructor.as_deref().and_then(Value::as_function) {
            Some(data) => {
                let (function, captured) = (Rc::clone(&data.function), Rc::clone(&data.scope));
                self.invoke(&function, &captured, args, "init")?;
            }
            None if !args.is_empty() => {
                return Err(BriskError::arity_error(format!(
                    "Class {name} has no constructor and takes no arguments"
                )));
            }
            None => {}
        }

        Ok(())
    }

    /// `inst.name` / `inst::name`. An unbound member reads as null.
    pub(crate) fn visit_member(&mut self, inst: &Ast, name: &str, static_access: bool) -> Result<Rc<Value>> {
        let receiver = self.visit(inst)?;
        let symbol = self.member_symbol(&receiver, name, static_access)?;

        Ok(self.bound_or_null(&symbol))
    }

    /// Finds `name` on an instance (its own scope, then its class's statics)
    /// or, for `::`, on a class.
    pub(crate) fn member_symbol(
        &self,
        receiver: &Value,
        name: &str,
        static_access: bool,
    ) -> Result<Rc<Symbol>> {
        let found = match receiver.payload() {
            Payload::Instance(data) => {
                let own = data.scope.borrow().find_local(name);
                own.or_else(|| {
                    data.class
                        .as_class()
                        .and_then(|class| class.class_scope.borrow().find_local(name))
                })
            }

            Payload::Class(data) if static_access => data.class_scope.borrow().find_local(name),

            _ => {
                return Err(BriskError::type_error(format!(
                    "Not a valid instance: value of type {}",
                    receiver.ty().name()
                )))
            }
        };

        found.ok_or_else(|| {
            BriskError::name_error(format!(
                "{} has no member named {name}",
                receiver.ty().name()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::interpreter::{Interpreter, ResultValue};
    use pretty_assertions::assert_eq;

    const POINT: &str = "
        class Point {
            static int created = 0;
            int x = 0;
            int y = 0;

            init(int px, int py) {
                x = px;
                y = py;
                Point::created += 1;
            }

            func sum(): int { return x + y; }
        }
    ";

    fn session() -> Interpreter {
        let mut interpreter = Interpreter::new();
        interpreter.evaluate(POINT).unwrap();
        interpreter
    }

    #[test]
    fn constructor_sets_fields() {
        let mut interpreter = session();
        assert_eq!(
            interpreter.evaluate("Point p = new Point(3, 4); p.x").unwrap(),
            ResultValue::Int(3)
        );
        assert_eq!(interpreter.evaluate("p.sum()").unwrap(), ResultValue::Int(7));
    }

    #[test]
    fn instances_do_not_share_fields() {
        let mut interpreter = session();
        interpreter
            .evaluate("Point a = new Point(1, 1); Point b = new Point(5, 5); a.x = 10;")
            .unwrap();

        assert_eq!(interpreter.evaluate("b.x").unwrap(), ResultValue::Int(5));
        assert_eq!(interpreter.evaluate("a.sum()").unwrap(), ResultValue::Int(11));
    }

    #[test]
    fn statics_are_shared() {
        let mut interpreter = session();
        interpreter
            .evaluate("Point a = new Point(1, 2); Point b = new Point(3, 4);")
            .unwrap();

        assert_eq!(
            interpreter.evaluate("Point::created").unwrap(),
            ResultValue::Int(2)
        );
    }

    #[test]
    fn instance_display() {
        let mut interpreter = session();
        let shown = interpreter.evaluate("new Point(0, 0)").unwrap();

        match shown {
            ResultValue::Instance(text) => assert!(text.starts_with("<instance of Point at: ")),
            other => panic!("expected an instance, got {other:?}"),
        }
    }

    #[test]
    fn unknown_member() {
        let mut interpreter = session();
        let err = interpreter
            .evaluate("Point p = new Point(0, 0); p.z")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
    }

    #[test]
    fn member_of_a_number() {
        let err = Interpreter::new().evaluate("int n = 1; n.x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn new_on_a_function() {
        let err = Interpreter::new()
            .evaluate("func f() {} new f()")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn arguments_without_constructor() {
        let err = Interpreter::new()
            .evaluate("class Empty {} new Empty(1)")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arity);
    }

    #[test]
    fn inheritance_is_not_implemented() {
        let err = Interpreter::new()
            .evaluate("class A {} class B : A {}")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
    }
}
