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

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{BriskError, Result};
use crate::symbols::symbol::Symbol;

/// Shared handle to a scope. Function values capture one of these.
pub type Scope = Rc<RefCell<SymbolTable>>;

/// Names of the builtin scalar types registered in every root scope.
pub const BUILTIN_TYPES: [&str; 5] = ["int", "double", "string", "bool", "pointer"];

/// One lexical scope.
///
/// Lookup walks outward through `parent`, never inward. Names are unique
/// within a scope.
#[derive(Debug)]
pub struct SymbolTable {
    name: String,
    level: usize,
    symbols: HashMap<String, Rc<Symbol>>,
    parent: Option<Scope>,
}

/// The type symbols every root scope starts with.
#[derive(Debug, Clone)]
pub struct BuiltinTypes {
    pub int: Rc<Symbol>,
    pub double: Rc<Symbol>,
    pub string: Rc<Symbol>,
    pub bool: Rc<Symbol>,
    pub pointer: Rc<Symbol>,
    pub null: Rc<Symbol>,
}

impl BuiltinTypes {
    pub fn new() -> Self {
        let [int, double, string, bool, pointer] = BUILTIN_TYPES.map(Symbol::builtin_type);

        Self {
            int,
            double,
            string,
            bool,
            pointer,
            null: Symbol::null_type(),
        }
    }

    fn all(&self) -> [&Rc<Symbol>; 6] {
        [
            &self.int,
            &self.double,
            &self.string,
            &self.bool,
            &self.pointer,
            &self.null,
        ]
    }
}

impl Default for BuiltinTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a global scope with fresh builtin types and `NullType`.
    pub fn new_root() -> Scope {
        Self::root_with(&BuiltinTypes::new(), [])
    }

    /// Creates a global scope declaring the given builtin types and `extra`.
    ///
    /// Later symbols shadow earlier ones with the same name.
    pub fn root_with(
        types: &BuiltinTypes,
        extra: impl IntoIterator<Item = Rc<Symbol>>,
    ) -> Scope {
        let symbols = types
            .all()
            .into_iter()
            .cloned()
            .chain(extra)
            .map(|symbol| (symbol.name().to_string(), symbol))
            .collect();

        Rc::new(RefCell::new(Self {
            name: "global".to_string(),
            level: 0,
            symbols,
            parent: None,
        }))
    }

    /// Creates an empty scope nested in `parent`.
    pub fn child(name: impl Into<String>, parent: &Scope) -> Scope {
        let level = parent.borrow().level + 1;

        Rc::new(RefCell::new(Self {
            name: name.into(),
            level,
            symbols: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting depth, 0 for the root.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.parent.as_ref()
    }

    /// Looks `name` up here, then in every enclosing scope.
    pub fn find_symbol(&self, name: &str) -> Option<Rc<Symbol>> {
        if let Some(symbol) = self.symbols.get(name) {
            return Some(Rc::clone(symbol));
        }

        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().find_symbol(name))
    }

    /// Looks `name` up in this scope only.
    pub fn find_local(&self, name: &str) -> Option<Rc<Symbol>> {
        self.symbols.get(name).cloned()
    }

    /// `true` if `name` is declared in this scope (parents are not searched).
    pub fn symbol_exists(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Declares `symbol` in this scope.
    ///
    /// # Errors
    /// - NameError if the name is already declared here
    /// - TypeError if the symbol's declared type is not a type
    pub fn add_symbol(&mut self, symbol: Rc<Symbol>) -> Result<()> {
        if self.symbol_exists(symbol.name()) {
            return Err(BriskError::name_error(format!(
                "Invalid redefinition of symbol {}.",
                symbol.name()
            )));
        }

        if let Some(ty) = symbol.declared_type() {
            if !ty.is_type() {
                return Err(BriskError::type_error(format!(
                    "Symbol(identifier) '{}' is not a type",
                    ty.name()
                )));
            }
        }

        self.symbols.insert(symbol.name().to_string(), symbol);
        Ok(())
    }

    /// Snapshot of the symbols declared in this scope.
    pub fn symbols(&self) -> Vec<Rc<Symbol>> {
        self.symbols.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// The outermost scope of the chain `scope` belongs to.
pub fn root_of(scope: &Scope) -> Scope {
    let mut current = Rc::clone(scope);

    loop {
        let parent = current.borrow().parent.clone();
        match parent {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

/// Returns the function type for this signature, registering it in the root
/// scope the first time it is seen.
///
/// Two functions with the same signature therefore share one type symbol,
/// and type equality is `Rc::ptr_eq`.
pub fn intern_function_type(
    scope: &Scope,
    params: Vec<(Rc<Symbol>, bool)>,
    ret: Option<Rc<Symbol>>,
) -> Result<Rc<Symbol>> {
    let root = root_of(scope);
    let name = Symbol::function_type_name(&params, ret.as_deref());

    if let Some(existing) = root.borrow().find_local(&name) {
        return Ok(existing);
    }

    let ty = Symbol::function_type(params, ret);
    root.borrow_mut().add_symbol(Rc::clone(&ty))?;
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn root_has_builtin_types() {
        let root = SymbolTable::new_root();
        let root = root.borrow();

        for name in BUILTIN_TYPES {
            assert!(root.find_symbol(name).unwrap().is_builtin_type());
        }
        assert!(root.find_symbol("NullType").unwrap().is_type());
        assert_eq!(root.level(), 0);
    }

    #[test]
    fn root_with_shares_the_given_symbols() {
        let types = BuiltinTypes::new();
        let root = SymbolTable::root_with(&types, []);

        let int = root.borrow().find_symbol("int").unwrap();
        assert!(Rc::ptr_eq(&int, &types.int));
        assert_eq!(root.borrow().len(), 6);
    }

    #[test]
    fn root_with_declares_extra_symbols() {
        let types = BuiltinTypes::new();
        let null = Symbol::var("null", Rc::clone(&types.null));
        let root = SymbolTable::root_with(&types, [Rc::clone(&null)]);

        let found = root.borrow().find_local("null").unwrap();
        assert!(Rc::ptr_eq(&found, &null));
        assert_eq!(root.borrow().len(), 7);
    }

    #[test]
    fn lookup_walks_outward_only() {
        let root = SymbolTable::new_root();
        let int = root.borrow().find_symbol("int").unwrap();
        let inner = SymbolTable::child("block", &root);

        inner
            .borrow_mut()
            .add_symbol(Symbol::var("x", int.clone()))
            .unwrap();

        assert!(inner.borrow().find_symbol("int").is_some());
        assert!(inner.borrow().find_symbol("x").is_some());
        assert!(root.borrow().find_symbol("x").is_none());
        assert!(!inner.borrow().symbol_exists("int"));
        assert_eq!(inner.borrow().level(), 1);
    }

    #[test]
    fn shadowing_is_allowed_across_scopes() {
        let root = SymbolTable::new_root();
        let int = root.borrow().find_symbol("int").unwrap();
        let inner = SymbolTable::child("block", &root);

        root.borrow_mut().add_symbol(Symbol::var("x", int.clone())).unwrap();
        inner.borrow_mut().add_symbol(Symbol::var("x", int)).unwrap();
    }

    #[test]
    fn duplicate_in_one_scope_is_a_name_error() {
        let root = SymbolTable::new_root();
        let int = root.borrow().find_symbol("int").unwrap();

        root.borrow_mut().add_symbol(Symbol::var("x", int.clone())).unwrap();
        let err = root.borrow_mut().add_symbol(Symbol::var("x", int)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
    }

    #[test]
    fn declared_type_must_be_a_type() {
        let root = SymbolTable::new_root();
        let int = root.borrow().find_symbol("int").unwrap();
        let not_a_type = Symbol::var("y", int);

        let err = root
            .borrow_mut()
            .add_symbol(Symbol::var("x", not_a_type))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn function_types_are_interned_in_the_root() {
        let root = SymbolTable::new_root();
        let int = root.borrow().find_symbol("int").unwrap();
        let inner = SymbolTable::child("block", &root);

        let a = intern_function_type(&inner, vec![(int.clone(), true)], Some(int.clone())).unwrap();
        let b = intern_function_type(&root, vec![(int.clone(), true)], Some(int.clone())).unwrap();
        let c = intern_function_type(&root, vec![(int.clone(), false)], Some(int)).unwrap();

        assert!(Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(a.name(), "(int): int");
        assert!(root.borrow().symbol_exists("(int): int"));
        assert!(!inner.borrow().symbol_exists("(int): int"));
    }
}
