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

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::ast::{Ast, Function};
use crate::symbols::{Scope, Symbol, SymbolTable};
use crate::value::{Address, ClassData, FunctionData, InstanceData, Payload, Value};

/// Address-indexed heap of runtime values.
///
/// Values are handed out as `Rc<Value>`: a value dropped from the store by a
/// sweep stays usable by whoever still holds the handle (an operand halfway
/// through an expression), it just no longer has an address anyone can
/// look up.
#[derive(Debug, Default)]
pub struct ValueStore {
    values: BTreeMap<Address, Rc<Value>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One past the highest address in use, 0 when empty.
    ///
    /// Addresses freed at the top by a sweep are handed out again.
    pub fn next_address(&self) -> Address {
        self.values
            .last_key_value()
            .map_or(0, |(address, _)| address + 1)
    }

    fn insert(&mut self, ty: Rc<Symbol>, payload: Payload) -> Rc<Value> {
        let address = self.next_address();
        let value = Rc::new(Value::new(ty, payload, address));
        self.values.insert(address, Rc::clone(&value));
        value
    }

    /// Stores a new value with no referrers.
    pub fn allocate(&mut self, ty: Rc<Symbol>, payload: Payload) -> Rc<Value> {
        self.insert(ty, payload)
    }

    pub fn allocate_function(
        &mut self,
        ty: Rc<Symbol>,
        function: Rc<Function>,
        scope: Scope,
    ) -> Rc<Value> {
        self.insert(ty, Payload::Function(FunctionData { function, scope }))
    }

    pub fn allocate_class(
        &mut self,
        ty: Rc<Symbol>,
        class_scope: Scope,
        outer_scope: Scope,
        body: Rc<Ast>,
    ) -> Rc<Value> {
        self.insert(
            ty,
            Payload::Class(ClassData {
                class_scope,
                outer_scope,
                body,
            }),
        )
    }

    pub fn allocate_instance(&mut self, ty: Rc<Symbol>, class: Rc<Value>, scope: Scope) -> Rc<Value> {
        self.insert(ty, Payload::Instance(InstanceData { class, scope }))
    }

    /// Duplicates `value` (type and payload) at a fresh address.
    pub fn copy(&mut self, value: &Value) -> Rc<Value> {
        self.insert(Rc::clone(value.ty()), value.payload().clone())
    }

    pub fn get(&self, address: Address) -> Option<Rc<Value>> {
        self.values.get(&address).cloned()
    }

    /// The value `symbol` is bound to.
    ///
    /// A symbol whose address now belongs to a value that does not list it
    /// as a referrer (its own value was collected and the address reused)
    /// is treated as unbound.
    pub fn get_bound(&self, symbol: &Symbol) -> Option<Rc<Value>> {
        let value = self.get(symbol.address()?)?;
        value.has_referrer(symbol).then_some(value)
    }

    /// Points `symbol` at `value`, releasing whatever it held before.
    pub fn bind(&mut self, symbol: &Symbol, value: &Rc<Value>) {
        self.release(symbol);
        self.adopt(value);
        symbol.set_address(Some(value.address()));
        value.add_referrer(symbol);
    }

    /// Puts a value that a sweep dropped while it was still in use back
    /// into the store, at a fresh address if its old one was reused.
    fn adopt(&mut self, value: &Rc<Value>) {
        match self.values.get(&value.address()) {
            Some(stored) if Rc::ptr_eq(stored, value) => {}
            Some(_) => {
                let address = self.next_address();
                value.set_address(address);
                self.values.insert(address, Rc::clone(value));
            }
            None => {
                self.values.insert(value.address(), Rc::clone(value));
            }
        }
    }

    /// Drops `symbol` from the referrers of the value it is bound to.
    pub fn release(&mut self, symbol: &Symbol) {
        if let Some(value) = symbol.address().and_then(|address| self.get(address)) {
            value.remove_referrer(symbol);
        }
    }

    /// Drops `symbol` from the referrers of every stored value.
    pub fn release_all_references_of(&mut self, symbol: &Symbol) {
        for value in self.values.values() {
            value.remove_referrer(symbol);
        }
    }

    /// Releases every symbol declared in `scope`, then collects every value
    /// left with no referrers that is not pinned.
    ///
    /// Returns the number of values collected.
    pub fn sweep(&mut self, scope: &SymbolTable) -> usize {
        for symbol in scope.symbols() {
            self.release_all_references_of(&symbol);
        }

        let collected = self.collect();

        tracing::trace!(
            scope = scope.name(),
            collected,
            remaining = self.values.len(),
            "swept scope"
        );

        collected
    }

    /// Collects unreferenced, unpinned values without releasing anything.
    pub fn collect(&mut self) -> usize {
        let before = self.values.len();
        self.values.retain(|_, value| value.is_live());
        before - self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored values in address order.
    pub fn values(&self) -> impl Iterator<Item = &Rc<Value>> {
        self.values.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type(root: &Scope) -> Rc<Symbol> {
        root.borrow().find_symbol("int").unwrap()
    }

    #[test]
    fn addresses_grow_from_the_top() {
        let root = SymbolTable::new_root();
        let mut store = ValueStore::new();

        let a = store.allocate(int_type(&root), Payload::Int(1));
        let b = store.allocate(int_type(&root), Payload::Int(2));

        assert_eq!(a.address(), 0);
        assert_eq!(b.address(), 1);
        assert_eq!(store.next_address(), 2);
    }

    #[test]
    fn sweep_collects_unreferenced_values_of_the_scope() {
        let root = SymbolTable::new_root();
        let block = SymbolTable::child("block", &root);
        let mut store = ValueStore::new();

        let kept = store.allocate(int_type(&root), Payload::Int(1));
        let outer = Symbol::var("outer", int_type(&root));
        root.borrow_mut().add_symbol(outer.clone()).unwrap();
        store.bind(&outer, &kept);

        let local = store.allocate(int_type(&root), Payload::Int(2));
        let x = Symbol::var("x", int_type(&root));
        block.borrow_mut().add_symbol(x.clone()).unwrap();
        store.bind(&x, &local);

        assert_eq!(store.len(), 2);
        assert_eq!(store.sweep(&block.borrow()), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(kept.address()).is_some());
        assert!(store.get_bound(&outer).is_some());
    }

    #[test]
    fn pinned_values_survive_a_sweep() {
        let root = SymbolTable::new_root();
        let block = SymbolTable::child("block", &root);
        let mut store = ValueStore::new();

        let value = store.allocate(int_type(&root), Payload::Int(7));
        value.pin();
        store.sweep(&block.borrow());
        assert_eq!(store.len(), 1);

        value.unpin();
        store.sweep(&block.borrow());
        assert!(store.is_empty());
    }

    #[test]
    fn rebinding_releases_the_old_value() {
        let root = SymbolTable::new_root();
        let mut store = ValueStore::new();
        let x = Symbol::var("x", int_type(&root));

        let first = store.allocate(int_type(&root), Payload::Int(1));
        let second = store.allocate(int_type(&root), Payload::Int(2));

        store.bind(&x, &first);
        store.bind(&x, &second);

        assert_eq!(first.referrer_count(), 0);
        assert_eq!(second.referrer_count(), 1);
        assert_eq!(store.get_bound(&x).unwrap().address(), second.address());
    }

    #[test]
    fn stale_symbol_reads_as_unbound() {
        let root = SymbolTable::new_root();
        let block = SymbolTable::child("block", &root);
        let mut store = ValueStore::new();
        let x = Symbol::var("x", int_type(&root));

        let value = store.allocate(int_type(&root), Payload::Int(1));
        store.bind(&x, &value);
        store.release(&x);
        store.sweep(&block.borrow());

        // the freed address is handed out again
        let other = store.allocate(int_type(&root), Payload::Int(9));
        assert_eq!(other.address(), value.address());
        assert!(store.get_bound(&x).is_none());
    }

    #[test]
    fn binding_a_collected_value_puts_it_back() {
        let root = SymbolTable::new_root();
        let block = SymbolTable::child("block", &root);
        let mut store = ValueStore::new();
        let x = Symbol::var("x", int_type(&root));

        let temporary = store.allocate(int_type(&root), Payload::Int(1));
        store.sweep(&block.borrow());
        let squatter = store.allocate(int_type(&root), Payload::Int(2));
        assert_eq!(squatter.address(), temporary.address());

        store.bind(&x, &temporary);

        assert_ne!(temporary.address(), squatter.address());
        let bound = store.get_bound(&x).unwrap();
        assert!(Rc::ptr_eq(&bound, &temporary));
    }

    #[test]
    fn collect_keeps_referenced_values() {
        let root = SymbolTable::new_root();
        let mut store = ValueStore::new();
        let x = Symbol::var("x", int_type(&root));

        let kept = store.allocate(int_type(&root), Payload::Int(1));
        store.allocate(int_type(&root), Payload::Int(2));
        store.bind(&x, &kept);

        assert_eq!(store.collect(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn copy_gets_a_new_address() {
        let root = SymbolTable::new_root();
        let mut store = ValueStore::new();

        let value = store.allocate(int_type(&root), Payload::Int(3));
        let copy = store.copy(&value);

        assert_ne!(copy.address(), value.address());
        assert!(matches!(copy.payload(), Payload::Int(3)));
        assert!(Rc::ptr_eq(copy.ty(), value.ty()));
    }
}
