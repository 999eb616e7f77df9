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

//! Runtime values and the store that owns them.
//!
//! A value lives in the [`ValueStore`] under its address. Symbols point at
//! values by address and every value records which symbols point at it (its
//! referrers). A value with no referrers that is not pinned is collected by
//! the next sweep.

pub mod store;

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::ast::{Ast, Function};
use crate::symbols::{Scope, Symbol, SymbolId};

pub use store::ValueStore;

/// Key of a value in the store.
pub type Address = usize;

/// A function value: its definition plus the scope it was declared in.
#[derive(Clone)]
pub struct FunctionData {
    pub function: Rc<Function>,
    pub scope: Scope,
}

/// A class value.
#[derive(Clone)]
pub struct ClassData {
    /// Scope holding the static members; parent of every instance scope.
    pub class_scope: Scope,

    /// Scope the class was declared in.
    pub outer_scope: Scope,

    /// The `ClassBody` node.
    pub body: Rc<Ast>,
}

/// An instance of a class.
#[derive(Clone)]
pub struct InstanceData {
    /// The class value this instance was created from.
    pub class: Rc<Value>,

    /// Instance-local scope, a child of the class scope.
    pub scope: Scope,
}

macro_rules! scoped_debug {
    ($ty:ident, $label:literal, $scope:ident) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct($label)
                    .field("scope", &self.$scope.borrow().name())
                    .finish_non_exhaustive()
            }
        }
    };
}

scoped_debug!(FunctionData, "FunctionData", scope);
scoped_debug!(ClassData, "ClassData", class_scope);
scoped_debug!(InstanceData, "InstanceData", scope);

/// What a value holds.
#[derive(Debug, Clone)]
pub enum Payload {
    Null,
    Int(i64),
    Double(f64),
    Str(String),
    Bool(bool),
    Function(FunctionData),
    Class(ClassData),
    Instance(InstanceData),
}

/// A stored runtime value.
#[derive(Debug)]
pub struct Value {
    ty: Rc<Symbol>,
    payload: Payload,
    address: Cell<Address>,
    referrers: RefCell<BTreeSet<SymbolId>>,
    pinned: Cell<bool>,
}

impl Value {
    pub(crate) fn new(ty: Rc<Symbol>, payload: Payload, address: Address) -> Self {
        Self {
            ty,
            payload,
            address: Cell::new(address),
            referrers: RefCell::new(BTreeSet::new()),
            pinned: Cell::new(false),
        }
    }

    /// The value's type symbol.
    pub fn ty(&self) -> &Rc<Symbol> {
        &self.ty
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn address(&self) -> Address {
        self.address.get()
    }

    pub(crate) fn set_address(&self, address: Address) {
        self.address.set(address);
    }

    /// Values of builtin type are copied on bind instead of aliased.
    pub fn is_builtin(&self) -> bool {
        self.ty.is_builtin_type()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null)
    }

    pub fn add_referrer(&self, symbol: &Symbol) {
        self.referrers.borrow_mut().insert(symbol.id());
    }

    pub fn remove_referrer(&self, symbol: &Symbol) -> bool {
        self.referrers.borrow_mut().remove(&symbol.id())
    }

    pub fn has_referrer(&self, symbol: &Symbol) -> bool {
        self.referrers.borrow().contains(&symbol.id())
    }

    pub fn referrer_count(&self) -> usize {
        self.referrers.borrow().len()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.get()
    }

    /// Keeps the value alive across a sweep with no referrers.
    pub fn pin(&self) {
        self.pinned.set(true);
    }

    pub fn unpin(&self) {
        self.pinned.set(false);
    }

    /// Survives a sweep.
    pub(crate) fn is_live(&self) -> bool {
        self.is_pinned() || !self.referrers.borrow().is_empty()
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.payload {
            Payload::Function(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.payload {
            Payload::Class(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&InstanceData> {
        match &self.payload {
            Payload::Instance(data) => Some(data),
            _ => None,
        }
    }
}
