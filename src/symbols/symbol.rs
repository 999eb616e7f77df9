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

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::Address;

/// Process-unique identity of a symbol. Values record their holders by id.
pub type SymbolId = u64;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> SymbolId {
    NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed)
}

/// What a symbol names.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A variable (or parameter).
    Var,

    /// A named function.
    Function,

    /// `int`, `double`, `string`, `bool`, `pointer`. Values of these types
    /// are copied when bound.
    BuiltinType,

    /// The type of `null`.
    NullType,

    /// A function signature. Each parameter type is paired with whether the
    /// parameter is required.
    FunctionType {
        params: Vec<(Rc<Symbol>, bool)>,
        ret: Option<Rc<Symbol>>,
    },

    /// A class. The symbol also holds the address of its class value.
    Class,
}

/// A named, optionally typed binding.
///
/// `stored_address` is the symbol's only link to a value; the value in turn
/// lists the symbol among its referrers.
#[derive(Debug)]
pub struct Symbol {
    id: SymbolId,
    name: String,
    kind: SymbolKind,
    declared_type: Option<Rc<Symbol>>,
    stored_address: Cell<Option<Address>>,
}

impl Symbol {
    fn build(name: impl Into<String>, kind: SymbolKind, declared_type: Option<Rc<Symbol>>) -> Rc<Self> {
        Rc::new(Self {
            id: next_id(),
            name: name.into(),
            kind,
            declared_type,
            stored_address: Cell::new(None),
        })
    }

    pub fn var(name: impl Into<String>, declared_type: Rc<Symbol>) -> Rc<Self> {
        Self::build(name, SymbolKind::Var, Some(declared_type))
    }

    pub fn function(name: impl Into<String>, function_type: Rc<Symbol>) -> Rc<Self> {
        Self::build(name, SymbolKind::Function, Some(function_type))
    }

    pub fn builtin_type(name: impl Into<String>) -> Rc<Self> {
        Self::build(name, SymbolKind::BuiltinType, None)
    }

    pub fn null_type() -> Rc<Self> {
        Self::build("NullType", SymbolKind::NullType, None)
    }

    pub fn class(name: impl Into<String>) -> Rc<Self> {
        Self::build(name, SymbolKind::Class, None)
    }

    /// A function type named by [`Symbol::function_type_name`].
    pub fn function_type(params: Vec<(Rc<Symbol>, bool)>, ret: Option<Rc<Symbol>>) -> Rc<Self> {
        let name = Self::function_type_name(&params, ret.as_deref());
        Self::build(name, SymbolKind::FunctionType { params, ret }, None)
    }

    /// Canonical signature: `(int, double?): bool`.
    ///
    /// Optional parameters get a `?` suffix; the `: ret` part is left out
    /// when there is no declared return type.
    pub fn function_type_name(params: &[(Rc<Symbol>, bool)], ret: Option<&Symbol>) -> String {
        let params = params
            .iter()
            .map(|(ty, required)| {
                if *required {
                    ty.name.clone()
                } else {
                    format!("{}?", ty.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        match ret {
            Some(ret) => format!("({params}): {}", ret.name),
            None => format!("({params})"),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn declared_type(&self) -> Option<&Rc<Symbol>> {
        self.declared_type.as_ref()
    }

    /// `true` for symbols that name a type.
    pub fn is_type(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::BuiltinType
                | SymbolKind::NullType
                | SymbolKind::FunctionType { .. }
                | SymbolKind::Class
        )
    }

    pub fn is_builtin_type(&self) -> bool {
        matches!(self.kind, SymbolKind::BuiltinType)
    }

    /// Declared return type of a function type.
    pub fn return_type(&self) -> Option<&Rc<Symbol>> {
        match &self.kind {
            SymbolKind::FunctionType { ret, .. } => ret.as_ref(),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.stored_address.get()
    }

    pub(crate) fn set_address(&self, address: Option<Address>) {
        self.stored_address.set(address);
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
