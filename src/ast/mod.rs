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

//! The BRISK syntax tree.
//!
//! One closed enum, [`Ast`], covers every construct. Nodes are built once by
//! the parser and only traversed afterwards. Function bodies sit behind an
//! `Rc` because every function value created at run time shares its
//! definition with the tree it came from.
//!
//! The tree serializes to JSON with a `kind` tag per node, which is the tree
//! representation handed to tooling.

pub mod ops;
pub mod param;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use ops::{BinaryOp, UnaryOp};
pub use param::Param;

/// Everything a function value needs to be called: its parameter list, its
/// optional return type and its body.
///
/// The body is a `FuncBody` for braced functions and any expression for the
/// arrow form `func(int x) -> x * 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub params: Vec<Param>,
    pub ret_type: Option<String>,
    pub body: Ast,
}

impl Function {
    pub fn new(params: Vec<Param>, ret_type: Option<String>, body: Ast) -> Self {
        Self {
            params,
            ret_type,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Ast {
    /* --------------------------------------------------------------------
     * Literals (kept as source text, converted on evaluation)
     * ------------------------------------------------------------------ */
    Double {
        value: String,
    },
    Int {
        value: String,
    },
    Bool {
        value: String,
    },
    Str {
        value: String,
    },

    /* --------------------------------------------------------------------
     * Operators
     * ------------------------------------------------------------------ */
    TernaryOp {
        cond: Box<Ast>,
        then_branch: Box<Ast>,
        else_branch: Box<Ast>,
    },
    BinOp {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    UnaryOp {
        op: UnaryOp,
        right: Box<Ast>,
    },

    /// Empty statement. Evaluates to null.
    NoOp,

    /* --------------------------------------------------------------------
     * Variables
     * ------------------------------------------------------------------ */
    /// `type name [= initial]`
    Declaration {
        var_type: String,
        name: String,
        initial: Option<Box<Ast>>,
    },
    Variable {
        name: String,
    },
    /// `target = value`. `target` is a `Variable`, `MemberVar` or
    /// `StaticVar` for anything the interpreter accepts.
    Assignment {
        target: Box<Ast>,
        value: Box<Ast>,
    },
    Block {
        statements: Vec<Ast>,
    },

    /* --------------------------------------------------------------------
     * Functions
     * ------------------------------------------------------------------ */
    FuncExpression {
        function: Rc<Function>,
    },
    FuncDecl {
        name: String,
        function: Rc<Function>,
    },
    FuncCall {
        fun: Box<Ast>,
        args: Vec<Ast>,
    },
    FuncBody {
        statements: Vec<Ast>,
    },
    Return {
        value: Option<Box<Ast>>,
    },

    /* --------------------------------------------------------------------
     * Control flow
     * ------------------------------------------------------------------ */
    If {
        cond: Box<Ast>,
        then_branch: Box<Ast>,
        else_branch: Option<Box<Ast>>,
    },
    For {
        init: Box<Ast>,
        cond: Box<Ast>,
        incr: Box<Ast>,
        body: Box<Ast>,
    },
    While {
        cond: Box<Ast>,
        body: Box<Ast>,
    },
    Loop {
        body: Box<Ast>,
    },
    Break,

    /* --------------------------------------------------------------------
     * Classes
     * ------------------------------------------------------------------ */
    /// `class Name [: Super] { ... }`. The body is a `ClassBody` holding the
    /// static members followed by one `InstanceBody`.
    Class {
        name: String,
        superclass: Option<String>,
        body: Rc<Ast>,
    },
    ClassBody {
        statements: Vec<Ast>,
    },
    InstanceBody {
        statements: Vec<Ast>,
    },
    /// `new Name(args)`
    ClassInitializer {
        name: String,
        args: Vec<Ast>,
    },
    /// `init(params) { body }` inside a class body.
    ConstructorDecl {
        function: Rc<Function>,
    },
    /// `init Name(args);` inside a constructor.
    ConstructorCall {
        name: String,
        args: Vec<Ast>,
    },
    StaticStatement {
        statement: Box<Ast>,
    },
    /// `inst.name`
    MemberVar {
        inst: Box<Ast>,
        name: String,
    },
    /// `inst::name`
    StaticVar {
        inst: Box<Ast>,
        name: String,
    },
}

impl Ast {
    /// The `kind` tag this node serializes with.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Ast::Double { .. } => "Double",
            Ast::Int { .. } => "Int",
            Ast::Bool { .. } => "Bool",
            Ast::Str { .. } => "Str",
            Ast::TernaryOp { .. } => "TernaryOp",
            Ast::BinOp { .. } => "BinOp",
            Ast::UnaryOp { .. } => "UnaryOp",
            Ast::NoOp => "NoOp",
            Ast::Declaration { .. } => "Declaration",
            Ast::Variable { .. } => "Variable",
            Ast::Assignment { .. } => "Assignment",
            Ast::Block { .. } => "Block",
            Ast::FuncExpression { .. } => "FuncExpression",
            Ast::FuncDecl { .. } => "FuncDecl",
            Ast::FuncCall { .. } => "FuncCall",
            Ast::FuncBody { .. } => "FuncBody",
            Ast::Return { .. } => "Return",
            Ast::If { .. } => "If",
            Ast::For { .. } => "For",
            Ast::While { .. } => "While",
            Ast::Loop { .. } => "Loop",
            Ast::Break => "Break",
            Ast::Class { .. } => "Class",
            Ast::ClassBody { .. } => "ClassBody",
            Ast::InstanceBody { .. } => "InstanceBody",
            Ast::ClassInitializer { .. } => "ClassInitializer",
            Ast::ConstructorDecl { .. } => "ConstructorDecl",
            Ast::ConstructorCall { .. } => "ConstructorCall",
            Ast::StaticStatement { .. } => "StaticStatement",
            Ast::MemberVar { .. } => "MemberVar",
            Ast::StaticVar { .. } => "StaticVar",
        }
    }

    pub(crate) fn binary(op: BinaryOp, left: Ast, right: Ast) -> Ast {
        Ast::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub(crate) fn assignment(target: Ast, value: Ast) -> Ast {
        Ast::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nodes_serialize_with_kind_tag() {
        let node = Ast::binary(
            BinaryOp::Add,
            Ast::Int { value: "1".into() },
            Ast::Variable { name: "x".into() },
        );

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "BinOp",
                "op": "+",
                "left": { "kind": "Int", "value": "1" },
                "right": { "kind": "Variable", "name": "x" }
            })
        );
    }

    #[test]
    fn function_nodes_deserialize_back() {
        let node = Ast::FuncDecl {
            name: "id".into(),
            function: Rc::new(Function::new(
                vec![Param::new("int", "x", None)],
                Some("int".into()),
                Ast::FuncBody {
                    statements: vec![Ast::Return {
                        value: Some(Box::new(Ast::Variable { name: "x".into() })),
                    }],
                },
            )),
        };

        let json = serde_json::to_string(&node).unwrap();
        let back: Ast = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.kind_name(), "FuncDecl");
    }
}
