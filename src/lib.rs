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

//! BRISK, a small imperative scripting language.
//!
//! Source text flows through the [`lexer`] into the recursive-descent
//! [`parser`], which builds an [`Ast`]. The tree-walking [`Interpreter`]
//! evaluates it against a chain of [`symbols`] scopes and a reference
//! counted [`value`] store that is swept whenever a scope ends.
//!
//! # Examples
//!
//! ```
//! use brisk::{Interpreter, ResultValue};
//!
//! let mut session = Interpreter::new();
//! session.evaluate("func sq(int x): int { return x * x; }").unwrap();
//!
//! assert_eq!(session.evaluate("sq(7)").unwrap(), ResultValue::Int(49));
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod prototypes;
pub mod span;
pub mod symbols;
pub mod value;

mod stack;

use std::sync::Once;

pub use ast::Ast;
pub use config::{CommentStyle, InterpreterConfig};
pub use diagnostics::DiagnosticPrinter;
pub use error::{BriskError, ErrorKind, Result};
pub use interpreter::{Interpreter, ResultValue};

use parser::Parser;

/// Parses a whole program into a `Block` of its statements.
pub fn parse(source: &str) -> Result<Ast> {
    Parser::new(source)?.parse_program()
}

/// [`parse`], rendered as pretty-printed JSON.
pub fn parse_to_json(source: &str) -> Result<String> {
    let ast = parse(source)?;

    Ok(serde_json::to_string_pretty(&ast).expect("syntax trees always serialize"))
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// `RUST_LOG=brisk=debug` shows calls and class activity,
/// `RUST_LOG=brisk=trace` adds scope sweeps.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
