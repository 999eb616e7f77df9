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

//! Built-in functions.
//!
//! Built-ins are not symbols: a call whose callee is a plain name is checked
//! against this table before the name is resolved, so they cannot be
//! shadowed.

/// `pow`, `sqrt`, `sin`, `cos`
pub mod math;

/// `print`, `println` and the output sink
pub mod console;

pub use console::{Console, ConsoleFn};
pub use math::MathFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Math(MathFn),
    Console(ConsoleFn),
}

/// Finds the built-in called `name`.
pub fn lookup(name: &str) -> Option<Builtin> {
    let builtin = match name {
        "pow" => Builtin::Math(MathFn::Pow),
        "sqrt" => Builtin::Math(MathFn::Sqrt),
        "sin" => Builtin::Math(MathFn::Sin),
        "cos" => Builtin::Math(MathFn::Cos),
        "print" => Builtin::Console(ConsoleFn::Print),
        "println" => Builtin::Console(ConsoleFn::Println),
        _ => return None,
    };

    Some(builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(lookup("sqrt"), Some(Builtin::Math(MathFn::Sqrt)));
        assert_eq!(lookup("println"), Some(Builtin::Console(ConsoleFn::Println)));
        assert_eq!(lookup("printf"), None);
    }
}
