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

//! Property-based tests for lexing and literal arithmetic.

use brisk::lexer::{tokenize, TokenKind};
use brisk::{Interpreter, ResultValue};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Runs of blanks, tabs and newlines, possibly empty.
fn arb_space() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

/// Non-empty separator between tokens that would otherwise merge.
fn arb_gap() -> impl Strategy<Value = String> {
    "[ \t\n]{1,4}"
}

fn arb_int() -> impl Strategy<Value = i64> {
    0i64..100_000
}

/// Doubles with two decimals, written the way a user would.
fn arb_double() -> impl Strategy<Value = String> {
    (0u32..1_000_000).prop_map(|n| format!("{}.{:02}", n / 100, n % 100))
}

fn arb_int_op() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*")]
}

fn arb_double_op() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")]
}

fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| (token.kind, token.text))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn whitespace_does_not_change_tokens(
        lead in arb_space(),
        a in arb_space(),
        b in arb_space(),
        c in arb_space(),
        d in arb_space(),
        trail in arb_space(),
    ) {
        let spaced = format!("{lead}1{a}+{b}2{c}*{d}3{trail}");
        prop_assert_eq!(kinds_and_texts(&spaced), kinds_and_texts("1 + 2 * 3"));
    }

    #[test]
    fn identifiers_need_only_some_gap(gap in arb_gap(), name in "[a-z][a-z0-9_]{0,8}") {
        let source = format!("int{gap}{name}");
        let tokens = kinds_and_texts(&source);

        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(&tokens[1].1, &name);
    }

    #[test]
    fn int_arithmetic_matches_the_host(a in arb_int(), b in arb_int(), op in arb_int_op()) {
        let expected = match op {
            "+" => a + b,
            "-" => a - b,
            _ => a * b,
        };

        let result = Interpreter::new().evaluate(&format!("{a} {op} {b}")).unwrap();
        prop_assert_eq!(result, ResultValue::Int(expected));
    }

    #[test]
    fn double_arithmetic_matches_the_host(
        a in arb_double(),
        b in arb_double(),
        op in arb_double_op(),
    ) {
        let (x, y) = (a.parse::<f64>().unwrap(), b.parse::<f64>().unwrap());
        prop_assume!(op != "/" || y != 0.0);

        let expected = match op {
            "+" => x + y,
            "-" => x - y,
            "*" => x * y,
            _ => x / y,
        };

        let result = Interpreter::new().evaluate(&format!("{a} {op} {b}")).unwrap();
        prop_assert_eq!(result, ResultValue::Double(expected));
    }

    /// Letters are left out so no keyword can form an endless `loop`.
    #[test]
    fn evaluation_never_panics_on_symbol_soup(source in "[0-9 +*/^()<>=!&|;.,:?{}'#\n-]{0,40}") {
        let _ = Interpreter::new().evaluate(&source);
    }
}
