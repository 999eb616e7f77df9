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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes `parse_program` / `parse_statement_list`
pub mod parser;

/// Statement-level parsing:
/// - blocks, if / while / for / loop / break / return
/// - named functions
/// - class bodies, `static` and `init`
pub mod statements;

/// Expression-level parsing:
/// - ternary → logical → comparison → additive → term → power → postfix → factor
/// - declarations, anonymous functions, `new`
pub mod expressions;

/// Shared parser helpers:
/// - token matching and consumption
/// - one-token lookahead
/// - statement terminators
pub mod helpers;

pub use parser::Parser;
