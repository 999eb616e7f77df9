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

use crate::lexer::token::TokenKind;

/// Resolves a scanned word to its **reserved keyword** kind, if it is one.
///
/// Used by the lexer after it has read an identifier-shaped word. Anything
/// not listed here lexes as a plain `TokenKind::Id`; type names such as
/// `int` or `string` are ordinary identifiers resolved through the symbol
/// table.
///
/// # Examples
/// ```text
/// while   -> Some(While)
/// true    -> Some(Bool)
/// counter -> None
/// ```
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "true" | "false" => TokenKind::Bool,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "func" => TokenKind::Func,
        "return" => TokenKind::Return,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "loop" => TokenKind::Loop,
        "break" => TokenKind::Break,
        "class" => TokenKind::Class,
        "new" => TokenKind::New,
        "static" => TokenKind::Static,
        "init" => TokenKind::Init,
        _ => return None,
    };

    Some(kind)
}
