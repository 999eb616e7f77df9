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

use crate::span::Span;
use std::fmt;

/// Represents the **category of a lexical token** in the BRISK language.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
///
/// Keywords get a kind of their own so the parser can dispatch on the kind
/// alone; the `text` of a keyword token is always its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer literal: `1`, `100`
    Int,
    /// Real literal, any numeral with a decimal point: `3.14`, `2.`
    Real,
    /// `true` / `false`
    Bool,
    /// Quoted text, without its delimiters
    Str,

    /// Identifier (variables, functions, type names)
    Id,

    // Punctuation
    Comma,
    Semi,
    Colon,
    DColon,
    Dot,
    Quest,
    Arrow,

    // Operators
    Plus,
    PlusEq,
    PlusPlus,
    Minus,
    MinusEq,
    MinusMinus,
    Mul,
    MulEq,
    Div,
    DivEq,
    Pow,
    PowEq,
    Assign,
    Eq,
    Not,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,

    // Delimiters
    LPar,
    RPar,
    LCur,
    RCur,

    // Keywords
    If,
    Else,
    Func,
    Return,
    For,
    While,
    Loop,
    Break,
    Class,
    Init,
    New,
    Static,

    /// End of input. Returned forever once the text is exhausted.
    End,
}

impl TokenKind {
    /// Upper-case name used in token dumps and parse errors.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Real => "REAL",
            TokenKind::Bool => "BOOL",
            TokenKind::Str => "STR",
            TokenKind::Id => "ID",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::DColon => "DCOLON",
            TokenKind::Dot => "DOT",
            TokenKind::Quest => "QUEST",
            TokenKind::Arrow => "ARROW",
            TokenKind::Plus => "PLUS",
            TokenKind::PlusEq => "PLUSE",
            TokenKind::PlusPlus => "PLUSP",
            TokenKind::Minus => "MINUS",
            TokenKind::MinusEq => "MINUSE",
            TokenKind::MinusMinus => "MINUSP",
            TokenKind::Mul => "MUL",
            TokenKind::MulEq => "MULE",
            TokenKind::Div => "DIV",
            TokenKind::DivEq => "DIVE",
            TokenKind::Pow => "POW",
            TokenKind::PowEq => "POWE",
            TokenKind::Assign => "ASS",
            TokenKind::Eq => "EQU",
            TokenKind::Not => "NOT",
            TokenKind::NotEq => "NEQ",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::LtEq => "LET",
            TokenKind::GtEq => "GET",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::LCur => "LCUR",
            TokenKind::RCur => "RCUR",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RET",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::Loop => "LOOP",
            TokenKind::Break => "BREAK",
            TokenKind::Class => "CLASS",
            TokenKind::Init => "INIT",
            TokenKind::New => "NEW",
            TokenKind::Static => "STATIC",
            TokenKind::End => "END",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a **single lexical token** produced by the BRISK lexer.
///
/// # Example Tokens
/// ```text
/// int   →  { kind: Id,  text: "int" }
/// 42    →  { kind: Int, text: "42" }
/// +=    →  { kind: PlusEq, text: "+=" }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token (string literals drop
    /// their quotes).
    pub text: String,

    /// Where the token starts.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// `true` for the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    /// `Token(INT, 42)`: the format of token dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {})", self.kind, self.text)
    }
}
