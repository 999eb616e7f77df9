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

use std::rc::Rc;

use crate::config::CommentStyle;
use crate::error::{BriskError, Result};
use crate::lexer::keywords::keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Pull-based tokenizer.
///
/// The parser asks for one token at a time with [`Lexer::next_token`]. The
/// source characters sit behind an `Rc`, so cloning a lexer (to peek ahead)
/// only copies the cursor.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Rc<[char]>,
    current: usize,
    line: usize,
    column: usize,
    comment_style: CommentStyle,
}

impl Lexer {
    /// Creates a new BRISK lexer instance from raw source code.
    ///
    /// # Returns
    /// A lexer with:
    /// - Cursor at position `0`
    /// - Line counter set to `1`
    /// - Line comments ending at a newline
    pub fn new(source: &str) -> Self {
        Self::with_comment_style(source, CommentStyle::default())
    }

    pub fn with_comment_style(source: &str, comment_style: CommentStyle) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 0,
            comment_style,
        }
    }

    /// Rewinds to the start of the current text.
    pub fn reset(&mut self) {
        self.current = 0;
        self.line = 1;
        self.column = 0;
    }

    /// Replaces the input and rewinds.
    pub fn set_text(&mut self, source: &str) {
        self.chars = source.chars().collect();
        self.reset();
    }

    /// Scans and returns the next token.
    ///
    /// Classification order:
    /// 1. end of input
    /// 2. digit-leading numeral
    /// 3. identifier or keyword
    /// 4. operators and punctuation (longest match for two-character ones)
    ///
    /// # Errors
    /// A character that starts no token, or a string literal left open at
    /// end of input.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();

        let span = self.span();

        if self.is_at_end() {
            return Ok(Token::new(TokenKind::End, "", span));
        }

        let ch = self.peek();

        if ch.is_ascii_digit() {
            return Ok(self.number(span));
        }

        if ch.is_alphabetic() || ch == '_' {
            return Ok(self.identifier(span));
        }

        self.advance();

        let kind = match ch {
            '"' | '\'' => return self.string_with_delimiter(ch, span),

            '+' => {
                if self.match_char('=') {
                    TokenKind::PlusEq
                } else if self.match_char('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }

            '-' => {
                if self.match_char('=') {
                    TokenKind::MinusEq
                } else if self.match_char('-') {
                    TokenKind::MinusMinus
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }

            '*' => self.either('=', TokenKind::MulEq, TokenKind::Mul),
            '/' => self.either('=', TokenKind::DivEq, TokenKind::Div),
            '^' => self.either('=', TokenKind::PowEq, TokenKind::Pow),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Not),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '=' => self.either('=', TokenKind::Eq, TokenKind::Assign),
            ':' => self.either(':', TokenKind::DColon, TokenKind::Colon),

            // `&` and `|` only exist doubled
            '&' if self.match_char('&') => TokenKind::And,
            '|' if self.match_char('|') => TokenKind::Or,

            '(' => TokenKind::LPar,
            ')' => TokenKind::RPar,
            '{' => TokenKind::LCur,
            '}' => TokenKind::RCur,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Quest,

            other => {
                return Err(BriskError::lex_error(
                    format!("Syntax error. Unknown character: '{other}'"),
                    span,
                ));
            }
        };

        let text: String = self.chars[self.offset_of(span)..self.current].iter().collect();
        Ok(Token::new(kind, text, span))
    }

    /// Skips whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            while !self.is_at_end() && self.peek().is_whitespace() {
                self.advance();
            }

            if self.is_at_end() || self.peek() != '#' {
                return;
            }

            match self.comment_style {
                CommentStyle::Line => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                CommentStyle::ToEndOfInput => {
                    while !self.is_at_end() {
                        self.advance();
                    }
                }
            }
        }
    }

    /// Parses an integer or real numeric literal.
    ///
    /// Digits and at most one `.` are consumed; a numeral containing the
    /// point lexes as `Real`. A second point ends the numeral and is left for
    /// the next token.
    fn number(&mut self, span: Span) -> Token {
        let start = self.current;
        let mut found_point = false;

        while !self.is_at_end() {
            let ch = self.peek();
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !found_point {
                found_point = true;
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.current].iter().collect();
        let kind = if found_point {
            TokenKind::Real
        } else {
            TokenKind::Int
        };

        Token::new(kind, text, span)
    }

    /// Parses an identifier or keyword token.
    fn identifier(&mut self, span: Span) -> Token {
        let start = self.current;

        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();
        let kind = keyword(&text).unwrap_or(TokenKind::Id);

        Token::new(kind, text, span)
    }

    /// Parses a string literal using the provided quote delimiter. The
    /// opening quote has already been consumed.
    fn string_with_delimiter(&mut self, delimiter: char, span: Span) -> Result<Token> {
        let start = self.current;

        while !self.is_at_end() && self.peek() != delimiter {
            self.advance();
        }

        if self.is_at_end() {
            return Err(BriskError::lex_error("Unterminated string literal", span)
                .with_help(format!("close the string with {delimiter}")));
        }

        let value: String = self.chars[start..self.current].iter().collect();
        self.advance(); // closing quote

        Ok(Token::new(TokenKind::Str, value, span))
    }

    /// Returns `matched` and consumes `expected` if it is next, else `single`.
    fn either(&mut self, expected: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.match_char(expected) {
            matched
        } else {
            single
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        ch
    }

    /// The current character, `'\0'` at end of input.
    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    /// Character offset of a span produced on the current line.
    fn offset_of(&self, span: Span) -> usize {
        self.current - (self.column - span.column)
    }
}

/// Lexes a whole source text. The last token is always `End`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.is(TokenKind::End);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn arithmetic_expression() {
        use TokenKind::*;

        let tokens = tokenize("1 + 2 * 3").unwrap();
        let dump: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();

        assert_eq!(
            dump,
            vec![(Int, "1"), (Plus, "+"), (Int, "2"), (Mul, "*"), (Int, "3"), (End, "")]
        );
    }

    #[test]
    fn two_character_operators_are_greedy() {
        use TokenKind::*;

        assert_eq!(
            kinds("+= ++ -> == != <= >= :: && || -= -- *= /= ^="),
            vec![
                PlusEq, PlusPlus, Arrow, Eq, NotEq, LtEq, GtEq, DColon, And, Or, MinusEq,
                MinusMinus, MulEq, DivEq, PowEq, End
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        use TokenKind::*;

        assert_eq!(
            kinds("if else func return for while loop break class new static init true false iffy"),
            vec![
                If, Else, Func, Return, For, While, Loop, Break, Class, New, Static, Init, Bool,
                Bool, Id, End
            ]
        );
    }

    #[test]
    fn numerals() {
        let tokens = tokenize("42 3.14 1.2.3").unwrap();
        let dump: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();

        assert_eq!(
            dump,
            vec![
                (TokenKind::Int, "42"),
                (TokenKind::Real, "3.14"),
                (TokenKind::Real, "1.2"),
                (TokenKind::Dot, "."),
                (TokenKind::Int, "3"),
                (TokenKind::End, ""),
            ]
        );
    }

    #[test]
    fn strings_drop_their_quotes() {
        let tokens = tokenize("\"hello\" 'world'").unwrap();
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[1].kind, TokenKind::Str);
    }

    #[test]
    fn line_comments_stop_at_newline() {
        assert_eq!(
            kinds("1 # one\n2"),
            vec![TokenKind::Int, TokenKind::Int, TokenKind::End]
        );
    }

    #[test]
    fn legacy_comments_swallow_the_rest() {
        let mut lexer = Lexer::with_comment_style("1 # one\n2", CommentStyle::ToEndOfInput);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Int);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
    }

    #[test]
    fn unknown_character_reports_position() {
        let err = tokenize("int x = 1;\nx = $;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.span, Some(Span::new(2, 4)));
        assert!(err.message.contains('$'));
    }

    #[test]
    fn single_ampersand_is_rejected() {
        assert!(tokenize("a & b").is_err());
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("'abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
    }

    #[test]
    fn reset_and_set_text_rewind() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.next_token().unwrap().text, "a");
        lexer.reset();
        assert_eq!(lexer.next_token().unwrap().text, "a");
        lexer.set_text("c");
        assert_eq!(lexer.next_token().unwrap().text, "c");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
    }
}
