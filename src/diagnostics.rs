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

use std::fmt::Write as _;

use crate::error::BriskError;
use crate::span::Span;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for BRISK errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// Runtime errors usually carry no location (the tree does not keep spans),
/// in which case only the header and the help line are rendered.
pub struct DiagnosticPrinter {
    /// Full source code of the program being run.
    source: String,

    /// Name shown in the `-->` line (a file path or `<repl>`).
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a new diagnostic printer for a given source text.
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders an error into a string.
    ///
    /// # Output Example
    /// ```text
    /// error[E_LEX]: Unrecognized character '$'
    ///   --> main.bk:2:9
    ///    |
    ///  2 | int x = $;
    ///    |         ^
    /// ```
    pub fn render(&self, error: &BriskError) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "error[{}]: {}", error.code(), error);

        if let Some(Span { line, column }) = error.span {
            // Lines are 1-indexed in diagnostics, vectors are 0-indexed.
            let src_line = self
                .source
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("");

            let _ = writeln!(out, "  --> {}:{}:{}", self.file_name, line, column + 1);
            let _ = writeln!(out, "   |");
            let _ = writeln!(out, "{:>3} | {}", line, src_line);
            let _ = writeln!(out, "   | {}^", " ".repeat(column));
        } else {
            let _ = writeln!(out, "  --> {}", self.file_name);
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Prints a formatted error diagnostic to stderr.
    pub fn print(&self, error: &BriskError) {
        eprint!("{}", self.render(error));
    }
}
