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

use std::env;

/// Call depth at which a call raises a recursion error.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// How far a `#` comment reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStyle {
    /// `#` up to the next newline.
    #[default]
    Line,

    /// `#` swallows the rest of the input (legacy behaviour).
    ToEndOfInput,
}

/// Session-wide interpreter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterConfig {
    pub max_call_depth: usize,
    pub comment_style: CommentStyle,

    /// Also emit every `print`/`println` line as a `tracing` event on the
    /// `brisk::console` target.
    pub mirror_console_to_log: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            comment_style: CommentStyle::Line,
            mirror_console_to_log: true,
        }
    }
}

impl InterpreterConfig {
    /// Defaults overlaid with `BRISK_MAX_CALL_DEPTH` and `BRISK_COMMENTS`.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| env::var(key).ok())
    }

    /// Applies overrides from any key/value source. Unparseable values are
    /// ignored.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("BRISK_MAX_CALL_DEPTH") {
            match raw.trim().parse::<usize>() {
                Ok(depth) => self.max_call_depth = depth,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid BRISK_MAX_CALL_DEPTH"),
            }
        }

        if let Some(raw) = lookup("BRISK_COMMENTS") {
            match raw.trim() {
                "line" => self.comment_style = CommentStyle::Line,
                "input" => self.comment_style = CommentStyle::ToEndOfInput,
                _ => tracing::warn!(value = %raw, "ignoring invalid BRISK_COMMENTS"),
            }
        }

        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_comment_style(mut self, style: CommentStyle) -> Self {
        self.comment_style = style;
        self
    }

    pub fn with_console_mirroring(mut self, mirror: bool) -> Self {
        self.mirror_console_to_log = mirror;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_reads_known_keys() {
        let config = InterpreterConfig::default().overlay(|key| match key {
            "BRISK_MAX_CALL_DEPTH" => Some("25".to_string()),
            "BRISK_COMMENTS" => Some("input".to_string()),
            _ => None,
        });

        assert_eq!(config.max_call_depth, 25);
        assert_eq!(config.comment_style, CommentStyle::ToEndOfInput);
    }

    #[test]
    fn overlay_ignores_garbage() {
        let config = InterpreterConfig::default().overlay(|key| match key {
            "BRISK_MAX_CALL_DEPTH" => Some("lots".to_string()),
            "BRISK_COMMENTS" => Some("block".to_string()),
            _ => None,
        });

        assert_eq!(config, InterpreterConfig::default());
    }
}
