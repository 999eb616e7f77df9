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

use serde::{Deserialize, Serialize};

use crate::ast::Ast;

/// Represents **one declared parameter** of a function, anonymous function
/// or constructor.
///
/// Parameters are written exactly like declarations:
/// ```text
/// func area(double w, double h = 1.0): double { ... }
///           ^^^^^^^^  ^^^^^^^^^^^^^^
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Name of the declared type (`int`, `double`, a function or class type).
    pub type_name: String,

    /// Parameter name (identifier)
    pub name: String,

    /// Optional default value, evaluated in the call scope when the caller
    /// passes fewer arguments.
    pub default: Option<Ast>,
}

impl Param {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, default: Option<Ast>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            default,
        }
    }

    /// Parameters without a default are the required ones of a function type.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}
