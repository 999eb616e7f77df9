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

use std::fmt;

use serde::Serialize;

use crate::value::{Payload, Value};

/// ============================================================================
/// Value display
/// ============================================================================
/// The text `print`, string concatenation and the REPL show for a value.
///
/// ```text
/// null                 → null
/// 3.5 / 1e400          → 3.5 / Infinity
/// func (int): int      → <func (int): int at: 4>
/// class Point          → <Class: Point at: 7>
/// new Point()          → <instance of Point at: 9>
/// ```
/// ============================================================================
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Payload::Null => f.write_str("null"),
            Payload::Int(i) => write!(f, "{i}"),
            Payload::Double(d) => f.write_str(&format_double(*d)),
            Payload::Str(s) => f.write_str(s),
            Payload::Bool(b) => write!(f, "{b}"),
            Payload::Function(_) => {
                write!(f, "<func {} at: {}>", self.ty().name(), self.address())
            }
            Payload::Class(_) => {
                write!(f, "<Class: {} at: {}>", self.ty().name(), self.address())
            }
            Payload::Instance(_) => {
                write!(f, "<instance of {} at: {}>", self.ty().name(), self.address())
            }
        }
    }
}

pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// A detached snapshot of an evaluation result.
///
/// Scalars carry their payload; functions, classes and instances carry
/// their display text, since the live value belongs to the session's store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ResultValue {
    Int(i64),
    Double(f64),
    Str(String),
    Bool(bool),
    Function(String),
    Class(String),
    Instance(String),
    Null,
}

impl ResultValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResultValue::Null)
    }
}

impl From<&Value> for ResultValue {
    fn from(value: &Value) -> Self {
        match value.payload() {
            Payload::Null => ResultValue::Null,
            Payload::Int(i) => ResultValue::Int(*i),
            Payload::Double(d) => ResultValue::Double(*d),
            Payload::Str(s) => ResultValue::Str(s.clone()),
            Payload::Bool(b) => ResultValue::Bool(*b),
            Payload::Function(_) => ResultValue::Function(value.to_string()),
            Payload::Class(_) => ResultValue::Class(value.to_string()),
            Payload::Instance(_) => ResultValue::Instance(value.to_string()),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Int(i) => write!(f, "{i}"),
            ResultValue::Double(d) => f.write_str(&format_double(*d)),
            ResultValue::Bool(b) => write!(f, "{b}"),
            ResultValue::Str(text)
            | ResultValue::Function(text)
            | ResultValue::Class(text)
            | ResultValue::Instance(text) => f.write_str(text),
            ResultValue::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::BuiltinTypes;
    use crate::value::ValueStore;
    use std::rc::Rc;

    #[test]
    fn doubles_print_like_numbers() {
        assert_eq!(format_double(2.5), "2.5");
        assert_eq!(format_double(3.0), "3");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::INFINITY), "Infinity");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn scalars_snapshot_their_payload() {
        let types = BuiltinTypes::new();
        let mut store = ValueStore::new();

        let text = store.allocate(Rc::clone(&types.string), Payload::Str("hi".into()));
        let flag = store.allocate(Rc::clone(&types.bool), Payload::Bool(true));
        let null = store.allocate(Rc::clone(&types.null), Payload::Null);

        assert_eq!(ResultValue::from(&*text), ResultValue::Str("hi".into()));
        assert_eq!(ResultValue::from(&*flag).to_string(), "true");
        assert!(ResultValue::from(&*null).is_null());
    }

    #[test]
    fn serializes_with_a_type_tag() {
        let json = serde_json::to_string(&ResultValue::Int(7)).unwrap();
        assert_eq!(json, r#"{"type":"int","value":7}"#);

        let json = serde_json::to_string(&ResultValue::Null).unwrap();
        assert_eq!(json, r#"{"type":"null"}"#);
    }
}
