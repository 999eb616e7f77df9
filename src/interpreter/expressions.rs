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

/*!
 * BRISK Expression Evaluator
 * --------------------------
 *
 * Literals, operators, variable reads, declarations and assignment.
 *
 * Operand rules:
 *
 *  • arithmetic needs two operands of the same numeric type
 *  • `+` with a string on either side concatenates the displayed operands
 *  • `/` is only defined on two doubles
 *  • `^` subtracts (long-standing language behaviour)
 *  • `==` compares int and double numerically and is also true for the
 *    very same stored value
 *  • `< > <= >=` order numbers and bools, and are false for anything else
 *  • `&&` and `||` take bools and short-circuit
 */

use std::cmp::Ordering;
use std::rc::Rc;

use crate::ast::{Ast, BinaryOp, UnaryOp};
use crate::error::{BriskError, Result};
use crate::interpreter::Interpreter;
use crate::symbols::Symbol;
use crate::value::{Payload, Value};

impl Interpreter {
    /* ========================================================================
     * Literal construction
     * ====================================================================== */

    pub(crate) fn int_value(&mut self, value: i64) -> Rc<Value> {
        self.store.allocate(Rc::clone(&self.types.int), Payload::Int(value))
    }

    pub(crate) fn double_value(&mut self, value: f64) -> Rc<Value> {
        self.store
            .allocate(Rc::clone(&self.types.double), Payload::Double(value))
    }

    pub(crate) fn string_value(&mut self, value: String) -> Rc<Value> {
        self.store
            .allocate(Rc::clone(&self.types.string), Payload::Str(value))
    }

    pub(crate) fn bool_value(&mut self, value: bool) -> Rc<Value> {
        self.store.allocate(Rc::clone(&self.types.bool), Payload::Bool(value))
    }

    /// `int` when `value` is integral, `double` otherwise.
    fn number_value(&mut self, value: f64) -> Rc<Value> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            self.int_value(value as i64)
        } else {
            self.double_value(value)
        }
    }

    /// Integer literals are read as numbers and rounded.
    pub(crate) fn visit_int(&mut self, text: &str) -> Result<Rc<Value>> {
        let number = parse_number(text, "int")?;
        Ok(self.int_value(number.round() as i64))
    }

    pub(crate) fn visit_double(&mut self, text: &str) -> Result<Rc<Value>> {
        let number = parse_number(text, "double")?;
        Ok(self.double_value(number))
    }

    pub(crate) fn visit_bool(&mut self, text: &str) -> Rc<Value> {
        self.bool_value(text.eq_ignore_ascii_case("true"))
    }

    /* ========================================================================
     * Operators
     * ====================================================================== */

    pub(crate) fn visit_bin_op(&mut self, op: BinaryOp, left: &Ast, right: &Ast) -> Result<Rc<Value>> {
        match op {
            BinaryOp::And | BinaryOp::Or => self.logical(op, left, right),
            _ => {
                let left = self.visit(left)?;
                let right = self.visit(right)?;
                self.binary(op, &left, &right)
            }
        }
    }

    fn binary(&mut self, op: BinaryOp, left: &Rc<Value>, right: &Rc<Value>) -> Result<Rc<Value>> {
        match op {
            BinaryOp::Add
                if matches!(left.payload(), Payload::Str(_))
                    || matches!(right.payload(), Payload::Str(_)) =>
            {
                Ok(self.string_value(format!("{left}{right}")))
            }

            BinaryOp::Div => match (left.payload(), right.payload()) {
                (Payload::Double(a), Payload::Double(b)) => Ok(self.double_value(a / b)),
                _ => Err(BriskError::type_error(
                    "Numeric division must be with operands of type double.",
                )),
            },

            BinaryOp::Eq => Ok(self.bool_value(equal(left, right))),
            BinaryOp::NotEq => Ok(self.bool_value(!equal(left, right))),

            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
                let holds = ordering(left, right).is_some_and(|ordering| match op {
                    BinaryOp::Lt => ordering.is_lt(),
                    BinaryOp::Gt => ordering.is_gt(),
                    BinaryOp::LtEq => ordering.is_le(),
                    _ => ordering.is_ge(),
                });
                Ok(self.bool_value(holds))
            }

            _ => self.arithmetic(op, left, right),
        }
    }

    fn arithmetic(&mut self, op: BinaryOp, left: &Value, right: &Value) -> Result<Rc<Value>> {
        match (left.payload(), right.payload()) {
            (Payload::Int(a), Payload::Int(b)) => {
                let result = match op {
                    BinaryOp::Add => a.wrapping_add(*b),
                    BinaryOp::Mul => a.wrapping_mul(*b),
                    // `^` is subtraction, as it has always been
                    _ => a.wrapping_sub(*b),
                };
                Ok(self.int_value(result))
            }

            (Payload::Double(a), Payload::Double(b)) => {
                let result = match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Mul => a * b,
                    _ => a - b,
                };
                Ok(self.double_value(result))
            }

            _ if Rc::ptr_eq(left.ty(), right.ty()) => Err(BriskError::type_error(format!(
                "Operator {op} is not defined for operands of type {}.",
                left.ty().name()
            ))),

            _ => Err(BriskError::type_error(format!(
                "Numeric {} must be with operands of same type.",
                operation_name(op)
            ))),
        }
    }

    /// `&&` / `||`: the right operand is only evaluated when it decides the
    /// result.
    fn logical(&mut self, op: BinaryOp, left: &Ast, right: &Ast) -> Result<Rc<Value>> {
        let left = self.visit(left)?;
        let left = self.expect_bool(&left, &format!("operator {op}"))?;

        let short_circuit = match op {
            BinaryOp::And => !left,
            _ => left,
        };
        if short_circuit {
            return Ok(self.bool_value(left));
        }

        let right = self.visit(right)?;
        let right = self.expect_bool(&right, &format!("operator {op}"))?;
        Ok(self.bool_value(right))
    }

    pub(crate) fn visit_unary_op(&mut self, op: UnaryOp, right: &Ast) -> Result<Rc<Value>> {
        let operand = self.visit(right)?;

        match (op, operand.payload()) {
            (UnaryOp::Not, Payload::Bool(b)) => Ok(self.bool_value(!b)),
            (UnaryOp::Not, _) => Err(BriskError::type_error(
                "Expected a bool operand for operator NOT",
            )),

            (UnaryOp::Plus, Payload::Int(i)) => Ok(self.int_value(*i)),
            (UnaryOp::Minus, Payload::Int(i)) => Ok(self.int_value(i.wrapping_neg())),
            (UnaryOp::Plus, Payload::Double(d)) => Ok(self.number_value(*d)),
            (UnaryOp::Minus, Payload::Double(d)) => Ok(self.number_value(-d)),

            (op, _) => Err(BriskError::type_error(format!(
                "Expected a numeric operand for unary {op}"
            ))),
        }
    }

    pub(crate) fn visit_ternary(&mut self, cond: &Ast, then_branch: &Ast, else_branch: &Ast) -> Result<Rc<Value>> {
        let condition = self.visit(cond)?;

        if self.expect_bool(&condition, "ternary operand")? {
            self.visit(then_branch)
        } else {
            self.visit(else_branch)
        }
    }

    /// The payload of a condition, which must be a `bool`.
    pub(crate) fn expect_bool(&self, value: &Value, context: &str) -> Result<bool> {
        match value.payload() {
            Payload::Bool(b) if Rc::ptr_eq(value.ty(), &self.types.bool) => Ok(*b),
            _ => Err(BriskError::type_error(format!(
                "Required boolean expression as condition for {context}."
            ))),
        }
    }

    /* ========================================================================
     * Variables
     * ====================================================================== */

    pub(crate) fn visit_variable(&mut self, name: &str) -> Result<Rc<Value>> {
        let symbol = self.current.borrow().find_symbol(name).ok_or_else(|| {
            BriskError::name_error(format!("Variable named {name} wasn't found."))
        })?;

        Ok(self.bound_or_null(&symbol))
    }

    /// The value `symbol` holds, or null when it is unbound.
    pub(crate) fn bound_or_null(&self, symbol: &Symbol) -> Rc<Value> {
        self.store
            .get_bound(symbol)
            .unwrap_or_else(|| Rc::clone(&self.null))
    }

    /// `type name [= initial]`
    ///
    /// The initializer runs before the name is declared, so it still sees
    /// an outer variable of the same name. Builtin-typed values are copied
    /// into the new binding.
    pub(crate) fn visit_declaration(
        &mut self,
        var_type: &str,
        name: &str,
        initial: Option<&Ast>,
    ) -> Result<Rc<Value>> {
        if self.current.borrow().symbol_exists(name) {
            return Err(BriskError::name_error(format!("Duplicate variable: {name}")));
        }

        let ty = self.lookup_type(var_type)?;

        let Some(initial) = initial else {
            self.declare(Symbol::var(name, ty))?;
            return Ok(Rc::clone(&self.null));
        };

        let mut value = self.visit(initial)?;
        if value.is_builtin() {
            value = self.store.copy(&value);
        }

        let symbol = Symbol::var(name, ty);
        self.declare(Rc::clone(&symbol))?;
        self.store.bind(&symbol, &value);

        Ok(value)
    }

    /// `target = value`. Evaluates to the assigned value.
    pub(crate) fn visit_assignment(&mut self, target: &Ast, value: &Ast) -> Result<Rc<Value>> {
        let result = self.visit(value)?;
        let symbol = self.assignable_symbol(target)?;

        let stored = if result.is_builtin() {
            self.store.copy(&result)
        } else {
            Rc::clone(&result)
        };
        self.store.bind(&symbol, &stored);

        Ok(result)
    }

    /// The symbol an assignment target names: a variable found by scope
    /// lookup, or a member of the instance or class the inner expression
    /// evaluates to.
    fn assignable_symbol(&mut self, target: &Ast) -> Result<Rc<Symbol>> {
        let symbol = match target {
            Ast::Variable { name } => self.current.borrow().find_symbol(name).ok_or_else(|| {
                BriskError::name_error(format!("Variable named {name} wasn't found."))
            })?,

            Ast::MemberVar { inst, name } => {
                let receiver = self.visit(inst)?;
                self.member_symbol(&receiver, name, false)?
            }

            Ast::StaticVar { inst, name } => {
                let receiver = self.visit(inst)?;
                self.member_symbol(&receiver, name, true)?
            }

            other => {
                return Err(BriskError::type_error(format!(
                    "Cannot assign to a {} expression",
                    other.kind_name()
                )))
            }
        };

        if symbol.is_type() {
            return Err(BriskError::type_error(format!(
                "Cannot assign to type {}",
                symbol.name()
            )));
        }

        Ok(symbol)
    }
}

fn parse_number(text: &str, ty: &str) -> Result<f64> {
    text.parse::<f64>().map_err(|_| {
        BriskError::type_error(format!("Token {text} is not a valid value for type {ty}"))
    })
}

fn operation_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "addition",
        BinaryOp::Sub => "subtraction",
        BinaryOp::Mul => "multiplication",
        BinaryOp::Div => "division",
        BinaryOp::Pow => "exponentiation",
        _ => "operation",
    }
}

/// Numeric view of an `int` or `double`.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value.payload() {
        Payload::Int(i) => Some(*i as f64),
        Payload::Double(d) => Some(*d),
        _ => None,
    }
}

/// `==`: the same stored value, or equal payloads of comparable types.
fn equal(left: &Rc<Value>, right: &Rc<Value>) -> bool {
    if Rc::ptr_eq(left, right) {
        return true;
    }

    match (left.payload(), right.payload()) {
        (Payload::Int(a), Payload::Int(b)) => a == b,
        (Payload::Str(a), Payload::Str(b)) => a == b,
        (Payload::Bool(a), Payload::Bool(b)) => a == b,
        (Payload::Null, Payload::Null) => true,
        (Payload::Function(a), Payload::Function(b)) => {
            Rc::ptr_eq(&a.function, &b.function) && Rc::ptr_eq(&a.scope, &b.scope)
        }
        (Payload::Class(a), Payload::Class(b)) => Rc::ptr_eq(&a.class_scope, &b.class_scope),
        (Payload::Instance(a), Payload::Instance(b)) => Rc::ptr_eq(&a.scope, &b.scope),
        _ => match (as_number(left), as_number(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Order for `< > <= >=`: numbers of either type, and bools.
fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left.payload(), right.payload()) {
        (Payload::Int(a), Payload::Int(b)) => Some(a.cmp(b)),
        (Payload::Bool(a), Payload::Bool(b)) => Some(a.cmp(b)),
        _ => as_number(left)?.partial_cmp(&as_number(right)?),
    }
}
