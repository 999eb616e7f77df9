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

use crate::error::{BriskError, Result};

/// Numeric built-ins. All of them return `double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    /// `pow(x, y)`, or `pow(x)` for `x` squared.
    Pow,
    Sqrt,
    Sin,
    Cos,
}

impl MathFn {
    pub fn name(self) -> &'static str {
        match self {
            MathFn::Pow => "pow",
            MathFn::Sqrt => "sqrt",
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
        }
    }

    /// Checks the argument count before anything is evaluated.
    ///
    /// # Errors
    /// ArityError naming the count the function takes.
    pub fn check_arity(self, count: usize) -> Result<()> {
        let (accepted, takes) = match self {
            MathFn::Pow => (count == 1 || count == 2, 2),
            _ => (count == 1, 1),
        };

        if accepted {
            Ok(())
        } else {
            Err(BriskError::arity_error(format!(
                "The function {} takes {} arguments.",
                self.name(),
                takes
            )))
        }
    }

    /// Applies the function to already checked arguments.
    pub fn apply(self, args: &[f64]) -> Result<f64> {
        self.check_arity(args.len())?;

        let x = args[0];
        Ok(match self {
            MathFn::Pow => x.powf(args.get(1).copied().unwrap_or(2.0)),
            MathFn::Sqrt => x.sqrt(),
            MathFn::Sin => x.sin(),
            MathFn::Cos => x.cos(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn pow_with_one_argument_squares() {
        assert_eq!(MathFn::Pow.apply(&[3.0]).unwrap(), 9.0);
        assert_eq!(MathFn::Pow.apply(&[2.0, 10.0]).unwrap(), 1024.0);
    }

    #[test]
    fn trigonometry_and_roots() {
        assert_eq!(MathFn::Sqrt.apply(&[16.0]).unwrap(), 4.0);
        assert_eq!(MathFn::Sin.apply(&[0.0]).unwrap(), 0.0);
        assert_eq!(MathFn::Cos.apply(&[0.0]).unwrap(), 1.0);
    }

    #[test]
    fn wrong_arity() {
        let err = MathFn::Sqrt.check_arity(2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arity);
        assert_eq!(err.message, "The function sqrt takes 1 arguments.");

        assert!(MathFn::Pow.check_arity(0).is_err());
        assert!(MathFn::Pow.check_arity(3).is_err());
    }
}
