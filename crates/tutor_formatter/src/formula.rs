//! Formula text builders with the usual school conventions:
//! a coefficient of 1 is omitted, −1 is written as `-`, zero drops the term,
//! and an unknown coefficient is written as its letter.

use crate::number::{decimal_expansion, machine_number};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    Known(BigRational),
    /// Coefficient not supplied; rendered by name.
    Symbol(String),
}

/// `coefficient · var^power`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coefficient: Coefficient,
    pub power: u32,
}

impl Term {
    pub fn known(value: BigRational, power: u32) -> Self {
        Self {
            coefficient: Coefficient::Known(value),
            power,
        }
    }

    pub fn symbol(name: impl Into<String>, power: u32) -> Self {
        Self {
            coefficient: Coefficient::Symbol(name.into()),
            power,
        }
    }
}

fn var_power(var: &str, power: u32) -> String {
    match power {
        0 => String::new(),
        1 => var.to_string(),
        p => format!("{}^{}", var, p),
    }
}

/// Magnitude text for a coefficient multiplying `var^power`.
fn magnitude_text(abs: &BigRational, power: u32, var: &str) -> String {
    let body = var_power(var, power);
    if power > 0 && abs.is_one() {
        return body;
    }
    let number = match decimal_expansion(abs) {
        Some(d) => d,
        None if power > 0 => format!("({})", machine_number(abs)),
        None => machine_number(abs),
    };
    format!("{}{}", number, body)
}

/// Right-hand side of a polynomial in `var`, terms in the given order.
///
/// `[-2·x², 0·x, 5]` → `"-2x^2 + 5"`; all terms zero → `"0"`.
pub fn polynomial_formula(var: &str, terms: &[Term]) -> String {
    let mut out = String::new();

    for term in terms {
        let (negative, text) = match &term.coefficient {
            Coefficient::Known(value) if value.is_zero() => continue,
            Coefficient::Known(value) => (
                value.is_negative(),
                magnitude_text(&value.abs(), term.power, var),
            ),
            Coefficient::Symbol(name) => (false, format!("{}{}", name, var_power(var, term.power))),
        };

        if out.is_empty() {
            if negative {
                out.push('-');
            }
        } else if negative {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        out.push_str(&text);
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Linear factor `(x - r)`; `x` alone when `r = 0`.
pub fn linear_factor(var: &str, root: &BigRational) -> String {
    if root.is_zero() {
        var.to_string()
    } else if root.is_negative() {
        format!("({} + {})", var, machine_number(&-root))
    } else {
        format!("({} - {})", var, machine_number(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    #[test]
    fn omits_unit_coefficients_and_zero_terms() {
        let terms = [Term::known(int(-2), 2), Term::known(int(0), 1), Term::known(int(5), 0)];
        assert_eq!(polynomial_formula("x", &terms), "-2x^2 + 5");

        let terms = [Term::known(int(1), 2), Term::known(int(-1), 1)];
        assert_eq!(polynomial_formula("x", &terms), "x^2 - x");
    }

    #[test]
    fn constant_one_is_kept() {
        let terms = [Term::known(int(-1), 1), Term::known(int(1), 0)];
        assert_eq!(polynomial_formula("x", &terms), "-x + 1");
    }

    #[test]
    fn all_zero_gives_zero() {
        let terms = [Term::known(int(0), 2), Term::known(int(0), 0)];
        assert_eq!(polynomial_formula("x", &terms), "0");
    }

    #[test]
    fn unknown_coefficients_are_symbolic() {
        let terms = [Term::symbol("a", 2), Term::known(int(-3), 1), Term::symbol("c", 0)];
        assert_eq!(polynomial_formula("x", &terms), "ax^2 - 3x + c");
    }

    #[test]
    fn fractional_coefficients() {
        let half = BigRational::new(1.into(), 2.into());
        let third = BigRational::new((-1).into(), 3.into());
        let terms = [Term::known(half, 1), Term::known(third, 0)];
        assert_eq!(polynomial_formula("x", &terms), "0.5x - 1/3");

        let terms = [Term::known(BigRational::new(2.into(), 3.into()), 2)];
        assert_eq!(polynomial_formula("x", &terms), "(2/3)x^2");
    }

    #[test]
    fn linear_factor_signs() {
        assert_eq!(linear_factor("x", &int(5)), "(x - 5)");
        assert_eq!(linear_factor("x", &int(-5)), "(x + 5)");
        assert_eq!(linear_factor("x", &int(0)), "x");
    }
}
