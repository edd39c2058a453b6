//! Stepwise exact evaluation of arithmetic expression trees.
//!
//! Every value carries the notation it is shown in (integer, common fraction
//! or decimal) so the derivation reads the way a learner writes it. One
//! [`ArithStep`] is emitted per transformation: common denominator, scaled
//! numerators, combination, reduction, reciprocal, exponentiation and leaf
//! conversions.

use crate::error::MathError;
use crate::expr::{ExprNode, Leaf, OpKind, OpNode};
use crate::numeric::to_i64;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tutor_formatter::{canonical_rational, decimal_expansion, parse_rational};

/// Largest absolute exponent accepted in `pow` nodes and power-of-ten leaves.
pub const MAX_EXPONENT: i64 = 64;

/// Largest size, in bits of numerator or denominator, of a power result.
pub const MAX_POWER_BITS: u64 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Integer,
    Fraction,
    Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithStep {
    pub description: String,
    pub formula: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: BigRational,
    pub notation: Notation,
    pub steps: Vec<ArithStep>,
}

impl Evaluation {
    /// Machine text of the value in its notation.
    pub fn value_text(&self) -> String {
        notation_text(&self.value, self.notation)
    }
}

#[derive(Debug, Clone)]
struct Num {
    value: BigRational,
    notation: Notation,
}

impl Num {
    fn new(value: BigRational, notation: Notation) -> Self {
        Self { value, notation }
    }

    fn text(&self) -> String {
        notation_text(&self.value, self.notation)
    }

    /// Text usable as an operand: negatives and proper fractions in parentheses.
    fn operand(&self) -> String {
        let text = self.text();
        if self.value.is_negative() || text.contains('/') {
            format!("({})", text)
        } else {
            text
        }
    }
}

fn notation_text(value: &BigRational, notation: Notation) -> String {
    match notation {
        Notation::Integer | Notation::Fraction => canonical_rational(value),
        Notation::Decimal => decimal_expansion(value).unwrap_or_else(|| canonical_rational(value)),
    }
}

fn combine_notation(a: Notation, b: Notation, value: &BigRational) -> Notation {
    if a == Notation::Fraction || b == Notation::Fraction {
        Notation::Fraction
    } else if a == Notation::Decimal || b == Notation::Decimal {
        if decimal_expansion(value).is_some() {
            Notation::Decimal
        } else {
            Notation::Fraction
        }
    } else if value.is_integer() {
        Notation::Integer
    } else {
        Notation::Fraction
    }
}

fn paren_int(n: &BigInt) -> String {
    if n.is_negative() {
        format!("({})", n)
    } else {
        n.to_string()
    }
}

fn fraction_text(numer: &BigInt, denom: &BigInt) -> String {
    if denom.is_one() {
        numer.to_string()
    } else {
        format!("{}/{}", numer, denom)
    }
}

pub fn evaluate(node: &ExprNode) -> Result<BigRational, MathError> {
    evaluate_with_steps(node).map(|e| e.value)
}

pub fn evaluate_with_steps(node: &ExprNode) -> Result<Evaluation, MathError> {
    let mut evaluator = Evaluator { steps: Vec::new() };
    let num = evaluator.eval(node)?;
    Ok(Evaluation {
        value: num.value,
        notation: num.notation,
        steps: evaluator.steps,
    })
}

struct Evaluator {
    steps: Vec<ArithStep>,
}

impl Evaluator {
    fn push(&mut self, description: &str, formula: String, result: String) {
        self.steps.push(ArithStep {
            description: description.to_string(),
            formula,
            result,
        });
    }

    fn eval(&mut self, node: &ExprNode) -> Result<Num, MathError> {
        match node {
            ExprNode::Leaf(leaf) => self.leaf(leaf),
            ExprNode::Op(op_node) => self.op(op_node),
        }
    }

    fn leaf(&mut self, leaf: &Leaf) -> Result<Num, MathError> {
        match leaf {
            Leaf::Integer { value } => Ok(Num::new(BigRational::from_integer((*value).into()), Notation::Integer)),
            Leaf::Fraction {
                numerator,
                denominator,
            } => {
                if *denominator == 0 {
                    return Err(MathError::division_by_zero(format!(
                        "знаменатель дроби {}/0 равен нулю",
                        numerator
                    )));
                }
                let numer = BigInt::from(*numerator);
                let denom = BigInt::from(*denominator);
                let value = BigRational::new(numer.clone(), denom.clone());
                self.reduce_step(&numer, &denom, &value);
                Ok(Num::new(value, Notation::Fraction))
            }
            Leaf::Decimal { value } => {
                let parsed = parse_decimal_text(value)?;
                Ok(Num::new(parsed, Notation::Decimal))
            }
            Leaf::Mixed {
                whole,
                numerator,
                denominator,
            } => {
                if *denominator == 0 {
                    return Err(MathError::division_by_zero(format!(
                        "знаменатель смешанного числа {} {}/0 равен нулю",
                        whole, numerator
                    )));
                }
                if *numerator < 0 || *denominator < 0 {
                    return Err(MathError::malformed(
                        "дробная часть смешанного числа должна быть положительной",
                    ));
                }
                let fraction = BigRational::new((*numerator).into(), (*denominator).into());
                let magnitude = BigRational::from_integer(BigInt::from(*whole).abs()) + fraction;
                let value = if *whole < 0 { -magnitude } else { magnitude };
                self.push(
                    "Переводим смешанное число в неправильную дробь",
                    format!("{} {}/{}", whole, numerator, denominator),
                    canonical_rational(&value),
                );
                Ok(Num::new(value, Notation::Fraction))
            }
            Leaf::PowerOfTen { mantissa, exponent } => {
                if i64::from(*exponent).abs() > MAX_EXPONENT {
                    return Err(MathError::undefined(format!(
                        "показатель {} слишком велик",
                        exponent
                    )));
                }
                let m = parse_decimal_text(mantissa)?;
                let value = m * BigRational::from_integer(BigInt::from(10)).pow(*exponent);
                let num = Num::new(value, Notation::Decimal);
                self.push(
                    "Записываем число в виде десятичной дроби",
                    format!("{}*10^{}", mantissa.trim(), exponent),
                    num.text(),
                );
                Ok(num)
            }
        }
    }

    fn op(&mut self, node: &OpNode) -> Result<Num, MathError> {
        let arity_error = |expected: &str| {
            MathError::malformed(format!(
                "операция {:?} ожидает {} аргумент(а), получено {}",
                node.op,
                expected,
                node.args.len()
            ))
        };

        match node.op {
            OpKind::Add | OpKind::Mul => {
                if node.args.len() < 2 {
                    return Err(arity_error("не менее 2"));
                }
                let mut acc = self.eval(&node.args[0])?;
                for arg in &node.args[1..] {
                    let rhs = self.eval(arg)?;
                    acc = if node.op == OpKind::Add {
                        self.add_sub(acc, rhs, false)
                    } else {
                        self.mul(acc, rhs)
                    };
                }
                Ok(acc)
            }
            OpKind::Sub | OpKind::Div | OpKind::Pow => {
                if node.args.len() != 2 {
                    return Err(arity_error("2"));
                }
                let lhs = self.eval(&node.args[0])?;
                let rhs = self.eval(&node.args[1])?;
                match node.op {
                    OpKind::Sub => Ok(self.add_sub(lhs, rhs, true)),
                    OpKind::Div => self.div(lhs, rhs),
                    _ => self.pow(lhs, rhs),
                }
            }
            OpKind::Neg => {
                if node.args.len() != 1 {
                    return Err(arity_error("1"));
                }
                let inner = self.eval(&node.args[0])?;
                let num = Num::new(-inner.value.clone(), inner.notation);
                self.push("Меняем знак", format!("-{}", inner.operand()), num.text());
                Ok(num)
            }
        }
    }

    /// Show a decimal operand as a common fraction before fraction arithmetic.
    fn as_fraction(&mut self, num: Num) -> Num {
        if num.notation == Notation::Decimal && !num.value.is_integer() {
            self.push(
                "Записываем десятичную дробь в виде обыкновенной",
                num.text(),
                canonical_rational(&num.value),
            );
            Num::new(num.value, Notation::Fraction)
        } else {
            num
        }
    }

    fn reduce_step(&mut self, numer: &BigInt, denom: &BigInt, reduced: &BigRational) {
        if !numer.gcd(denom).is_one() || denom.is_negative() {
            self.push(
                "Сокращаем дробь",
                fraction_text(numer, denom),
                canonical_rational(reduced),
            );
        }
    }

    fn add_sub(&mut self, a: Num, b: Num, is_sub: bool) -> Num {
        let value = if is_sub {
            &a.value - &b.value
        } else {
            &a.value + &b.value
        };
        let notation = combine_notation(a.notation, b.notation, &value);
        let sym = if is_sub { " - " } else { " + " };

        let fraction_path =
            notation == Notation::Fraction && !(a.value.is_integer() && b.value.is_integer());
        if !fraction_path {
            let result = Num::new(value, notation);
            self.push(
                if is_sub { "Вычитаем" } else { "Складываем" },
                format!("{}{}{}", a.operand(), sym, b.operand()),
                result.text(),
            );
            return result;
        }

        let a = self.as_fraction(a);
        let b = self.as_fraction(b);
        let (an, ad) = (a.value.numer(), a.value.denom());
        let (bn, bd) = (b.value.numer(), b.value.denom());

        let (numer, denom) = if ad == bd {
            let numer = if is_sub { an - bn } else { an + bn };
            self.push(
                if is_sub {
                    "Вычитаем дроби с одинаковыми знаменателями"
                } else {
                    "Складываем дроби с одинаковыми знаменателями"
                },
                format!("({}{}{})/{}", paren_int(an), sym, paren_int(bn), ad),
                fraction_text(&numer, ad),
            );
            (numer, ad.clone())
        } else {
            let lcm = ad.lcm(bd);
            let fa = &lcm / ad;
            let fb = &lcm / bd;
            self.push(
                "Находим общий знаменатель",
                format!("НОК({}, {})", ad, bd),
                lcm.to_string(),
            );

            let sa = an * &fa;
            let sb = bn * &fb;
            self.push(
                "Домножаем числители на дополнительные множители",
                format!(
                    "{}*{}/{}{}{}*{}/{}",
                    paren_int(an),
                    fa,
                    lcm,
                    sym,
                    paren_int(bn),
                    fb,
                    lcm
                ),
                format!("{}/{}{}{}/{}", sa, lcm, sym, paren_int(&sb), lcm),
            );

            let numer = if is_sub { &sa - &sb } else { &sa + &sb };
            self.push(
                if is_sub {
                    "Вычитаем числители"
                } else {
                    "Складываем числители"
                },
                format!("({}{}{})/{}", sa, sym, paren_int(&sb), lcm),
                fraction_text(&numer, &lcm),
            );
            (numer, lcm)
        };

        self.reduce_step(&numer, &denom, &value);
        Num::new(value, notation)
    }

    fn mul(&mut self, a: Num, b: Num) -> Num {
        let value = &a.value * &b.value;
        let notation = combine_notation(a.notation, b.notation, &value);

        let fraction_path =
            notation == Notation::Fraction && !(a.value.is_integer() && b.value.is_integer());
        if !fraction_path {
            let result = Num::new(value, notation);
            self.push(
                "Умножаем",
                format!("{}*{}", a.operand(), b.operand()),
                result.text(),
            );
            return result;
        }

        let a = self.as_fraction(a);
        let b = self.as_fraction(b);
        let (an, ad) = (a.value.numer(), a.value.denom());
        let (bn, bd) = (b.value.numer(), b.value.denom());
        let numer = an * bn;
        let denom = ad * bd;

        let denom_text = match (ad.is_one(), bd.is_one()) {
            (true, true) => String::new(),
            (true, false) => format!("/{}", bd),
            (false, true) => format!("/{}", ad),
            (false, false) => format!("/({}*{})", ad, bd),
        };
        self.push(
            "Перемножаем числители и знаменатели",
            format!("({}*{}){}", paren_int(an), paren_int(bn), denom_text),
            fraction_text(&numer, &denom),
        );
        self.reduce_step(&numer, &denom, &value);
        Num::new(value, notation)
    }

    fn div(&mut self, a: Num, b: Num) -> Result<Num, MathError> {
        if b.value.is_zero() {
            return Err(MathError::division_by_zero(format!(
                "делитель в выражении {} : {} равен нулю",
                a.operand(),
                b.operand()
            )));
        }

        let has_fraction = a.notation == Notation::Fraction || b.notation == Notation::Fraction;
        if has_fraction && !b.value.is_integer() {
            let b = self.as_fraction(b);
            let reciprocal = Num::new(b.value.recip(), Notation::Fraction);
            self.push(
                "Заменяем деление умножением на обратную дробь",
                format!("{} : {}", a.operand(), b.operand()),
                format!("{}*{}", a.operand(), reciprocal.operand()),
            );
            return Ok(self.mul(a, reciprocal));
        }

        let value = &a.value / &b.value;
        let notation = combine_notation(a.notation, b.notation, &value);
        let result = Num::new(value, notation);
        self.push(
            "Делим",
            format!("{} : {}", a.operand(), b.operand()),
            result.text(),
        );
        Ok(result)
    }

    fn pow(&mut self, base: Num, exp: Num) -> Result<Num, MathError> {
        let e = to_i64(&exp.value).ok_or_else(|| {
            MathError::undefined(format!(
                "показатель степени {} должен быть целым числом",
                exp.text()
            ))
        })?;
        if e.abs() > MAX_EXPONENT {
            return Err(MathError::undefined(format!("показатель {} слишком велик", e)));
        }
        if base.value.is_zero() {
            if e == 0 {
                return Err(MathError::undefined("выражение 0^0 не определено"));
            }
            if e < 0 {
                return Err(MathError::division_by_zero(format!(
                    "0 в отрицательной степени {} означает деление на ноль",
                    e
                )));
            }
        }

        let base_bits = base.value.numer().bits().max(base.value.denom().bits());
        if base_bits.saturating_mul(e.unsigned_abs()) > MAX_POWER_BITS {
            return Err(MathError::undefined(format!(
                "результат {}^{} слишком велик",
                base.operand(),
                e
            )));
        }

        let value = base.value.pow(e as i32);
        let notation = match base.notation {
            Notation::Fraction => Notation::Fraction,
            Notation::Integer if value.is_integer() => Notation::Integer,
            Notation::Integer | Notation::Decimal => {
                if decimal_expansion(&value).is_some() {
                    Notation::Decimal
                } else {
                    Notation::Fraction
                }
            }
        };
        let result = Num::new(value, notation);
        self.push(
            "Возводим в степень",
            format!("{}^{}", base.operand(), e),
            result.text(),
        );
        Ok(result)
    }
}

fn parse_decimal_text(text: &str) -> Result<BigRational, MathError> {
    if text.contains('/') {
        return Err(MathError::InvalidNumber {
            text: text.to_string(),
        });
    }
    parse_rational(text).ok_or_else(|| MathError::InvalidNumber {
        text: text.to_string(),
    })
}
