//! Elementary curve models and a small parser for school formula text
//! (`y = -2x² + 5`, `y = 4/x`, `y = −√x + 1`, `y = 0,5x − 3`).

use crate::error::MathError;
use crate::numeric::{int, sign_of};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tutor_formatter::{machine_number, parse_rational, polynomial_formula, Term};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    HorizontalLine,
    Line,
    Parabola,
    Hyperbola,
    RootCurve,
}

impl CurveKind {
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::HorizontalLine => "горизонтальная прямая",
            CurveKind::Line => "прямая",
            CurveKind::Parabola => "парабола",
            CurveKind::Hyperbola => "гипербола",
            CurveKind::RootCurve => "график квадратного корня",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curve {
    /// `y = kx + b`
    Line { k: BigRational, b: BigRational },
    /// `y = ax² + bx + c`
    Parabola {
        a: BigRational,
        b: BigRational,
        c: BigRational,
    },
    /// `y = k/x + c`
    Hyperbola { k: BigRational, c: BigRational },
    /// `y = k√x + c`
    Root { k: BigRational, c: BigRational },
}

impl Curve {
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Line { k, .. } if k.is_zero() => CurveKind::HorizontalLine,
            Curve::Line { .. } => CurveKind::Line,
            Curve::Parabola { a, b, .. } if a.is_zero() => {
                if b.is_zero() {
                    CurveKind::HorizontalLine
                } else {
                    CurveKind::Line
                }
            }
            Curve::Parabola { .. } => CurveKind::Parabola,
            Curve::Hyperbola { .. } => CurveKind::Hyperbola,
            Curve::Root { .. } => CurveKind::RootCurve,
        }
    }

    /// Coefficients in declaration order.
    pub fn coefficients(&self) -> Vec<&BigRational> {
        match self {
            Curve::Line { k, b } => vec![k, b],
            Curve::Parabola { a, b, c } => vec![a, b, c],
            Curve::Hyperbola { k, c } | Curve::Root { k, c } => vec![k, c],
        }
    }

    /// Kind plus the sign of every coefficient; two curves with the same
    /// signature look alike on a sketch.
    pub fn signature(&self) -> (CurveKind, Vec<Ordering>) {
        (
            self.kind(),
            self.coefficients().into_iter().map(sign_of).collect(),
        )
    }

    /// Machine formula text, e.g. `y = -2x^2 + 5`.
    pub fn formula(&self) -> String {
        let rhs = match self {
            Curve::Line { k, b } => polynomial_formula(
                "x",
                &[Term::known(k.clone(), 1), Term::known(b.clone(), 0)],
            ),
            Curve::Parabola { a, b, c } => polynomial_formula(
                "x",
                &[
                    Term::known(a.clone(), 2),
                    Term::known(b.clone(), 1),
                    Term::known(c.clone(), 0),
                ],
            ),
            Curve::Root { k, c } => polynomial_formula(
                "√x",
                &[Term::known(k.clone(), 1), Term::known(c.clone(), 0)],
            ),
            Curve::Hyperbola { k, c } => {
                let sign = if k.is_negative() { "-" } else { "" };
                let magnitude = machine_number(&k.abs());
                let head = if magnitude.contains('/') {
                    format!("{}({})/x", sign, magnitude)
                } else {
                    format!("{}{}/x", sign, magnitude)
                };
                let tail = polynomial_formula("x", &[Term::known(c.clone(), 0)]);
                if c.is_zero() {
                    head
                } else if c.is_negative() {
                    format!("{} - {}", head, &tail[1..])
                } else {
                    format!("{} + {}", head, tail)
                }
            }
        };
        format!("y = {}", rhs)
    }

    /// Short statements about the sketch: direction, branches, intercept.
    pub fn features(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self {
            Curve::Line { k, b } => {
                out.push(slope_statement(k));
                out.push(intercept_statement("b", b));
            }
            Curve::Parabola { a, b, c } => {
                if a.is_zero() {
                    out.push("a = 0, это не парабола, а прямая".to_string());
                    out.push(slope_statement(b));
                } else if a.is_positive() {
                    out.push("a > 0, ветви направлены вверх".to_string());
                } else {
                    out.push("a < 0, ветви направлены вниз".to_string());
                }
                out.push(intercept_statement("c", c));
            }
            Curve::Hyperbola { k, c } => {
                out.push(match sign_of(k) {
                    Ordering::Greater => "k > 0, ветви в I и III четвертях".to_string(),
                    Ordering::Less => "k < 0, ветви во II и IV четвертях".to_string(),
                    Ordering::Equal => flat_statement(c),
                });
                if !c.is_zero() {
                    out.push(format!(
                        "график сдвинут по оси Y на {}",
                        machine_number(c)
                    ));
                }
            }
            Curve::Root { k, c } => {
                out.push(match sign_of(k) {
                    Ordering::Greater => "k > 0, график идёт вверх".to_string(),
                    Ordering::Less => "k < 0, график идёт вниз".to_string(),
                    Ordering::Equal => flat_statement(c),
                });
                out.push(format!("начинается в точке (0; {})", machine_number(c)));
            }
        }
        out
    }
}

fn slope_statement(k: &BigRational) -> String {
    match sign_of(k) {
        Ordering::Greater => "k > 0, прямая возрастает".to_string(),
        Ordering::Less => "k < 0, прямая убывает".to_string(),
        Ordering::Equal => "k = 0, горизонтальная прямая".to_string(),
    }
}

fn flat_statement(c: &BigRational) -> String {
    format!("k = 0, графиком является горизонтальная прямая y = {}", machine_number(c))
}

fn intercept_statement(name: &str, value: &BigRational) -> String {
    match sign_of(value) {
        Ordering::Greater => format!("{} > 0, пересекает ось Y выше нуля", name),
        Ordering::Less => format!("{} < 0, пересекает ось Y ниже нуля", name),
        Ordering::Equal => format!("{} = 0, проходит через начало координат", name),
    }
}

/// Normalised formula body: no spaces, ASCII minus, `^2` for `²`, `r` for
/// `√x`, no multiplication signs, `.` decimal point, no `y =` prefix.
fn normalize(formula: &str) -> String {
    let mut text: String = formula
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '−' | '–' => '-',
            ',' => '.',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    for (from, to) in [
        ("²", "^2"),
        ("sqrt(x)", "r"),
        ("√(x)", "r"),
        ("√x", "r"),
        ("*", ""),
        ("·", ""),
        ("/(x)", "/x"),
    ] {
        text = text.replace(from, to);
    }
    for prefix in ["y=", "f(x)="] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    text
}

/// Curve type from text cues alone, checked in order: radical, reciprocal,
/// square, any `x`, none.
pub fn classify_formula(formula: &str) -> CurveKind {
    let text = normalize(formula);
    if text.contains('r') || text.contains('√') {
        CurveKind::RootCurve
    } else if text.contains("/x") || text.contains("/(x") {
        CurveKind::Hyperbola
    } else if text.contains("x^2") {
        CurveKind::Parabola
    } else if text.contains('x') {
        CurveKind::Line
    } else {
        CurveKind::HorizontalLine
    }
}

fn split_terms(body: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for ch in body.chars() {
        let splits = (ch == '+' || ch == '-')
            && !current.is_empty()
            && !matches!(prev, Some('^') | Some('(') | Some('/'));
        if splits {
            terms.push(std::mem::take(&mut current));
        }
        if ch != '+' || !current.is_empty() {
            current.push(ch);
        }
        prev = Some(ch);
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn parse_coefficient(text: &str, formula: &str) -> Result<BigRational, MathError> {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = magnitude
        .strip_prefix('(')
        .and_then(|m| m.strip_suffix(')'))
        .unwrap_or(magnitude);
    let value = if magnitude.is_empty() {
        BigRational::one()
    } else {
        parse_rational(magnitude).ok_or_else(|| MathError::UnsupportedFormula {
            formula: formula.to_string(),
            reason: format!("не удалось прочитать коэффициент '{}'", text),
        })?
    };
    Ok(if negative { -value } else { value })
}

struct Collected {
    square: Option<BigRational>,
    linear: Option<BigRational>,
    reciprocal: Option<BigRational>,
    root: Option<BigRational>,
    constant: BigRational,
}

fn accumulate(slot: &mut Option<BigRational>, value: BigRational) {
    *slot = Some(slot.take().unwrap_or_else(BigRational::zero) + value);
}

/// Parse `y = …` into a curve with exact coefficients.
pub fn parse_curve(formula: &str) -> Result<Curve, MathError> {
    let body = normalize(formula);
    if body.is_empty() {
        return Err(MathError::UnsupportedFormula {
            formula: formula.to_string(),
            reason: "пустая формула".to_string(),
        });
    }

    let mut collected = Collected {
        square: None,
        linear: None,
        reciprocal: None,
        root: None,
        constant: BigRational::zero(),
    };
    for term in split_terms(&body) {
        if let Some(coef) = term.strip_suffix("x^2") {
            accumulate(&mut collected.square, parse_coefficient(coef, formula)?);
        } else if let Some(coef) = term.strip_suffix("/x") {
            let coef = if coef.is_empty() || coef == "-" {
                return Err(MathError::UnsupportedFormula {
                    formula: formula.to_string(),
                    reason: "нет числителя у дроби".to_string(),
                });
            } else {
                coef
            };
            accumulate(&mut collected.reciprocal, parse_coefficient(coef, formula)?);
        } else if let Some(coef) = term.strip_suffix('r') {
            accumulate(&mut collected.root, parse_coefficient(coef, formula)?);
        } else if let Some(coef) = term.strip_suffix('x') {
            accumulate(&mut collected.linear, parse_coefficient(coef, formula)?);
        } else {
            let value = parse_rational(&term).ok_or_else(|| MathError::UnsupportedFormula {
                formula: formula.to_string(),
                reason: format!("непонятное слагаемое '{}'", term),
            })?;
            collected.constant += value;
        }
    }

    let Collected {
        square,
        linear,
        reciprocal,
        root,
        constant,
    } = collected;
    let mixed = |reason: &str| MathError::UnsupportedFormula {
        formula: formula.to_string(),
        reason: reason.to_string(),
    };

    match (square, linear, reciprocal, root) {
        (None, None, Some(k), None) => Ok(Curve::Hyperbola { k, c: constant }),
        (None, None, None, Some(k)) => Ok(Curve::Root { k, c: constant }),
        (Some(a), b, None, None) => Ok(Curve::Parabola {
            a,
            b: b.unwrap_or_else(BigRational::zero),
            c: constant,
        }),
        (None, k, None, None) => Ok(Curve::Line {
            k: k.unwrap_or_else(BigRational::zero),
            b: constant,
        }),
        _ => Err(mixed("смешаны слагаемые разных типов графиков")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ratio;

    #[test]
    fn classifies_by_text_cues() {
        assert_eq!(classify_formula("y = √x + 1"), CurveKind::RootCurve);
        assert_eq!(classify_formula("y = sqrt(x)"), CurveKind::RootCurve);
        assert_eq!(classify_formula("y = -4/x"), CurveKind::Hyperbola);
        assert_eq!(classify_formula("y = x² - 3"), CurveKind::Parabola);
        assert_eq!(classify_formula("y = 2x + 1"), CurveKind::Line);
        assert_eq!(classify_formula("y = 3"), CurveKind::HorizontalLine);
    }

    #[test]
    fn parses_parabola_with_display_glyphs() {
        let curve = parse_curve("y = −2x² + 5").unwrap();
        assert_eq!(
            curve,
            Curve::Parabola {
                a: int(-2),
                b: int(0),
                c: int(5)
            }
        );
        assert_eq!(curve.formula(), "y = -2x^2 + 5");
    }

    #[test]
    fn parses_decimal_comma_and_implicit_one() {
        let curve = parse_curve("y = 0,5x - x^2").unwrap();
        assert_eq!(
            curve,
            Curve::Parabola {
                a: int(-1),
                b: ratio(1, 2),
                c: int(0)
            }
        );
        assert_eq!(parse_curve("y = -x").unwrap(), Curve::Line { k: int(-1), b: int(0) });
    }

    #[test]
    fn parses_hyperbola_and_root() {
        assert_eq!(
            parse_curve("y = -4/x + 1").unwrap(),
            Curve::Hyperbola { k: int(-4), c: int(1) }
        );
        assert_eq!(
            parse_curve("y = 2√x").unwrap(),
            Curve::Root { k: int(2), c: int(0) }
        );
        assert_eq!(parse_curve("y = -4/x + 1").unwrap().formula(), "y = -4/x + 1");
        assert_eq!(parse_curve("y = -√x - 2").unwrap().formula(), "y = -√x - 2");
    }

    #[test]
    fn rejects_mixed_or_garbled_formulas() {
        assert!(matches!(
            parse_curve("y = x^2 + 1/x"),
            Err(MathError::UnsupportedFormula { .. })
        ));
        assert!(parse_curve("y = abc").is_err());
        assert!(parse_curve("").is_err());
    }

    #[test]
    fn signature_tracks_kind_and_signs() {
        let a = parse_curve("y = 2x - 1").unwrap();
        let b = parse_curve("y = 5x - 3").unwrap();
        let c = parse_curve("y = -2x - 1").unwrap();
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
        assert_eq!(parse_curve("y = 3").unwrap().kind(), CurveKind::HorizontalLine);
    }

    #[test]
    fn zero_leading_coefficient_is_described_as_zero() {
        let line = parse_curve("y = 0x + 2").unwrap().features();
        assert_eq!(line[0], "k = 0, горизонтальная прямая");

        let parabola = parse_curve("y = 0x^2 + 3x").unwrap().features();
        assert_eq!(parabola[0], "a = 0, это не парабола, а прямая");
        assert_eq!(parabola[1], "k > 0, прямая возрастает");

        let hyperbola = parse_curve("y = 0/x + 1").unwrap();
        assert_eq!(hyperbola, Curve::Hyperbola { k: int(0), c: int(1) });
        let features = hyperbola.features();
        assert_eq!(features[0], "k = 0, графиком является горизонтальная прямая y = 1");
        assert!(features.iter().all(|f| !f.contains("четвертях")));

        let root = parse_curve("y = 0√x - 2").unwrap().features();
        assert_eq!(root[0], "k = 0, графиком является горизонтальная прямая y = -2");
        assert!(root.iter().all(|f| !f.contains("идёт")));
    }

    #[test]
    fn features_describe_the_sketch() {
        let features = parse_curve("y = -2x^2 + 5").unwrap().features();
        assert!(features.iter().any(|f| f.contains("ветви направлены вниз")));
        assert!(features.iter().any(|f| f.contains("выше нуля")));
    }
}
