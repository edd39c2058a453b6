//! Rational inequalities solved by the interval method.
//!
//! Each form is first reduced to `s·Π(x − nᵢ) / Π(x − dⱼ) ⋈ 0`; the sign chart
//! and the final interval set are shared.

use crate::error::SolveError;
use crate::narration;
use crate::params::fields::{COEF_A, COEF_B, COEF_C, NUMERATOR_K, ROOT_M, SHIFT_P, SIGN};
use crate::params::ParamReader;
use crate::procedure::{Procedure, ProcedureContext, ProcedureOutput, RawStep};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use smallvec::{smallvec, SmallVec};
use tutor_api_models::{AnswerValue, TaskDescriptor};
use tutor_formatter::{format_intervals, linear_factor, machine_number, polynomial_formula, Term};
use tutor_math::numeric::{int, rational_sqrt};
use tutor_math::{quadratic_roots, QuadraticRoots, RationalFunction, Relation, Roots, SolutionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InequalityForm {
    /// `1/x ⋈ 1/m`
    UnitFractionCompare,
    /// `K/(ax² + bx + c) ⋈ 0`
    ConstOverQuadratic,
    /// `x ⋈ K/x`
    XVsConstOverX,
    /// `(x − p)² ⋈ m(x − p)`
    ShiftedSquare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InequalityInput {
    UnitFractionCompare {
        m: BigRational,
        relation: Relation,
    },
    ConstOverQuadratic {
        k: BigRational,
        a: BigRational,
        b: Option<BigRational>,
        c: Option<BigRational>,
        relation: Relation,
    },
    XVsConstOverX {
        k: BigRational,
        m: Option<BigRational>,
        relation: Relation,
    },
    ShiftedSquare {
        p: BigRational,
        m: BigRational,
        relation: Relation,
    },
}

impl InequalityInput {
    pub fn read(form: InequalityForm, reader: &ParamReader<'_>) -> Result<Self, SolveError> {
        let relation = reader.relation(SIGN)?;
        Ok(match form {
            InequalityForm::UnitFractionCompare => InequalityInput::UnitFractionCompare {
                m: reader.require_rational(ROOT_M)?,
                relation,
            },
            InequalityForm::ConstOverQuadratic => InequalityInput::ConstOverQuadratic {
                k: reader.require_rational(NUMERATOR_K)?,
                a: reader.require_rational(COEF_A)?,
                b: reader.rational(COEF_B)?,
                c: reader.rational(COEF_C)?,
                relation,
            },
            InequalityForm::XVsConstOverX => InequalityInput::XVsConstOverX {
                k: reader.require_rational(NUMERATOR_K)?,
                m: reader.rational(ROOT_M)?,
                relation,
            },
            InequalityForm::ShiftedSquare => InequalityInput::ShiftedSquare {
                p: reader.require_rational(SHIFT_P)?,
                m: reader.require_rational(ROOT_M)?,
                relation,
            },
        })
    }

    fn relation(&self) -> Relation {
        match self {
            InequalityInput::UnitFractionCompare { relation, .. }
            | InequalityInput::ConstOverQuadratic { relation, .. }
            | InequalityInput::XVsConstOverX { relation, .. }
            | InequalityInput::ShiftedSquare { relation, .. } => *relation,
        }
    }
}

// -----------------------------------------------------------------------------
// Text helpers (machine text)
// -----------------------------------------------------------------------------

fn operand(value: &BigRational) -> String {
    let text = machine_number(value);
    if value.is_negative() || text.contains('/') {
        format!("({})", text)
    } else {
        text
    }
}

/// `(x - 1)(x + 3)^2`; repeated roots become powers.
fn factor_chain(roots: &[BigRational]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < roots.len() {
        let mut count = 1;
        while i + count < roots.len() && roots[i + count] == roots[i] {
            count += 1;
        }
        let factor = linear_factor("x", &roots[i]);
        if count > 1 {
            out.push_str(&format!("{}^{}", factor, count));
        } else {
            out.push_str(&factor);
        }
        i += count;
    }
    out
}

fn factored_product(lead: &BigRational, roots: &[BigRational]) -> String {
    let chain = factor_chain(roots);
    if chain.is_empty() {
        return machine_number(lead);
    }
    if lead.is_one() {
        chain
    } else if *lead == -BigRational::one() {
        format!("-{}", chain)
    } else {
        let text = machine_number(lead);
        if text.contains('/') {
            format!("({}){}", text, chain)
        } else {
            format!("{}{}", text, chain)
        }
    }
}

fn factored_text(f: &RationalFunction) -> String {
    let numerator = factored_product(&f.leading, &f.numerator_roots);
    if f.denominator_roots.is_empty() {
        return numerator;
    }
    let denominator = factor_chain(&f.denominator_roots);
    let single = f.denominator_roots.len() == 1;
    if single {
        format!("{}/{}", numerator, denominator)
    } else {
        format!("{}/({})", numerator, denominator)
    }
}

fn roots_text(roots: &[BigRational]) -> String {
    let mut unique: Vec<&BigRational> = roots.iter().collect();
    unique.sort();
    unique.dedup();
    if unique.is_empty() {
        return narration::NO_ZEROS.to_string();
    }
    unique
        .into_iter()
        .map(|r| format!("x = {}", machine_number(r)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn poly(terms: &[Term]) -> String {
    polynomial_formula("x", terms)
}

// -----------------------------------------------------------------------------
// Reduction to a rational function
// -----------------------------------------------------------------------------

struct Reduction {
    statement: String,
    steps: Vec<RawStep>,
    function: RationalFunction,
}

fn reduce(input: &InequalityInput) -> Result<Reduction, SolveError> {
    match input {
        InequalityInput::UnitFractionCompare { m, relation } => reduce_unit_fraction(m, *relation),
        InequalityInput::ConstOverQuadratic {
            k,
            a,
            b,
            c,
            relation,
        } => reduce_const_over_quadratic(k, a, b.as_ref(), c.as_ref(), *relation),
        InequalityInput::XVsConstOverX { k, m, relation } => {
            reduce_x_vs_const_over_x(k, m.as_ref(), *relation)
        }
        InequalityInput::ShiftedSquare { p, m, relation } => reduce_shifted_square(p, m, *relation),
    }
}

fn reduce_unit_fraction(m: &BigRational, relation: Relation) -> Result<Reduction, SolveError> {
    let sym = relation.symbol();
    if m.is_zero() {
        return Err(SolveError::division_by_zero("в правой части 1/m при m = 0"));
    }
    let statement = format!("1/x {} 1/{}", sym, operand(m));

    let numerator = poly(&[Term::known(-int(1), 1), Term::known(m.clone(), 0)]);
    let denominator = poly(&[Term::known(m.clone(), 1)]);
    let steps = vec![RawStep::new(
        narration::MOVE_TO_LEFT_STEP,
        format!("1/x - 1/{} {} 0", operand(m), sym),
        format!("({})/({}) {} 0", numerator, denominator, sym),
    )];

    // (m - x)/(m·x) = (-1/m)·(x - m)/x
    let function = RationalFunction::new(-m.recip(), smallvec![m.clone()], smallvec![int(0)]);
    Ok(Reduction {
        statement,
        steps,
        function,
    })
}

fn reduce_const_over_quadratic(
    k: &BigRational,
    a: &BigRational,
    b: Option<&BigRational>,
    c: Option<&BigRational>,
    relation: Relation,
) -> Result<Reduction, SolveError> {
    let sym = relation.symbol();
    let mut steps = Vec::new();

    let zero = int(0);
    for (name, value) in [("b", b), ("c", c)] {
        if value.is_none() {
            steps.push(RawStep::new(
                narration::not_given_message(name, "соответствующее слагаемое считаем равным нулю"),
                String::new(),
                format!("{} = 0", name),
            ));
        }
    }
    let b = b.unwrap_or(&zero);
    let c = c.unwrap_or(&zero);

    let denominator = poly(&[
        Term::known(a.clone(), 2),
        Term::known(b.clone(), 1),
        Term::known(c.clone(), 0),
    ]);
    let statement = format!("{}/({}) {} 0", machine_number(k), denominator, sym);

    if a.is_zero() && b.is_zero() && c.is_zero() {
        return Err(SolveError::division_by_zero(
            "знаменатель тождественно равен нулю",
        ));
    }

    let (lead, den_roots): (BigRational, Roots) = if !a.is_zero() {
        let discriminant = b * b - int(4) * a * c;
        steps.push(RawStep::new(
            narration::DISCRIMINANT_STEP,
            format!(
                "D = b^2 - 4ac = {}^2 - 4*{}*{}",
                operand(b),
                operand(a),
                operand(c)
            ),
            machine_number(&discriminant),
        ));
        match quadratic_roots(a, b, c) {
            QuadraticRoots::None => (a.clone(), SmallVec::new()),
            QuadraticRoots::Double(r) => (a.clone(), smallvec![r.clone(), r]),
            QuadraticRoots::Two(r1, r2) => (a.clone(), smallvec![r1, r2]),
            QuadraticRoots::Irrational { discriminant } => {
                return Err(SolveError::undefined(format!(
                    "D = {} не является квадратом рационального числа, корни знаменателя иррациональны",
                    machine_number(&discriminant)
                )))
            }
        }
    } else if !b.is_zero() {
        (b.clone(), smallvec![-c / b])
    } else {
        (c.clone(), SmallVec::new())
    };

    if !den_roots.is_empty() {
        steps.push(RawStep::new(
            narration::FACTOR_STEP,
            denominator.clone(),
            factored_product(&lead, &den_roots),
        ));
    }

    let leading = if k.is_zero() {
        steps.push(RawStep::new(
            narration::ZERO_NUMERATOR_BRANCH,
            statement.clone(),
            format!("0 {} 0", sym),
        ));
        int(0)
    } else {
        k / &lead
    };

    Ok(Reduction {
        statement,
        steps,
        function: RationalFunction::new(leading, SmallVec::new(), den_roots),
    })
}

fn reduce_x_vs_const_over_x(
    k: &BigRational,
    m: Option<&BigRational>,
    relation: Relation,
) -> Result<Reduction, SolveError> {
    let sym = relation.symbol();
    let statement = format!("x {} {}/x", sym, machine_number(k));
    let numerator = poly(&[Term::known(int(1), 2), Term::known(-k, 0)]);

    let mut steps = vec![RawStep::new(
        narration::MOVE_TO_LEFT_STEP,
        format!("x - {}/x {} 0", operand(k), sym),
        format!("({})/x {} 0", numerator, sym),
    )];

    if let Some(m) = m {
        if m * m != *k {
            return Err(SolveError::invalid(
                ROOT_M.primary,
                format!(
                    "m^2 = {} не равно K = {}",
                    machine_number(&(m * m)),
                    machine_number(k)
                ),
            ));
        }
    }

    let num_roots: Roots = if k.is_negative() {
        SmallVec::new()
    } else {
        let root = match m {
            Some(m) => m.abs(),
            None => rational_sqrt(k).ok_or_else(|| {
                SolveError::undefined(format!(
                    "K = {} не является квадратом рационального числа, корни числителя иррациональны",
                    machine_number(k)
                ))
            })?,
        };
        smallvec![-root.clone(), root]
    };

    if !num_roots.is_empty() {
        steps.push(RawStep::new(
            narration::FACTOR_STEP,
            numerator,
            factor_chain(&num_roots),
        ));
    }

    Ok(Reduction {
        statement,
        steps,
        function: RationalFunction::new(int(1), num_roots, smallvec![int(0)]),
    })
}

fn reduce_shifted_square(
    p: &BigRational,
    m: &BigRational,
    relation: Relation,
) -> Result<Reduction, SolveError> {
    let sym = relation.symbol();
    let shift = linear_factor("x", p);
    let scaled = |factor: &str| -> String {
        if m.is_one() {
            factor.to_string()
        } else if *m == -BigRational::one() {
            format!("-{}", factor)
        } else {
            format!("{}*{}", operand(m), factor)
        }
    };
    let square = if shift == "x" {
        "x^2".to_string()
    } else {
        format!("{}^2", shift)
    };
    let statement = format!("{} {} {}", square, sym, scaled(&shift));

    let second = p + m;
    let mut roots: Roots = smallvec![p.clone(), second];
    roots.sort();
    let steps = vec![
        RawStep::new(
            narration::MOVE_TO_LEFT_STEP,
            statement.clone(),
            format!("{} - {} {} 0", square, scaled(&shift), sym),
        ),
        RawStep::new(
            narration::FACTOR_STEP,
            format!("{} - {}", square, scaled(&shift)),
            factor_chain(&roots),
        ),
    ];

    Ok(Reduction {
        statement,
        steps,
        function: RationalFunction::new(int(1), roots, SmallVec::new()),
    })
}

// -----------------------------------------------------------------------------
// Procedure
// -----------------------------------------------------------------------------

fn sign_table_text(function: &RationalFunction) -> String {
    function
        .sign_table()
        .iter()
        .map(|region| {
            format!(
                "{}: {}",
                format_intervals(&[region.interval.to_value()]),
                region.sign_symbol()
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct RationalInequalityProcedure {
    form: InequalityForm,
}

impl RationalInequalityProcedure {
    pub fn new(form: InequalityForm) -> Self {
        Self { form }
    }

    pub fn solve_input(&self, input: &InequalityInput) -> Result<ProcedureOutput, SolveError> {
        let relation = input.relation();
        let sym = relation.symbol();
        let Reduction {
            statement,
            mut steps,
            function,
        } = reduce(input)?;
        let factored = factored_text(&function);

        steps.push(RawStep::new(
            narration::NUMERATOR_ZEROS_STEP,
            factored.clone(),
            roots_text(&function.numerator_roots),
        ));
        if !function.denominator_roots.is_empty() {
            steps.push(RawStep::new(
                narration::DENOMINATOR_ZEROS_STEP,
                factored.clone(),
                roots_text(&function.denominator_roots),
            ));
        }

        let points = function
            .critical_points()
            .iter()
            .map(machine_number)
            .collect::<Vec<_>>()
            .join("; ");
        steps.push(RawStep::new(
            narration::SIGN_TABLE_STEP,
            points,
            sign_table_text(&function),
        ));

        let solution: SolutionSet = function.solve(relation);
        let values = solution.to_values();
        let shown = format_intervals(&values);
        steps.push(RawStep::new(
            narration::select_intervals_message(sym),
            format!("{} {} 0", factored, sym),
            shown.clone(),
        ));
        steps.push(RawStep::new(narration::FINAL_ANSWER_STEP, statement, shown));

        tracing::debug!(
            target: "solve",
            form = ?self.form,
            critical_points = function.critical_points().len(),
            intervals = values.len(),
            "inequality_solved"
        );

        Ok(ProcedureOutput {
            explanation: narration::INEQUALITY_IDEA.to_string(),
            steps,
            answer: AnswerValue::Intervals(values),
            unit: None,
            hints: narration::INEQUALITY_HINTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        })
    }
}

impl Procedure for RationalInequalityProcedure {
    fn name(&self) -> &str {
        match self.form {
            InequalityForm::UnitFractionCompare => "inequality.unit_fraction_compare",
            InequalityForm::ConstOverQuadratic => "inequality.const_over_quadratic",
            InequalityForm::XVsConstOverX => "inequality.x_vs_const_over_x",
            InequalityForm::ShiftedSquare => "inequality.shifted_square",
        }
    }

    fn solve(
        &self,
        task: &TaskDescriptor,
        ctx: &ProcedureContext,
    ) -> Result<ProcedureOutput, SolveError> {
        let input = InequalityInput::read(self.form, &ctx.reader(task))?;
        self.solve_input(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use tutor_math::numeric::ratio;

    fn solve(form: InequalityForm, params: Value) -> Result<ProcedureOutput, SolveError> {
        let parameters = match params {
            Value::Object(m) => m,
            _ => Map::new(),
        };
        let task = TaskDescriptor::new("ri", 13, "rational_inequalities", "any", parameters);
        RationalInequalityProcedure::new(form).solve(&task, &ProcedureContext::default())
    }

    fn shown(out: &ProcedureOutput) -> String {
        match &out.answer {
            AnswerValue::Intervals(values) => format_intervals(values),
            other => panic!("unexpected answer {:?}", other),
        }
    }

    #[test]
    fn x_vs_25_over_x() {
        let out = solve(
            InequalityForm::XVsConstOverX,
            json!({"K": 25, "m": 5, "sign": "≤"}),
        )
        .unwrap();
        assert_eq!(shown(&out), "(−∞; −5] ∪ (0; 5]");
        assert_eq!(out.steps.last().unwrap().formula, "x ≤ 25/x");
        let factor = out
            .steps
            .iter()
            .find(|s| s.description == narration::FACTOR_STEP)
            .unwrap();
        assert_eq!(factor.formula, "x^2 - 25");
        assert_eq!(factor.result, "(x + 5)(x - 5)");
    }

    #[test]
    fn root_is_derived_when_m_absent() {
        let out = solve(InequalityForm::XVsConstOverX, json!({"k": 4, "op": ">"})).unwrap();
        assert_eq!(shown(&out), "(−2; 0) ∪ (2; +∞)");
    }

    #[test]
    fn inconsistent_root_is_invalid() {
        let err = solve(
            InequalityForm::XVsConstOverX,
            json!({"K": 25, "m": 4, "sign": "<"}),
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::InvalidParameter { ref name, .. } if name == "m"));
    }

    #[test]
    fn irrational_root_is_undefined() {
        let err = solve(InequalityForm::XVsConstOverX, json!({"K": 2, "sign": "<"})).unwrap_err();
        assert!(matches!(err, SolveError::UndefinedOperation { .. }));
    }

    #[test]
    fn negative_constant_has_no_numerator_zeros() {
        let out = solve(InequalityForm::XVsConstOverX, json!({"K": -9, "sign": ">="})).unwrap();
        assert_eq!(shown(&out), "(0; +∞)");
        assert!(out.steps.iter().any(|s| s.result == narration::NO_ZEROS));
    }

    #[test]
    fn unit_fraction_compare() {
        let out = solve(
            InequalityForm::UnitFractionCompare,
            json!({"m": 5, "sign": "<"}),
        )
        .unwrap();
        assert_eq!(shown(&out), "(−∞; 0) ∪ (5; +∞)");

        let out = solve(
            InequalityForm::UnitFractionCompare,
            json!({"root": -2, "sign": "≥"}),
        )
        .unwrap();
        assert_eq!(shown(&out), "(−∞; −2] ∪ (0; +∞)");
    }

    #[test]
    fn unit_fraction_with_zero_is_division_by_zero() {
        let err = solve(
            InequalityForm::UnitFractionCompare,
            json!({"m": 0, "sign": "<"}),
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::DivisionByZero { .. }));
    }

    #[test]
    fn const_over_quadratic_with_two_roots() {
        // 3/(x^2 - x - 6) < 0  =>  (-2; 3)
        let out = solve(
            InequalityForm::ConstOverQuadratic,
            json!({"K": 3, "a": 1, "b": -1, "c": -6, "sign": "<"}),
        )
        .unwrap();
        assert_eq!(shown(&out), "(−2; 3)");
        let disc = out
            .steps
            .iter()
            .find(|s| s.description == narration::DISCRIMINANT_STEP)
            .unwrap();
        assert_eq!(disc.result, "25");
    }

    #[test]
    fn const_over_quadratic_without_roots() {
        let out = solve(
            InequalityForm::ConstOverQuadratic,
            json!({"K": -1, "a": 1, "c": 4, "sign": ">"}),
        )
        .unwrap();
        assert_eq!(shown(&out), "∅");
        assert!(out.steps.iter().any(|s| s.description.starts_with("b не задан")));
    }

    #[test]
    fn const_over_quadratic_zero_numerator_branch() {
        let out = solve(
            InequalityForm::ConstOverQuadratic,
            json!({"K": 0, "a": 1, "b": 0, "c": -1, "sign": ">="}),
        )
        .unwrap();
        assert_eq!(shown(&out), "(−∞; −1) ∪ (−1; 1) ∪ (1; +∞)");
        assert!(out
            .steps
            .iter()
            .any(|s| s.description == narration::ZERO_NUMERATOR_BRANCH));
    }

    #[test]
    fn const_over_quadratic_failures() {
        let err = solve(
            InequalityForm::ConstOverQuadratic,
            json!({"K": 1, "a": 1, "b": 0, "c": -2, "sign": "<"}),
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::UndefinedOperation { .. }));

        let err = solve(
            InequalityForm::ConstOverQuadratic,
            json!({"K": 1, "a": 0, "b": 0, "c": 0, "sign": "<"}),
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::DivisionByZero { .. }));
    }

    #[test]
    fn shifted_square() {
        // (x - 3)^2 <= 2(x - 3)  =>  [3; 5]
        let out = solve(
            InequalityForm::ShiftedSquare,
            json!({"p": 3, "m": 2, "sign": "<="}),
        )
        .unwrap();
        assert_eq!(shown(&out), "[3; 5]");
        assert_eq!(out.steps.last().unwrap().formula, "(x - 3)^2 ≤ 2*(x - 3)");

        let out = solve(
            InequalityForm::ShiftedSquare,
            json!({"shift": 1, "root": 0, "sign": "<="}),
        )
        .unwrap();
        assert_eq!(shown(&out), "{1}");
    }

    #[test]
    fn factored_text_shapes() {
        let f = RationalFunction::new(ratio(-1, 5), smallvec![int(5)], smallvec![int(0)]);
        assert_eq!(factored_text(&f), "-0.2(x - 5)/x");
        let f = RationalFunction::new(ratio(1, 3), smallvec![int(1), int(1)], smallvec![]);
        assert_eq!(factored_text(&f), "(1/3)(x - 1)^2");
        let f = RationalFunction::new(int(2), smallvec![], smallvec![int(-2), int(3)]);
        assert_eq!(factored_text(&f), "2/((x + 2)(x - 3))");
    }

    #[test]
    fn missing_sign_is_reported() {
        let err = solve(InequalityForm::ShiftedSquare, json!({"p": 1, "m": 1})).unwrap_err();
        assert_eq!(err, SolveError::missing("sign"));
    }
}
