use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;
use tutor_api_models::{AnswerValue, IntervalValue};
use tutor_formatter::parse_rational;
use tutor_math::Relation;
use tutor_solver_core::rational_inequality::{
    InequalityForm, InequalityInput, RationalInequalityProcedure,
};

fn r(n: i64) -> BigRational {
    BigRational::from_integer(n.into())
}

fn arb_relation() -> impl Strategy<Value = Relation> {
    prop_oneof![
        Just(Relation::Less),
        Just(Relation::Greater),
        Just(Relation::LessEq),
        Just(Relation::GreaterEq),
    ]
}

fn holds(relation: Relation, lhs: &BigRational, rhs: &BigRational) -> bool {
    match relation {
        Relation::Less => lhs < rhs,
        Relation::Greater => lhs > rhs,
        Relation::LessEq => lhs <= rhs,
        Relation::GreaterEq => lhs >= rhs,
    }
}

fn contains(interval: &IntervalValue, x: &BigRational) -> bool {
    let lower = interval.lower.as_deref().and_then(parse_rational);
    let upper = interval.upper.as_deref().and_then(parse_rational);
    let above = match &lower {
        None => true,
        Some(l) if interval.lower_closed => x >= l,
        Some(l) => x > l,
    };
    let below = match &upper {
        None => true,
        Some(u) if interval.upper_closed => x <= u,
        Some(u) => x < u,
    };
    above && below
}

fn intervals(input: &InequalityInput, form: InequalityForm) -> Vec<IntervalValue> {
    let out = RationalInequalityProcedure::new(form)
        .solve_input(input)
        .expect("solvable input");
    match out.answer {
        AnswerValue::Intervals(values) => values,
        other => panic!("unexpected answer {:?}", other),
    }
}

/// Probe points on a half-integer grid covering every critical point.
fn probes() -> impl Iterator<Item = BigRational> {
    (-50i64..=50).map(|n| BigRational::new(n.into(), 2.into()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn shifted_square_matches_direct_check(p in -10i64..10, m in -10i64..10, relation in arb_relation()) {
        let input = InequalityInput::ShiftedSquare { p: r(p), m: r(m), relation };
        let set = intervals(&input, InequalityForm::ShiftedSquare);
        for x in probes() {
            let shifted = &x - r(p);
            let lhs = &shifted * &shifted;
            let rhs = r(m) * &shifted;
            let member = set.iter().any(|i| contains(i, &x));
            prop_assert_eq!(member, holds(relation, &lhs, &rhs), "x = {}", x);
        }
    }

    #[test]
    fn x_vs_const_over_x_matches_direct_check(root in 0i64..8, negative in any::<bool>(), relation in arb_relation()) {
        let k = if negative { -r(root * root) } else { r(root * root) };
        let input = InequalityInput::XVsConstOverX { k: k.clone(), m: None, relation };
        let set = intervals(&input, InequalityForm::XVsConstOverX);
        for x in probes().filter(|x| !x.is_zero()) {
            let rhs = &k / &x;
            let member = set.iter().any(|i| contains(i, &x));
            prop_assert_eq!(member, holds(relation, &x, &rhs), "x = {}", x);
        }
        prop_assert!(!set.iter().any(|i| contains(i, &BigRational::zero())));
    }

    #[test]
    fn solving_twice_is_identical(p in -10i64..10, m in -10i64..10, relation in arb_relation()) {
        let input = InequalityInput::ShiftedSquare { p: r(p), m: r(m), relation };
        let procedure = RationalInequalityProcedure::new(InequalityForm::ShiftedSquare);
        prop_assert_eq!(procedure.solve_input(&input).ok(), procedure.solve_input(&input).ok());
    }
}
