use num_rational::BigRational;
use proptest::prelude::*;
use tutor_api_models::{AnswerValue, IntervalValue};
use tutor_formatter::{
    canonical_rational, format_answer, format_rational, format_text, parse_rational,
    polynomial_formula, Term,
};

fn arb_rational() -> impl Strategy<Value = BigRational> {
    (-2000i64..2000, 1i64..400).prop_map(|(n, d)| BigRational::new(n.into(), d.into()))
}

fn arb_term() -> impl Strategy<Value = Term> {
    prop_oneof![
        (arb_rational(), 0u32..4).prop_map(|(c, p)| Term::known(c, p)),
        ("[abck]", 0u32..4).prop_map(|(s, p)| Term::symbol(s, p)),
    ]
}

fn arb_interval() -> impl Strategy<Value = IntervalValue> {
    (
        proptest::option::of(arb_rational()),
        any::<bool>(),
        proptest::option::of(arb_rational()),
        any::<bool>(),
    )
        .prop_map(|(lo, lc, hi, hc)| IntervalValue {
            lower: lo.map(|v| canonical_rational(&v)),
            lower_closed: lc,
            upper: hi.map(|v| canonical_rational(&v)),
            upper_closed: hc,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn formatted_rationals_are_fixed_points(v in arb_rational()) {
        let once = format_rational(&v);
        prop_assert_eq!(format_text(&once), once);
    }

    #[test]
    fn formatted_rationals_parse_back(v in arb_rational()) {
        let shown = format_rational(&v);
        prop_assert_eq!(parse_rational(&shown), Some(v));
    }

    #[test]
    fn formatted_formulas_are_fixed_points(terms in proptest::collection::vec(arb_term(), 0..5)) {
        let machine = format!("y = {}", polynomial_formula("x", &terms));
        let once = format_text(&machine);
        prop_assert_eq!(format_text(&once), once);
    }

    #[test]
    fn formatted_interval_sets_are_fixed_points(set in proptest::collection::vec(arb_interval(), 0..4)) {
        let once = format_answer(&AnswerValue::Intervals(set));
        prop_assert_eq!(format_text(&once), once);
    }

    #[test]
    fn formatted_decimal_text_is_fixed_point(int in 0u32..10_000, frac in 0u32..1000, exp in -12i32..12) {
        let machine = format!("{}.{}*10^{}", int, frac, exp);
        let once = format_text(&machine);
        prop_assert_eq!(format_text(&once), once);
    }
}
