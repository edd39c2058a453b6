//! Same descriptor, same bytes; batch dispatch equals sequential dispatch.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tutor_api_models::TaskDescriptor;
use tutor_engine::{EngineOptions, Registry, Router};

fn task(id: String, task_type: u32, subtype: &str, pattern: &str, params: Value) -> TaskDescriptor {
    let parameters = match params {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    TaskDescriptor::new(id, task_type, subtype, pattern, parameters)
}

const SIGNS: [&str; 4] = ["<", ">", "≤", "≥"];

fn arb_task() -> impl Strategy<Value = TaskDescriptor> {
    prop_oneof![
        (-9i64..10, 1i64..6, 0usize..4).prop_map(|(p, m, s)| task(
            format!("sq-{}-{}", p, m),
            13,
            "rational_inequalities",
            "shifted_square",
            json!({"p": p, "m": m, "sign": SIGNS[s]}),
        )),
        (-5i64..6, 0usize..4).prop_map(|(m, s)| task(
            format!("uf-{}", m),
            13,
            "rational_inequalities",
            "unit_fraction_compare",
            json!({"m": m, "sign": SIGNS[s]}),
        )),
        (-3i64..4, -3i64..4, -3i64..4).prop_map(|(a, b, c)| task(
            format!("qs-{}{}{}", a, b, c),
            11,
            "sign_matching",
            "quadratic_signs",
            json!({"a": a, "b": b, "c": c}),
        )),
        (-20i64..20, 1i64..9, -20i64..20).prop_map(|(n, d, k)| task(
            format!("fr-{}", n),
            6,
            "fractions",
            "fraction_expression",
            json!({"expression": {"op": "add", "args": [
                {"type": "fraction", "numerator": n, "denominator": d},
                {"op": "neg", "args": [{"type": "integer", "value": k}]}
            ]}}),
        )),
        Just(task("nope".into(), 6, "fractions", "does_not_exist", json!({}))),
    ]
}

fn serialised(router: &Router, task: &TaskDescriptor) -> String {
    serde_json::to_string(&router.dispatch(task)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dispatch_is_byte_deterministic(t in arb_task()) {
        let router = Router::with_defaults();
        prop_assert_eq!(serialised(&router, &t), serialised(&router, &t));
    }

    #[test]
    fn successful_cores_number_steps_from_one(t in arb_task()) {
        let core = Router::with_defaults().dispatch(&t);
        if core.is_success() {
            prop_assert!(!core.calculation_steps.is_empty());
            for (i, step) in core.calculation_steps.iter().enumerate() {
                prop_assert_eq!(step.step_number, i + 1);
            }
        } else {
            prop_assert!(core.calculation_steps.is_empty());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn batch_matches_sequential(tasks in proptest::collection::vec(arb_task(), 0..24)) {
        let options = EngineOptions { parallelism: 4, ..EngineOptions::default() };
        let router = Router::new(Registry::with_builtin_procedures(), options);
        let sequential: Vec<_> = tasks.iter().map(|t| router.dispatch(t)).collect();
        prop_assert_eq!(router.dispatch_batch(&tasks), sequential);
    }
}
