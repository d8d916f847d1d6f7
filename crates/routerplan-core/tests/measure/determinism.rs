use proptest::prelude::*;
use routerplan_core::measure::{evaluate, evaluate_angle_text, tokenize};
use routerplan_core::units::{LinearUnit, UnitTable};

fn expression() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| format!("{}.{}", a, b)),
        (1i32..64, 1u32..65).prop_map(|(n, d)| format!("{}/{}", n, d)),
        (0u32..100, prop_oneof![Just("mm"), Just("in"), Just("\""), Just("cm"), Just("ft")])
            .prop_map(|(n, u)| format!("{}{}", n, u)),
    ];
    atom.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")], inner.clone())
                .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b)),
            inner.clone().prop_map(|a| format!("({})", a)),
            inner.prop_map(|a| format!("-({})", a)),
        ]
    })
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(text in expression()) {
        let table = UnitTable::with_canonical(LinearUnit::Inch);
        let first = tokenize(&text, &table).map(|t| t.len());
        let second = tokenize(&text, &table).map(|t| t.len());
        prop_assert_eq!(first, second);

        let a = tokenize(&text, &table).map_err(Into::into).and_then(|t| evaluate(&t, &table));
        let b = tokenize(&text, &table).map_err(Into::into).and_then(|t| evaluate(&t, &table));
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.magnitude.to_bits(), b.magnitude.to_bits());
                prop_assert_eq!(a.dimension, b.dimension);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "diverged: {:?} vs {:?}", a, b),
        }
    }

    #[test]
    fn angles_always_normalized(degrees in -100_000i64..100_000) {
        let table = UnitTable::new();
        let value = evaluate_angle_text(&degrees.to_string(), &table, None).unwrap();
        prop_assert!(value.magnitude >= 0.0 && value.magnitude < 360.0);
        prop_assert_eq!(value.magnitude, degrees.rem_euclid(360) as f64);
    }
}
