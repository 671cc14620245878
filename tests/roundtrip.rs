use attrexp::read::parse;
use attrexp::value::{Atom, Expression};
use proptest::prelude::*;

// Text without protected characters that does not look like a number,
// text that needs quoting, and text with stray brackets; no control
// characters or backslashes, which print raw.
fn string_atom() -> impl Strategy<Value = Atom> {
    prop_oneof![
        "[a-z_][a-z0-9_:.]{0,8}".prop_map(|s| Atom::from(s.as_str())),
        "[a-z \"'\\[\\]=()]{0,8}".prop_map(|s| Atom::from(s.as_str())),
        "[a-z()]{1,6}".prop_map(|s| Atom::from(s.as_str())),
        "[0-9./]{0,5}".prop_map(|s| Atom::from(s.as_str())),
    ]
}

fn atom() -> impl Strategy<Value = Atom> {
    prop_oneof![
        string_atom(),
        (0..=i64::MAX).prop_map(Atom::Integer),
        (0u32..1_000_000, 1u32..1000)
            .prop_map(|(a, b)| Atom::Decimal(a as f64 + 1.0 / b as f64)),
    ]
}

fn expression() -> impl Strategy<Value = Expression> {
    atom().prop_map(Expression::Atom).prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Expression::List),
            (atom(), inner).prop_map(|(identifier, value)| Expression::Attribute {
                identifier,
                value: Box::new(value),
            }),
        ]
    })
}

proptest! {
    #[test]
    fn description_reads_back(e in expression()) {
        let text = e.to_string();
        prop_assert_eq!(parse(&text), Ok(e), "text: {}", text);
    }

    #[test]
    fn description_is_repeatable(e in expression()) {
        prop_assert_eq!(e.to_string(), e.to_string());
    }

    #[test]
    fn pretty_description_reads_back(e in expression()) {
        let text = e.pretty_description("  ");
        prop_assert_eq!(parse(&text), Ok(e));
    }
}
