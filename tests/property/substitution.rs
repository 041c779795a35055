//! Property-based tests for placeholder substitution

use configurator::substitute::apply;
use configurator::values::ValueMapping;
use proptest::prelude::*;

fn mapping(pairs: &[(String, String)]) -> ValueMapping {
    let mut mapping = ValueMapping::new("props");
    for (k, v) in pairs {
        mapping.insert(k.clone(), v.clone());
    }
    mapping
}

/// With values free of `%` and key characters, a second pass changes nothing
#[test]
fn test_substitution_idempotence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let pairs = prop::collection::vec(("[A-Z]{1,5}", "[a-z0-9 .:/]{1,8}"), 0..5);
    let text = "[a-zA-Z %\n]{0,80}";

    runner
        .run(&(pairs, text), |(pairs, text)| {
            let mapping = mapping(&pairs);
            let once = apply(&text, &mapping);
            let twice = apply(&once.content, &mapping);
            assert_eq!(once.content, twice.content);
            assert!(twice.replacements.is_empty());
            Ok(())
        })
        .unwrap();
}

/// A single key behaves like replacing `%%key%%` then `%key%`
#[test]
fn test_single_key_matches_str_replace_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[A-Z]{1,4}", "[a-z0-9]{0,6}", "[A-Z% \n]{0,60}"),
            |(key, value, text)| {
                let mapping = mapping(&[(key.clone(), value.clone())]);
                let expected = text
                    .replace(&format!("%%{}%%", key), &value)
                    .replace(&format!("%{}%", key), &value);
                assert_eq!(apply(&text, &mapping).content, expected.into_bytes());
                Ok(())
            },
        )
        .unwrap();
}
