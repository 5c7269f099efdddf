use std::collections::BTreeMap;

use loctable::{FlatMap, LocaleDocument, LocaleTree, Parser, TableCodec, convert_auto};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid segment regex")
}

// No quotes or newlines, and no surrounding whitespace: quoted fields are
// trimmed when the table is tokenized, so edge whitespace is not
// preserved by design.
fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9,.!?-]{1,12}( [A-Za-z0-9,.!?-]{1,12}){0,2}")
        .expect("valid value regex")
}

fn two_locale_dataset_strategy()
-> impl Strategy<Value = BTreeMap<String, BTreeMap<String, (String, String)>>> {
    prop::collection::btree_map(
        segment_strategy(),
        prop::collection::btree_map(segment_strategy(), (value_strategy(), value_strategy()), 1..5),
        1..5,
    )
}

fn build_document(dataset: &BTreeMap<String, BTreeMap<String, (String, String)>>) -> LocaleDocument {
    let mut en = LocaleTree::branch();
    let mut fi = LocaleTree::branch();
    for (outer, inner) in dataset {
        for (key, (en_value, fi_value)) in inner {
            let path = format!("{outer}.{key}");
            en.insert(&path, en_value.clone());
            fi.insert(&path, fi_value.clone());
        }
    }
    let mut document = LocaleDocument::new();
    document.insert("en", en);
    document.insert("fi", fi);
    document
}

fn flattened_pairs(document: &LocaleDocument, locale: &str) -> Vec<(String, String)> {
    document
        .get(locale)
        .expect("locale present")
        .flatten()
        .iter()
        .map(|(p, v)| (p.to_string(), v.to_string()))
        .collect()
}

proptest! {
    #[test]
    fn encode_decode_preserves_all_pairs(dataset in two_locale_dataset_strategy()) {
        let codec = TableCodec::new();
        let document = build_document(&dataset);

        let table = codec.encode(&document).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = codec.decode(&table).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(flattened_pairs(&decoded, "en"), flattened_pairs(&document, "en"));
        prop_assert_eq!(flattened_pairs(&decoded, "fi"), flattened_pairs(&document, "fi"));
    }

    #[test]
    fn flatten_inverts_unflatten_on_prefix_free_paths(
        entries in prop::collection::btree_map(
            (segment_strategy(), segment_strategy()),
            value_strategy(),
            1..12,
        )
    ) {
        // all paths are exactly two segments deep, so none prefixes another
        let map: FlatMap = entries
            .iter()
            .map(|((a, b), value)| (format!("{a}.{b}"), value.clone()))
            .collect();

        prop_assert_eq!(map.to_tree().flatten(), map);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn file_conversion_round_trip(dataset in two_locale_dataset_strategy()) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let seed = tmp.path().join("seed.json");
        let middle = tmp.path().join("middle.csv");
        let output = tmp.path().join("roundtrip.json");

        let document = build_document(&dataset);
        document.write_to(&seed).map_err(|e| TestCaseError::fail(e.to_string()))?;

        convert_auto(&seed, &middle).map_err(|e| TestCaseError::fail(e.to_string()))?;
        convert_auto(&middle, &output).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let round_tripped = LocaleDocument::read_from(&output)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(flattened_pairs(&round_tripped, "en"), flattened_pairs(&document, "en"));
        prop_assert_eq!(flattened_pairs(&round_tripped, "fi"), flattened_pairs(&document, "fi"));
    }
}
