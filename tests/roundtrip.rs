//! Property test: theme documents survive serialization round trips.

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;

use retheme::theme::{Extras, ThemeDocument, ThemeMeta};

fn variable_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}".prop_map(|s| format!("@{s}"))
}

fn meta() -> impl Strategy<Value = ThemeMeta> {
    (
        option::of(".{0,20}"),
        option::of(".{0,20}"),
        option::of(".{0,20}"),
    )
        .prop_map(|(author, theme_name, version)| ThemeMeta {
            author,
            theme_name,
            version,
            ..ThemeMeta::default()
        })
}

proptest! {
    #[test]
    fn document_round_trips_through_json(
        vars in btree_map(variable_name(), ".{0,30}", 0..20),
        css in vec(".{0,40}", 0..4),
        less in vec(".{0,40}", 0..4),
        meta in option::of(meta()),
    ) {
        let doc = ThemeDocument {
            vars,
            extra: Extras { meta, css, less },
        };

        let json = doc.to_json().unwrap();
        let parsed = ThemeDocument::parse(&json).unwrap();
        prop_assert_eq!(parsed, doc);
    }

    #[test]
    fn legacy_flat_documents_always_import(
        vars in btree_map(variable_name(), ".{0,30}", 1..20),
    ) {
        let json = serde_json::to_string(&vars).unwrap();
        let parsed = ThemeDocument::parse(&json).unwrap();
        prop_assert_eq!(parsed.vars, vars);
        prop_assert!(parsed.extra.is_empty());
    }
}
