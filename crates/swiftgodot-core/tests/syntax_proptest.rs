//! Property-based tests for the Swift syntax engine.
//!
//! Sources are generated from a small grammar of balanced brackets,
//! literals, comments and operators. Whatever the shape, rendering a parsed
//! tree must give back the input, and inserting into the registry list must
//! only touch that list and leave it valid Swift.

use proptest::prelude::*;
use swiftgodot_core::syntax::{
    extract_project_name, parse, register_new_entry, registered_entries, RegistryPattern,
};

fn separator() -> impl Strategy<Value = &'static str> + Clone {
    prop_oneof![
        Just(" "),
        Just("\n"),
        Just("\n    "),
        Just("\t"),
        Just(" // note\n"),
        Just(" /* block /* nested */ */ "),
        Just("\r\n"),
    ]
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z_][A-Za-z0-9_]{0,8}",
        "[À-ÖØ-öø-ÿ][a-zé0-9]{0,6}",
        "[0-9]{1,4}(\\.[0-9]{1,2})?",
        "\"[a-zA-Z0-9 ]{0,10}\"",
        "#\"[a-z][a-z\"]{0,5}\"#",
        "`[a-z]{1,6}`",
        Just(",".to_string()),
        Just(":".to_string()),
        Just(".".to_string()),
        Just("=".to_string()),
        Just("->".to_string()),
        Just("#".to_string()),
        Just("@".to_string()),
        Just(";".to_string()),
    ]
}

fn joined(parts: Vec<(String, &'static str)>) -> String {
    parts
        .into_iter()
        .map(|(fragment, sep)| format!("{fragment}{sep}"))
        .collect()
}

fn fragment() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        let body = prop::collection::vec((inner, separator()), 0..6).prop_map(joined);
        prop_oneof![
            body.clone().prop_map(|b| format!("({b})")),
            body.clone().prop_map(|b| format!("[{b}]")),
            body.clone().prop_map(|b| format!("{{{b}}}")),
            body.prop_map(|b| format!("call({b})")),
        ]
    })
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec((fragment(), separator()), 0..10).prop_map(joined)
}

fn type_name() -> impl Strategy<Value = String> {
    "[A-ZÀ-Ö][A-Za-z0-9é]{0,10}"
}

/// The inside of a registry list: entries separated by commas with any
/// mix of spacing, line breaks and comments around them.
fn list_body(existing: &[String], seps: &[&str], trailing_comma: bool) -> String {
    let mut body = seps[0].to_string();
    for (i, name) in existing.iter().enumerate() {
        body.push_str(name);
        body.push_str(".self");
        if i + 1 < existing.len() || trailing_comma {
            body.push(',');
        }
        body.push_str(seps[i + 1]);
    }
    body
}

proptest! {
    #[test]
    fn render_of_parse_is_identity(input in source()) {
        let tree = parse(&input).unwrap();
        prop_assert_eq!(tree.render(), input);
    }

    #[test]
    fn insertion_only_touches_the_list(
        prefix in source(),
        suffix in source(),
        existing in prop::collection::vec(type_name(), 0..4),
        seps in prop::collection::vec(separator(), 5),
        trailing_comma in any::<bool>(),
        added in type_name(),
    ) {
        let trailing_comma = trailing_comma && !existing.is_empty();
        let body = list_body(&existing, &seps, trailing_comma);
        let head = format!("{prefix}\n#initSwiftExtension(types: [");
        let tail = format!("])\n{suffix}");
        let input = format!("{head}{body}{tail}");

        let output = register_new_entry(&input, &added).unwrap();
        prop_assert!(output.starts_with(&head), "{}", output);
        prop_assert!(output.ends_with(&tail), "{}", output);
        prop_assert!(parse(&output).is_ok(), "{}", output);

        let mut expected = existing.clone();
        expected.push(added);
        prop_assert_eq!(registered_entries(&RegistryPattern::default(), &output).unwrap(), expected);
    }

    #[test]
    fn comma_space_lists_extend_in_place(
        existing in prop::collection::vec(type_name(), 0..4),
        added in type_name(),
    ) {
        let entries: Vec<String> = existing.iter().map(|n| format!("{n}.self")).collect();
        let before = format!("#initSwiftExtension(types: [{}])", entries.join(", "));
        let mut with_new = entries.clone();
        with_new.push(format!("{added}.self"));
        let after = format!("#initSwiftExtension(types: [{}])", with_new.join(", "));

        prop_assert_eq!(register_new_entry(&before, &added).unwrap(), after);
    }

    #[test]
    fn sequential_insertions_keep_comma_space(names in prop::collection::vec(type_name(), 1..6)) {
        let mut text = "#initSwiftExtension(types: [])".to_string();
        for name in &names {
            text = register_new_entry(&text, name).unwrap();
        }
        let list: Vec<String> = names.iter().map(|n| format!("{n}.self")).collect();
        prop_assert_eq!(&text, &format!("#initSwiftExtension(types: [{}])", list.join(", ")));
        prop_assert!(!text.contains(",]"));
        prop_assert_eq!(registered_entries(&RegistryPattern::default(), &text).unwrap(), names);
    }

    #[test]
    fn package_name_survives_surrounding_noise(
        prefix in source(),
        name in "[A-Za-z][A-Za-z0-9 _-]{0,15}",
    ) {
        let input = format!("{prefix}\nlet package = Package(name: \"{name}\", products: [.library(name: \"Decoy\")])\n");
        prop_assert_eq!(extract_project_name(&input).unwrap(), Some(name));
    }
}

#[test]
fn real_init_file_round_trips() {
    let source = r#"import SwiftGodot

/// Registered with Godot on load.
#initSwiftExtension(
    cdecl: "swift_entry_point",
    types: [
        Player.self,
        Enemy.self, // spawned by Level
    ]
)
"#;
    assert_eq!(parse(source).unwrap().render(), source);

    let out = register_new_entry(source, "Coin").unwrap();
    assert!(out.contains("        Enemy.self, // spawned by Level\n        Coin.self\n    ]"));
}
