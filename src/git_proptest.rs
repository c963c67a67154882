//! Property-based tests for command rendering and porcelain parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::git::{parse_porcelain, quote_arg};
    use crate::manifest::Manifest;
    use proptest::prelude::*;

    /// Minimal POSIX shell word parser covering what `quote_arg` emits.
    fn shell_unquote(word: &str) -> String {
        let mut result = String::new();
        let mut chars = word.chars();
        let mut in_quotes = false;
        while let Some(ch) = chars.next() {
            match (in_quotes, ch) {
                (true, '\'') => in_quotes = false,
                (true, other) => result.push(other),
                (false, '\'') => in_quotes = true,
                (false, '\\') => {
                    if let Some(escaped) = chars.next() {
                        result.push(escaped);
                    }
                }
                (false, other) => result.push(other),
            }
        }
        result
    }

    fn status_code() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(" M".to_string()),
            Just("M ".to_string()),
            Just("MM".to_string()),
            Just("A ".to_string()),
            Just(" D".to_string()),
            Just("??".to_string()),
        ]
    }

    // ============================================================================
    // quote_arg property tests
    // ============================================================================

    proptest! {
        /// Property: a shell reading the quoted word gets the original argument back
        #[test]
        fn quote_arg_round_trips_through_shell_parsing(input in ".*") {
            let quoted = quote_arg(&input);
            prop_assert_eq!(shell_unquote(&quoted), input);
        }

        /// Property: an argument with whitespace is always rendered as one quoted word
        #[test]
        fn quote_arg_wraps_whitespace(left in "[a-z]{0,8}", right in "[a-z]{0,8}") {
            let input = format!("{} {}", left, right);
            let quoted = quote_arg(&input);
            prop_assert!(quoted.starts_with('\''));
            prop_assert!(quoted.ends_with('\''));
        }

        /// Property: plain ref names are never altered
        #[test]
        fn quote_arg_leaves_plain_refs_alone(input in "[a-zA-Z0-9._/-]+") {
            let quoted = quote_arg(&input);
            prop_assert_eq!(&*quoted, input.as_str());
        }
    }

    // ============================================================================
    // parse_porcelain property tests
    // ============================================================================

    proptest! {
        /// Property: every entry keeps its path byte for byte, spaces and non-ASCII included
        #[test]
        fn parse_keeps_paths(
            entries in prop::collection::vec((status_code(), "[a-zA-Z0-9_. é中-]{1,30}"), 1..6)
        ) {
            let output: String = entries
                .iter()
                .map(|(code, path)| format!("{} {}\0", code, path))
                .collect();
            let changes = parse_porcelain(&output);
            prop_assert_eq!(changes.len(), entries.len());
            for (change, (code, path)) in changes.iter().zip(&entries) {
                prop_assert_eq!(change.status.as_str(), code.trim());
                prop_assert_eq!(&change.path, path);
                prop_assert!(change.original_path.is_none());
            }
        }

        /// Property: a rename consumes the following field as its source path
        #[test]
        fn parse_pairs_renames(from in "[a-z0-9_. ]{1,20}", to in "[a-z0-9_. ]{1,20}") {
            let output = format!("R  {}\0{}\0?? after\0", to, from);
            let changes = parse_porcelain(&output);
            prop_assert_eq!(changes.len(), 2);
            prop_assert_eq!(changes[0].status.as_str(), "R");
            prop_assert_eq!(changes[0].original_path.as_deref(), Some(from.as_str()));
            prop_assert_eq!(&changes[0].path, &to);
            prop_assert_eq!(changes[1].path.as_str(), "after");
        }
    }

    // ============================================================================
    // Manifest::repo_path property tests
    // ============================================================================

    proptest! {
        /// Property: repo_path is root, one separator, then the name
        #[test]
        fn repo_path_joins_root_and_name(root in "[a-z]{1,10}", name in "[a-zA-Z0-9_-]{1,20}") {
            let mut manifest = Manifest::default();
            manifest.root = root.clone();
            let path = manifest.repo_path(&name);
            prop_assert_eq!(path.to_string_lossy(), format!("{}/{}", root, name));
        }
    }
}
