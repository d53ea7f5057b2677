//! Property-based tests for pattern handling.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::copier::{resolve_and_copy, OverwritePolicy};
    use crate::error::Error;
    use crate::pattern::{classify, is_glob, PatternKind};
    use crate::prompt::{is_affirmative, Decline};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    // ============================================================================
    // is_glob property tests
    // ============================================================================

    proptest! {
        /// Property: plain path characters never make a pattern a glob
        #[test]
        fn is_glob_false_for_plain_paths(input in "[a-zA-Z0-9_./-]*") {
            prop_assert!(!is_glob(&input));
        }

        /// Property: any wildcard marker anywhere makes a pattern a glob
        #[test]
        fn is_glob_true_with_any_marker(
            prefix in "[a-z/]*",
            marker in prop::sample::select(vec!['*', '?', '[']),
            suffix in "[a-z/.]*",
        ) {
            let pattern = format!("{}{}{}", prefix, marker, suffix);
            prop_assert!(is_glob(&pattern));
        }

        /// Property: globs are classified without touching the filesystem
        #[test]
        fn globs_classify_as_glob(name in "[a-z]{1,8}") {
            let pattern = format!("{}/*.md", name);
            let kind = classify(std::path::Path::new("/nonexistent-snapshot"), &pattern);
            prop_assert_eq!(kind.unwrap(), PatternKind::Glob);
        }

        /// Property: any pattern with a `..` segment is rejected
        #[test]
        fn parent_segments_are_rejected(
            before in "[a-z]{0,5}",
            after in "[a-z]{0,5}",
        ) {
            let pattern = if before.is_empty() {
                format!("../{}", after)
            } else {
                format!("{}/../{}", before, after)
            };
            let err = classify(std::path::Path::new("/nonexistent-snapshot"), &pattern)
                .unwrap_err();
            let is_outside = matches!(err, Error::PatternOutsideRepository { .. });
            prop_assert!(is_outside);
        }

        /// Property: only y/yes (any case, any padding) is consent
        #[test]
        fn only_y_or_yes_is_affirmative(answer in "\\PC{0,6}") {
            let normalized = answer.trim().to_lowercase();
            let expected = normalized == "y" || normalized == "yes";
            prop_assert_eq!(is_affirmative(&answer), expected);
        }
    }

    // ============================================================================
    // Flat destination property tests
    // ============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: a file at any depth lands at `<dest>/<basename>`
        #[test]
        fn copied_file_lands_under_base_name(
            dirs in prop::collection::vec("[a-z]{1,6}", 0..4),
            name in "[a-z]{1,8}\\.md",
        ) {
            let snapshot = TempDir::new().unwrap();
            let dest = TempDir::new().unwrap();

            let mut relative = dirs.join("/");
            if !relative.is_empty() {
                relative.push('/');
                fs::create_dir_all(snapshot.path().join(&relative)).unwrap();
            }
            relative.push_str(&name);
            fs::write(snapshot.path().join(&relative), b"content").unwrap();

            let outcome = resolve_and_copy(
                snapshot.path(),
                &[relative.clone()],
                dest.path(),
                OverwritePolicy::Skip,
                &mut Decline,
            );

            prop_assert_eq!(outcome.synced, vec![relative]);
            prop_assert!(dest.path().join(&name).is_file());
            prop_assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1);
        }
    }
}
