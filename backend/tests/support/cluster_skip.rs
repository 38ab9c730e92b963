//! Opt-out policy for suites that need PostgreSQL.
//!
//! A database that cannot be provisioned fails the suite unless
//! `SKIP_TEST_CLUSTER` is truthy, so a broken environment never passes
//! silently.

/// Environment variable that allows database-backed tests to be skipped.
pub const SKIP_TEST_CLUSTER_ENV: &str = "SKIP_TEST_CLUSTER";

/// Truthy values: "1", "true", "yes" (case-insensitive).
fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether `SKIP_TEST_CLUSTER` is set to a truthy value.
pub fn should_skip_test_cluster() -> bool {
    std::env::var(SKIP_TEST_CLUSTER_ENV).is_ok_and(|value| is_truthy(&value))
}

/// Print a skip marker and return `None` when skipping is allowed; panic
/// otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test database setup failed: {reason}. Set {SKIP_TEST_CLUSTER_ENV}=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("TRUE", true)]
    #[case("yes", true)]
    #[case("0", false)]
    #[case("", false)]
    #[case("skip", false)]
    fn truthy_values(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_truthy(value), expected);
    }

    #[test]
    fn setup_failure_is_skipped_only_when_opted_out() {
        let _guard = lock_env([(SKIP_TEST_CLUSTER_ENV, Some("1"))]);
        let outcome: Option<()> = handle_cluster_setup_failure("no server");
        assert!(outcome.is_none());
    }

    #[test]
    fn setup_failure_panics_by_default() {
        let _guard = lock_env([(SKIP_TEST_CLUSTER_ENV, None::<&str>)]);
        let outcome =
            std::panic::catch_unwind(|| -> Option<()> { handle_cluster_setup_failure("no server") });
        assert!(outcome.is_err(), "a missing database must fail the suite");
    }
}
