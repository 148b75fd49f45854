//! Parameterised `TaskStatus` parsing tests.
//!
//! Each `#[case]` is isolated — no shared state.

use rstest::rstest;
use taskflow_core::{RegistryError, TaskStatus};

#[rstest]
#[case("in progress", TaskStatus::InProgress)]
#[case("In Progress", TaskStatus::InProgress)]
#[case("in-progress", TaskStatus::InProgress)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("INPROGRESS", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
#[case("  Done  ", TaskStatus::Done)]
fn accepted_status_strings(#[case] input: &str, #[case] expected: TaskStatus) {
    let parsed: TaskStatus = input.parse().expect("parse");
    assert_eq!(parsed, expected);
}

#[rstest]
#[case("")]
#[case("todo")]
#[case("blocked")]
#[case("finished")]
#[case("in progres")]
fn rejected_status_strings(#[case] input: &str) {
    let err = input.parse::<TaskStatus>().unwrap_err();
    assert!(
        matches!(err, RegistryError::Validation { field: "status", .. }),
        "got: {err}"
    );
}

#[rstest]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, true)]
#[case(TaskStatus::InProgress, TaskStatus::Done, true)]
#[case(TaskStatus::Done, TaskStatus::Done, true)]
#[case(TaskStatus::Done, TaskStatus::InProgress, false)]
fn status_transitions(#[case] from: TaskStatus, #[case] to: TaskStatus, #[case] allowed: bool) {
    assert_eq!(from.can_become(to), allowed);
}

#[test]
fn display_parses_back() {
    for status in TaskStatus::ALL {
        let back: TaskStatus = status.to_string().parse().expect("parse display form");
        assert_eq!(back, status);
    }
}
