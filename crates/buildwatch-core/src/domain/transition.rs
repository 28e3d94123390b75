//! Build status transition rules

use buildwatch_api::BuildStatus;

use crate::event::BuildEvent;

/// Decides whether a status change is worth a notification.
///
/// `previous` is `None` for a project seen for the first time, which never
/// notifies. Only called once a new build number has been observed.
pub fn classify(previous: Option<&BuildStatus>, current: &BuildStatus) -> Option<BuildEvent> {
    let previous = previous?;

    match (previous, current) {
        (BuildStatus::Failure, BuildStatus::Failure) => Some(BuildEvent::StillFailing),
        (BuildStatus::Failure, BuildStatus::Success) => Some(BuildEvent::Fixed),
        (_, BuildStatus::Failure) => Some(BuildEvent::Failed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn other(label: &str) -> BuildStatus {
        BuildStatus::Other(label.to_string())
    }

    #[test]
    fn test_transition_table() {
        use BuildStatus::*;

        assert_eq!(
            classify(Some(&Failure), &Failure),
            Some(BuildEvent::StillFailing)
        );
        assert_eq!(classify(Some(&Failure), &Success), Some(BuildEvent::Fixed));
        assert_eq!(classify(Some(&Success), &Failure), Some(BuildEvent::Failed));
        assert_eq!(classify(Some(&Success), &Success), None);
        assert_eq!(
            classify(Some(&other("Unknown")), &Failure),
            Some(BuildEvent::Failed)
        );
    }

    #[test]
    fn test_unrecognized_current_status_is_quiet() {
        assert_eq!(classify(Some(&BuildStatus::Failure), &other("Exception")), None);
        assert_eq!(classify(Some(&BuildStatus::Success), &other("Unknown")), None);
        assert_eq!(classify(Some(&other("Unknown")), &BuildStatus::Success), None);
    }

    #[test]
    fn test_first_sighting_is_quiet() {
        assert_eq!(classify(None, &BuildStatus::Failure), None);
        assert_eq!(classify(None, &BuildStatus::Success), None);
        assert_eq!(classify(None, &other("Unknown")), None);
    }

    fn any_status() -> impl Strategy<Value = BuildStatus> {
        prop_oneof![
            Just(BuildStatus::Success),
            Just(BuildStatus::Failure),
            "[A-Za-z]{1,12}".prop_map(BuildStatus::from),
        ]
    }

    proptest! {
        #[test]
        fn classify_is_deterministic(
            previous in proptest::option::of(any_status()),
            current in any_status(),
        ) {
            let first = classify(previous.as_ref(), &current);
            let second = classify(previous.as_ref(), &current);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn classify_never_fires_without_history(current in any_status()) {
            prop_assert_eq!(classify(None, &current), None);
        }

        #[test]
        fn current_failure_always_notifies(previous in any_status()) {
            prop_assert!(classify(Some(&previous), &BuildStatus::Failure).is_some());
        }
    }
}
