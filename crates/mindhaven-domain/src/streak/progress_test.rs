#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::check_in::DateKey;
    use crate::shared::{DomainError, UserId};

    fn day(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn days(dates: &[&str]) -> Vec<DateKey> {
        dates.iter().map(|d| day(d)).collect()
    }

    fn progress() -> StreakProgress {
        StreakProgress::new(UserId::from_string("u1"))
    }

    #[test]
    fn test_resolve_raises_watermark() {
        let mut progress = progress();
        let live = evaluate_days(&days(&["2024-01-01", "2024-01-02", "2024-01-03"]), day("2024-01-03"));

        let state = progress.resolve(live);

        assert_eq!(state.current_streak, 3);
        assert_eq!(progress.highest_streak(), 3);
    }

    #[test]
    fn test_watermark_survives_reset() {
        let mut progress = StreakProgress::restore(UserId::from_string("u1"), 9, None, None);
        let live = evaluate_days(&days(&["2024-01-04"]), day("2024-01-05"));

        let state = progress.resolve(live);

        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 9);
        assert_eq!(progress.highest_streak(), 9);
    }

    #[test]
    fn test_restore_rejected_when_not_broken() {
        let mut progress = progress();
        let live = evaluate_days(&days(&["2024-01-04"]), day("2024-01-05"));

        let result = progress.grant_restore(&live);

        assert!(matches!(result, Err(DomainError::InvalidTransition(_))));
        assert!(progress.pending_override().is_none());
    }

    #[test]
    fn test_restore_rejected_without_check_ins() {
        let mut progress = progress();
        let live = evaluate_days(&[], day("2024-01-05"));

        assert!(progress.grant_restore(&live).is_err());
    }

    #[test]
    fn test_restore_sets_watermark_and_is_consumed_once() {
        let mut progress = StreakProgress::restore(UserId::from_string("u1"), 7, None, None);
        let broken_days = days(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        let today = day("2024-01-06");

        let grant = progress
            .grant_restore(&evaluate_days(&broken_days, today))
            .unwrap();
        assert_eq!(grant.current_streak, 7);
        assert_eq!(grant.anchor, day("2024-01-03"));

        let restored = progress.resolve(evaluate_days(&broken_days, today));
        assert_eq!(restored.current_streak, 7);
        assert!(!restored.broken);
        assert!(restored.restored);
        assert_eq!(restored.last_active_date, Some(day("2024-01-03")));

        let after = progress.resolve(evaluate_days(&broken_days, today));
        assert_eq!(after.current_streak, 0);
        assert!(after.broken);
        assert!(!after.restored);
    }

    #[test]
    fn test_second_restore_for_same_break_rejected() {
        let mut progress = progress();
        let broken_days = days(&["2024-01-01", "2024-01-02"]);
        let today = day("2024-01-06");

        progress
            .grant_restore(&evaluate_days(&broken_days, today))
            .unwrap();
        progress.resolve(evaluate_days(&broken_days, today));

        let again = progress.grant_restore(&evaluate_days(&broken_days, today));
        assert!(matches!(again, Err(DomainError::InvalidTransition(_))));
    }

    #[test]
    fn test_new_break_can_be_restored_again() {
        let mut progress = progress();
        progress
            .grant_restore(&evaluate_days(&days(&["2024-01-01"]), day("2024-01-04")))
            .unwrap();

        let later = evaluate_days(&days(&["2024-01-01", "2024-01-10"]), day("2024-01-13"));
        assert!(progress.grant_restore(&later).is_ok());
    }

    #[test]
    fn test_restore_falls_back_to_pre_break_run() {
        let mut progress = progress();
        let live = evaluate_days(&days(&["2024-01-01", "2024-01-02"]), day("2024-01-06"));

        // Watermark is raised from live data first, so it equals the broken run.
        let grant = progress.grant_restore(&live).unwrap();
        assert_eq!(grant.current_streak, 2);
    }

    #[test]
    fn test_override_discarded_after_fresh_check_in() {
        let mut progress = StreakProgress::restore(UserId::from_string("u1"), 5, None, None);
        progress
            .grant_restore(&evaluate_days(&days(&["2024-01-01"]), day("2024-01-05")))
            .unwrap();

        let state = progress.resolve(evaluate_days(&days(&["2024-01-01", "2024-01-05"]), day("2024-01-05")));

        assert_eq!(state.current_streak, 1);
        assert!(!state.restored);
        assert!(progress.pending_override().is_none());
    }
}
