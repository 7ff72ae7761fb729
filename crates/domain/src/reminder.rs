use crate::shared::entity::ID;

/// Minute marks before a due time at which a one-time due-soon alert
/// should fire, unless overridden by configuration.
pub const DEFAULT_DUE_SOON_THRESHOLDS: [i64; 2] = [10, 5];

/// Identifies one firing of a due-soon threshold for one follow-up.
/// Keys that have fired are remembered for the lifetime of the process
/// only; a restart forgets them and may alert again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DueSoonKey {
    pub follow_up_id: ID,
    pub threshold_minutes: i64,
}

impl DueSoonKey {
    pub fn new(follow_up_id: ID, threshold_minutes: i64) -> Self {
        Self {
            follow_up_id,
            threshold_minutes,
        }
    }
}

/// Whole minutes until `due_at`, floor-rounded, negative once the due
/// time has passed.
pub fn due_in_minutes(due_at: i64, now: i64) -> i64 {
    (due_at - now).div_euclid(60_000)
}

/// The threshold matched by `diff_minutes`, if any. The match is exact
/// equality, not a range: a scan that skips the matching minute (slow
/// tick, clock jump, process restart) silently misses the threshold.
pub fn threshold_hit(diff_minutes: i64, thresholds: &[i64]) -> Option<i64> {
    thresholds.iter().copied().find(|m| *m == diff_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60 * 1000;

    #[test]
    fn minutes_until_due_floors() {
        let now = 100 * MINUTE;
        assert_eq!(due_in_minutes(now + 10 * MINUTE, now), 10);
        assert_eq!(due_in_minutes(now + 10 * MINUTE + 59_000, now), 10);
        assert_eq!(due_in_minutes(now + 59_000, now), 0);
        assert_eq!(due_in_minutes(now, now), 0);
        // floor, not truncation: one second past due is already -1
        assert_eq!(due_in_minutes(now - 1000, now), -1);
        assert_eq!(due_in_minutes(now - MINUTE, now), -1);
        assert_eq!(due_in_minutes(now - MINUTE - 1000, now), -2);
    }

    #[test]
    fn threshold_match_is_exact() {
        let thresholds = DEFAULT_DUE_SOON_THRESHOLDS;
        assert_eq!(threshold_hit(10, &thresholds), Some(10));
        assert_eq!(threshold_hit(5, &thresholds), Some(5));
        assert_eq!(threshold_hit(11, &thresholds), None);
        assert_eq!(threshold_hit(9, &thresholds), None);
        assert_eq!(threshold_hit(0, &thresholds), None);
        assert_eq!(threshold_hit(-5, &thresholds), None);
    }
}
