//! Creation-time simulation.

use rand::Rng;
use time::{Duration, OffsetDateTime};

pub const MAX_DAYS_AGO: i64 = 365;
pub const MAX_HOURS_AGO: i64 = 24;
pub const MAX_MINUTES_AGO: i64 = 60;

/// Returns `now` shifted back by independently drawn days, hours and minutes.
///
/// The three offsets are summed, so the result is not uniform over the
/// trailing year. Callers rely on that shape staying stable.
pub fn random_created_at(now: OffsetDateTime, rng: &mut impl Rng) -> OffsetDateTime {
    let days = rng.gen_range(0..MAX_DAYS_AGO);
    let hours = rng.gen_range(0..MAX_HOURS_AGO);
    let minutes = rng.gen_range(0..MAX_MINUTES_AGO);

    now - Duration::days(days) - Duration::hours(hours) - Duration::minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_within_trailing_window() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
        let now = OffsetDateTime::now_utc();
        let oldest = now
            - Duration::days(MAX_DAYS_AGO - 1)
            - Duration::hours(MAX_HOURS_AGO - 1)
            - Duration::minutes(MAX_MINUTES_AGO - 1);

        for _ in 0..1000 {
            let ts = random_created_at(now, &mut rng);
            assert!(ts <= now);
            assert!(ts >= oldest, "{ts} older than {oldest}");
        }
    }

    #[test]
    fn test_minute_granularity() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let now = OffsetDateTime::now_utc();

        let ts = random_created_at(now, &mut rng);
        let offset = now - ts;
        assert_eq!(offset.whole_seconds() % 60, 0);
    }

    #[test]
    fn test_same_seed_same_timestamps() {
        let now = OffsetDateTime::now_utc();
        let mut a = rand::rngs::StdRng::seed_from_u64(99);
        let mut b = rand::rngs::StdRng::seed_from_u64(99);

        for _ in 0..10 {
            assert_eq!(random_created_at(now, &mut a), random_created_at(now, &mut b));
        }
    }
}
