//! Date and datetime generators.
//!
//! Values are drawn uniformly between 1970-01-01 00:00:00 and
//! 2037-12-31 23:59:59 at second precision.

use chrono::{DateTime, NaiveDateTime};
use faker_core::FieldValue;
use rand::Rng;

/// Earliest generated instant, as a Unix timestamp.
pub const MIN_TIMESTAMP: i64 = 0;

/// Latest generated instant (2037-12-31T23:59:59Z), as a Unix timestamp.
pub const MAX_TIMESTAMP: i64 = 2_145_916_799;

fn random_datetime<R: Rng>(rng: &mut R) -> NaiveDateTime {
    let ts = rng.gen_range(MIN_TIMESTAMP..=MAX_TIMESTAMP);
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// Generate a random date.
pub fn generate_date<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::Date(random_datetime(rng).date())
}

/// Generate a random datetime without timezone.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::DateTime(random_datetime(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_date_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let date = generate_date(&mut rng).as_date().unwrap();
            assert!((1970..=2037).contains(&date.year()));
        }
    }

    #[test]
    fn test_generate_datetime_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let dt = generate_datetime(&mut rng).as_datetime().unwrap();
            assert!((1970..=2037).contains(&dt.year()));
            assert_eq!(dt.nanosecond(), 0);
        }
    }

    #[test]
    fn test_max_timestamp_is_end_of_2037() {
        let dt = DateTime::from_timestamp(MAX_TIMESTAMP, 0).unwrap().naive_utc();
        assert_eq!(dt.to_string(), "2037-12-31 23:59:59");
    }
}
