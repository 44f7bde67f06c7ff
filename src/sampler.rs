//! # Random Query-Time Sampler
//!
//! Produces a uniformly sampled time of day strictly between a tide event
//! and its chronological successor. This is not part of the deterministic
//! query surface; it exists so demos and tests can generate plausible query
//! times that land inside a known half-cycle.
//!
//! The random source is injected, never global, so tests drive the sampler
//! with a seeded generator.

use crate::{event_indices, reference_date, TideDay, TideError};
use chrono::{Duration, NaiveTime};
use rand::Rng;

/// Closing fallback when the position is the last event of the table.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("static fallback time is valid")
}

/// Sample a uniformly random time strictly between the event at
/// `(day_number, tide_number)` and the next event.
///
/// The successor is the next entry of the same day when one remains, else
/// the first entry of the next day (the sampled time then may wrap past
/// midnight), else a fixed `23:59` for the very last event of the table.
/// When the successor does not lie after the event (degenerate data), the
/// event's own time is returned unchanged.
pub fn sample_time_between<R: Rng>(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
    rng: &mut R,
) -> Result<NaiveTime, TideError> {
    let (day_idx, tide_idx) = event_indices(tide_days, day_number, tide_number)?;
    let day = &tide_days[day_idx];
    let current = &day.heights[tide_idx];

    let (next_time, day_offset) = if let Some(next) = day.heights.get(tide_idx + 1) {
        (next.time, 0)
    } else if let Some(first_next_day) = tide_days.get(day_idx + 1).and_then(|d| d.heights.first())
    {
        (first_next_day.time, 1)
    } else {
        (end_of_day(), 0)
    };

    let current_instant = reference_date().and_time(current.time);
    let next_instant = (reference_date() + Duration::days(day_offset)).and_time(next_time);
    if next_instant <= current_instant {
        return Ok(current.time);
    }

    let gap_ms = (next_instant - current_instant).num_milliseconds();
    if gap_ms <= 1 {
        return Ok(current.time);
    }
    let drawn = (gap_ms as f64 * rng.gen::<f64>()) as i64;
    // Keep the sample strictly inside the open interval; a draw that
    // truncates onto either endpoint is nudged one millisecond off it.
    let offset_ms = drawn.clamp(1, gap_ms - 1);

    Ok((current_instant + Duration::milliseconds(offset_ms)).time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{d, t, three_day_table};
    use crate::TideExtremum;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Compare times as instants on the sampler's own wrap rules: the
    /// successor of a day's last event lives on the following day.
    fn strictly_between(sampled: NaiveTime, current: NaiveTime, next: NaiveTime, wraps: bool) {
        let base = reference_date();
        let current_instant = base.and_time(current);
        let next_instant = (base + Duration::days(i64::from(wraps))).and_time(next);
        let sampled_instant = if wraps && sampled < current {
            (base + Duration::days(1)).and_time(sampled)
        } else {
            base.and_time(sampled)
        };
        assert!(
            sampled_instant > current_instant && sampled_instant < next_instant,
            "{sampled} not strictly inside ({current}, {next})"
        );
    }

    #[test]
    fn samples_fall_strictly_between_consecutive_events() {
        let days = three_day_table();
        let mut rng = StdRng::seed_from_u64(7);

        for (day_idx, day) in days.iter().enumerate() {
            for tide_idx in 0..day.heights.len() {
                let last_of_table = day_idx == days.len() - 1 && tide_idx == day.heights.len() - 1;
                if last_of_table {
                    continue;
                }
                let (next_time, wraps) = match day.heights.get(tide_idx + 1) {
                    Some(next) => (next.time, false),
                    None => (days[day_idx + 1].heights[0].time, true),
                };
                for _ in 0..50 {
                    let sampled =
                        sample_time_between(&days, day_idx + 1, tide_idx + 1, &mut rng).unwrap();
                    strictly_between(sampled, day.heights[tide_idx].time, next_time, wraps);
                }
            }
        }
    }

    #[test]
    fn last_event_of_the_table_samples_up_to_end_of_day() {
        let days = three_day_table();
        let mut rng = StdRng::seed_from_u64(11);
        let last = days[2].heights[3].time; // 22:00
        for _ in 0..50 {
            let sampled = sample_time_between(&days, 3, 4, &mut rng).unwrap();
            assert!(sampled > last && sampled <= t(23, 59));
        }
    }

    #[test]
    fn minute_scale_gaps_still_sample_inside() {
        // Events one and two minutes apart, as tight as tables get.
        let days = vec![crate::TideDay::new(
            d(1),
            vec![
                TideExtremum::low_water(t(12, 0), 1.0),
                TideExtremum::low_water(t(12, 1), 2.0),
                TideExtremum::low_water(t(12, 3), 1.5),
            ],
        )];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let sampled = sample_time_between(&days, 1, 1, &mut rng).unwrap();
            assert!(sampled > t(12, 0) && sampled < t(12, 1));
        }
    }

    #[test]
    fn identical_seed_reproduces_the_sample() {
        let days = three_day_table();
        let a = sample_time_between(&days, 2, 1, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample_time_between(&days, 2, 1, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let days = three_day_table();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            sample_time_between(&days, 0, 1, &mut rng),
            Err(TideError::InvalidArgument(_))
        ));
        assert!(matches!(
            sample_time_between(&days, 1, 5, &mut rng),
            Err(TideError::InvalidArgument(_))
        ));
    }
}
