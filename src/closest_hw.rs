//! # Closest High-Water Search
//!
//! Finds the high water nearest to an arbitrary clock time, looking at the
//! anchor day plus one day on either side. Distances are computed on a fixed
//! reference date shifted by the day offset, so the comparison is purely
//! time-of-day based and independent of the calendar dates the generator
//! stamped on the table. Three days is a hard bound: a table whose only high
//! waters sit further away reports [`TideError::NotFound`].
//!
//! The "best candidate so far" is carried as a local fold over the scan
//! order, so repeated queries share no state and the function stays safe to
//! call from several threads at once.

use crate::{day_index, reference_date, TideDay, TideError};
use chrono::{Duration, NaiveTime};
use log::debug;
use std::fmt;

/// A located extremum and its signed temporal offset from the query time.
///
/// `hw_diff` is `given_time - high_water_time`: positive when the query time
/// lies after the high water ("HW+n"), negative before it ("HW-n").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TidePosition {
    pub time: NaiveTime,
    /// 1-based day number in the queried table.
    pub day_number: usize,
    /// 1-based tide number within that day.
    pub tide_number: usize,
    pub hw_diff: Duration,
}

impl TidePosition {
    /// Human-readable tide-hour label: `"HW"`, `"HW+2"`, `"HW-3"`.
    ///
    /// Rounds past the 30-minute mark, with floor-division semantics on the
    /// negative side (`-1h30m` reads as `HW-2`, `+1h30m` as `HW+1`), the
    /// convention used by printed tide tables this mirrors.
    pub fn hw_label(&self) -> String {
        let total_seconds = self.hw_diff.num_seconds();
        let mut hours = total_seconds.div_euclid(3600);
        let minutes = total_seconds.rem_euclid(3600) / 60;
        if minutes > 30 {
            hours += 1;
        }
        match hours {
            0 => "HW".to_string(),
            h if h > 0 => format!("HW+{h}"),
            h => format!("HW{h}"),
        }
    }
}

impl fmt::Display for TidePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closest HW is at {}, tide hour {}, tide number: {}",
            self.time.format("%H%M"),
            self.hw_label(),
            self.tide_number
        )
    }
}

/// Find the high water nearest to `given_time`, searching the anchor day,
/// the day before and the day after.
///
/// The anchor day is scanned in chronological order, the previous day in
/// reverse, the next day in order; with the strict minimum comparison below
/// this makes the *first* candidate at a given distance win, so an
/// equidistant pair resolves toward the anchor day.
///
/// # Errors
/// - [`TideError::InvalidArgument`] when `day_number` is out of range.
/// - [`TideError::NotFound`] when no high water exists in the 3-day window,
///   even if the table holds high waters further away.
pub fn find_closest_high_water(
    tide_days: &[TideDay],
    day_number: usize,
    given_time: NaiveTime,
) -> Result<TidePosition, TideError> {
    let anchor_idx = day_index(tide_days, day_number)? as i64;
    let given_instant = reference_date().and_time(given_time);

    let mut best: Option<(TidePosition, Duration)> = None;

    for day_step in [0i64, -1, 1] {
        let day_idx = anchor_idx + day_step;
        if day_idx < 0 || day_idx as usize >= tide_days.len() {
            continue;
        }
        let day = &tide_days[day_idx as usize];

        // Previous day in reverse chronological order; only the tie-break
        // above depends on this.
        let indices: Vec<usize> = if day_step < 0 {
            (0..day.heights.len()).rev().collect()
        } else {
            (0..day.heights.len()).collect()
        };

        for tide_idx in indices {
            let tide = &day.heights[tide_idx];
            if !tide.is_high_water() {
                continue;
            }
            let candidate_instant =
                (reference_date() + Duration::days(day_step)).and_time(tide.time);
            let hw_diff = given_instant - candidate_instant;
            let distance = hw_diff.abs();
            debug!(
                "closest-HW candidate {} (day step {day_step}), distance {}m",
                tide.time,
                distance.num_minutes()
            );

            let closer = match &best {
                Some((_, best_distance)) => distance < *best_distance,
                None => true,
            };
            if closer {
                best = Some((
                    TidePosition {
                        time: tide.time,
                        day_number: day_idx as usize + 1,
                        tide_number: tide_idx + 1,
                        hw_diff,
                    },
                    distance,
                ));
            }
        }
    }

    best.map(|(position, _)| position)
        .ok_or(TideError::NotFound("no high water in the three-day window"))
}
