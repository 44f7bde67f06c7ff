//! # Adjacent-Extremum Search
//!
//! Linear scans for the nearest extremum strictly before or after a given
//! 1-based `(day_number, tide_number)` position, wrapping to the previous
//! day's last entry (or the next day's first) at day boundaries.
//!
//! Running off either end of the table is an expected, non-exceptional
//! outcome: it signals "no more data in this direction" and is returned as
//! `None`. The interval calculator consumes that to decide when to
//! synthesize an edge neighbor instead.

use crate::{event_indices, TideDay, TideError, TideExtremum};

/// An extremum located by a neighbor scan, with its resolved 1-based
/// position in the table.
#[derive(Debug)]
pub struct TideNeighbor<'a> {
    pub extremum: &'a TideExtremum,
    pub day_number: usize,
    pub tide_number: usize,
}

/// Find the extremum immediately before `(day_number, tide_number)`.
///
/// Returns `Ok(None)` when the position is the first event of the table.
/// Out-of-range indices are rejected with
/// [`TideError::InvalidArgument`](crate::TideError::InvalidArgument).
pub fn find_previous_tide(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
) -> Result<Option<TideNeighbor<'_>>, TideError> {
    let (start_day, start_tide) = event_indices(tide_days, day_number, tide_number)?;

    for day_idx in (0..=start_day).rev() {
        let day = &tide_days[day_idx];
        // Strictly before the anchor on its own day; whole day otherwise.
        let upper = if day_idx == start_day {
            start_tide
        } else {
            day.heights.len()
        };
        if upper > 0 {
            let tide_idx = upper - 1;
            return Ok(Some(TideNeighbor {
                extremum: &day.heights[tide_idx],
                day_number: day_idx + 1,
                tide_number: tide_idx + 1,
            }));
        }
    }

    Ok(None)
}

/// Find the extremum immediately after `(day_number, tide_number)`.
///
/// Returns `Ok(None)` when the position is the last event of the table.
pub fn find_next_tide(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
) -> Result<Option<TideNeighbor<'_>>, TideError> {
    let (start_day, start_tide) = event_indices(tide_days, day_number, tide_number)?;

    for (day_idx, day) in tide_days.iter().enumerate().skip(start_day) {
        // Strictly after the anchor on its own day; whole day otherwise.
        let lower = if day_idx == start_day { start_tide + 1 } else { 0 };
        if let Some(extremum) = day.heights.get(lower) {
            return Ok(Some(TideNeighbor {
                extremum,
                day_number: day_idx + 1,
                tide_number: lower + 1,
            }));
        }
    }

    Ok(None)
}
