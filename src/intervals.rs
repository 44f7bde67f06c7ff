//! # Water-Height Interval Queries
//!
//! Answers "during which window is the tide at least H meters" for the
//! half-cycle pair around one high water: resolve the governing high water,
//! find the low waters flanking it, solve the rising crossing before it and
//! the falling crossing after it, and return the single bracketing interval.
//!
//! At the edges of the table a missing flanking extremum is synthesized at a
//! typical semidiurnal spacing (`6h20m`) from the high water, copying every
//! field but the time from the surviving neighbor. Synthesized edges are
//! approximations, not measurements, and are tagged
//! [`Provenance::Synthesized`](crate::Provenance::Synthesized) so callers
//! can tell.

use crate::adjacent::{find_next_tide, find_previous_tide};
use crate::solver::solve_crossing_time;
use crate::{event_indices, reference_date, Provenance, TideDay, TideError, TideExtremum};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

/// Spacing used when fabricating an edge neighbor: a typical semidiurnal
/// half-cycle of 6h20m.
pub fn typical_tide_gap() -> Duration {
    Duration::hours(6) + Duration::minutes(20)
}

/// One endpoint of a height interval: a day number (1-based, matching the
/// queried table, and possibly outside it when the interval leaves the data)
/// and a time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalBound {
    pub day_number: usize,
    pub time: NaiveTime,
    /// Provenance of the extremum this edge was solved against:
    /// `Synthesized` marks an approximated edge at the boundary of the data.
    pub provenance: Provenance,
}

/// A single bracketing time window during which the tide is on the
/// high-water side of the queried height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TideInterval {
    pub start: IntervalBound,
    pub end: IntervalBound,
}

impl TideInterval {
    /// Resolve both bounds against the calendar date of day 1 of the table.
    pub fn resolve(&self, initial_date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let at = |bound: &IntervalBound| {
            (initial_date + Duration::days(bound.day_number as i64 - 1)).and_time(bound.time)
        };
        (at(&self.start), at(&self.end))
    }
}

/// Resolved governing high water: the extremum (cloned, cheap: curve is an
/// `Arc`) and its 1-based position.
struct GoverningHighWater {
    extremum: TideExtremum,
    day_number: usize,
    tide_number: usize,
}

/// The queried entry itself when it is a high water, otherwise the first
/// high water after it.
fn resolve_high_water(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
) -> Result<GoverningHighWater, TideError> {
    let (day_idx, tide_idx) = event_indices(tide_days, day_number, tide_number)?;
    let specified = &tide_days[day_idx].heights[tide_idx];
    if specified.is_high_water() {
        return Ok(GoverningHighWater {
            extremum: specified.clone(),
            day_number,
            tide_number,
        });
    }

    let (mut day, mut tide) = (day_number, tide_number);
    loop {
        match find_next_tide(tide_days, day, tide)? {
            Some(neighbor) if neighbor.extremum.is_high_water() => {
                return Ok(GoverningHighWater {
                    extremum: neighbor.extremum.clone(),
                    day_number: neighbor.day_number,
                    tide_number: neighbor.tide_number,
                });
            }
            // Malformed alternation; keep walking forward.
            Some(neighbor) => (day, tide) = (neighbor.day_number, neighbor.tide_number),
            None => return Err(TideError::NotFound("no high water at or after the position")),
        }
    }
}

/// Fabricate the missing neighbor one typical half-cycle away from the high
/// water, copying everything but the time from the surviving neighbor.
fn synthesize_neighbor(
    template: &TideExtremum,
    hw: &GoverningHighWater,
    direction: i64,
) -> (TideExtremum, usize) {
    let hw_instant = reference_date().and_time(hw.extremum.time);
    let synthesized_instant = hw_instant + typical_tide_gap() * direction as i32;
    let day_offset = (synthesized_instant.date() - reference_date()).num_days();
    let day_number = (hw.day_number as i64 + day_offset) as usize;
    debug!(
        "synthesized {} neighbor at {} (day {})",
        if direction < 0 { "previous" } else { "next" },
        synthesized_instant.time(),
        day_number
    );
    (
        TideExtremum {
            time: synthesized_instant.time(),
            height: template.height,
            tide_type: template.tide_type,
            neap_level: template.neap_level,
            curve: template.curve.clone(),
            provenance: Provenance::Synthesized,
        },
        day_number,
    )
}

/// Determine the single time window around the governing high water during
/// which the tide is at or above `height_to_find`.
///
/// The queried `(day_number, tide_number)` may point at any extremum; a low
/// water resolves to the next high water. Day numbers in the result follow
/// the resolved bracket and may differ from the queried day when the window
/// spans midnight or leaves the table.
///
/// # Errors
/// - [`TideError::InvalidArgument`] for out-of-range indices.
/// - [`TideError::NotFound`] when no high water is resolvable, or when the
///   high water has no neighbor on either side (a single-entry table offers
///   nothing to pad from).
pub fn determine_water_height_intervals(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
    height_to_find: f64,
) -> Result<Vec<TideInterval>, TideError> {
    let hw = resolve_high_water(tide_days, day_number, tide_number)?;

    let previous = find_previous_tide(tide_days, hw.day_number, hw.tide_number)?;
    let next = find_next_tide(tide_days, hw.day_number, hw.tide_number)?;

    let previous = previous.map(|n| (n.extremum.clone(), n.day_number));
    let next = next.map(|n| (n.extremum.clone(), n.day_number));

    // A missing side is padded from the surviving one; both missing means a
    // single-entry table with nothing to pad from.
    let ((prev_extremum, prev_day), (next_extremum, next_day)) = match (previous, next) {
        (None, None) => {
            return Err(TideError::NotFound("no neighboring tide on either side"));
        }
        (Some(previous), Some(next)) => (previous, next),
        (Some(previous), None) => {
            let next = synthesize_neighbor(&previous.0, &hw, 1);
            (previous, next)
        }
        (None, Some(next)) => {
            let previous = synthesize_neighbor(&next.0, &hw, -1);
            (previous, next)
        }
    };

    let rising = solve_crossing_time(
        height_to_find,
        &prev_extremum,
        prev_day,
        &hw.extremum,
        hw.day_number,
        false,
    )?;
    let falling = solve_crossing_time(
        height_to_find,
        &hw.extremum,
        hw.day_number,
        &next_extremum,
        next_day,
        true,
    )?;

    Ok(vec![TideInterval {
        start: IntervalBound {
            day_number: rising.day_number,
            time: rising.time,
            provenance: prev_extremum.provenance,
        },
        end: IntervalBound {
            day_number: falling.day_number,
            time: falling.time,
            provenance: next_extremum.provenance,
        },
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::semidiurnal_curve;
    use crate::test_support::{d, interval_table, t};

    fn single_interval(
        days: &[TideDay],
        day_number: usize,
        tide_number: usize,
        height: f64,
    ) -> TideInterval {
        let intervals =
            determine_water_height_intervals(days, day_number, tide_number, height).unwrap();
        assert_eq!(intervals.len(), 1);
        intervals[0]
    }

    #[test]
    fn interval_around_a_midday_high_water() {
        let days = interval_table();
        let interval = single_interval(&days, 2, 1, 4.3);
        assert_eq!(
            interval.start,
            IntervalBound {
                day_number: 2,
                time: t(7, 28),
                provenance: Provenance::Observed,
            }
        );
        assert_eq!(
            interval.end,
            IntervalBound {
                day_number: 2,
                time: t(14, 51),
                provenance: Provenance::Observed,
            }
        );
    }

    #[test]
    fn querying_the_high_water_itself_gives_the_same_window() {
        let days = interval_table();
        assert_eq!(
            single_interval(&days, 2, 2, 4.3),
            single_interval(&days, 2, 1, 4.3)
        );
    }

    #[test]
    fn interval_spans_midnight_into_the_next_day() {
        let days = interval_table();
        let interval = single_interval(&days, 1, 3, 4.3);
        assert_eq!(
            interval.start,
            IntervalBound {
                day_number: 1,
                time: t(18, 58),
                provenance: Provenance::Observed,
            }
        );
        assert_eq!(
            interval.end,
            IntervalBound {
                day_number: 2,
                time: t(2, 15),
                provenance: Provenance::Observed,
            }
        );
    }

    #[test]
    fn end_of_data_synthesizes_the_next_low_water() {
        let days = interval_table();
        // Day 2 tide 3 resolves to the last high water (23:50); no next
        // extremum exists, so the falling edge runs against a synthesized
        // neighbor at HW + 6h20m = 06:10 on day 3.
        let interval = single_interval(&days, 2, 3, 4.3);
        assert_eq!(
            interval.start,
            IntervalBound {
                day_number: 2,
                time: t(20, 8),
                provenance: Provenance::Observed,
            }
        );
        assert_eq!(
            interval.end,
            IntervalBound {
                day_number: 3,
                time: t(3, 31),
                provenance: Provenance::Synthesized,
            }
        );
        // Bounded by the fabricated neighbor.
        assert!(interval.end.time < t(6, 10));
    }

    #[test]
    fn start_of_data_synthesizes_the_previous_low_water() {
        let curve = semidiurnal_curve(2.0, 5.0, 3.82);
        let days = vec![TideDay::new(
            d(1),
            vec![
                TideExtremum::high_water(t(3, 10), 6.4, 3.82, curve),
                TideExtremum::low_water(t(9, 30), 2.6),
            ],
        )];
        let interval = single_interval(&days, 1, 1, 4.3);
        // Rising edge solved against a neighbor fabricated at 20:50 the day
        // before the table starts, hence day number 0.
        assert_eq!(
            interval.start,
            IntervalBound {
                day_number: 0,
                time: t(23, 28),
                provenance: Provenance::Synthesized,
            }
        );
        assert_eq!(
            interval.end,
            IntervalBound {
                day_number: 1,
                time: t(6, 51),
                provenance: Provenance::Observed,
            }
        );
    }

    #[test]
    fn no_high_water_anywhere_is_not_found() {
        let days = vec![TideDay::new(
            d(1),
            vec![
                TideExtremum::low_water(t(4, 0), 2.6),
                TideExtremum::low_water(t(10, 0), 2.7),
            ],
        )];
        assert!(matches!(
            determine_water_height_intervals(&days, 1, 1, 4.3),
            Err(TideError::NotFound(_))
        ));
    }

    #[test]
    fn single_entry_table_cannot_be_padded() {
        let curve = semidiurnal_curve(2.0, 5.0, 3.82);
        let days = vec![TideDay::new(
            d(1),
            vec![TideExtremum::high_water(t(10, 0), 6.4, 3.82, curve)],
        )];
        assert_eq!(
            determine_water_height_intervals(&days, 1, 1, 4.3),
            Err(TideError::NotFound("no neighboring tide on either side"))
        );
    }

    #[test]
    fn out_of_range_query_is_rejected_before_searching() {
        let days = interval_table();
        assert!(matches!(
            determine_water_height_intervals(&days, 3, 1, 4.3),
            Err(TideError::InvalidArgument(_))
        ));
        assert!(matches!(
            determine_water_height_intervals(&days, 1, 7, 4.3),
            Err(TideError::InvalidArgument(_))
        ));
    }

    #[test]
    fn resolve_maps_day_numbers_onto_calendar_dates() {
        let interval = TideInterval {
            start: IntervalBound {
                day_number: 1,
                time: t(18, 58),
                provenance: Provenance::Observed,
            },
            end: IntervalBound {
                day_number: 2,
                time: t(2, 15),
                provenance: Provenance::Observed,
            },
        };
        let (start, end) = interval.resolve(d(1));
        assert_eq!(start, d(1).and_time(t(18, 58)));
        assert_eq!(end, d(2).and_time(t(2, 15)));
    }
}
