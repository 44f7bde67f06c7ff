//! # Height-to-Time Bisection Solver
//!
//! Computes the wall-clock instant at which the tide crosses a target height
//! between two temporally adjacent extrema (one high water, one low water).
//!
//! The bracket is carried in two domains updated in lock-step: a
//! calendar-time bracket built from the extremum times (with the end date
//! shifted by the day-number delta, so midnight-spanning half-cycles work)
//! and a tide-hour bracket with the high-water endpoint pinned at `6` and
//! the low-water endpoint at `0`. Each bisection step halves both at once;
//! heights are always evaluated on the high-water anchor's curve at the
//! tide-hour midpoint.
//!
//! Convergence is driven by the calendar bracket shrinking below one minute.
//! When the target height is not actually attainable in the half-cycle the
//! bracket still shrinks and the loop terminates, but the answer degrades to
//! a boundary-adjacent time; callers wanting a physical crossing must check
//! attainability themselves. A hard iteration cap backstops the loop either
//! way.

use crate::{reference_date, TideError, TideExtremum};
use chrono::{Duration, NaiveTime, Timelike};
use log::debug;

/// Upper bound on bisection steps. A month-long bracket converges in under
/// 16 halvings; 48 leaves a wide margin without risking a spin.
const MAX_BISECTION_STEPS: u32 = 48;

/// A solved height crossing: the resolved day number (relative to the same
/// 1-based numbering as the inputs, advanced when the bracket crossed
/// midnight) and the minute-truncated time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub day_number: usize,
    pub time: NaiveTime,
}

/// Find the instant between `first` and `second` at which the curve anchored
/// at the high-water endpoint crosses `height_to_find`.
///
/// `hw_is_first` says which endpoint is the high water: `false` solves the
/// rising half-cycle (LW then HW, tide hours `0 → 6`), `true` the falling
/// one (HW then LW, tide hours `6 → 0`). Day numbers only matter as a
/// relative offset between the two endpoints.
///
/// The result is truncated to minute precision; the calendar bracket, not
/// the tide-hour bracket, is authoritative.
///
/// # Errors
/// [`TideError::InvalidArgument`] when the high-water endpoint carries no
/// height curve.
pub fn solve_crossing_time(
    height_to_find: f64,
    first: &TideExtremum,
    first_day_number: usize,
    second: &TideExtremum,
    second_day_number: usize,
    hw_is_first: bool,
) -> Result<Crossing, TideError> {
    let high_water = if hw_is_first { first } else { second };
    let curve = high_water.curve.as_ref().ok_or_else(|| {
        TideError::InvalidArgument(format!(
            "high water at {} carries no height curve",
            high_water.time
        ))
    })?;

    let start_date = reference_date();
    let day_span = second_day_number as i64 - first_day_number as i64;
    let mut start_time = start_date.and_time(first.time);
    let mut end_time = (start_date + Duration::days(day_span)).and_time(second.time);

    let (mut start_hour, mut end_hour) = if hw_is_first { (6.0, 0.0) } else { (0.0, 6.0) };
    let start_height = curve(start_hour);
    let end_height = curve(end_hour);
    debug!(
        "bisecting for {height_to_find}m in [{start_time} .. {end_time}], \
         heights [{start_height:.2} .. {end_height:.2}]"
    );

    let mut steps = 0;
    while end_time - start_time > Duration::minutes(1) && steps < MAX_BISECTION_STEPS {
        let mid_time = start_time + (end_time - start_time) / 2;
        let mid_hour = start_hour + (end_hour - start_hour) / 2.0;
        let mid_height = curve(mid_hour);

        // Keep the half that still brackets the target, tracking the curve
        // direction: on a rising curve a midpoint below the target moves the
        // start up; on a falling curve a midpoint above the target does.
        if (mid_height < height_to_find && start_height < end_height)
            || (mid_height > height_to_find && start_height > end_height)
        {
            start_time = mid_time;
            start_hour = mid_hour;
        } else {
            end_time = mid_time;
            end_hour = mid_hour;
        }
        steps += 1;
    }
    debug!("bisection converged to {start_time} after {steps} steps");

    let day_number =
        (first_day_number as i64 + (start_time.date() - start_date).num_days()) as usize;
    let time = NaiveTime::from_hms_opt(start_time.time().hour(), start_time.time().minute(), 0)
        .expect("truncating an existing time stays valid");

    Ok(Crossing { day_number, time })
}
