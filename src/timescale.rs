//! # Clock-Time and Tide-Hour Conversions
//!
//! Pure scalar conversions shared by the finders and the solver.
//!
//! The "tide hour" scale normalizes one half-cycle of a semidiurnal tide to
//! `[0, 12]`: `0` is the low water entering the cycle, `6` the high-water
//! instant, `12` the low water leaving it. Height curves
//! ([`crate::HeightCurve`]) are defined on this scale, so converting a clock
//! offset from high water into a tide hour is what lets a query evaluate
//! "how high is the water right now".

use chrono::{Duration, NaiveTime, Timelike};

/// Convert a time of day to fractional hours in `[0, 24)`.
///
/// Seconds are ignored; tide tables carry minute precision only.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use tide_almanac_lib::time_to_float;
///
/// let t = NaiveTime::from_hms_opt(18, 45, 0).unwrap();
/// assert_eq!(time_to_float(t), 18.75);
/// ```
pub fn time_to_float(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

/// Map a signed offset from a high water onto the 12-based tide-hour scale.
///
/// An offset of zero lands on `6` (the HW instant); `-6h` and `+6h` land on
/// the flanking low waters at `0` and `12`.
///
/// The wrap-around corrections are asymmetric on purpose: a result below `0`
/// gets `+6`, a result above `12` gets `-12`. For offsets within one
/// half-cycle of HW (the only offsets the query layer produces) the output
/// stays in `[0, 12]`; offsets beyond roughly ±6h can leave the scale, and
/// the tests pin that behavior rather than hide it.
pub fn tide_hour_from_offset(offset: Duration) -> f64 {
    let mut hours = offset.num_seconds() as f64 / 3600.0 + 6.0;
    if hours < 0.0 {
        hours += 6.0;
    }
    if hours > 12.0 {
        hours -= 12.0;
    }
    hours
}
