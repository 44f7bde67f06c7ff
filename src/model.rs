//! # Semidiurnal Height-Curve Model
//!
//! The query layer consumes height curves purely through the
//! [`HeightCurve`](crate::HeightCurve) contract (`height = f(tide_hour)` on
//! `[0, 12]`); this module provides the concrete constructor the generator,
//! the demo binary and the test fixtures share.
//!
//! The shape is a raised cosine over one half-cycle: water sits at the
//! low-water level at tide hours `0` and `12`, crests at hour `6`, and the
//! whole curve is scaled by the day's position in the spring-neap cycle.
//! Real tides are not this symmetric, but the model has the right period and
//! range, which is all the solver needs.

use crate::HeightCurve;
use std::f64::consts::PI;
use std::sync::Arc;

/// Build the half-cycle curve for a day with the given water-level factors.
///
/// `min_water_factor` and `max_water_factor` set the unscaled low- and
/// high-water levels in meters; `neap_factor` is the day's spring-neap level
/// and lifts the whole curve by `neap_factor / 10` as a fraction.
///
/// The returned curve is cheap to clone and safe to share across threads.
pub fn semidiurnal_curve(
    min_water_factor: f64,
    max_water_factor: f64,
    neap_factor: f64,
) -> HeightCurve {
    Arc::new(move |tide_hour: f64| {
        // 0 at the flanking low waters, 1 at the high-water crest.
        let swell = (1.0 - (PI * tide_hour / 6.0).cos()) / 2.0;
        let neap_scale = 1.0 + neap_factor / 10.0;
        neap_scale * (min_water_factor + (max_water_factor - min_water_factor) * swell)
    })
}
