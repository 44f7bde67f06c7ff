//! # Tide Almanac Core Library
//!
//! This library answers time/height queries against a precomputed sequence of
//! tide events (high/low water extrema per day). It is the query/solver layer
//! only: the generator that builds the tide-day sequence and the plotting
//! front end are external collaborators that own the data and the output.
//!
//! ## Query surface
//!
//! - [`find_closest_high_water`]: locate the high water nearest to an
//!   arbitrary clock time, tolerant of day-boundary wraparound.
//! - [`adjacent::find_previous_tide`] / [`adjacent::find_next_tide`]: walk to
//!   the neighboring extremum of either kind, across day boundaries.
//! - [`determine_water_height_intervals`]: solve "during which window is the
//!   tide at least H meters" into a single bracketing [`TideInterval`].
//! - [`sample_time_between`]: a demo/test utility producing a uniformly
//!   random time between two consecutive events.
//!
//! ## Data flow
//!
//! The generator produces an ordered `&[TideDay]` once; every query here
//! borrows it read-only and returns small owned results ([`TidePosition`],
//! [`TideInterval`]). Nothing in this crate mutates a tide table, so
//! concurrent read-only use from multiple threads is safe.
//!
//! ## Conventions
//!
//! - Day numbers and tide numbers are 1-based at every public entry point,
//!   matching the printed tide-table convention. Out-of-range indices are
//!   rejected with [`TideError::InvalidArgument`] before any search begins.
//! - Times are naive local times of day; dates only matter as relative day
//!   offsets. No timezone handling.
//! - "Tide hour" is a normalized `[0, 12]` position within one half-cycle,
//!   with `6` at the high-water instant and `0`/`12` at the flanking low
//!   waters. See [`timescale`].

use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub mod adjacent;
pub mod closest_hw;
pub mod config;
pub mod intervals;
pub mod model;
pub mod sampler;
pub mod solver;
pub mod timescale;

pub use closest_hw::{find_closest_high_water, TidePosition};
pub use intervals::{determine_water_height_intervals, IntervalBound, TideInterval};
pub use sampler::sample_time_between;
pub use timescale::{tide_hour_from_offset, time_to_float};

/// Continuous height model for one half-cycle, anchored at a high water.
///
/// The function maps a tide hour in `[0, 12]` to a water height in meters,
/// with `6` the high-water instant. Curves are shared, not copied: cloning an
/// extremum (or synthesizing an edge neighbor from one) clones the `Arc`.
pub type HeightCurve = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Errors surfaced by the query layer.
///
/// Two kinds suffice for a pure computation layer: either the requested
/// search scope holds no qualifying event, or the caller's input was
/// malformed. There are no transient failures and no retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TideError {
    /// No qualifying extremum exists in the required search scope.
    #[error("no qualifying tide found: {0}")]
    NotFound(&'static str),

    /// Out-of-range day/tide index, or structurally unusable input data.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// The two extremum kinds of a semidiurnal tide cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TideType {
    HighWater,
    LowWater,
}

impl fmt::Display for TideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TideType::HighWater => write!(f, "HW"),
            TideType::LowWater => write!(f, "LW"),
        }
    }
}

/// Whether an extremum is backed by table data or fabricated at the edge of
/// the data to pad an interval query.
///
/// The interval calculator synthesizes a neighbor at `HW ± 6h20m` when the
/// table runs out; consumers can tell an approximated interval edge from a
/// data-backed one by inspecting this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    Observed,
    Synthesized,
}

/// A single recorded high- or low-water event.
///
/// Owned by the (external) generator; the query layer only ever borrows
/// these. `curve` is the continuous half-cycle model anchored at this event
/// and is meaningfully present on high waters only, which is all the solver
/// evaluates.
#[derive(Clone)]
pub struct TideExtremum {
    /// Local time of day of the extremum.
    pub time: NaiveTime,
    /// Water height in meters at the extremum.
    pub height: f64,
    pub tide_type: TideType,
    /// Position in the spring-neap cycle the generator assigned to this
    /// event's day.
    pub neap_level: f64,
    /// Half-cycle height model, `None` on entries that never anchor one.
    pub curve: Option<HeightCurve>,
    pub provenance: Provenance,
}

impl TideExtremum {
    /// High-water entry carrying its half-cycle curve.
    pub fn high_water(time: NaiveTime, height: f64, neap_level: f64, curve: HeightCurve) -> Self {
        TideExtremum {
            time,
            height,
            tide_type: TideType::HighWater,
            neap_level,
            curve: Some(curve),
            provenance: Provenance::Observed,
        }
    }

    /// Low-water entry; carries no curve of its own.
    pub fn low_water(time: NaiveTime, height: f64) -> Self {
        TideExtremum {
            time,
            height,
            tide_type: TideType::LowWater,
            neap_level: 0.0,
            curve: None,
            provenance: Provenance::Observed,
        }
    }

    /// Evaluate this event's curve at a tide hour, if it has one.
    pub fn height_at(&self, tide_hour: f64) -> Option<f64> {
        self.curve.as_ref().map(|curve| curve(tide_hour))
    }

    pub fn is_high_water(&self) -> bool {
        self.tide_type == TideType::HighWater
    }
}

impl fmt::Debug for TideExtremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TideExtremum")
            .field("time", &self.time)
            .field("height", &self.height)
            .field("tide_type", &self.tide_type)
            .field("neap_level", &self.neap_level)
            .field("curve", &self.curve.as_ref().map(|_| "<fn>"))
            .field("provenance", &self.provenance)
            .finish()
    }
}

/// One calendar day of tide events, ordered by time.
///
/// Within a day consecutive entries strictly alternate HW/LW in increasing
/// time order; across the whole table consecutive events sit roughly
/// 6h10m-6h30m apart. The generator guarantees this; the query layer relies
/// on it but degrades to "not found" rather than panicking when it does not
/// hold.
#[derive(Clone, Debug)]
pub struct TideDay {
    pub date: NaiveDate,
    pub heights: Vec<TideExtremum>,
}

impl TideDay {
    pub fn new(date: NaiveDate, heights: Vec<TideExtremum>) -> Self {
        TideDay { date, heights }
    }
}

/// Fixed anchor date used whenever a time of day has to be promoted to a
/// full instant for duration arithmetic. Only day *offsets* from this date
/// ever matter, so any date with valid neighbors on both sides works; a
/// constant keeps every query a pure function of its inputs.
pub(crate) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 6, 15).expect("static reference date is valid")
}

/// Check a 1-based day number against the table, returning the 0-based index.
pub(crate) fn day_index(tide_days: &[TideDay], day_number: usize) -> Result<usize, TideError> {
    if day_number == 0 || day_number > tide_days.len() {
        return Err(TideError::InvalidArgument(format!(
            "day number {} out of range 1..={}",
            day_number,
            tide_days.len()
        )));
    }
    Ok(day_number - 1)
}

/// Check a 1-based `(day_number, tide_number)` pair, returning 0-based
/// `(day_index, tide_index)`.
pub(crate) fn event_indices(
    tide_days: &[TideDay],
    day_number: usize,
    tide_number: usize,
) -> Result<(usize, usize), TideError> {
    let day_idx = day_index(tide_days, day_number)?;
    let day = &tide_days[day_idx];
    if tide_number == 0 || tide_number > day.heights.len() {
        return Err(TideError::InvalidArgument(format!(
            "tide number {} out of range 1..={} for day {}",
            tide_number,
            day.heights.len(),
            day_number
        )));
    }
    Ok((day_idx, tide_number - 1))
}
