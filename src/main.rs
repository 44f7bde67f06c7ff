//! # Tide Almanac Demo Entry Point
//!
//! Builds a small two-day tide table, samples a plausible query time inside
//! it, and walks the query surface: closest high water, current height via
//! the tide-hour scale, and the "tide at least H meters" interval.
//! Table parameters and the query come from `tide-almanac.toml` when
//! present; see [`tide_almanac_lib::config`]. The library's `log` traces
//! (candidate distances, bisection steps) surface on stderr under
//! `RUST_LOG=debug`.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use std::io;
use tide_almanac_lib::config::{Config, TableConfig};
use tide_almanac_lib::model::semidiurnal_curve;
use tide_almanac_lib::{
    determine_water_height_intervals, find_closest_high_water, sample_time_between,
    tide_hour_from_offset, TideDay, TideExtremum,
};

/// Two days of alternating extrema at a typical 6h10m-6h20m spacing, heights
/// taken from the configured model.
fn demo_table(table: &TableConfig, first_date: NaiveDate) -> Vec<TideDay> {
    let curve = semidiurnal_curve(
        table.min_water_factor,
        table.max_water_factor,
        table.neap_factor,
    );
    let low = curve(0.0);
    let high = curve(6.0);
    let t = |hour: u32, minute: u32| {
        chrono::NaiveTime::from_hms_opt(hour, minute, 0).expect("valid demo time")
    };

    vec![
        TideDay::new(
            first_date,
            vec![
                TideExtremum::low_water(t(3, 40), low),
                TideExtremum::high_water(t(10, 0), high, table.neap_factor, curve.clone()),
                TideExtremum::low_water(t(16, 20), low),
                TideExtremum::high_water(t(22, 40), high, table.neap_factor, curve.clone()),
            ],
        ),
        TideDay::new(
            first_date + Duration::days(1),
            vec![
                TideExtremum::low_water(t(4, 50), low),
                TideExtremum::high_water(t(11, 10), high, table.neap_factor, curve.clone()),
                TideExtremum::low_water(t(17, 30), low),
                TideExtremum::high_water(t(23, 50), high, table.neap_factor, curve),
            ],
        ),
    ]
}

fn main() -> Result<()> {
    // The subscriber's log bridge picks up the library's `log` records.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load();
    let first_date = Local::now().date_naive();
    let tide_days = demo_table(&config.table, first_date);

    println!("Tide table starting {}", first_date.format("%B %d"));
    for day in &tide_days {
        for tide in &day.heights {
            println!(
                "  {} {} {} {:.1} m",
                day.date.format("%Y-%m-%d"),
                tide.time.format("%H%M"),
                tide.tide_type,
                tide.height
            );
        }
    }
    println!();

    let query = &config.query;
    let mut rng = rand::thread_rng();
    let given_time = sample_time_between(&tide_days, query.day_number, query.tide_number, &mut rng)?;

    let closest = find_closest_high_water(&tide_days, query.day_number, given_time)?;
    let high_water = &tide_days[closest.day_number - 1].heights[closest.tide_number - 1];
    let tide_hour = tide_hour_from_offset(closest.hw_diff);
    if let Some(height) = high_water.height_at(tide_hour) {
        println!(
            "At {}, tide height is {:.1} m, 12-based tide hour {:.1}",
            given_time.format("%H%M"),
            height,
            tide_hour
        );
    }
    println!("{closest}");
    println!();

    let intervals = determine_water_height_intervals(
        &tide_days,
        query.day_number,
        query.tide_number,
        query.height_to_find,
    )?;
    println!(
        "Intervals during which tide is at least {:.1} m:",
        query.height_to_find
    );
    for interval in &intervals {
        let (start, end) = interval.resolve(first_date);
        println!("  [{start} - {end}]");
    }

    Ok(())
}
