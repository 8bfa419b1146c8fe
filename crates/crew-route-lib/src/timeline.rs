//! Timeline projection: arrival and departure clock times for every stop

use crate::{Result, RouteError, RouteMetrics, Stop, route_metrics};
use chrono::{NaiveTime, Timelike};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: i64 = 86_400_000;

/// A stop enriched with its projected arrival and departure
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoutePoint {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub stop: Stop,
    /// Arrival formatted as `H:MM AM/PM`
    pub arrival_time: String,
    /// Departure formatted as `H:MM AM/PM`
    pub departure_time: String,
    /// Arrival in milliseconds since midnight of the start day (not wrapped)
    pub arrival_ms: i64,
    /// Departure in milliseconds since midnight of the start day (not wrapped)
    pub departure_ms: i64,
}

/// Parse a 24-hour `HH:MM` start time
pub fn parse_start_time(start_time: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(start_time.trim(), "%H:%M")
        .map_err(|_| RouteError::InvalidStartTime(start_time.to_string()))
}

/// Format milliseconds since midnight as a 12-hour clock string (`8:05 AM`)
///
/// Values past midnight wrap around like a wall clock; seconds are truncated.
pub fn format_clock(ms: i64) -> String {
    let seconds = ms.rem_euclid(MS_PER_DAY) / 1000;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0)
        .unwrap_or_default()
        .format("%-I:%M %p")
        .to_string()
}

/// Project arrival/departure times for `stops`, starting at `start_time`
///
/// Every gap between consecutive stops is the same: the total drive time divided by
/// `max(stops - 1, 1)`. Metrics are computed without a start location when not supplied.
pub fn route_timeline(
    stops: &[Stop],
    start_time: &str,
    metrics: Option<&RouteMetrics>,
) -> Result<Vec<RoutePoint>> {
    #[cfg(feature = "profiling")]
    profiling::scope!("timeline::route_timeline");

    if stops.is_empty() {
        return Ok(Vec::new());
    }

    let start = parse_start_time(start_time)?;
    let computed;
    let metrics = match metrics {
        Some(metrics) => metrics,
        None => {
            computed = route_metrics(stops, None);
            &computed
        }
    };

    let gaps = stops.len().saturating_sub(1).max(1) as f64;
    let travel_ms = to_ms(f64::from(metrics.drive_time) / gaps * MS_PER_MINUTE);

    let mut clock = i64::from(start.num_seconds_from_midnight()) * 1000;
    let points = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            if i > 0 {
                clock = clock.saturating_add(travel_ms);
            }
            let arrival_ms = clock;
            clock = clock.saturating_add(to_ms(stop.estimated_hours * MS_PER_HOUR));
            RoutePoint {
                stop: stop.clone(),
                arrival_time: format_clock(arrival_ms),
                departure_time: format_clock(clock),
                arrival_ms,
                departure_ms: clock,
            }
        })
        .collect();

    Ok(points)
}

// NaN saturates to 0 and infinities to the i64 bounds
#[inline]
fn to_ms(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_stop(id: &str, lat: f64, lng: f64, hours: f64) -> Stop {
        Stop::new(id, "1 Test Way", lat, lng, hours)
    }

    #[test]
    fn test_empty_stops() {
        assert!(route_timeline(&[], "08:00", None).unwrap().is_empty());
        // The start time is not even looked at
        assert!(route_timeline(&[], "garbage", None).unwrap().is_empty());
    }

    #[test]
    fn test_two_stop_scenario() {
        let stops = vec![
            create_test_stop("a", 34.0, -118.0, 2.0),
            create_test_stop("b", 34.01, -118.0, 1.0),
        ];
        let timeline = route_timeline(&stops, "08:00", None).unwrap();

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].stop.id, "a");
        assert_eq!(timeline[0].arrival_time, "8:00 AM");
        assert_eq!(timeline[0].departure_time, "10:00 AM");
        assert_eq!(timeline[1].arrival_time, "10:02 AM");
        assert_eq!(timeline[1].departure_time, "11:02 AM");
    }

    #[test]
    fn test_supplied_metrics_are_used() {
        let stops = vec![
            create_test_stop("a", 34.0, -118.0, 1.0),
            create_test_stop("b", 34.0, -118.0, 1.0),
            create_test_stop("c", 34.0, -118.0, 1.0),
        ];
        let metrics = RouteMetrics {
            drive_time: 40,
            billable_hours: 3.0,
            total_distance: None,
            fuel_cost: None,
        };
        let timeline = route_timeline(&stops, "07:30", Some(&metrics)).unwrap();
        // 40 minutes over 2 gaps
        assert_eq!(timeline[0].arrival_time, "7:30 AM");
        assert_eq!(timeline[1].arrival_time, "8:50 AM");
        assert_eq!(timeline[2].arrival_time, "10:10 AM");
        assert_eq!(timeline[2].departure_time, "11:10 AM");
    }

    #[test]
    fn test_uniform_gaps_ignore_leg_lengths() {
        let stops = vec![
            create_test_stop("a", 34.00, -118.0, 0.5),
            create_test_stop("b", 34.01, -118.0, 0.5),
            create_test_stop("c", 34.50, -118.0, 0.5),
        ];
        let timeline = route_timeline(&stops, "09:00", None).unwrap();
        let gap1 = timeline[1].arrival_ms - timeline[0].departure_ms;
        let gap2 = timeline[2].arrival_ms - timeline[1].departure_ms;
        assert_eq!(gap1, gap2);
        assert!(gap1 > 0);
    }

    #[test]
    fn test_monotonic_clock() {
        let stops: Vec<Stop> = (0..8)
            .map(|i| {
                create_test_stop(
                    &format!("s{i}"),
                    34.0 + i as f64 * 0.02,
                    -118.0 - i as f64 * 0.01,
                    0.25 * i as f64,
                )
            })
            .collect();
        let timeline = route_timeline(&stops, "06:15", None).unwrap();
        assert_eq!(timeline.len(), stops.len());
        for window in timeline.windows(2) {
            assert!(window[0].arrival_ms <= window[0].departure_ms);
            assert!(window[0].departure_ms <= window[1].arrival_ms);
        }
    }

    #[test]
    fn test_afternoon_and_midnight_wrap() {
        let stops = vec![create_test_stop("late", 34.0, -118.0, 3.0)];
        let timeline = route_timeline(&stops, "22:30", None).unwrap();
        assert_eq!(timeline[0].arrival_time, "10:30 PM");
        assert_eq!(timeline[0].departure_time, "1:30 AM");
        assert!(timeline[0].departure_ms > MS_PER_DAY);

        let timeline = route_timeline(&stops, "12:05", None).unwrap();
        assert_eq!(timeline[0].arrival_time, "12:05 PM");
        assert_eq!(timeline[0].departure_time, "3:05 PM");

        let timeline = route_timeline(&stops, "00:00", None).unwrap();
        assert_eq!(timeline[0].arrival_time, "12:00 AM");
    }

    #[test]
    fn test_invalid_start_time() {
        let stops = vec![create_test_stop("a", 34.0, -118.0, 1.0)];
        for bad in ["", "8 o'clock", "24:00", "12:60", "noon"] {
            assert_eq!(
                route_timeline(&stops, bad, None),
                Err(RouteError::InvalidStartTime(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_nan_and_negative_durations() {
        let stops = vec![
            create_test_stop("a", 34.0, -118.0, 1.0),
            create_test_stop("b", 34.0, -118.0, f64::NAN),
            create_test_stop("c", 34.0, -118.0, -0.5),
        ];
        let metrics = RouteMetrics {
            drive_time: 60,
            billable_hours: 0.5,
            total_distance: None,
            fuel_cost: None,
        };
        let timeline = route_timeline(&stops, "08:00", Some(&metrics)).unwrap();

        // A NaN duration does not advance the clock
        assert_eq!(timeline[1].arrival_time, "9:30 AM");
        assert_eq!(timeline[1].departure_ms, timeline[1].arrival_ms);
        assert_eq!(
            timeline[2].arrival_ms,
            timeline[1].departure_ms + 30 * 60_000
        );

        // A negative duration moves it backwards
        assert_eq!(timeline[2].arrival_time, "10:00 AM");
        assert_eq!(timeline[2].departure_time, "9:30 AM");
        assert!(timeline[2].departure_ms < timeline[2].arrival_ms);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "12:00 AM");
        assert_eq!(format_clock(8 * 3_600_000 + 5 * 60_000 + 59_000), "8:05 AM");
        assert_eq!(format_clock(13 * 3_600_000), "1:00 PM");
        assert_eq!(format_clock(-60_000), "11:59 PM");
    }
}
