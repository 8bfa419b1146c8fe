//! Route aggregation, efficiency scoring and metric comparison
//!
//! Every function here is a pure value-in/value-out transformation. The travel
//! assumptions are fixed constants; callers needing different ones post-process the
//! returned [`RouteMetrics`].

use crate::utils::{point_distance_miles, round_half_up};
use crate::{StartLocation, Stop};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Average urban travel speed in miles per hour
pub const AVERAGE_SPEED_MPH: f64 = 25.0;

/// Assumed vehicle fuel economy in miles per gallon
pub const FUEL_EFFICIENCY_MPG: f64 = 20.0;

/// Assumed fuel price in USD per gallon
pub const FUEL_PRICE_PER_GALLON: f64 = 3.50;

/// Aggregate estimates over an ordered list of stops
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteMetrics {
    /// Estimated driving time in whole minutes
    pub drive_time: u32,
    /// Sum of on-site work durations in hours (2 decimals)
    pub billable_hours: f64,
    /// Total travelled distance in miles (2 decimals)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub total_distance: Option<f64>,
    /// Estimated fuel cost in USD (2 decimals)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fuel_cost: Option<f64>,
}

impl RouteMetrics {
    /// Metrics of an empty route
    pub fn zero() -> Self {
        Self {
            drive_time: 0,
            billable_hours: 0.0,
            total_distance: Some(0.0),
            fuel_cost: Some(0.0),
        }
    }

    /// Distance in miles, treating a missing value as zero
    #[inline]
    pub fn distance_miles(&self) -> f64 {
        self.total_distance.unwrap_or(0.0)
    }

    /// Fuel cost in USD, treating a missing value as zero
    #[inline]
    pub fn fuel_cost_usd(&self) -> f64 {
        self.fuel_cost.unwrap_or(0.0)
    }

    /// Drive time in hours
    #[inline]
    pub fn drive_hours(&self) -> f64 {
        f64::from(self.drive_time) / 60.0
    }
}

/// Signed differences between two metric snapshots (`next - current`)
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MetricsDelta {
    pub drive_time_change: i64,
    pub distance_change: f64,
    pub fuel_cost_change: f64,
    pub efficiency_change: f64,
}

impl MetricsDelta {
    /// True when the second snapshot is at least as good on drive time and efficiency
    pub fn is_improvement(&self) -> bool {
        self.drive_time_change <= 0 && self.efficiency_change >= 0.0
    }
}

/// Compute the metrics of visiting `stops` strictly in the given order
///
/// When `start` is given, the leg from it to the first stop is included in the distance.
/// An empty stop list yields [`RouteMetrics::zero`].
pub fn route_metrics(stops: &[Stop], start: Option<StartLocation>) -> RouteMetrics {
    #[cfg(feature = "profiling")]
    profiling::scope!("metrics::route_metrics");

    let Some(first) = stops.first() else {
        return RouteMetrics::zero();
    };

    let billable_hours = round_half_up(stops.iter().map(|s| s.estimated_hours).sum(), 2);

    let lead_in = start
        .map(|start| point_distance_miles(start.point(), first.point()))
        .unwrap_or(0.0);
    let legs: f64 = stops
        .windows(2)
        .map(|pair| point_distance_miles(pair[0].point(), pair[1].point()))
        .sum();
    let total_distance = round_half_up(lead_in + legs, 2);

    // NaN saturates to 0 on the integer conversion
    let drive_time = round_half_up(total_distance / AVERAGE_SPEED_MPH * 60.0, 0) as u32;
    let fuel_cost = round_half_up(
        total_distance / FUEL_EFFICIENCY_MPG * FUEL_PRICE_PER_GALLON,
        2,
    );

    tracing::debug!(
        stops = stops.len(),
        total_distance,
        drive_time,
        billable_hours,
        "Computed route metrics"
    );

    RouteMetrics {
        drive_time,
        billable_hours,
        total_distance: Some(total_distance),
        fuel_cost: Some(fuel_cost),
    }
}

/// Share of the working day spent on site, as a percentage with 1 decimal
///
/// Returns 0 when there is neither billable nor drive time.
pub fn route_efficiency(metrics: &RouteMetrics) -> f64 {
    let total_hours = metrics.billable_hours + metrics.drive_hours();
    if total_hours == 0.0 {
        return 0.0;
    }
    round_half_up(metrics.billable_hours / total_hours * 100.0, 1)
}

/// Signed deltas from `current` to `next`, e.g. before and after a manual reorder
pub fn compare_metrics(current: &RouteMetrics, next: &RouteMetrics) -> MetricsDelta {
    MetricsDelta {
        drive_time_change: i64::from(next.drive_time) - i64::from(current.drive_time),
        distance_change: round_half_up(next.distance_miles() - current.distance_miles(), 2),
        fuel_cost_change: round_half_up(next.fuel_cost_usd() - current.fuel_cost_usd(), 2),
        efficiency_change: round_half_up(route_efficiency(next) - route_efficiency(current), 1),
    }
}
