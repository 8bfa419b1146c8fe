//! Advisory suggestions for a computed route

use crate::{RouteMetrics, Stop, route_efficiency};

/// Efficiency percentage below which the route is flagged
pub const MIN_EFFICIENCY_PERCENT: f64 = 70.0;
/// Total distance in miles above which the route is flagged
pub const MAX_DISTANCE_MILES: f64 = 50.0;
/// Drive time in minutes above which the route is flagged
pub const MAX_DRIVE_MINUTES: u32 = 120;
/// Average on-site hours per job below which the route is flagged
pub const MIN_AVERAGE_JOB_HOURS: f64 = 1.0;

/// Evaluate the fixed advisory rules against a route
///
/// Purely informational: nothing is reordered or changed.
pub fn optimization_suggestions(stops: &[Stop], metrics: &RouteMetrics) -> Vec<String> {
    let mut suggestions = Vec::new();

    let efficiency = route_efficiency(metrics);
    if efficiency < MIN_EFFICIENCY_PERCENT {
        suggestions.push(format!(
            "Route efficiency is {efficiency:.1}%: consider grouping nearby jobs to cut drive time"
        ));
    }

    let distance = metrics.distance_miles();
    if distance > MAX_DISTANCE_MILES {
        suggestions.push(format!(
            "Total distance of {distance:.1} miles is high: consider splitting the route between crews"
        ));
    }

    if metrics.drive_time > MAX_DRIVE_MINUTES {
        suggestions.push(format!(
            "Drive time of {} minutes exceeds {MAX_DRIVE_MINUTES}: consider a closer start location",
            metrics.drive_time
        ));
    }

    if !stops.is_empty() {
        let average = metrics.billable_hours / stops.len() as f64;
        if average < MIN_AVERAGE_JOB_HOURS {
            suggestions.push(format!(
                "Average job lasts {average:.1} hours: consider combining short jobs into fewer visits"
            ));
        }
    }

    let high_priority = stops.iter().filter(|s| s.is_high_priority()).count();
    if high_priority > 0 {
        suggestions.push(format!(
            "{high_priority} high-priority job(s) on this route: schedule them early in the day"
        ));
    }

    suggestions
}
