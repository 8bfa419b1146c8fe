//! Crew route storage
//!
//! This module provides the `CrewRoute` struct: one crew's ordered stops, validated
//! according to the board configuration, with the metrics and bounding box precomputed.

use crate::{
    Config, MetricsDelta, Result, RouteError, RouteMetrics, RoutePoint, StartLocation, Stop,
    ValidationPolicy, compare_metrics, optimization_suggestions, route_efficiency,
    route_metrics, route_timeline, timeline,
};
use geo::{BoundingRect, MultiPoint, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Start time used when neither the route nor the configuration has a valid one
pub const FALLBACK_START_TIME: &str = "08:00";

/// Raw, unvalidated description of a crew's day as supplied by the caller
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteInput {
    /// Crew name or identifier
    pub crew: String,
    /// Start time as `HH:MM`; the configured default is used when missing
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<String>,
    /// Depot or yard the crew leaves from
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<StartLocation>,
    /// Jobs in visiting order
    pub stops: Vec<Stop>,
}

/// Everything a caller displays for one crew route
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteReport {
    pub crew: String,
    pub start_time: String,
    pub metrics: RouteMetrics,
    pub efficiency: f64,
    pub timeline: Vec<RoutePoint>,
    pub suggestions: Vec<String>,
}

/// A single crew route with precomputed metrics
#[derive(Clone, Debug)]
pub struct CrewRoute {
    crew: String,
    stops: Vec<Stop>,
    start: Option<StartLocation>,
    start_time: String,
    /// Cached metrics (computed once during construction)
    metrics: RouteMetrics,
    /// Cached bounding box of the start location and all stops, in degrees
    bounding_box: Option<Rect<f64>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl CrewRoute {
    /// Create a new crew route
    ///
    /// # Arguments
    /// * `input` - Crew name, stops, optional start location and start time
    /// * `config` - Supplies the validation policy and the default start time
    ///
    /// # Returns
    /// The route on success. Under [`ValidationPolicy::Strict`] the first invalid
    /// coordinate, duration or start time is returned as an error; under
    /// [`ValidationPolicy::Lenient`] problems are only logged and an unparseable start
    /// time is replaced by the configured default (or [`FALLBACK_START_TIME`]).
    pub fn new(input: RouteInput, config: &Config) -> Result<Self> {
        let RouteInput {
            crew,
            start_time,
            start,
            stops,
        } = input;
        let start_time = start_time.unwrap_or_else(|| config.default_start_time.clone());

        let problems = Self::validate(&stops, start.as_ref(), &start_time);
        match config.validation {
            ValidationPolicy::Strict => {
                if let Some(err) = problems.into_iter().next() {
                    return Err(err);
                }
            }
            ValidationPolicy::Lenient => {
                for err in problems {
                    tracing::warn!(crew = %crew, "Accepting invalid route input: {err}");
                }
            }
        }

        // An accepted route must always be able to project its timeline
        let start_time = if timeline::parse_start_time(&start_time).is_ok() {
            start_time
        } else {
            let fallback = Self::fallback_start_time(config);
            tracing::warn!(crew = %crew, "Using start time {fallback} instead of {start_time:?}");
            fallback
        };

        Ok(Self::from_parts(crew, stops, start, start_time))
    }

    /// Configured default start time, or 08:00 when that one does not parse either
    fn fallback_start_time(config: &Config) -> String {
        if timeline::parse_start_time(&config.default_start_time).is_ok() {
            config.default_start_time.clone()
        } else {
            FALLBACK_START_TIME.to_string()
        }
    }

    fn from_parts(
        crew: String,
        stops: Vec<Stop>,
        start: Option<StartLocation>,
        start_time: String,
    ) -> Self {
        let metrics = route_metrics(&stops, start);
        let bounding_box = Self::compute_bounding_box(&stops, start.as_ref());
        Self {
            crew,
            stops,
            start,
            start_time,
            metrics,
            bounding_box,
        }
    }

    /// Collect every problem in the route input, in stop order
    fn validate(
        stops: &[Stop],
        start: Option<&StartLocation>,
        start_time: &str,
    ) -> Vec<RouteError> {
        let mut problems = Vec::new();
        if let Some(err) = start.and_then(|s| s.validate().err()) {
            problems.push(err);
        }
        problems.extend(stops.iter().filter_map(|s| s.validate().err()));
        if let Err(err) = timeline::parse_start_time(start_time) {
            problems.push(err);
        }
        problems
    }

    fn compute_bounding_box(stops: &[Stop], start: Option<&StartLocation>) -> Option<Rect<f64>> {
        let points: MultiPoint<f64> = start
            .map(StartLocation::point)
            .into_iter()
            .chain(stops.iter().map(Stop::point))
            .collect::<Vec<_>>()
            .into();
        points.bounding_rect()
    }

    #[inline]
    pub fn crew(&self) -> &str {
        &self.crew
    }

    #[inline]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    #[inline]
    pub fn start(&self) -> Option<StartLocation> {
        self.start
    }

    #[inline]
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// Metrics of the route in its current order
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn metrics(&self) -> &RouteMetrics {
        &self.metrics
    }

    #[inline]
    pub fn efficiency(&self) -> f64 {
        route_efficiency(&self.metrics)
    }

    /// Projected timeline from the route's start time, using the cached metrics
    pub fn timeline(&self) -> Result<Vec<RoutePoint>> {
        route_timeline(&self.stops, &self.start_time, Some(&self.metrics))
    }

    pub fn suggestions(&self) -> Vec<String> {
        optimization_suggestions(&self.stops, &self.metrics)
    }

    /// Bounding box of the start location and stops in degrees (x = longitude)
    ///
    /// Returns `None` for a route without any location.
    #[inline]
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.bounding_box
    }

    /// Build the same route with its stops visited in `order`
    ///
    /// `order[i]` is the index of the current stop to visit i-th. Returns the reordered
    /// route together with the deltas from the current order to the new one.
    pub fn reordered(&self, order: &[usize]) -> Result<(CrewRoute, MetricsDelta)> {
        if order.len() != self.stops.len() {
            return Err(RouteError::InvalidOrder {
                reason: format!(
                    "expected {} indices, got {}",
                    self.stops.len(),
                    order.len()
                ),
            });
        }
        let mut seen = vec![false; self.stops.len()];
        for &index in order {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(RouteError::InvalidOrder {
                        reason: format!("index {index} appears more than once"),
                    });
                }
                None => {
                    return Err(RouteError::InvalidOrder {
                        reason: format!("index {index} is out of range"),
                    });
                }
            }
        }

        let stops = order.iter().map(|&i| self.stops[i].clone()).collect();
        let route = Self::from_parts(
            self.crew.clone(),
            stops,
            self.start,
            self.start_time.clone(),
        );
        let delta = compare_metrics(&self.metrics, &route.metrics);
        tracing::debug!(
            crew = %self.crew,
            drive_time_change = delta.drive_time_change,
            distance_change = delta.distance_change,
            improvement = delta.is_improvement(),
            "Evaluated stop reorder"
        );
        Ok((route, delta))
    }

    /// Bundle metrics, efficiency, timeline and suggestions for display
    pub fn report(&self) -> Result<RouteReport> {
        Ok(RouteReport {
            crew: self.crew.clone(),
            start_time: self.start_time.clone(),
            metrics: self.metrics.clone(),
            efficiency: self.efficiency(),
            timeline: self.timeline()?,
            suggestions: self.suggestions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Priority;

    fn create_test_stop(id: &str, lat: f64, lng: f64, hours: f64) -> Stop {
        Stop::new(id, format!("{id} Oak Ave"), lat, lng, hours)
    }

    fn create_test_input() -> RouteInput {
        RouteInput {
            crew: "Crew A".to_string(),
            start_time: Some("07:00".to_string()),
            start: Some(StartLocation::new(34.00, -118.00)),
            stops: vec![
                create_test_stop("a", 34.02, -118.00, 2.0),
                create_test_stop("b", 34.10, -118.05, 1.5),
                create_test_stop("c", 34.04, -118.01, 3.0),
            ],
        }
    }

    #[test]
    fn test_route_creation() {
        let route = CrewRoute::new(create_test_input(), &Config::default()).unwrap();
        assert_eq!(route.crew(), "Crew A");
        assert_eq!(route.stops().len(), 3);
        assert_eq!(route.start_time(), "07:00");
        assert_eq!(route.metrics().billable_hours, 6.5);
        assert!(route.metrics().distance_miles() > 0.0);
    }

    #[test]
    fn test_metrics_match_free_function() {
        let input = create_test_input();
        let expected = route_metrics(&input.stops, input.start);
        let route = CrewRoute::new(input, &Config::default()).unwrap();
        assert_eq!(route.metrics(), &expected);
        assert_eq!(route.efficiency(), route_efficiency(&expected));
    }

    #[test]
    fn test_default_start_time() {
        let input = RouteInput {
            start_time: None,
            ..create_test_input()
        };
        let route = CrewRoute::new(input, &Config::default()).unwrap();
        assert_eq!(route.start_time(), "08:00");
        assert_eq!(route.timeline().unwrap()[0].arrival_time, "8:00 AM");
    }

    #[test]
    fn test_strict_rejects_invalid_stop() {
        let mut input = create_test_input();
        input.stops[1].lat = 123.0;
        let config = Config {
            validation: ValidationPolicy::Strict,
            ..Config::default()
        };
        assert!(matches!(
            CrewRoute::new(input, &config),
            Err(RouteError::InvalidLatitude { .. })
        ));
    }

    #[test]
    fn test_strict_rejects_bad_start_time() {
        let input = RouteInput {
            start_time: Some("7am".to_string()),
            ..create_test_input()
        };
        let config = Config {
            validation: ValidationPolicy::Strict,
            ..Config::default()
        };
        assert_eq!(
            CrewRoute::new(input, &config).unwrap_err(),
            RouteError::InvalidStartTime("7am".to_string())
        );
    }

    #[test]
    fn test_lenient_accepts_invalid_input() {
        let mut input = create_test_input();
        input.stops[0].estimated_hours = -1.0;
        let route = CrewRoute::new(input, &Config::default()).unwrap();
        assert_eq!(route.metrics().billable_hours, 3.5);

        let input = RouteInput {
            start_time: Some("late".to_string()),
            ..create_test_input()
        };
        let route = CrewRoute::new(input, &Config::default()).unwrap();
        assert_eq!(route.start_time(), "08:00");
        let report = route.report().unwrap();
        assert_eq!(report.timeline[0].arrival_time, "8:00 AM");
    }

    #[test]
    fn test_lenient_bad_default_start_time_falls_back() {
        let config = Config {
            default_start_time: "whenever".to_string(),
            ..Config::default()
        };
        let input = RouteInput {
            start_time: None,
            ..create_test_input()
        };
        let route = CrewRoute::new(input, &config).unwrap();
        assert_eq!(route.start_time(), FALLBACK_START_TIME);
        assert!(route.timeline().is_ok());

        let input = RouteInput {
            start_time: Some("6pm".to_string()),
            ..create_test_input()
        };
        let route = CrewRoute::new(input, &config).unwrap();
        assert_eq!(route.start_time(), FALLBACK_START_TIME);
    }

    #[test]
    fn test_bounding_box() {
        let route = CrewRoute::new(create_test_input(), &Config::default()).unwrap();
        let bbox = route.bounding_box().unwrap();
        assert_eq!(bbox.min().y, 34.00);
        assert_eq!(bbox.max().y, 34.10);
        assert_eq!(bbox.min().x, -118.05);
        assert_eq!(bbox.max().x, -118.00);

        let empty = CrewRoute::new(
            RouteInput {
                crew: "idle".to_string(),
                ..RouteInput::default()
            },
            &Config::default(),
        )
        .unwrap();
        assert!(empty.bounding_box().is_none());
        assert_eq!(empty.metrics(), &RouteMetrics::zero());
    }

    #[test]
    fn test_reordered_improves_zigzag() {
        let route = CrewRoute::new(create_test_input(), &Config::default()).unwrap();
        // a -> c -> b runs outwards instead of doubling back
        let (better, delta) = route.reordered(&[0, 2, 1]).unwrap();
        let ids: Vec<&str> = better.stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert!(delta.distance_change < 0.0);
        assert!(delta.drive_time_change <= 0);
        assert!(delta.is_improvement());
        assert_eq!(better.metrics().billable_hours, route.metrics().billable_hours);
        assert_eq!(
            delta,
            compare_metrics(route.metrics(), better.metrics())
        );
    }

    #[test]
    fn test_identity_reorder_has_zero_delta() {
        let route = CrewRoute::new(create_test_input(), &Config::default()).unwrap();
        let (same, delta) = route.reordered(&[0, 1, 2]).unwrap();
        assert_eq!(same.metrics(), route.metrics());
        assert_eq!(delta, MetricsDelta::default());
    }

    #[test]
    fn test_reordered_rejects_non_permutations() {
        let route = CrewRoute::new(create_test_input(), &Config::default()).unwrap();
        for order in [&[0, 1][..], &[0, 1, 1][..], &[0, 1, 3][..], &[0, 1, 2, 3][..]] {
            assert!(matches!(
                route.reordered(order),
                Err(RouteError::InvalidOrder { .. })
            ));
        }
    }

    #[test]
    fn test_report() {
        let mut input = create_test_input();
        input.stops[2].priority = Some(Priority::High);
        let route = CrewRoute::new(input, &Config::default()).unwrap();
        let report = route.report().unwrap();
        assert_eq!(report.crew, "Crew A");
        assert_eq!(report.timeline.len(), 3);
        assert_eq!(report.timeline[0].arrival_time, "7:00 AM");
        assert_eq!(report.efficiency, route.efficiency());
        assert!(report.suggestions.iter().any(|s| s.contains("high-priority")));
    }
}
