//! DispatchBoard - Top-level manager for a day's crew routes
//!
//! This module provides the high-level API for collecting the routes of several crews,
//! ingesting them in parallel and reading board-wide totals.

use crate::utils::round_half_up;
use crate::{CrewRoute, Result, RouteInput, RouteMetrics, route_efficiency};

use geo::Rect;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How invalid coordinates, durations and start times are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValidationPolicy {
    /// Log problems and compute anyway (results may be meaningless or NaN)
    #[default]
    Lenient,
    /// Reject the route on the first problem
    Strict,
}

/// Configuration for route construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Config {
    /// Validation applied to every route added to the board.
    /// Default: lenient
    pub validation: ValidationPolicy,
    /// Start time (`HH:MM`) for routes that do not specify one.
    /// Default: 08:00
    pub default_start_time: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Lenient,
            default_start_time: "08:00".to_string(),
        }
    }
}

/// Information about the dispatch board
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoardInfo {
    /// Number of crew routes
    pub route_count: usize,
    /// Number of stops across all routes
    pub stop_count: usize,
    /// Total drive time in minutes
    pub total_drive_time: u64,
    /// Total billable hours
    pub total_billable_hours: f64,
    /// Total distance in miles
    pub total_distance_miles: f64,
    /// Total fuel cost in USD
    pub total_fuel_cost: f64,
    /// Board-wide efficiency percentage
    pub efficiency: f64,
}

/// Cached statistics for the board
///
/// These are updated incrementally when routes are added, avoiding a pass over
/// every route on each read.
#[derive(Debug, Clone, Default)]
struct CachedStats {
    stop_count: usize,
    drive_time: u64,
    billable_hours: f64,
    distance: f64,
    fuel_cost: f64,
    /// Combined bounding box in degrees (None if no route has a location)
    bounding_box: Option<Rect<f64>>,
}

/// All crew routes scheduled for one day
#[derive(Debug, Clone)]
pub struct DispatchBoard {
    routes: Vec<CrewRoute>,
    config: Config,
    cached_stats: CachedStats,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl DispatchBoard {
    /// Create an empty board with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            routes: Vec::new(),
            config,
            cached_stats: CachedStats::default(),
        }
    }

    /// Validate and add a single route
    pub fn add_route(&mut self, input: RouteInput) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("dispatch::add_route");

        let route = CrewRoute::new(input, &self.config)?;
        self.update_stats_for_added_route(&route);
        self.routes.push(route);
        Ok(())
    }

    /// Add multiple routes, validating and computing metrics in parallel
    ///
    /// Either every route is added, in input order, or none is (the first error wins).
    pub fn add_routes_parallel(&mut self, inputs: Vec<RouteInput>) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("dispatch::add_routes_parallel");

        let config = &self.config;
        let routes: Result<Vec<CrewRoute>> = inputs
            .into_par_iter()
            .map(|input| CrewRoute::new(input, config))
            .collect();

        // Sequential merge keeps the input order
        for route in routes? {
            self.update_stats_for_added_route(&route);
            self.routes.push(route);
        }

        tracing::debug!(routes = self.routes.len(), "Dispatch board updated");
        Ok(())
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn routes(&self) -> &[CrewRoute] {
        &self.routes
    }

    #[inline]
    pub fn get_route(&self, index: usize) -> Option<&CrewRoute> {
        self.routes.get(index)
    }

    /// First route belonging to `crew`
    pub fn find_crew(&self, crew: &str) -> Option<&CrewRoute> {
        self.routes.iter().find(|r| r.crew() == crew)
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total drive time in minutes
    #[inline]
    pub fn total_drive_time(&self) -> u64 {
        self.cached_stats.drive_time
    }

    #[inline]
    pub fn total_billable_hours(&self) -> f64 {
        round_half_up(self.cached_stats.billable_hours, 2)
    }

    #[inline]
    pub fn total_distance(&self) -> f64 {
        round_half_up(self.cached_stats.distance, 2)
    }

    #[inline]
    pub fn total_fuel_cost(&self) -> f64 {
        round_half_up(self.cached_stats.fuel_cost, 2)
    }

    /// Board-wide efficiency: summed billable time over summed billable and drive time
    pub fn efficiency(&self) -> f64 {
        route_efficiency(&RouteMetrics {
            drive_time: u32::try_from(self.cached_stats.drive_time).unwrap_or(u32::MAX),
            billable_hours: self.total_billable_hours(),
            total_distance: Some(self.total_distance()),
            fuel_cost: Some(self.total_fuel_cost()),
        })
    }

    /// Get board information
    ///
    /// This is O(1) as all values are cached.
    pub fn get_info(&self) -> BoardInfo {
        BoardInfo {
            route_count: self.routes.len(),
            stop_count: self.cached_stats.stop_count,
            total_drive_time: self.total_drive_time(),
            total_billable_hours: self.total_billable_hours(),
            total_distance_miles: self.total_distance(),
            total_fuel_cost: self.total_fuel_cost(),
            efficiency: self.efficiency(),
        }
    }

    /// Combined bounding box of all routes
    ///
    /// Returns `None` if no route has a location.
    /// Returns `Some((min_lat, min_lon, max_lat, max_lon))` otherwise.
    pub fn bounding_box_wgs84(&self) -> Option<(f64, f64, f64, f64)> {
        let bbox = self.cached_stats.bounding_box?;
        Some((bbox.min().y, bbox.min().x, bbox.max().y, bbox.max().x))
    }

    /// Center of the combined bounding box as `(lat, lon)`
    #[inline]
    pub fn center_wgs84(&self) -> Option<(f64, f64)> {
        self.bounding_box_wgs84()
            .map(|(min_lat, min_lon, max_lat, max_lon)| {
                ((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0)
            })
    }

    /// Remove all routes from the board
    pub fn clear(&mut self) {
        self.routes.clear();
        self.cached_stats = CachedStats::default();
    }

    #[inline]
    fn update_stats_for_added_route(&mut self, route: &CrewRoute) {
        let metrics = route.metrics();
        let stats = &mut self.cached_stats;
        stats.stop_count += route.stops().len();
        stats.drive_time += u64::from(metrics.drive_time);
        stats.billable_hours += metrics.billable_hours;
        stats.distance += metrics.distance_miles();
        stats.fuel_cost += metrics.fuel_cost_usd();

        if let Some(route_bbox) = route.bounding_box() {
            stats.bounding_box = Some(match stats.bounding_box {
                Some(bbox) => Rect::new(
                    geo::Coord {
                        x: bbox.min().x.min(route_bbox.min().x),
                        y: bbox.min().y.min(route_bbox.min().y),
                    },
                    geo::Coord {
                        x: bbox.max().x.max(route_bbox.max().x),
                        y: bbox.max().y.max(route_bbox.max().y),
                    },
                ),
                None => route_bbox,
            });
        }
    }
}
