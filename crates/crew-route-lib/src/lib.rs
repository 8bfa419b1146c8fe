//! Crew Route Library - Route Metrics Estimation for Field-Service Crews
//!
//! This library turns an ordered list of job stops into the numbers a dispatcher looks at:
//! drive time, billable hours, distance, fuel cost, a projected arrival/departure timeline,
//! an efficiency score and a handful of advisory suggestions.
//!
//! # Architecture
//!
//! - **[`haversine_miles`]**: Great-circle distance between two points
//! - **[`route_metrics`]**: Aggregates an ordered stop sequence into [`RouteMetrics`]
//! - **[`route_timeline`]**: Projects arrival/departure clock times for every stop
//! - **[`optimization_suggestions`]** / **[`compare_metrics`]**: Advisory and comparison helpers
//! - **[`CrewRoute`]**: One crew's validated route with cached metrics
//! - **[`DispatchBoard`]**: High-level manager for all crew routes of a day
//!
//! The free functions never validate their input: out-of-range coordinates produce
//! meaningless (possibly NaN) numbers instead of errors. Validation is opt-in through
//! [`ValidationPolicy::Strict`] or [`validate_stops`].

mod dispatch;
mod metrics;
mod route;
mod stop;
mod suggestions;
mod timeline;
pub mod utils;

// Public API exports
pub use dispatch::{BoardInfo, Config, DispatchBoard, ValidationPolicy};
pub use metrics::{
    MetricsDelta, RouteMetrics, compare_metrics, route_efficiency, route_metrics,
};
pub use route::{CrewRoute, FALLBACK_START_TIME, RouteInput, RouteReport};
pub use stop::{Priority, StartLocation, Stop, validate_stops};
pub use suggestions::optimization_suggestions;
pub use timeline::{RoutePoint, route_timeline};
pub use utils::haversine_miles;

/// Error types for route estimation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid latitude {value} for {location}")]
    InvalidLatitude { location: String, value: f64 },

    #[error("Invalid longitude {value} for {location}")]
    InvalidLongitude { location: String, value: f64 },

    #[error("Invalid estimated duration {value}h for stop {stop_id}")]
    InvalidDuration { stop_id: String, value: f64 },

    #[error("Invalid start time {0:?}, expected HH:MM (24-hour)")]
    InvalidStartTime(String),

    #[error("Invalid stop order: {reason}")]
    InvalidOrder { reason: String },
}

pub type Result<T> = std::result::Result<T, RouteError>;
