//! Job stops and start locations
//!
//! Plain immutable value records supplied by the caller. The estimator never owns their
//! lifecycle; it only reads coordinates and durations.

use crate::{Result, RouteError, utils};
use geo::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scheduling priority of a job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A job site to be visited in sequence
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stop {
    /// Caller-assigned identifier (work order id, customer id, ...)
    pub id: String,
    /// Street address, carried through for display only
    pub address: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Estimated on-site work duration in hours
    pub estimated_hours: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub priority: Option<Priority>,
}

impl Stop {
    /// Create a stop without a priority tag
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        lat: f64,
        lng: f64,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            lat,
            lng,
            estimated_hours,
            priority: None,
        }
    }

    /// Builder-style priority setter
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Location as a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    #[inline]
    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(Priority::High)
    }

    /// Check the coordinate ranges and that the duration is a non-negative number
    pub fn validate(&self) -> Result<()> {
        check_coordinates(&format!("stop {}", self.id), self.lat, self.lng)?;
        if !(self.estimated_hours >= 0.0 && self.estimated_hours.is_finite()) {
            return Err(RouteError::InvalidDuration {
                stop_id: self.id.clone(),
                value: self.estimated_hours,
            });
        }
        Ok(())
    }
}

/// Depot or crew starting point, used as the implicit first waypoint
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StartLocation {
    pub lat: f64,
    pub lng: f64,
}

impl StartLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[inline]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    pub fn validate(&self) -> Result<()> {
        check_coordinates("start location", self.lat, self.lng)
    }
}

/// Validate every stop, returning the first problem found
pub fn validate_stops(stops: &[Stop]) -> Result<()> {
    stops.iter().try_for_each(Stop::validate)
}

fn check_coordinates(location: &str, lat: f64, lng: f64) -> Result<()> {
    if !utils::is_valid_latitude(lat) {
        return Err(RouteError::InvalidLatitude {
            location: location.to_string(),
            value: lat,
        });
    }
    if !utils::is_valid_longitude(lng) {
        return Err(RouteError::InvalidLongitude {
            location: location.to_string(),
            value: lng,
        });
    }
    Ok(())
}
