//! Greedy fuel-stop planning along a route.
//!
//! The planner walks the route once, accumulating geodesic miles. Whenever the
//! distance since the last stop reaches the vehicle's range, and again at the
//! final waypoint, it searches the station lookup around the current waypoint
//! and refuels at the cheapest station not already used on this route.
//!
//! A search that finds no unused station is skipped: nothing is bought and
//! the distance keeps accumulating until the next trigger point. Plans can
//! therefore contain gaps longer than the vehicle's range when the catalog is
//! sparse; [`Diagnostics::triggers`] records every such skip.

mod traversal;

use log::debug;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FuelPlan, Route, StationLookup, VehicleProfile, VehicleProfileError};

pub use traversal::TriggerOutcome;
use traversal::{Traversal, TraversalContext};

/// Search radius used when none is configured, in coordinate degrees.
///
/// 0.2 degrees of latitude is about 14 miles. The same radius spans fewer
/// miles east-west as latitude increases.
pub const DEFAULT_SEARCH_RADIUS_DEGREES: f64 = 0.2;

/// Configuration for [`FuelPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    /// Radius of each station search in raw coordinate degrees.
    pub search_radius_degrees: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_radius_degrees: DEFAULT_SEARCH_RADIUS_DEGREES,
        }
    }
}

/// Errors returned by [`FuelPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The vehicle profile had a non-positive parameter.
    #[error("invalid vehicle profile: {0}")]
    InvalidProfile(#[from] VehicleProfileError),
    /// The configured search radius was negative or not finite.
    #[error("search radius must be a finite, non-negative number of degrees, got {radius}")]
    InvalidSearchRadius {
        /// Radius supplied in the planner configuration.
        radius: f64,
    },
}

/// How a plan was reached.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Route distance compared against the vehicle range.
    pub route_miles: f64,
    /// Every trigger point visited, in travel order.
    pub triggers: Vec<TriggerOutcome>,
    /// True when the route fit within range and computed stops were discarded.
    pub short_trip_override: bool,
}

/// A plan together with its diagnostics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanResponse {
    /// The fuel plan.
    pub plan: FuelPlan,
    /// Trace of the walk that produced it.
    pub diagnostics: Diagnostics,
}

/// Greedy single-pass fuel-stop planner.
///
/// The planner holds configuration only; every call owns its traversal
/// state, so one planner can serve concurrent requests.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{FuelPlanner, RawStation, Route, StationIndex, VehicleProfile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let index = StationIndex::build(vec![RawStation::new("Only", 41.0, -100.0, 3.0)])?;
/// let route = Route::from_waypoints(vec![
///     Coord { x: -100.0, y: 40.0 },
///     Coord { x: -100.0, y: 41.0 },
/// ]);
/// let profile = VehicleProfile::new(50.0, 10.0, 50.0)?;
///
/// let response = FuelPlanner::new().plan(&route, &profile, &index)?;
/// assert_eq!(response.plan.stops.len(), 1);
/// assert_eq!(response.plan.stops[0].location.name, "Only");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FuelPlanner {
    config: PlannerConfig,
}

impl FuelPlanner {
    /// Construct a planner using the default search radius.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan fuel stops for `route`.
    ///
    /// The profile and configuration are validated before any traversal
    /// work. When the route's total distance does not exceed the vehicle
    /// range the returned plan is empty, whatever the walk found.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidProfile`] or
    /// [`PlanError::InvalidSearchRadius`] before any traversal work.
    pub fn plan<L>(
        &self,
        route: &Route,
        profile: &VehicleProfile,
        stations: &L,
    ) -> Result<PlanResponse, PlanError>
    where
        L: StationLookup + ?Sized,
    {
        profile.validate()?;
        let radius = self.config.search_radius_degrees;
        if !radius.is_finite() || radius < 0.0 {
            return Err(PlanError::InvalidSearchRadius { radius });
        }

        // Routes with fewer than two waypoints have no segments, so the walk
        // never consults `last_index`.
        let context = TraversalContext {
            profile,
            lookup: stations,
            search_radius_degrees: radius,
            last_index: route.last_index().unwrap_or_default(),
        };
        let (stops, triggers) = route
            .segments()
            .fold(Traversal::default(), |walk, segment| {
                walk.advance(segment, &context)
            })
            .finish();

        let route_miles = route.total_distance_miles();
        let short_trip_override = route_miles <= profile.range_miles;
        let plan = if short_trip_override {
            FuelPlan::empty()
        } else {
            FuelPlan::from_stops(stops)
        };
        debug!(
            "Planned {} stops for a {route_miles:.1} mile route ({} trigger points, short trip: {short_trip_override})",
            plan.stops.len(),
            triggers.len()
        );

        Ok(PlanResponse {
            plan,
            diagnostics: Diagnostics {
                route_miles,
                triggers,
                short_trip_override,
            },
        })
    }
}

/// Plan a route with the default planner configuration, discarding
/// diagnostics.
///
/// # Errors
/// Fails as [`FuelPlanner::plan`] does.
pub fn plan<L>(
    route: &Route,
    profile: &VehicleProfile,
    stations: &L,
) -> Result<FuelPlan, PlanError>
where
    L: StationLookup + ?Sized,
{
    FuelPlanner::new()
        .plan(route, profile, stations)
        .map(|response| response.plan)
}
