//! Core domain for the fuel-stop planning engine.
//!
//! A [`StationIndex`] is built once from a station catalog and shared
//! read-only. A [`FuelPlanner`] walks a [`Route`] for a [`VehicleProfile`],
//! querying the index at trigger points and emitting a [`FuelPlan`].
//!
//! Coordinates throughout are WGS84 [`geo::Coord`] values with
//! `x = longitude` and `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod index;
mod plan;
mod planner;
mod profile;
mod route;
mod station;

pub use index::{StationIndex, StationIndexError, StationLookup};
pub use plan::{AMOUNT_DECIMALS, FuelPlan, FuelStop, PRICE_DECIMALS, StopLocation, round_to};
pub use planner::{
    DEFAULT_SEARCH_RADIUS_DEGREES, Diagnostics, FuelPlanner, PlanError, PlanResponse,
    PlannerConfig, TriggerOutcome, plan,
};
pub use profile::{VehicleProfile, VehicleProfileError};
pub use route::{METRES_PER_MILE, Route, Segment, Waypoint, segment_miles};
pub use station::{RawStation, RowRejection, Station};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
