//! Facade crate for the fuel-stop planning engine.
//!
//! This crate re-exports the core planning types and exposes the CSV and
//! GeoJSON readers behind the `data` feature.

#![forbid(unsafe_code)]

pub use fuelstop_core::{
    Diagnostics, FuelPlan, FuelPlanner, FuelStop, PlanError, PlanResponse, PlannerConfig,
    RawStation, Route, Station, StationIndex, StationIndexError, StationLookup, StopLocation,
    TriggerOutcome, VehicleProfile, VehicleProfileError, Waypoint, plan,
};

#[cfg(feature = "data")]
pub use fuelstop_data::{
    CatalogError, RouteFileError, RouteThinning, parse_catalog, parse_route, read_catalog,
    read_route,
};
