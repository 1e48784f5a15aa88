//! File adapters for the fuel-stop planning engine.
//!
//! Responsibilities:
//! - Read the geocoded station catalog CSV into raw catalog rows.
//! - Read routing-provider directions (GeoJSON) into a [`fuelstop_core::Route`].
//! - Provide capability-based filesystem helpers for the CLI.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `fuelstop-core`).
//! - Leave row validation to [`fuelstop_core::StationIndex::build`].
//!
//! Invariants:
//! - Readers preserve source order.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod catalog;
pub mod fs;
mod route;

pub use catalog::{
    CatalogError, LATITUDE_COLUMN, LONGITUDE_COLUMN, NAME_COLUMN, PRICE_COLUMN, parse_catalog,
    read_catalog,
};
pub use route::{PROVIDER_METRES_PER_MILE, RouteFileError, RouteThinning, parse_route, read_route};
