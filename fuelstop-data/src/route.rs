//! Reader for routing-provider directions in GeoJSON form.
//!
//! Only the first feature of the collection is used. Its geometry supplies
//! the polyline as `[longitude, latitude]` positions and its
//! `properties.summary.distance` the driven length in metres.

use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::{Route, Waypoint};
use geo::Coord;
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Metres per mile used to convert the provider's reported distance.
pub const PROVIDER_METRES_PER_MILE: f64 = 1609.34;

/// Polyline decimation applied to long provider routes.
///
/// Routes with more than `max_points` positions keep every `stride`-th
/// position, starting from the first. The final position is not forced back
/// in, so the decimated polyline may stop short of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteThinning {
    /// Largest polyline left untouched.
    pub max_points: usize,
    /// Keep one position in this many once thinning applies.
    pub stride: usize,
}

impl Default for RouteThinning {
    fn default() -> Self {
        Self {
            max_points: 500,
            stride: 10,
        }
    }
}

impl RouteThinning {
    /// Decimate `waypoints` if they exceed the threshold.
    ///
    /// A stride of zero or one leaves the polyline unchanged.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fuelstop_data::RouteThinning;
    ///
    /// let line: Vec<_> = (0..501).map(|i| Coord { x: f64::from(i), y: 0.0 }).collect();
    /// let thinned = RouteThinning::default().apply(line);
    /// assert_eq!(thinned.len(), 51);
    /// assert_eq!(thinned[1].x, 10.0);
    /// ```
    #[must_use]
    pub fn apply(self, waypoints: Vec<Waypoint>) -> Vec<Waypoint> {
        if waypoints.len() <= self.max_points || self.stride <= 1 {
            return waypoints;
        }
        let before = waypoints.len();
        let thinned: Vec<_> = waypoints.into_iter().step_by(self.stride).collect();
        debug!(
            "Thinned route polyline from {before} to {} positions",
            thinned.len()
        );
        thinned
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: Option<f64>,
}

/// Errors raised while reading a route.
#[derive(Debug, Error)]
pub enum RouteFileError {
    /// The route file could not be opened.
    #[error("failed to open route file at {path}")]
    Open {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
        /// Path that was opened.
        path: Utf8PathBuf,
    },
    /// The document is not GeoJSON of the expected shape.
    #[error("route is not a GeoJSON feature collection")]
    Decode {
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The collection has no features.
    #[error("route contains no features")]
    NoFeatures,
    /// The first feature carries no geometry.
    #[error("route feature has no geometry")]
    MissingGeometry,
    /// A position has fewer than two ordinates.
    #[error("route position {index} has fewer than two ordinates")]
    ShortPosition {
        /// Zero-based index into the unthinned polyline.
        index: usize,
    },
    /// The reported distance is negative or not finite.
    #[error("route distance must be a finite, non-negative number of metres, got {metres}")]
    InvalidDistance {
        /// Distance as reported.
        metres: f64,
    },
}

/// Parse a route from a GeoJSON reader.
///
/// When the provider reports no distance, the geodesic length of the
/// (thinned) polyline is used instead. Pass `None` to keep every position.
///
/// # Examples
/// ```
/// use fuelstop_data::{RouteThinning, parse_route};
///
/// # fn main() -> Result<(), fuelstop_data::RouteFileError> {
/// let geojson = r#"{"type": "FeatureCollection", "features": [{
///     "type": "Feature",
///     "geometry": {"type": "LineString", "coordinates": [[-100.0, 40.0], [-100.0, 41.0]]},
///     "properties": {"summary": {"distance": 111034.0}}
/// }]}"#;
/// let route = parse_route(geojson.as_bytes(), Some(RouteThinning::default()))?;
/// assert_eq!(route.waypoints()[1].y, 41.0);
/// assert!((route.total_distance_miles() - 68.99).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
pub fn parse_route<R: Read>(
    reader: R,
    thinning: Option<RouteThinning>,
) -> Result<Route, RouteFileError> {
    let collection: FeatureCollection =
        serde_json::from_reader(reader).map_err(|source| RouteFileError::Decode { source })?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or(RouteFileError::NoFeatures)?;
    let geometry = feature.geometry.ok_or(RouteFileError::MissingGeometry)?;

    let waypoints = geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [longitude, latitude, ..] => Ok(Coord {
                x: *longitude,
                y: *latitude,
            }),
            _ => Err(RouteFileError::ShortPosition { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let waypoints = match thinning {
        Some(thinning) => thinning.apply(waypoints),
        None => waypoints,
    };

    let reported = feature
        .properties
        .summary
        .and_then(|summary| summary.distance);
    match reported {
        Some(metres) if !metres.is_finite() || metres < 0.0 => {
            Err(RouteFileError::InvalidDistance { metres })
        }
        Some(metres) => Ok(Route::new(waypoints, metres_to_miles(metres))),
        None => {
            warn!("Route summary has no distance; using the polyline length");
            Ok(Route::from_waypoints(waypoints))
        }
    }
}

/// Read a route from a UTF-8 path.
pub fn read_route(
    path: &Utf8Path,
    thinning: Option<RouteThinning>,
) -> Result<Route, RouteFileError> {
    let file = open_utf8_file(path).map_err(|source| RouteFileError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let route = parse_route(BufReader::new(file), thinning)?;
    info!(
        "Read a {:.1} mile route with {} waypoints from {path}",
        route.total_distance_miles(),
        route.waypoints().len()
    );
    Ok(route)
}

#[expect(clippy::float_arithmetic, reason = "unit conversion")]
fn metres_to_miles(metres: f64) -> f64 {
    metres / PROVIDER_METRES_PER_MILE
}
