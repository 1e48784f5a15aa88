//! Test-only helpers: a linear-scan [`StationLookup`] and synthetic routes.

use geo::Coord;

use crate::{Route, Station, StationLookup, Waypoint};

/// Rough miles per degree of latitude, used to lay out synthetic routes.
pub const MILES_PER_DEGREE_LATITUDE: f64 = 69.0;

/// In-memory [`StationLookup`] that scans every station on each query.
///
/// Intended only for small datasets and for cross-checking
/// [`crate::StationIndex`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStationLookup {
    stations: Vec<Station>,
}

impl MemoryStationLookup {
    /// Create a lookup over the given stations, kept in iteration order.
    pub fn with_stations<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = Station>,
    {
        Self {
            stations: stations.into_iter().collect(),
        }
    }
}

impl StationLookup for MemoryStationLookup {
    #[expect(clippy::float_arithmetic, reason = "Euclidean distance in degrees")]
    fn stations_within(&self, point: Coord<f64>, radius_degrees: f64) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|station| {
                let dx = station.location.x - point.x;
                let dy = station.location.y - point.y;
                (dx * dx + dy * dy).sqrt() <= radius_degrees
            })
            .collect()
    }
}

/// Build a station from latitude, longitude and price.
#[must_use]
pub fn station(name: &str, latitude: f64, longitude: f64, price: f64) -> Station {
    Station::new(
        name,
        Coord {
            x: longitude,
            y: latitude,
        },
        price,
    )
}

/// A route heading due north from `start`, with a waypoint roughly every
/// `step_miles` until about `nominal_miles` have been covered.
///
/// Spacing uses [`MILES_PER_DEGREE_LATITUDE`], so the geodesic total reported
/// by the route is close to, not exactly, `nominal_miles`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "laying out synthetic waypoints")]
pub fn northbound_route(start: Waypoint, nominal_miles: f64, step_miles: f64) -> Route {
    let mut waypoints = vec![start];
    if step_miles > 0.0 {
        let mut travelled = 0.0_f64;
        while travelled < nominal_miles {
            travelled = (travelled + step_miles).min(nominal_miles);
            waypoints.push(Coord {
                x: start.x,
                y: start.y + travelled / MILES_PER_DEGREE_LATITUDE,
            });
        }
    }
    Route::from_waypoints(waypoints)
}

/// Index of the first waypoint at which the miles walked from the start reach
/// `miles`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "accumulating segment miles")]
pub fn first_waypoint_reaching(route: &Route, miles: f64) -> Option<usize> {
    let mut walked = 0.0;
    route.segments().find_map(|segment| {
        walked += segment.miles;
        (walked >= miles).then_some(segment.end_index)
    })
}

/// Position of the waypoint at `index`, if it exists.
#[must_use]
pub fn waypoint(route: &Route, index: usize) -> Option<Waypoint> {
    route.waypoints().get(index).copied()
}
