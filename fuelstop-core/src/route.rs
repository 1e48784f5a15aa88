//! Driving routes as ordered waypoint polylines.
//!
//! Waypoint order is travel order. Segment lengths are geodesic distances on
//! the WGS84 ellipsoid, expressed in statute miles.

use geo::{Coord, Distance, Geodesic, Point};

/// A single position along a route (`x = longitude`, `y = latitude`).
pub type Waypoint = Coord<f64>;

/// Metres in one international statute mile.
pub const METRES_PER_MILE: f64 = 1609.344;

/// Geodesic length in miles between two waypoints.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::segment_miles;
///
/// let one_degree = segment_miles(Coord { x: -100.0, y: 40.0 }, Coord { x: -100.0, y: 41.0 });
/// assert!((one_degree - 69.0).abs() < 0.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion from metres to miles"
)]
pub fn segment_miles(from: Waypoint, to: Waypoint) -> f64 {
    Geodesic.distance(Point::from(from), Point::from(to)) / METRES_PER_MILE
}

/// One leg of a route, identified by the index of the waypoint it ends at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index of the waypoint this segment arrives at. Always at least 1.
    pub end_index: usize,
    /// Position of the arrival waypoint.
    pub end: Waypoint,
    /// Geodesic length of the segment in miles.
    pub miles: f64,
}

/// An ordered polyline with the total distance reported for it.
///
/// The total usually comes from the routing provider and may differ slightly
/// from the sum of the polyline's segment lengths, for example after the
/// polyline has been thinned.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::Route;
///
/// let route = Route::new(
///     vec![Coord { x: -100.0, y: 40.0 }, Coord { x: -100.0, y: 41.0 }],
///     70.2,
/// );
/// assert_eq!(route.waypoints().len(), 2);
/// assert_eq!(route.total_distance_miles(), 70.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    total_distance_miles: f64,
}

impl Route {
    /// Construct a route with a provider-reported total distance.
    #[must_use]
    pub const fn new(waypoints: Vec<Waypoint>, total_distance_miles: f64) -> Self {
        Self {
            waypoints,
            total_distance_miles,
        }
    }

    /// Construct a route whose total distance is its geodesic polyline length.
    ///
    /// # Examples
    /// ```
    /// use fuelstop_core::Route;
    ///
    /// let route = Route::from_waypoints(Vec::new());
    /// assert!(route.is_empty());
    /// assert_eq!(route.total_distance_miles(), 0.0);
    /// ```
    #[must_use]
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        let total = polyline_miles(&waypoints);
        Self::new(waypoints, total)
    }

    /// Construct an empty route.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Total route distance in miles.
    #[must_use]
    pub const fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    /// Whether the route has no waypoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the final waypoint, if any.
    #[must_use]
    pub const fn last_index(&self) -> Option<usize> {
        self.waypoints.len().checked_sub(1)
    }

    /// Iterate the route's segments in travel order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.waypoints
            .windows(2)
            .zip(1..)
            .filter_map(|(pair, end_index)| match pair {
                [from, to] => Some(Segment {
                    end_index,
                    end: *to,
                    miles: segment_miles(*from, *to),
                }),
                _ => None,
            })
    }
}

fn polyline_miles(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(segment_miles(*from, *to)),
            _ => None,
        })
        .sum()
}
