//! Read-only spatial index over a fuel station catalog.
//!
//! The index is built once from the raw catalog and then shared by every
//! planning call. Radius queries run against an R\*-tree keyed on raw
//! coordinates, so a radius is measured in degrees, not miles: at mid
//! latitudes one degree of latitude is roughly 69 miles, while a degree of
//! longitude shrinks towards the poles.

use std::fmt;

use geo::Coord;
use log::{debug, warn};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use thiserror::Error;

use crate::{RawStation, Station};

/// Answers "which stations lie within `radius` degrees of `point`".
///
/// Implementations must return stations in catalog order so that callers
/// breaking ties by position get reproducible results.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fuelstop_core::{Station, StationLookup};
///
/// struct Everywhere(Vec<Station>);
///
/// impl StationLookup for Everywhere {
///     fn stations_within(&self, _point: Coord<f64>, _radius_degrees: f64) -> Vec<&Station> {
///         self.0.iter().collect()
///     }
/// }
///
/// let lookup = Everywhere(vec![Station::new("Any", Coord { x: 0.0, y: 0.0 }, 3.0)]);
/// assert_eq!(lookup.stations_within(Coord { x: 9.0, y: 9.0 }, 0.1).len(), 1);
/// ```
pub trait StationLookup {
    /// Stations whose coordinate-space distance to `point` is at most
    /// `radius_degrees`, in catalog order.
    fn stations_within(&self, point: Coord<f64>, radius_degrees: f64) -> Vec<&Station>;
}

/// Error raised when an index cannot be built from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationIndexError {
    /// A station reached the indexing step with a NaN or infinite coordinate.
    ///
    /// Row filtering should make this impossible, so it signals corrupted
    /// input or a validation defect rather than a bad row.
    #[error("station {name:?} at catalog position {position} has non-finite coordinates")]
    NonFiniteCoordinates {
        /// Name of the offending station.
        name: String,
        /// Position of the station in the filtered catalog.
        position: usize,
    },
}

/// Tree entry pointing back into the station list.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedStation {
    position: usize,
    point: [f64; 2],
}

impl IndexedStation {
    const fn new(position: usize, station: &Station) -> Self {
        Self {
            position,
            point: [station.location.x, station.location.y],
        }
    }
}

impl RTreeObject for IndexedStation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedStation {
    #[expect(clippy::float_arithmetic, reason = "squared Euclidean distance")]
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [x, y] = self.point;
        let [px, py] = *point;
        let dx = x - px;
        let dy = y - py;
        dx * dx + dy * dy
    }
}

/// Immutable catalog of validated stations with an R\*-tree over their
/// coordinates.
///
/// Station positions are stable: position `n` always refers to the `n`th row
/// that survived validation, in catalog order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{RawStation, StationIndex};
///
/// # fn main() -> Result<(), fuelstop_core::StationIndexError> {
/// let index = StationIndex::build(vec![
///     RawStation::new("North", 40.0, -100.0, 3.10),
///     RawStation::new("Broken", f64::NAN, -100.0, 2.00),
/// ])?;
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.rejected_rows(), 1);
/// assert_eq!(index.query(Coord { x: -100.0, y: 40.0 }, 0.0), vec![0]);
/// # Ok(())
/// # }
/// ```
pub struct StationIndex {
    stations: Vec<Station>,
    tree: RTree<IndexedStation>,
    rejected_rows: usize,
}

impl fmt::Debug for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationIndex")
            .field("stations", &self.stations.len())
            .field("rejected_rows", &self.rejected_rows)
            .finish_non_exhaustive()
    }
}

impl StationIndex {
    /// Validate a raw catalog and index every usable row.
    ///
    /// Rows without coordinates, with non-finite coordinates, or without a
    /// positive price are skipped and counted in [`Self::rejected_rows`].
    ///
    /// # Errors
    /// Propagates [`StationIndexError`] from [`Self::from_stations`].
    pub fn build<I>(catalog: I) -> Result<Self, StationIndexError>
    where
        I: IntoIterator<Item = RawStation>,
    {
        let mut rejected_rows = 0_usize;
        let stations: Vec<Station> = catalog
            .into_iter()
            .enumerate()
            .filter_map(|(row, raw)| {
                let name = raw.name.clone();
                raw.validate()
                    .inspect_err(|reason| {
                        debug!("Skipping catalog row {row} ({name:?}): {reason}");
                        rejected_rows = rejected_rows.saturating_add(1);
                    })
                    .ok()
            })
            .collect();
        if rejected_rows > 0 {
            warn!(
                "Excluded {rejected_rows} catalog rows with missing or invalid coordinates or prices"
            );
        }
        let mut index = Self::from_stations(stations)?;
        index.rejected_rows = rejected_rows;
        Ok(index)
    }

    /// Index stations that were validated elsewhere.
    ///
    /// Fails without building anything if any station has a non-finite
    /// coordinate.
    ///
    /// # Errors
    /// Returns [`StationIndexError::NonFiniteCoordinates`] naming the first
    /// offending station.
    pub fn from_stations(stations: Vec<Station>) -> Result<Self, StationIndexError> {
        if let Some((position, station)) = stations
            .iter()
            .enumerate()
            .find(|(_, station)| !station.has_finite_location())
        {
            return Err(StationIndexError::NonFiniteCoordinates {
                name: station.name.clone(),
                position,
            });
        }
        let entries = stations
            .iter()
            .enumerate()
            .map(|(position, station)| IndexedStation::new(position, station))
            .collect();
        Ok(Self {
            tree: RTree::bulk_load(entries),
            stations,
            rejected_rows: 0,
        })
    }

    /// Positions of every station within `radius_degrees` of `point`,
    /// ascending.
    ///
    /// The boundary is inclusive. A negative or non-finite radius matches
    /// nothing.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "squaring the search radius")]
    pub fn query(&self, point: Coord<f64>, radius_degrees: f64) -> Vec<usize> {
        if !radius_degrees.is_finite() || radius_degrees < 0.0 {
            return Vec::new();
        }
        let mut positions: Vec<usize> = self
            .tree
            .locate_within_distance([point.x, point.y], radius_degrees * radius_degrees)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Station stored at `position`.
    #[must_use]
    pub fn station(&self, position: usize) -> Option<&Station> {
        self.stations.get(position)
    }

    /// All indexed stations in catalog order.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of indexed stations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the index holds no stations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Catalog rows dropped during [`Self::build`].
    #[must_use]
    pub const fn rejected_rows(&self) -> usize {
        self.rejected_rows
    }
}

impl StationLookup for StationIndex {
    fn stations_within(&self, point: Coord<f64>, radius_degrees: f64) -> Vec<&Station> {
        self.query(point, radius_degrees)
            .into_iter()
            .filter_map(|position| self.station(position))
            .collect()
    }
}
