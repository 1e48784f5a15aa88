//! Fuel stations and the raw catalog rows they are validated from.

use geo::Coord;
use thiserror::Error;

/// A fuel retailer that can be selected as a refuelling stop.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The name is
/// the identity key: a plan never selects two stations sharing a name.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::Station;
///
/// let station = Station::new("Big Rig Plaza", Coord { x: -97.5, y: 35.4 }, 3.199);
/// assert_eq!(station.latitude(), 35.4);
/// assert_eq!(station.longitude(), -97.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Retailer name, unique within a plan.
    pub name: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Retail price per gallon.
    pub price_per_gallon: f64,
}

impl Station {
    /// Construct a station from already validated values.
    pub fn new(name: impl Into<String>, location: Coord<f64>, price_per_gallon: f64) -> Self {
        Self {
            name: name.into(),
            location,
            price_per_gallon,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Whether both coordinates are finite real numbers.
    #[must_use]
    pub const fn has_finite_location(&self) -> bool {
        self.location.x.is_finite() && self.location.y.is_finite()
    }
}

/// A catalog row before validation.
///
/// Missing values model blank cells in the source catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawStation {
    /// Retailer name.
    pub name: String,
    /// Latitude in degrees, if present.
    pub latitude: Option<f64>,
    /// Longitude in degrees, if present.
    pub longitude: Option<f64>,
    /// Retail price per gallon, if present.
    pub price_per_gallon: Option<f64>,
}

/// Why a catalog row was excluded from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// Latitude or longitude was blank.
    #[error("latitude or longitude is missing")]
    MissingCoordinates,
    /// Latitude or longitude was NaN or infinite.
    #[error("latitude or longitude is not a finite number")]
    NonFiniteCoordinates,
    /// Price was blank, non-finite or not positive.
    #[error("retail price is missing or not a positive number")]
    InvalidPrice,
}

impl RawStation {
    /// Construct a fully populated row.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, price_per_gallon: f64) -> Self {
        Self {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            price_per_gallon: Some(price_per_gallon),
        }
    }

    /// Validate the row, producing a [`Station`] or the reason it was dropped.
    ///
    /// # Errors
    /// Returns the [`RowRejection`] describing the first unusable field.
    ///
    /// # Examples
    /// ```
    /// use fuelstop_core::{RawStation, RowRejection};
    ///
    /// let row = RawStation::new("Lonely Pump", f64::NAN, -100.0, 3.0);
    /// assert_eq!(row.validate(), Err(RowRejection::NonFiniteCoordinates));
    /// ```
    pub fn validate(self) -> Result<Station, RowRejection> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(RowRejection::MissingCoordinates);
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(RowRejection::NonFiniteCoordinates);
        }
        let price = self
            .price_per_gallon
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or(RowRejection::InvalidPrice)?;
        Ok(Station::new(
            self.name,
            Coord {
                x: longitude,
                y: latitude,
            },
            price,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn validate_keeps_finite_rows() {
        let station = RawStation::new("Pilot", 35.0, -97.0, 3.25)
            .validate()
            .expect("row should validate");
        assert_eq!(station.name, "Pilot");
        assert_eq!(station.location, Coord { x: -97.0, y: 35.0 });
        assert!(station.has_finite_location());
    }

    #[rstest]
    #[case::missing_latitude(None, Some(-97.0))]
    #[case::missing_longitude(Some(35.0), None)]
    #[case::missing_both(None, None)]
    fn validate_rejects_missing_coordinates(
        #[case] latitude: Option<f64>,
        #[case] longitude: Option<f64>,
    ) {
        let row = RawStation {
            name: "Blank".into(),
            latitude,
            longitude,
            price_per_gallon: Some(3.0),
        };
        assert_eq!(row.validate(), Err(RowRejection::MissingCoordinates));
    }

    #[rstest]
    #[case(f64::NAN, -97.0)]
    #[case(35.0, f64::INFINITY)]
    #[case(f64::NEG_INFINITY, f64::NAN)]
    fn validate_rejects_non_finite_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        let row = RawStation::new("Broken", latitude, longitude, 3.0);
        assert_eq!(row.validate(), Err(RowRejection::NonFiniteCoordinates));
    }

    #[rstest]
    #[case::missing(None)]
    #[case::zero(Some(0.0))]
    #[case::negative(Some(-1.5))]
    #[case::nan(Some(f64::NAN))]
    fn validate_rejects_unusable_prices(#[case] price: Option<f64>) {
        let row = RawStation {
            price_per_gallon: price,
            ..RawStation::new("Free Gas", 35.0, -97.0, 1.0)
        };
        assert_eq!(row.validate(), Err(RowRejection::InvalidPrice));
    }
}
