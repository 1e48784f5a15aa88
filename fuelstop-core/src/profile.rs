//! Vehicle parameters that shape a fuel plan.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range, fuel economy and tank size of the vehicle being planned for.
///
/// Values are request-scoped constants; the planner never mutates them.
///
/// # Examples
/// ```
/// use fuelstop_core::VehicleProfile;
///
/// # fn main() -> Result<(), fuelstop_core::VehicleProfileError> {
/// let profile = VehicleProfile::new(400.0, 8.0, 60.0)?;
/// assert_eq!(profile.gallons_to_fill(200.0), 25.0);
/// assert_eq!(profile.gallons_to_fill(800.0), 60.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleProfile {
    /// Maximum distance between refuels, in miles.
    pub range_miles: f64,
    /// Fuel economy in miles per gallon.
    pub mpg: f64,
    /// Largest purchase possible at one stop, in gallons.
    pub tank_capacity_gallons: f64,
}

/// Errors returned by [`VehicleProfile::new`] and [`VehicleProfile::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VehicleProfileError {
    /// A parameter was zero, negative, NaN or infinite.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value supplied for it.
        value: f64,
    },
}

impl Default for VehicleProfile {
    /// A long-haul truck: 500 miles of range, 10 mpg and a 50 gallon tank.
    fn default() -> Self {
        Self {
            range_miles: 500.0,
            mpg: 10.0,
            tank_capacity_gallons: 50.0,
        }
    }
}

impl VehicleProfile {
    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Returns [`VehicleProfileError::NonPositive`] for the first parameter
    /// that is not a positive finite number.
    pub fn new(
        range_miles: f64,
        mpg: f64,
        tank_capacity_gallons: f64,
    ) -> Result<Self, VehicleProfileError> {
        let profile = Self {
            range_miles,
            mpg,
            tank_capacity_gallons,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check every parameter is positive and finite.
    ///
    /// Profiles deserialised from configuration bypass [`Self::new`], so the
    /// planner calls this before walking a route.
    ///
    /// # Errors
    /// Returns [`VehicleProfileError::NonPositive`] naming the offending field.
    pub fn validate(&self) -> Result<(), VehicleProfileError> {
        [
            ("range_miles", self.range_miles),
            ("mpg", self.mpg),
            ("tank_capacity_gallons", self.tank_capacity_gallons),
        ]
        .into_iter()
        .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        .map_or(Ok(()), |(field, value)| {
            Err(VehicleProfileError::NonPositive { field, value })
        })
    }

    /// Gallons bought after driving `miles`: what was burned, capped at the tank.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "fuel burn is miles over mpg")]
    pub fn gallons_to_fill(&self, miles: f64) -> f64 {
        (miles / self.mpg).min(self.tank_capacity_gallons)
    }
}
