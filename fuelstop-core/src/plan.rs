//! Fuel plans: the ordered stops a planner emits and their aggregate cost.
//!
//! Every monetary and volume field is rounded when a stop is created, never
//! during the traversal, so rounding error cannot compound along a route.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Station;

/// Decimal places kept for prices.
pub const PRICE_DECIMALS: usize = 3;

/// Decimal places kept for costs and gallon amounts.
pub const AMOUNT_DECIMALS: usize = 2;

/// Round to a fixed number of decimal places.
///
/// Rounding applies to the exact binary value, so `2.675` (stored just below
/// the midpoint) becomes `2.67`. Exact binary ties go to the even digit.
///
/// # Examples
/// ```
/// use fuelstop_core::round_to;
///
/// assert_eq!(round_to(3.14159, 3), 3.142);
/// assert_eq!(round_to(149.996, 2), 150.0);
/// assert_eq!(round_to(2.675, 2), 2.67);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Where a stop takes place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopLocation {
    /// Station name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// One refuelling stop in a plan.
///
/// Serialises as
/// `{location: {name, lat, lng}, price_per_gallon, fuel_cost, filled_gallons}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuelStop {
    /// Station the vehicle stops at.
    pub location: StopLocation,
    /// Price per gallon, rounded to three decimals.
    pub price_per_gallon: f64,
    /// Cost of the fill, rounded to two decimals.
    pub fuel_cost: f64,
    /// Gallons bought, rounded to two decimals.
    pub filled_gallons: f64,
}

impl FuelStop {
    /// Record a purchase of `gallons` at `station`.
    ///
    /// Cost is computed from the unrounded gallons and price, then every
    /// field is rounded for output.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fuelstop_core::{FuelStop, Station};
    ///
    /// let station = Station::new("Flying J", Coord { x: -97.0, y: 35.0 }, 3.0);
    /// let stop = FuelStop::purchase(&station, 50.0);
    /// assert_eq!(stop.fuel_cost, 150.0);
    /// assert_eq!(stop.location.name, "Flying J");
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "cost is gallons times price")]
    pub fn purchase(station: &Station, gallons: f64) -> Self {
        let cost = gallons * station.price_per_gallon;
        Self {
            location: StopLocation {
                name: station.name.clone(),
                lat: station.latitude(),
                lng: station.longitude(),
            },
            price_per_gallon: round_to(station.price_per_gallon, PRICE_DECIMALS),
            fuel_cost: round_to(cost, AMOUNT_DECIMALS),
            filled_gallons: round_to(gallons, AMOUNT_DECIMALS),
        }
    }
}

/// Ordered stops plus the total cost of all fills.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuelPlan {
    /// Stops in travel order.
    pub stops: Vec<FuelStop>,
    /// Sum of the stops' rounded costs, rounded to two decimals.
    pub total_cost: f64,
}

impl FuelPlan {
    /// A plan with no stops and zero cost.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Build a plan from emitted stops, totalling their rounded costs.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fuelstop_core::{FuelPlan, FuelStop, Station};
    ///
    /// let cheap = Station::new("A", Coord { x: 0.0, y: 0.0 }, 2.999);
    /// let dear = Station::new("B", Coord { x: 1.0, y: 0.0 }, 3.499);
    /// let plan = FuelPlan::from_stops(vec![
    ///     FuelStop::purchase(&cheap, 10.0),
    ///     FuelStop::purchase(&dear, 10.0),
    /// ]);
    /// assert_eq!(plan.total_cost, 64.98);
    /// ```
    #[must_use]
    pub fn from_stops(stops: Vec<FuelStop>) -> Self {
        let total: f64 = stops.iter().map(|stop| stop.fuel_cost).sum();
        Self {
            total_cost: round_to(total, AMOUNT_DECIMALS),
            stops,
        }
    }

    /// Whether the plan has no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
