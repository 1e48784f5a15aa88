//! The greedy walk over a route's segments.
//!
//! The walk is a fold: each segment adds its length to the distance carried
//! since the last stop, and a trigger point either emits a stop and resets
//! that distance or records a skip and carries it forward.

use std::collections::HashSet;

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FuelStop, Segment, StationLookup, VehicleProfile};

/// What happened at a trigger point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum TriggerOutcome {
    /// A station was selected and the carried distance was reset.
    Refuelled {
        /// Waypoint index the search ran at.
        waypoint: usize,
        /// Miles driven since the previous stop.
        carried_miles: f64,
        /// Stations inside the search radius before deduplication.
        candidates: usize,
        /// Name of the selected station.
        station: String,
    },
    /// No unused station was in range; the distance carries forward.
    Skipped {
        /// Waypoint index the search ran at.
        waypoint: usize,
        /// Miles driven since the previous stop, still outstanding.
        carried_miles: f64,
        /// Stations inside the search radius before deduplication.
        candidates: usize,
    },
}

impl TriggerOutcome {
    /// Waypoint index the search ran at.
    #[must_use]
    pub const fn waypoint(&self) -> usize {
        match self {
            Self::Refuelled { waypoint, .. } | Self::Skipped { waypoint, .. } => *waypoint,
        }
    }

    /// Whether the trigger was skipped for lack of candidates.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Fixed inputs shared by every step of one walk.
pub(crate) struct TraversalContext<'a, L: ?Sized> {
    pub(crate) profile: &'a VehicleProfile,
    pub(crate) lookup: &'a L,
    pub(crate) search_radius_degrees: f64,
    pub(crate) last_index: usize,
}

/// Per-call traversal state. Never shared between planning calls.
#[derive(Debug, Default)]
pub(crate) struct Traversal {
    carried_miles: f64,
    seen: HashSet<String>,
    stops: Vec<FuelStop>,
    triggers: Vec<TriggerOutcome>,
}

impl Traversal {
    /// Advance over one segment, searching for fuel if it ends at a trigger
    /// point.
    #[expect(clippy::float_arithmetic, reason = "accumulating segment miles")]
    pub(crate) fn advance<L>(mut self, segment: Segment, context: &TraversalContext<'_, L>) -> Self
    where
        L: StationLookup + ?Sized,
    {
        self.carried_miles += segment.miles;
        let at_range = self.carried_miles >= context.profile.range_miles;
        if at_range || segment.end_index == context.last_index {
            self.search(segment, context);
        }
        self
    }

    fn search<L>(&mut self, segment: Segment, context: &TraversalContext<'_, L>)
    where
        L: StationLookup + ?Sized,
    {
        let candidates = context
            .lookup
            .stations_within(segment.end, context.search_radius_degrees);
        let candidate_count = candidates.len();
        // `min_by` keeps the first of equal prices, so catalog order breaks ties.
        let best = candidates
            .into_iter()
            .filter(|station| !self.seen.contains(&station.name))
            .min_by(|lhs, rhs| lhs.price_per_gallon.total_cmp(&rhs.price_per_gallon));

        let Some(station) = best else {
            if self.carried_miles > context.profile.range_miles {
                warn!(
                    "No unused station within {} degrees of waypoint {}; carrying {:.1} miles, beyond the {:.1} mile range",
                    context.search_radius_degrees,
                    segment.end_index,
                    self.carried_miles,
                    context.profile.range_miles
                );
            } else {
                debug!(
                    "No unused station near waypoint {}; carrying {:.1} miles",
                    segment.end_index, self.carried_miles
                );
            }
            self.triggers.push(TriggerOutcome::Skipped {
                waypoint: segment.end_index,
                carried_miles: self.carried_miles,
                candidates: candidate_count,
            });
            return;
        };

        let gallons = context.profile.gallons_to_fill(self.carried_miles);
        let stop = FuelStop::purchase(station, gallons);
        debug!(
            "Refuelling at {:?} (waypoint {}) after {:.1} miles: {:.2} gal for ${:.2}",
            station.name, segment.end_index, self.carried_miles, stop.filled_gallons, stop.fuel_cost
        );
        self.seen.insert(station.name.clone());
        self.triggers.push(TriggerOutcome::Refuelled {
            waypoint: segment.end_index,
            carried_miles: self.carried_miles,
            candidates: candidate_count,
            station: station.name.clone(),
        });
        self.stops.push(stop);
        self.carried_miles = 0.0;
    }

    /// Consume the walk, yielding the emitted stops and trigger log.
    pub(crate) fn finish(self) -> (Vec<FuelStop>, Vec<TriggerOutcome>) {
        (self.stops, self.triggers)
    }
}
