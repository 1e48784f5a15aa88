//! Test helpers for writing plan inputs to disk.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::{Route, Waypoint};
use fuelstop_data::PROVIDER_METRES_PER_MILE;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// Start of every synthetic route, near Dallas.
const START: Waypoint = Waypoint { x: -97.0, y: 32.0 };
const MILES_PER_DEGREE: f64 = 69.0;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Positions every ten miles due north of [`START`].
pub(super) fn corridor(miles: u32) -> Vec<Waypoint> {
    (0..=miles / 10)
        .map(|step| Waypoint {
            x: START.x,
            y: START.y + f64::from(step * 10) / MILES_PER_DEGREE,
        })
        .collect()
}

/// First corridor position at which the geodesic walk reaches `miles`.
pub(super) fn position_after(corridor: &[Waypoint], miles: f64) -> Waypoint {
    let route = Route::from_waypoints(corridor.to_vec());
    let mut walked = 0.0;
    route
        .segments()
        .find(|segment| {
            walked += segment.miles;
            walked >= miles
        })
        .map(|segment| segment.end)
        .expect("corridor is long enough")
}

/// A GeoJSON directions document for `corridor`, reporting `miles` driven.
pub(super) fn route_document(corridor: &[Waypoint], miles: f64) -> String {
    let coordinates: Vec<[f64; 2]> = corridor.iter().map(|c| [c.x, c.y]).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": { "summary": { "distance": miles * PROVIDER_METRES_PER_MILE } }
        }]
    })
    .to_string()
}

/// A catalog CSV with one station per `(name, price, position)` entry.
pub(super) fn catalog_document(stations: &[(&str, f64, Waypoint)]) -> String {
    let mut csv = String::from("OPIS Truckstop ID,Truckstop Name,City,State,Retail Price,latitude,longitude\n");
    for (id, (name, price, position)) in stations.iter().enumerate() {
        csv.push_str(&format!(
            "{id},{name},Somewhere,TX,{price},{},{}\n",
            position.y, position.x
        ));
    }
    csv
}

/// Catalog and route files for a 600 mile trip with one station where the
/// default range runs out.
pub(super) struct PlanInputs {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) catalog: Utf8PathBuf,
    pub(super) route: Utf8PathBuf,
}

impl PlanInputs {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let catalog = root.join("stations.csv");
        let route = root.join("route.geojson");

        let line = corridor(600);
        let midway = position_after(&line, 500.0);
        write_utf8(
            &catalog,
            catalog_document(&[
                ("Midway Truck Plaza", 3.0, midway),
                ("Gulf Coast Fuel", 2.5, Waypoint { x: -95.4, y: 29.8 }),
            ])
            .as_bytes(),
        );
        write_utf8(&route, route_document(&line, 600.0).as_bytes());

        Self {
            _dir: dir,
            root,
            catalog,
            route,
        }
    }

    /// Arguments naming both inputs and nothing else.
    pub(super) fn args(&self) -> PlanArgs {
        PlanArgs {
            catalog: Some(self.catalog.clone()),
            route: Some(self.route.clone()),
            ..PlanArgs::default()
        }
    }

    /// Resolved configuration with default vehicle options.
    pub(super) fn config(&self) -> PlanConfig {
        PlanConfig::try_from(self.args()).expect("config should build")
    }
}
