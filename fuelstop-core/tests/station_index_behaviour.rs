//! Behavioural tests for building and querying the station index.

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

use fuelstop_core::{RawStation, StationIndex};

const CITY_CENTRE: Coord<f64> = Coord {
    x: -101.831,
    y: 35.222,
};

#[derive(Default)]
struct IndexWorld {
    catalog: RefCell<Vec<RawStation>>,
    index: RefCell<Option<StationIndex>>,
    names: RefCell<Vec<String>>,
}

impl IndexWorld {
    fn ensure_index(&self) {
        if self.index.borrow().is_some() {
            return;
        }
        let built = StationIndex::build(self.catalog.borrow().clone()).expect("index builds");
        self.index.replace(Some(built));
    }
}

#[fixture]
fn world() -> IndexWorld {
    IndexWorld::default()
}

#[given("a catalog with three stations around Amarillo")]
fn given_amarillo(world: &IndexWorld) {
    world.catalog.replace(vec![
        RawStation::new("Eastside", 35.222, -101.70, 3.19),
        RawStation::new("Canyon", 34.98, -101.92, 2.99),
        RawStation::new("Downtown", 35.222, -101.831, 3.29),
    ]);
}

#[given("a catalog containing rows with missing and non-finite coordinates")]
fn given_dirty_catalog(world: &IndexWorld) {
    world.catalog.replace(vec![
        RawStation {
            name: "No Position".to_owned(),
            price_per_gallon: Some(3.1),
            ..RawStation::default()
        },
        RawStation::new("Lost", f64::NAN, -101.0, 3.2),
        RawStation::new("Far Away", 35.0, f64::INFINITY, 3.3),
        RawStation::new("Good", 35.0, -101.0, 3.4),
    ]);
}

#[given("an empty catalog")]
fn given_empty_catalog(world: &IndexWorld) {
    world.catalog.borrow_mut().clear();
}

#[when("I build the station index")]
fn when_build(world: &IndexWorld) {
    world.ensure_index();
}

#[when("I query {radius:f64} degrees around the city centre")]
fn when_query(world: &IndexWorld, radius: f64) {
    world.ensure_index();
    let index = world.index.borrow();
    let index = index.as_ref().expect("index built");
    let names = index
        .query(CITY_CENTRE, radius)
        .into_iter()
        .filter_map(|position| index.station(position))
        .map(|station| station.name.clone())
        .collect();
    world.names.replace(names);
}

#[then("the stations {names:word} are returned")]
fn then_named(world: &IndexWorld, names: String) {
    let expected: Vec<&str> = names.trim_matches('"').split(',').collect();
    assert_eq!(*world.names.borrow(), expected);
}

#[then("no stations are returned")]
fn then_none(world: &IndexWorld) {
    assert!(world.names.borrow().is_empty(), "expected no stations");
}

#[then("the index holds {count:usize} stations")]
fn then_len(world: &IndexWorld, count: usize) {
    let index = world.index.borrow();
    assert_eq!(index.as_ref().expect("index built").len(), count);
}

#[then("{count:usize} rows were rejected")]
fn then_rejected(world: &IndexWorld, count: usize) {
    let index = world.index.borrow();
    assert_eq!(index.as_ref().expect("index built").rejected_rows(), count);
}

#[scenario(path = "tests/features/station_index.feature", index = 0)]
fn scenario_catalog_order(world: IndexWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/station_index.feature", index = 1)]
fn scenario_dirty_rows(world: IndexWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/station_index.feature", index = 2)]
fn scenario_negative_radius(world: IndexWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/station_index.feature", index = 3)]
fn scenario_empty_catalog(world: IndexWorld) {
    let _ = world;
}
