//! Plan command implementation for the fuelstop CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fuelstop_core::{
    AMOUNT_DECIMALS, FuelPlan, FuelPlanner, FuelStop, PlannerConfig, StationIndex, VehicleProfile,
    round_to,
};
use fuelstop_data::{RouteThinning, read_catalog, read_route};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_CATALOG, ARG_MPG, ARG_NO_THINNING, ARG_RANGE_MILES, ARG_ROUTE, ARG_SEARCH_RADIUS,
    ARG_TANK_CAPACITY, CliError, ENV_CATALOG, ENV_ROUTE,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan fuel stops along a route. The station catalog is a \
                 geocoded CSV and the route is a routing provider's GeoJSON \
                 directions response. Paths and vehicle options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan the cheapest fuel stops for a route"
)]
#[ortho_config(prefix = "FUELSTOP")]
pub(crate) struct PlanArgs {
    /// Path to the geocoded station catalog CSV.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Path to the GeoJSON route.
    #[arg(long = ARG_ROUTE, value_name = "path")]
    #[serde(default)]
    pub(crate) route: Option<Utf8PathBuf>,
    /// Miles the vehicle may travel between stops (default 500).
    #[arg(long = ARG_RANGE_MILES, value_name = "miles")]
    #[serde(default)]
    pub(crate) range_miles: Option<f64>,
    /// Fuel efficiency in miles per gallon (default 10).
    #[arg(long = ARG_MPG, value_name = "mpg")]
    #[serde(default)]
    pub(crate) mpg: Option<f64>,
    /// Tank capacity in gallons (default 50).
    #[arg(long = ARG_TANK_CAPACITY, value_name = "gallons")]
    #[serde(default)]
    pub(crate) tank_capacity: Option<f64>,
    /// Station search radius in coordinate degrees (default 0.2).
    #[arg(long = ARG_SEARCH_RADIUS, value_name = "degrees")]
    #[serde(default)]
    pub(crate) search_radius: Option<f64>,
    /// Keep every route position instead of thinning long polylines.
    #[arg(
        long = ARG_NO_THINNING,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) no_thinning: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the station catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Path to the route.
    pub(crate) route: Utf8PathBuf,
    /// Vehicle parameters.
    pub(crate) profile: VehicleProfile,
    /// Planner tuning.
    pub(crate) planner: PlannerConfig,
    /// Polyline thinning, or `None` to keep every position.
    pub(crate) thinning: Option<RouteThinning>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog, ARG_CATALOG)?;
        Self::require_existing(&self.route, ARG_ROUTE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fuelstop_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let route = args.route.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: ENV_ROUTE,
        })?;

        let defaults = VehicleProfile::default();
        let profile = VehicleProfile::new(
            args.range_miles.unwrap_or(defaults.range_miles),
            args.mpg.unwrap_or(defaults.mpg),
            args.tank_capacity.unwrap_or(defaults.tank_capacity_gallons),
        )?;

        let mut planner = PlannerConfig::default();
        if let Some(radius) = args.search_radius {
            planner.search_radius_degrees = radius;
        }

        let thinning = if args.no_thinning.unwrap_or(false) {
            None
        } else {
            Some(RouteThinning::default())
        };

        Ok(Self {
            catalog,
            route,
            profile,
            planner,
            thinning,
        })
    }
}

/// JSON document written by the `plan` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    /// Route length in miles, rounded to cents precision.
    pub(crate) total_distance_miles: f64,
    /// Stops in travel order.
    pub(crate) fuel_stops: Vec<FuelStop>,
    /// Total spend across all stops.
    pub(crate) total_fuel_cost: f64,
}

impl PlanReport {
    fn new(route_miles: f64, plan: FuelPlan) -> Self {
        Self {
            total_distance_miles: round_to(route_miles, AMOUNT_DECIMALS),
            total_fuel_cost: plan.total_cost,
            fuel_stops: plan.stops,
        }
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let report = execute_plan(args)?;
    write_plan_report(writer, &report)
}

fn execute_plan(args: PlanArgs) -> Result<PlanReport, CliError> {
    let config = resolve_plan_config(args)?;
    plan_from_config(&config)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads both inputs named by `config` and plans the route.
pub(super) fn plan_from_config(config: &PlanConfig) -> Result<PlanReport, CliError> {
    let rows = read_catalog(&config.catalog).map_err(|source| CliError::LoadCatalog {
        path: config.catalog.clone(),
        source,
    })?;
    let index = StationIndex::build(rows)?;
    let route = read_route(&config.route, config.thinning).map_err(|source| {
        CliError::LoadRoute {
            path: config.route.clone(),
            source,
        }
    })?;

    let response = FuelPlanner::with_config(config.planner).plan(
        &route,
        &config.profile,
        &index,
    )?;
    let skipped = response
        .diagnostics
        .triggers
        .iter()
        .filter(|trigger| trigger.is_skipped())
        .count();
    info!(
        "Planned {} stops costing ${:.2} ({skipped} trigger points without an unused station)",
        response.plan.stops.len(),
        response.plan.total_cost
    );
    Ok(PlanReport::new(route.total_distance_miles(), response.plan))
}

fn write_plan_report(writer: &mut dyn Write, report: &PlanReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
