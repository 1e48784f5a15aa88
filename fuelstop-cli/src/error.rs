//! Error types emitted by the fuelstop CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fuelstop_core::{PlanError, StationIndexError, VehicleProfileError};
use fuelstop_data::{CatalogError, RouteFileError};
use thiserror::Error;

/// Errors emitted by the fuelstop CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The vehicle options do not describe a usable vehicle.
    #[error("invalid vehicle options: {0}")]
    InvalidProfile(#[from] VehicleProfileError),
    /// Reading the station catalog failed.
    #[error("failed to load station catalog from {path:?}: {source}")]
    LoadCatalog {
        path: Utf8PathBuf,
        #[source]
        source: CatalogError,
    },
    /// Building the station index failed.
    #[error("failed to index stations: {0}")]
    BuildIndex(#[from] StationIndexError),
    /// Reading the route failed.
    #[error("failed to load route from {path:?}: {source}")]
    LoadRoute {
        path: Utf8PathBuf,
        #[source]
        source: RouteFileError,
    },
    /// The planner rejected its inputs.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serialising the plan failed.
    #[error("failed to serialise fuel plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write fuel plan: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
