//! Reader for the geocoded station catalog CSV.
//!
//! The catalog carries one row per retailer with at least `latitude` and
//! `longitude` columns. Cells that are blank or do not parse become missing
//! values; [`fuelstop_core::StationIndex::build`] decides which rows survive.

use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::RawStation;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Header of the retailer name column.
pub const NAME_COLUMN: &str = "Truckstop Name";
/// Header of the retail price column.
pub const PRICE_COLUMN: &str = "Retail Price";
/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "latitude";
/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "longitude";

const REQUIRED_COLUMNS: [&str; 2] = [LATITUDE_COLUMN, LONGITUDE_COLUMN];

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "Truckstop Name", default)]
    name: String,
    #[serde(
        rename = "Retail Price",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
}

impl From<CatalogRecord> for RawStation {
    fn from(record: CatalogRecord) -> Self {
        Self {
            name: record.name,
            latitude: record.latitude,
            longitude: record.longitude,
            price_per_gallon: record.price,
        }
    }
}

/// Errors raised while reading a station catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("failed to open station catalog at {path}")]
    Open {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
        /// Path that was opened.
        path: Utf8PathBuf,
    },
    /// The header row could not be read.
    #[error("failed to read the station catalog header")]
    Header {
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// The header lacks a coordinate column.
    #[error("station catalog is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Required headers that were not found.
        missing: Vec<&'static str>,
    },
    /// A data row could not be decoded.
    #[error("malformed station catalog record at data row {row}")]
    Record {
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
        /// One-based data row, not counting the header.
        row: usize,
    },
}

/// Parse a catalog from any CSV reader, keeping rows in file order.
///
/// Only the coordinate columns are mandatory. A missing name or price column
/// yields empty names and missing prices, which index construction rejects.
///
/// # Examples
/// ```
/// use fuelstop_data::parse_catalog;
///
/// # fn main() -> Result<(), fuelstop_data::CatalogError> {
/// let csv = "Truckstop Name,Retail Price,latitude,longitude\n\
///            Big Rig Stop,3.199,35.2,-101.8\n\
///            Nowhere Fuel,,,\n";
/// let rows = parse_catalog(csv.as_bytes())?;
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].latitude, None);
/// # Ok(())
/// # }
/// ```
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<RawStation>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| CatalogError::Header { source })?;
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns { missing });
    }
    debug!("Catalog columns: {}", headers.iter().collect::<Vec<_>>().join(", "));

    csv_reader
        .deserialize::<CatalogRecord>()
        .enumerate()
        .map(|(index, record)| {
            record
                .map(RawStation::from)
                .map_err(|source| CatalogError::Record {
                    source,
                    row: index + 1,
                })
        })
        .collect()
}

/// Read a catalog from a UTF-8 path.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use fuelstop_data::read_catalog;
///
/// # fn main() -> Result<(), fuelstop_data::CatalogError> {
/// let rows = read_catalog(Utf8Path::new("data/fuel-prices-geocoded.csv"))?;
/// println!("Loaded {} rows", rows.len());
/// # Ok(())
/// # }
/// ```
pub fn read_catalog(path: &Utf8Path) -> Result<Vec<RawStation>, CatalogError> {
    let file = open_utf8_file(path).map_err(|source| CatalogError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let rows = parse_catalog(BufReader::new(file))?;
    info!("Read {} catalog rows from {path}", rows.len());
    Ok(rows)
}
