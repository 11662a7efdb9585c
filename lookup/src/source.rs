use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;

use violations::raw::{FiscalYearRecord, OpenParkingAndCameraRecord};
use violations::{DataSource, RawViolation, SourceKind, Vehicle};

use crate::error::Result;

/// One upstream violation dataset.
#[async_trait]
pub trait ViolationSource: Send + Sync {
    fn data_source(&self) -> &DataSource;

    async fn fetch(&self, vehicle: &Vehicle) -> Result<Vec<RawViolation>>;
}

/// A dataset held in memory, e.g. an export loaded from disk.
pub struct StaticSource {
    data_source: DataSource,
    records: Vec<RawViolation>,
}

impl StaticSource {
    pub fn new(data_source: DataSource, records: Vec<RawViolation>) -> Self {
        StaticSource {
            data_source,
            records,
        }
    }

    /// Loads a JSON array of records shaped like `data_source`'s rows.
    pub async fn from_json_file(data_source: DataSource, path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let records: Vec<RawViolation> = match data_source.kind {
            SourceKind::OpenParkingAndCamera => {
                serde_json::from_str::<Vec<OpenParkingAndCameraRecord>>(&contents)?
                    .into_iter()
                    .map(RawViolation::OpenParkingAndCamera)
                    .collect()
            }
            SourceKind::FiscalYear => serde_json::from_str::<Vec<FiscalYearRecord>>(&contents)?
                .into_iter()
                .map(RawViolation::FiscalYear)
                .collect(),
        };
        info!(
            "Loaded {} records for {} from {}",
            records.len(),
            data_source.endpoint,
            path.as_ref().display()
        );
        Ok(StaticSource::new(data_source, records))
    }
}

fn matches_vehicle(record: &RawViolation, vehicle: &Vehicle) -> bool {
    if !record.plate().trim().eq_ignore_ascii_case(&vehicle.plate) {
        return false;
    }
    if let Some(state) = record.state()
        && !state.trim().eq_ignore_ascii_case(&vehicle.state)
    {
        return false;
    }
    match (&vehicle.types, record.plate_type()) {
        (Some(types), Some(plate_type)) => types
            .split(',')
            .any(|t| t.eq_ignore_ascii_case(plate_type.trim())),
        _ => true,
    }
}

#[async_trait]
impl ViolationSource for StaticSource {
    fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    async fn fetch(&self, vehicle: &Vehicle) -> Result<Vec<RawViolation>> {
        let found: Vec<RawViolation> = self
            .records
            .iter()
            .filter(|r| matches_vehicle(r, vehicle))
            .cloned()
            .collect();
        debug!(
            "{} has {} records for {}:{}",
            self.data_source.endpoint,
            found.len(),
            vehicle.plate,
            vehicle.state
        );
        Ok(found)
    }
}
