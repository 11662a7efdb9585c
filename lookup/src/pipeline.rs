use futures::future::join_all;
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;

use violations::{
    CameraData, FineData, FrequencyData, Lookups, PotentialVehicle, Violation,
    aggregate_camera_streaks, aggregate_fines, aggregate_frequency, merge_violations,
    normalize_violation, parse_vehicle_identifier,
};

use crate::error::{LookupError, Result};
use crate::queue::{Priority, PriorityQueue};
use crate::source::ViolationSource;

/// Everything known about one requested vehicle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleReport {
    pub vehicle: PotentialVehicle,
    pub violations: Vec<Violation>,
    pub fines: FineData,
    pub frequency: FrequencyData,
    pub camera_streaks: CameraData,
    /// Endpoints whose fetch failed; their records are missing.
    pub failed_sources: Vec<String>,
}

impl VehicleReport {
    fn new(vehicle: PotentialVehicle, violations: Vec<Violation>, failed: Vec<String>) -> Self {
        VehicleReport {
            fines: aggregate_fines(&violations),
            frequency: aggregate_frequency(&violations),
            camera_streaks: aggregate_camera_streaks(&violations),
            vehicle,
            violations,
            failed_sources: failed,
        }
    }
}

pub struct Lookup {
    sources: Vec<Arc<dyn ViolationSource>>,
    lookups: Arc<dyn Lookups>,
    queue: PriorityQueue,
}

impl Lookup {
    pub fn new(
        sources: Vec<Arc<dyn ViolationSource>>,
        lookups: Arc<dyn Lookups>,
        queue: PriorityQueue,
    ) -> Self {
        Lookup {
            sources,
            lookups,
            queue,
        }
    }

    /// Looks up every identifier, returning reports in input order.
    pub async fn lookup_vehicles<S: AsRef<str>>(
        &self,
        identifiers: &[S],
        priority: Priority,
    ) -> Vec<VehicleReport> {
        let vehicles = identifiers
            .iter()
            .map(|identifier| parse_vehicle_identifier(identifier.as_ref()));
        join_all(vehicles.map(|vehicle| self.lookup_vehicle(vehicle, priority))).await
    }

    /// The legacy `plate`/`state`/`plate_types` query form.
    pub async fn lookup_query(
        &self,
        plates: &[String],
        states: &[String],
        plate_types: Option<&str>,
        priority: Priority,
    ) -> Result<Vec<VehicleReport>> {
        let vehicles = vehicles_from_query(plates, states, plate_types)?;
        Ok(join_all(
            vehicles
                .into_iter()
                .map(|vehicle| self.lookup_vehicle(vehicle, priority)),
        )
        .await)
    }

    /// Fetches from every source through the queue, then normalizes,
    /// merges and summarizes. Invalid vehicles are reported without a fetch.
    pub async fn lookup_vehicle(
        &self,
        vehicle: PotentialVehicle,
        priority: Priority,
    ) -> VehicleReport {
        let Some(valid) = vehicle.vehicle().cloned() else {
            info!("Skipping invalid vehicle {:?}", vehicle.original_string());
            return VehicleReport::new(vehicle, vec![], vec![]);
        };
        info!(
            "Looking up {}:{} in {} sources",
            valid.plate,
            valid.state,
            self.sources.len()
        );

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let data_source = source.data_source().clone();
                let valid = valid.clone();
                let handle = self
                    .queue
                    .add(async move { source.fetch(&valid).await }, priority);
                (data_source, handle)
            })
            .collect();

        let mut violations = vec![];
        let mut failed = vec![];
        for (data_source, handle) in handles {
            let fetched = handle.await.map_err(LookupError::from).and_then(|r| r);
            match fetched {
                Ok(records) => violations.extend(
                    records
                        .iter()
                        .map(|raw| normalize_violation(raw, &data_source, self.lookups.as_ref())),
                ),
                Err(e) => {
                    error!("Fetching {} failed: {}", data_source.endpoint, e);
                    failed.push(data_source.endpoint);
                }
            }
        }

        let violations = merge_violations(violations);
        info!(
            "Found {} violations for {}:{}",
            violations.len(),
            valid.plate,
            valid.state
        );
        VehicleReport::new(vehicle, violations, failed)
    }
}

/// Builds vehicles from the legacy query fields. Only a single plate and
/// state is supported; several values is a caller error.
pub fn vehicles_from_query(
    plates: &[String],
    states: &[String],
    plate_types: Option<&str>,
) -> Result<Vec<PotentialVehicle>> {
    match (plates, states) {
        ([], _) | (_, []) => Ok(vec![]),
        ([plate], [state]) => {
            let identifier = match plate_types.map(str::trim) {
                Some(types) if !types.is_empty() => format!("{plate}:{state}:{types}"),
                _ => format!("{plate}:{state}"),
            };
            Ok(vec![parse_vehicle_identifier(&identifier)])
        }
        _ => Err(LookupError::LegacyMultiValueQuery {
            plates: plates.len(),
            states: states.len(),
        }),
    }
}
