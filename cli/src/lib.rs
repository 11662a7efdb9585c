use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

use lookup::violations::{BasicLookups, DataSource};
use lookup::{
    Lookup, LookupConfig, PriorityQueue, Result, StaticSource, VehicleReport, ViolationSource,
};

/// What to look up and where the records come from.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub open_parking: Vec<PathBuf>,
    pub fiscal_year: Vec<PathBuf>,
    pub config: LookupConfig,
    pub identifiers: Vec<String>,
}

pub async fn run(options: Options) -> Result<Vec<VehicleReport>> {
    let mut sources: Vec<Arc<dyn ViolationSource>> = vec![];
    for path in &options.open_parking {
        let data_source = DataSource::open_parking_and_camera(path.display().to_string());
        sources.push(Arc::new(StaticSource::from_json_file(data_source, path).await?));
    }
    for path in &options.fiscal_year {
        let data_source = DataSource::fiscal_year(path.display().to_string());
        sources.push(Arc::new(StaticSource::from_json_file(data_source, path).await?));
    }
    if sources.is_empty() {
        info!("No record files given, every lookup will come back empty");
    }

    debug!("Using {:?}", options.config);
    let queue = PriorityQueue::new(options.config.max_concurrent_tasks);
    let lookup = Lookup::new(sources, Arc::new(BasicLookups), queue);

    Ok(lookup
        .lookup_vehicles(&options.identifiers, options.config.default_priority)
        .await)
}
