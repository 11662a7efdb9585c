pub mod config;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod source;

pub use crate::config::LookupConfig;
pub use error::{LookupError, QueueError, Result};
pub use pipeline::{Lookup, VehicleReport, vehicles_from_query};
pub use queue::{Priority, PriorityQueue, TaskHandle};
pub use source::{StaticSource, ViolationSource};
pub use violations;
