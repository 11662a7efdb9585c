//! Parking and camera violation history for a vehicle: plate parsing, raw
//! record normalization, cross-dataset de-duplication and the derived
//! fine, frequency and camera streak statistics.

pub mod address;
pub mod codes;
pub mod fines;
pub mod frequency;
pub mod lookups;
pub mod merge;
pub mod normalize;
pub mod raw;
pub mod streaks;
pub mod vehicle;
pub mod violation;

pub use address::{normalize_address, normalize_address_with};
pub use fines::{FineData, aggregate_fines};
pub use frequency::{FrequencyData, aggregate_frequency};
pub use lookups::{BasicLookups, Lookups};
pub use merge::merge_violations;
pub use normalize::normalize_violation;
pub use raw::RawViolation;
pub use streaks::{CameraData, CameraStreakData, aggregate_camera_streaks};
pub use vehicle::{PotentialVehicle, Vehicle, parse_vehicle_identifier};
pub use violation::{Borough, DataSource, SourceKind, Violation, ViolationType};
