use log::debug;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeSet;

use crate::codes::{is_plate_type_code, is_region_code};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Vehicle {
    pub plate: String,
    pub state: String,
    /// Sorted, de-duplicated, comma-joined plate type codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
}

/// The outcome of parsing one user-supplied `plate:state[:types]` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PotentialVehicle {
    Valid {
        original_string: String,
        vehicle: Vehicle,
    },
    Invalid {
        original_string: String,
    },
}

impl PotentialVehicle {
    pub fn original_string(&self) -> &str {
        match self {
            PotentialVehicle::Valid {
                original_string, ..
            }
            | PotentialVehicle::Invalid { original_string } => original_string,
        }
    }

    pub fn valid_plate(&self) -> bool {
        matches!(self, PotentialVehicle::Valid { .. })
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            PotentialVehicle::Valid { vehicle, .. } => Some(vehicle),
            PotentialVehicle::Invalid { .. } => None,
        }
    }
}

impl Serialize for PotentialVehicle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PotentialVehicle::Valid {
                original_string,
                vehicle,
            } => {
                let mut s = serializer.serialize_struct("PotentialVehicle", 5)?;
                s.serialize_field("originalString", original_string)?;
                s.serialize_field("plate", &vehicle.plate)?;
                s.serialize_field("state", &vehicle.state)?;
                if let Some(types) = &vehicle.types {
                    s.serialize_field("types", types)?;
                } else {
                    s.skip_field("types")?;
                }
                s.serialize_field("validPlate", &true)?;
                s.end()
            }
            PotentialVehicle::Invalid { original_string } => {
                let mut s = serializer.serialize_struct("PotentialVehicle", 2)?;
                s.serialize_field("originalString", original_string)?;
                s.serialize_field("validPlate", &false)?;
                s.end()
            }
        }
    }
}

/// Parses a colon separated vehicle identifier. Never fails: anything that
/// is not a recognisable plate comes back as `PotentialVehicle::Invalid`.
pub fn parse_vehicle_identifier(input: &str) -> PotentialVehicle {
    let original_string = input.to_string();
    match parse_parts(input) {
        Some(vehicle) => {
            debug!("Parsed {:?} as {:?}", input, vehicle);
            PotentialVehicle::Valid {
                original_string,
                vehicle,
            }
        }
        None => {
            debug!("Could not parse {:?} as a vehicle", input);
            PotentialVehicle::Invalid { original_string }
        }
    }
}

fn parse_parts(input: &str) -> Option<Vehicle> {
    let upper = input.trim().to_uppercase();
    let parts: Vec<&str> = upper.split(':').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    match parts.as_slice() {
        [first, second] => parse_plate_and_state(first, second),
        [first, second, third] => parse_plate_state_and_types([first, second, third]),
        _ => None,
    }
}

fn parse_plate_and_state(first: &str, second: &str) -> Option<Vehicle> {
    match (is_region_code(first), is_region_code(second)) {
        (true, false) => Some(Vehicle {
            plate: second.to_string(),
            state: first.to_string(),
            types: None,
        }),
        (false, true) => Some(Vehicle {
            plate: first.to_string(),
            state: second.to_string(),
            types: None,
        }),
        _ => None,
    }
}

fn parse_plate_state_and_types(parts: [&str; 3]) -> Option<Vehicle> {
    let state_index = parts.iter().position(|p| is_region_code(p))?;

    let type_indexes: Vec<usize> = (0..parts.len())
        .filter(|&i| contains_plate_type(parts[i]))
        .collect();
    // A comma marks the part that is meant to be the type list
    let types_index = type_indexes
        .iter()
        .copied()
        .find(|&i| parts[i].contains(','))
        .or_else(|| type_indexes.first().copied())?;

    if types_index == state_index {
        return None;
    }
    let plate_index = (0..parts.len()).find(|&i| i != state_index && i != types_index)?;

    Some(Vehicle {
        plate: parts[plate_index].to_string(),
        state: parts[state_index].to_string(),
        types: Some(normalize_types(parts[types_index])),
    })
}

fn contains_plate_type(part: &str) -> bool {
    part.split(',').any(|token| is_plate_type_code(token.trim()))
}

fn normalize_types(part: &str) -> String {
    let types: BTreeSet<&str> = part
        .split(',')
        .map(str::trim)
        .filter(|token| is_plate_type_code(token))
        .collect();
    types.into_iter().collect::<Vec<_>>().join(",")
}
