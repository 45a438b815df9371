//! Room configuration types
//!
//! The input to one pricing calculation: dimensions, interior finish toggles,
//! electrical counts, door type, window counts, and cladding choices. Valid
//! ranges (3-8m length, 2.5-6m depth) are enforced by the configurator UI;
//! the engine accepts any finite positive values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Door options from the door catalog. Each type carries a fixed physical
/// width that feeds the front-wall geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DoorType {
    UpvcFrench180,
    UpvcFrench240,
    UpvcSliding200,
    AluSliding200,
    AluBifold200,
    AluBifold300,
    UpvcSliding400,
    /// Unrecognized door key from a stale client. Priced at zero and given
    /// the default 2.0m width; never an error.
    #[serde(other)]
    Unknown,
}

impl DoorType {
    /// Door leaf width in meters.
    pub fn width(&self) -> Decimal {
        match self {
            Self::UpvcFrench180 => dec!(1.8),
            Self::UpvcFrench240 => dec!(2.4),
            Self::UpvcSliding200 | Self::AluSliding200 | Self::AluBifold200 => dec!(2.0),
            Self::AluBifold300 => dec!(3.0),
            Self::UpvcSliding400 => dec!(4.0),
            Self::Unknown => dec!(2.0),
        }
    }

    /// Catalog item key under the `doors` category.
    pub fn catalog_item(&self) -> &'static str {
        match self {
            Self::UpvcFrench180 => "upvc_french_180",
            Self::UpvcFrench240 => "upvc_french_240",
            Self::UpvcSliding200 => "upvc_sliding_200",
            Self::AluSliding200 => "alu_sliding_200",
            Self::AluBifold200 => "alu_bifold_200",
            Self::AluBifold300 => "alu_bifold_300",
            Self::UpvcSliding400 => "upvc_sliding_400",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_catalog_item(item: &str) -> Option<Self> {
        match item {
            "upvc_french_180" => Some(Self::UpvcFrench180),
            "upvc_french_240" => Some(Self::UpvcFrench240),
            "upvc_sliding_200" => Some(Self::UpvcSliding200),
            "alu_sliding_200" => Some(Self::AluSliding200),
            "alu_bifold_200" => Some(Self::AluBifold200),
            "alu_bifold_300" => Some(Self::AluBifold300),
            "upvc_sliding_400" => Some(Self::UpvcSliding400),
            _ => None,
        }
    }
}

impl Default for DoorType {
    fn default() -> Self {
        Self::UpvcFrench180
    }
}

/// Exterior wall finish. Metal is only offered on the side/rear walls; a
/// metal front cladding selection contributes zero cost (business rule, not
/// a type-level restriction).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CladdingMaterial {
    Composite,
    Cedar,
    Metal,
    #[serde(other)]
    Unknown,
}

impl Default for CladdingMaterial {
    fn default() -> Self {
        Self::Composite
    }
}

/// One room configuration, immutable per calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfiguration {
    /// Meters.
    pub length: Decimal,
    /// Meters.
    pub depth: Decimal,
    #[serde(default)]
    pub laminated_floor: bool,
    #[serde(default)]
    pub skimmed_finish: bool,
    #[serde(default)]
    pub ceiling_lights: u32,
    #[serde(default)]
    pub double_sockets: u32,
    #[serde(default)]
    pub door_type: DoorType,
    #[serde(default)]
    pub alu_windows: u32,
    #[serde(default)]
    pub upvc_windows: u32,
    #[serde(default)]
    pub roof_windows: u32,
    #[serde(default)]
    pub front_cladding: CladdingMaterial,
    #[serde(default)]
    pub side_rear_cladding: CladdingMaterial,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_type_round_trips_through_catalog_keys() {
        for door in [
            DoorType::UpvcFrench180,
            DoorType::UpvcFrench240,
            DoorType::UpvcSliding200,
            DoorType::AluSliding200,
            DoorType::AluBifold200,
            DoorType::AluBifold300,
            DoorType::UpvcSliding400,
        ] {
            assert_eq!(DoorType::from_catalog_item(door.catalog_item()), Some(door));
        }
    }

    #[test]
    fn unknown_door_key_deserializes_to_fallback() {
        let door: DoorType = serde_json::from_str("\"oak_barn_500\"").unwrap();
        assert_eq!(door, DoorType::Unknown);
        assert_eq!(door.width(), dec!(2.0));
    }

    #[test]
    fn cladding_deserializes_snake_case() {
        let m: CladdingMaterial = serde_json::from_str("\"metal\"").unwrap();
        assert_eq!(m, CladdingMaterial::Metal);
        let u: CladdingMaterial = serde_json::from_str("\"thatch\"").unwrap();
        assert_eq!(u, CladdingMaterial::Unknown);
    }

    #[test]
    fn configuration_defaults_cover_optional_fields() {
        let config: RoomConfiguration =
            serde_json::from_str(r#"{"length": 4.0, "depth": 3.0}"#).unwrap();
        assert_eq!(config.length, dec!(4.0));
        assert!(!config.laminated_floor);
        assert_eq!(config.ceiling_lights, 0);
        assert_eq!(config.door_type, DoorType::UpvcFrench180);
        assert_eq!(config.front_cladding, CladdingMaterial::Composite);
    }
}
