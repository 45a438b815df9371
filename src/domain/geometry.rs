//! Area derivation
//!
//! Pure geometry for one room: floor, wall, roof, and door cut-out areas from
//! the configured length/depth and door type. Every area is rounded to 0.1m²
//! at the point of derivation and the rounded values feed every downstream
//! monetary formula — the rounding order is part of the pricing contract.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::configuration::DoorType;

/// Interior wall height, meters.
pub const WALL_HEIGHT: Decimal = dec!(2.4);
/// Roof eave overhang added to each plan dimension, meters.
pub const EAVE_OVERHANG: Decimal = dec!(0.8);
/// Door opening height, meters.
pub const DOOR_HEIGHT: Decimal = dec!(2.05);

/// Derived areas for one configuration, all in m² at 0.1 resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Areas {
    pub floor: Decimal,
    pub wall: Decimal,
    pub roof: Decimal,
    pub door: Decimal,
    /// Front wall net of the door opening. Not clamped: a very short room
    /// with a wide door yields a negative value, matching the quoted-price
    /// behavior the business signed off on.
    pub front_wall: Decimal,
    pub side_rear_wall: Decimal,
}

/// Round half away from zero to one decimal place.
fn round1(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive all areas for a room of `length` × `depth` meters with the given
/// door on the front wall.
pub fn derive_areas(length: Decimal, depth: Decimal, door_type: DoorType) -> Areas {
    let floor = round1(length * depth);
    let wall = round1(dec!(2) * length * WALL_HEIGHT + dec!(2) * depth * WALL_HEIGHT);
    let roof = round1((length + EAVE_OVERHANG) * (depth + EAVE_OVERHANG));

    let door = round1(door_type.width() * DOOR_HEIGHT);
    let front_wall = round1(length * WALL_HEIGHT - door);
    let side_rear_wall = round1(wall - length * WALL_HEIGHT);

    Areas {
        floor,
        wall,
        roof,
        door,
        front_wall,
        side_rear_wall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_by_three_room() {
        let areas = derive_areas(dec!(4), dec!(3), DoorType::UpvcSliding200);
        assert_eq!(areas.floor, dec!(12.0));
        assert_eq!(areas.wall, dec!(33.6));
        // (4.8 * 3.8) = 18.24 -> 18.2
        assert_eq!(areas.roof, dec!(18.2));
        // 2.0m door: 2.0 * 2.05 = 4.1
        assert_eq!(areas.door, dec!(4.1));
        // 4 * 2.4 - 4.1 = 5.5
        assert_eq!(areas.front_wall, dec!(5.5));
        assert_eq!(areas.side_rear_wall, dec!(24.0));
    }

    #[test]
    fn narrow_french_door_area() {
        let areas = derive_areas(dec!(4), dec!(3), DoorType::UpvcFrench180);
        // 1.8 * 2.05 = 3.69 -> 3.7
        assert_eq!(areas.door, dec!(3.7));
        assert_eq!(areas.front_wall, dec!(5.9));
    }

    #[test]
    fn unknown_door_gets_default_width() {
        let areas = derive_areas(dec!(4), dec!(3), DoorType::Unknown);
        assert_eq!(areas.door, dec!(4.1));
    }

    #[test]
    fn front_wall_can_go_negative_for_short_rooms() {
        // 1m front wall (2.4m²) against a 4m sliding door (8.2m²).
        let areas = derive_areas(dec!(1), dec!(3), DoorType::UpvcSliding400);
        assert_eq!(areas.front_wall, dec!(-5.8));
    }

    #[test]
    fn areas_are_monotone_in_dimensions() {
        let base = derive_areas(dec!(4), dec!(3), DoorType::UpvcSliding200);
        let longer = derive_areas(dec!(4.5), dec!(3), DoorType::UpvcSliding200);
        let deeper = derive_areas(dec!(4), dec!(3.5), DoorType::UpvcSliding200);
        for bigger in [longer, deeper] {
            assert!(bigger.floor >= base.floor);
            assert!(bigger.wall >= base.wall);
            assert!(bigger.roof >= base.roof);
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 3.5 * 3.3 = 11.55 -> 11.6
        let areas = derive_areas(dec!(3.5), dec!(3.3), DoorType::UpvcSliding200);
        assert_eq!(areas.floor, dec!(11.6));
    }
}
