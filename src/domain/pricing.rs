//! Pricing engine
//!
//! The deterministic heart of the service: maps a room configuration plus a
//! price catalog snapshot to an itemized breakdown. Pure and infallible for
//! finite numeric input — unpriced catalog rows degrade to zero-cost line
//! items rather than errors.
//!
//! Rounding contract: areas arrive pre-rounded to 0.1m² from the geometry
//! deriver; every breakdown bucket is rounded to the penny BEFORE the
//! subtotal is summed, so `subtotal` is always the exact sum of the reported
//! buckets.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::catalog::{PriceCatalog, PriceKey};
use super::configuration::{CladdingMaterial, RoomConfiguration};
use super::geometry::{derive_areas, Areas};

/// UK VAT.
pub const VAT_RATE: Decimal = dec!(0.20);

/// Itemized cost buckets for one quote, each rounded to 2 decimal places.
/// `fixed_costs` is reported for transparency but is already folded into
/// `shell`; it is not an addend of `subtotal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub shell: Decimal,
    pub laminated_floor: Decimal,
    pub skimmed_finish: Decimal,
    pub electricals: Decimal,
    pub doors: Decimal,
    pub windows: Decimal,
    pub cladding: Decimal,
    pub fixed_costs: Decimal,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

/// Per-material cladding prices for every wall/material combination, so the
/// configurator can show "price if you chose X" without re-running the whole
/// calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CladdingCosts {
    pub front_composite: Decimal,
    pub front_cedar: Decimal,
    pub side_rear_composite: Decimal,
    pub side_rear_cedar: Decimal,
    pub side_rear_metal: Decimal,
}

/// Full output of one pricing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub areas: Areas,
    pub cladding_costs: CladdingCosts,
    pub breakdown: PriceBreakdown,
}

/// Round half away from zero to the penny.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Foundation tier for a floor area. Inclusive upper bounds: an area exactly
/// on a boundary takes the cheaper band.
fn foundation_tier(floor_area: Decimal) -> PriceKey {
    if floor_area <= dec!(9) {
        PriceKey::FoundationUpTo9
    } else if floor_area <= dec!(12) {
        PriceKey::FoundationUpTo12
    } else if floor_area <= dec!(16) {
        PriceKey::FoundationUpTo16
    } else if floor_area <= dec!(20) {
        PriceKey::FoundationUpTo20
    } else if floor_area <= dec!(25) {
        PriceKey::FoundationUpTo25
    } else if floor_area <= dec!(30) {
        PriceKey::FoundationUpTo30
    } else if floor_area <= dec!(35) {
        PriceKey::FoundationUpTo35
    } else {
        PriceKey::FoundationUpTo40
    }
}

/// Fascia tier. Deliberately coarser than the foundation bands: a distinct
/// business table over the same floor-area metric, not a simplification.
fn fascia_tier(floor_area: Decimal) -> PriceKey {
    if floor_area <= dec!(9) {
        PriceKey::FasciaUpTo9
    } else if floor_area <= dec!(12) {
        PriceKey::FasciaUpTo12
    } else if floor_area <= dec!(20) {
        PriceKey::FasciaUpTo20
    } else {
        PriceKey::FasciaUpTo30
    }
}

/// Cladding cost for the front wall. Metal is not offered on the front face;
/// it (and any unknown material) contributes zero.
fn front_cladding_cost(
    front_wall_area: Decimal,
    material: CladdingMaterial,
    catalog: &PriceCatalog,
) -> Decimal {
    match material {
        CladdingMaterial::Composite => front_wall_area * catalog.price(PriceKey::CladdingComposite),
        CladdingMaterial::Cedar => front_wall_area * catalog.price(PriceKey::CladdingCedar),
        CladdingMaterial::Metal | CladdingMaterial::Unknown => Decimal::ZERO,
    }
}

/// Cladding cost for the side and rear walls. Metal carries a fixed surcharge
/// on top of its per-m² rate.
fn side_rear_cladding_cost(
    side_rear_wall_area: Decimal,
    material: CladdingMaterial,
    catalog: &PriceCatalog,
) -> Decimal {
    match material {
        CladdingMaterial::Composite => {
            side_rear_wall_area * catalog.price(PriceKey::CladdingComposite)
        }
        CladdingMaterial::Cedar => side_rear_wall_area * catalog.price(PriceKey::CladdingCedar),
        CladdingMaterial::Metal => {
            side_rear_wall_area * catalog.price(PriceKey::CladdingMetalPerSqm)
                + catalog.price(PriceKey::CladdingMetalFixed)
        }
        CladdingMaterial::Unknown => Decimal::ZERO,
    }
}

/// Compute the full quotation for a configuration against a catalog snapshot.
pub fn calculate(config: &RoomConfiguration, catalog: &PriceCatalog) -> Quotation {
    let areas = derive_areas(config.length, config.depth, config.door_type);

    // Structural shell: tiered foundation, steel frame, decking, fascia, and
    // the unconditional fixed line items. The 3x/2x frame multipliers model
    // the structural member layout and must be reproduced exactly.
    let foundation = catalog.price(foundation_tier(areas.floor));
    let frame = (config.length * dec!(3) + config.depth * dec!(2))
        * catalog.price(PriceKey::SteelFramePerMeter)
        + catalog.price(PriceKey::SteelFrameFixed);
    let floor_deck = areas.floor * catalog.price(PriceKey::OsbFloorPerSqm);
    let wall_deck = areas.wall * catalog.price(PriceKey::OsbWallsPerSqm);
    let roof_deck = areas.roof * catalog.price(PriceKey::RoofPerSqm);
    let fascia = catalog.price(fascia_tier(areas.floor));
    let fixed_costs = catalog.price(PriceKey::SiteSurvey)
        + catalog.price(PriceKey::DesignFee)
        + catalog.price(PriceKey::Gutter)
        + catalog.price(PriceKey::WasteDisposal);
    let shell = foundation + frame + floor_deck + wall_deck + roof_deck + fascia + fixed_costs;

    let laminated_floor = if config.laminated_floor {
        areas.floor * catalog.price(PriceKey::LaminatedFloorPerSqm)
    } else {
        Decimal::ZERO
    };

    // Skim rate applies to walls plus the ceiling, which matches the floor
    // footprint.
    let skimmed_finish = if config.skimmed_finish {
        (areas.wall + areas.floor) * catalog.price(PriceKey::SkimmedFinishPerSqm)
    } else {
        Decimal::ZERO
    };

    // Consumer unit is charged once regardless of counts.
    let electricals = catalog.price(PriceKey::ConsumerUnit)
        + Decimal::from(config.ceiling_lights) * catalog.price(PriceKey::CeilingLight)
        + Decimal::from(config.double_sockets) * catalog.price(PriceKey::DoubleSocket);

    // Fitting is always added on top of the selected door.
    let doors =
        catalog.price(PriceKey::Door(config.door_type)) + catalog.price(PriceKey::DoorFitting);

    let windows = Decimal::from(config.alu_windows) * catalog.price(PriceKey::AluWindow)
        + Decimal::from(config.upvc_windows) * catalog.price(PriceKey::UpvcWindow)
        + Decimal::from(config.roof_windows) * catalog.price(PriceKey::RoofWindow);

    let cladding = front_cladding_cost(areas.front_wall, config.front_cladding, catalog)
        + side_rear_cladding_cost(areas.side_rear_wall, config.side_rear_cladding, catalog);

    let cladding_costs = CladdingCosts {
        front_composite: round2(front_cladding_cost(
            areas.front_wall,
            CladdingMaterial::Composite,
            catalog,
        )),
        front_cedar: round2(front_cladding_cost(
            areas.front_wall,
            CladdingMaterial::Cedar,
            catalog,
        )),
        side_rear_composite: round2(side_rear_cladding_cost(
            areas.side_rear_wall,
            CladdingMaterial::Composite,
            catalog,
        )),
        side_rear_cedar: round2(side_rear_cladding_cost(
            areas.side_rear_wall,
            CladdingMaterial::Cedar,
            catalog,
        )),
        side_rear_metal: round2(side_rear_cladding_cost(
            areas.side_rear_wall,
            CladdingMaterial::Metal,
            catalog,
        )),
    };

    // Round each bucket to the penny first, then sum: subtotal is always the
    // exact sum of the reported buckets.
    let shell = round2(shell);
    let laminated_floor = round2(laminated_floor);
    let skimmed_finish = round2(skimmed_finish);
    let electricals = round2(electricals);
    let doors = round2(doors);
    let windows = round2(windows);
    let cladding = round2(cladding);

    let subtotal =
        shell + laminated_floor + skimmed_finish + electricals + doors + windows + cladding;
    let vat = round2(subtotal * VAT_RATE);
    let total = round2(subtotal + vat);

    Quotation {
        areas,
        cladding_costs,
        breakdown: PriceBreakdown {
            shell,
            laminated_floor,
            skimmed_finish,
            electricals,
            doors,
            windows,
            cladding,
            fixed_costs: round2(fixed_costs),
            subtotal,
            vat,
            total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_catalog;
    use crate::domain::configuration::DoorType;

    fn base_config() -> RoomConfiguration {
        RoomConfiguration {
            length: dec!(4),
            depth: dec!(3),
            laminated_floor: false,
            skimmed_finish: false,
            ceiling_lights: 0,
            double_sockets: 0,
            door_type: DoorType::UpvcFrench180,
            alu_windows: 0,
            upvc_windows: 0,
            roof_windows: 0,
            front_cladding: CladdingMaterial::Composite,
            side_rear_cladding: CladdingMaterial::Composite,
        }
    }

    fn subtotal_of(b: &PriceBreakdown) -> Decimal {
        b.shell
            + b.laminated_floor
            + b.skimmed_finish
            + b.electricals
            + b.doors
            + b.windows
            + b.cladding
    }

    #[test]
    fn bare_four_by_three_room() {
        let quote = calculate(&base_config(), &default_catalog());
        let b = quote.breakdown;

        // foundation 490 + frame (4*3+3*2)*10.5+275 = 464 + floor 12*65
        // + walls 33.6*90 + roof 18.2*110 + fascia 1000 + fixed 865
        assert_eq!(b.shell, dec!(8625.00));
        assert_eq!(b.laminated_floor, Decimal::ZERO);
        assert_eq!(b.skimmed_finish, Decimal::ZERO);
        assert_eq!(b.electricals, dec!(230.00));
        assert_eq!(b.doors, dec!(1910.00));
        assert_eq!(b.windows, Decimal::ZERO);
        assert_eq!(b.cladding, dec!(3737.50));
        assert_eq!(b.fixed_costs, dec!(865.00));
        assert_eq!(b.subtotal, dec!(14502.50));
        assert_eq!(b.vat, dec!(2900.50));
        assert_eq!(b.total, dec!(17403.00));
    }

    #[test]
    fn subtotal_is_exact_sum_of_buckets() {
        let catalog = default_catalog();
        let mut config = base_config();
        config.laminated_floor = true;
        config.skimmed_finish = true;
        config.ceiling_lights = 4;
        config.double_sockets = 3;
        config.alu_windows = 2;
        config.upvc_windows = 1;
        config.roof_windows = 1;
        config.side_rear_cladding = CladdingMaterial::Metal;

        let b = calculate(&config, &catalog).breakdown;
        assert_eq!(b.subtotal, subtotal_of(&b));
        assert_eq!(b.vat, round2(b.subtotal * VAT_RATE));
        assert_eq!(b.total, round2(b.subtotal + b.vat));
    }

    #[test]
    fn interior_options_price_off_derived_areas() {
        let catalog = default_catalog();
        let mut config = base_config();
        config.laminated_floor = true;
        config.skimmed_finish = true;

        let b = calculate(&config, &catalog).breakdown;
        // 12.0 * 55
        assert_eq!(b.laminated_floor, dec!(660.00));
        // (33.6 + 12.0) * 70
        assert_eq!(b.skimmed_finish, dec!(3192.00));
    }

    #[test]
    fn electricals_grow_by_exactly_one_unit_rate() {
        let catalog = default_catalog();
        let mut config = base_config();
        let base = calculate(&config, &catalog).breakdown.electricals;

        config.ceiling_lights += 1;
        let with_light = calculate(&config, &catalog).breakdown.electricals;
        assert_eq!(with_light - base, catalog.price(PriceKey::CeilingLight));

        config.double_sockets += 1;
        let with_socket = calculate(&config, &catalog).breakdown.electricals;
        assert_eq!(with_socket - with_light, catalog.price(PriceKey::DoubleSocket));
    }

    #[test]
    fn foundation_and_fascia_tier_boundaries_are_inclusive() {
        let catalog = default_catalog();
        let mut config = base_config();

        // 3 * 3 = 9.0 sits in the lowest band.
        config.length = dec!(3);
        config.depth = dec!(3);
        let quote = calculate(&config, &catalog);
        assert_eq!(quote.areas.floor, dec!(9.0));
        let shell_at_9 = quote.breakdown.shell;

        // Nudge over the boundary: foundation 360 -> 490, fascia 750 -> 1000.
        config.length = dec!(3.1);
        let quote = calculate(&config, &catalog);
        assert_eq!(quote.areas.floor, dec!(9.3));
        let foundation_step = dec!(490) - dec!(360);
        let fascia_step = dec!(1000) - dec!(750);
        // Shell also grows with the extra frame/deck area, so only check it
        // climbed by at least the two tier steps.
        assert!(quote.breakdown.shell >= shell_at_9 + foundation_step + fascia_step);

        // 4 * 3 = 12.0 stays in the up_to_12 bands (checked via the fixture
        // totals in bare_four_by_three_room).
        config.length = dec!(4);
        let quote = calculate(&config, &catalog);
        assert_eq!(quote.areas.floor, dec!(12.0));
        assert_eq!(quote.breakdown.shell, dec!(8625.00));
    }

    #[test]
    fn metal_front_cladding_contributes_nothing() {
        let catalog = default_catalog();
        let mut config = base_config();
        config.front_cladding = CladdingMaterial::Metal;
        config.side_rear_cladding = CladdingMaterial::Cedar;

        let b = calculate(&config, &catalog).breakdown;
        // side/rear only: 24.0 * 145
        assert_eq!(b.cladding, dec!(3480.00));
    }

    #[test]
    fn metal_side_rear_cladding_adds_fixed_surcharge() {
        let catalog = default_catalog();
        let mut config = base_config();
        config.side_rear_cladding = CladdingMaterial::Metal;

        let quote = calculate(&config, &catalog);
        // front composite 5.9 * 125 = 737.50, side/rear 24.0 * 18 + 1070
        assert_eq!(quote.breakdown.cladding, dec!(737.50) + dec!(1502.00));
        assert_eq!(quote.cladding_costs.side_rear_metal, dec!(1502.00));
    }

    #[test]
    fn cladding_preview_covers_all_combinations() {
        let quote = calculate(&base_config(), &default_catalog());
        let c = quote.cladding_costs;
        assert_eq!(c.front_composite, dec!(737.50));
        assert_eq!(c.front_cedar, dec!(855.50));
        assert_eq!(c.side_rear_composite, dec!(3000.00));
        assert_eq!(c.side_rear_cedar, dec!(3480.00));
        assert_eq!(c.side_rear_metal, dec!(1502.00));
    }

    #[test]
    fn empty_catalog_quotes_to_zero() {
        let b = calculate(&base_config(), &PriceCatalog::default()).breakdown;
        assert_eq!(b.shell, Decimal::ZERO);
        assert_eq!(b.subtotal, Decimal::ZERO);
        assert_eq!(b.vat, Decimal::ZERO);
        assert_eq!(b.total, Decimal::ZERO);
    }

    #[test]
    fn calculation_is_idempotent() {
        let catalog = default_catalog();
        let config = base_config();
        assert_eq!(calculate(&config, &catalog), calculate(&config, &catalog));
    }
}
