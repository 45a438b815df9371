//! Price catalog
//!
//! An immutable-per-calculation snapshot of the editable price list. Every
//! formula in the pricing engine looks prices up through [`PriceKey`], a
//! closed enumeration of the known (category, item) pairs; lookups for keys
//! the catalog has no row for resolve to zero, never to an error, so a
//! partially-priced catalog degrades to a partial quote instead of failing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::configuration::DoorType;

/// A known (category, item) pair in the price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceKey {
    // Foundations, tiered by floor area (inclusive upper bounds)
    FoundationUpTo9,
    FoundationUpTo12,
    FoundationUpTo16,
    FoundationUpTo20,
    FoundationUpTo25,
    FoundationUpTo30,
    FoundationUpTo35,
    FoundationUpTo40,
    // Steel frame
    SteelFramePerMeter,
    SteelFrameFixed,
    // Decking
    OsbFloorPerSqm,
    OsbWallsPerSqm,
    RoofPerSqm,
    // Roof fascia, tiered by floor area (coarser than foundations)
    FasciaUpTo9,
    FasciaUpTo12,
    FasciaUpTo20,
    FasciaUpTo30,
    // Interior options
    LaminatedFloorPerSqm,
    SkimmedFinishPerSqm,
    // Electrical
    ConsumerUnit,
    CeilingLight,
    DoubleSocket,
    // Doors
    Door(DoorType),
    DoorFitting,
    // Windows
    AluWindow,
    UpvcWindow,
    RoofWindow,
    // Cladding
    CladdingComposite,
    CladdingCedar,
    CladdingMetalPerSqm,
    CladdingMetalFixed,
    // Unconditional fixed line items
    SiteSurvey,
    DesignFee,
    Gutter,
    WasteDisposal,
}

impl PriceKey {
    pub fn category(&self) -> &'static str {
        match self {
            Self::FoundationUpTo9
            | Self::FoundationUpTo12
            | Self::FoundationUpTo16
            | Self::FoundationUpTo20
            | Self::FoundationUpTo25
            | Self::FoundationUpTo30
            | Self::FoundationUpTo35
            | Self::FoundationUpTo40 => "foundations",
            Self::SteelFramePerMeter | Self::SteelFrameFixed => "steel_frame",
            Self::OsbFloorPerSqm => "osb_floor",
            Self::OsbWallsPerSqm => "osb_walls",
            Self::RoofPerSqm => "roof",
            Self::FasciaUpTo9 | Self::FasciaUpTo12 | Self::FasciaUpTo20 | Self::FasciaUpTo30 => {
                "roof_fascia"
            }
            Self::LaminatedFloorPerSqm | Self::SkimmedFinishPerSqm => "interior",
            Self::ConsumerUnit | Self::CeilingLight | Self::DoubleSocket => "electrical",
            Self::Door(_) | Self::DoorFitting => "doors",
            Self::AluWindow | Self::UpvcWindow | Self::RoofWindow => "windows",
            Self::CladdingComposite
            | Self::CladdingCedar
            | Self::CladdingMetalPerSqm
            | Self::CladdingMetalFixed => "cladding",
            Self::SiteSurvey | Self::DesignFee | Self::Gutter | Self::WasteDisposal => {
                "fixed_costs"
            }
        }
    }

    pub fn item(&self) -> &'static str {
        match self {
            Self::FoundationUpTo9 => "up_to_9",
            Self::FoundationUpTo12 => "up_to_12",
            Self::FoundationUpTo16 => "up_to_16",
            Self::FoundationUpTo20 => "up_to_20",
            Self::FoundationUpTo25 => "up_to_25",
            Self::FoundationUpTo30 => "up_to_30",
            Self::FoundationUpTo35 => "up_to_35",
            Self::FoundationUpTo40 => "up_to_40",
            Self::SteelFramePerMeter => "per_meter",
            Self::SteelFrameFixed => "fixed_cost",
            Self::OsbFloorPerSqm | Self::OsbWallsPerSqm | Self::RoofPerSqm => "per_sqm",
            Self::FasciaUpTo9 => "up_to_9",
            Self::FasciaUpTo12 => "up_to_12",
            Self::FasciaUpTo20 => "up_to_20",
            Self::FasciaUpTo30 => "up_to_30",
            Self::LaminatedFloorPerSqm => "laminated_floor",
            Self::SkimmedFinishPerSqm => "skimmed_finish",
            Self::ConsumerUnit => "consumer_unit",
            Self::CeilingLight => "ceiling_light",
            Self::DoubleSocket => "double_socket",
            Self::Door(door) => door.catalog_item(),
            Self::DoorFitting => "fitting",
            Self::AluWindow => "alu_window",
            Self::UpvcWindow => "upvc_window",
            Self::RoofWindow => "roof_window",
            Self::CladdingComposite => "composite",
            Self::CladdingCedar => "cedar",
            Self::CladdingMetalPerSqm => "metal_per_sqm",
            Self::CladdingMetalFixed => "metal_fixed",
            Self::SiteSurvey => "site_survey",
            Self::DesignFee => "design_fee",
            Self::Gutter => "gutter",
            Self::WasteDisposal => "waste_disposal",
        }
    }

    /// Map raw (category, item) strings from storage back to a typed key.
    /// Returns `None` for pairs the engine has no formula for; such rows are
    /// stored but never read.
    pub fn from_parts(category: &str, item: &str) -> Option<Self> {
        let key = match (category, item) {
            ("foundations", "up_to_9") => Self::FoundationUpTo9,
            ("foundations", "up_to_12") => Self::FoundationUpTo12,
            ("foundations", "up_to_16") => Self::FoundationUpTo16,
            ("foundations", "up_to_20") => Self::FoundationUpTo20,
            ("foundations", "up_to_25") => Self::FoundationUpTo25,
            ("foundations", "up_to_30") => Self::FoundationUpTo30,
            ("foundations", "up_to_35") => Self::FoundationUpTo35,
            ("foundations", "up_to_40") => Self::FoundationUpTo40,
            ("steel_frame", "per_meter") => Self::SteelFramePerMeter,
            ("steel_frame", "fixed_cost") => Self::SteelFrameFixed,
            ("osb_floor", "per_sqm") => Self::OsbFloorPerSqm,
            ("osb_walls", "per_sqm") => Self::OsbWallsPerSqm,
            ("roof", "per_sqm") => Self::RoofPerSqm,
            ("roof_fascia", "up_to_9") => Self::FasciaUpTo9,
            ("roof_fascia", "up_to_12") => Self::FasciaUpTo12,
            ("roof_fascia", "up_to_20") => Self::FasciaUpTo20,
            ("roof_fascia", "up_to_30") => Self::FasciaUpTo30,
            ("interior", "laminated_floor") => Self::LaminatedFloorPerSqm,
            ("interior", "skimmed_finish") => Self::SkimmedFinishPerSqm,
            ("electrical", "consumer_unit") => Self::ConsumerUnit,
            ("electrical", "ceiling_light") => Self::CeilingLight,
            ("electrical", "double_socket") => Self::DoubleSocket,
            ("doors", "fitting") => Self::DoorFitting,
            ("doors", item) => Self::Door(DoorType::from_catalog_item(item)?),
            ("windows", "alu_window") => Self::AluWindow,
            ("windows", "upvc_window") => Self::UpvcWindow,
            ("windows", "roof_window") => Self::RoofWindow,
            ("cladding", "composite") => Self::CladdingComposite,
            ("cladding", "cedar") => Self::CladdingCedar,
            ("cladding", "metal_per_sqm") => Self::CladdingMetalPerSqm,
            ("cladding", "metal_fixed") => Self::CladdingMetalFixed,
            ("fixed_costs", "site_survey") => Self::SiteSurvey,
            ("fixed_costs", "design_fee") => Self::DesignFee,
            ("fixed_costs", "gutter") => Self::Gutter,
            ("fixed_costs", "waste_disposal") => Self::WasteDisposal,
            _ => return None,
        };
        Some(key)
    }
}

/// Snapshot of the price list, taken at the start of each calculation and
/// immutable for its duration.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    prices: HashMap<PriceKey, Decimal>,
}

impl PriceCatalog {
    /// Build a snapshot from raw storage rows, skipping pairs the engine does
    /// not know.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, Decimal)>,
    {
        let prices = rows
            .into_iter()
            .filter_map(|(category, item, price)| {
                PriceKey::from_parts(category, item).map(|key| (key, price))
            })
            .collect();
        Self { prices }
    }

    /// Unit price for a key; zero when the catalog has no row for it.
    pub fn price(&self, key: PriceKey) -> Decimal {
        self.prices.get(&key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, key: PriceKey, price: Decimal) {
        self.prices.insert(key, price);
    }
}

/// One row of the default price list seeded on first startup.
pub struct DefaultEntry {
    pub key: PriceKey,
    pub price: Decimal,
    pub unit: &'static str,
    pub description: &'static str,
}

const fn entry(
    key: PriceKey,
    price: Decimal,
    unit: &'static str,
    description: &'static str,
) -> DefaultEntry {
    DefaultEntry {
        key,
        price,
        unit,
        description,
    }
}

/// The launch price list. Live prices are edited through the catalog upsert
/// endpoint; this table only backfills an empty database.
pub const DEFAULT_PRICE_LIST: &[DefaultEntry] = &[
    entry(PriceKey::FoundationUpTo9, dec!(360), "fixed", "Up to 9m²"),
    entry(PriceKey::FoundationUpTo12, dec!(490), "fixed", "Up to 12m²"),
    entry(PriceKey::FoundationUpTo16, dec!(660), "fixed", "Up to 16m²"),
    entry(PriceKey::FoundationUpTo20, dec!(820), "fixed", "Up to 20m²"),
    entry(PriceKey::FoundationUpTo25, dec!(1030), "fixed", "Up to 25m²"),
    entry(PriceKey::FoundationUpTo30, dec!(1200), "fixed", "Up to 30m²"),
    entry(PriceKey::FoundationUpTo35, dec!(1400), "fixed", "Up to 35m²"),
    entry(PriceKey::FoundationUpTo40, dec!(1600), "fixed", "Up to 40m²"),
    entry(PriceKey::SteelFramePerMeter, dec!(10.5), "per_meter", "Per meter"),
    entry(PriceKey::SteelFrameFixed, dec!(275), "fixed", "Fixed cost"),
    entry(PriceKey::OsbFloorPerSqm, dec!(65), "per_sqm", "Per m²"),
    entry(PriceKey::OsbWallsPerSqm, dec!(90), "per_sqm", "Per m²"),
    entry(PriceKey::RoofPerSqm, dec!(110), "per_sqm", "Per m²"),
    entry(PriceKey::FasciaUpTo9, dec!(750), "fixed", "Up to 9m²"),
    entry(PriceKey::FasciaUpTo12, dec!(1000), "fixed", "Up to 12m²"),
    entry(PriceKey::FasciaUpTo20, dec!(1500), "fixed", "Up to 20m²"),
    entry(PriceKey::FasciaUpTo30, dec!(2000), "fixed", "Up to 30m²"),
    entry(
        PriceKey::LaminatedFloorPerSqm,
        dec!(55),
        "per_sqm",
        "Laminated floor per m²",
    ),
    entry(
        PriceKey::SkimmedFinishPerSqm,
        dec!(70),
        "per_sqm",
        "Skimmed and painted finish per m²",
    ),
    entry(PriceKey::ConsumerUnit, dec!(230), "fixed", "Consumer unit"),
    entry(PriceKey::CeilingLight, dec!(70), "each", "Ceiling downlight"),
    entry(PriceKey::DoubleSocket, dec!(115), "each", "Double socket"),
    entry(
        PriceKey::Door(DoorType::UpvcFrench180),
        dec!(1450),
        "fixed",
        "UPVC French 180cm",
    ),
    entry(
        PriceKey::Door(DoorType::UpvcFrench240),
        dec!(1600),
        "fixed",
        "UPVC French + side panels (240cm)",
    ),
    entry(
        PriceKey::Door(DoorType::UpvcSliding200),
        dec!(1200),
        "fixed",
        "UPVC Sliding 200cm",
    ),
    entry(
        PriceKey::Door(DoorType::AluSliding200),
        dec!(1900),
        "fixed",
        "ALU Sliding 200cm",
    ),
    entry(
        PriceKey::Door(DoorType::AluBifold200),
        dec!(1800),
        "fixed",
        "ALU Bi-fold 200cm",
    ),
    entry(
        PriceKey::Door(DoorType::AluBifold300),
        dec!(2500),
        "fixed",
        "ALU Bi-fold 300cm",
    ),
    entry(
        PriceKey::Door(DoorType::UpvcSliding400),
        dec!(2150),
        "fixed",
        "UPVC Sliding 400cm with panels",
    ),
    entry(PriceKey::DoorFitting, dec!(460), "fixed", "Door fitting"),
    entry(PriceKey::AluWindow, dec!(500), "each", "ALU window (100×80cm)"),
    entry(PriceKey::UpvcWindow, dec!(280), "each", "UPVC window (100×80cm)"),
    entry(PriceKey::RoofWindow, dec!(1500), "each", "Roof window (120×120cm)"),
    entry(
        PriceKey::CladdingComposite,
        dec!(125),
        "per_sqm",
        "Composite cladding per m²",
    ),
    entry(
        PriceKey::CladdingCedar,
        dec!(145),
        "per_sqm",
        "Cedar cladding per m²",
    ),
    entry(
        PriceKey::CladdingMetalPerSqm,
        dec!(18),
        "per_sqm",
        "Metal cladding per m²",
    ),
    entry(
        PriceKey::CladdingMetalFixed,
        dec!(1070),
        "fixed",
        "Metal cladding fixed cost",
    ),
    entry(PriceKey::SiteSurvey, dec!(170), "fixed", "Site Survey"),
    entry(PriceKey::DesignFee, dec!(225), "fixed", "Design Fee"),
    entry(PriceKey::Gutter, dec!(170), "fixed", "Gutter"),
    entry(PriceKey::WasteDisposal, dec!(300), "fixed", "Waste Disposal"),
];

/// Snapshot holding the full default price list; used by tests and available
/// as a fallback when running without a seeded database.
pub fn default_catalog() -> PriceCatalog {
    let mut catalog = PriceCatalog::default();
    for entry in DEFAULT_PRICE_LIST {
        catalog.set(entry.key, entry.price);
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_entry_round_trips_through_parts() {
        for entry in DEFAULT_PRICE_LIST {
            let reparsed = PriceKey::from_parts(entry.key.category(), entry.key.item());
            assert_eq!(reparsed, Some(entry.key), "entry {:?}", entry.key);
        }
    }

    #[test]
    fn missing_entries_price_at_zero() {
        let catalog = PriceCatalog::default();
        assert_eq!(catalog.price(PriceKey::ConsumerUnit), Decimal::ZERO);
        assert_eq!(
            catalog.price(PriceKey::Door(DoorType::AluBifold300)),
            Decimal::ZERO
        );
    }

    #[test]
    fn unknown_rows_are_skipped() {
        let catalog = PriceCatalog::from_rows([
            ("electrical", "consumer_unit", dec!(230)),
            ("hot_tubs", "deluxe", dec!(9999)),
            ("doors", "revolving_500", dec!(5000)),
        ]);
        assert_eq!(catalog.price(PriceKey::ConsumerUnit), dec!(230));
        // Only the one known row made it into the snapshot.
        assert_eq!(catalog.prices.len(), 1);
    }

    #[test]
    fn default_catalog_covers_the_full_price_list() {
        let catalog = default_catalog();
        assert_eq!(catalog.price(PriceKey::FoundationUpTo9), dec!(360));
        assert_eq!(catalog.price(PriceKey::CladdingMetalFixed), dec!(1070));
        assert_eq!(
            catalog.price(PriceKey::Door(DoorType::UpvcSliding400)),
            dec!(2150)
        );
    }
}
