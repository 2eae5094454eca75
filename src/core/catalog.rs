//! Job and seed catalogs - The fixed lookup tables behind work and farming.
//!
//! Both catalogs are closed enums with associated data, so call sites never
//! carry magic tuples. Plots store the seed *display name* as free text, which
//! is why [`Seed::find`] exists and why harvesting tolerates names it does not
//! recognize.

/// A work category a player may pick for one work action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Job {
    /// Field work
    Farm,
    /// Mining
    Mine,
    /// Construction
    Build,
    /// Fishing
    Fish,
    /// Logging
    Wood,
    /// Hunting
    Hunt,
    /// Cooking
    Cook,
    /// Art commissions
    Art,
    /// Tech work
    Tech,
    /// Space program
    Space,
}

impl Job {
    /// Every job category, in menu order.
    pub const ALL: [Self; 10] = [
        Self::Farm,
        Self::Mine,
        Self::Build,
        Self::Fish,
        Self::Wood,
        Self::Hunt,
        Self::Cook,
        Self::Art,
        Self::Tech,
        Self::Space,
    ];

    /// Stable identifier used in transaction metadata and transport callbacks.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::Mine => "mine",
            Self::Build => "build",
            Self::Fish => "fish",
            Self::Wood => "wood",
            Self::Hunt => "hunt",
            Self::Cook => "cook",
            Self::Art => "art",
            Self::Tech => "tech",
            Self::Space => "space",
        }
    }

    /// Parses a job identifier; `None` for anything not in the catalog.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.name() == name)
    }

    /// Fixed base income of the category.
    pub const fn base_income(self) -> i64 {
        match self {
            Self::Farm => 12,
            Self::Mine => 15,
            Self::Build => 14,
            Self::Fish => 10,
            Self::Wood => 13,
            Self::Hunt => 16,
            Self::Cook => 11,
            Self::Art => 18,
            Self::Tech => 20,
            Self::Space => 25,
        }
    }

    /// Fixed experience grant of the category.
    pub const fn xp_gain(self) -> i64 {
        match self {
            Self::Farm => 8,
            Self::Mine => 12,
            Self::Build => 10,
            Self::Fish => 6,
            Self::Wood => 9,
            Self::Hunt => 14,
            Self::Cook => 7,
            Self::Art => 15,
            Self::Tech => 18,
            Self::Space => 22,
        }
    }
}

/// A plantable seed type.
///
/// The farm consumes only the income multiplier and grow time; price and
/// rarity feed the default shop catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seed {
    /// Cheapest starter seed
    Wheat,
    /// Starter seed
    Carrot,
    /// Starter seed
    Tomato,
    /// Premium seed
    Silver,
    /// Premium seed
    Gold,
    /// Premium seed
    Emerald,
    /// Premium seed
    Diamond,
    /// Premium seed
    Sky,
    /// Top-tier premium seed
    Galaxy,
}

impl Seed {
    /// Grow time applied when a plot carries a seed name not in the catalog.
    pub const FALLBACK_GROW_MINUTES: i64 = 5;
    /// Income multiplier applied when a plot carries an unknown seed name.
    pub const FALLBACK_MULTIPLIER: f64 = 1.0;

    /// Every seed type, cheapest first.
    pub const ALL: [Self; 9] = [
        Self::Wheat,
        Self::Carrot,
        Self::Tomato,
        Self::Silver,
        Self::Gold,
        Self::Emerald,
        Self::Diamond,
        Self::Sky,
        Self::Galaxy,
    ];

    /// Display name; this is the string stored on planted plots.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wheat => "Wheat",
            Self::Carrot => "Carrot",
            Self::Tomato => "Tomato",
            Self::Silver => "Silver Seed",
            Self::Gold => "Golden Seed",
            Self::Emerald => "Emerald Seed",
            Self::Diamond => "Diamond Seed",
            Self::Sky => "Sky Seed",
            Self::Galaxy => "Galaxy Seed",
        }
    }

    /// Stock-keeping id of the matching shop item.
    pub const fn sku(self) -> &'static str {
        match self {
            Self::Wheat => "SKU_SEED_WHEAT",
            Self::Carrot => "SKU_SEED_CARROT",
            Self::Tomato => "SKU_SEED_TOMATO",
            Self::Silver => "SKU_SEED_SILVER",
            Self::Gold => "SKU_SEED_GOLD",
            Self::Emerald => "SKU_SEED_EMERALD",
            Self::Diamond => "SKU_SEED_DIAMOND",
            Self::Sky => "SKU_SEED_SKY",
            Self::Galaxy => "SKU_SEED_GALAXY",
        }
    }

    /// Shop price of the seed item.
    pub const fn price(self) -> f64 {
        match self {
            Self::Wheat => 50.0,
            Self::Carrot => 80.0,
            Self::Tomato => 120.0,
            Self::Silver => 3_000.0,
            Self::Gold => 5_000.0,
            Self::Emerald => 8_000.0,
            Self::Diamond => 15_000.0,
            Self::Sky => 20_000.0,
            Self::Galaxy => 50_000.0,
        }
    }

    /// Multiplier applied to the farm's base income at harvest.
    pub const fn income_multiplier(self) -> f64 {
        match self {
            Self::Wheat => 1.0,
            Self::Carrot => 1.2,
            Self::Tomato => 1.5,
            Self::Silver => 3.5,
            Self::Gold => 5.0,
            Self::Emerald => 8.0,
            Self::Diamond => 12.0,
            Self::Sky => 15.0,
            Self::Galaxy => 25.0,
        }
    }

    /// Minutes from planting to harvestable.
    pub const fn grow_time_minutes(self) -> i64 {
        match self {
            Self::Wheat => 5,
            Self::Carrot => 7,
            Self::Tomato => 10,
            Self::Silver => 45,
            Self::Gold => 60,
            Self::Emerald => 90,
            Self::Diamond => 120,
            Self::Sky => 150,
            Self::Galaxy => 300,
        }
    }

    /// Rarity tier label, informative only.
    pub const fn rarity(self) -> &'static str {
        match self {
            Self::Wheat | Self::Carrot | Self::Tomato => "common",
            Self::Silver => "epic",
            Self::Gold | Self::Emerald => "legendary",
            Self::Diamond | Self::Sky => "mythic",
            Self::Galaxy => "divine",
        }
    }

    /// Looks a seed up by its display name, as stored on plots.
    pub fn find(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|seed| seed.name() == name)
    }

    /// Grow profile for a stored seed name: `(grow_minutes, multiplier)`.
    ///
    /// Unrecognized names fall back to the default profile instead of failing,
    /// so stale plots from removed seed types stay harvestable.
    pub fn profile(name: &str) -> (i64, f64) {
        Self::find(name).map_or(
            (Self::FALLBACK_GROW_MINUTES, Self::FALLBACK_MULTIPLIER),
            |seed| (seed.grow_time_minutes(), seed.income_multiplier()),
        )
    }
}
