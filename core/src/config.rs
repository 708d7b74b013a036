use crate::{
    error::{GameError, GameResult},
    rarity::{Rarity, RarityTable, RarityTier},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub min_price: u64,
    /// Purchases above this are rejected outright.
    pub max_price: u64,
    pub pack_size: usize,
    /// No tier's adjusted weight may drop below this before renormalisation.
    pub weight_floor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenConfig {
    pub max_slots: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualPools {
    pub colors: Vec<String>,
    pub petal_shapes: Vec<String>,
    /// Ordered from plainest to rarest; higher tiers unlock a longer prefix.
    pub patterns: Vec<String>,
    /// Index 0 is the "none" sentinel and is never drawn.
    pub auras: Vec<String>,
    pub name_suffixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationConfig {
    /// Growth duration = base × (growth_min + roll × growth_span).
    pub growth_min: f64,
    pub growth_span: f64,
    /// Petal yield = base × (yield_min + roll × yield_span).
    pub yield_min: f64,
    pub yield_span: f64,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            growth_min:  0.85,
            growth_span: 0.40,
            yield_min:   0.80,
            yield_span:  0.40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingBalances {
    pub gold: u64,
}

impl Default for StartingBalances {
    fn default() -> Self {
        Self { gold: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub rarity: RarityTable,
    pub shop: ShopConfig,
    pub garden: GardenConfig,
    pub visual: VisualPools,
    #[serde(default)]
    pub variation: VariationConfig,
    #[serde(default)]
    pub starting: StartingBalances,
}

impl GameConfig {
    /// Load from a JSON file, typically `data/config.json`.
    /// In tests, use GameConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-section checks the tier table cannot do on its own.
    pub fn validate(&self) -> GameResult<()> {
        let shop = &self.shop;
        if shop.min_price == 0 {
            return Err(GameError::Configuration("shop.min_price must be at least 1".into()));
        }
        if shop.max_price < shop.min_price {
            return Err(GameError::Configuration(format!(
                "shop.max_price ({}) is below shop.min_price ({})",
                shop.max_price, shop.min_price
            )));
        }
        if shop.pack_size == 0 {
            return Err(GameError::Configuration("shop.pack_size must be at least 1".into()));
        }
        if !(shop.weight_floor > 0.0) {
            return Err(GameError::Configuration("shop.weight_floor must be positive".into()));
        }
        if self.garden.max_slots == 0 {
            return Err(GameError::Configuration("garden.max_slots must be at least 1".into()));
        }

        let visual = &self.visual;
        for (name, pool) in [
            ("colors", &visual.colors),
            ("petal_shapes", &visual.petal_shapes),
            ("patterns", &visual.patterns),
            ("name_suffixes", &visual.name_suffixes),
        ] {
            if pool.is_empty() {
                return Err(GameError::Configuration(format!("visual.{name} is empty")));
            }
        }
        if visual.auras.len() < 2 {
            return Err(GameError::Configuration(
                "visual.auras needs the 'none' sentinel plus at least one aura".into(),
            ));
        }

        let v = &self.variation;
        if v.growth_min <= 0.0 || v.growth_span < 0.0 || v.yield_min <= 0.0 || v.yield_span < 0.0 {
            return Err(GameError::Configuration("variation ranges must be positive".into()));
        }
        Ok(())
    }

    pub fn tier(&self, rarity: Rarity) -> &RarityTier {
        self.rarity.tier(rarity)
    }

    /// Config with hardcoded defaults for use in unit tests.
    /// Mirrors data/config.json.
    pub fn default_test() -> Self {
        let tier = |rarity, label: &str, color: &str, probability, growth, petals, sell, boost, prefixes: [&str; 4]| RarityTier {
            rarity,
            label: label.into(),
            color: color.into(),
            probability,
            growth_base_seconds: growth,
            petal_yield: petals,
            sell_price: sell,
            boost_factor: boost,
            name_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
        };

        let tiers = vec![
            tier(Rarity::E, "Common",    "#9E9E9E", 40.0,   60,   5,  1, -2.0, ["Grass", "Sprout", "Blade", "Moss"]),
            tier(Rarity::D, "Uncommon",  "#4CAF50", 25.0,  180,  10,  2, -0.5, ["Flower", "Bud", "Bellflower", "Primrose"]),
            tier(Rarity::C, "Rare",      "#2196F3", 15.0,  600,  20,  3,  0.5, ["Orchid", "Dahlia", "Lily", "Iris"]),
            tier(Rarity::B, "Epic",      "#9C27B0", 10.0, 1800,  40,  5,  1.0, ["Gardenia", "Camellia", "Magnolia", "Amaranth"]),
            tier(Rarity::A, "Legendary", "#FF9800",  7.0, 3600,  80,  8,  1.5, ["Lotus", "Astral", "Nebula", "Celestine"]),
            tier(Rarity::S, "Mythic",    "#F44336",  3.0, 7200, 160, 12,  2.0, ["Eternal", "Mythic", "Divine", "Primordial"]),
        ];

        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            rarity: RarityTable::new(tiers).expect("default tier table is valid"),
            shop: ShopConfig {
                min_price:    10,
                max_price:    100_000,
                pack_size:    3,
                weight_floor: 0.5,
            },
            garden: GardenConfig { max_slots: 6 },
            visual: VisualPools {
                colors: strings(&[
                    "#E91E63", "#9C27B0", "#3F51B5", "#03A9F4", "#009688",
                    "#8BC34A", "#FFEB3B", "#FF9800", "#FF5722", "#FFFFFF",
                ]),
                petal_shapes: strings(&["round", "pointed", "heart", "star", "spiral", "fringed"]),
                patterns: strings(&[
                    "solid", "gradient", "striped", "spotted", "veined", "iridescent", "fractal",
                ]),
                auras: strings(&["none", "glow", "sparkle", "halo", "flame", "frost", "cosmic"]),
                name_suffixes: strings(&[
                    "of the Winds", "of the Moon", "Wild", "of Twilight",
                    "of Crystal", "Ardent", "Frosted", "Enchanted",
                    "of the Sun", "of the Abyss", "Stellar", "Opalescent",
                ]),
            },
            variation: VariationConfig::default(),
            starting: StartingBalances::default(),
        }
    }
}
