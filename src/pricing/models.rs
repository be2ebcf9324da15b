use serde::{Deserialize, Serialize};

/// Zone being tiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AreaType {
    #[default]
    Bathroom,
    Backsplash,
    Floor,
}

impl AreaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bathroom => "bathroom",
            Self::Backsplash => "backsplash",
            Self::Floor => "floor",
        }
    }

    /// Customer-facing name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bathroom => "Санузел",
            Self::Backsplash => "Фартук кухни",
            Self::Floor => "Пол",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialType {
    #[default]
    Tile,
    Porcelain,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Porcelain => "porcelain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tile => "кафель",
            Self::Porcelain => "керамогранит",
        }
    }
}

/// Layout pattern affecting labor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Complexity {
    #[default]
    Normal,
    Diagonal,
    LargeFormat,
    Mosaic,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "стандарт",
            Self::Diagonal => "диагональ",
            Self::LargeFormat => "крупный формат",
            Self::Mosaic => "мозаика/рисунок",
        }
    }
}

/// Bucket of physical tile dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileSize {
    #[serde(rename = "small")]
    Small,
    #[default]
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "large60x120")]
    Large60x120,
    #[serde(rename = "xl120plus")]
    Xl120Plus,
}

impl TileSize {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "мелкая <200×200",
            Self::Medium => "200×200–600×600",
            Self::Large60x120 => "60×120",
            Self::Xl120Plus => "≥1200",
        }
    }
}

/// Base rate per m² for each material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRates {
    pub tile: f64,
    pub porcelain: f64,
}

impl MaterialRates {
    pub fn get(&self, material: MaterialType) -> f64 {
        match material {
            MaterialType::Tile => self.tile,
            MaterialType::Porcelain => self.porcelain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRates {
    pub bathroom: MaterialRates,
    pub backsplash: MaterialRates,
    pub floor: MaterialRates,
}

impl BaseRates {
    pub fn rate(&self, area_type: AreaType, material: MaterialType) -> f64 {
        let rates = match area_type {
            AreaType::Bathroom => &self.bathroom,
            AreaType::Backsplash => &self.backsplash,
            AreaType::Floor => &self.floor,
        };
        rates.get(material)
    }
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            bathroom: MaterialRates { tile: 1200.0, porcelain: 1400.0 },
            backsplash: MaterialRates { tile: 900.0, porcelain: 1100.0 },
            floor: MaterialRates { tile: 1100.0, porcelain: 1300.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Coefficients {
    pub normal: f64,
    pub diagonal: f64,
    pub large_format: f64,
    pub mosaic: f64,
}

impl Coefficients {
    pub fn get(&self, complexity: Complexity) -> f64 {
        match complexity {
            Complexity::Normal => self.normal,
            Complexity::Diagonal => self.diagonal,
            Complexity::LargeFormat => self.large_format,
            Complexity::Mosaic => self.mosaic,
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            normal: 1.00,
            diagonal: 1.10,
            large_format: 1.15,
            mosaic: 1.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeMultipliers {
    pub small: f64,
    pub medium: f64,
    pub large60x120: f64,
    pub xl120plus: f64,
}

impl SizeMultipliers {
    pub fn get(&self, size: TileSize) -> f64 {
        match size {
            TileSize::Small => self.small,
            TileSize::Medium => self.medium,
            TileSize::Large60x120 => self.large60x120,
            TileSize::Xl120Plus => self.xl120plus,
        }
    }
}

impl Default for SizeMultipliers {
    fn default() -> Self {
        Self {
            small: 0.95,
            medium: 1.00,
            large60x120: 1.08,
            xl120plus: 1.15,
        }
    }
}

/// Unit rates for optional works, the package discount and the job floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extras {
    pub demolition_per_m2: f64,
    pub prep_per_m2: f64,
    pub adhesive_per_m2: f64,
    pub grout_per_m2: f64,
    pub waterproofing_per_m2: f64,

    pub miter_per_lm: f64,
    pub silicone_per_lm: f64,
    pub hole_per_each: f64,
    pub gkl_box_per_each: f64,

    /// Turnkey discount, percent (0-100)
    pub package_discount_pct: f64,
    /// Minimum job amount
    pub min_job: f64,
}

impl Default for Extras {
    fn default() -> Self {
        Self {
            demolition_per_m2: 500.0,
            prep_per_m2: 450.0,
            adhesive_per_m2: 250.0,
            grout_per_m2: 200.0,
            waterproofing_per_m2: 350.0,

            miter_per_lm: 650.0,
            silicone_per_lm: 120.0,
            hole_per_each: 250.0,
            gkl_box_per_each: 1500.0,

            package_discount_pct: 5.0,
            min_job: 12000.0,
        }
    }
}

/// The admin-editable price document
///
/// `Default` is the hardcoded document every missing key falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceTable {
    pub base: BaseRates,
    pub coefficients: Coefficients,
    pub size_multipliers: SizeMultipliers,
    pub extras: Extras,
}

impl PriceTable {
    /// Every numeric entry with its document path, in document order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let b = &self.base;
        let c = &self.coefficients;
        let s = &self.size_multipliers;
        let e = &self.extras;
        vec![
            ("base.bathroom.tile", b.bathroom.tile),
            ("base.bathroom.porcelain", b.bathroom.porcelain),
            ("base.backsplash.tile", b.backsplash.tile),
            ("base.backsplash.porcelain", b.backsplash.porcelain),
            ("base.floor.tile", b.floor.tile),
            ("base.floor.porcelain", b.floor.porcelain),
            ("coefficients.normal", c.normal),
            ("coefficients.diagonal", c.diagonal),
            ("coefficients.largeFormat", c.large_format),
            ("coefficients.mosaic", c.mosaic),
            ("sizeMultipliers.small", s.small),
            ("sizeMultipliers.medium", s.medium),
            ("sizeMultipliers.large60x120", s.large60x120),
            ("sizeMultipliers.xl120plus", s.xl120plus),
            ("extras.demolitionPerM2", e.demolition_per_m2),
            ("extras.prepPerM2", e.prep_per_m2),
            ("extras.adhesivePerM2", e.adhesive_per_m2),
            ("extras.groutPerM2", e.grout_per_m2),
            ("extras.waterproofingPerM2", e.waterproofing_per_m2),
            ("extras.miterPerLm", e.miter_per_lm),
            ("extras.siliconePerLm", e.silicone_per_lm),
            ("extras.holePerEach", e.hole_per_each),
            ("extras.gklBoxPerEach", e.gkl_box_per_each),
            ("extras.packageDiscountPct", e.package_discount_pct),
            ("extras.minJob", e.min_job),
        ]
    }

    /// Check the range invariants: every value finite and >= 0, discount at most 100
    pub fn validate(&self) -> Result<(), String> {
        for (path, value) in self.entries() {
            if !is_valid_entry(path, value) {
                return Err(format!("{} is out of range: {}", path, value));
            }
        }
        Ok(())
    }
}

/// Range check shared by validation and default merging
pub(crate) fn is_valid_entry(path: &str, value: f64) -> bool {
    if !value.is_finite() || value < 0.0 {
        return false;
    }
    if path.ends_with("packageDiscountPct") {
        return value <= 100.0;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_matches_published_prices() {
        let table = PriceTable::default();
        assert_eq!(table.base.rate(AreaType::Bathroom, MaterialType::Tile), 1200.0);
        assert_eq!(table.base.rate(AreaType::Floor, MaterialType::Porcelain), 1300.0);
        assert_eq!(table.coefficients.get(Complexity::Mosaic), 1.30);
        assert_eq!(table.size_multipliers.get(TileSize::Xl120Plus), 1.15);
        assert_eq!(table.extras.min_job, 12000.0);
        assert_eq!(table.entries().len(), 25);
    }

    #[test]
    fn test_serializes_with_document_keys() {
        let json = serde_json::to_value(PriceTable::default()).unwrap();
        assert_eq!(json["coefficients"]["largeFormat"], 1.15);
        assert_eq!(json["sizeMultipliers"]["large60x120"], 1.08);
        assert_eq!(json["extras"]["gklBoxPerEach"], 1500.0);
        assert_eq!(json["extras"]["packageDiscountPct"], 5.0);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&TileSize::Large60x120).unwrap(), "\"large60x120\"");
        assert_eq!(serde_json::to_string(&TileSize::Xl120Plus).unwrap(), "\"xl120plus\"");
        assert_eq!(serde_json::to_string(&Complexity::LargeFormat).unwrap(), "\"largeFormat\"");
        let area: AreaType = serde_json::from_str("\"backsplash\"").unwrap();
        assert_eq!(area, AreaType::Backsplash);
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut table = PriceTable::default();
        table.extras.grout_per_m2 = -1.0;
        let err = table.validate().unwrap_err();
        assert!(err.contains("extras.groutPerM2"));
    }

    #[test]
    fn test_validate_rejects_discount_over_100() {
        let mut table = PriceTable::default();
        table.extras.package_discount_pct = 150.0;
        assert!(table.validate().is_err());

        table.extras.package_discount_pct = 100.0;
        assert!(table.validate().is_ok());
    }
}
