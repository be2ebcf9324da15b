use serde::{Deserialize, Serialize};

use crate::pricing::models::{AreaType, Complexity, MaterialType, PriceTable, TileSize};

/// Customer selections for a single quote
///
/// Defaults mirror the calculator's initial state on the site, so a partial
/// JSON body is a valid selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selection {
    pub area_type: AreaType,
    pub material: MaterialType,
    pub tile_size: TileSize,
    /// Tiled area, m²
    pub area: f64,
    pub complexity: Complexity,

    pub with_demolition: bool,
    pub with_prep: bool,
    pub with_adhesive: bool,
    pub with_grout: bool,
    pub with_waterproofing: bool,
    /// Used only when `link_waterproofing_to_area` is false
    pub waterproofing_area: f64,
    pub link_waterproofing_to_area: bool,

    /// 45° miter cut, linear metres
    pub miter_lm: f64,
    /// Sealant joints, linear metres
    pub silicone_lm: f64,
    pub holes: f64,
    pub gkl_boxes: f64,

    pub turnkey: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            area_type: AreaType::Bathroom,
            material: MaterialType::Tile,
            tile_size: TileSize::Medium,
            area: 6.0,
            complexity: Complexity::Normal,
            with_demolition: false,
            with_prep: true,
            with_adhesive: true,
            with_grout: true,
            with_waterproofing: true,
            waterproofing_area: 6.0,
            link_waterproofing_to_area: true,
            miter_lm: 0.0,
            silicone_lm: 0.0,
            holes: 0.0,
            gkl_boxes: 0.0,
            turnkey: true,
        }
    }
}

/// What a quote line is charged for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Base,
    Demolition,
    Prep,
    Adhesive,
    Grout,
    Waterproofing,
    Miter,
    Sealant,
    Holes,
    GklBoxes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    SquareMetre,
    LinearMetre,
    Piece,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::SquareMetre => "м²",
            Self::LinearMetre => "п.м",
            Self::Piece => "шт",
        }
    }
}

impl LineKind {
    pub fn unit(&self) -> Unit {
        match self {
            Self::Base
            | Self::Demolition
            | Self::Prep
            | Self::Adhesive
            | Self::Grout
            | Self::Waterproofing => Unit::SquareMetre,
            Self::Miter | Self::Sealant => Unit::LinearMetre,
            Self::Holes | Self::GklBoxes => Unit::Piece,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Base => "База (ставка×площадь×коэфф×размер)",
            Self::Demolition => "Демонтаж",
            Self::Prep => "Подготовка",
            Self::Adhesive => "Клей/расходники",
            Self::Grout => "Затирка",
            Self::Waterproofing => "Гидроизоляция",
            Self::Miter => "Заусовка 45°",
            Self::Sealant => "Силикон/примыкания",
            Self::Holes => "Отверстия",
            Self::GklBoxes => "Короба/ниши ГКЛ",
        }
    }
}

/// One itemized cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub kind: LineKind,
    /// Clamped quantity in the line's unit
    pub quantity: f64,
    /// Effective rate per unit; for the base line this includes the multipliers
    pub rate: f64,
    pub amount: f64,
}

/// Fully itemized quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub base_cost: f64,
    /// Base line first, then every enabled extra in a fixed order
    pub lines: Vec<QuoteLine>,
    pub subtotal: f64,
    pub discount: f64,
    /// Subtotal minus discount, before the minimum-job floor
    pub total: f64,
    pub final_total: f64,
    pub min_applied: bool,
    /// Display-only work rate per m² (area-based items only)
    pub per_m2_work: f64,
}

impl Quote {
    pub fn line(&self, kind: LineKind) -> Option<&QuoteLine> {
        self.lines.iter().find(|l| l.kind == kind)
    }

    /// Amount charged for `kind`, zero when the line is absent
    pub fn cost_of(&self, kind: LineKind) -> f64 {
        self.line(kind).map(|l| l.amount).unwrap_or(0.0)
    }

    pub fn extras(&self) -> impl Iterator<Item = &QuoteLine> {
        self.lines.iter().filter(|l| l.kind != LineKind::Base)
    }
}

/// Negative, NaN and infinite quantities count as zero
pub fn clamp_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Compute the itemized quote for `selection` under `table`
///
/// Pure and total: bad numeric input is clamped, never rejected.
pub fn compute_quote(table: &PriceTable, selection: &Selection) -> Quote {
    let extras = &table.extras;

    let safe_area = clamp_quantity(selection.area);
    let base_rate = table.base.rate(selection.area_type, selection.material);
    let size_mult = table.size_multipliers.get(selection.tile_size);
    let coeff = table.coefficients.get(selection.complexity);

    let base_cost = safe_area * base_rate * coeff * size_mult;

    let mut lines = Vec::with_capacity(10);
    lines.push(QuoteLine {
        kind: LineKind::Base,
        quantity: safe_area,
        rate: base_rate * coeff * size_mult,
        amount: base_cost,
    });

    let mut per_m2_extras = 0.0;

    let area_works = [
        (LineKind::Demolition, selection.with_demolition, extras.demolition_per_m2),
        (LineKind::Prep, selection.with_prep, extras.prep_per_m2),
        (LineKind::Adhesive, selection.with_adhesive, extras.adhesive_per_m2),
        (LineKind::Grout, selection.with_grout, extras.grout_per_m2),
    ];
    for (kind, enabled, rate) in area_works {
        if enabled {
            lines.push(QuoteLine {
                kind,
                quantity: safe_area,
                rate,
                amount: safe_area * rate,
            });
            per_m2_extras += rate;
        }
    }

    if selection.with_waterproofing {
        let wp_area = if selection.link_waterproofing_to_area {
            per_m2_extras += extras.waterproofing_per_m2;
            safe_area
        } else {
            clamp_quantity(selection.waterproofing_area)
        };
        lines.push(QuoteLine {
            kind: LineKind::Waterproofing,
            quantity: wp_area,
            rate: extras.waterproofing_per_m2,
            amount: wp_area * extras.waterproofing_per_m2,
        });
    }

    let counted_works = [
        (LineKind::Miter, selection.miter_lm, extras.miter_per_lm),
        (LineKind::Sealant, selection.silicone_lm, extras.silicone_per_lm),
        (LineKind::Holes, selection.holes, extras.hole_per_each),
        (LineKind::GklBoxes, selection.gkl_boxes, extras.gkl_box_per_each),
    ];
    for (kind, quantity, rate) in counted_works {
        let quantity = clamp_quantity(quantity);
        if quantity > 0.0 {
            lines.push(QuoteLine {
                kind,
                quantity,
                rate,
                amount: quantity * rate,
            });
        }
    }

    // Summed in line order, base first
    let subtotal = lines.iter().fold(0.0, |acc, line| acc + line.amount);

    let discount = if selection.turnkey {
        (subtotal * extras.package_discount_pct / 100.0).round()
    } else {
        0.0
    };

    let total = (subtotal - discount).max(0.0);
    let final_total = total.max(extras.min_job);
    let min_applied = final_total > total;

    Quote {
        base_cost,
        lines,
        subtotal,
        discount,
        total,
        final_total,
        min_applied,
        per_m2_work: base_rate * coeff * size_mult + per_m2_extras,
    }
}
