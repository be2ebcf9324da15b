use serde::{Deserialize, Serialize};

use crate::pricing::calculator::clamp_quantity;
use crate::pricing::models::AreaType;

/// Room geometry used to suggest sealant and miter lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinearHelperInput {
    pub area_type: AreaType,
    /// Floor width, m
    pub width: f64,
    /// Floor depth, m
    pub depth: f64,
    /// Wall height, m
    pub height: f64,
    pub external_corners: f64,
    /// Seal the floor-to-wall perimeter
    pub perimeter_on: bool,
    /// Bath or shower tray edge, m
    pub bath_edge: f64,
    pub custom_silicone: f64,
    pub custom_miter: f64,
}

impl Default for LinearHelperInput {
    fn default() -> Self {
        Self {
            area_type: AreaType::Bathroom,
            width: 1.7,
            depth: 1.7,
            height: 2.5,
            external_corners: 0.0,
            perimeter_on: true,
            bath_edge: 0.0,
            custom_silicone: 0.0,
            custom_miter: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearSuggestion {
    pub floor_perimeter: f64,
    pub silicone_lm: f64,
    pub miter_lm: f64,
    pub hint: &'static str,
}

/// Suggest linear metres for sealant and 45° miter from room geometry
pub fn suggest_linear(input: &LinearHelperInput) -> LinearSuggestion {
    let floor_perimeter = 2.0 * (clamp_quantity(input.width) + clamp_quantity(input.depth));

    let silicone = (if input.perimeter_on { floor_perimeter } else { 0.0 })
        + clamp_quantity(input.bath_edge)
        + clamp_quantity(input.custom_silicone);

    // Each external corner runs floor to ceiling on both tiles
    let miter = clamp_quantity(input.external_corners) * clamp_quantity(input.height) * 2.0
        + clamp_quantity(input.custom_miter);

    LinearSuggestion {
        floor_perimeter,
        silicone_lm: round_cents(silicone),
        miter_lm: round_cents(miter),
        hint: hint_for(input.area_type),
    }
}

pub fn hint_for(area_type: AreaType) -> &'static str {
    match area_type {
        AreaType::Bathroom => {
            "Санузел: для силикона учти периметр пола (пол-стена), примыкания ванны/душа; для 45° — внешние углы × высота × 2."
        }
        AreaType::Backsplash => {
            "Фартук: силикон — периметр примыканий столешницы/боков; 45° обычно на наружных углах открытых торцов."
        }
        AreaType::Floor => "Пол: силикон только по примыканиям (если нужны), 45° редко применяется.",
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
