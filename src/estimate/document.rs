use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::ContactsConfig;
use crate::pricing::{LineKind, PriceTable, Quote, Selection, Unit};

pub const ESTIMATE_TITLE: &str = "Смета на плиточные работы";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateItem {
    pub label: String,
    pub amount: f64,
}

/// Renderer-agnostic content of a customer estimate
///
/// Amounts are plain numbers; currency formatting belongs to the renderer.
#[derive(Debug, Clone)]
pub struct EstimateDocument {
    pub title: String,
    pub issued_at: DateTime<Local>,
    pub object: String,
    pub material: String,
    pub tile_size: String,
    pub area: f64,
    pub complexity: String,
    pub items: Vec<EstimateItem>,
    /// Zero when no turnkey discount applies
    pub discount: f64,
    pub final_total: f64,
    /// Set when the minimum-job floor raised the total
    pub min_job: Option<f64>,
    pub contacts: String,
}

impl EstimateDocument {
    pub fn from_quote(
        selection: &Selection,
        quote: &Quote,
        table: &PriceTable,
        contacts: &ContactsConfig,
        issued_at: DateTime<Local>,
    ) -> Self {
        let items = quote
            .lines
            .iter()
            .map(|line| EstimateItem {
                label: item_label(line.kind, line.quantity),
                amount: line.amount,
            })
            .collect();

        Self {
            title: ESTIMATE_TITLE.to_string(),
            issued_at,
            object: selection.area_type.label().to_string(),
            material: selection.material.label().to_string(),
            tile_size: selection.tile_size.label().to_string(),
            area: quote.line(LineKind::Base).map(|l| l.quantity).unwrap_or(0.0),
            complexity: selection.complexity.label().to_string(),
            items,
            discount: quote.discount,
            final_total: quote.final_total,
            min_job: quote.min_applied.then_some(table.extras.min_job),
            contacts: contacts.summary(),
        }
    }
}

/// Area works share the object's area, so only the rest show a quantity
fn item_label(kind: LineKind, quantity: f64) -> String {
    let unit = kind.unit();
    if kind == LineKind::Waterproofing || unit != Unit::SquareMetre {
        format!("{} ({} {})", kind.label(), quantity, unit.symbol())
    } else {
        kind.label().to_string()
    }
}
