use anyhow::Context as _;
use serde::Serialize;
use tera::{Context, Tera};

use crate::estimate::document::EstimateDocument;

const TEXT_TEMPLATE_NAME: &str = "estimate.txt";
const TEXT_TEMPLATE: &str = include_str!("../../templates/estimate.txt.tera");

/// Turns an estimate into downloadable bytes
pub trait EstimateRenderer: Send + Sync {
    /// File extension for archived documents, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, doc: &EstimateDocument) -> anyhow::Result<Vec<u8>>;
}

/// Template view of an estimate, with amounts already formatted
#[derive(Debug, Serialize)]
struct EstimateContext<'a> {
    title: &'a str,
    issued_at: String,
    object: &'a str,
    material: &'a str,
    tile_size: &'a str,
    area: String,
    complexity: &'a str,
    items: Vec<ItemContext<'a>>,
    discount: Option<String>,
    final_total: String,
    min_job: Option<String>,
    contacts: &'a str,
}

#[derive(Debug, Serialize)]
struct ItemContext<'a> {
    label: &'a str,
    amount: String,
}

impl<'a> From<&'a EstimateDocument> for EstimateContext<'a> {
    fn from(doc: &'a EstimateDocument) -> Self {
        Self {
            title: &doc.title,
            issued_at: doc.issued_at.format("%d.%m.%Y, %H:%M:%S").to_string(),
            object: &doc.object,
            material: &doc.material,
            tile_size: &doc.tile_size,
            area: doc.area.to_string(),
            complexity: &doc.complexity,
            items: doc
                .items
                .iter()
                .map(|item| ItemContext {
                    label: &item.label,
                    amount: format_rub(item.amount),
                })
                .collect(),
            discount: (doc.discount > 0.0).then(|| format_rub(doc.discount)),
            final_total: format_rub(doc.final_total),
            min_job: doc.min_job.map(format_rub),
            contacts: &doc.contacts,
        }
    }
}

/// UTF-8 plain text estimate from the bundled tera template
#[derive(Debug, Clone)]
pub struct TextRenderer {
    tera: Tera,
}

impl TextRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEXT_TEMPLATE_NAME, TEXT_TEMPLATE)
            .context("Failed to parse estimate template")?;
        Ok(Self { tera })
    }
}

impl EstimateRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, doc: &EstimateDocument) -> anyhow::Result<Vec<u8>> {
        let context = Context::from_serialize(EstimateContext::from(doc))?;
        let text = self
            .tera
            .render(TEXT_TEMPLATE_NAME, &context)
            .context("Failed to render estimate")?;
        Ok(text.into_bytes())
    }
}

/// Whole rubles with non-breaking-space thousands groups: `16 815 ₽`
pub fn format_rub(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} ₽", sign, grouped)
}
