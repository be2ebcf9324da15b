use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::config::ContactsConfig;
use crate::estimate::format_rub;
use crate::pricing::{LineKind, PriceTable, Quote, Selection};

/// Pre-filled WhatsApp message and the link that opens it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub message: String,
    pub url: String,
}

impl Lead {
    /// Lead describing a computed quote
    pub fn for_quote(
        selection: &Selection,
        table: &PriceTable,
        quote: &Quote,
        contacts: &ContactsConfig,
    ) -> Self {
        let message = quote_message(selection, table, quote);
        let url = whatsapp_link(&contacts.whatsapp_phone, &message);
        Self { message, url }
    }

    /// Plain greeting used when no calculation is attached
    pub fn greeting(contacts: &ContactsConfig) -> Self {
        Self {
            message: contacts.whatsapp_text.clone(),
            url: whatsapp_link(&contacts.whatsapp_phone, &contacts.whatsapp_text),
        }
    }
}

/// Compose the customer's request text
///
/// Quantities come from the quote, so they are already clamped.
pub fn quote_message(selection: &Selection, table: &PriceTable, quote: &Quote) -> String {
    let extras = &table.extras;
    let area = quote.line(LineKind::Base).map(|l| l.quantity).unwrap_or(0.0);

    let mut lines = vec![
        format!(
            "Здравствуйте! Хочу рассчитать работы: {}.",
            selection.area_type.label()
        ),
        format!(
            "Материал: {}; размер: {}.",
            selection.material.label(),
            selection.tile_size.label()
        ),
        format!(
            "Площадь: {} м². Сложность: {}.",
            area,
            selection.complexity.label()
        ),
    ];

    let toggles = [
        (LineKind::Demolition, "Демонтаж", extras.demolition_per_m2),
        (LineKind::Prep, "Подготовка", extras.prep_per_m2),
        (LineKind::Adhesive, "Клей/расходники", extras.adhesive_per_m2),
        (LineKind::Grout, "Затирка", extras.grout_per_m2),
    ];
    for (kind, name, rate) in toggles {
        if quote.line(kind).is_some() {
            lines.push(format!("{}: да (≈{} ₽/м²).", name, rate));
        }
    }

    if let Some(wp) = quote.line(LineKind::Waterproofing) {
        lines.push(format!(
            "Гидроизоляция: {} м² (≈{} ₽/м²).",
            wp.quantity, extras.waterproofing_per_m2
        ));
    }

    let counted = [LineKind::Miter, LineKind::Sealant, LineKind::Holes, LineKind::GklBoxes];
    for line in counted.into_iter().filter_map(|kind| quote.line(kind)) {
        let unit = line.kind.unit().symbol();
        lines.push(format!(
            "{}: {} {} (≈{} ₽/{}).",
            line.kind.label(),
            line.quantity,
            unit,
            line.rate,
            unit
        ));
    }

    if selection.turnkey {
        lines.push(format!(
            "Пакет «под ключ»: скидка {}%.",
            extras.package_discount_pct
        ));
    }

    let floor_note = if quote.min_applied {
        format!(" (с учётом минималки {})", format_rub(extras.min_job))
    } else {
        String::new()
    };
    lines.push(format!(
        "Предварительно: ~{}{}. Когда удобно замер?",
        format_rub(quote.final_total),
        floor_note
    ));

    lines.join("\n")
}

/// `https://wa.me/<digits>?text=<message>`
///
/// Everything but ASCII digits is dropped from the phone number.
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Spaces as %20 rather than '+'; a literal '+' is already %2B here
    let encoded = form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    match Url::parse("https://wa.me/") {
        Ok(mut url) => {
            url.set_path(&digits);
            url.set_query(Some(&format!("text={}", encoded)));
            url.to_string()
        }
        Err(_) => format!("https://wa.me/{}?text={}", digits, encoded),
    }
}
