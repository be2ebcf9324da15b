//! Field-by-field fallback of a stored price document onto the defaults.
//!
//! The stored document may be partial, hand-edited or written by an older
//! version of the site. Each key of the default document is taken from the
//! stored document when present and in range, otherwise from the defaults.
//! Keys the default document does not know are ignored.

use serde_json::Value;
use tracing::debug;

use crate::pricing::models::{is_valid_entry, PriceTable};

/// Merge a raw JSON document over [`PriceTable::default`]
pub fn merge_over_defaults(doc: &Value) -> PriceTable {
    let Ok(mut merged) = serde_json::to_value(PriceTable::default()) else {
        return PriceTable::default();
    };

    overlay(&mut merged, doc, "");

    serde_json::from_value(merged).unwrap_or_default()
}

/// Parse stored bytes and merge them over the defaults
pub fn merge_bytes_over_defaults(bytes: &[u8]) -> Result<PriceTable, serde_json::Error> {
    let doc: Value = serde_json::from_slice(bytes)?;
    Ok(merge_over_defaults(&doc))
}

fn overlay(base: &mut Value, patch: &Value, path: &str) {
    let (Value::Object(slots), Value::Object(patch)) = (base, patch) else {
        return;
    };

    for (key, slot) in slots.iter_mut() {
        let Some(incoming) = patch.get(key) else {
            continue;
        };

        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match slot {
            Value::Object(_) => overlay(slot, incoming, &child_path),
            Value::Number(_) => match incoming.as_f64() {
                Some(value) if is_valid_entry(&child_path, value) => {
                    *slot = Value::from(value);
                }
                _ => {
                    debug!(key = %child_path, value = %incoming, "Ignoring out-of-range price entry");
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_min_job_falls_back_and_keeps_the_rest() {
        let doc = json!({
            "base": {
                "bathroom": { "tile": 1500, "porcelain": 1700 }
            },
            "extras": {
                "miterPerLm": 800,
                "packageDiscountPct": 10
            }
        });

        let table = merge_over_defaults(&doc);
        let defaults = PriceTable::default();

        assert_eq!(table.extras.min_job, defaults.extras.min_job);
        assert_eq!(table.extras.miter_per_lm, 800.0);
        assert_eq!(table.extras.package_discount_pct, 10.0);
        assert_eq!(table.base.bathroom.tile, 1500.0);
        assert_eq!(table.base.bathroom.porcelain, 1700.0);
        assert_eq!(table.base.floor, defaults.base.floor);
        assert_eq!(table.coefficients, defaults.coefficients);
    }

    #[test]
    fn test_partial_section_is_filled_per_key() {
        let doc = json!({
            "base": { "backsplash": { "porcelain": 1000 } },
            "sizeMultipliers": { "small": 0.9 }
        });

        let table = merge_over_defaults(&doc);

        assert_eq!(table.base.backsplash.porcelain, 1000.0);
        assert_eq!(table.base.backsplash.tile, 900.0);
        assert_eq!(table.size_multipliers.small, 0.9);
        assert_eq!(table.size_multipliers.xl120plus, 1.15);
    }

    #[test]
    fn test_bad_values_are_replaced_by_defaults() {
        let doc = json!({
            "extras": {
                "groutPerM2": -50,
                "prepPerM2": "cheap",
                "packageDiscountPct": 250,
                "holePerEach": null
            },
            "coefficients": "oops"
        });

        let table = merge_over_defaults(&doc);
        let defaults = PriceTable::default();

        assert_eq!(table, defaults);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let doc = json!({ "legacy": { "x": 1 }, "extras": { "unknownPerM2": 5 } });
        assert_eq!(merge_over_defaults(&doc), PriceTable::default());
    }

    #[test]
    fn test_non_object_document_yields_defaults() {
        assert_eq!(merge_over_defaults(&json!([1, 2, 3])), PriceTable::default());
        assert_eq!(merge_over_defaults(&Value::Null), PriceTable::default());
    }

    #[test]
    fn test_merge_bytes_rejects_garbage() {
        assert!(merge_bytes_over_defaults(b"{not json").is_err());

        let table = merge_bytes_over_defaults(br#"{"extras":{"minJob":9000}}"#).unwrap();
        assert_eq!(table.extras.min_job, 9000.0);
    }
}
