//! Tiling price calculator: the price document, the quote engine and the
//! linear-metre helper.

pub mod calculator;
pub mod helper;
pub mod merge;
pub mod models;

pub use calculator::{compute_quote, LineKind, Quote, QuoteLine, Selection, Unit};
pub use helper::{suggest_linear, LinearHelperInput, LinearSuggestion};
pub use merge::{merge_bytes_over_defaults, merge_over_defaults};
pub use models::{AreaType, Complexity, MaterialType, PriceTable, TileSize};
