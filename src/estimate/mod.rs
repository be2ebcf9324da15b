//! Customer estimates: document model, rendering and the on-disk archive.

pub mod archive;
pub mod document;
pub mod render;

pub use archive::{content_type_for, EstimateArchive};
pub use document::{EstimateDocument, EstimateItem};
pub use render::{format_rub, EstimateRenderer, TextRenderer};
