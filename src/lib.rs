//! Catalogue of garment operation times.
//!
//! Records are loaded per locale from a spreadsheet-like source, cached for a
//! short window and narrowed by four interdependent filters (category,
//! garment, position, operation). See [`data::filter::compute_view`].

pub mod config;
pub mod data;
pub mod locale;
pub mod state;
