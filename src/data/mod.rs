/// Data layer: core types, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  workbook .json / directory of .csv
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  named sections of raw cells
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  locale section → RecordSet (+ Diagnostic)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one snapshot per locale, TTL expiry
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → facet options + filtered indices
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
