/// Data layer: core types, loading, filtering and table helpers.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet (or the bundled sample)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PenguinDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ FilterStore   │  dataset + species selection → cached FilteredView
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  table    │  columns, sorting, per-column grid filters
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
pub mod table;
