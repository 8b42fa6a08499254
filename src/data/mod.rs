/// Data layer: record types, loading, labelling, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file once → Arc<[RentalRecord]>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  yr / season / weathersit codes → labels
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep the selected years
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐     ┌──────────┐
///   │ aggregate  │ ──▶ │ insight   │  best season / weather, dominant users
///   └───────────┘     └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod insight;
pub mod loader;
pub mod model;
pub mod normalize;
