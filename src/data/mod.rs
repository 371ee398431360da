/// Data layer: core types, loading, range filtering and aggregation.
///
/// Architecture:
/// ```text
///   .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RentalDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ RentalDataset  │  Vec<RentalRecord>, min/max date
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  DateRange predicate → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  totals, working-day and cluster sums → Summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
