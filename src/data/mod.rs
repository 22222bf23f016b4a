//! Data layer: launch records, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RecordStore
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ RecordStore  │  Vec<LaunchRecord>, sites, payload bounds
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  site / payload predicates → record subsequence
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  outcome counts, scatter points
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
