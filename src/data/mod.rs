/// Data layer: reference table types, loading, and year interpolation.
///
/// Architecture:
/// ```text
///  electricity_mixes.csv      cumulative_electricity_losses.csv
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                  ┌──────────┐
///   │  loader   │ rows → reshape   │  loader   │ header ⨯ row zip
///   └──────────┘                  └──────────┘
///        │                              │
///        ▼                              ▼
///   ┌────────────────┐            ┌───────────┐
///   │ ElectricityMix  │            │ LossTable  │
///   └────────────────┘            └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  interp   │  shares at fractional years
///   └──────────┘
/// ```

pub mod interp;
pub mod loader;
pub mod model;
