// =============================================================================
// Portfolio & Market Analytics
// =============================================================================
//
// Pure computations layered next to the indicator engine: quote snapshots,
// portfolio valuation and price-alert evaluation. Like the engine, every
// function here consumes already-retrieved data and performs no I/O.

pub mod alerts;
pub mod portfolio;
pub mod quote;
