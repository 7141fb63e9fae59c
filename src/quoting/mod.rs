//! Freight quote estimation and ranking engine.
//!
//! Turns a shipment description into a ranked, filterable list of
//! per-carrier quotes. Estimates are closed-form heuristics; no carrier is
//! contacted.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::DistanceEstimator;
pub use models::{Quote, RankControls, RateTables, ServiceLevel, ShipmentRequest, SortKey, TransportMode};
pub use routes::router;
pub use services::{generate_quotes, quote_shipment, rank, QuoteSummary, RankedQuote};
