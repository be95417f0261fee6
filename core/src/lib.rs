//! sales-core: synthetic retail sales generation and the analytics that
//! sit on top of the generated dataset.
//!
//! Data flows one way:
//!   generator → store (CSV file) → dataset → filter → views → dashboard
//!
//! Nothing downstream of `dataset` ever writes the file back.

pub mod config;
pub mod correlation;
pub mod dashboard;
pub mod dataset;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod generator;
pub mod grouping;
pub mod insight;
pub mod kpi;
pub mod record;
pub mod rng;
pub mod stats;
pub mod store;
pub mod types;
