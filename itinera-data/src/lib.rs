//! Airport data sources for the Itinera planner.
//!
//! Responsibilities:
//! - Provide [`AirportLookup`](itinera_core::AirportLookup) adapters backed
//!   by an in-memory catalogue and by an HTTP service.
//! - Encapsulate the on-disk and wire formats those adapters read.
//!
//! Boundaries:
//! - Do not encode planning rules (those live in `itinera-planner`).
//! - Perform no file-system access; callers hand over readers.
//!
//! Invariants:
//! - Every adapter is `Send + Sync` so the planner can query it from many
//!   threads at once.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod http;

pub use catalog::{AirportCatalog, AirportCatalogError};
pub use http::{DEFAULT_USER_AGENT, HttpAirportLookup, HttpAirportLookupConfig, LookupBuildError};
