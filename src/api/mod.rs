//! Census API access
//!
//! A single GET against the county endpoint; no paging and no retries.

pub mod client;

pub use client::{CensusClient, CensusResponse, body_preview};
