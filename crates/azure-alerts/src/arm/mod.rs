//! Azure Resource Manager plumbing.
//!
//! [`ArmClient`] issues authenticated create-or-replace (`PUT`) calls for a
//! resource ID; [`models`] holds the request bodies for the monitoring
//! resources this tool provisions.

mod client;
pub mod models;

pub use client::{resource_url, ArmClient, ARM_BASE_URL, DEFAULT_TIMEOUT_SECS};
