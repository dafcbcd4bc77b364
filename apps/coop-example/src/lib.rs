//! # coop-example
//!
//! Hosting surfaces for the COOP integration example plugin:
//! - [`api`]: HTTP bridge exposing the manifest and signals as JSON
//! - [`credentials`]: org configs loaded from a TOML file

pub mod api;
pub mod credentials;
