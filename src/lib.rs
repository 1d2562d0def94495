//! Plant Monitor - soil moisture dashboard for the plant data service
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod error;
pub mod plant_api;
pub mod routes;
pub mod view;
