//! Sensor Dashboard - charts, inline editing and export triggers for the sensor dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod actions;
pub mod api;
pub mod chart;
pub mod config;
pub mod edit;
pub mod error;
pub mod export;
pub mod models;
pub mod page;
