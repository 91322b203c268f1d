//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (SQLite, HTTP, config files).

pub mod api;
pub mod app_config;
pub mod db;
