//! Data models for cities and insights.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod city;
pub mod insight;

// Re-export all model types
pub use city::City;
pub use insight::CityInsight;
