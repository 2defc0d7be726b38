//! Global Clock Library
//!
//! This library provides the core functionality for the Global Clock
//! dashboard: the city catalog, timezone-aware formatting, selection state
//! with persistence and sharing, map projection, and the insight client.

// Module declarations
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod insight;
pub mod locale;
pub mod models;
pub mod projector;
pub mod selection;
pub mod share;
pub mod store;
pub mod tui;
