//! pokegrid - sprite-atlas grid and detail panel
//!
//! The library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod atlas;
pub mod catalog;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod selection;
pub mod state;
