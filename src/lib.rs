//! Wheel Deal Library
//!
//! Marketplace logic for renting and selling motorcycles, exposed for the
//! binary and for integration tests.

pub mod app;
pub mod booking;
pub mod chat;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod profile;
pub mod rental;
pub mod search;
pub mod sell;
pub mod theme;
pub mod toast;
pub mod ui;
