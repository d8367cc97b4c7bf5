//! Fleet booking API client library
//!
//! A Rust async client for the logistics vehicle booking REST API: vehicles,
//! availability search, bookings and status management.

pub mod api;
pub mod error;
pub mod model;
pub mod transport;

mod client;
mod config;

pub use client::*;
pub use config::ClientConfig;
