//! CCI momentum scanner: concurrent scan-and-score pipeline over NSE and US equities.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
