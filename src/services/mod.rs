//! External collaborators: market data, universes, sectors, calendar, notifications.

pub mod calendar;
pub mod error;
pub mod market_data;
pub mod notify;
pub mod sectors;
pub mod universe;
pub mod yahoo;

pub use error::MarketDataError;
