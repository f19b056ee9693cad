pub mod messages;
pub mod provider;

pub use provider::{YahooCandleSource, DEFAULT_BASE_URL};
