//! Volume indicators: whale volume

pub mod whale;

pub use whale::*;
