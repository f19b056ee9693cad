//! Momentum indicators: CCI

pub mod cci;

pub use cci::*;
