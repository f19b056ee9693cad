//! Core application primitives (orchestrator, feed, service, scheduler, HTTP)

pub mod bootstrap;
pub mod feed;
pub mod http;
pub mod orchestrator;
pub mod runtime;
pub mod scheduler;

pub use bootstrap::build_service;
pub use feed::*;
pub use http::*;
pub use orchestrator::*;
pub use runtime::*;
pub use scheduler::*;
