//! Type definitions for cloudinfo configuration

mod runtime_config;

pub use runtime_config::*;
