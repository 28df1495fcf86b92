//! Domain ports
//!
//! Interfaces implemented by adapters outside the domain layer.

pub mod providers;
