//! Application ports

pub mod registry;
pub mod services;
