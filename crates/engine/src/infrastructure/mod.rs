//! Infrastructure - ports, storage adapters, and shared runtime plumbing.

pub mod clock;
pub mod locks;
pub mod persistence;
pub mod ports;
pub mod settings;
