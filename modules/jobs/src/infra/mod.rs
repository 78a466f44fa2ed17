//! Infrastructure adapters for the domain contracts.

pub mod upstream;
