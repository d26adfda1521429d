//! Wire types

pub mod scoring;

pub use scoring::*;
