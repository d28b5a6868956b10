//! Heredity math utilities.

pub mod math;

pub use math::posterior::*;
pub use math::stable::*;
