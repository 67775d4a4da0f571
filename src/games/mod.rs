//! Ready-made game setups.

pub mod standard;
