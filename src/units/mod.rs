//! Unit system: unit types, their registry, and unit instances.
//!
//! - `UnitType`: static stats (speed, flexibility, combat values, traits)
//! - `UnitRegistry`: stat lookup by `UnitTypeId`
//! - `UnitInstance`: a specific unit, identified by value
//! - `UnitPlacement` / `UnitWithPlacement`: where a unit stands

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{RangedProfile, UnitType, UnitTypeId};
pub use instance::{UnitInstance, UnitPlacement, UnitWithPlacement};
pub use registry::UnitRegistry;
