//! Unit type registry for stat lookup.

use rustc_hash::FxHashMap;

use super::definition::{UnitType, UnitTypeId};
use super::instance::UnitInstance;

/// Registry of unit type definitions.
///
/// ## Example
///
/// ```
/// use rust_wargame::units::{UnitRegistry, UnitType, UnitTypeId};
///
/// let mut registry = UnitRegistry::new();
/// registry.register(UnitType::new(UnitTypeId::new(1), "Spearmen").with_speed(2));
///
/// assert_eq!(registry.get(UnitTypeId::new(1)).unwrap().name, "Spearmen");
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnitRegistry {
    types: FxHashMap<UnitTypeId, UnitType>,
}

impl UnitRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit type.
    ///
    /// Panics if a type with the same ID already exists.
    pub fn register(&mut self, unit_type: UnitType) {
        if self.types.contains_key(&unit_type.id) {
            panic!("Unit type with ID {:?} already registered", unit_type.id);
        }
        self.types.insert(unit_type.id, unit_type);
    }

    /// Get a unit type.
    #[must_use]
    pub fn get(&self, id: UnitTypeId) -> Option<&UnitType> {
        self.types.get(&id)
    }

    /// Get the type of a unit instance.
    #[must_use]
    pub fn type_of(&self, unit: &UnitInstance) -> Option<&UnitType> {
        self.get(unit.unit_type)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all unit types.
    pub fn iter(&self) -> impl Iterator<Item = &UnitType> {
        self.types.values()
    }
}
