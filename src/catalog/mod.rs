//! Read-only snapshot of known devices and scenes
//!
//! The catalog is produced by an external sync routine and replaced wholesale
//! on refresh. Resolution calls borrow it and never mutate it.

pub mod entity;
pub mod snapshot;

pub use entity::Entity;
pub use snapshot::{CatalogSnapshot, DeviceStatus, StatusReading};

use crate::core::types::EntityId;

/// Source of the last persisted entity lists
pub trait CatalogProvider {
    fn current_devices(&self) -> &[Entity];
    fn current_scenes(&self) -> &[Entity];
}

/// Snapshot of entities used for one or more resolution calls
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    devices: Vec<Entity>,
    scenes: Vec<Entity>,
}

impl Catalog {
    pub fn new(devices: Vec<Entity>, scenes: Vec<Entity>) -> Self {
        Self { devices, scenes }
    }

    /// Copy the current lists out of any provider
    pub fn from_provider(provider: &dyn CatalogProvider) -> Self {
        Self::new(
            provider.current_devices().to_vec(),
            provider.current_scenes().to_vec(),
        )
    }

    pub fn devices(&self) -> &[Entity] {
        &self.devices
    }

    pub fn scenes(&self) -> &[Entity] {
        &self.scenes
    }

    /// Devices first, then scenes
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.devices.iter().chain(self.scenes.iter())
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities().find(|e| &e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len() + self.scenes.len()
    }
}

impl CatalogProvider for Catalog {
    fn current_devices(&self) -> &[Entity] {
        &self.devices
    }

    fn current_scenes(&self) -> &[Entity] {
        &self.scenes
    }
}
