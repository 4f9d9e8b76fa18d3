//! Devices and scenes as the resolver sees them

use crate::core::types::{Capability, EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An addressable device or scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Backend identifier
    pub id: EntityId,
    /// Human-readable label, may contain spaces
    pub label: String,
    pub kind: EntityKind,
    /// Empty for scenes
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl Entity {
    pub fn device<I, C>(id: impl Into<String>, label: impl Into<String>, capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self {
            id: EntityId::new(id),
            label: label.into(),
            kind: EntityKind::Device,
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn scene(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            label: label.into(),
            kind: EntityKind::Scene,
            capabilities: BTreeSet::new(),
        }
    }

    pub fn is_device(&self) -> bool {
        self.kind == EntityKind::Device
    }

    pub fn is_scene(&self) -> bool {
        self.kind == EntityKind::Scene
    }

    /// Whether a command gated on `capability` may target this entity.
    /// Scenes accept nothing but their implicit run command.
    pub fn supports(&self, capability: &Capability) -> bool {
        self.is_device() && (capability.is_global() || self.capabilities.contains(capability))
    }

    pub fn has_capability(&self, token: &str) -> bool {
        self.capabilities.iter().any(|c| c.as_str() == token)
    }
}
