//! The persisted catalog file written by the sync routine
//!
//! The sync routine stores what the backend returned for devices and scenes,
//! plus optional last-known status readings. This module only reads it.

use crate::catalog::entity::Entity;
use crate::catalog::Catalog;
use crate::core::error::Result;
use crate::core::types::{Capability, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub device_id: String,
    pub label: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRecord {
    pub scene_id: String,
    pub scene_name: String,
}

/// One attribute reading, e.g. `level = 40 %`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReading {
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Last-known readings per device, keyed by attribute tag
pub type DeviceStatus = BTreeMap<String, StatusReading>;

/// On-disk catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub scenes: Vec<SceneRecord>,
    #[serde(default)]
    pub status: BTreeMap<EntityId, DeviceStatus>,
}

impl CatalogSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    /// Parse a snapshot from a JSON string
    pub fn parse_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build the in-memory catalog the resolver reads
    pub fn to_catalog(&self) -> Catalog {
        let devices = self
            .devices
            .iter()
            .map(|d| {
                Entity::device(
                    d.device_id.clone(),
                    d.label.clone(),
                    d.capabilities.iter().map(|c| Capability::new(c.clone())),
                )
            })
            .collect();
        let scenes = self
            .scenes
            .iter()
            .map(|s| Entity::scene(s.scene_id.clone(), s.scene_name.clone()))
            .collect();
        Catalog::new(devices, scenes)
    }

    /// Last-known status readings for one device
    pub fn status_of(&self, id: &EntityId) -> Option<&DeviceStatus> {
        self.status.get(id)
    }
}
