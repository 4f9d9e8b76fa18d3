//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier assigned by the backend to a device or scene
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Token naming a controllable feature of a device (e.g. `switch`, `switchLevel`)
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(pub String);

impl Capability {
    /// Sentinel token for commands every device accepts
    pub const GLOBAL: &'static str = "global";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Capability {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// The two kinds of addressable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Device,
    Scene,
}

/// Where the current query text lands. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionState {
    /// Zero or several entities match
    AwaitingEntity,
    /// One device pinned, no verb resolved yet
    AwaitingCommand,
    /// Device and verb pinned, parameter missing or invalid
    AwaitingParameter,
    /// Entity, verb and valid parameters all present
    Resolved,
}
