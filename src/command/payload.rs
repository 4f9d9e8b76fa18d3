//! Backend request bodies built from a decoded invocation
//!
//! The resolver never offers an unsupported verb, but an argument can be
//! replayed against a newer catalog, so eligibility is checked again here.
//! Informational verbs such as `status` are refused.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::command::argument::Invocation;
use crate::command::candidate::SCENE_VERB;
use crate::command::registry::CommandRegistry;
use crate::core::config::ColorTable;
use crate::core::error::{HomeCmdError, Result};
use crate::core::types::EntityId;

/// One command sent to a device component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCommand {
    pub component: String,
    pub capability: String,
    pub command: String,
    pub arguments: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandBody {
    pub commands: Vec<DeviceCommand>,
}

/// A request ready for the executor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandPayload {
    DeviceCommand { device_id: EntityId, body: CommandBody },
    SceneRun { scene_id: EntityId },
}

impl CommandPayload {
    pub fn build(
        invocation: &Invocation,
        catalog: &Catalog,
        registry: &CommandRegistry,
        colors: &ColorTable,
    ) -> Result<Self> {
        let entity = catalog
            .get(invocation.entity())
            .ok_or_else(|| HomeCmdError::UnknownEntity(invocation.entity().clone()))?;

        let (verb, params) = match invocation {
            Invocation::Scene { .. } if entity.is_scene() => {
                return Ok(CommandPayload::SceneRun {
                    scene_id: entity.id.clone(),
                });
            }
            Invocation::Scene { .. } => (SCENE_VERB, &[][..]),
            Invocation::Device { verb, params, .. } => (verb.as_str(), params.as_slice()),
        };

        let unsupported = || HomeCmdError::UnsupportedCommand {
            entity: entity.label.clone(),
            verb: verb.to_string(),
        };
        let spec = registry
            .eligible_verb(entity, verb)
            .filter(|spec| spec.executable)
            .ok_or_else(unsupported)?;

        let arguments = match &spec.parameter {
            None => Vec::new(),
            Some(parameter) => {
                let value = params.first().ok_or_else(|| HomeCmdError::MissingParameter {
                    verb: spec.verb.clone(),
                })?;
                if !parameter.accepts(value) {
                    return Err(HomeCmdError::InvalidParameter {
                        verb: spec.verb.clone(),
                        value: value.clone(),
                    });
                }
                vec![parameter.kind().coerce(&spec.verb, value, colors)?]
            }
        };

        Ok(CommandPayload::DeviceCommand {
            device_id: entity.id.clone(),
            body: CommandBody {
                commands: vec![DeviceCommand {
                    component: spec.component.clone(),
                    capability: spec.required_capability.as_str().to_string(),
                    command: spec.command.clone(),
                    arguments,
                }],
            },
        })
    }

    pub fn entity(&self) -> &EntityId {
        match self {
            CommandPayload::DeviceCommand { device_id, .. } => device_id,
            CommandPayload::SceneRun { scene_id } => scene_id,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
