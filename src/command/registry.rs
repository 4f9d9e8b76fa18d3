//! Command registry - which verbs exist, what they need, and who may use them

use crate::catalog::Entity;
use crate::command::params::{ParamKind, ParameterSpec};
use crate::core::config::ColorTable;
use crate::core::error::{HomeCmdError, Result};
use crate::core::types::Capability;
use ahash::{AHashMap, AHashSet};

/// Component every default command targets
pub const MAIN_COMPONENT: &str = "main";

/// A verb the user can type after an entity label
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Short lowercase token typed by the user
    pub verb: String,
    /// Capability an entity must expose, or the global sentinel
    pub required_capability: Capability,
    /// Backend command name sent by the executor
    pub command: String,
    pub component: String,
    pub parameter: Option<ParameterSpec>,
    /// False for verbs that only show information and never reach the backend
    pub executable: bool,
}

impl CommandSpec {
    pub fn new(verb: &str, capability: &str, command: &str) -> Self {
        Self {
            verb: verb.to_lowercase(),
            required_capability: Capability::new(capability),
            command: command.to_string(),
            component: MAIN_COMPONENT.to_string(),
            parameter: None,
            executable: true,
        }
    }

    /// Mark the verb as display-only
    pub fn informational(mut self) -> Self {
        self.executable = false;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameter = Some(parameter);
        self
    }

    pub fn takes_parameter(&self) -> bool {
        self.parameter.is_some()
    }

    pub fn is_eligible_for(&self, entity: &Entity) -> bool {
        entity.supports(&self.required_capability)
    }

    pub fn validate(&self) -> Result<()> {
        if self.verb.is_empty() || self.verb.contains(char::is_whitespace) {
            return Err(HomeCmdError::InvalidCommandSpec {
                verb: self.verb.clone(),
                reason: "verb must be a single non-empty token".into(),
            });
        }
        match &self.parameter {
            Some(parameter) => parameter.validate(&self.verb),
            None => Ok(()),
        }
    }
}

/// Ordered table of commands. Registry order is the completion order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
    index: AHashMap<String, usize>,
    /// Capabilities some non-global command needs
    capabilities: AHashSet<Capability>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in command set. Color names come from the settings.
    pub fn with_defaults(colors: &ColorTable) -> Result<Self> {
        let level = || ParameterSpec::pattern("[0-9]{1,2}|100", ParamKind::Integer);
        let setpoint = || ParameterSpec::pattern("[0-9]{1,3}", ParamKind::Integer);
        let color = if colors.is_empty() {
            ParameterSpec::pattern("[0-9a-f]{6}", ParamKind::Color)?
        } else {
            ParameterSpec::enumerated(colors.names())
                .with_pattern("[0-9a-f]{6}")?
                .with_kind(ParamKind::Color)
        };

        let mut registry = Self::new();
        for spec in [
            CommandSpec::new("status", Capability::GLOBAL, "status").informational(),
            CommandSpec::new("on", "switch", "on"),
            CommandSpec::new("off", "switch", "off"),
            CommandSpec::new("toggle", "switch", "toggle"),
            CommandSpec::new("dim", "switchLevel", "setLevel").with_parameter(level()?),
            CommandSpec::new("slevel", "windowShadeLevel", "setShadeLevel")
                .with_parameter(level()?),
            CommandSpec::new("open", "windowShade", "open"),
            CommandSpec::new("close", "windowShade", "close"),
            CommandSpec::new("lock", "lock", "lock"),
            CommandSpec::new("unlock", "lock", "unlock"),
            CommandSpec::new("view", "contactSensor", "view"),
            CommandSpec::new("color", "colorControl", "setColor").with_parameter(color),
            CommandSpec::new("mode", "thermostatMode", "setThermostatMode")
                .with_parameter(ParameterSpec::enumerated(["auto", "heat", "cool", "off"])),
            CommandSpec::new("heat", "thermostatHeatingSetpoint", "setHeatingSetpoint")
                .with_parameter(setpoint()?),
            CommandSpec::new("cool", "thermostatCoolingSetpoint", "setCoolingSetpoint")
                .with_parameter(setpoint()?),
        ] {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Add a command after validating it. Verbs must be unique.
    pub fn register(&mut self, spec: CommandSpec) -> Result<()> {
        spec.validate()?;
        if self.index.contains_key(&spec.verb) {
            return Err(HomeCmdError::InvalidCommandSpec {
                verb: spec.verb,
                reason: "verb registered twice".into(),
            });
        }
        self.index.insert(spec.verb.clone(), self.specs.len());
        if !spec.required_capability.is_global() {
            self.capabilities.insert(spec.required_capability.clone());
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Re-check every entry; run once at startup
    pub fn validate(&self) -> Result<()> {
        self.specs.iter().try_for_each(CommandSpec::validate)
    }

    /// Look up a verb, ignoring case
    pub fn get(&self, verb: &str) -> Option<&CommandSpec> {
        self.index
            .get(&verb.to_lowercase())
            .map(|&i| &self.specs[i])
    }

    pub fn all(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Commands the entity may receive, in registry order
    pub fn eligible_for<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a CommandSpec> + 'a {
        self.specs.iter().filter(move |spec| spec.is_eligible_for(entity))
    }

    /// Look up a verb only if the entity may receive it
    pub fn eligible_verb(&self, entity: &Entity, verb: &str) -> Option<&CommandSpec> {
        self.get(verb).filter(|spec| spec.is_eligible_for(entity))
    }

    /// Capabilities some non-global command needs
    pub fn supported_capabilities(&self) -> &AHashSet<Capability> {
        &self.capabilities
    }

    /// A device is worth segmenting against only if some command targets one
    /// of its capabilities
    pub fn is_actionable(&self, entity: &Entity) -> bool {
        entity.is_device() && entity.capabilities.iter().any(|c| self.capabilities.contains(c))
    }
}
