//! Execution boundary - where payloads leave the crate
//!
//! No network executor ships here. The binary uses [`DryRunExecutor`] to show
//! what would be sent.

use crate::command::payload::CommandPayload;
use crate::core::error::Result;
use crate::core::types::EntityId;

/// Sends payloads to the home automation backend
pub trait CommandExecutor {
    fn execute(&mut self, payload: &CommandPayload) -> Result<ExecutionResult>;
}

/// Answers whether an API credential is configured
pub trait CredentialStore {
    fn has_token(&self) -> bool;
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub entity: EntityId,
    pub sent: bool,
    pub message: String,
}

/// Records payloads instead of sending them
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    pub sent: Vec<CommandPayload>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandExecutor for DryRunExecutor {
    fn execute(&mut self, payload: &CommandPayload) -> Result<ExecutionResult> {
        let message = payload.to_json()?;
        tracing::info!(entity = %payload.entity(), "dry run, payload not sent");
        self.sent.push(payload.clone());
        Ok(ExecutionResult {
            entity: payload.entity().clone(),
            sent: false,
            message,
        })
    }
}

/// Credential held in an environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    var: String,
}

impl EnvCredentialStore {
    pub const DEFAULT_VAR: &'static str = "HOMECMD_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn has_token(&self) -> bool {
        std::env::var(&self.var).is_ok_and(|token| !token.trim().is_empty())
    }
}

/// Fixed answer, for tests and embedding
impl CredentialStore for bool {
    fn has_token(&self) -> bool {
        *self
    }
}
