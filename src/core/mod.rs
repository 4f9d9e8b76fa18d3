pub mod config;
pub mod error;
pub mod types;

pub use config::{ColorTable, ResolverConfig, Settings};
pub use error::{HomeCmdError, Result};
pub use types::{Capability, EntityId, EntityKind, ResolutionState};
