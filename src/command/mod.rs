//! Command pipeline
//!
//! Query text -> QuerySegmenter -> IntentResolver -> Resolution, and on
//! selection: argument -> Invocation -> CommandPayload -> CommandExecutor.

pub mod argument;
pub mod candidate;
pub mod executor;
pub mod params;
pub mod payload;
pub mod registry;
pub mod resolver;
pub mod segmenter;

pub use argument::Invocation;
pub use candidate::{Candidate, Resolution, ResolvedIntent, SCENE_VERB};
pub use executor::{CommandExecutor, CredentialStore, DryRunExecutor, EnvCredentialStore, ExecutionResult};
pub use params::{ParamCompletion, ParamKind, ParameterSpec};
pub use payload::{CommandPayload, DeviceCommand};
pub use registry::{CommandRegistry, CommandSpec};
pub use resolver::IntentResolver;
pub use segmenter::{QuerySegmenter, Segment, SegmentRule};
