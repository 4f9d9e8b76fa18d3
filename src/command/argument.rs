//! Argument strings carried by display records
//!
//! A selected record hands its `arg` back to the binary, which decodes it
//! into an [`Invocation`]. The format is flag based:
//!
//! ```text
//! --device-uid <id> --device-command <verb> [--device-params <param>]
//! --scene-uid <id>
//! ```

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::space1,
    combinator::{all_consuming, opt},
    sequence::preceded,
    IResult, Parser,
};

use crate::catalog::Catalog;
use crate::command::candidate::ResolvedIntent;
use crate::core::error::{HomeCmdError, Result};
use crate::core::types::EntityId;

/// What the user picked, decoded from a record's argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Device {
        entity: EntityId,
        verb: String,
        params: Vec<String>,
    },
    Scene {
        entity: EntityId,
    },
}

impl Invocation {
    /// Build from a resolved intent, using the catalog to tell scenes apart
    pub fn from_intent(intent: &ResolvedIntent, catalog: &Catalog) -> Result<Self> {
        let entity = catalog
            .get(&intent.entity)
            .ok_or_else(|| HomeCmdError::UnknownEntity(intent.entity.clone()))?;
        if entity.is_scene() {
            Ok(Invocation::Scene {
                entity: entity.id.clone(),
            })
        } else {
            Ok(Invocation::Device {
                entity: entity.id.clone(),
                verb: intent.verb.clone(),
                params: intent.params.clone(),
            })
        }
    }

    pub fn entity(&self) -> &EntityId {
        match self {
            Invocation::Device { entity, .. } | Invocation::Scene { entity } => entity,
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode an argument string
    pub fn parse(input: &str) -> Result<Self> {
        all_consuming(alt((device, scene)))
            .parse(input.trim())
            .map(|(_, invocation)| invocation)
            .map_err(|_| HomeCmdError::MalformedArgument(input.to_string()))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Device { entity, verb, params } => {
                write!(f, "--device-uid {} --device-command {}", entity, verb)?;
                if !params.is_empty() {
                    write!(f, " --device-params {}", params.join(" "))?;
                }
                Ok(())
            }
            Invocation::Scene { entity } => write!(f, "--scene-uid {}", entity),
        }
    }
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

fn flag<'a>(name: &'static str, input: &'a str) -> IResult<&'a str, &'a str> {
    preceded((tag(name), space1), token).parse(input)
}

fn device_params(input: &str) -> IResult<&str, &str> {
    let (input, _) = space1(input)?;
    flag("--device-params", input)
}

fn device(input: &str) -> IResult<&str, Invocation> {
    let (input, uid) = flag("--device-uid", input)?;
    let (input, _) = space1(input)?;
    let (input, verb) = flag("--device-command", input)?;
    let (input, param) = opt(device_params).parse(input)?;
    Ok((
        input,
        Invocation::Device {
            entity: EntityId::new(uid),
            verb: verb.to_lowercase(),
            params: param.into_iter().map(str::to_string).collect(),
        },
    ))
}

fn scene(input: &str) -> IResult<&str, Invocation> {
    let (input, uid) = flag("--scene-uid", input)?;
    Ok((
        input,
        Invocation::Scene {
            entity: EntityId::new(uid),
        },
    ))
}
