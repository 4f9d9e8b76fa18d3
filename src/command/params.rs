//! Parameter specifications: enumerated domains, validating patterns, coercion

use crate::core::config::ColorTable;
use crate::core::error::{HomeCmdError, Result};
use regex::{Regex, RegexBuilder};
use serde_json::{json, Value};

/// How a validated parameter token is converted for the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Text,
    /// Named color or six hex digits, sent as `{"hex": "#RRGGBB"}`
    Color,
}

impl ParamKind {
    /// Convert an accepted token into its backend argument
    pub fn coerce(&self, verb: &str, token: &str, colors: &ColorTable) -> Result<Value> {
        let invalid = || HomeCmdError::InvalidParameter {
            verb: verb.to_string(),
            value: token.to_string(),
        };
        match self {
            ParamKind::Integer => token.parse::<i64>().map(Value::from).map_err(|_| invalid()),
            ParamKind::Text => Ok(Value::String(token.to_string())),
            ParamKind::Color => {
                let hex = match colors.hex_for(token) {
                    Some(hex) => hex.to_string(),
                    None if is_hex_color(token) => format!("#{}", token.to_uppercase()),
                    None => return Err(invalid()),
                };
                Ok(json!({ "hex": hex }))
            }
        }
    }
}

fn is_hex_color(token: &str) -> bool {
    token.len() == 6 && token.chars().all(|c| c.is_ascii_hexdigit())
}

/// Case-insensitive regex that must match the whole token
#[derive(Debug, Clone)]
pub struct ParamPattern {
    source: String,
    regex: Regex,
}

impl ParamPattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^(?:{})$", source))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, token: &str) -> bool {
        self.regex.is_match(token)
    }
}

/// One proposed value for a parameter slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCompletion {
    pub value: String,
    pub is_valid: bool,
}

/// What a command accepts as its single parameter
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    domain: Option<Vec<String>>,
    pattern: Option<ParamPattern>,
    kind: ParamKind,
}

impl ParameterSpec {
    /// Closed list of allowed values, offered as completions in sorted order
    pub fn enumerated<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: Some(values.into_iter().map(Into::into).collect()),
            pattern: None,
            kind: ParamKind::Text,
        }
    }

    /// Free text validated by a pattern
    pub fn pattern(source: &str, kind: ParamKind) -> Result<Self> {
        Ok(Self {
            domain: None,
            pattern: Some(ParamPattern::new(source)?),
            kind,
        })
    }

    /// Accept literals matching `source` when no domain value matches
    pub fn with_pattern(mut self, source: &str) -> Result<Self> {
        self.pattern = Some(ParamPattern::new(source)?);
        Ok(self)
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn domain(&self) -> Option<&[String]> {
        self.domain.as_deref()
    }

    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_ref().map(ParamPattern::source)
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Contract check run once at startup
    pub fn validate(&self, verb: &str) -> Result<()> {
        match &self.domain {
            Some(values) if values.is_empty() => Err(HomeCmdError::InvalidCommandSpec {
                verb: verb.to_string(),
                reason: "enumerated domain has no values".into(),
            }),
            None if self.pattern.is_none() => Err(HomeCmdError::InvalidCommandSpec {
                verb: verb.to_string(),
                reason: "parameter has neither a domain nor a pattern".into(),
            }),
            _ => Ok(()),
        }
    }

    /// Whether a token is an acceptable value
    pub fn accepts(&self, token: &str) -> bool {
        let in_domain = self
            .domain
            .as_ref()
            .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(token)));
        in_domain || self.pattern.as_ref().is_some_and(|p| p.is_match(token))
    }

    /// Completions for a partially typed token.
    ///
    /// Domain values starting with the token are returned sorted and valid.
    /// With no domain hit, the raw token (lowercased) is returned once,
    /// valid only if the pattern accepts it.
    pub fn complete(&self, token: &str) -> Vec<ParamCompletion> {
        let prefix = token.to_lowercase();

        if let Some(values) = &self.domain {
            let mut hits: Vec<&String> = values
                .iter()
                .filter(|v| v.to_lowercase().starts_with(&prefix))
                .collect();
            hits.sort();
            if !hits.is_empty() {
                return hits
                    .into_iter()
                    .map(|v| ParamCompletion {
                        value: v.clone(),
                        is_valid: true,
                    })
                    .collect();
            }
        }

        let is_valid = self.pattern.as_ref().is_some_and(|p| p.is_match(&prefix));
        vec![ParamCompletion {
            value: prefix,
            is_valid,
        }]
    }
}
