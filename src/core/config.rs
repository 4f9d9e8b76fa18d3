//! Resolver settings loaded from TOML
//!
//! Everything the resolver would otherwise read from process-wide state
//! (match thresholds, the show-status toggle, the color table) lives here
//! and is passed in explicitly.

use crate::core::error::{HomeCmdError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Match thresholds and display toggles for the intent resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum fuzzy score while segmenting the query (0 - 100)
    ///
    /// Used for the three trial label strings. Lower means the segmenter
    /// recognizes a device earlier, before most of its label is typed.
    pub coarse_threshold: f64,

    /// Minimum fuzzy score for the final entity filter (0 - 100)
    ///
    /// Must be >= coarse_threshold. Every match strategy scores at least 75,
    /// so the default accepts any match and only orders them.
    pub strict_threshold: f64,

    /// Show a live status record when exactly one device is pinned
    ///
    /// Adds latency on the host side, which has to fetch the status.
    pub show_status: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            coarse_threshold: 60.0,
            strict_threshold: 75.0,
            show_status: false,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_status(mut self, show_status: bool) -> Self {
        self.show_status = show_status;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("coarse_threshold", self.coarse_threshold),
            ("strict_threshold", self.strict_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(HomeCmdError::InvalidSettings(format!(
                    "{} ({}) must be within 0..=100",
                    name, value
                )));
            }
        }

        if self.coarse_threshold > self.strict_threshold {
            return Err(HomeCmdError::InvalidSettings(format!(
                "coarse_threshold ({}) should be <= strict_threshold ({})",
                self.coarse_threshold, self.strict_threshold
            )));
        }

        Ok(())
    }
}

/// Named colors accepted by the `color` command, keyed by lowercase name
/// without spaces. Values are `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable(BTreeMap<String, String>);

impl Default for ColorTable {
    fn default() -> Self {
        let colors = [
            ("red", "#FF0000"),
            ("orange", "#FFA500"),
            ("yellow", "#FFFF00"),
            ("green", "#00FF00"),
            ("cyan", "#00FFFF"),
            ("blue", "#0000FF"),
            ("purple", "#800080"),
            ("pink", "#FFC0CB"),
            ("white", "#FFFFFF"),
            ("warmwhite", "#FDF4DC"),
            ("coolwhite", "#F4FDFF"),
        ];
        Self(
            colors
                .into_iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string()))
                .collect(),
        )
    }
}

impl ColorTable {
    pub fn new(colors: BTreeMap<String, String>) -> Self {
        Self(
            colors
                .into_iter()
                .map(|(name, hex)| (normalize_color_name(&name), hex.to_uppercase()))
                .collect(),
        )
    }

    /// Color names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex code for a named color, ignoring case and spaces
    pub fn hex_for(&self, name: &str) -> Option<&str> {
        self.0.get(&normalize_color_name(name)).map(String::as_str)
    }
}

fn normalize_color_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub colors: ColorTable,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse settings from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.colors = ColorTable::new(settings.colors.0);
        settings.resolver.validate()?;
        Ok(settings)
    }
}
