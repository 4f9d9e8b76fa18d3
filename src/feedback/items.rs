//! Display records and the script-filter document they are emitted in

use serde::{Deserialize, Serialize};

pub const SCENE_ICON: &str = "icons/scene.png";
pub const NOTE_ICON: &str = "icons/note.png";
pub const INFO_ICON: &str = "icons/info.png";
pub const SYNC_ICON: &str = "icons/sync.png";
pub const WEB_ICON: &str = "icons/web.png";
pub const BURN_ICON: &str = "icons/burn.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

impl Icon {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// One row shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub title: String,
    pub subtitle: String,
    /// Opaque argument handed back when the row is chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    /// Text the query is replaced with on tab completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    pub icon: Icon,
    pub valid: bool,
}

impl DisplayItem {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, icon: &str) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: None,
            autocomplete: None,
            icon: Icon::new(icon),
            valid: false,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }
}

/// The JSON document a launcher reads: `{"items": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFilter {
    pub items: Vec<DisplayItem>,
}

impl ScriptFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_filter_json_shape() {
        let mut doc = ScriptFilter::new();
        doc.push(
            DisplayItem::new("Lamp", "Turn Lamp on", "icons/switch.png")
                .with_arg("--device-uid d1 --device-command on")
                .with_autocomplete("Lamp on")
                .valid(true),
        );
        doc.push(DisplayItem::new("No Devices...", "Run update first", NOTE_ICON));

        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["items"][0]["icon"]["path"], "icons/switch.png");
        assert_eq!(value["items"][0]["valid"], true);
        assert!(value["items"][1].get("arg").is_none());
        assert_eq!(value["items"][1]["valid"], false);
    }
}
