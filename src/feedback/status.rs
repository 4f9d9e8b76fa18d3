//! Status preview for a single pinned device

use crate::catalog::snapshot::{CatalogSnapshot, DeviceStatus, StatusReading};
use crate::core::types::EntityId;

/// Supplies last-known readings for a device
pub trait StatusSource {
    fn status(&self, id: &EntityId) -> Option<DeviceStatus>;
}

impl StatusSource for CatalogSnapshot {
    fn status(&self, id: &EntityId) -> Option<DeviceStatus> {
        self.status_of(id).cloned()
    }
}

/// Attribute tags shown in the preview, in display order
const GLYPHS: &[(&str, &str)] = &[
    ("switch", "🎚"),
    ("level", "💡"),
    ("lock", "🔒"),
    ("battery", "🔋"),
    ("color", "🎨"),
    ("windowShade", "🪟"),
    ("shadeLevel", "🌒"),
    ("contact", "🔓"),
    ("heatingSetpoint", "🔥"),
    ("coolingSetpoint", "❄️"),
    ("thermostatOperatingState", "🏃"),
    ("temperature", "🌡"),
    ("thermostatFanMode", "💨"),
    ("thermostatMode", "😰"),
];

fn format_reading(reading: &StatusReading) -> String {
    let value = match &reading.value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match &reading.unit {
        Some(unit) => format!("{}{}", value, unit),
        None => value,
    }
}

/// One line of glyph-prefixed readings. Unknown tags are skipped.
pub fn format_status(status: &DeviceStatus) -> String {
    GLYPHS
        .iter()
        .filter_map(|(tag, glyph)| {
            status
                .get(*tag)
                .map(|reading| format!("{} {}", glyph, format_reading(reading)))
        })
        .collect::<Vec<_>>()
        .join("  ")
}
