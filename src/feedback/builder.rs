//! Turns a resolution into display records

use crate::catalog::{Catalog, Entity};
use crate::command::argument::Invocation;
use crate::command::candidate::{Candidate, Resolution};
use crate::command::executor::CredentialStore;
use crate::command::registry::CommandRegistry;
use crate::command::resolver::IntentResolver;
use crate::core::config::ResolverConfig;
use crate::core::types::EntityId;
use crate::feedback::config_items::config_items;
use crate::feedback::items::{DisplayItem, ScriptFilter, NOTE_ICON, SCENE_ICON};
use crate::feedback::status::{format_status, StatusSource};
use crate::matching::FuzzyMatcher;

/// Device icon by capability, first match wins
const DEVICE_ICONS: &[(&str, &str)] = &[
    ("thermostatMode", "thermostat"),
    ("lock", "lock"),
    ("colorControl", "color-light"),
    ("switchLevel", "light"),
    ("windowShade", "shade"),
    ("contactSensor", "contact"),
];

pub fn device_icon(entity: &Entity) -> String {
    let name = DEVICE_ICONS
        .iter()
        .find(|(capability, _)| entity.has_capability(capability))
        .map_or("switch", |(_, icon)| *icon);
    format!("icons/{}.png", name)
}

/// Builds the script-filter document for one query
pub struct FeedbackBuilder<'a> {
    catalog: &'a Catalog,
    registry: &'a CommandRegistry,
    config: &'a ResolverConfig,
    credentials: &'a dyn CredentialStore,
    status: Option<&'a dyn StatusSource>,
    matcher: FuzzyMatcher,
}

impl<'a> FeedbackBuilder<'a> {
    pub fn new(
        catalog: &'a Catalog,
        registry: &'a CommandRegistry,
        config: &'a ResolverConfig,
        credentials: &'a dyn CredentialStore,
    ) -> Self {
        Self {
            catalog,
            registry,
            config,
            credentials,
            status: None,
            matcher: FuzzyMatcher::new(),
        }
    }

    pub fn with_status_source(mut self, status: &'a dyn StatusSource) -> Self {
        self.status = Some(status);
        self
    }

    /// Config records, then either a setup notice or the resolved results
    pub fn build(&self, query: &str) -> ScriptFilter {
        let mut doc = ScriptFilter::new();
        doc.items
            .extend(config_items(query, &self.matcher, self.config.coarse_threshold));

        if let Some(notice) = self.setup_notice() {
            tracing::info!(title = %notice.title, "setup required");
            doc.push(notice);
            return doc;
        }
        if query.trim().is_empty() {
            return doc;
        }

        let resolution = IntentResolver::new(self.catalog, self.registry, self.config).resolve(query);
        self.render(&resolution, &mut doc);
        doc
    }

    /// The single informational record shown when nothing can be resolved yet
    pub fn setup_notice(&self) -> Option<DisplayItem> {
        if !self.credentials.has_token() {
            return Some(DisplayItem::new(
                "No API key set...",
                "Use the apikey command to store your access token.",
                NOTE_ICON,
            ));
        }
        if self.catalog.devices().is_empty() {
            return Some(DisplayItem::new(
                "No Devices...",
                "Use the update command to fetch your devices and scenes.",
                NOTE_ICON,
            ));
        }
        None
    }

    /// Append one record per candidate, after the status preview if any.
    /// The record shape follows the candidate, so device verb rows keep their
    /// form when scenes match alongside.
    pub fn render(&self, resolution: &Resolution, doc: &mut ScriptFilter) {
        if let Some(entity) = resolution.status_entity.as_ref().and_then(|id| self.catalog.get(id)) {
            let verb = resolution.segment.verb_token();
            doc.push(self.status_item(entity, verb));
        }

        for candidate in &resolution.candidates {
            let Some(entity) = candidate.entity.as_ref().and_then(|id| self.catalog.get(id)) else {
                continue;
            };
            let item = if entity.is_scene() {
                scene_item(entity)
            } else if let Some(verb) = self.informational_verb(candidate) {
                self.status_item(entity, verb)
            } else if !candidate.eligible_verbs.is_empty() {
                // one of several devices; completing picks the device first
                ambiguous_device_item(entity, candidate)
            } else {
                device_item(entity, candidate)
            };
            doc.push(item);
        }
    }

    /// The candidate's verb when it only shows information
    fn informational_verb<'c>(&self, candidate: &'c Candidate) -> Option<&'c str> {
        let verb = candidate.verb.as_deref()?;
        let spec = self.registry.get(verb)?;
        (!spec.executable).then_some(verb)
    }

    fn status_text(&self, id: &EntityId) -> String {
        self.status
            .and_then(|source| source.status(id))
            .map(|status| format_status(&status))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "No status available".to_string())
    }

    /// Readings for a device; informational only
    fn status_item(&self, entity: &Entity, verb: &str) -> DisplayItem {
        DisplayItem::new(&entity.label, self.status_text(&entity.id), &device_icon(entity))
            .with_autocomplete(join_words([entity.label.as_str(), verb]))
    }
}

fn join_words<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn turn_subtitle(entity: &Entity, candidate: &Candidate) -> String {
    let verb = candidate.verb.as_deref().unwrap_or("");
    join_words(
        ["Turn", entity.label.as_str(), verb]
            .into_iter()
            .chain(candidate.params.iter().map(String::as_str)),
    )
}

fn device_arg(entity: &Entity, candidate: &Candidate) -> Option<String> {
    let verb = candidate.verb.clone()?;
    let invocation = Invocation::Device {
        entity: entity.id.clone(),
        verb,
        params: candidate.params.clone(),
    };
    Some(invocation.encode())
}

fn device_item(entity: &Entity, candidate: &Candidate) -> DisplayItem {
    let verb = candidate.verb.as_deref().unwrap_or("");
    let mut item = DisplayItem::new(&entity.label, turn_subtitle(entity, candidate), &device_icon(entity))
        .with_autocomplete(join_words([entity.label.as_str(), verb]))
        .valid(candidate.is_valid);
    item.arg = device_arg(entity, candidate);
    item
}

fn ambiguous_device_item(entity: &Entity, candidate: &Candidate) -> DisplayItem {
    let mut item = DisplayItem::new(&entity.label, turn_subtitle(entity, candidate), &device_icon(entity))
        .with_autocomplete(entity.label.as_str())
        .valid(candidate.is_valid);
    item.arg = device_arg(entity, candidate);
    item
}

fn scene_item(entity: &Entity) -> DisplayItem {
    DisplayItem::new(&entity.label, format!("Run {}", entity.label), SCENE_ICON)
        .with_arg(Invocation::Scene { entity: entity.id.clone() }.encode())
        .with_autocomplete(entity.label.as_str())
        .valid(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeviceStatus;
    use crate::catalog::StatusReading;
    use crate::core::config::ColorTable;
    use std::collections::BTreeMap;

    struct FixedStatus(BTreeMap<EntityId, DeviceStatus>);

    impl StatusSource for FixedStatus {
        fn status(&self, id: &EntityId) -> Option<DeviceStatus> {
            self.0.get(id).cloned()
        }
    }

    fn fixture() -> (Catalog, CommandRegistry) {
        let catalog = Catalog::new(
            vec![
                Entity::device("d1", "Living Room Lamp", ["switch", "switchLevel"]),
                Entity::device("d2", "Front Door", ["lock", "battery"]),
                Entity::device("d3", "Lamp One", ["switch"]),
                Entity::device("d4", "Lamp Two", ["switch"]),
            ],
            vec![Entity::scene("s1", "Good Night")],
        );
        let registry = CommandRegistry::with_defaults(&ColorTable::default()).unwrap();
        (catalog, registry)
    }

    fn build(query: &str) -> ScriptFilter {
        let (catalog, registry) = fixture();
        let config = ResolverConfig::default();
        FeedbackBuilder::new(&catalog, &registry, &config, &true).build(query)
    }

    #[test]
    fn test_device_icon_priority() {
        let thermostat = Entity::device("t", "T", ["switch", "thermostatMode"]);
        assert_eq!(device_icon(&thermostat), "icons/thermostat.png");
        let dimmer = Entity::device("d", "D", ["switch", "switchLevel"]);
        assert_eq!(device_icon(&dimmer), "icons/light.png");
        let plain = Entity::device("p", "P", ["switch"]);
        assert_eq!(device_icon(&plain), "icons/switch.png");
    }

    #[test]
    fn test_missing_credential_needs_setup() {
        let (catalog, registry) = fixture();
        let config = ResolverConfig::default();
        let doc = FeedbackBuilder::new(&catalog, &registry, &config, &false).build("lamp");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.items[0].title, "No API key set...");
        assert!(!doc.items[0].valid);
    }

    #[test]
    fn test_empty_catalog_needs_setup() {
        let catalog = Catalog::default();
        let registry = CommandRegistry::with_defaults(&ColorTable::default()).unwrap();
        let config = ResolverConfig::default();
        let doc = FeedbackBuilder::new(&catalog, &registry, &config, &true).build("lamp");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.items[0].title, "No Devices...");
    }

    #[test]
    fn test_verb_completion_records() {
        let doc = build("living room lamp of");
        assert_eq!(doc.len(), 1);
        let item = &doc.items[0];
        assert_eq!(item.title, "Living Room Lamp");
        assert_eq!(item.subtitle, "Turn Living Room Lamp off");
        assert_eq!(item.autocomplete.as_deref(), Some("Living Room Lamp off"));
        assert_eq!(item.arg.as_deref(), Some("--device-uid d1 --device-command off"));
        assert_eq!(item.icon.path, "icons/light.png");
        assert!(item.valid);
    }

    #[test]
    fn test_status_verb_is_informational() {
        let doc = build("front door");
        let status = doc.items.iter().find(|i| i.autocomplete.as_deref() == Some("Front Door status"));
        assert!(!status.unwrap().valid);
        assert!(doc.items.iter().any(|i| i.subtitle == "Turn Front Door lock" && i.valid));
    }

    #[test]
    fn test_status_row_stays_informational_next_to_scene() {
        let catalog = Catalog::new(
            vec![Entity::device("m1", "Movie Lamp", ["switch"])],
            vec![Entity::scene("s2", "Movie Time")],
        );
        let registry = CommandRegistry::with_defaults(&ColorTable::default()).unwrap();
        let config = ResolverConfig::default();
        let doc = FeedbackBuilder::new(&catalog, &registry, &config, &true).build("movie");

        let status = doc
            .items
            .iter()
            .find(|i| i.autocomplete.as_deref() == Some("Movie Lamp status"))
            .unwrap();
        assert!(!status.valid);
        assert!(status.arg.is_none());
    }

    #[test]
    fn test_device_verbs_keep_their_shape_next_to_scene() {
        let catalog = Catalog::new(
            vec![Entity::device("m1", "Movie Lamp", ["switch"])],
            vec![Entity::scene("s2", "Movie Time")],
        );
        let registry = CommandRegistry::with_defaults(&ColorTable::default()).unwrap();
        let config = ResolverConfig::default();
        let doc = FeedbackBuilder::new(&catalog, &registry, &config, &true).build("movie");

        let autocompletes: Vec<_> = doc.items.iter().filter_map(|i| i.autocomplete.as_deref()).collect();
        assert_eq!(
            autocompletes,
            vec![
                "Movie Lamp status",
                "Movie Lamp on",
                "Movie Lamp off",
                "Movie Lamp toggle",
                "Movie Time"
            ]
        );
        let on = &doc.items[1];
        assert_eq!(on.subtitle, "Turn Movie Lamp on");
        assert_eq!(on.arg.as_deref(), Some("--device-uid m1 --device-command on"));
        assert!(on.valid);
        assert_eq!(doc.items[4].arg.as_deref(), Some("--scene-uid s2"));
    }

    #[test]
    fn test_ambiguous_devices_autocomplete_label() {
        let doc = build("lamp");
        let titles: Vec<_> = doc.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Lamp One", "Lamp Two", "Living Room Lamp"]);
        assert!(doc.items.iter().all(|i| !i.valid && i.arg.is_none()));
        assert_eq!(doc.items[0].autocomplete.as_deref(), Some("Lamp One"));
    }

    #[test]
    fn test_scene_record() {
        let doc = build("good night");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.items[0].subtitle, "Run Good Night");
        assert_eq!(doc.items[0].arg.as_deref(), Some("--scene-uid s1"));
        assert_eq!(doc.items[0].icon.path, SCENE_ICON);
        assert!(doc.items[0].valid);
    }

    #[test]
    fn test_status_preview_prepended() {
        let (catalog, registry) = fixture();
        let config = ResolverConfig::default().with_show_status(true);
        let mut readings = BTreeMap::new();
        let mut status = DeviceStatus::new();
        status.insert(
            "lock".into(),
            StatusReading {
                value: serde_json::json!("locked"),
                unit: None,
            },
        );
        readings.insert(EntityId::from("d2"), status);
        let source = FixedStatus(readings);

        let doc = FeedbackBuilder::new(&catalog, &registry, &config, &true)
            .with_status_source(&source)
            .build("front door");
        assert_eq!(doc.items[0].subtitle, "🔒 locked");
        assert!(!doc.items[0].valid);
        assert!(doc.len() > 1);
    }

    #[test]
    fn test_config_items_come_first() {
        let doc = build("update");
        assert_eq!(doc.items[0].autocomplete.as_deref(), Some("update"));
    }
}
