//! Intent resolution - turns the current query text into candidates or an intent
//!
//! Every call recomputes from the full text; nothing is remembered between
//! keystrokes. The resolver does no I/O, so a superseded call can simply be
//! discarded by the host.

use crate::catalog::{Catalog, Entity};
use crate::command::candidate::{Candidate, Resolution, SCENE_VERB};
use crate::command::registry::{CommandRegistry, CommandSpec};
use crate::command::segmenter::{QuerySegmenter, Segment};
use crate::core::config::ResolverConfig;
use crate::core::types::ResolutionState;
use crate::matching::{filter_entities, FuzzyMatcher, MatchKind, Scored};

/// Resolves queries against one catalog snapshot and command registry
pub struct IntentResolver<'a> {
    catalog: &'a Catalog,
    registry: &'a CommandRegistry,
    config: &'a ResolverConfig,
    matcher: FuzzyMatcher,
}

impl<'a> IntentResolver<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a CommandRegistry, config: &'a ResolverConfig) -> Self {
        Self {
            catalog,
            registry,
            config,
            matcher: FuzzyMatcher::new(),
        }
    }

    /// Resolve the current query text
    pub fn resolve(&self, query: &str) -> Resolution {
        let segmenter = QuerySegmenter::new(self.catalog, self.registry, self.config);
        let segment = segmenter.segment(query);
        let full_query = query.split_whitespace().collect::<Vec<_>>().join(" ");

        // Devices are matched on the label portion, scenes on the whole text
        // since they take no verb.
        let devices = filter_entities(
            &self.matcher,
            &segment.label,
            segmenter.devices().iter().copied(),
            self.config.strict_threshold,
        );
        let scenes = filter_entities(
            &self.matcher,
            &full_query,
            self.catalog.scenes(),
            self.config.strict_threshold,
        );
        let (devices, scenes) = collapse_across_kinds(devices, scenes);

        let (mut candidates, device_state) = match devices.as_slice() {
            [] => (Vec::new(), ResolutionState::AwaitingEntity),
            [only] => self.single_device(only, &segment),
            several => (self.several_devices(several, &segment), ResolutionState::AwaitingEntity),
        };

        candidates.extend(scenes.iter().map(|s| {
            Candidate::with_verb(s.item.id.clone(), &s.item.label, SCENE_VERB, Vec::new(), s.score)
        }));

        let state = match (devices.len(), scenes.len()) {
            (1, 0) => device_state,
            (0, 1) => ResolutionState::Resolved,
            _ => ResolutionState::AwaitingEntity,
        };

        let status_entity = match devices.as_slice() {
            [only] if self.config.show_status => Some(only.item.id.clone()),
            _ => None,
        };

        tracing::debug!(
            query = %full_query,
            ?state,
            devices = devices.len(),
            scenes = scenes.len(),
            candidates = candidates.len(),
            "resolved query"
        );

        Resolution {
            state,
            candidates,
            segment,
            status_entity,
        }
    }

    /// One device pinned: complete the verb, then the parameter
    fn single_device(&self, device: &Scored<&Entity>, segment: &Segment) -> (Vec<Candidate>, ResolutionState) {
        let entity = device.item;
        let verb_token = segment.verb_token();

        let Some(spec) = self.registry.eligible_verb(entity, verb_token) else {
            return (
                self.verb_completions(device, segment),
                ResolutionState::AwaitingCommand,
            );
        };

        match &spec.parameter {
            None => {
                let candidate = Candidate::with_verb(entity.id.clone(), &entity.label, &spec.verb, Vec::new(), device.score);
                (vec![candidate], ResolutionState::Resolved)
            }
            Some(parameter) => {
                let token = segment.param.as_deref().unwrap_or("");
                let mut candidates: Vec<Candidate> = parameter
                    .complete(token)
                    .into_iter()
                    .map(|completion| {
                        let score = self.matcher.score(token, &completion.value);
                        let params = if completion.value.is_empty() {
                            Vec::new()
                        } else {
                            vec![completion.value]
                        };
                        Candidate::with_verb(entity.id.clone(), &entity.label, &spec.verb, params, score)
                            .valid(completion.is_valid)
                    })
                    .collect();

                // A fully typed value resolves even when longer values share it
                // as a prefix; it leads the list.
                let exact = candidates.iter().position(|c| {
                    c.is_valid && c.first_param().is_some_and(|p| p.eq_ignore_ascii_case(token))
                });
                match exact {
                    Some(i) => {
                        candidates[..=i].rotate_right(1);
                        (candidates, ResolutionState::Resolved)
                    }
                    None => (candidates, ResolutionState::AwaitingParameter),
                }
            }
        }
    }

    /// Eligible verbs starting with the typed token, in registry order
    fn verb_completions(&self, device: &Scored<&Entity>, segment: &Segment) -> Vec<Candidate> {
        let entity = device.item;
        let prefix = segment.verb_token().to_lowercase();
        let params = segment.params();

        self.registry
            .eligible_for(entity)
            .filter(|spec| spec.verb.starts_with(&prefix))
            .map(|spec| {
                let score = if prefix.is_empty() {
                    device.score
                } else {
                    self.matcher.score(&prefix, &spec.verb)
                };
                Candidate::with_verb(entity.id.clone(), &entity.label, &spec.verb, params.clone(), score)
                    .valid(params_satisfy(spec, &params))
            })
            .collect()
    }

    /// Several devices still match: one candidate each. A typed verb makes a
    /// candidate actionable only where the device accepts it.
    fn several_devices(&self, devices: &[Scored<&Entity>], segment: &Segment) -> Vec<Candidate> {
        let params = segment.params();

        devices
            .iter()
            .map(|device| {
                let entity = device.item;
                let mut candidate = Candidate::entity_only(entity.id.clone(), &entity.label, device.score);
                candidate.eligible_verbs = self
                    .registry
                    .eligible_for(entity)
                    .map(|spec| spec.verb.clone())
                    .collect();

                if let Some(spec) = self.registry.eligible_verb(entity, segment.verb_token()) {
                    candidate.verb = Some(spec.verb.clone());
                    candidate.params = params.clone();
                    candidate.is_valid = params_satisfy(spec, &params);
                }
                candidate
            })
            .collect()
    }
}

fn params_satisfy(spec: &CommandSpec, params: &[String]) -> bool {
    match (&spec.parameter, params.first()) {
        (None, _) => true,
        (Some(parameter), Some(value)) => parameter.accepts(value),
        (Some(_), None) => false,
    }
}

/// The collapse rule applied to devices and scenes together: an exact label
/// match that tops both lists on its own wins outright.
fn collapse_across_kinds<'e>(
    devices: Vec<Scored<&'e Entity>>,
    scenes: Vec<Scored<&'e Entity>>,
) -> (Vec<Scored<&'e Entity>>, Vec<Scored<&'e Entity>>) {
    let exact = |list: &[Scored<&Entity>]| list.iter().filter(|s| s.kind == MatchKind::Exact).count();
    match (exact(&devices), exact(&scenes)) {
        (1, 0) => (devices.into_iter().take(1).collect(), Vec::new()),
        (0, 1) => (Vec::new(), scenes.into_iter().take(1).collect()),
        _ => (devices, scenes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColorTable;

    fn fixture() -> (Catalog, CommandRegistry) {
        let catalog = Catalog::new(
            vec![
                Entity::device("d1", "Living Room Lamp", ["switch", "switchLevel"]),
                Entity::device("d2", "Kitchen Light", ["switch", "colorControl"]),
                Entity::device("d3", "Hallway Thermostat", ["thermostatMode", "temperatureMeasurement"]),
                Entity::device("d4", "Lamp One", ["switch"]),
                Entity::device("d5", "Lamp Two", ["switch"]),
            ],
            vec![Entity::scene("s1", "Good Night")],
        );
        let registry = CommandRegistry::with_defaults(&ColorTable::default()).unwrap();
        (catalog, registry)
    }

    fn resolve(query: &str) -> Resolution {
        let (catalog, registry) = fixture();
        let config = ResolverConfig::default();
        IntentResolver::new(&catalog, &registry, &config).resolve(query)
    }

    fn verbs(resolution: &Resolution) -> Vec<&str> {
        resolution
            .candidates
            .iter()
            .filter_map(|c| c.verb.as_deref())
            .collect()
    }

    #[test]
    fn test_empty_query_awaits_entity() {
        let r = resolve("");
        assert_eq!(r.state, ResolutionState::AwaitingEntity);
        assert!(r.is_empty());
    }

    #[test]
    fn test_unknown_entity_returns_nothing() {
        let r = resolve("garage");
        assert_eq!(r.state, ResolutionState::AwaitingEntity);
        assert!(r.is_empty());
    }

    #[test]
    fn test_single_device_lists_eligible_verbs() {
        let r = resolve("living room");
        assert_eq!(r.state, ResolutionState::AwaitingCommand);
        assert_eq!(verbs(&r), vec!["status", "on", "off", "toggle", "dim"]);
        assert!(r.candidates.iter().all(|c| c.entity.as_ref().unwrap().as_str() == "d1"));
    }

    #[test]
    fn test_verb_prefix_filters_completions() {
        let r = resolve("living room lamp of");
        assert_eq!(verbs(&r), vec!["off"]);
        assert!(r.candidates[0].is_valid);
    }

    #[test]
    fn test_parameter_verb_without_value_is_invalid() {
        let r = resolve("living room lamp di");
        assert_eq!(verbs(&r), vec!["dim"]);
        assert!(!r.candidates[0].is_valid);
    }

    #[test]
    fn test_exact_verb_without_parameter_resolves() {
        let r = resolve("kitchen light on");
        assert_eq!(r.state, ResolutionState::Resolved);
        let intent = r.intent().unwrap();
        assert_eq!(intent.entity.as_str(), "d2");
        assert_eq!(intent.verb, "on");
    }

    #[test]
    fn test_enumerated_parameter_completions() {
        let r = resolve("hallway thermostat mode");
        assert_eq!(r.state, ResolutionState::AwaitingParameter);
        let values: Vec<_> = r.candidates.iter().map(|c| c.params[0].as_str()).collect();
        assert_eq!(values, vec!["auto", "cool", "heat", "off"]);
        assert!(r.candidates.iter().all(|c| c.is_valid));
    }

    #[test]
    fn test_parameter_value_resolves() {
        let r = resolve("hallway thermostat mode heat");
        assert_eq!(r.state, ResolutionState::Resolved);
        assert_eq!(r.intent().unwrap().params, vec!["heat".to_string()]);
    }

    #[test]
    fn test_typed_value_resolves_despite_longer_completions() {
        let (catalog, _) = fixture();
        let colors = ColorTable::new(
            [("blueviolet", "#8A2BE2"), ("blue", "#0000FF")]
                .into_iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string()))
                .collect(),
        );
        let registry = CommandRegistry::with_defaults(&colors).unwrap();
        let config = ResolverConfig::default();
        let resolver = IntentResolver::new(&catalog, &registry, &config);

        let r = resolver.resolve("kitchen light color blue");
        assert_eq!(r.state, ResolutionState::Resolved);
        let values: Vec<_> = r.candidates.iter().map(|c| c.params[0].as_str()).collect();
        assert_eq!(values, vec!["blue", "blueviolet"]);
        assert_eq!(r.intent().unwrap().params, vec!["blue".to_string()]);

        let partial = resolver.resolve("kitchen light color blu");
        assert_eq!(partial.state, ResolutionState::AwaitingParameter);
        assert!(partial.intent().is_none());
    }

    #[test]
    fn test_pattern_verb_without_value_has_no_params() {
        let r = resolve("living room lamp dim");
        assert_eq!(r.state, ResolutionState::AwaitingParameter);
        assert_eq!(r.candidates.len(), 1);
        assert!(r.candidates[0].params.is_empty());
        assert!(!r.candidates[0].is_valid);
        assert_eq!(r.candidates[0].display_label, "Living Room Lamp dim");
    }

    #[test]
    fn test_pattern_parameter_validation() {
        let r = resolve("kitchen light color ff00ff");
        assert_eq!(r.state, ResolutionState::Resolved);
        assert!(r.candidates[0].is_valid);

        let r = resolve("kitchen light color redd");
        assert_eq!(r.state, ResolutionState::AwaitingParameter);
        assert_eq!(r.candidates.len(), 1);
        assert!(!r.candidates[0].is_valid);
    }

    #[test]
    fn test_unsupported_verb_never_offered() {
        let r = resolve("living room lamp color");
        assert!(verbs(&r).is_empty());
        assert!(r.intent().is_none());
    }

    #[test]
    fn test_ambiguous_devices_listed_without_verb() {
        let r = resolve("lamp");
        assert_eq!(r.state, ResolutionState::AwaitingEntity);
        let labels: Vec<_> = r.candidates.iter().map(|c| c.display_label.as_str()).collect();
        assert_eq!(labels, vec!["Lamp One", "Lamp Two", "Living Room Lamp"]);
        assert!(r.candidates.iter().all(|c| c.verb.is_none() && !c.is_valid));
        assert!(r.candidates[0].eligible_verbs.contains(&"on".to_string()));
    }

    #[test]
    fn test_scene_resolves_on_its_own() {
        let r = resolve("good night");
        assert_eq!(r.state, ResolutionState::Resolved);
        assert_eq!(r.candidates.len(), 1);
        let intent = r.intent().unwrap();
        assert_eq!(intent.entity.as_str(), "s1");
        assert_eq!(intent.verb, SCENE_VERB);
    }

    #[test]
    fn test_status_entity_follows_config() {
        let (catalog, registry) = fixture();
        let config = ResolverConfig::default().with_show_status(true);
        let resolver = IntentResolver::new(&catalog, &registry, &config);
        assert_eq!(resolver.resolve("kitchen").status_entity.unwrap().as_str(), "d2");
        assert!(resolver.resolve("lamp").status_entity.is_none());
        assert!(resolve("kitchen").status_entity.is_none());
    }
}
