use super::trigger::{ScrollViewport, SectionBounds, TriggerPoint, scrub_progress};
use crate::engine::animation::tween::PlayDirection;
use bevy::prelude::*;
use constants::sections::RevealDefinition;
use std::collections::HashMap;
use std::time::Duration;

/// Lookup of mounted section bounds by selector.
pub trait SectionLayout {
    fn bounds(&self, selector: &str) -> Option<SectionBounds>;
}

impl SectionLayout for HashMap<String, SectionBounds> {
    fn bounds(&self, selector: &str) -> Option<SectionBounds> {
        self.get(selector).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub key: String,
    pub selector: String,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub repeatable: bool,
    pub stagger: Duration,
    pub duration: Duration,
    pub distance: f32,
}

impl RevealSpec {
    /// Build from a static definition; `None` if a trigger does not parse.
    pub fn from_definition(definition: &RevealDefinition) -> Option<Self> {
        Some(Self {
            key: definition.key.to_string(),
            selector: definition.selector.to_string(),
            start: TriggerPoint::parse(definition.start)?,
            end: TriggerPoint::parse(definition.end)?,
            repeatable: definition.repeatable,
            stagger: Duration::from_secs_f32(definition.stagger_secs),
            duration: Duration::from_secs_f32(definition.duration_secs),
            distance: definition.distance_px,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealRecord {
    pub has_entered: bool,
    pub triggered_once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTransition {
    pub key: String,
    pub direction: PlayDirection,
}

#[derive(Debug, Clone)]
struct Registration {
    spec: RevealSpec,
    record: RevealRecord,
}

/// Tracks which sections have crossed their reveal start.
///
/// One-shot reveals play once and latch; repeatable reveals play forward on
/// every entry and backward on every exit above the start.
#[derive(Resource, Debug, Default)]
pub struct ScrollRevealCoordinator {
    registrations: Vec<Registration>,
}

impl ScrollRevealCoordinator {
    /// Register a reveal. A spec with an existing key replaces it and keeps
    /// its record.
    pub fn register(&mut self, spec: RevealSpec) {
        match self
            .registrations
            .iter_mut()
            .find(|registration| registration.spec.key == spec.key)
        {
            Some(existing) => existing.spec = spec,
            None => self.registrations.push(Registration {
                spec,
                record: RevealRecord::default(),
            }),
        }
    }

    pub fn spec(&self, key: &str) -> Option<&RevealSpec> {
        self.find(key).map(|registration| &registration.spec)
    }

    pub fn record(&self, key: &str) -> Option<RevealRecord> {
        self.find(key).map(|registration| registration.record)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, RevealRecord)> {
        self.registrations
            .iter()
            .map(|registration| (registration.spec.key.as_str(), registration.record))
    }

    fn find(&self, key: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|registration| registration.spec.key == key)
    }

    /// Compare every registration against the viewport and report crossings.
    /// Sections that are not mounted are skipped until they are.
    pub fn evaluate(
        &mut self,
        viewport: ScrollViewport,
        layout: &impl SectionLayout,
    ) -> Vec<RevealTransition> {
        let mut transitions = Vec::new();
        for registration in &mut self.registrations {
            let Some(bounds) = layout.bounds(&registration.spec.selector) else {
                continue;
            };
            let start = registration.spec.start.scroll_position(bounds, viewport.height);
            let inside = viewport.scroll >= start;
            let record = &mut registration.record;

            match (record.has_entered, inside) {
                (false, true) => {
                    record.has_entered = true;
                    if registration.spec.repeatable || !record.triggered_once {
                        record.triggered_once = true;
                        transitions.push(RevealTransition {
                            key: registration.spec.key.clone(),
                            direction: PlayDirection::Forward,
                        });
                    }
                }
                (true, false) => {
                    record.has_entered = false;
                    if registration.spec.repeatable {
                        transitions.push(RevealTransition {
                            key: registration.spec.key.clone(),
                            direction: PlayDirection::Backward,
                        });
                    }
                }
                _ => {}
            }
        }
        transitions
    }

    /// Scrub progress between a reveal's start and end triggers.
    pub fn progress(
        &self,
        key: &str,
        viewport: ScrollViewport,
        layout: &impl SectionLayout,
    ) -> Option<f32> {
        let spec = &self.find(key)?.spec;
        let bounds = layout.bounds(&spec.selector)?;
        Some(scrub_progress(
            spec.start.scroll_position(bounds, viewport.height),
            spec.end.scroll_position(bounds, viewport.height),
            viewport.scroll,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(key: &str, repeatable: bool) -> RevealSpec {
        RevealSpec {
            key: key.to_string(),
            selector: "about".to_string(),
            start: TriggerPoint::parse("top center").unwrap(),
            end: TriggerPoint::parse("bottom bottom").unwrap(),
            repeatable,
            stagger: Duration::from_millis(200),
            duration: Duration::from_secs(1),
            distance: 30.0,
        }
    }

    fn layout() -> HashMap<String, SectionBounds> {
        HashMap::from([(
            "about".to_string(),
            SectionBounds {
                top: 1000.0,
                height: 800.0,
            },
        )])
    }

    fn at(scroll: f32) -> ScrollViewport {
        ScrollViewport {
            scroll,
            height: 800.0,
        }
    }

    #[test]
    fn one_shot_fires_once() {
        let mut coordinator = ScrollRevealCoordinator::default();
        coordinator.register(spec("about-text", false));
        let layout = layout();

        assert!(coordinator.evaluate(at(0.0), &layout).is_empty());
        let fired = coordinator.evaluate(at(700.0), &layout);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].direction, PlayDirection::Forward);

        assert!(coordinator.evaluate(at(750.0), &layout).is_empty());
        assert!(coordinator.evaluate(at(0.0), &layout).is_empty());
        assert!(coordinator.evaluate(at(900.0), &layout).is_empty());
        assert!(coordinator.record("about-text").unwrap().triggered_once);
    }

    #[test]
    fn repeatable_toggles_per_crossing() {
        let mut coordinator = ScrollRevealCoordinator::default();
        coordinator.register(spec("about-text", true));
        let layout = layout();

        let mut directions = Vec::new();
        for scroll in [0.0, 700.0, 710.0, 100.0, 90.0, 601.0, 0.0] {
            directions.extend(
                coordinator
                    .evaluate(at(scroll), &layout)
                    .into_iter()
                    .map(|transition| transition.direction),
            );
        }
        assert_eq!(
            directions,
            vec![
                PlayDirection::Forward,
                PlayDirection::Backward,
                PlayDirection::Forward,
                PlayDirection::Backward,
            ]
        );
    }

    #[test]
    fn unmounted_section_is_evaluated_once_mounted() {
        let mut coordinator = ScrollRevealCoordinator::default();
        coordinator.register(spec("about-text", false));

        let empty: HashMap<String, SectionBounds> = HashMap::new();
        assert!(coordinator.evaluate(at(5000.0), &empty).is_empty());
        assert_eq!(coordinator.evaluate(at(5000.0), &layout()).len(), 1);
    }

    #[test]
    fn re_registering_keeps_record() {
        let mut coordinator = ScrollRevealCoordinator::default();
        coordinator.register(spec("about-text", false));
        coordinator.evaluate(at(700.0), &layout());
        coordinator.register(spec("about-text", false));
        assert_eq!(coordinator.records().count(), 1);
        assert!(coordinator.record("about-text").unwrap().triggered_once);
    }

    #[test]
    fn progress_runs_between_triggers() {
        let mut coordinator = ScrollRevealCoordinator::default();
        coordinator.register(spec("about-text", true));
        // start 600, end 1000 + 800 - 800 = 1000
        let progress = coordinator.progress("about-text", at(800.0), &layout()).unwrap();
        assert!((progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn builds_specs_from_static_definitions() {
        for definition in constants::sections::REVEALS {
            assert!(RevealSpec::from_definition(&definition).is_some(), "{}", definition.key);
        }
    }
}
