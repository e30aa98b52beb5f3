use super::coordinator::{RevealSpec, ScrollRevealCoordinator};
use super::effects::{
    AnimatedCounter, FillBar, HeaderBackdrop, HeaderEntrance, format_thousands,
};
use super::parallax::{ParallaxLayer, parallax_offset};
use super::trigger::SectionBounds;
use super::{RevealItem, RevealStyle, SectionRevealed};
use crate::engine::animation::tween::{PlayDirection, Playhead};
use crate::engine::page::PageLayoutSet;
use crate::engine::page::scroll::{PageScroll, PageSection};
use bevy::color::Alpha;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use constants::sections::{HEADER_BACKDROP_REVEAL, REVEALS};
use std::collections::HashMap;

/// Playheads of reveals that have started at least once.
#[derive(Resource, Debug, Default)]
pub struct RevealTimelines(HashMap<String, Playhead>);

impl RevealTimelines {
    pub fn get(&self, key: &str) -> Option<&Playhead> {
        self.0.get(key)
    }
}

fn section_layout(
    sections: &Query<(&PageSection, &SectionBounds)>,
) -> HashMap<String, SectionBounds> {
    sections
        .iter()
        .map(|(section, bounds)| (section.selector.clone(), *bounds))
        .collect()
}

pub fn register_static_reveals(mut coordinator: ResMut<ScrollRevealCoordinator>) {
    for definition in &REVEALS {
        match RevealSpec::from_definition(definition) {
            Some(spec) => coordinator.register(spec),
            None => error!(
                "Reveal '{}' has an unreadable trigger ('{}' / '{}')",
                definition.key, definition.start, definition.end
            ),
        }
    }
}

/// Run condition: scroll moved or a section was laid out again.
pub fn reveal_inputs_changed(
    scroll: Res<PageScroll>,
    moved: Query<(), Changed<SectionBounds>>,
) -> bool {
    scroll.is_changed() || !moved.is_empty()
}

pub fn evaluate_reveals(
    scroll: Res<PageScroll>,
    sections: Query<(&PageSection, &SectionBounds)>,
    mut coordinator: ResMut<ScrollRevealCoordinator>,
    mut revealed: EventWriter<SectionRevealed>,
) {
    let layout = section_layout(&sections);
    for transition in coordinator.evaluate(scroll.viewport(), &layout) {
        debug!("Reveal '{}' → {:?}", transition.key, transition.direction);
        let selector = coordinator
            .spec(&transition.key)
            .map(|spec| spec.selector.clone())
            .unwrap_or_default();
        revealed.write(SectionRevealed {
            key: transition.key,
            selector,
            direction: transition.direction,
        });
    }
}

pub fn play_reveal_timelines(
    mut revealed: EventReader<SectionRevealed>,
    coordinator: Res<ScrollRevealCoordinator>,
    items: Query<&RevealItem>,
    mut timelines: ResMut<RevealTimelines>,
) {
    for event in revealed.read() {
        let Some(spec) = coordinator.spec(&event.key) else {
            continue;
        };
        let count = items.iter().filter(|item| item.key == event.key).count();
        let length = spec.duration + spec.stagger * count.saturating_sub(1) as u32;
        timelines
            .0
            .entry(event.key.clone())
            .or_insert_with(|| Playhead::new(length))
            .play(event.direction);
    }
}

pub fn animate_reveal_items(
    time: Res<Time>,
    coordinator: Res<ScrollRevealCoordinator>,
    mut timelines: ResMut<RevealTimelines>,
    mut items: Query<(&RevealItem, &mut RevealStyle)>,
) {
    let moving: Vec<String> = timelines
        .0
        .iter_mut()
        .filter_map(|(key, playhead)| playhead.advance(time.delta()).then(|| key.clone()))
        .collect();
    if moving.is_empty() {
        return;
    }

    for (item, mut style) in &mut items {
        if !moving.contains(&item.key) {
            continue;
        }
        let (Some(spec), Some(playhead)) = (coordinator.spec(&item.key), timelines.get(&item.key))
        else {
            continue;
        };
        let delay = spec.stagger.as_secs_f32() * item.index as f32;
        let progress = playhead.sample(EaseFunction::CubicOut, delay, spec.duration.as_secs_f32());
        style.opacity = progress;
        style.offset = spec.distance * (1.0 - progress);
    }
}

pub fn apply_reveal_styles(
    mut items: Query<
        (
            &RevealStyle,
            &mut Node,
            Option<&mut TextColor>,
            Option<&mut BackgroundColor>,
            Option<&Children>,
        ),
        Changed<RevealStyle>,
    >,
    mut child_texts: Query<&mut TextColor, Without<RevealStyle>>,
) {
    for (style, mut node, text, background, children) in &mut items {
        node.top = Val::Px(style.offset);
        if let Some(mut text) = text {
            text.0.set_alpha(style.opacity);
        }
        if let Some(mut background) = background {
            background.0.set_alpha(style.opacity * style.background_alpha);
        }
        let Some(children) = children else {
            continue;
        };
        let children: &[Entity] = children;
        for &child in children {
            if let Ok(mut text) = child_texts.get_mut(child) {
                text.0.set_alpha(style.opacity);
            }
        }
    }
}

pub fn start_revealed_effects(
    mut revealed: EventReader<SectionRevealed>,
    mut counters: Query<&mut AnimatedCounter>,
    mut bars: Query<&mut FillBar>,
    mut backdrops: Query<&mut HeaderBackdrop>,
) {
    for event in revealed.read() {
        let forward = event.direction == PlayDirection::Forward;
        if event.key == HEADER_BACKDROP_REVEAL {
            for mut backdrop in &mut backdrops {
                backdrop.set_scrolled(forward);
            }
            continue;
        }
        if !forward {
            continue;
        }
        for mut counter in &mut counters {
            if counter.reveal_key == event.key {
                counter.start();
            }
        }
        for mut bar in &mut bars {
            if bar.reveal_key == event.key {
                bar.start();
            }
        }
    }
}

pub fn tick_counters(time: Res<Time>, mut counters: Query<(&mut AnimatedCounter, &mut Text)>) {
    for (mut counter, mut text) in &mut counters {
        if counter.advance(time.delta()) {
            text.0 = format_thousands(counter.value());
        }
    }
}

pub fn tick_fill_bars(time: Res<Time>, mut bars: Query<(&mut FillBar, &mut Node)>) {
    for (mut bar, mut node) in &mut bars {
        if let Some(width) = bar.advance(time.delta()) {
            node.width = Val::Percent(width);
        }
    }
}

pub fn fade_header_backdrop(
    time: Res<Time>,
    mut headers: Query<(&mut HeaderBackdrop, &mut BackgroundColor)>,
) {
    for (mut backdrop, mut background) in &mut headers {
        if let Some(alpha) = backdrop.advance(time.delta()) {
            background.0.set_alpha(alpha);
        }
    }
}

pub fn slide_in_header(time: Res<Time>, mut headers: Query<(&mut HeaderEntrance, &mut Node)>) {
    for (mut entrance, mut node) in &mut headers {
        if let Some(offset) = entrance.advance(time.delta()) {
            node.top = Val::Px(offset);
        }
    }
}

pub fn scrub_parallax_layers(
    scroll: Res<PageScroll>,
    sections: Query<(&PageSection, &SectionBounds)>,
    mut layers: Query<(&ParallaxLayer, &mut Node)>,
) {
    for (layer, mut node) in &mut layers {
        let Some(bounds) = sections
            .iter()
            .find(|(section, _)| section.selector == layer.selector)
            .map(|(_, bounds)| *bounds)
        else {
            continue;
        };
        node.top = Val::Px(parallax_offset(bounds, scroll.viewport(), layer.shift));
    }
}

pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollRevealCoordinator>()
            .init_resource::<RevealTimelines>()
            .add_event::<SectionRevealed>()
            .add_systems(Startup, register_static_reveals)
            .add_systems(
                Update,
                (
                    (evaluate_reveals, scrub_parallax_layers).run_if(reveal_inputs_changed),
                    play_reveal_timelines,
                    start_revealed_effects,
                    animate_reveal_items,
                    apply_reveal_styles,
                    tick_counters,
                    tick_fill_bars,
                    fade_header_backdrop,
                    slide_in_header,
                )
                    .chain()
                    .after(PageLayoutSet),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reveal::trigger::TriggerPoint;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Seen(Vec<SectionRevealed>);

    fn record(mut events: EventReader<SectionRevealed>, mut seen: ResMut<Seen>) {
        seen.0.extend(events.read().cloned());
    }

    fn reveal_app(repeatable: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<PageScroll>()
            .init_resource::<ScrollRevealCoordinator>()
            .init_resource::<RevealTimelines>()
            .init_resource::<Seen>()
            .add_event::<SectionRevealed>()
            .add_systems(
                Update,
                (
                    evaluate_reveals.run_if(reveal_inputs_changed),
                    play_reveal_timelines,
                    animate_reveal_items,
                    record,
                )
                    .chain(),
            );

        {
            let mut scroll = app.world_mut().resource_mut::<PageScroll>();
            scroll.set_viewport_height(800.0);
            scroll.set_content_height(5000.0);
        }
        app.world_mut()
            .resource_mut::<ScrollRevealCoordinator>()
            .register(RevealSpec {
                key: "features".to_string(),
                selector: "about".to_string(),
                start: TriggerPoint::parse("top center").unwrap(),
                end: TriggerPoint::parse("bottom bottom").unwrap(),
                repeatable,
                stagger: Duration::from_millis(100),
                duration: Duration::from_millis(800),
                distance: 20.0,
            });
        app.world_mut().spawn((
            PageSection {
                selector: "about".to_string(),
                order: 1,
                height_vh: 1.0,
            },
            SectionBounds {
                top: 1000.0,
                height: 800.0,
            },
        ));
        app
    }

    fn spawn_items(app: &mut App, count: usize) -> Vec<Entity> {
        (0..count)
            .map(|index| {
                app.world_mut()
                    .spawn((
                        RevealItem {
                            key: "features".to_string(),
                            index,
                        },
                        RevealStyle::hidden(20.0, 1.0),
                    ))
                    .id()
            })
            .collect()
    }

    fn scroll_to(app: &mut App, offset: f32) {
        app.world_mut().resource_mut::<PageScroll>().scroll_to(offset);
    }

    #[test]
    fn items_fade_in_with_stagger() {
        let mut app = reveal_app(false);
        let items = spawn_items(&mut app, 3);
        app.update();
        assert!(app.world().resource::<Seen>().0.is_empty());

        scroll_to(&mut app, 700.0);
        app.update();
        app.update();
        app.update();

        let first = *app.world().get::<RevealStyle>(items[0]).unwrap();
        let last = *app.world().get::<RevealStyle>(items[2]).unwrap();
        assert!(first.opacity > last.opacity);

        for _ in 0..20 {
            app.update();
        }
        for item in items {
            let style = app.world().get::<RevealStyle>(item).unwrap();
            assert_eq!(style.opacity, 1.0);
            assert_eq!(style.offset, 0.0);
        }
        assert_eq!(app.world().resource::<Seen>().0.len(), 1);
    }

    #[test]
    fn repeatable_reveal_reverses_on_scroll_back() {
        let mut app = reveal_app(true);
        let items = spawn_items(&mut app, 2);
        app.update();

        scroll_to(&mut app, 700.0);
        for _ in 0..15 {
            app.update();
        }
        scroll_to(&mut app, 0.0);
        for _ in 0..15 {
            app.update();
        }

        let seen = &app.world().resource::<Seen>().0;
        let directions: Vec<_> = seen.iter().map(|event| event.direction).collect();
        assert_eq!(directions, vec![PlayDirection::Forward, PlayDirection::Backward]);
        for item in items {
            assert_eq!(app.world().get::<RevealStyle>(item).unwrap().opacity, 0.0);
        }
    }
}
