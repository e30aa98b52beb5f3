use super::navigation::NavLink;
use super::scroll::{PageCamera, PageRoot, PageSection};
use crate::engine::animation::hover::HoverScale;
use crate::engine::core::motion_settings::MotionSettings;
use crate::engine::particles::burst::ParticleEmitter;
use crate::engine::reveal::effects::{AnimatedCounter, FillBar, HeaderBackdrop, HeaderEntrance};
use crate::engine::reveal::parallax::ParallaxLayer;
use crate::engine::reveal::trigger::SectionBounds;
use crate::engine::reveal::{RevealItem, RevealStyle};
use bevy::prelude::*;
use constants::content::{PAGE_CONTENT, RoadmapStep};
use constants::motion::*;
use constants::sections::{
    HEADER_BACKDROP_REVEAL, REVEALS, RevealDefinition, SECTIONS, TOKEN_INFO_REVEAL,
    TOKENOMICS_REVEAL,
};
use std::time::Duration;

const PAGE_BACKGROUND: Color = Color::srgb(0.0, 0.0, 0.0);
const CARD_BACKGROUND: Color = Color::srgb(0.07, 0.07, 0.09);
const ACCENT: Color = Color::srgb(0.66, 0.33, 0.97);
const BODY_TEXT: Color = Color::srgb(0.82, 0.82, 0.86);
const HEADER_HEIGHT_PX: f32 = 72.0;

fn reveal_definition(key: &str) -> Option<RevealDefinition> {
    REVEALS.iter().find(|definition| definition.key == key).copied()
}

/// Entry distance of a reveal, zero for keys without a definition.
fn reveal_distance(key: &str) -> f32 {
    reveal_definition(key).map_or(0.0, |definition| definition.distance_px)
}

/// Components that start an element hidden under reveal `key`.
fn revealed(key: &str, index: usize, background_alpha: f32) -> (RevealItem, RevealStyle) {
    (
        RevealItem {
            key: key.to_string(),
            index,
        },
        RevealStyle::hidden(reveal_distance(key), background_alpha),
    )
}

fn text(value: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn card_node(width: Val) -> Node {
    Node {
        width,
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(8.0),
        padding: UiRect::all(Val::Px(24.0)),
        ..default()
    }
}

fn row_node() -> Node {
    Node {
        width: Val::Percent(80.0),
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        justify_content: JustifyContent::Center,
        column_gap: Val::Px(24.0),
        row_gap: Val::Px(24.0),
        ..default()
    }
}

pub fn spawn_page_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(PAGE_BACKGROUND),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        PageCamera,
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

/// Build the page: fixed header plus the stacked, scroll-shifted sections.
pub fn spawn_page(mut commands: Commands, settings: Res<MotionSettings>) {
    spawn_header(&mut commands);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            PageRoot,
            Name::new("Page Root"),
        ))
        .with_children(|root| {
            for (order, definition) in SECTIONS.iter().enumerate() {
                let mut section = root.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(32.0),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    PageSection {
                        selector: definition.selector.to_string(),
                        order,
                        height_vh: definition.height_vh,
                    },
                    SectionBounds::default(),
                    Name::new(definition.selector),
                ));
                section.with_children(|parent| {
                    if definition.parallax {
                        spawn_parallax_background(parent, definition.selector);
                    }
                    match definition.selector {
                        "hero" => spawn_hero(parent),
                        "about" => spawn_about(parent),
                        "token-info" => spawn_token_info(parent),
                        "tokenomics" => spawn_tokenomics(parent),
                        "roadmap" => spawn_roadmap(parent),
                        "footer" => spawn_footer(parent, &settings),
                        other => warn!("No content for section '{}'", other),
                    }
                });
            }
        });

    println!("✓ Page spawned ({} sections)", SECTIONS.len());
}

fn spawn_header(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(HEADER_ENTRANCE_OFFSET_PX),
                width: Val::Percent(100.0),
                height: Val::Px(HEADER_HEIGHT_PX),
                padding: UiRect::horizontal(Val::Px(32.0)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(PAGE_BACKGROUND.with_alpha(0.0)),
            HeaderBackdrop::new(
                HEADER_SCROLLED_ALPHA,
                Duration::from_secs_f32(
                    reveal_definition(HEADER_BACKDROP_REVEAL)
                        .map_or(0.3, |definition| definition.duration_secs),
                ),
            ),
            HeaderEntrance::new(
                HEADER_ENTRANCE_OFFSET_PX,
                Duration::from_secs_f32(HEADER_ENTRANCE_SECS),
            ),
            GlobalZIndex(10),
            Name::new("Header"),
        ))
        .with_children(|header| {
            header
                .spawn((
                    Button,
                    Node::default(),
                    HoverScale::new(LOGO_HOVER_SCALE, Duration::from_secs_f32(LOGO_HOVER_SECS)),
                    Name::new("Logo"),
                ))
                .with_children(|logo| {
                    logo.spawn(text(PAGE_CONTENT.name, 28.0, ACCENT));
                });

            header
                .spawn(Node {
                    column_gap: Val::Px(32.0),
                    ..default()
                })
                .with_children(|nav| {
                    for item in PAGE_CONTENT.navigation {
                        nav.spawn((
                            Button,
                            Node::default(),
                            NavLink {
                                href: item.href.to_string(),
                            },
                            Name::new(item.name),
                        ))
                        .with_children(|link| {
                            link.spawn(text(item.name, 18.0, BODY_TEXT));
                        });
                    }
                });
        });
}

fn spawn_parallax_background(parent: &mut ChildSpawnerCommands, selector: &str) {
    parent.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(150.0),
            ..default()
        },
        BackgroundColor(Color::srgb(0.05, 0.02, 0.09)),
        ParallaxLayer {
            selector: selector.to_string(),
            shift: PARALLAX_SHIFT,
        },
    ));
}

fn spawn_hero(parent: &mut ChildSpawnerCommands) {
    const KEY: &str = "hero-content";
    parent.spawn((
        text(PAGE_CONTENT.symbol, 72.0, ACCENT.with_alpha(0.0)),
        revealed(KEY, 0, 0.0),
    ));
    parent.spawn((
        text(PAGE_CONTENT.tagline, 24.0, BODY_TEXT.with_alpha(0.0)),
        revealed(KEY, 1, 0.0),
    ));
}

fn spawn_about(parent: &mut ChildSpawnerCommands) {
    parent.spawn((
        text("About", 48.0, Color::WHITE.with_alpha(0.0)),
        revealed("about-text", 0, 0.0),
    ));
    parent.spawn((
        text(
            format!("{} brings intelligent tooling to the memecoin space.", PAGE_CONTENT.name),
            20.0,
            BODY_TEXT.with_alpha(0.0),
        ),
        revealed("about-text", 1, 0.0),
    ));

    parent.spawn(row_node()).with_children(|row| {
        for (index, feature) in PAGE_CONTENT.features.iter().enumerate() {
            row.spawn((
                card_node(Val::Px(280.0)),
                BackgroundColor(CARD_BACKGROUND.with_alpha(0.0)),
                revealed("about-features", index, 1.0),
            ))
            .with_children(|card| {
                card.spawn(text(feature.title, 22.0, Color::WHITE.with_alpha(0.0)));
                card.spawn(text(feature.description, 16.0, BODY_TEXT.with_alpha(0.0)));
            });
        }
    });
}

fn spawn_token_info(parent: &mut ChildSpawnerCommands) {
    parent.spawn(row_node()).with_children(|row| {
        for (index, stat) in PAGE_CONTENT.stats.iter().enumerate() {
            row.spawn((
                card_node(Val::Px(320.0)),
                BackgroundColor(CARD_BACKGROUND.with_alpha(0.0)),
                revealed(TOKEN_INFO_REVEAL, index, 1.0),
            ))
            .with_children(|card| {
                card.spawn(text(stat.label, 18.0, BODY_TEXT.with_alpha(0.0)));
                card.spawn((
                    text("0", 40.0, ACCENT.with_alpha(0.0)),
                    AnimatedCounter::new(
                        TOKEN_INFO_REVEAL,
                        stat.value,
                        COUNTER_STEPS,
                        Duration::from_secs_f32(COUNTER_DURATION_SECS),
                    ),
                ));
            });
        }

        let offset = PAGE_CONTENT.stats.len();
        for (index, detail) in PAGE_CONTENT.details.iter().enumerate() {
            row.spawn((
                card_node(Val::Px(320.0)),
                BackgroundColor(CARD_BACKGROUND.with_alpha(0.0)),
                revealed(TOKEN_INFO_REVEAL, offset + index, 1.0),
            ))
            .with_children(|card| {
                card.spawn(text(detail.label, 16.0, BODY_TEXT.with_alpha(0.0)));
                card.spawn(text(detail.value, 18.0, Color::WHITE.with_alpha(0.0)));
            });
        }
    });
}

fn spawn_tokenomics(parent: &mut ChildSpawnerCommands) {
    parent.spawn(row_node()).with_children(|row| {
        for (index, allocation) in PAGE_CONTENT.allocations.iter().enumerate() {
            let [r, g, b] = allocation.gradient_from;
            row.spawn((
                card_node(Val::Px(280.0)),
                BackgroundColor(CARD_BACKGROUND.with_alpha(0.0)),
                revealed(TOKENOMICS_REVEAL, index, 1.0),
            ))
            .with_children(|card| {
                card.spawn(text(allocation.title, 22.0, Color::WHITE.with_alpha(0.0)));
                card.spawn(text(
                    format!("{}%", allocation.percentage),
                    32.0,
                    Color::srgb(r, g, b).with_alpha(0.0),
                ));
                card.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(8.0),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.15, 0.15, 0.18)),
                    BorderRadius::all(Val::Px(4.0)),
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(r, g, b)),
                        FillBar::new(
                            TOKENOMICS_REVEAL,
                            allocation.percentage,
                            Duration::from_secs_f32(FILL_BAR_SECS),
                        ),
                    ));
                });
                card.spawn(text(allocation.description, 14.0, BODY_TEXT.with_alpha(0.0)));
            });
        }
    });
}

fn spawn_roadmap_step(parent: &mut ChildSpawnerCommands, index: usize, step: &RoadmapStep) {
    parent
        .spawn((
            card_node(Val::Px(240.0)),
            BackgroundColor(CARD_BACKGROUND.with_alpha(0.0)),
            revealed("roadmap-steps", index, 1.0),
        ))
        .with_children(|card| {
            card.spawn(text(
                format!("STEP {}", index + 1),
                14.0,
                ACCENT.with_alpha(0.0),
            ));
            card.spawn(text(step.title, 20.0, Color::WHITE.with_alpha(0.0)));
            for line in step.steps {
                card.spawn(text(*line, 14.0, BODY_TEXT.with_alpha(0.0)));
            }
        });
}

fn spawn_roadmap(parent: &mut ChildSpawnerCommands) {
    parent.spawn(row_node()).with_children(|row| {
        for (index, step) in PAGE_CONTENT.roadmap.iter().enumerate() {
            spawn_roadmap_step(row, index, step);
        }
    });
}

fn spawn_footer(parent: &mut ChildSpawnerCommands, settings: &MotionSettings) {
    parent
        .spawn(Node {
            column_gap: Val::Px(24.0),
            ..default()
        })
        .with_children(|row| {
            for social in PAGE_CONTENT.socials {
                let initial: String = social.name.chars().take(1).collect();
                row.spawn((
                    Button,
                    Node {
                        width: Val::Px(48.0),
                        height: Val::Px(48.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(CARD_BACKGROUND),
                    BorderRadius::MAX,
                    HoverScale::new(settings.icon_hover_scale, settings.icon_hover),
                    ParticleEmitter::default(),
                    Name::new(social.name),
                ))
                .with_children(|icon| {
                    icon.spawn(text(initial, 20.0, Color::WHITE));
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn spawned_page() -> World {
        let mut world = World::new();
        world.init_resource::<MotionSettings>();
        world
            .run_system_once(spawn_page)
            .expect("page spawn system runs");
        world
    }

    fn count<C: Component>(world: &mut World) -> usize {
        world.query::<&C>().iter(world).count()
    }

    #[test]
    fn one_section_per_definition_in_order() {
        let mut world = spawned_page();
        let mut sections: Vec<_> = world
            .query::<&PageSection>()
            .iter(&world)
            .map(|section| (section.order, section.selector.clone()))
            .collect();
        sections.sort();
        let selectors: Vec<_> = sections.into_iter().map(|(_, selector)| selector).collect();
        let expected: Vec<_> = SECTIONS.iter().map(|s| s.selector.to_string()).collect();
        assert_eq!(selectors, expected);
    }

    #[test]
    fn interactive_elements_are_wired() {
        let mut world = spawned_page();
        assert_eq!(count::<ParticleEmitter>(&mut world), PAGE_CONTENT.socials.len());
        assert_eq!(count::<NavLink>(&mut world), PAGE_CONTENT.navigation.len());
        assert_eq!(count::<AnimatedCounter>(&mut world), PAGE_CONTENT.stats.len());
        assert_eq!(count::<FillBar>(&mut world), PAGE_CONTENT.allocations.len());
        assert_eq!(count::<HeaderBackdrop>(&mut world), 1);
        assert_eq!(count::<ParallaxLayer>(&mut world), 1);
        // Logo plus one per social icon.
        assert_eq!(count::<HoverScale>(&mut world), 1 + PAGE_CONTENT.socials.len());
    }

    #[test]
    fn reveal_items_belong_to_known_reveals() {
        let mut world = spawned_page();
        let items: Vec<_> = world.query::<&RevealItem>().iter(&world).cloned().collect();
        assert!(!items.is_empty());
        for item in items {
            assert!(
                REVEALS.iter().any(|definition| definition.key == item.key),
                "unknown reveal '{}'",
                item.key
            );
        }
    }
}
