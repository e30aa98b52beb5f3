use super::gate::LoadingGate;
use bevy::prelude::*;

#[derive(Component)]
pub struct ProgressCounterText;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct ProgressBarFill;

const OVERLAY_BACKGROUND: Color = Color::srgb(0.0, 0.0, 0.0);
const ACCENT: Color = Color::srgb(0.66, 0.33, 0.97);

/// Give each newly mounted gate its full-screen overlay.
pub fn attach_loading_overlay(mut commands: Commands, gates: Query<Entity, Added<LoadingGate>>) {
    for gate in &gates {
        commands
            .entity(gate)
            .insert((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(OVERLAY_BACKGROUND),
                GlobalZIndex(100),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("0%"),
                    TextFont {
                        font_size: 48.0,
                        ..default()
                    },
                    TextColor(ACCENT),
                    ProgressCounterText,
                ));
                parent
                    .spawn((
                        Node {
                            width: Val::Px(256.0),
                            height: Val::Px(4.0),
                            overflow: Overflow::clip(),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.12, 0.12, 0.14)),
                    ))
                    .with_children(|track| {
                        track.spawn((
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(ACCENT),
                            ProgressBarFill,
                        ));
                    });
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.6, 0.65)),
                    StatusText,
                ));
            });
    }
}

pub fn update_loading_overlay(
    gates: Query<&LoadingGate>,
    mut counters: Query<&mut Text, (With<ProgressCounterText>, Without<StatusText>)>,
    mut statuses: Query<&mut Text, (With<StatusText>, Without<ProgressCounterText>)>,
    mut fills: Query<&mut Node, With<ProgressBarFill>>,
) {
    let Ok(gate) = gates.single() else {
        return;
    };
    let state = gate.state();

    for mut text in &mut counters {
        text.0 = format!("{}%", state.progress);
    }
    for mut text in &mut statuses {
        if text.0 != state.status_text {
            text.0 = state.status_text.to_string();
        }
    }
    for mut node in &mut fills {
        node.width = Val::Percent(f32::from(state.progress));
    }
}
