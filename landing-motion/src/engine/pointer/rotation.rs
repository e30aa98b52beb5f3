use super::PointerMoved;
use crate::engine::animation::tween::Tween;
use crate::engine::core::motion_settings::MotionSettings;
use crate::engine::page::scroll::{PageScroll, PageSection};
use crate::engine::reveal::trigger::SectionBounds;
use crate::engine::scene::scene_handle::SceneHandle;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::time::Duration;

/// Target rotation in degrees for a pointer inside `rect`.
///
/// `x` tilts with vertical position, `y` turns with horizontal position;
/// the rect centre maps to zero. Degenerate rects give `None`.
pub fn target_rotation(pointer: Vec2, rect: Rect, max_angle: f32) -> Option<Vec2> {
    let size = rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let normalized = ((pointer - rect.min) / size).clamp(Vec2::ZERO, Vec2::ONE);
    Some(Vec2::new(
        (normalized.y - 0.5) * -2.0 * max_angle,
        (normalized.x - 0.5) * 2.0 * max_angle,
    ))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub current: Vec2,
    pub target: Vec2,
}

/// Live rotation of a host's target object, eased toward the pointer.
#[derive(Component, Debug, Clone, Default)]
pub struct PointerRotation {
    state: RotationState,
    tween: Option<(Vec2, Tween)>,
    base: Option<Quat>,
}

impl PointerRotation {
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Restart the ease from the current angle toward `target`.
    pub fn aim(&mut self, target: Vec2, ease: Duration) {
        self.state.target = target;
        self.tween = Some((
            self.state.current,
            Tween::new(ease, EaseFunction::CubicOut),
        ));
    }

    /// Advance the ease; returns true when the current angle moved.
    pub fn step(&mut self, delta: Duration) -> bool {
        let Some((from, tween)) = &mut self.tween else {
            return false;
        };
        let progress = tween.advance(delta);
        self.state.current = from.lerp(self.state.target, progress);
        if tween.is_finished() {
            self.tween = None;
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rotation for the target, layered on its authored base rotation.
    fn compose(&mut self, authored: Quat) -> Quat {
        let base = *self.base.get_or_insert(authored);
        base * Quat::from_euler(
            EulerRot::XYZ,
            self.state.current.x.to_radians(),
            self.state.current.y.to_radians(),
            0.0,
        )
    }
}

/// On-screen rect of the section hosting a scene. Pointer positions are
/// normalized against it; moves outside it are ignored.
#[derive(Component, Debug, Clone, Default)]
pub struct ContainerRect {
    pub section: String,
    pub rect: Rect,
}

impl ContainerRect {
    pub fn for_section(section: &str) -> Self {
        Self {
            section: section.to_string(),
            rect: Rect::default(),
        }
    }

    /// Place the rect at `bounds`, shifted up by the scroll offset.
    pub fn fit(&mut self, bounds: SectionBounds, scroll_offset: f32, width: f32) {
        let top = bounds.top - scroll_offset;
        self.rect = Rect::new(0.0, top, width, top + bounds.height);
    }
}

pub fn forward_cursor_moves(
    mut cursor_events: EventReader<CursorMoved>,
    mut pointer_events: EventWriter<PointerMoved>,
) {
    for event in cursor_events.read() {
        pointer_events.write(PointerMoved {
            position: event.position,
        });
    }
}

/// Track each host section's on-screen rect. Recomputed for new hosts and
/// whenever the window, the scroll offset or the section layout moves.
pub fn fit_container_rects(
    windows: Query<Ref<Window>, With<PrimaryWindow>>,
    scroll: Res<PageScroll>,
    sections: Query<(&PageSection, Ref<SectionBounds>)>,
    mut containers: Query<&mut ContainerRect>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let relayout = window.is_changed()
        || scroll.is_changed()
        || sections.iter().any(|(_, bounds)| bounds.is_changed());

    for mut container in &mut containers {
        if !relayout && !container.is_added() {
            continue;
        }
        let Some((_, bounds)) = sections
            .iter()
            .find(|(section, _)| section.selector == container.section)
        else {
            continue;
        };
        container.fit(*bounds, scroll.offset(), window.width());
    }
}

pub fn aim_pointer_rotation(
    mut pointer_events: EventReader<PointerMoved>,
    settings: Res<MotionSettings>,
    mut hosts: Query<(&SceneHandle, &ContainerRect, &mut PointerRotation)>,
) {
    let Some(latest) = pointer_events.read().last() else {
        return;
    };
    for (handle, container, mut rotation) in &mut hosts {
        if handle.target().is_none() || !container.rect.contains(latest.position) {
            continue;
        }
        if let Some(target) =
            target_rotation(latest.position, container.rect, settings.max_rotation_deg)
        {
            rotation.aim(target, settings.rotation_ease);
        }
    }
}

pub fn ease_pointer_rotation(
    time: Res<Time>,
    mut hosts: Query<(&mut SceneHandle, &mut PointerRotation)>,
    mut transforms: Query<&mut Transform, Without<PointerRotation>>,
) {
    for (mut handle, mut rotation) in &mut hosts {
        let Some(target) = handle.target() else {
            continue;
        };
        if !rotation.step(time.delta()) {
            continue;
        }
        let Ok(mut transform) = transforms.get_mut(target) else {
            warn!(
                "Rotation target of '{}' is gone, detaching pointer rotation",
                handle.scene_id()
            );
            handle.forget_target();
            rotation.reset();
            continue;
        };
        transform.rotation = rotation.compose(transform.rotation);
    }
}
