use crate::engine::animation::tween::Tween;
use crate::engine::core::page_surface::PageSurface;
use crate::engine::reveal::trigger::{ScrollViewport, SectionBounds};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::motion::{SCENE_SECTION_SPACING, WHEEL_LINE_PX};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f32,
    to: f32,
    tween: Tween,
}

/// Vertical scroll state of the page.
#[derive(Resource, Debug, Clone)]
pub struct PageScroll {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
    glide: Option<Glide>,
}

impl Default for PageScroll {
    fn default() -> Self {
        Self {
            offset: 0.0,
            viewport_height: 720.0,
            content_height: 0.0,
            glide: None,
        }
    }
}

impl PageScroll {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn viewport(&self) -> ScrollViewport {
        ScrollViewport {
            scroll: self.offset,
            height: self.viewport_height,
        }
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.glide = None;
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.offset + delta);
    }

    /// Ease toward `offset` over `duration`.
    pub fn glide_to(&mut self, offset: f32, duration: Duration) {
        self.glide = Some(Glide {
            from: self.offset,
            to: offset.clamp(0.0, self.max_offset()),
            tween: Tween::new(duration, EaseFunction::CubicInOut),
        });
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub fn step_glide(&mut self, delta: Duration) {
        let Some(glide) = &mut self.glide else {
            return;
        };
        let progress = glide.tween.advance(delta);
        self.offset = glide.from + (glide.to - glide.from) * progress;
        if glide.tween.is_finished() {
            self.glide = None;
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

/// A page section stacked in `order`, sized relative to the viewport.
#[derive(Component, Debug, Clone)]
pub struct PageSection {
    pub selector: String,
    pub order: usize,
    pub height_vh: f32,
}

/// Root node that is shifted by the scroll offset.
#[derive(Component)]
pub struct PageRoot;

/// Camera that tracks scroll across the scene hosts.
#[derive(Component)]
pub struct PageCamera;

pub fn scroll_with_wheel(
    mut wheel_events: EventReader<MouseWheel>,
    surface: Res<PageSurface>,
    mut scroll: ResMut<PageScroll>,
) {
    let delta: f32 = wheel_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * WHEEL_LINE_PX,
            MouseScrollUnit::Pixel => event.y,
        })
        .sum();
    // Locked while the loading overlay is up.
    if delta == 0.0 || surface.is_scroll_locked() {
        return;
    }
    scroll.scroll_by(-delta);
}

pub fn track_viewport(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut scroll: ResMut<PageScroll>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if window.height() != scroll.viewport_height() {
        scroll.set_viewport_height(window.height());
    }
}

pub fn glide_scroll(time: Res<Time>, mut scroll: ResMut<PageScroll>) {
    if scroll.is_gliding() {
        scroll.step_glide(time.delta());
    }
}

/// Stack sections top to bottom and size them to the viewport.
pub fn layout_sections(
    mut scroll: ResMut<PageScroll>,
    mut sections: Query<(&PageSection, &mut SectionBounds, &mut Node)>,
) {
    let viewport = scroll.viewport_height();
    let mut ordered: Vec<_> = sections.iter_mut().collect();
    ordered.sort_by_key(|(section, _, _)| section.order);

    let mut top = 0.0;
    for (section, mut bounds, mut node) in ordered {
        let height = section.height_vh * viewport;
        let placed = SectionBounds { top, height };
        if *bounds != placed {
            *bounds = placed;
            node.min_height = Val::Px(height);
        }
        top += height;
    }

    if scroll.content_height() != top {
        scroll.set_content_height(top);
    }
}

pub fn apply_page_offset(
    scroll: Res<PageScroll>,
    mut roots: Query<&mut Node, With<PageRoot>>,
) {
    for mut node in &mut roots {
        node.top = Val::Px(-scroll.offset());
    }
}

pub fn follow_scroll_with_camera(
    scroll: Res<PageScroll>,
    mut cameras: Query<&mut Transform, With<PageCamera>>,
) {
    let y = -scroll.offset() / scroll.viewport_height() * SCENE_SECTION_SPACING;
    for mut transform in &mut cameras {
        transform.translation.y = y;
    }
}
