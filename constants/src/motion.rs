// Pointer rotation
pub const MAX_ROTATION_DEG: f32 = 20.0;
pub const ROTATION_EASE_SECS: f32 = 0.5;

// Hover particle bursts
pub const PARTICLE_COUNT: usize = 10;
pub const PARTICLE_RADIUS_PX: f32 = 20.0;
pub const PARTICLE_DURATION_SECS: f32 = 0.6;
pub const PARTICLE_SIZE_PX: f32 = 4.0;
pub const ICON_HOVER_SCALE: f32 = 1.2;
pub const ICON_HOVER_SECS: f32 = 0.2;

// Header
pub const LOGO_HOVER_SCALE: f32 = 1.1;
pub const LOGO_HOVER_SECS: f32 = 0.3;
pub const HEADER_ENTRANCE_OFFSET_PX: f32 = -100.0;
pub const HEADER_ENTRANCE_SECS: f32 = 1.0;
pub const HEADER_SCROLLED_ALPHA: f32 = 0.9;

/// Fixed header height subtracted from anchor scroll targets.
pub const NAV_ANCHOR_OFFSET_PX: f32 = 80.0;
pub const NAV_GLIDE_SECS: f32 = 0.8;

/// Pixels scrolled per wheel line.
pub const WHEEL_LINE_PX: f32 = 40.0;

// Counters and allocation bars
pub const COUNTER_STEPS: u32 = 60;
pub const COUNTER_DURATION_SECS: f32 = 2.0;
pub const FILL_BAR_SECS: f32 = 1.5;

/// Fraction of the viewport height a parallax background drifts over its span.
pub const PARALLAX_SHIFT: f32 = 0.5;

/// World-space distance between scene hosts of consecutive sections.
pub const SCENE_SECTION_SPACING: f32 = 8.0;
