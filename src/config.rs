use bevy::prelude::*;
#[cfg(feature = "profile")]
use serde::Serialize;

/// Surface binding (wasm32): the element the primary window attaches to.
pub const CANVAS_SELECTOR: &str = "#heroCanvas";

/// Viewports narrower than this get the lighter mobile profile.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Accent color shared by particles, connectors and glyphs: rgb(56, 189, 248).
pub const ACCENT: Srgba = Srgba::rgb(56.0 / 255.0, 189.0 / 255.0, 248.0 / 255.0);

/// Particle defaults
pub const PARTICLE_ALPHA: f32 = 0.5;
pub const PARTICLE_SPEED: f32 = 0.4; // full spread of the per-axis speed, centered on 0
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_SPREAD: f32 = 3.0;

/// Pointer interaction
pub const ATTRACTION_RADIUS: f32 = 100.0;
pub const ATTRACTION_PULL: f32 = 0.02; // fraction of the particle->pointer vector per frame

/// Connector lines
pub const CONNECTOR_OPACITY_SCALE: f32 = 0.15;
pub const CONNECTOR_WIDTH: f32 = 1.0;

/// Code symbols
pub const GLYPHS: &[&str] = &["</", "/>", "{}", "()", "[]", "=>", "/*", "*/"];
pub const SYMBOL_SIZE_MIN: f32 = 12.0;
pub const SYMBOL_SIZE_SPREAD: f32 = 14.0;
pub const SYMBOL_DRIFT: f32 = 0.3;
pub const SYMBOL_OPACITY_MIN: f32 = 0.1;
pub const SYMBOL_OPACITY_SPREAD: f32 = 0.3;
pub const SYMBOL_SPIN: f32 = 0.5; // degrees per frame, full spread
pub const WRAP_MARGIN: f32 = 20.0;

/// Which size class a profile was resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "profile", derive(Serialize))]
pub enum ProfileKind {
    Mobile,
    Desktop,
}

/// The resolved set of tunables for one viewport size class.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "profile", derive(Serialize))]
pub struct Profile {
    pub kind: ProfileKind,
    pub particle_count: usize,
    pub symbol_count: usize,
    /// Connector lines are drawn between particles closer than this.
    pub max_distance: f32,
    pub particle_speed: f32,
    pub attraction_radius: f32,
    pub attraction_pull: f32,
    pub glyphs: &'static [&'static str],
}

impl Profile {
    pub const MOBILE: Profile = Profile {
        kind: ProfileKind::Mobile,
        particle_count: 30,
        symbol_count: 5,
        max_distance: 100.0,
        particle_speed: PARTICLE_SPEED,
        attraction_radius: ATTRACTION_RADIUS,
        attraction_pull: ATTRACTION_PULL,
        glyphs: GLYPHS,
    };

    pub const DESKTOP: Profile = Profile {
        kind: ProfileKind::Desktop,
        particle_count: 80,
        symbol_count: 15,
        max_distance: 150.0,
        particle_speed: PARTICLE_SPEED,
        attraction_radius: ATTRACTION_RADIUS,
        attraction_pull: ATTRACTION_PULL,
        glyphs: GLYPHS,
    };

    pub fn for_viewport_width(width: f32) -> Self {
        if width < MOBILE_BREAKPOINT {
            Self::MOBILE
        } else {
            Self::DESKTOP
        }
    }

    pub fn particle_color(&self) -> Color {
        Color::from(ACCENT.with_alpha(PARTICLE_ALPHA))
    }

    pub fn connector_color(&self, opacity: f32) -> Color {
        Color::from(ACCENT.with_alpha(opacity))
    }

    pub fn symbol_color(&self, opacity: f32) -> Color {
        Color::from(ACCENT.with_alpha(opacity))
    }
}

/// What happens to the profile when the viewport is resized.
///
/// `Pinned` keeps whatever was resolved at startup, so shrinking a desktop
/// window below the breakpoint still repopulates with desktop counts.
/// `FollowViewport` re-resolves on every resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "profile", derive(Serialize))]
pub enum ProfilePolicy {
    #[default]
    Pinned,
    FollowViewport,
}

/// Host-level knobs for the backdrop plugin.
#[derive(Resource, Clone, Copy, Debug)]
pub struct BackdropSettings {
    pub policy: ProfilePolicy,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Hold off attaching until the window reports its first real size.
    /// On wasm32 the canvas size only arrives with the first resize, so the
    /// startup size is the configured default rather than the viewport.
    pub await_first_resize: bool,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            policy: ProfilePolicy::default(),
            seed: None,
            await_first_resize: cfg!(target_arch = "wasm32"),
        }
    }
}
