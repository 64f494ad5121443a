use bevy::prelude::*;
use bevy::window::WindowResized;

pub mod canvas;
pub mod connector;
pub mod engine;
pub mod particle;
pub mod random;
pub mod symbol;
pub mod systems;

pub mod debug;

pub use canvas::{Canvas, DisplayList, DrawCommand};
pub use engine::Engine;
pub use particle::Particle;
pub use symbol::Symbol;
pub use systems::Backdrop;

use crate::config::BackdropSettings;
use debug::{DebugOverlay, draw_attraction_gizmo, toggle_debug_overlay};
use systems::{
    attach_backdrop, backdrop_running, exit_on_esc_or_q_if_native, present_connectors,
    present_glyphs, present_particles, run_frame, setup_presentation, track_pointer, track_resize,
};

/// Plug this into your App with `.add_plugins(BackdropPlugin)`.
/// Insert a `BackdropSettings` first to change the profile policy or pin the seed.
pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BackdropSettings>()
            .init_resource::<DisplayList>()
            .init_resource::<DebugOverlay>()
            .add_message::<WindowResized>()
            .add_systems(Startup, setup_presentation)
            // attach retries until the surface is known; input lands before the
            // frame reads it, a resize fully repopulates before the step, and the
            // step finishes before presentation
            .add_systems(
                Update,
                (
                    attach_backdrop.run_if(not(resource_exists::<Backdrop>)),
                    (
                        track_pointer,
                        track_resize,
                        run_frame,
                        (present_glyphs, present_connectors, present_particles),
                    )
                        .chain()
                        .run_if(backdrop_running),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    exit_on_esc_or_q_if_native,
                    toggle_debug_overlay,
                    draw_attraction_gizmo.run_if(resource_exists::<Backdrop>),
                ),
            );
    }
}
