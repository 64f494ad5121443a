use bevy::prelude::*;

use super::canvas::canvas_to_world;
use super::systems::Backdrop;

/// Whether the attraction radius overlay is drawn. Toggled with F3.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct DebugOverlay(pub bool);

pub fn toggle_debug_overlay(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keys.just_pressed(KeyCode::F3) {
        overlay.0 = !overlay.0;
    }
}

/// Circle of the attraction radius around the pointer, plus the surface outline.
pub fn draw_attraction_gizmo(mut gizmos: Gizmos, overlay: Res<DebugOverlay>, backdrop: Res<Backdrop>) {
    if !overlay.0 {
        return;
    }
    let engine = &backdrop.engine;
    let surface = engine.surface();

    gizmos.rect_2d(Vec2::ZERO, surface, Color::srgba(1.0, 1.0, 1.0, 0.1));

    let Some(pointer) = engine.pointer() else {
        return;
    };
    gizmos.circle_2d(
        canvas_to_world(pointer, surface),
        engine.profile().attraction_radius,
        Color::srgba(1.0, 0.0, 0.0, 0.25),
    );
}
