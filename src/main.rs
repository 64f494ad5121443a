use bevy::prelude::*;
use bevy::window::WindowPlugin;

use particle_backdrop::backdrop::BackdropPlugin;
use particle_backdrop::config::CANVAS_SELECTOR;

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features; on the web the window binds to the hero canvas
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "particle-backdrop".into(),
                canvas: Some(CANVAS_SELECTOR.into()),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        // Particles, glyphs, connectors
        .add_plugins(BackdropPlugin)
        .run();
}
