use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use tracing::{debug, info};

use super::canvas::{DisplayList, DrawCommand, canvas_to_world};
use super::engine::Engine;
use crate::config::{ACCENT, BackdropSettings, PARTICLE_ALPHA, Profile};

/// Draw layers (world z). Glyphs sit under connectors, connectors under particles.
pub const GLYPH_LAYER: f32 = 0.0;
pub const CONNECTOR_LAYER: f32 = 1.0;
pub const PARTICLE_LAYER: f32 = 2.0;

/// The live engine plus the frame-loop switch. Absent when no surface was found.
#[derive(Resource, Debug)]
pub struct Backdrop {
    pub engine: Engine,
    /// `run_frame` only runs while this is set; clearing it stops the loop.
    pub running: bool,
}

impl Backdrop {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            running: true,
        }
    }
}

/// Shared circle mesh (unit radius, scaled per particle) and fill material.
#[derive(Resource, Debug, Clone)]
pub struct ParticleAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<ColorMaterial>,
}

/// Pool slot for the n-th glyph of the display list.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlyphSprite(pub usize);

/// Pool slot for the n-th connector line of the display list.
#[derive(Component, Debug, Clone, Copy)]
pub struct ConnectorSprite(pub usize);

/// Pool slot for the n-th particle of the display list.
#[derive(Component, Debug, Clone, Copy)]
pub struct ParticleSprite(pub usize);

pub fn backdrop_running(backdrop: Option<Res<Backdrop>>) -> bool {
    backdrop.is_some_and(|b| b.running)
}

// --------------------- Startup ---------------------

pub fn setup_presentation(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    // every particle shares one fill, so one material covers the population
    let mesh = meshes.add(Circle::new(1.0));
    let material = materials.add(Color::from(ACCENT.with_alpha(PARTICLE_ALPHA)));
    commands.insert_resource(ParticleAssets { mesh, material });
}

/// Bind the engine to the primary window. Without one the backdrop stays inert.
///
/// Runs every `Update` until it succeeds. With `await_first_resize` set it
/// also waits for the window's first `WindowResized`, so the profile is picked
/// from the real viewport width instead of the default window size.
pub fn attach_backdrop(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    settings: Res<BackdropSettings>,
    mut resized: MessageReader<WindowResized>,
    mut reported_inert: Local<bool>,
) {
    let Ok((entity, window)) = windows.single() else {
        if !*reported_inert {
            debug!("no primary window; backdrop stays inert");
            *reported_inert = true;
        }
        return;
    };

    let settled = resized.read().any(|e| e.window == entity);
    if settings.await_first_resize && !settled {
        return;
    }

    let surface = window.size();
    let profile = Profile::for_viewport_width(surface.x);
    let engine = Engine::new(surface, profile, settings.policy, settings.seed);
    info!(
        width = surface.x,
        height = surface.y,
        profile = ?profile.kind,
        policy = ?engine.policy(),
        "attaching backdrop"
    );
    commands.insert_resource(Backdrop::new(engine));
}

// --------------------- Input ---------------------

/// The window is the canvas, so its cursor position is already surface-local.
pub fn track_pointer(windows: Query<&Window, With<PrimaryWindow>>, mut backdrop: ResMut<Backdrop>) {
    let Ok(window) = windows.single() else {
        return;
    };
    match window.cursor_position() {
        Some(pos) => backdrop.engine.on_pointer_move(pos, Vec2::ZERO),
        None if backdrop.engine.pointer().is_some() => backdrop.engine.on_pointer_leave(),
        None => {}
    }
}

/// Repopulate whenever the window size drifts from the engine's surface.
pub fn track_resize(windows: Query<&Window, With<PrimaryWindow>>, mut backdrop: ResMut<Backdrop>) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.size();
    // minimized windows report 0x0; keep the last population until restored
    if size.x <= 0.0 || size.y <= 0.0 || size == backdrop.engine.surface() {
        return;
    }
    debug!(width = size.x, height = size.y, "viewport resized");
    backdrop.engine.on_resize(size);
}

// --------------------- Frame ---------------------

/// One engine pass per `Update`. Bevy re-runs the schedule every display
/// frame, which stands in for requesting the next animation frame.
pub fn run_frame(mut backdrop: ResMut<Backdrop>, mut list: ResMut<DisplayList>) {
    backdrop.engine.step(&mut *list);
}

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
pub fn exit_on_esc_or_q_if_native(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if cfg!(not(target_arch = "wasm32")) && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        exit.write(AppExit::Success);
    }
}

// --------------------- Presentation ---------------------

fn glyph_transform(at: Vec2, angle: f32, surface: Vec2) -> Transform {
    // canvas angles turn clockwise on screen; world +z rotation is counter-clockwise
    Transform::from_translation(canvas_to_world(at, surface).extend(GLYPH_LAYER))
        .with_rotation(Quat::from_rotation_z(-angle))
}

fn connector_transform(from: Vec2, to: Vec2, surface: Vec2) -> (Transform, f32) {
    let a = canvas_to_world(from, surface);
    let b = canvas_to_world(to, surface);
    let d = b - a;
    let tf = Transform::from_translation((0.5 * (a + b)).extend(CONNECTOR_LAYER))
        .with_rotation(Quat::from_rotation_z(d.y.atan2(d.x)));
    (tf, d.length())
}

fn particle_transform(center: Vec2, radius: f32, surface: Vec2) -> Transform {
    Transform::from_translation(canvas_to_world(center, surface).extend(PARTICLE_LAYER))
        .with_scale(Vec3::new(radius, radius, 1.0))
}

/// Glyph content only changes on re-init, so the pool is rebuilt per
/// population generation and otherwise just follows the transforms.
pub fn present_glyphs(
    mut commands: Commands,
    backdrop: Res<Backdrop>,
    list: Res<DisplayList>,
    mut pool: Query<(Entity, &GlyphSprite, &mut Transform)>,
    mut presented: Local<Option<u64>>,
) {
    let Some(surface) = list.surface() else {
        return;
    };
    let generation = backdrop.engine.generation();

    if *presented != Some(generation) {
        for (entity, _, _) in &pool {
            commands.entity(entity).despawn();
        }
        for (i, cmd) in list.texts().enumerate() {
            if let DrawCommand::Text {
                glyph,
                at,
                angle,
                font_size,
                color,
            } = cmd
            {
                commands.spawn((
                    GlyphSprite(i),
                    Text2d::new(*glyph),
                    TextFont::from_font_size(*font_size),
                    TextColor(*color),
                    glyph_transform(*at, *angle, surface),
                ));
            }
        }
        *presented = Some(generation);
        return;
    }

    let texts: Vec<&DrawCommand> = list.texts().collect();
    for (_, slot, mut tf) in &mut pool {
        if let Some(DrawCommand::Text { at, angle, .. }) = texts.get(slot.0) {
            *tf = glyph_transform(*at, *angle, surface);
        }
    }
}

/// The number of connectors changes every frame; surplus slots are hidden
/// rather than despawned.
pub fn present_connectors(
    mut commands: Commands,
    list: Res<DisplayList>,
    mut pool: Query<(&ConnectorSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let Some(surface) = list.surface() else {
        return;
    };
    let lines: Vec<&DrawCommand> = list.lines().collect();

    let mut pooled = 0;
    for (slot, mut sprite, mut tf, mut vis) in &mut pool {
        pooled += 1;
        match lines.get(slot.0) {
            Some(DrawCommand::Line {
                from,
                to,
                width,
                color,
            }) => {
                let (next, length) = connector_transform(*from, *to, surface);
                *tf = next;
                sprite.color = *color;
                sprite.custom_size = Some(Vec2::new(length, *width));
                *vis = Visibility::Inherited;
            }
            _ => *vis = Visibility::Hidden,
        }
    }

    for (i, cmd) in lines.iter().enumerate().skip(pooled) {
        if let DrawCommand::Line {
            from,
            to,
            width,
            color,
        } = cmd
        {
            let (tf, length) = connector_transform(*from, *to, surface);
            commands.spawn((
                ConnectorSprite(i),
                Sprite::from_color(*color, Vec2::new(length, *width)),
                tf,
            ));
        }
    }
}

pub fn present_particles(
    mut commands: Commands,
    list: Res<DisplayList>,
    assets: Res<ParticleAssets>,
    mut pool: Query<(&ParticleSprite, &mut Transform, &mut Visibility)>,
) {
    let Some(surface) = list.surface() else {
        return;
    };
    let circles: Vec<&DrawCommand> = list.circles().collect();

    let mut pooled = 0;
    for (slot, mut tf, mut vis) in &mut pool {
        pooled += 1;
        match circles.get(slot.0) {
            Some(DrawCommand::Circle { center, radius, .. }) => {
                *tf = particle_transform(*center, *radius, surface);
                *vis = Visibility::Inherited;
            }
            _ => *vis = Visibility::Hidden,
        }
    }

    for (i, cmd) in circles.iter().enumerate().skip(pooled) {
        if let DrawCommand::Circle { center, radius, .. } = cmd {
            commands.spawn((
                ParticleSprite(i),
                Mesh2d(assets.mesh.clone()),
                MeshMaterial2d(assets.material.clone()),
                particle_transform(*center, *radius, surface),
            ));
        }
    }
}
