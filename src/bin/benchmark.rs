//! Headless frame benchmark: steps the engine without a window.
//!
//! Usage: `benchmark [--frames N] [--width W] [--height H]`.

use std::time::Instant;

use bevy::math::Vec2;
use bevy::prelude::Color;
use clap::Parser;
use particle_backdrop::backdrop::{Canvas, Engine};
use particle_backdrop::config::{Profile, ProfilePolicy};

#[derive(Parser, Debug)]
#[command(name = "benchmark", about = "Step the backdrop engine headlessly and report frame cost")]
struct Args {
    /// Frames to step
    #[arg(short, long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,

    /// Surface width in pixels; also picks the mobile/desktop profile
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f32,

    /// RNG seed for the populations
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Counts draw calls instead of recording them.
#[derive(Default, Debug)]
struct CountingCanvas {
    clears: u64,
    circles: u64,
    texts: u64,
    lines: u64,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self, _size: Vec2) {
        self.clears += 1;
    }
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles += 1;
    }
    fn fill_text(&mut self, _glyph: &'static str, _at: Vec2, _angle: f32, _font_size: f32, _color: Color) {
        self.texts += 1;
    }
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color) {
        self.lines += 1;
    }
}

fn main() {
    let Args {
        frames,
        width,
        height,
        seed,
    } = Args::parse();

    let surface = Vec2::new(width, height);
    let profile = Profile::for_viewport_width(width);
    let mut engine = Engine::new(surface, profile, ProfilePolicy::Pinned, Some(seed));
    let mut canvas = CountingCanvas::default();

    let start = Instant::now();
    for i in 0..frames {
        // circle the pointer through the middle so attraction is part of the cost
        let t = i as f32 * 0.02;
        engine.on_pointer_move(0.5 * surface + 0.3 * surface * Vec2::new(t.cos(), t.sin()), Vec2::ZERO);
        engine.step(&mut canvas);
    }
    let elapsed = start.elapsed();
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);

    println!(
        "{frames} frames @ {width}x{height} ({:?} profile): {:.3}s, {:.0} frames/s, {:.1} µs/frame",
        profile.kind,
        secs,
        frames as f64 / secs,
        secs * 1e6 / frames as f64,
    );
    println!(
        "draw calls: {} clears, {} texts, {} lines ({:.1}/frame), {} circles",
        canvas.clears,
        canvas.texts,
        canvas.lines,
        canvas.lines as f64 / frames as f64,
        canvas.circles,
    );

    #[cfg(feature = "profile")]
    {
        let summary = serde_json::json!({
            "frames": frames,
            "width": width,
            "height": height,
            "profile": profile,
            "seconds": secs,
            "clears": canvas.clears,
            "texts": canvas.texts,
            "lines": canvas.lines,
            "circles": canvas.circles,
        });
        println!("{summary}");
    }
}
