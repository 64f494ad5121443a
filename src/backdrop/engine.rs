use bevy::prelude::*;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::canvas::Canvas;
use super::connector;
use super::particle::{self, Particle};
use super::random;
use super::symbol::{self, Symbol};
use crate::config::{Profile, ProfilePolicy};

/// Owns the surface size, both populations and the pointer, and turns them
/// into one frame of draw calls per `step`.
#[derive(Debug)]
pub struct Engine {
    surface: Vec2,
    profile: Profile,
    policy: ProfilePolicy,
    particles: Vec<Particle>,
    symbols: Vec<Symbol>,
    pointer: Option<Vec2>,
    rng: StdRng,
    next_id: u64,
    /// Bumped on every `init`; lets a host tell a fresh population apart.
    generation: u64,
    frame: u64,
}

impl Engine {
    /// Build an engine for a `surface`-sized canvas and populate it.
    pub fn new(surface: Vec2, profile: Profile, policy: ProfilePolicy, seed: Option<u64>) -> Self {
        let mut engine = Self {
            surface,
            profile,
            policy,
            particles: Vec::new(),
            symbols: Vec::new(),
            pointer: None,
            rng: random::seeded(seed),
            next_id: 0,
            generation: 0,
            frame: 0,
        };
        engine.init();
        engine
    }

    /// Drop both populations and create fresh ones for the current surface.
    pub fn init(&mut self) {
        let bounds = self.surface;
        let profile = self.profile;

        let mut particles = Vec::with_capacity(profile.particle_count);
        for _ in 0..profile.particle_count {
            let id = self.take_id();
            particles.push(particle::spawn(id, bounds, &profile, &mut self.rng));
        }

        let mut symbols = Vec::with_capacity(profile.symbol_count);
        for _ in 0..profile.symbol_count {
            let id = self.take_id();
            symbols.push(symbol::spawn(id, bounds, &profile, &mut self.rng));
        }

        self.particles = particles;
        self.symbols = symbols;
        self.generation += 1;
        debug!(
            width = bounds.x,
            height = bounds.y,
            particles = self.particles.len(),
            symbols = self.symbols.len(),
            generation = self.generation,
            "backdrop populated"
        );
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// One update + render pass.
    ///
    /// Stacking order is part of the contract: glyphs first, connector lines
    /// over them, particles on top. Connectors use positions from before this
    /// frame's particle update.
    pub fn step(&mut self, canvas: &mut impl Canvas) {
        let bounds = self.surface;
        let profile = self.profile;

        canvas.clear(bounds);

        for s in &mut self.symbols {
            symbol::advance(s, bounds);
            symbol::render(s, canvas, &profile);
        }

        let lines = connector::render(&self.particles, canvas, &profile);

        for p in &mut self.particles {
            particle::advance(p, bounds, self.pointer, &profile);
            particle::render(p, canvas, &profile);
        }

        self.frame += 1;
        trace!(frame = self.frame, lines, "backdrop frame");
    }

    // --------------------- Input ---------------------

    /// `client` is the event position in viewport coordinates, `origin` the
    /// top-left of the surface's on-screen rectangle. A position off the
    /// surface counts as a leave.
    pub fn on_pointer_move(&mut self, client: Vec2, origin: Vec2) {
        let local = client - origin;
        self.pointer = self.on_surface(local).then_some(local);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Resize the surface and repopulate it. Under `ProfilePolicy::FollowViewport`
    /// the profile is re-resolved from the new width first.
    /// A pointer left outside the shrunk surface is dropped; otherwise it
    /// would drag particles off the edge.
    pub fn on_resize(&mut self, surface: Vec2) {
        self.surface = surface;
        if self.policy == ProfilePolicy::FollowViewport {
            self.profile = Profile::for_viewport_width(surface.x);
        }
        if self.pointer.is_some_and(|p| !self.on_surface(p)) {
            self.pointer = None;
        }
        self.init();
    }

    fn on_surface(&self, p: Vec2) -> bool {
        p.cmpge(Vec2::ZERO).all() && p.cmple(self.surface).all()
    }

    // --------------------- Accessors ---------------------

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn policy(&self) -> ProfilePolicy {
        self.policy
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Frames stepped since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
