use bevy::prelude::*;
use rand::rngs::StdRng;

use super::canvas::Canvas;
use super::random;
use crate::config::{PARTICLE_SIZE_MIN, PARTICLE_SIZE_SPREAD, Profile};

/// A small drifting dot. Takes part in connector lines and pointer attraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Unique per engine; a re-init never reuses one.
    pub id: u64,
    /// Canvas-local position (top-left origin, +y down).
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Radius in pixels.
    pub size: f32,
}

impl Particle {
    pub fn new(id: u64, position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            size,
        }
    }
}

/// Random position inside `bounds`, random size and a random velocity whose
/// components are centered on zero with a total spread of `profile.particle_speed`.
pub fn spawn(id: u64, bounds: Vec2, profile: &Profile, rng: &mut StdRng) -> Particle {
    let position = Vec2::new(random::unit(rng) * bounds.x, random::unit(rng) * bounds.y);
    let size = random::spread(rng, PARTICLE_SIZE_MIN, PARTICLE_SIZE_SPREAD);
    let velocity = Vec2::new(
        random::centered(rng, profile.particle_speed),
        random::centered(rng, profile.particle_speed),
    );
    Particle::new(id, position, velocity, size)
}

// --------------------- Integration ---------------------

/// Invert a velocity component when the position has left `[0, limit]` and is
/// still heading away. A particle that already turned around is left alone, so
/// this can be evaluated any number of times per crossing.
#[inline]
pub fn reflect_axis(position: f32, velocity: f32, limit: f32) -> f32 {
    if (position < 0.0 && velocity < 0.0) || (position > limit && velocity > 0.0) {
        -velocity
    } else {
        velocity
    }
}

/// One frame: move, bounce off the surface edges (no clamping), then pull
/// toward the pointer if it is within the attraction radius.
pub fn advance(p: &mut Particle, bounds: Vec2, pointer: Option<Vec2>, profile: &Profile) {
    p.position += p.velocity;

    p.velocity.x = reflect_axis(p.position.x, p.velocity.x, bounds.x);
    p.velocity.y = reflect_axis(p.position.y, p.velocity.y, bounds.y);

    if let Some(pointer) = pointer {
        let to_pointer = pointer - p.position;
        if to_pointer.length() < profile.attraction_radius {
            // exponential approach: a fixed fraction of the remaining gap
            p.position += to_pointer * profile.attraction_pull;
        }
    }
}

pub fn render(p: &Particle, canvas: &mut impl Canvas, profile: &Profile) {
    canvas.fill_circle(p.position, p.size, profile.particle_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::canvas::{DisplayList, DrawCommand};

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(0, Vec2::new(x, y), Vec2::ZERO, 2.0)
    }

    #[test]
    fn pointer_within_radius_pulls_particle_closer() {
        let mut p = still(400.0, 300.0);
        advance(&mut p, SURFACE, Some(Vec2::new(450.0, 300.0)), &Profile::DESKTOP);
        assert!(p.position.x > 400.0);
        assert!((p.position.x - 401.0).abs() < 1e-4);
        assert_eq!(p.position.y, 300.0);
    }

    #[test]
    fn attraction_never_reaches_pointer() {
        let pointer = Vec2::new(450.0, 300.0);
        let mut p = still(400.0, 300.0);
        let mut last_gap = pointer.distance(p.position);
        for _ in 0..200 {
            advance(&mut p, SURFACE, Some(pointer), &Profile::DESKTOP);
            let gap = pointer.distance(p.position);
            assert!(gap < last_gap);
            assert!(gap > 0.0);
            last_gap = gap;
        }
    }

    #[test]
    fn pointer_at_or_beyond_radius_is_ignored() {
        let mut at_edge = still(300.0, 300.0);
        advance(&mut at_edge, SURFACE, Some(Vec2::new(400.0, 300.0)), &Profile::DESKTOP);
        assert_eq!(at_edge, still(300.0, 300.0));

        for offset in [101.0, 250.0] {
            let mut with_pointer = Particle::new(0, Vec2::new(300.0, 300.0), Vec2::new(0.1, -0.1), 2.0);
            let mut without = with_pointer;
            let pointer = with_pointer.position + Vec2::new(offset, 0.0);
            advance(&mut with_pointer, SURFACE, Some(pointer), &Profile::DESKTOP);
            advance(&mut without, SURFACE, None, &Profile::DESKTOP);
            assert_eq!(with_pointer, without, "offset {offset}");
        }
    }

    #[test]
    fn crossing_right_edge_flips_speed() {
        let mut p = Particle::new(0, Vec2::new(799.9, 300.0), Vec2::new(0.4, 0.0), 2.0);
        advance(&mut p, SURFACE, None, &Profile::DESKTOP);
        assert!(p.position.x > SURFACE.x);
        assert_eq!(p.velocity.x, -0.4);

        advance(&mut p, SURFACE, None, &Profile::DESKTOP);
        assert!(p.position.x <= SURFACE.x);
        assert_eq!(p.velocity.x, -0.4);
    }

    #[test]
    fn bounce_is_idempotent_once_heading_back() {
        // outside on the left, already moving right
        assert_eq!(reflect_axis(-0.1, 0.2, 800.0), 0.2);
        // outside on the right, already moving left
        assert_eq!(reflect_axis(800.1, -0.2, 800.0), -0.2);
        // inside: nothing to do
        assert_eq!(reflect_axis(400.0, 0.2, 800.0), 0.2);
        assert_eq!(reflect_axis(0.0, -0.2, 800.0), -0.2);
        // outside and heading away: flip exactly once
        let flipped = reflect_axis(-0.1, -0.2, 800.0);
        assert_eq!(flipped, 0.2);
        assert_eq!(reflect_axis(-0.1, flipped, 800.0), 0.2);
    }

    #[test]
    fn spawned_particles_start_inside() {
        let mut rng = random::seeded(Some(3));
        for id in 0..500 {
            let p = spawn(id, SURFACE, &Profile::DESKTOP, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x <= SURFACE.x);
            assert!(p.position.y >= 0.0 && p.position.y <= SURFACE.y);
            assert!(p.size >= 1.0 && p.size <= 4.0);
            assert!(p.velocity.abs().max_element() <= 0.2 + 1e-6);
        }
    }

    #[test]
    fn render_draws_a_filled_circle() {
        let mut list = DisplayList::default();
        render(&still(10.0, 20.0), &mut list, &Profile::MOBILE);
        match &list.commands()[0] {
            DrawCommand::Circle { center, radius, color } => {
                assert_eq!(*center, Vec2::new(10.0, 20.0));
                assert_eq!(*radius, 2.0);
                assert_eq!(*color, Profile::MOBILE.particle_color());
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }
}
