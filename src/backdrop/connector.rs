use super::canvas::Canvas;
use super::particle::Particle;
use crate::config::{CONNECTOR_OPACITY_SCALE, CONNECTOR_WIDTH, Profile};

/// Opacity of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be connected.
#[inline]
pub fn opacity(distance: f32, max_distance: f32) -> Option<f32> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * CONNECTOR_OPACITY_SCALE)
    } else {
        None
    }
}

/// Draw a line for every unordered pair closer than `profile.max_distance`.
///
/// Plain O(n²) pass; populations are small enough that a spatial index
/// would cost more than it saves.
pub fn render(particles: &[Particle], canvas: &mut impl Canvas, profile: &Profile) -> usize {
    let mut drawn = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = a.position.distance(b.position);
            if let Some(alpha) = opacity(distance, profile.max_distance) {
                canvas.stroke_line(
                    a.position,
                    b.position,
                    CONNECTOR_WIDTH,
                    profile.connector_color(alpha),
                );
                drawn += 1;
            }
        }
    }
    drawn
}
