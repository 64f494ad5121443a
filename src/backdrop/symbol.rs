use bevy::prelude::*;
use rand::rngs::StdRng;

use super::canvas::Canvas;
use super::random;
use crate::config::*;

/// A decorative code glyph drifting vertically and spinning slowly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Symbol {
    pub id: u64,
    /// Fixed after creation.
    pub x: f32,
    pub y: f32,
    pub glyph: &'static str,
    /// Font size in pixels.
    pub size: f32,
    pub speed_y: f32,
    pub opacity: f32,
    /// Degrees.
    pub angle: f32,
    /// Degrees per frame.
    pub rotation_speed: f32,
}

pub fn spawn(id: u64, bounds: Vec2, profile: &Profile, rng: &mut StdRng) -> Symbol {
    let x = random::unit(rng) * bounds.x;
    let y = random::unit(rng) * bounds.y;
    let glyph = pick_glyph(profile.glyphs, random::unit(rng));
    Symbol {
        id,
        x,
        y,
        glyph,
        size: random::spread(rng, SYMBOL_SIZE_MIN, SYMBOL_SIZE_SPREAD),
        speed_y: random::centered(rng, SYMBOL_DRIFT),
        opacity: random::spread(rng, SYMBOL_OPACITY_MIN, SYMBOL_OPACITY_SPREAD),
        angle: random::unit(rng) * 360.0,
        rotation_speed: random::centered(rng, SYMBOL_SPIN),
    }
}

fn pick_glyph(glyphs: &'static [&'static str], u: f32) -> &'static str {
    if glyphs.is_empty() {
        return "";
    }
    let i = ((u * glyphs.len() as f32) as usize).min(glyphs.len() - 1);
    glyphs[i]
}

/// Keep `y` inside `[-WRAP_MARGIN, height + WRAP_MARGIN]`: leaving through one
/// edge re-enters at the other.
#[inline]
pub fn wrap_y(y: f32, height: f32) -> f32 {
    if y < -WRAP_MARGIN {
        height + WRAP_MARGIN
    } else if y > height + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        y
    }
}

pub fn advance(s: &mut Symbol, bounds: Vec2) {
    s.y += s.speed_y;
    s.angle += s.rotation_speed;
    s.y = wrap_y(s.y, bounds.y);
}

pub fn render(s: &Symbol, canvas: &mut impl Canvas, profile: &Profile) {
    canvas.fill_text(
        s.glyph,
        Vec2::new(s.x, s.y),
        s.angle.to_radians(),
        s.size,
        profile.symbol_color(s.opacity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::canvas::{DisplayList, DrawCommand};

    fn drifting(y: f32, speed_y: f32) -> Symbol {
        Symbol {
            id: 0,
            x: 100.0,
            y,
            glyph: "{}",
            size: 16.0,
            speed_y,
            opacity: 0.2,
            angle: 0.0,
            rotation_speed: 0.5,
        }
    }

    #[test]
    fn leaving_bottom_reenters_top() {
        let mut s = drifting(620.0, 0.15);
        advance(&mut s, Vec2::new(800.0, 600.0));
        assert_eq!(s.y, -WRAP_MARGIN);
    }

    #[test]
    fn leaving_top_reenters_bottom() {
        let mut s = drifting(-20.0, -0.15);
        advance(&mut s, Vec2::new(800.0, 600.0));
        assert_eq!(s.y, 620.0);
    }

    #[test]
    fn y_stays_within_margins_over_many_frames() {
        let bounds = Vec2::new(640.0, 480.0);
        let mut rng = random::seeded(Some(11));
        let mut symbols: Vec<Symbol> = (0..20)
            .map(|id| spawn(id, bounds, &Profile::DESKTOP, &mut rng))
            .collect();
        // exaggerate drift so every symbol wraps several times
        for s in &mut symbols {
            s.speed_y *= 40.0;
        }
        for _ in 0..5_000 {
            for s in &mut symbols {
                advance(s, bounds);
                assert!(s.y >= -WRAP_MARGIN && s.y <= bounds.y + WRAP_MARGIN, "y = {}", s.y);
            }
        }
    }

    #[test]
    fn rotation_accumulates_and_renders_in_radians() {
        let mut s = drifting(100.0, 0.0);
        for _ in 0..180 {
            advance(&mut s, Vec2::new(800.0, 600.0));
        }
        assert!((s.angle - 90.0).abs() < 1e-3);

        let mut list = DisplayList::default();
        render(&s, &mut list, &Profile::DESKTOP);
        match &list.commands()[0] {
            DrawCommand::Text { glyph, angle, font_size, color, .. } => {
                assert_eq!(*glyph, "{}");
                assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
                assert_eq!(*font_size, 16.0);
                assert!((color.alpha() - 0.2).abs() < 1e-6);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn glyph_pick_covers_alphabet_edges() {
        assert_eq!(pick_glyph(GLYPHS, 0.0), GLYPHS[0]);
        assert_eq!(pick_glyph(GLYPHS, 0.999_999), GLYPHS[GLYPHS.len() - 1]);
        assert_eq!(pick_glyph(GLYPHS, 1.0), GLYPHS[GLYPHS.len() - 1]);
        assert_eq!(pick_glyph(&[], 0.5), "");
    }

    #[test]
    fn spawned_symbols_use_configured_ranges() {
        let mut rng = random::seeded(Some(5));
        for id in 0..300 {
            let s = spawn(id, Vec2::new(800.0, 600.0), &Profile::DESKTOP, &mut rng);
            assert!(GLYPHS.contains(&s.glyph));
            assert!(s.size >= 12.0 && s.size <= 26.0);
            assert!(s.opacity >= 0.1 && s.opacity <= 0.4 + 1e-6);
            assert!(s.speed_y.abs() <= 0.15 + 1e-6);
            assert!(s.rotation_speed.abs() <= 0.25 + 1e-6);
        }
    }
}
