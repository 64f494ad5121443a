use bevy::prelude::*;

/// Immediate-mode 2D drawing surface the engine renders into.
///
/// Coordinates are canvas-local pixels: origin at the top-left corner, +y down.
pub trait Canvas {
    fn clear(&mut self, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Centered text rotated by `angle` radians (clockwise on screen).
    fn fill_text(&mut self, glyph: &'static str, at: Vec2, angle: f32, font_size: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        glyph: &'static str,
        at: Vec2,
        angle: f32,
        font_size: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// Records one frame of draw calls for the host to present.
///
/// `clear` drops everything recorded so far, same as clearing a real canvas.
#[derive(Resource, Default, Debug, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Surface size from the last `clear`, if any.
    pub fn surface(&self) -> Option<Vec2> {
        match self.commands.first() {
            Some(DrawCommand::Clear { size }) => Some(*size),
            _ => None,
        }
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self, size: Vec2) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, glyph: &'static str, at: Vec2, angle: f32, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            glyph,
            at,
            angle,
            font_size,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

/// Canvas (top-left origin, +y down) to Bevy 2D world (center origin, +y up).
#[inline]
pub fn canvas_to_world(p: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(p.x - 0.5 * size.x, 0.5 * size.y - p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_recorded_frame() {
        let mut list = DisplayList::default();
        list.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        list.clear(Vec2::new(800.0, 600.0));
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.surface(), Some(Vec2::new(800.0, 600.0)));
    }

    #[test]
    fn filters_split_by_kind() {
        let mut list = DisplayList::default();
        list.clear(Vec2::new(10.0, 10.0));
        list.fill_text("{}", Vec2::ONE, 0.0, 12.0, Color::WHITE);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, Color::WHITE);
        list.stroke_line(Vec2::ONE, Vec2::ZERO, 1.0, Color::WHITE);
        list.fill_circle(Vec2::ONE, 2.0, Color::WHITE);
        assert_eq!(list.texts().count(), 1);
        assert_eq!(list.lines().count(), 2);
        assert_eq!(list.circles().count(), 1);
    }

    #[test]
    fn canvas_corners_map_to_world_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(canvas_to_world(Vec2::ZERO, size), Vec2::new(-400.0, 300.0));
        assert_eq!(canvas_to_world(size, size), Vec2::new(400.0, -300.0));
        assert_eq!(canvas_to_world(0.5 * size, size), Vec2::ZERO);
    }
}
