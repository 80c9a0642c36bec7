//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::draw::{Color, DrawCommand};

/// Segments used for filled circles
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Segments used for round line caps
const CAP_SEGMENTS: u32 = 8;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a stroked line with round caps
pub fn line(from: Vec2, to: Vec2, weight: f32, color: Color) -> Vec<Vertex> {
    let half = weight / 2.0;
    let mut vertices = Vec::with_capacity(6 + (CAP_SEGMENTS * 6) as usize);

    let dir = (to - from).normalize_or_zero();
    if dir != Vec2::ZERO {
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let a1 = from + perp;
        let b1 = from - perp;
        let a2 = to + perp;
        let b2 = to - perp;

        // Two triangles
        vertices.push(Vertex::new(a1.x, a1.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(a2.x, a2.y, color));

        vertices.push(Vertex::new(a2.x, a2.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(b2.x, b2.y, color));
    }

    // A zero-length line still shows up as a dot
    vertices.extend(circle(from, half, color, CAP_SEGMENTS));
    if to != from {
        vertices.extend(circle(to, half, color, CAP_SEGMENTS));
    }

    vertices
}

/// Turn a render list into triangles.
///
/// Returns the last clear color in the list (if any) and the vertices of
/// every other command, in order.
pub fn tessellate(commands: &[DrawCommand]) -> (Option<Color>, Vec<Vertex>) {
    let mut clear = None;
    let mut vertices = Vec::new();

    for cmd in commands {
        match *cmd {
            DrawCommand::Clear { color } => {
                clear = Some(color);
                // Anything before a clear is wiped
                vertices.clear();
            }
            DrawCommand::Line {
                from,
                to,
                color,
                weight,
            } => vertices.extend(line(from, to, weight, color)),
            DrawCommand::Circle {
                center,
                diameter,
                color,
            } => vertices.extend(circle(center, diameter / 2.0, color, CIRCLE_SEGMENTS)),
        }
    }

    (clear, vertices)
}
