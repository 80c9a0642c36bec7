//! Render list for a frame
//!
//! The simulation never draws. Each frame the host asks for a list of
//! [`DrawCommand`]s, already in back-to-front order, and paints them with
//! whatever it has (WebGPU here, a 2D canvas elsewhere).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::consts::OBSERVER_DIAMETER;
use crate::sim::Simulation;

/// Linear RGBA, 0-1
pub type Color = [f32; 4];

/// Convert 0-255 RGB to a [`Color`]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// One drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: Color },
    /// Stroked line; `weight` is the stroke width
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        weight: f32,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        diameter: f32,
        color: Color,
    },
}

/// Colors for sketch elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub trail: Color,
    pub ray: Color,
    pub ghost_ray: Color,
    pub ghost_hit: Color,
    pub mirror: Color,
    pub wall: Color,
    pub diamond: Color,
    pub observer: Color,
    pub sight_pulse: Color,
    pub sight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(235, 235, 235),
            trail: rgb(255, 0, 0),
            ray: rgb(255, 0, 0),
            ghost_ray: rgb(255, 180, 180),
            ghost_hit: rgb(255, 150, 150),
            mirror: rgb(0, 200, 255),
            wall: rgb(0, 0, 0),
            diamond: rgb(255, 0, 0),
            observer: rgb(0, 0, 255),
            sight_pulse: rgb(0, 200, 255),
            sight: rgb(0, 150, 255),
        }
    }
}

/// Stroke widths
pub const MIRROR_WEIGHT: f32 = 4.0;
pub const RAY_WEIGHT: f32 = 2.0;
/// Marker drawn at a ghost ray's tip once the diamond is hit
pub const GHOST_HIT_DIAMETER: f32 = 20.0;

/// Palette plus which optional layers to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub palette: Palette,
    pub show_trail: bool,
    pub show_ghost_rays: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            show_trail: true,
            show_ghost_rays: true,
        }
    }
}

impl From<&Settings> for DrawStyle {
    fn from(settings: &Settings) -> Self {
        Self {
            palette: Palette::default(),
            show_trail: settings.show_trail,
            show_ghost_rays: settings.show_ghost_rays,
        }
    }
}

/// Build the frame's render list, back to front: live trail, rays, ghost
/// rays, then the solid scene pieces with the sight ball on top.
pub fn draw_list(sim: &Simulation, style: &DrawStyle) -> Vec<DrawCommand> {
    let pal = &style.palette;
    let mut cmds = Vec::with_capacity(16 + sim.rays().len() + sim.ghosts().len() * 2);

    cmds.push(DrawCommand::Clear {
        color: pal.background,
    });

    // Hidden while aiming so the old flight doesn't linger
    if style.show_trail && !sim.sight().is_selected() {
        let p = sim.particle();
        cmds.push(line(p.origin, p.pos, pal.trail, RAY_WEIGHT));
    }

    for ray in sim.rays() {
        cmds.push(line(ray.p1, ray.p2, pal.ray, RAY_WEIGHT));
    }

    if style.show_ghost_rays {
        for ghost in sim.ghosts() {
            cmds.push(line(ghost.tip, ghost.anchor, pal.ghost_ray, RAY_WEIGHT));
            if ghost.hit {
                cmds.push(circle(ghost.tip, GHOST_HIT_DIAMETER, pal.ghost_hit));
            }
        }
    }

    let scene = sim.scene();
    cmds.push(segment(&scene.left_mirror, pal.mirror));
    cmds.push(segment(&scene.right_mirror, pal.mirror));
    cmds.push(circle(
        scene.diamond.pos,
        scene.diamond.radius * 2.0,
        pal.diamond,
    ));
    cmds.push(circle(scene.observer.pos, OBSERVER_DIAMETER, pal.observer));
    cmds.push(segment(&scene.wall, pal.wall));

    let sight = sim.sight();
    cmds.push(circle(sight.pos(), sight.size + sight.pulse(), pal.sight_pulse));
    cmds.push(circle(sight.pos(), sight.size, pal.sight));

    cmds
}

#[inline]
fn line(from: Vec2, to: Vec2, color: Color, weight: f32) -> DrawCommand {
    DrawCommand::Line {
        from,
        to,
        color,
        weight,
    }
}

#[inline]
fn segment(seg: &crate::sim::Segment, color: Color) -> DrawCommand {
    line(seg.p1, seg.p2, color, MIRROR_WEIGHT)
}

#[inline]
fn circle(center: Vec2, diameter: f32, color: Color) -> DrawCommand {
    DrawCommand::Circle {
        center,
        diameter,
        color,
    }
}
