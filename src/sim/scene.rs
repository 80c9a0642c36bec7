//! Static scene geometry: two mirrors, the back wall, the diamond and the
//! observer. Built once from a [`SceneLayout`] and never moved.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::segments_intersect;
use crate::consts::*;

/// An immutable line segment (mirror or wall)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Segment {
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Does a motion step from `from` to `to` cross this segment?
    #[inline]
    pub fn crossed_by(&self, from: Vec2, to: Vec2) -> bool {
        segments_intersect(to, from, self.p1, self.p2)
    }
}

/// Which of the two mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorSide {
    Left,
    Right,
}

/// The target the sight ray may strike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diamond {
    pub pos: Vec2,
    pub radius: f32,
    /// Set when the particle enters the hit radius, cleared on pointer release
    pub hit: bool,
}

impl Diamond {
    /// Strictly inside the hit radius
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.distance(self.pos) < self.radius
    }
}

/// Fixed origin of sight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub pos: Vec2,
}

/// Placement of the scene on the canvas.
///
/// Mirrors are always vertical and symmetric about the observer's x; the
/// wall joins their tops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub observer: Vec2,
    pub diamond: Vec2,
    pub diamond_radius: f32,
    /// Horizontal distance from the observer to each mirror
    pub mirror_half_gap: f32,
    /// Top of both mirrors, where the wall runs
    pub mirror_top: f32,
    pub mirror_bottom: f32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            observer: Vec2::new(OBSERVER_X, OBSERVER_Y),
            diamond: Vec2::new(DIAMOND_X, DIAMOND_Y),
            diamond_radius: DIAMOND_RADIUS,
            mirror_half_gap: (RIGHT_MIRROR_X - LEFT_MIRROR_X) / 2.0,
            mirror_top: MIRROR_TOP_Y,
            mirror_bottom: MIRROR_BOTTOM_Y,
        }
    }
}

/// All static scene entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub left_mirror: Segment,
    pub right_mirror: Segment,
    pub wall: Segment,
    pub diamond: Diamond,
    pub observer: Observer,
}

impl Scene {
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let left_x = layout.observer.x - layout.mirror_half_gap;
        let right_x = layout.observer.x + layout.mirror_half_gap;
        let top = layout.mirror_top;
        let bottom = layout.mirror_bottom;

        Self {
            left_mirror: Segment::new(Vec2::new(left_x, top), Vec2::new(left_x, bottom)),
            right_mirror: Segment::new(Vec2::new(right_x, top), Vec2::new(right_x, bottom)),
            wall: Segment::new(Vec2::new(left_x, top), Vec2::new(right_x, top)),
            diamond: Diamond {
                pos: layout.diamond,
                radius: layout.diamond_radius,
                hit: false,
            },
            observer: Observer {
                pos: layout.observer,
            },
        }
    }

    pub fn mirror(&self, side: MirrorSide) -> &Segment {
        match side {
            MirrorSide::Left => &self.left_mirror,
            MirrorSide::Right => &self.right_mirror,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_layout(&SceneLayout::default())
    }
}
