//! Ghost rays: the apparent continuation of the sight ray behind a mirror

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::heading_vector;

/// A ray that keeps going straight from a reflection point.
///
/// The anchor stays on the mirror; the tip recedes along the heading the
/// particle had when it struck the mirror. Its length therefore tracks the
/// distance the real ray has travelled since that reflection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostRay {
    pub tip: Vec2,
    pub anchor: Vec2,
    /// Degrees, frozen at creation
    pub heading: f32,
    pub speed: f32,
    /// The real ray reached the diamond
    pub hit: bool,
}

impl GhostRay {
    pub fn new(anchor: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            tip: anchor,
            anchor,
            heading,
            speed,
            hit: false,
        }
    }

    pub fn advance(&mut self) {
        self.tip += heading_vector(self.heading) * self.speed;
    }

    /// Current anchor-to-tip length
    #[inline]
    pub fn length(&self) -> f32 {
        self.tip.distance(self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_moves_anchor_stays() {
        let mut g = GhostRay::new(Vec2::new(350.0, 250.0), 180.0, 3.0);
        for _ in 0..10 {
            g.advance();
        }
        assert_eq!(g.anchor, Vec2::new(350.0, 250.0));
        assert!((g.tip.x - 320.0).abs() < 1e-3);
        assert!((g.tip.y - 250.0).abs() < 1e-3);
        assert!((g.length() - 30.0).abs() < 1e-3);
        assert!(!g.hit);
    }
}
