//! The particle that traces the sight ray, and the trail it leaves

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{heading_vector, reflect_heading};

/// Particle motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flight {
    /// Stopped at the wall, the diamond, or never launched
    #[default]
    Idle,
    /// Stepping along its heading once per frame
    Moving,
}

/// A finished straight stretch of the sight ray, origin to reflection point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub p1: Vec2,
    pub p2: Vec2,
}

/// Moving point tracing the light path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Position before the last step; `prev -> pos` is the step tested for crossings
    pub prev: Vec2,
    /// Start of the current straight flight (observer or last mirror hit)
    pub origin: Vec2,
    /// Degrees
    pub heading: f32,
    pub speed: f32,
    pub flight: Flight,
}

impl Particle {
    /// An idle particle at `pos`
    pub fn new(pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            pos,
            prev: pos,
            origin: pos,
            heading,
            speed,
            flight: Flight::Idle,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.flight == Flight::Moving
    }

    /// Put the particle back at `pos` with a fresh flight origin
    pub fn reset(&mut self, pos: Vec2, heading: f32, origin: Vec2) {
        self.pos = pos;
        self.prev = pos;
        self.heading = heading;
        self.origin = origin;
    }

    /// Reset at `from` and start moving
    pub fn launch(&mut self, from: Vec2, heading: f32) {
        self.reset(from, heading, from);
        self.flight = Flight::Moving;
    }

    pub fn stop(&mut self) {
        self.flight = Flight::Idle;
    }

    /// Take one step along the heading
    pub fn advance(&mut self) {
        self.prev = self.pos;
        self.pos += heading_vector(self.heading) * self.speed;
    }

    /// Horizontal distance covered since the flight origin
    #[inline]
    pub fn distance_from_origin_x(&self) -> f32 {
        (self.pos.x - self.origin.x).abs()
    }

    /// Bounce off a vertical mirror at the current position.
    ///
    /// Returns the finished flight as a [`Ray`] and the heading the particle
    /// had before the bounce.
    pub fn reflect(&mut self) -> (Ray, f32) {
        let ray = Ray {
            p1: self.origin,
            p2: self.pos,
        };
        let incoming = self.heading;
        self.origin = self.pos;
        self.heading = reflect_heading(incoming);
        (ray, incoming)
    }
}
