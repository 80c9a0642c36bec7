//! The draggable sight ball that aims the ray

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::angle_between;
use crate::consts::SIGHT_PULSE_WRAP;

/// Interaction state of the sight ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SightState {
    /// Not held, nothing moved since the last release
    #[default]
    Resting,
    /// Held and moved at least once since the last release
    Dragging,
}

/// User-controlled aim point above the observer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SightBall {
    pos: Vec2,
    /// Observer position; the ball aims from here
    anchor: Vec2,
    /// Heading from the observer through the ball (degrees)
    heading: f32,
    pub size: f32,
    /// Lateral travel allowed either side of the observer
    pub max_offset: f32,
    state: SightState,
    /// Pulse ring growth, wraps in [0, 10)
    pulse: f32,
    pulse_step: f32,
}

impl SightBall {
    pub fn new(observer: Vec2, offset_y: f32, size: f32, max_offset: f32, pulse_step: f32) -> Self {
        let pos = Vec2::new(observer.x, observer.y - offset_y);
        Self {
            pos,
            anchor: observer,
            heading: angle_between(observer, pos),
            size,
            max_offset,
            state: SightState::Resting,
            pulse: 0.0,
            pulse_step,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn state(&self) -> SightState {
        self.state
    }

    #[inline]
    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    /// Ball is currently held by the pointer
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.state == SightState::Dragging
    }

    /// Ball moved since the pointer was last released
    #[inline]
    pub fn moved_since_release(&self) -> bool {
        self.state == SightState::Dragging
    }

    /// Allowed x range (inclusive)
    pub fn range(&self) -> (f32, f32) {
        (self.anchor.x - self.max_offset, self.anchor.x + self.max_offset)
    }

    /// Pointer x is strictly inside the drag window
    pub fn accepts(&self, x: f32) -> bool {
        let (lo, hi) = self.range();
        x > lo && x < hi
    }

    /// Move the ball horizontally, clamped to the allowed range
    pub fn set_position(&mut self, x: f32) {
        let (lo, hi) = self.range();
        self.pos.x = x.clamp(lo, hi);
        self.heading = angle_between(self.anchor, self.pos);
    }

    /// Pointer moved the ball
    pub fn begin_drag(&mut self) {
        self.state = SightState::Dragging;
    }

    /// Pointer released. Returns whether the ball moved since the last release.
    pub fn end_drag(&mut self) -> bool {
        let moved = self.moved_since_release();
        self.state = SightState::Resting;
        moved
    }

    /// Advance the pulse ring. Cosmetic only.
    pub fn tick_animation(&mut self) {
        self.pulse = (self.pulse + self.pulse_step) % SIGHT_PULSE_WRAP;
    }
}
