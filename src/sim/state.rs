//! Simulation state
//!
//! One [`Simulation`] owns every entity in the sketch. The frame loop and the
//! input handlers mutate it through methods; nothing else holds state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ghost::GhostRay;
use super::particle::{Particle, Ray};
use super::scene::{MirrorSide, Scene};
use super::sight::SightBall;
use crate::Settings;

/// Notable things that happened during a frame or input callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Particle left the observer with this heading
    Launched { heading: f32 },
    /// Particle bounced off a mirror at `at`, now flying along `heading`
    Reflected {
        side: MirrorSide,
        at: Vec2,
        heading: f32,
    },
    /// Particle stopped at the back wall
    HitWall { at: Vec2 },
    /// Particle stopped inside the diamond's radius
    HitDiamond { at: Vec2 },
    /// Drag erased the previous rays and ghost rays
    Cleared,
}

/// Complete sketch state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub(crate) scene: Scene,
    pub(crate) sight: SightBall,
    pub(crate) particle: Particle,
    /// Finished flights, in order
    pub(crate) rays: Vec<Ray>,
    /// One per reflection, in order
    pub(crate) ghosts: Vec<GhostRay>,
    pub(crate) ghost_speed: f32,
    pub(crate) reflect_guard: f32,
    /// Frames ticked so far
    pub(crate) frame: u64,
    /// Pending events, drained by the host
    #[serde(skip)]
    pub(crate) events: Vec<SimEvent>,
}

impl Simulation {
    /// Sketch with the reference layout and tunables
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let scene = Scene::from_layout(&settings.layout);
        let sight = SightBall::new(
            scene.observer.pos,
            settings.sight_offset_y,
            settings.sight_size,
            settings.sight_max_offset,
            settings.sight_pulse_step,
        );
        // Parked on the sight ball until the first release
        let particle = Particle::new(sight.pos(), 90.0, settings.particle_speed);

        Self {
            scene,
            sight,
            particle,
            rays: Vec::new(),
            ghosts: Vec::new(),
            ghost_speed: settings.ghost_speed,
            reflect_guard: settings.reflect_guard,
            frame: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn sight(&self) -> &SightBall {
        &self.sight
    }

    #[inline]
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    #[inline]
    pub fn ghosts(&self) -> &[GhostRay] {
        &self.ghosts
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total length of the light path so far: finished rays plus the
    /// current flight
    pub fn path_length(&self) -> f32 {
        let finished: f32 = self.rays.iter().map(|r| r.p1.distance(r.p2)).sum();
        finished + self.particle.origin.distance(self.particle.pos)
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Flight;

    #[test]
    fn test_initial_state() {
        let sim = Simulation::new();
        assert_eq!(sim.particle().flight, Flight::Idle);
        assert_eq!(sim.particle().pos, sim.sight().pos());
        assert_eq!(sim.particle().heading, 90.0);
        assert!(sim.rays().is_empty());
        assert!(sim.ghosts().is_empty());
        assert!(!sim.scene().diamond.hit);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn test_settings_flow_into_entities() {
        let settings = Settings {
            particle_speed: 5.0,
            sight_max_offset: 40.0,
            ..Default::default()
        };
        let sim = Simulation::with_settings(&settings);
        assert_eq!(sim.particle().speed, 5.0);
        assert_eq!(sim.sight().range(), (410.0, 490.0));
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut sim = Simulation::new();
        sim.push_event(SimEvent::Cleared);
        assert_eq!(sim.drain_events(), vec![SimEvent::Cleared]);
        assert!(sim.drain_events().is_empty());
    }
}
