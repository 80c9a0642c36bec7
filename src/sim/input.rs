//! Pointer input, delivered by the host between frames

use super::geometry::angle_between;
use super::state::{SimEvent, Simulation};

/// Pointer events the sketch understands.
/// Coordinates are in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved while a drag gesture is active
    DragMove { x: f32 },
    /// Drag gesture ended
    DragEnd,
}

/// Route a pointer event to the matching handler
pub fn apply_input(sim: &mut Simulation, event: PointerEvent) {
    match event {
        PointerEvent::DragMove { x } => {
            sim.drag_move(x);
        }
        PointerEvent::DragEnd => {
            sim.drag_end();
        }
    }
}

impl Simulation {
    /// Move the sight ball while dragging.
    ///
    /// Pointer positions outside the drag window are ignored and the ball
    /// keeps its place. An accepted move erases all rays and ghost rays.
    /// Returns whether the move was accepted.
    pub fn drag_move(&mut self, x: f32) -> bool {
        if !self.sight.accepts(x) {
            return false;
        }

        self.sight.set_position(x);
        self.sight.begin_drag();

        if !self.rays.is_empty() || !self.ghosts.is_empty() {
            self.rays.clear();
            self.ghosts.clear();
            self.push_event(SimEvent::Cleared);
        }
        true
    }

    /// Release the sight ball.
    ///
    /// Always clears the diamond's hit flag. If the ball moved since the
    /// last release, the particle restarts from the observer toward the
    /// ball. Returns whether the particle was launched.
    pub fn drag_end(&mut self) -> bool {
        self.scene.diamond.hit = false;

        if !self.sight.end_drag() {
            return false;
        }

        let observer = self.scene.observer.pos;
        let heading = angle_between(observer, self.sight.pos());
        self.particle.launch(observer, heading);
        log::info!("Launched at {:.1}°", heading);
        self.push_event(SimEvent::Launched { heading });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Flight, tick};
    use proptest::prelude::*;

    #[test]
    fn test_out_of_window_drag_is_ignored() {
        let mut sim = Simulation::new();
        let before = sim.sight().pos();
        assert!(!sim.drag_move(375.0));
        assert!(!sim.drag_move(900.0));
        assert_eq!(sim.sight().pos(), before);
        assert!(!sim.sight().is_selected());
    }

    #[test]
    fn test_drag_clears_rays_and_ghosts() {
        let mut sim = Simulation::new();
        sim.drag_move(400.0);
        sim.drag_end();
        while sim.rays().is_empty() {
            tick(&mut sim);
        }
        assert_eq!(sim.ghosts().len(), 1);
        sim.drain_events();

        assert!(sim.drag_move(420.0));
        assert!(sim.rays().is_empty());
        assert!(sim.ghosts().is_empty());
        assert!(sim.sight().is_selected());
        assert_eq!(sim.drain_events(), vec![SimEvent::Cleared]);
    }

    #[test]
    fn test_release_launches_from_observer() {
        let mut sim = Simulation::new();
        sim.drag_move(480.0);
        assert!(sim.drag_end());

        let observer = sim.scene().observer.pos;
        let p = sim.particle();
        assert_eq!(p.flight, Flight::Moving);
        assert_eq!(p.pos, observer);
        assert_eq!(p.origin, observer);
        assert_eq!(p.heading, angle_between(observer, sim.sight().pos()));
        assert!(!sim.sight().is_selected());
    }

    #[test]
    fn test_release_without_drag_only_clears_diamond_flag() {
        let mut sim = Simulation::new();
        sim.drag_move(450.0);
        sim.drag_end();
        while sim.particle().is_moving() {
            tick(&mut sim);
        }
        assert!(sim.scene().diamond.hit);
        let particle = sim.particle().clone();
        sim.drain_events();

        assert!(!sim.drag_end());
        assert!(!sim.scene().diamond.hit);
        assert_eq!(sim.particle().pos, particle.pos);
        assert_eq!(sim.particle().heading, particle.heading);
        assert_eq!(sim.particle().flight, Flight::Idle);
        assert!(sim.drain_events().is_empty());

        // Flag stays cleared: an idle particle is not re-tested
        tick(&mut sim);
        assert!(!sim.scene().diamond.hit);
    }

    #[test]
    fn test_apply_input_routes_events() {
        let mut sim = Simulation::new();
        apply_input(&mut sim, PointerEvent::DragMove { x: 430.0 });
        assert_eq!(sim.sight().pos().x, 430.0);
        apply_input(&mut sim, PointerEvent::DragEnd);
        assert!(sim.particle().is_moving());
    }

    #[test]
    fn test_drag_during_flight_keeps_particle_moving() {
        let mut sim = Simulation::new();
        sim.drag_move(400.0);
        sim.drag_end();
        for _ in 0..5 {
            tick(&mut sim);
        }
        sim.drag_move(410.0);
        tick(&mut sim);
        assert!(sim.particle().is_moving());
        assert!(sim.sight().is_selected());
    }

    proptest! {
        #[test]
        fn prop_drag_sequence_keeps_sight_in_range(
            xs in prop::collection::vec(-1000.0f32..2000.0, 1..100)
        ) {
            let mut sim = Simulation::new();
            let observer_x = sim.scene().observer.pos.x;
            let max = sim.sight().max_offset;
            for (i, x) in xs.into_iter().enumerate() {
                sim.drag_move(x);
                if i % 7 == 0 {
                    sim.drag_end();
                }
                tick(&mut sim);
                let sx = sim.sight().pos().x;
                prop_assert!(sx >= observer_x - max && sx <= observer_x + max);
            }
        }
    }
}
