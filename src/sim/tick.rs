//! Per-frame simulation tick
//!
//! Each frame: pulse the sight ball, step the particle and every ghost ray,
//! then resolve at most one contact. Contacts are checked in a fixed
//! priority order (diamond, mirrors, wall) and only the first one found is
//! applied, so a stopped particle can never also bounce in the same frame.

use serde::{Deserialize, Serialize};

use super::ghost::GhostRay;
use super::scene::MirrorSide;
use super::state::{SimEvent, Simulation};

/// What the particle touched this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Inside the diamond's hit radius
    Diamond,
    /// Crossed a mirror far enough from its flight origin
    Mirror(MirrorSide),
    /// Crossed the back wall
    Wall,
}

/// Advance the sketch by one frame.
///
/// Returns the contact resolved this frame, if any.
pub fn tick(sim: &mut Simulation) -> Option<Contact> {
    sim.frame += 1;
    sim.sight.tick_animation();

    // Ghost rays share the particle's motion gate
    if !sim.particle.is_moving() {
        return None;
    }

    sim.particle.advance();
    for ghost in &mut sim.ghosts {
        ghost.advance();
    }

    let contact = detect_contact(sim)?;
    resolve(sim, contact);
    Some(contact)
}

/// First applicable contact for the particle's latest step, by priority
pub fn detect_contact(sim: &Simulation) -> Option<Contact> {
    let particle = &sim.particle;
    let scene = &sim.scene;

    if scene.diamond.contains(particle.pos) {
        return Some(Contact::Diamond);
    }

    // Right after a bounce the step can still straddle the mirror just left
    if particle.distance_from_origin_x() > sim.reflect_guard {
        for side in [MirrorSide::Left, MirrorSide::Right] {
            if scene.mirror(side).crossed_by(particle.prev, particle.pos) {
                return Some(Contact::Mirror(side));
            }
        }
    }

    if scene.wall.crossed_by(particle.prev, particle.pos) {
        return Some(Contact::Wall);
    }

    None
}

fn resolve(sim: &mut Simulation, contact: Contact) {
    match contact {
        Contact::Diamond => {
            sim.particle.stop();
            sim.scene.diamond.hit = true;
            for ghost in &mut sim.ghosts {
                ghost.hit = true;
            }
            let at = sim.particle.pos;
            log::debug!("Diamond hit at ({:.1}, {:.1})", at.x, at.y);
            sim.push_event(SimEvent::HitDiamond { at });
        }
        Contact::Mirror(side) => {
            let at = sim.particle.pos;
            let (ray, incoming) = sim.particle.reflect();
            sim.rays.push(ray);
            sim.ghosts.push(GhostRay::new(at, incoming, sim.ghost_speed));
            let heading = sim.particle.heading;
            log::debug!(
                "Reflected off {:?} mirror at ({:.1}, {:.1}): {:.1}° -> {:.1}°",
                side,
                at.x,
                at.y,
                incoming,
                heading
            );
            sim.push_event(SimEvent::Reflected { side, at, heading });
        }
        Contact::Wall => {
            sim.particle.stop();
            let at = sim.particle.pos;
            log::debug!("Wall hit at ({:.1}, {:.1})", at.x, at.y);
            sim.push_event(SimEvent::HitWall { at });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::{Flight, SceneLayout, angle_between, reflect_heading};
    use glam::Vec2;

    /// Generous frame cap; the longest reference flight is a few hundred frames
    const MAX_FRAMES: usize = 2000;

    /// Drag the sight ball to `x` and release
    fn aim(sim: &mut Simulation, x: f32) {
        sim.drag_move(x);
        sim.drag_end();
    }

    /// Tick until the particle stops, returning every contact seen
    fn run_until_idle(sim: &mut Simulation) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for _ in 0..MAX_FRAMES {
            if let Some(c) = tick(sim) {
                contacts.push(c);
            }
            if !sim.particle().is_moving() {
                break;
            }
        }
        contacts
    }

    #[test]
    fn test_idle_particle_does_not_move() {
        let mut sim = Simulation::new();
        let before = sim.particle().pos;
        for _ in 0..10 {
            assert_eq!(tick(&mut sim), None);
        }
        assert_eq!(sim.particle().pos, before);
        assert_eq!(sim.frame(), 10);
        // Pulse keeps going regardless
        assert!(sim.sight().pulse() > 0.0);
    }

    #[test]
    fn test_straight_up_never_reflects() {
        let mut sim = Simulation::new();
        aim(&mut sim, 450.0);
        assert_eq!(sim.particle().heading, -90.0);

        let contacts = run_until_idle(&mut sim);
        assert_eq!(sim.particle().flight, Flight::Idle);
        assert!(sim.rays().is_empty());
        assert!(sim.ghosts().is_empty());
        assert!(!contacts.iter().any(|c| matches!(c, Contact::Mirror(_))));
        // Diamond sits on the straight path in the reference layout
        assert_eq!(contacts, vec![Contact::Diamond]);
    }

    #[test]
    fn test_straight_up_reaches_wall_without_diamond() {
        let settings = Settings {
            layout: SceneLayout {
                diamond: Vec2::new(900.0, 500.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut sim = Simulation::with_settings(&settings);
        aim(&mut sim, 450.0);

        let contacts = run_until_idle(&mut sim);
        assert_eq!(contacts, vec![Contact::Wall]);
        assert!(sim.rays().is_empty());
        let p = sim.particle();
        assert!((p.pos.x - 450.0).abs() < 1e-3);
        assert!(p.pos.y <= 100.0 + 1e-3);
        assert!(matches!(
            sim.drain_events().last(),
            Some(SimEvent::HitWall { .. })
        ));
    }

    #[test]
    fn test_first_reflection_off_left_mirror() {
        let mut sim = Simulation::new();
        aim(&mut sim, 400.0);
        let origin = sim.scene().observer.pos;
        let heading = sim.particle().heading;
        assert_eq!(heading, angle_between(origin, Vec2::new(400.0, 305.0)));

        let mut contact = None;
        for _ in 0..MAX_FRAMES {
            contact = tick(&mut sim);
            if contact.is_some() {
                break;
            }
        }

        assert_eq!(contact, Some(Contact::Mirror(MirrorSide::Left)));
        assert_eq!(sim.rays().len(), 1);
        assert_eq!(sim.ghosts().len(), 1);

        let ray = sim.rays()[0];
        let p = sim.particle();
        assert_eq!(ray.p1, origin);
        assert_eq!(ray.p2, p.pos);
        assert!((ray.p2.x - 350.0).abs() <= p.speed);
        assert!(ray.p2.y > 100.0 && ray.p2.y < 300.0);

        assert_eq!(p.heading, reflect_heading(heading));
        assert_eq!(p.origin, ray.p2);
        assert!(p.is_moving());

        // Ghost keeps the incoming heading from the mirror point
        let ghost = &sim.ghosts()[0];
        assert_eq!(ghost.anchor, ray.p2);
        assert_eq!(ghost.tip, ray.p2);
        assert_eq!(ghost.heading, heading);
    }

    #[test]
    fn test_no_double_bounce_on_same_mirror() {
        let mut sim = Simulation::new();
        aim(&mut sim, 400.0);
        let mut left_hits = 0;
        // Long enough to leave the left mirror, not long enough to reach the right
        for _ in 0..MAX_FRAMES {
            if let Some(Contact::Mirror(side)) = tick(&mut sim) {
                if side == MirrorSide::Left {
                    left_hits += 1;
                } else {
                    break;
                }
            }
        }
        assert_eq!(left_hits, 1);
    }

    #[test]
    fn test_bounces_then_wall() {
        let mut sim = Simulation::new();
        aim(&mut sim, 400.0);
        let contacts = run_until_idle(&mut sim);

        assert_eq!(
            contacts,
            vec![
                Contact::Mirror(MirrorSide::Left),
                Contact::Mirror(MirrorSide::Right),
                Contact::Mirror(MirrorSide::Left),
                Contact::Wall,
            ]
        );
        assert_eq!(sim.rays().len(), 3);
        assert_eq!(sim.ghosts().len(), 3);
        // Rays chain end to start
        for pair in sim.rays().windows(2) {
            assert_eq!(pair[0].p2, pair[1].p1);
        }
        assert!(!sim.scene().diamond.hit);
    }

    #[test]
    fn test_ghost_length_tracks_path_after_reflection() {
        let mut sim = Simulation::new();
        aim(&mut sim, 400.0);
        while tick(&mut sim).is_none() {}
        for _ in 0..20 {
            tick(&mut sim);
        }
        let ghost = &sim.ghosts()[0];
        let p = sim.particle();
        let since_bounce = p.origin.distance(p.pos);
        assert!((ghost.length() - since_bounce).abs() < 1e-2);
    }

    #[test]
    fn test_diamond_hit_marks_ghosts() {
        // One bounce off the left mirror lines the reflected path up with
        // the diamond: d = 4000 / 175 to the left of the observer
        let mut sim = Simulation::new();
        aim(&mut sim, 450.0 - 4000.0 / 175.0);

        let contacts = run_until_idle(&mut sim);
        assert_eq!(
            contacts,
            vec![Contact::Mirror(MirrorSide::Left), Contact::Diamond]
        );
        assert!(sim.scene().diamond.hit);
        assert!(!sim.particle().is_moving());
        assert_eq!(sim.ghosts().len(), 1);
        assert!(sim.ghosts().iter().all(|g| g.hit));

        // Everything freezes once the particle stops
        let tips: Vec<Vec2> = sim.ghosts().iter().map(|g| g.tip).collect();
        let pos = sim.particle().pos;
        for _ in 0..10 {
            assert_eq!(tick(&mut sim), None);
        }
        assert_eq!(sim.particle().pos, pos);
        assert_eq!(
            sim.ghosts().iter().map(|g| g.tip).collect::<Vec<_>>(),
            tips
        );
    }

    #[test]
    fn test_diamond_wins_over_mirror_in_same_frame() {
        // Small diamond parked just behind the left mirror: the step that
        // crosses the mirror (frame 36 when aiming at x = 400) also lands
        // inside the diamond
        let settings = Settings {
            layout: SceneLayout {
                diamond: Vec2::new(349.0, 284.6),
                diamond_radius: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut sim = Simulation::with_settings(&settings);
        aim(&mut sim, 400.0);
        let contacts = run_until_idle(&mut sim);

        let p = sim.particle();
        assert!(p.prev.x > 350.0 && p.pos.x < 350.0);
        assert_eq!(contacts, vec![Contact::Diamond]);
        assert!(sim.rays().is_empty());
        assert!(sim.ghosts().is_empty());
    }

    #[test]
    fn test_path_length_adds_up() {
        let mut sim = Simulation::new();
        aim(&mut sim, 400.0);
        let mut frames = 0;
        for _ in 0..MAX_FRAMES {
            tick(&mut sim);
            if !sim.particle().is_moving() {
                break;
            }
            frames += 1;
        }
        // Every moving frame covers `speed` units, bounces don't add or lose any
        let expected = (frames + 1) as f32 * sim.particle().speed;
        assert!((sim.path_length() - expected).abs() < 0.5);
    }
}
