//! Deterministic simulation module
//!
//! All sketch logic lives here. This module must be pure and deterministic:
//! - One step per frame, fixed speeds
//! - Input is applied between frames only
//! - No rendering or platform dependencies

pub mod geometry;
pub mod ghost;
pub mod input;
pub mod particle;
pub mod scene;
pub mod sight;
pub mod state;
pub mod tick;

pub use geometry::{angle_between, heading_vector, reflect_heading, segments_intersect};
pub use ghost::GhostRay;
pub use input::{PointerEvent, apply_input};
pub use particle::{Flight, Particle, Ray};
pub use scene::{Diamond, MirrorSide, Observer, Scene, SceneLayout, Segment};
pub use sight::{SightBall, SightState};
pub use state::{SimEvent, Simulation};
pub use tick::{Contact, detect_contact, tick};
