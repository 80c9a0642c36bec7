//! Mirror Sketch - light bouncing between two mirrors
//!
//! A sight ray leaves the observer, reflects off the left and right mirrors
//! and either strikes the back wall or the diamond. Each reflection spawns a
//! ghost ray that keeps going straight, showing that the mirror image sits at
//! a distance equal to the total path travelled by the light.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, frame tick, input)
//! - `draw`: Tagged render list consumed by whatever host draws the frame
//! - `renderer`: WebGPU rendering of the render list
//! - `settings`: Tunables and layout, persisted as JSON

pub mod draw;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use draw::{DrawCommand, DrawStyle, Palette, draw_list};
pub use settings::Settings;

/// Sketch configuration constants
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Mirrors are vertical, symmetric about the observer
    pub const LEFT_MIRROR_X: f32 = 350.0;
    pub const RIGHT_MIRROR_X: f32 = 550.0;
    pub const MIRROR_TOP_Y: f32 = 100.0;
    pub const MIRROR_BOTTOM_Y: f32 = 300.0;

    pub const DIAMOND_X: f32 = 450.0;
    pub const DIAMOND_Y: f32 = 150.0;
    /// Hit radius of the diamond
    pub const DIAMOND_RADIUS: f32 = 10.0;

    pub const OBSERVER_X: f32 = 450.0;
    pub const OBSERVER_Y: f32 = 325.0;
    pub const OBSERVER_DIAMETER: f32 = 20.0;

    /// Sight ball sits this far above the observer
    pub const SIGHT_OFFSET_Y: f32 = 20.0;
    pub const SIGHT_SIZE: f32 = 10.0;
    /// Max lateral travel of the sight ball either side of the observer
    pub const SIGHT_MAX_OFFSET: f32 = 75.0;
    /// Pulse growth per frame, wraps at SIGHT_PULSE_WRAP
    pub const SIGHT_PULSE_STEP: f32 = 0.15;
    pub const SIGHT_PULSE_WRAP: f32 = 10.0;

    /// Units moved per frame by the particle and ghost rays
    pub const RAY_SPEED: f32 = 3.0;
    /// Particle must be this far (in x) from its flight origin before a mirror
    /// crossing counts, so it can't re-trigger on the mirror it just left
    pub const REFLECT_GUARD: f32 = 10.0;
}
