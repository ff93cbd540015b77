//! Connector Scene - portfolio landing page backdrop
//!
//! Core modules:
//! - `palette`: Accent palette and the material recipe derived from it
//! - `sim`: Deterministic simulation (rigid bodies, contacts, scene state)
//! - `renderer`: WebGPU rendering pipeline
//! - `assets`: Connector model loading
//! - `config`: Runtime configuration with defaults

pub mod assets;
pub mod config;
pub mod easing;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use config::{CameraConfig, SceneConfig};
pub use palette::{AccentPalette, Color, MaterialKind, MaterialSpec};

/// Scene configuration constants
pub mod consts {
    /// Largest frame delta fed into the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Fixed physics timestep
    pub const PHYSICS_DT: f32 = 1.0 / 60.0;
    /// Maximum physics substeps per frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Restoring impulse per unit of displacement, applied every frame
    pub const CENTERING_STRENGTH: f32 = 0.2;

    /// Connector body
    pub const CONNECTOR_LINEAR_DAMPING: f32 = 4.0;
    pub const CONNECTOR_ANGULAR_DAMPING: f32 = 1.0;
    pub const CONNECTOR_FRICTION: f32 = 0.1;
    /// Half-extents of the three boxes forming the plus shape
    pub const CONNECTOR_HALF_EXTENTS: [[f32; 3]; 3] = [
        [0.38, 1.27, 0.38],
        [1.27, 0.38, 0.38],
        [0.38, 0.38, 1.27],
    ];

    /// Number of palette-driven connectors
    pub const GENERATED_CONNECTORS: usize = 9;
    /// Side of the cube random spawn positions are drawn from
    pub const SPAWN_SPREAD: f32 = 10.0;
    /// Fixed position of the glass connector
    pub const HERO_POSITION: [f32; 3] = [10.0, 10.0, 5.0];

    /// Pointer body
    pub const POINTER_RADIUS: f32 = 1.0;
    pub const POINTER_FRICTION: f32 = 0.5;

    /// Model
    pub const MODEL_SCALE: f32 = 10.0;
    pub const MODEL_METALNESS: f32 = 0.2;
    /// Smoothing time for the displayed colour (seconds)
    pub const COLOR_SMOOTH_TIME: f32 = 0.2;

    /// Point light carried by accent connectors
    pub const ACCENT_LIGHT_INTENSITY: f32 = 4.0;
    pub const ACCENT_LIGHT_DISTANCE: f32 = 2.5;
}

/// Clamp a raw frame delta to the largest step the simulation accepts
#[inline]
pub fn clamp_frame_delta(dt: f32) -> f32 {
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}
