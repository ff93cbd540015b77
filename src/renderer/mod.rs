//! WebGPU rendering module
//!
//! Draws the connector mesh instanced per body with forward PBR-style shading.

pub mod pipeline;
pub mod vertex;

pub use pipeline::{MAX_POINT_LIGHTS, SceneRenderState};
pub use vertex::{InstanceRaw, MeshVertex};
