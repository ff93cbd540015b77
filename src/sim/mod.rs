//! Deterministic simulation module
//!
//! Everything that moves lives here, stepped by Rapier. This module must stay pure:
//! - Fixed physics timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body handle)
//! - No rendering or platform dependencies

pub mod connector;
pub mod model;
pub mod pointer;
pub mod state;
pub mod tick;
pub mod world;

pub use connector::{Connector, centering_impulse, connector_body, connector_colliders};
pub use model::Model;
pub use pointer::{Pointer, pointer_body, pointer_collider, pointer_target};
pub use state::SceneState;
pub use tick::{TickInput, tick};
pub use world::PhysicsWorld;
