//! Pointer: kinematic ball that follows the cursor across the viewport plane

use glam::{Vec2, Vec3};
use rapier3d::prelude::{Collider, ColliderBuilder, RigidBody, RigidBodyBuilder, RigidBodyHandle};

use super::world::PhysicsWorld;
use crate::consts::{POINTER_FRICTION, POINTER_RADIUS};
use crate::scene::Viewport;

/// World position under a cursor given in NDC, on the z = 0 plane
#[inline]
pub fn pointer_target(ndc: Vec2, viewport: Viewport) -> Vec3 {
    Vec3::new(ndc.x * viewport.width / 2.0, ndc.y * viewport.height / 2.0, 0.0)
}

/// Position-based kinematic body at the origin
pub fn pointer_body() -> RigidBody {
    RigidBodyBuilder::kinematic_position_based().build()
}

pub fn pointer_collider() -> Collider {
    ColliderBuilder::ball(POINTER_RADIUS)
        .friction(POINTER_FRICTION)
        .build()
}

#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    handle: RigidBodyHandle,
}

impl Pointer {
    pub fn spawn(world: &mut PhysicsWorld) -> Self {
        Self {
            handle: world.insert(pointer_body(), [pointer_collider()]),
        }
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    /// Kinematic target for this frame; `None` when the cursor is unknown
    pub fn update(&self, ndc: Option<Vec2>, viewport: Viewport) -> Option<Vec3> {
        ndc.map(|ndc| pointer_target(ndc, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 8.0,
        height: 4.0,
    };

    #[test]
    fn maps_ndc_to_half_viewport() {
        assert_eq!(pointer_target(Vec2::new(1.0, 1.0), VIEW), Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(pointer_target(Vec2::new(-0.5, 0.25), VIEW), Vec3::new(-2.0, 0.5, 0.0));
        assert_eq!(pointer_target(Vec2::ZERO, VIEW), Vec3::ZERO);
    }

    #[test]
    fn no_cursor_no_target() {
        let mut world = PhysicsWorld::default();
        let pointer = Pointer::spawn(&mut world);
        assert_eq!(pointer.update(None, VIEW), None);
        assert_eq!(world.translation(pointer.handle()), Some(Vec3::ZERO));
    }

    #[test]
    fn pointer_is_kinematic_ball() {
        assert!(pointer_body().is_kinematic());
        let collider = pointer_collider();
        assert_eq!(collider.shape().as_ball().map(|b| b.radius), Some(1.0));
    }
}
