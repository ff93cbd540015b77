//! Connector: a plus-shaped dynamic body pulled back toward the origin

use glam::Vec3;
use rapier3d::prelude::{Collider, ColliderBuilder, RigidBody, RigidBodyBuilder, RigidBodyHandle};

use super::model::Model;
use super::world::{PhysicsWorld, to_vector};
use crate::consts::*;
use crate::palette::{MaterialKind, MaterialSpec};
use crate::scene::PointLight;

/// Restoring impulse for a body at `translation`
#[inline]
pub fn centering_impulse(translation: Vec3) -> Vec3 {
    -translation * CENTERING_STRENGTH
}

/// Damped dynamic body at `position`
pub fn connector_body(position: Vec3) -> RigidBody {
    RigidBodyBuilder::dynamic()
        .translation(to_vector(position))
        .linear_damping(CONNECTOR_LINEAR_DAMPING)
        .angular_damping(CONNECTOR_ANGULAR_DAMPING)
        .build()
}

/// Three interpenetrating boxes forming the plus shape
pub fn connector_colliders() -> [Collider; 3] {
    CONNECTOR_HALF_EXTENTS.map(|[hx, hy, hz]| {
        ColliderBuilder::cuboid(hx, hy, hz)
            .friction(CONNECTOR_FRICTION)
            .build()
    })
}

#[derive(Debug, Clone)]
pub struct Connector {
    handle: RigidBodyHandle,
    material: MaterialSpec,
    pub model: Model,
}

impl Connector {
    /// Insert the body and build its model
    pub fn spawn(
        world: &mut PhysicsWorld,
        position: Vec3,
        material: MaterialSpec,
        kind: MaterialKind,
    ) -> Self {
        let handle = world.insert(connector_body(position), connector_colliders());
        Self {
            handle,
            material,
            model: Model::new(&material, kind),
        }
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    pub fn material(&self) -> &MaterialSpec {
        &self.material
    }

    pub fn set_material(&mut self, material: MaterialSpec) {
        self.material = material;
        self.model.retarget(&material);
    }

    /// Impulse to submit this frame, or `None` while the body is not live
    pub fn update(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world.translation(self.handle).map(centering_impulse)
    }

    /// Glow attached to accent connectors, following the body
    pub fn point_light(&self, world: &PhysicsWorld) -> Option<PointLight> {
        if !self.material.accent {
            return None;
        }
        let position = world.translation(self.handle)?;
        Some(PointLight {
            position,
            color: self.material.color,
            intensity: ACCENT_LIGHT_INTENSITY,
            distance: ACCENT_LIGHT_DISTANCE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Color, accent_color};

    #[test]
    fn impulse_points_at_origin() {
        assert_eq!(centering_impulse(Vec3::new(5.0, -10.0, 0.0)), Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(centering_impulse(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn body_carries_connector_constants() {
        let body = connector_body(Vec3::ONE);
        assert_eq!(body.linear_damping(), 4.0);
        assert_eq!(body.angular_damping(), 1.0);
        assert!(body.is_dynamic());

        let colliders = connector_colliders();
        let extents: Vec<_> = colliders
            .iter()
            .map(|c| c.shape().as_cuboid().map(|b| b.half_extents))
            .collect();
        assert_eq!(extents[1], Some(to_vector(Vec3::new(1.27, 0.38, 0.38))));
        assert!(colliders.iter().all(|c| c.friction() == 0.1 && c.density() == 1.0));
    }

    #[test]
    fn update_is_noop_for_dead_body() {
        let mut world = PhysicsWorld::default();
        let connector = Connector::spawn(&mut world, Vec3::X, MaterialSpec::default(), MaterialKind::standard());
        assert_eq!(connector.update(&world), Some(Vec3::new(-0.2, 0.0, 0.0)));
        world.remove(connector.handle());
        assert_eq!(connector.update(&world), None);
    }

    #[test]
    fn only_accents_glow() {
        let mut world = PhysicsWorld::default();
        let plain = Connector::spawn(&mut world, Vec3::ZERO, MaterialSpec::new(Color::WHITE, 0.1), MaterialKind::standard());
        let accent = Connector::spawn(
            &mut world,
            Vec3::new(3.0, 0.0, 0.0),
            MaterialSpec::accent(accent_color(2), 0.75),
            MaterialKind::standard(),
        );
        assert!(plain.point_light(&world).is_none());
        let light = accent.point_light(&world).unwrap();
        assert_eq!(light.color, accent_color(2));
        assert_eq!(light.intensity, 4.0);
        assert_eq!(light.distance, 2.5);
        assert_eq!(light.position, Vec3::new(3.0, 0.0, 0.0));
    }
}
