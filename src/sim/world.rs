//! Rigid-body world
//!
//! Thin wrapper around a Rapier pipeline. Callers hold [`RigidBodyHandle`]s and
//! mutate bodies only through the world's methods; the frame loop submits
//! impulses and kinematic targets, then calls [`PhysicsWorld::step`].

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_quat(q: &Rotation<Real>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// The simulated world
pub struct PhysicsWorld {
    pub gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Insert a body and attach its colliders
    pub fn insert(
        &mut self,
        body: RigidBody,
        colliders: impl IntoIterator<Item = Collider>,
    ) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }
        handle
    }

    /// Remove a body with its colliders. The handle stays dead even if the slot is reused.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        )
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Remove every body through the set so outstanding handles go stale
    pub fn clear(&mut self) {
        let handles: Vec<RigidBodyHandle> = self.bodies.iter().map(|(h, _)| h).collect();
        for handle in handles {
            self.remove(handle);
        }
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.body(handle).map(|b| to_vec3(b.translation()))
    }

    pub fn rotation(&self, handle: RigidBodyHandle) -> Option<Quat> {
        self.body(handle).map(|b| to_quat(b.rotation()))
    }

    /// Apply an impulse through the centre of mass. Returns false for a dead handle.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.apply_impulse(to_vector(impulse), true);
                true
            }
            None => false,
        }
    }

    /// Target translation a kinematic body reaches during the next step
    pub fn set_next_kinematic_translation(&mut self, handle: RigidBodyHandle, target: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) if body.is_kinematic() => {
                body.set_next_kinematic_translation(to_vector(target));
                true
            }
            _ => false,
        }
    }

    /// Advance the world by one fixed step
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &to_vector(self.gravity),
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(world: &mut PhysicsWorld, position: Vec3, damping: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .linear_damping(damping)
            .build();
        world.insert(body, [ColliderBuilder::cuboid(0.5, 0.5, 0.5).build()])
    }

    fn ball(world: &mut PhysicsWorld, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_vector(position))
            .build();
        world.insert(body, [ColliderBuilder::ball(1.0).build()])
    }

    #[test]
    fn zero_gravity_body_stays_put() {
        let mut world = PhysicsWorld::default();
        let h = cube(&mut world, Vec3::new(1.0, 2.0, 3.0), 0.0);
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let p = world.translation(h).unwrap();
        assert!(p.distance(Vec3::new(1.0, 2.0, 3.0)) < 1e-5);
    }

    #[test]
    fn damping_slows_body() {
        let mut world = PhysicsWorld::default();
        let h = cube(&mut world, Vec3::ZERO, 4.0);
        world.apply_impulse(h, Vec3::X);
        let start = world.body(h).unwrap().linvel().x;
        assert!(start > 0.0);
        world.step(1.0 / 60.0);
        let after = world.body(h).unwrap().linvel().x;
        assert!(after < start);
        assert!(after > 0.0);
    }

    #[test]
    fn gravity_accelerates_dynamic_bodies() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
        let h = cube(&mut world, Vec3::ZERO, 0.0);
        for _ in 0..6 {
            world.step(1.0 / 60.0);
        }
        assert!(world.translation(h).unwrap().y < 0.0);
    }

    #[test]
    fn kinematic_body_reaches_target() {
        let mut world = PhysicsWorld::default();
        let h = ball(&mut world, Vec3::ZERO);
        let target = Vec3::new(3.0, -1.0, 0.0);
        assert!(world.set_next_kinematic_translation(h, target));
        world.step(1.0 / 60.0);
        assert!(world.translation(h).unwrap().distance(target) < 1e-5);
        // No new target: stays
        world.step(1.0 / 60.0);
        assert!(world.translation(h).unwrap().distance(target) < 1e-5);
    }

    #[test]
    fn kinematic_target_rejected_for_dynamic() {
        let mut world = PhysicsWorld::default();
        let h = cube(&mut world, Vec3::ZERO, 0.0);
        assert!(!world.set_next_kinematic_translation(h, Vec3::ONE));
    }

    #[test]
    fn moving_kinematic_ball_pushes_cube() {
        let mut world = PhysicsWorld::default();
        let pusher = ball(&mut world, Vec3::new(-2.0, 0.0, 0.0));
        let cube_h = cube(&mut world, Vec3::ZERO, 4.0);
        for i in 1..=30 {
            world.set_next_kinematic_translation(pusher, Vec3::new(-2.0 + i as f32 * 0.05, 0.0, 0.0));
            world.step(1.0 / 60.0);
        }
        assert!(world.translation(cube_h).unwrap().x > 0.0);
        // The kinematic body is never pushed back
        assert!((world.translation(pusher).unwrap().x - (-0.5)).abs() < 1e-4);
    }

    #[test]
    fn overlapping_cubes_separate() {
        let mut world = PhysicsWorld::default();
        let a = cube(&mut world, Vec3::ZERO, 0.0);
        let b = cube(&mut world, Vec3::new(0.8, 0.0, 0.0), 0.0);
        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let gap = world.translation(b).unwrap().x - world.translation(a).unwrap().x;
        assert!(gap > 0.95, "gap {gap}");
    }

    #[test]
    fn dead_handles_are_ignored() {
        let mut world = PhysicsWorld::default();
        let h = cube(&mut world, Vec3::ZERO, 0.0);
        assert!(world.remove(h).is_some());
        assert!(world.translation(h).is_none());
        assert!(!world.apply_impulse(h, Vec3::X));
        assert!(world.is_empty());
        let h2 = cube(&mut world, Vec3::ONE, 0.0);
        assert_ne!(h, h2);
        assert!(world.translation(h).is_none());
    }

    #[test]
    fn handles_from_before_clear_stay_dead() {
        let mut world = PhysicsWorld::default();
        let old = cube(&mut world, Vec3::ZERO, 0.0);
        world.clear();
        assert!(world.is_empty());
        let new = cube(&mut world, Vec3::splat(9.0), 0.0);
        assert_eq!(world.translation(old), None);
        assert!(!world.apply_impulse(old, Vec3::X));
        assert!(!world.set_next_kinematic_translation(old, Vec3::ONE));
        assert_eq!(world.translation(new), Some(Vec3::splat(9.0)));
    }
}
