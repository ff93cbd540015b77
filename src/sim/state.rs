//! Scene state: everything mounted on the page and mutated per frame

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::connector::Connector;
use super::pointer::Pointer;
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::palette::{AccentPalette, MaterialKind, MaterialSpec};
use crate::scene::PointLight;

/// Uniform value in [-spread/2, spread/2]
fn rand_spread(rng: &mut Pcg32, spread: f32) -> f32 {
    spread * (rng.random::<f32>() - 0.5)
}

/// Mounted scene
pub struct SceneState {
    /// Seed the layout was generated from
    pub seed: u64,
    pub palette: AccentPalette,
    pub world: PhysicsWorld,
    pub pointer: Pointer,
    /// Palette-driven connectors, keyed by position in this list
    pub connectors: Vec<Connector>,
    /// Fixed glass connector
    pub hero: Connector,
    /// Unsimulated time carried to the next frame
    pub(crate) accumulator: f32,
    /// Frames ticked since mount
    pub frame: u64,
}

impl SceneState {
    /// Mount the scene: zero-gravity world, pointer, nine connectors and the hero
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let palette = AccentPalette::new();
        let pointer = Pointer::spawn(&mut world);

        let connectors = palette
            .materials()
            .into_iter()
            .map(|material| {
                let position = Vec3::new(
                    rand_spread(&mut rng, SPAWN_SPREAD),
                    rand_spread(&mut rng, SPAWN_SPREAD),
                    rand_spread(&mut rng, SPAWN_SPREAD),
                );
                Connector::spawn(&mut world, position, material, MaterialKind::standard())
            })
            .collect();

        let hero = Connector::spawn(
            &mut world,
            Vec3::from_array(HERO_POSITION),
            MaterialSpec::default(),
            MaterialKind::glass(),
        );

        log::debug!("Scene mounted with seed {}: {} bodies", seed, world.len());

        Self {
            seed,
            palette,
            world,
            pointer,
            connectors,
            hero,
            accumulator: 0.0,
            frame: 0,
        }
    }

    /// Click: rotate the accent and hand the new materials to the connectors
    pub fn advance_palette(&mut self) {
        let index = self.palette.advance();
        log::debug!("Accent palette -> {}", index);
        self.apply_palette();
    }

    /// Re-apply the recipe for the current index. Bodies keep their positions.
    pub fn apply_palette(&mut self) {
        for (connector, material) in self.connectors.iter_mut().zip(self.palette.materials()) {
            connector.set_material(material);
        }
    }

    /// Generated connectors followed by the hero
    pub fn all_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().chain(std::iter::once(&self.hero))
    }

    pub fn all_connectors_mut(&mut self) -> impl Iterator<Item = &mut Connector> {
        self.connectors.iter_mut().chain(std::iter::once(&mut self.hero))
    }

    /// Lights carried by accent connectors this frame
    pub fn point_lights(&self) -> Vec<PointLight> {
        self.all_connectors()
            .filter_map(|c| c.point_light(&self.world))
            .collect()
    }

    /// Release every body
    pub fn unmount(&mut self) {
        self.world.clear();
        log::debug!("Scene unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::accent_color;

    #[test]
    fn mount_layout() {
        let state = SceneState::new(42);
        assert_eq!(state.connectors.len(), GENERATED_CONNECTORS);
        // pointer + nine + hero
        assert_eq!(state.world.len(), 11);
        assert_eq!(state.world.gravity, Vec3::ZERO);
        assert_eq!(state.world.translation(state.hero.handle()), Some(Vec3::new(10.0, 10.0, 5.0)));
        assert!(state.hero.model.kind.is_transmissive());
        assert_eq!(state.palette.index(), 0);
    }

    #[test]
    fn spawn_positions_within_spread() {
        let state = SceneState::new(7);
        for c in &state.connectors {
            let p = state.world.translation(c.handle()).unwrap();
            assert!(p.abs().max_element() <= SPAWN_SPREAD / 2.0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = SceneState::new(99);
        let b = SceneState::new(99);
        for (ca, cb) in a.connectors.iter().zip(b.connectors.iter()) {
            assert_eq!(a.world.translation(ca.handle()), b.world.translation(cb.handle()));
        }
    }

    #[test]
    fn click_recolours_accents_only() {
        let mut state = SceneState::new(1);
        let positions: Vec<_> = state
            .connectors
            .iter()
            .map(|c| state.world.translation(c.handle()))
            .collect();
        state.advance_palette();
        assert_eq!(state.palette.index(), 1);
        for c in &state.connectors[6..] {
            assert_eq!(c.model.target, accent_color(1));
        }
        for c in &state.connectors[..6] {
            assert!(!c.material().accent);
        }
        // Hero keeps its glass material
        assert_eq!(*state.hero.material(), MaterialSpec::default());
        // Bodies are keyed by index and stay where they were
        let after: Vec<_> = state
            .connectors
            .iter()
            .map(|c| state.world.translation(c.handle()))
            .collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn three_accent_lights() {
        let state = SceneState::new(3);
        let lights = state.point_lights();
        assert_eq!(lights.len(), 3);
        assert!(lights.iter().all(|l| l.color == accent_color(0)));
    }

    #[test]
    fn unmount_releases_bodies() {
        let mut state = SceneState::new(5);
        state.unmount();
        assert!(state.world.is_empty());
        assert!(state.point_lights().is_empty());
    }

    #[test]
    fn handles_do_not_survive_unmount() {
        let mut state = SceneState::new(5);
        let hero = state.hero.handle();
        let pointer = state.pointer.handle();
        state.unmount();

        // A body inserted afterwards may reuse a freed slot, never an old handle
        let fresh = Connector::spawn(
            &mut state.world,
            Vec3::splat(9.0),
            MaterialSpec::default(),
            MaterialKind::standard(),
        );
        assert_eq!(state.world.translation(fresh.handle()), Some(Vec3::splat(9.0)));
        assert_eq!(state.hero.update(&state.world), None);
        assert!(!state.world.set_next_kinematic_translation(pointer, Vec3::ONE));
        assert_eq!(state.world.translation(hero), None);
    }
}
