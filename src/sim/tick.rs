//! Per-frame update
//!
//! Order within a frame: clicks, pointer target, connector impulses, colour
//! easing, then as many fixed physics steps as the accumulated time allows.

use glam::Vec2;

use super::state::SceneState;
use crate::clamp_frame_delta;
use crate::consts::*;
use crate::scene::Viewport;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor in normalized device coordinates; `None` before the first move
    pub pointer: Option<Vec2>,
    /// Clicks on the canvas
    pub clicks: u32,
}

/// Advance the scene by one rendered frame. Returns the clamped delta.
pub fn tick(state: &mut SceneState, input: &TickInput, viewport: Viewport, raw_dt: f32) -> f32 {
    let dt = clamp_frame_delta(raw_dt);

    for _ in 0..input.clicks {
        state.advance_palette();
    }

    if let Some(target) = state.pointer.update(input.pointer, viewport) {
        state
            .world
            .set_next_kinematic_translation(state.pointer.handle(), target);
    }

    for connector in state.connectors.iter().chain(std::iter::once(&state.hero)) {
        if let Some(impulse) = connector.update(&state.world) {
            state.world.apply_impulse(connector.handle(), impulse);
        }
    }

    for connector in state.all_connectors_mut() {
        connector.model.update(dt);
    }

    state.accumulator += dt;
    let mut steps = 0;
    while state.accumulator >= PHYSICS_DT && steps < MAX_SUBSTEPS {
        state.world.step(PHYSICS_DT);
        state.accumulator -= PHYSICS_DT;
        steps += 1;
    }
    // Drop time we could not catch up on
    if steps == MAX_SUBSTEPS {
        state.accumulator = state.accumulator.min(PHYSICS_DT);
    }

    state.frame += 1;
    dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::accent_color;
    use glam::Vec3;

    const VIEW: Viewport = Viewport {
        width: 8.0,
        height: 4.0,
    };

    #[test]
    fn frame_delta_is_clamped() {
        let mut state = SceneState::new(1);
        assert_eq!(tick(&mut state, &TickInput::default(), VIEW, 5.0), MAX_FRAME_DT);
        assert_eq!(tick(&mut state, &TickInput::default(), VIEW, 0.01), 0.01);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn pointer_follows_cursor() {
        let mut state = SceneState::new(2);
        let input = TickInput {
            pointer: Some(Vec2::new(0.5, -0.5)),
            clicks: 0,
        };
        tick(&mut state, &input, VIEW, 1.0 / 30.0);
        let p = state.world.translation(state.pointer.handle()).unwrap();
        assert!(p.distance(Vec3::new(2.0, -1.0, 0.0)) < 1e-5, "pointer at {p:?}");
    }

    #[test]
    fn pointer_stays_without_cursor() {
        let mut state = SceneState::new(2);
        tick(&mut state, &TickInput::default(), VIEW, 1.0 / 30.0);
        assert_eq!(state.world.translation(state.pointer.handle()), Some(Vec3::ZERO));
    }

    #[test]
    fn clicks_advance_palette_once_each() {
        let mut state = SceneState::new(3);
        let input = TickInput {
            pointer: None,
            clicks: 2,
        };
        tick(&mut state, &input, VIEW, 1.0 / 60.0);
        assert_eq!(state.palette.index(), 2);
        assert_eq!(state.connectors[8].model.target, accent_color(2));
    }

    #[test]
    fn connectors_drift_toward_origin() {
        let mut state = SceneState::new(4);
        // Move the pointer well out of the way
        let input = TickInput {
            pointer: Some(Vec2::new(1.0, 1.0)),
            clicks: 0,
        };
        let far = |s: &SceneState| {
            s.world
                .translation(s.hero.handle())
                .map(|p| p.length())
                .unwrap_or_default()
        };
        let start = far(&state);
        for _ in 0..120 {
            tick(&mut state, &input, VIEW, 1.0 / 60.0);
        }
        assert!(far(&state) < start);
    }

    #[test]
    fn long_frame_catches_up_in_bounded_steps() {
        let mut state = SceneState::new(5);
        tick(&mut state, &TickInput::default(), VIEW, 1.0);
        assert!(state.accumulator <= PHYSICS_DT + 1e-6);
    }
}
