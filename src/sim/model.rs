//! Visual side of a connector: shading inputs and the eased display colour

use crate::consts::{COLOR_SMOOTH_TIME, MODEL_SCALE};
use crate::easing::ColorDamper;
use crate::palette::{Color, MaterialKind, MaterialSpec};

/// One instance of the shared connector mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Colour currently drawn
    pub displayed: Color,
    /// Colour the display eases toward
    pub target: Color,
    pub roughness: f32,
    pub kind: MaterialKind,
    pub scale: f32,
    damper: ColorDamper,
}

impl Model {
    /// New instances start from the material's default white and ease in
    pub fn new(material: &MaterialSpec, kind: MaterialKind) -> Self {
        Self {
            displayed: Color::WHITE,
            target: material.color,
            roughness: material.roughness,
            kind,
            scale: MODEL_SCALE,
            damper: ColorDamper::new(),
        }
    }

    /// Point at a new material. Roughness switches at once; colour eases.
    pub fn retarget(&mut self, material: &MaterialSpec) {
        self.target = material.color;
        self.roughness = material.roughness;
    }

    /// Per-frame colour damping. Returns true while still transitioning.
    pub fn update(&mut self, dt: f32) -> bool {
        self.damper
            .step(&mut self.displayed, self.target, COLOR_SMOOTH_TIME, dt)
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }
}
