//! Static scene description: camera, lights and the environment rig
//!
//! None of this changes after mount. The renderer reads it once per frame and
//! the pointer mapping reads the camera's viewport.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::config::CameraConfig;
use crate::palette::Color;

/// Right-handed perspective camera looking at a target
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::from_array(config.position),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: config.fov.to_radians(),
            znear: config.near,
            zfar: config.far,
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space extent visible at the target's distance
    pub fn viewport(&self, aspect: f32) -> Viewport {
        Viewport::at_distance(self.fovy_radians, self.eye.distance(self.target), aspect)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Visible width and height in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn at_distance(fovy_radians: f32, distance: f32, aspect: f32) -> Self {
        let height = 2.0 * (fovy_radians * 0.5).tan() * distance;
        Self {
            width: height * aspect,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Cone light aimed at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Color,
    /// Half-angle of the cone in radians
    pub angle: f32,
    /// Fraction of the cone blurred at its edge, 0..1
    pub penumbra: f32,
    pub intensity: f32,
}

impl SpotLight {
    /// Near and far planes of the shadow camera
    pub const SHADOW_NEAR: f32 = 0.5;
    pub const SHADOW_FAR: f32 = 50.0;

    /// Light-space matrix for the shadow map: a perspective frustum covering the cone
    pub fn shadow_view_projection(&self) -> Mat4 {
        let fovy = (2.0 * self.angle).clamp(0.01, 3.0);
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(fovy, 1.0, Self::SHADOW_NEAR, Self::SHADOW_FAR);
        proj * view
    }
}

/// Point light carried by an accent connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Range after which the light contributes nothing
    pub distance: f32,
}

/// Emissive disc seen only in reflections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lightformer {
    pub intensity: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

/// A lightformer resolved into world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLighting {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
    /// Rotation of the whole environment rig
    pub environment_rotation: Quat,
    pub lightformers: [Lightformer; 4],
}

impl Default for SceneLighting {
    fn default() -> Self {
        let circle = |intensity: f32, rotation: Quat, position: [f32; 3], scale: f32| Lightformer {
            intensity,
            position: Vec3::from_array(position),
            rotation,
            scale,
        };
        Self {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.4,
            },
            spot: SpotLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                target: Vec3::ZERO,
                color: Color::WHITE,
                angle: 0.15,
                penumbra: 1.0,
                intensity: 1.0,
            },
            environment_rotation: Quat::from_rotation_x(-FRAC_PI_3)
                * Quat::from_rotation_y(0.0)
                * Quat::from_rotation_z(1.0),
            lightformers: [
                circle(4.0, Quat::from_rotation_x(FRAC_PI_2), [0.0, 5.0, -9.0], 2.0),
                circle(2.0, Quat::from_rotation_y(FRAC_PI_2), [-5.0, 1.0, -1.0], 2.0),
                circle(2.0, Quat::from_rotation_y(FRAC_PI_2), [-5.0, -1.0, -1.0], 2.0),
                circle(2.0, Quat::from_rotation_y(-FRAC_PI_2), [10.0, 1.0, 0.0], 8.0),
            ],
        }
    }
}

impl SceneLighting {
    /// Lightformers in world space. Discs are unit circles facing +Z before rotation.
    pub fn environment_discs(&self) -> [Disc; 4] {
        self.lightformers.map(|lf| Disc {
            center: self.environment_rotation * lf.position,
            normal: (self.environment_rotation * lf.rotation * Vec3::Z).normalize(),
            radius: lf.scale,
            intensity: lf.intensity,
        })
    }
}
