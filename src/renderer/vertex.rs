//! Vertex and instance layouts for the connector mesh

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::Model;

/// Mesh vertex as read from the model asset
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-instance data for one connector
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// Displayed colour, linear RGB, alpha unused
    pub color: [f32; 4],
    /// roughness, metalness, transmission (0 or 1), clearcoat
    pub params: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4,
        10 => Float32x4,
    ];

    pub fn new(position: Vec3, rotation: Quat, model: &Model) -> Self {
        let transform =
            Mat4::from_scale_rotation_translation(Vec3::splat(model.scale), rotation, position);
        let c = model.displayed;
        Self {
            model: transform.to_cols_array_2d(),
            color: [c.r, c.g, c.b, 1.0],
            params: [
                model.roughness,
                model.kind.metalness(),
                if model.kind.is_transmissive() { 1.0 } else { 0.0 },
                model.kind.clearcoat(),
            ],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{MaterialKind, MaterialSpec};

    #[test]
    fn layouts_match_struct_sizes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
    }

    #[test]
    fn instance_carries_scale_and_material() {
        let model = Model::new(&MaterialSpec::default(), MaterialKind::glass());
        let raw = InstanceRaw::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, &model);
        assert_eq!(raw.model[0][0], 10.0);
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(raw.params[2], 1.0);
        assert_eq!(raw.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
