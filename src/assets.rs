//! Connector model loading
//!
//! The asset is a binary glTF holding a node named `connector`. Its mesh is
//! flattened into one vertex/index list and the base-colour texture of the
//! `base` material is decoded to RGBA8 for upload.

use thiserror::Error;

use crate::renderer::vertex::MeshVertex;

/// Node holding the connector mesh
pub const CONNECTOR_NODE: &str = "connector";
/// Material whose base-colour texture is reused as the map
pub const BASE_MATERIAL: &str = "base";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("invalid glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("node `{0}` with a mesh not found")]
    MissingNode(String),
    #[error("mesh is missing the {0} attribute")]
    MissingAttribute(&'static str),
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// 1x1 white, used when the asset carries no texture
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }

    fn from_gltf(image: &gltf::image::Data) -> Option<Self> {
        use gltf::image::Format;
        let rgba = match image.format {
            Format::R8G8B8A8 => image.pixels.clone(),
            Format::R8G8B8 => image
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            Format::R8G8 => image
                .pixels
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            Format::R8 => image.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            other => {
                log::warn!("Unsupported texture format {:?}, using white", other);
                return None;
            }
        };
        Some(Self {
            width: image.width,
            height: image.height,
            rgba,
        })
    }
}

/// Connector geometry ready for upload
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub base_color: Option<TextureData>,
}

/// Parse the connector out of a glTF/GLB byte slice
pub fn parse_connector_glb(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;

    let mesh = document
        .nodes()
        .find(|node| node.name() == Some(CONNECTOR_NODE))
        .and_then(|node| node.mesh())
        .ok_or_else(|| AssetError::MissingNode(CONNECTOR_NODE.to_string()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut material = document
        .materials()
        .find(|m| m.name() == Some(BASE_MATERIAL));

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or(AssetError::MissingAttribute("POSITION"))?
            .collect();
        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .ok_or(AssetError::MissingAttribute("NORMAL"))?
            .collect();
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|t| t.into_f32().collect())
            .unwrap_or_default();

        let base = vertices.len() as u32;
        vertices.extend(positions.iter().zip(normals.iter()).enumerate().map(|(i, (p, n))| MeshVertex {
            position: *p,
            normal: *n,
            uv: uvs.get(i).copied().unwrap_or_default(),
        }));

        match reader.read_indices() {
            Some(read) => indices.extend(read.into_u32().map(|i| base + i)),
            None => indices.extend(base..base + positions.len() as u32),
        }

        if material.is_none() {
            material = Some(primitive.material());
        }
    }

    let base_color = material
        .and_then(|m| m.pbr_metallic_roughness().base_color_texture())
        .and_then(|info| images.get(info.texture().source().index()))
        .and_then(TextureData::from_gltf);

    log::info!(
        "Connector mesh: {} vertices, {} indices, texture: {}",
        vertices.len(),
        indices.len(),
        base_color.is_some()
    );

    Ok(MeshData {
        vertices,
        indices,
        base_color,
    })
}

/// Fetch raw bytes. Web: relative to the page. Native: under `./assets`.
pub async fn load_binary(path: &str) -> Result<Vec<u8>, AssetError> {
    let fail = |reason: String| AssetError::Fetch {
        path: path.to_string(),
        reason,
    };

    #[cfg(target_arch = "wasm32")]
    let data = {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or_else(|| fail("no window".into()))?;
        let response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| fail(format!("{:?}", e)))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| fail("not a Response".into()))?;
        if !response.ok() {
            return Err(fail(format!("HTTP {}", response.status())));
        }
        let buffer = response.array_buffer().map_err(|e| fail(format!("{:?}", e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| fail(format!("{:?}", e)))?;
        js_sys::Uint8Array::new(&buffer).to_vec()
    };

    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let file = std::path::Path::new("./")
            .join("assets")
            .join(path.trim_start_matches('/'));
        std::fs::read(&file).map_err(|e| fail(e.to_string()))?
    };

    Ok(data)
}

/// Fetch and parse the connector model
pub async fn load_connector(path: &str) -> Result<MeshData, AssetError> {
    let bytes = load_binary(path).await?;
    parse_connector_glb(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One triangle on a node named `connector`, buffer embedded as a data URI
    const TRIANGLE: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"name": "connector", "mesh": 0}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0, "NORMAL": 1}}]}],
        "buffers": [{
            "byteLength": 72,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/"
        }],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 36},
            {"buffer": 0, "byteOffset": 36, "byteLength": 36}
        ],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
             "min": [0, 0, 0], "max": [1, 1, 0]},
            {"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3"}
        ]
    }"#;

    #[test]
    fn garbage_is_a_gltf_error() {
        assert!(matches!(parse_connector_glb(b"not a model"), Err(AssetError::Gltf(_))));
    }

    #[test]
    fn missing_node_is_reported() {
        let err = parse_connector_glb(br#"{"asset":{"version":"2.0"}}"#).unwrap_err();
        assert!(matches!(err, AssetError::MissingNode(ref n) if n == "connector"));
    }

    #[test]
    fn reads_triangle() {
        let mesh = parse_connector_glb(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
        assert!(mesh.base_color.is_none());
    }

    #[test]
    fn rgb_texture_gains_alpha() {
        let image = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };
        let tex = TextureData::from_gltf(&image).unwrap();
        assert_eq!(tex.rgba, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }
}
