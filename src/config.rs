//! Scene configuration
//!
//! Defaults describe the shipped page. On the web an optional JSON override
//! can be placed in the canvas' `data-scene-config` attribute; nothing is
//! persisted.

use serde::{Deserialize, Serialize};

/// Perspective camera looking at the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 15.0],
            fov: 17.5,
            near: 1.0,
            far: 30.0,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Device pixel ratio range [min, max]
    pub dpr: [f64; 2],
    /// Multisampled base pass
    pub antialias: bool,
    pub camera: CameraConfig,
    /// Path of the connector model asset
    pub asset_path: String,
    /// Seed for spawn positions; taken from the clock when absent
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dpr: [1.0, 1.5],
            antialias: false,
            camera: CameraConfig::default(),
            asset_path: "/c-transformed.glb".to_string(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Attribute on the canvas element holding a JSON override
    pub const ATTRIBUTE: &'static str = "data-scene-config";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp the device pixel ratio into the configured range
    pub fn effective_dpr(&self, device_dpr: f64) -> f64 {
        let [lo, hi] = self.dpr;
        let hi = hi.max(lo);
        device_dpr.clamp(lo, hi)
    }

    /// MSAA sample count for the base pass
    pub fn sample_count(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }

    /// Parse an optional override, falling back to defaults
    pub fn from_override(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(config) => {
                    log::info!("Loaded scene config override");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring invalid scene config: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load config from the canvas attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let json = canvas.get_attribute(Self::ATTRIBUTE);
        Self::from_override(json.as_deref())
    }

    /// Native builds always run with defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
